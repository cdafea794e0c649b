//! The recipe service: one entry point over the remote and demo backends.
//!
//! The service starts in [`Mode::Remote`] only when a plausible credential
//! was configured. The first error from any remote call demotes it to
//! [`Mode::Demo`] for the rest of the process, and the failed operation is
//! repeated once against the demo backend. Remote failures never reach the
//! caller; the one exception is updating a record without an id while the
//! remote store is active.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use crate::backend::{FirestoreBackend, MemoryBackend, RecipeBackend};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::recipe::{now_millis, Recipe, RecipeDraft};
use crate::seed;

/// Which backend is serving requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The remote document store.
    Remote,
    /// The in-memory demo store.
    Demo,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remote => write!(f, "remote"),
            Self::Demo => write!(f, "demo"),
        }
    }
}

/// Recipe data access with automatic, permanent fallback to demo data.
#[derive(Debug)]
pub struct RecipeService {
    remote: Option<Box<dyn RecipeBackend>>,
    demo: MemoryBackend,
    demoted: AtomicBool,
}

impl RecipeService {
    /// Create a service over an optional remote backend.
    ///
    /// With `None` the service runs in demo mode from the start.
    #[must_use]
    pub fn new(remote: Option<Box<dyn RecipeBackend>>, demo: MemoryBackend) -> Self {
        Self {
            remote,
            demo,
            demoted: AtomicBool::new(false),
        }
    }

    /// Create a service that never talks to a remote store.
    #[must_use]
    pub fn demo_only(demo: MemoryBackend) -> Self {
        Self::new(None, demo)
    }

    /// Build the service from configuration.
    ///
    /// An absent or implausible credential, or a remote client that cannot
    /// be built, selects demo mode without attempting any remote call.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let demo = MemoryBackend::with_latency(config.demo.latency());

        if !config.remote.credential_is_plausible() {
            warn!("No valid API key configured, using demo recipes");
            return Self::demo_only(demo);
        }

        match FirestoreBackend::new(&config.remote) {
            Ok(remote) => {
                debug!("Using remote store at {}", remote.collection_url());
                Self::new(Some(Box::new(remote)), demo)
            }
            Err(e) => {
                warn!("Remote store unavailable, using demo recipes: {e}");
                Self::demo_only(demo)
            }
        }
    }

    /// The backend currently serving requests.
    #[must_use]
    pub fn mode(&self) -> Mode {
        if self.active_remote().is_some() {
            Mode::Remote
        } else {
            Mode::Demo
        }
    }

    /// The demo backend.
    #[must_use]
    pub fn demo(&self) -> &MemoryBackend {
        &self.demo
    }

    /// List the whole collection in insertion order.
    ///
    /// An empty remote collection is seeded first, so the result is never
    /// empty while seed data exists.
    ///
    /// # Errors
    ///
    /// Returns an error only if the demo store itself fails.
    pub async fn list_all(&self) -> Result<Vec<Recipe>> {
        if let Some(remote) = self.active_remote() {
            match remote.fetch_all().await {
                Ok(recipes) if recipes.is_empty() => {
                    info!("Remote collection is empty, seeding");
                    return self.seed().await;
                }
                Ok(recipes) => return Ok(recipes),
                Err(e) => self.demote(remote, "list", &e),
            }
        }
        self.demo.fetch_all().await
    }

    /// Find one recipe by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecipeNotFound`] if no recipe has this id.
    pub async fn get(&self, id: &str) -> Result<Recipe> {
        self.list_all()
            .await?
            .into_iter()
            .find(|recipe| recipe.id.as_deref() == Some(id))
            .ok_or_else(|| Error::not_found(id))
    }

    /// Save a new recipe and return it with its id.
    ///
    /// The draft is cleaned and validated, stamped with the current time and
    /// given the contributor's avatar color before it is written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRecipe`] if the draft fails validation.
    pub async fn add(&self, draft: RecipeDraft) -> Result<Recipe> {
        let mut recipe = Recipe::from_draft(draft, now_millis());
        recipe.normalize()?;

        if let Some(remote) = self.active_remote() {
            match remote.insert(recipe.clone()).await {
                Ok(saved) => return Ok(saved),
                Err(e) => self.demote(remote, "add", &e),
            }
        }
        self.demo.insert(recipe).await
    }

    /// Replace a saved recipe and return it as written.
    ///
    /// In demo mode a recipe without an id, or with an id the store does
    /// not hold, is silently left unsaved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRecipe`] if the record fails validation, and
    /// [`Error::MissingRecipeId`] if it has no id while the remote store is
    /// active.
    pub async fn update(&self, mut recipe: Recipe) -> Result<Recipe> {
        recipe.normalize()?;

        if let Some(remote) = self.active_remote() {
            let id = recipe
                .id
                .as_deref()
                .filter(|id| !id.is_empty())
                .ok_or(Error::MissingRecipeId)?;
            match remote.update(id, &recipe).await {
                Ok(()) => return Ok(recipe),
                Err(e) => self.demote(remote, "update", &e),
            }
        }

        match recipe.id.as_deref() {
            Some(id) => self.demo.update(id, &recipe).await?,
            None => debug!("Ignoring update of unsaved recipe in demo mode"),
        }
        Ok(recipe)
    }

    /// Fill the active backend with the seed recipes and return what was
    /// written.
    ///
    /// The demo store is replaced outright. Against the remote store each
    /// seed is saved in order with [`add`](Self::add); a seed that cannot be
    /// saved is logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the demo store cannot be written.
    pub async fn seed(&self) -> Result<Vec<Recipe>> {
        if self.active_remote().is_none() {
            return self.demo.reseed();
        }

        let mut written = Vec::new();
        for draft in seed::seed_recipes() {
            let title = draft.title.clone();
            match self.add(draft).await {
                Ok(saved) => written.push(saved),
                Err(e) => warn!("Failed to seed recipe {title}: {e}"),
            }
        }
        info!("Seeded {} recipes", written.len());
        Ok(written)
    }

    fn active_remote(&self) -> Option<&dyn RecipeBackend> {
        if self.demoted.load(Ordering::SeqCst) {
            return None;
        }
        self.remote.as_deref()
    }

    fn demote(&self, remote: &dyn RecipeBackend, operation: &str, error: &Error) {
        if !self.demoted.swap(true, Ordering::SeqCst) {
            warn!(
                backend = remote.name(),
                "Remote {operation} failed, switching to demo recipes: {error}"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;
    use crate::backend::DemoLatency;
    use crate::config::RemoteConfig;
    use crate::recipe::Category;

    /// In-process remote stand-in with a switchable failure.
    #[derive(Debug, Default)]
    struct FakeRemote {
        recipes: Mutex<Vec<Recipe>>,
        failing: AtomicBool,
        calls: AtomicUsize,
        inserts: AtomicUsize,
        /// Start failing at this zero-based insert.
        fail_from_insert: Option<usize>,
    }

    impl FakeRemote {
        fn failing() -> Self {
            let remote = Self::default();
            remote.failing.store(true, Ordering::SeqCst);
            remote
        }

        fn holding(recipes: Vec<Recipe>) -> Self {
            Self {
                recipes: Mutex::new(recipes),
                ..Self::default()
            }
        }

        fn failing_from_insert(n: usize) -> Self {
            Self {
                fail_from_insert: Some(n),
                ..Self::default()
            }
        }

        fn call(&self) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                return Err(Error::RemoteStatus {
                    operation: "fake",
                    status: 403,
                    message: "PERMISSION_DENIED".to_string(),
                });
            }
            Ok(())
        }
    }

    #[async_trait::async_trait]
    impl RecipeBackend for Arc<FakeRemote> {
        fn name(&self) -> &'static str {
            "fake"
        }

        async fn fetch_all(&self) -> Result<Vec<Recipe>> {
            self.call()?;
            Ok(self.recipes.lock().unwrap().clone())
        }

        async fn insert(&self, recipe: Recipe) -> Result<Recipe> {
            let n = self.inserts.fetch_add(1, Ordering::SeqCst);
            if self.fail_from_insert.is_some_and(|from| n >= from) {
                self.failing.store(true, Ordering::SeqCst);
            }
            self.call()?;
            let mut recipes = self.recipes.lock().unwrap();
            let saved = recipe.with_id(format!("remote-{}", recipes.len()));
            recipes.push(saved.clone());
            Ok(saved)
        }

        async fn update(&self, id: &str, recipe: &Recipe) -> Result<()> {
            self.call()?;
            let mut recipes = self.recipes.lock().unwrap();
            let stored = recipes
                .iter_mut()
                .find(|r| r.id.as_deref() == Some(id))
                .ok_or_else(|| Error::RemoteStatus {
                    operation: "update",
                    status: 404,
                    message: "NOT_FOUND".to_string(),
                })?;
            *stored = recipe.clone();
            Ok(())
        }
    }

    fn instant_demo() -> MemoryBackend {
        MemoryBackend::with_latency(DemoLatency {
            read: Duration::ZERO,
            write: Duration::ZERO,
        })
    }

    fn with_remote(remote: &Arc<FakeRemote>) -> RecipeService {
        RecipeService::new(Some(Box::new(Arc::clone(remote))), instant_demo())
    }

    fn draft(title: &str) -> RecipeDraft {
        RecipeDraft::new(
            title,
            Category::Desserts,
            vec!["1 crust".to_string()],
            vec!["Bake.".to_string()],
            "Wade",
        )
    }

    fn ids(recipes: &[Recipe]) -> Vec<&str> {
        recipes.iter().filter_map(|r| r.id.as_deref()).collect()
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(Mode::Remote.to_string(), "remote");
        assert_eq!(Mode::Demo.to_string(), "demo");
    }

    #[test]
    fn test_from_config_without_key_is_demo() {
        let service = RecipeService::from_config(&Config::default());
        assert_eq!(service.mode(), Mode::Demo);
    }

    #[test]
    fn test_from_config_implausible_key_is_demo() {
        let config = Config {
            remote: RemoteConfig {
                api_key: Some("sk-not-a-google-key".to_string()),
                ..RemoteConfig::default()
            },
            ..Config::default()
        };
        assert_eq!(RecipeService::from_config(&config).mode(), Mode::Demo);
    }

    #[test]
    fn test_from_config_plausible_key_is_remote() {
        let config = Config {
            remote: RemoteConfig {
                api_key: Some("AIzaSyExample".to_string()),
                ..RemoteConfig::default()
            },
            ..Config::default()
        };
        assert_eq!(RecipeService::from_config(&config).mode(), Mode::Remote);
    }

    #[tokio::test]
    async fn test_demo_list_returns_seeds_in_order() {
        let service = RecipeService::demo_only(instant_demo());

        let recipes = service.list_all().await.unwrap();
        assert_eq!(ids(&recipes), vec!["demo-0", "demo-1", "demo-2", "demo-3"]);
        assert_eq!(recipes[0].title, "Famous Cactus Dip");
    }

    #[tokio::test]
    async fn test_remote_list_success() {
        let stored = seed::demo_records(0);
        let remote = Arc::new(FakeRemote::holding(stored.clone()));
        let service = with_remote(&remote);

        assert_eq!(service.list_all().await.unwrap(), stored);
        assert_eq!(service.mode(), Mode::Remote);
    }

    #[tokio::test]
    async fn test_empty_remote_is_seeded() {
        let remote = Arc::new(FakeRemote::default());
        let service = with_remote(&remote);

        let recipes = service.list_all().await.unwrap();
        assert_eq!(recipes.len(), seed::seed_recipes().len());
        assert_eq!(
            ids(&recipes),
            vec!["remote-0", "remote-1", "remote-2", "remote-3"]
        );
        assert_eq!(remote.recipes.lock().unwrap().len(), 4);
        assert_eq!(service.mode(), Mode::Remote);
    }

    #[tokio::test]
    async fn test_seeding_failure_midway_finishes_in_demo() {
        let remote = Arc::new(FakeRemote::failing_from_insert(2));
        let service = with_remote(&remote);

        let first = service.list_all().await.unwrap();
        let first_ids = ids(&first);
        assert_eq!(first_ids.len(), 4);
        assert_eq!(first_ids[..2], ["remote-0", "remote-1"]);
        assert!(first_ids[2..].iter().all(|id| id.starts_with("demo-")));
        assert_ne!(first_ids[2], first_ids[3]);
        assert_eq!(service.mode(), Mode::Demo);
        assert_eq!(remote.recipes.lock().unwrap().len(), 2);

        // Only the seeds that landed in the demo store survive the switch.
        let second = service.list_all().await.unwrap();
        assert_eq!(ids(&second), first_ids[2..]);
    }

    #[tokio::test]
    async fn test_list_failure_falls_back_to_demo() {
        let remote = Arc::new(FakeRemote::failing());
        let service = with_remote(&remote);

        let recipes = service.list_all().await.unwrap();
        assert_eq!(ids(&recipes), vec!["demo-0", "demo-1", "demo-2", "demo-3"]);
        assert_eq!(service.mode(), Mode::Demo);
    }

    #[tokio::test]
    async fn test_fallback_is_permanent() {
        crate::logging::init_test_logging();
        let remote = Arc::new(FakeRemote::failing());
        let service = with_remote(&remote);

        service.list_all().await.unwrap();
        assert_eq!(remote.calls.load(Ordering::SeqCst), 1);

        // The remote would now succeed, but it is never asked again.
        remote.failing.store(false, Ordering::SeqCst);
        service.list_all().await.unwrap();
        let saved = service.add(draft("Test Pie")).await.unwrap();
        service.update(saved).await.unwrap();

        assert_eq!(remote.calls.load(Ordering::SeqCst), 1);
        assert_eq!(service.mode(), Mode::Demo);
    }

    #[tokio::test]
    async fn test_add_failure_retries_against_demo() {
        let remote = Arc::new(FakeRemote::failing());
        let service = with_remote(&remote);

        let saved = service.add(draft("Test Pie")).await.unwrap();
        assert!(saved.id.unwrap().starts_with(seed::DEMO_ID_PREFIX));
        assert_eq!(service.demo().len().unwrap(), 1);
        assert_eq!(service.mode(), Mode::Demo);
    }

    #[tokio::test]
    async fn test_add_remote_success() {
        let remote = Arc::new(FakeRemote::default());
        let service = with_remote(&remote);

        let saved = service.add(draft("Test Pie")).await.unwrap();
        assert_eq!(saved.id.as_deref(), Some("remote-0"));
        assert_eq!(saved.user_color.as_deref(), Some("#0369a1"));
        assert!(saved.timestamp > 0);
        assert!(service.demo().is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_add_cleans_blank_ingredients() {
        let service = RecipeService::demo_only(instant_demo());
        let mut pie = draft("Test Pie");
        pie.ingredients = vec![String::new(), "  ".to_string(), "Flour".to_string()];

        let saved = service.add(pie).await.unwrap();
        assert_eq!(saved.ingredients, vec!["Flour".to_string()]);
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_draft_before_writing() {
        let remote = Arc::new(FakeRemote::default());
        let service = with_remote(&remote);
        let mut pie = draft("Test Pie");
        pie.ingredients = vec![" ".to_string()];

        let err = service.add(pie).await.unwrap_err();
        assert!(matches!(err, Error::InvalidRecipe { .. }));
        assert_eq!(remote.calls.load(Ordering::SeqCst), 0);
        assert_eq!(service.mode(), Mode::Remote);
    }

    #[tokio::test]
    async fn test_add_same_draft_twice_gives_distinct_ids() {
        let service = RecipeService::demo_only(instant_demo());

        let first = service.add(draft("Test Pie")).await.unwrap();
        let second = service.add(draft("Test Pie")).await.unwrap();

        let first_id = first.id.unwrap();
        assert!(!first_id.is_empty());
        assert_ne!(first_id, second.id.unwrap());
    }

    #[tokio::test]
    async fn test_update_without_id_in_remote_mode_is_error() {
        let remote = Arc::new(FakeRemote::default());
        let service = with_remote(&remote);
        let unsaved = Recipe::from_draft(draft("Test Pie"), 0);

        let err = service.update(unsaved).await.unwrap_err();
        assert!(matches!(err, Error::MissingRecipeId));
        assert_eq!(service.mode(), Mode::Remote);
        assert_eq!(remote.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_update_without_id_in_demo_mode_is_noop() {
        let service = RecipeService::demo_only(instant_demo());
        let before = service.list_all().await.unwrap();

        service
            .update(Recipe::from_draft(draft("Test Pie"), 0))
            .await
            .unwrap();

        assert_eq!(service.list_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_update_unknown_id_in_demo_mode_is_noop() {
        let service = RecipeService::demo_only(instant_demo());
        let before = service.list_all().await.unwrap();

        let ghost = Recipe::from_draft(draft("Ghost"), 0).with_id("demo-404");
        service.update(ghost).await.unwrap();

        assert_eq!(service.list_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_update_recomputes_color() {
        let service = RecipeService::demo_only(instant_demo());
        let mut recipe = service.get("demo-0").await.unwrap();
        recipe.added_by = "Shirley".to_string();
        recipe.user_color = Some("#ffffff".to_string());

        let written = service.update(recipe).await.unwrap();
        assert_eq!(written.user_color.as_deref(), Some("#e11d48"));
        assert_eq!(
            service.get("demo-0").await.unwrap().user_color.as_deref(),
            Some("#e11d48")
        );
    }

    #[tokio::test]
    async fn test_update_failure_retries_against_demo() {
        let remote = Arc::new(FakeRemote::default());
        let service = with_remote(&remote);
        let saved = service.add(draft("Test Pie")).await.unwrap();

        remote.failing.store(true, Ordering::SeqCst);
        service.update(saved).await.unwrap();
        assert_eq!(service.mode(), Mode::Demo);
    }

    #[tokio::test]
    async fn test_get_unknown_id() {
        let service = RecipeService::demo_only(instant_demo());
        let err = service.get("nope").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_seed_in_demo_mode_replaces_store() {
        let service = RecipeService::demo_only(instant_demo());
        service.add(draft("Test Pie")).await.unwrap();

        let seeded = service.seed().await.unwrap();
        assert_eq!(ids(&seeded), vec!["demo-0", "demo-1", "demo-2", "demo-3"]);
        assert_eq!(service.demo().len().unwrap(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_demo_latency_is_simulated() {
        let service = RecipeService::demo_only(MemoryBackend::new());
        let started = tokio::time::Instant::now();

        service.list_all().await.unwrap();
        service.add(draft("Test Pie")).await.unwrap();

        let latency = DemoLatency::default();
        assert!(started.elapsed() >= latency.read + latency.write);
    }
}
