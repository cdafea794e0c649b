//! In-memory demo backend.
//!
//! Holds the collection for the lifetime of the process only. The store is
//! filled from the seed set the first time it is read while empty, and every
//! call waits a short, fixed delay so callers see the same non-instant
//! behavior as with the remote store.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use tracing::debug;

use super::RecipeBackend;
use crate::error::{Error, Result};
use crate::recipe::{now_millis, Recipe};
use crate::seed::{self, DEMO_ID_PREFIX};

/// Simulated latency of the demo store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoLatency {
    /// Delay before a read returns.
    pub read: Duration,
    /// Delay before a write returns.
    pub write: Duration,
}

impl Default for DemoLatency {
    fn default() -> Self {
        Self {
            read: Duration::from_millis(800),
            write: Duration::from_millis(300),
        }
    }
}

/// Process-local recipe store used in demo mode.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    recipes: Mutex<Vec<Recipe>>,
    latency: DemoLatency,
    /// Last millisecond value handed out as an id, so ids stay unique when
    /// two writes land in the same millisecond.
    last_id: AtomicI64,
}

impl MemoryBackend {
    /// Create an empty demo store with the default latency.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty demo store with the given latency.
    #[must_use]
    pub fn with_latency(latency: DemoLatency) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    /// The configured latency.
    #[must_use]
    pub fn latency(&self) -> DemoLatency {
        self.latency
    }

    /// Number of records currently held.
    ///
    /// # Errors
    ///
    /// Returns an error if the store lock is poisoned.
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    /// Check if the store holds no records.
    ///
    /// # Errors
    ///
    /// Returns an error if the store lock is poisoned.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.lock()?.is_empty())
    }

    /// Replace the contents with the seed set, ids `demo-0..`, and return it.
    ///
    /// # Errors
    ///
    /// Returns an error if the store lock is poisoned.
    pub fn reseed(&self) -> Result<Vec<Recipe>> {
        let seeded = seed::demo_records(now_millis());
        *self.lock()? = seeded.clone();
        debug!("Seeded demo store with {} recipes", seeded.len());
        Ok(seeded)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Recipe>>> {
        self.recipes
            .lock()
            .map_err(|_| Error::internal("demo store lock poisoned"))
    }

    /// A time-based id, strictly greater than any issued before.
    fn next_id(&self) -> String {
        let now = now_millis();
        let previous = self
            .last_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or(now);
        format!("{DEMO_ID_PREFIX}{}", now.max(previous + 1))
    }
}

#[async_trait::async_trait]
impl RecipeBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "demo"
    }

    async fn fetch_all(&self) -> Result<Vec<Recipe>> {
        let snapshot = {
            let mut recipes = self.lock()?;
            if recipes.is_empty() {
                *recipes = seed::demo_records(now_millis());
                debug!("Populated empty demo store from seed data");
            }
            recipes.clone()
        };
        tokio::time::sleep(self.latency.read).await;
        Ok(snapshot)
    }

    async fn insert(&self, recipe: Recipe) -> Result<Recipe> {
        let saved = recipe.with_id(self.next_id());
        self.lock()?.push(saved.clone());
        debug!(id = ?saved.id, "Added recipe to demo store");
        tokio::time::sleep(self.latency.write).await;
        Ok(saved)
    }

    async fn update(&self, id: &str, recipe: &Recipe) -> Result<()> {
        {
            let mut recipes = self.lock()?;
            match recipes
                .iter_mut()
                .find(|stored| stored.id.as_deref() == Some(id))
            {
                Some(stored) => *stored = recipe.clone().with_id(id),
                None => debug!(id, "No demo recipe to update"),
            }
        }
        tokio::time::sleep(self.latency.write).await;
        Ok(())
    }
}
