//! Per-client favorites.
//!
//! The favorites list is a JSON array of recipe ids kept in client storage
//! under a single key. It is read once when loaded and rewritten in full on
//! every toggle. Favorites never reach the recipe store.

use tracing::{debug, warn};

use crate::error::Result;
use crate::recipe::Recipe;
use crate::storage::Storage;

/// Storage key holding the favorites list.
pub const FAVORITES_KEY: &str = "shirley_favorites";

/// The set of recipe ids this client has starred.
#[derive(Debug)]
pub struct Favorites {
    ids: Vec<String>,
    storage: Storage,
}

impl Favorites {
    /// Load the favorites list from storage.
    ///
    /// A missing or unreadable list is treated as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage read itself fails.
    pub fn load(storage: Storage) -> Result<Self> {
        let ids = match storage.get(FAVORITES_KEY)? {
            Some(raw) => serde_json::from_str::<Vec<String>>(&raw).unwrap_or_else(|e| {
                warn!("Ignoring unreadable favorites list: {e}");
                Vec::new()
            }),
            None => Vec::new(),
        };
        debug!("Loaded {} favorites", ids.len());
        Ok(Self { ids, storage })
    }

    /// Whether `id` is starred.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|fav| fav == id)
    }

    /// Star `id` if it is not starred, unstar it otherwise, and persist the
    /// whole list.
    ///
    /// Returns the new state: `true` if `id` is now a favorite.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be written.
    pub fn toggle(&mut self, id: &str) -> Result<bool> {
        let mut ids = self.ids.clone();
        let starred = if let Some(pos) = ids.iter().position(|fav| fav == id) {
            ids.remove(pos);
            false
        } else {
            ids.push(id.to_string());
            true
        };
        self.storage
            .put(FAVORITES_KEY, &serde_json::to_string(&ids)?)?;
        self.ids = ids;
        debug!(id, starred, "Toggled favorite");
        Ok(starred)
    }

    /// Starred ids, in the order they were starred.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Number of starred ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if nothing is starred.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Set `is_favorite` on each recipe from this list.
    pub fn mark(&self, recipes: &mut [Recipe]) {
        for recipe in recipes {
            recipe.is_favorite = recipe.id.as_deref().is_some_and(|id| self.contains(id));
        }
    }

    /// The underlying storage.
    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }
}
