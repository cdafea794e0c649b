//! Recipe persistence backends.
//!
//! A backend is anything that can hold the recipe collection: the remote
//! document store or the in-memory demo store. The [`RecipeService`]
//! decides which one is active.
//!
//! [`RecipeService`]: crate::service::RecipeService

pub mod firestore;
pub mod memory;

use crate::error::Result;
use crate::recipe::Recipe;

pub use firestore::FirestoreBackend;
pub use memory::{DemoLatency, MemoryBackend};

/// A store for the recipe collection.
///
/// Implementors hold recipes keyed by a backend-assigned id. Callers are
/// responsible for normalizing records before writing them.
#[async_trait::async_trait]
pub trait RecipeBackend: Send + Sync + std::fmt::Debug {
    /// The name of this backend (for logging/debugging).
    fn name(&self) -> &'static str;

    /// Fetch the whole collection, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    async fn fetch_all(&self) -> Result<Vec<Recipe>>;

    /// Store a new recipe and return it with its assigned id.
    ///
    /// Any id already on `recipe` is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    async fn insert(&self, recipe: Recipe) -> Result<Recipe>;

    /// Replace the stored fields of the recipe with the given id.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    async fn update(&self, id: &str, recipe: &Recipe) -> Result<()>;
}
