//! `kitchen` - A family recipe catalog
//!
//! This library provides recipe storage with automatic fallback from a
//! remote document store to built-in demo recipes, client-local favorites,
//! catalog filtering and text rendering.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod avatar;
pub mod backend;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod favorites;
pub mod logging;
pub mod recipe;
pub mod render;
pub mod seed;
pub mod service;
pub mod storage;

pub use backend::{FirestoreBackend, MemoryBackend, RecipeBackend};
pub use catalog::{CatalogFilter, Shelf};
pub use config::Config;
pub use error::{Error, Result};
pub use favorites::Favorites;
pub use logging::init_logging;
pub use recipe::{Category, Recipe, RecipeDraft};
pub use service::{Mode, RecipeService};
pub use storage::Storage;
