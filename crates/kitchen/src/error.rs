//! Error types for kitchen.
//!
//! This module defines all error types used throughout the kitchen crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for kitchen operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the client state database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Remote Store Errors ===
    /// The HTTP transport to the remote store failed.
    #[error("remote transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote store answered with a non-success status.
    #[error("remote {operation} failed with status {status}: {message}")]
    RemoteStatus {
        /// The operation that was attempted.
        operation: &'static str,
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// A document returned by the remote store could not be decoded.
    #[error("malformed remote document: {0}")]
    MalformedDocument(String),

    // === Recipe Errors ===
    /// An update was issued against the remote store without a recipe id.
    #[error("recipe id missing for update")]
    MissingRecipeId,

    /// A recipe failed validation before being written.
    #[error("invalid recipe: {reason}")]
    InvalidRecipe {
        /// Why the recipe was rejected.
        reason: String,
    },

    /// No recipe with the given id exists in the catalog.
    #[error("recipe not found: {id}")]
    RecipeNotFound {
        /// The id that was looked up.
        id: String,
    },

    // === I/O Errors ===
    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for kitchen operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create an invalid recipe error.
    #[must_use]
    pub fn invalid_recipe(reason: impl Into<String>) -> Self {
        Self::InvalidRecipe {
            reason: reason.into(),
        }
    }

    /// Create a malformed document error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedDocument(message.into())
    }

    /// Create a recipe not found error.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::RecipeNotFound { id: id.into() }
    }

    /// Check if this error came from talking to the remote store.
    #[must_use]
    pub fn is_remote_failure(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::RemoteStatus { .. } | Self::MalformedDocument(_)
        )
    }

    /// Check if this error indicates a missing recipe.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RecipeNotFound { .. })
    }
}
