//! `SQLite` schema definitions for the client state database.
//!
//! This module contains the SQL statements for creating and managing
//! the database schema.

/// SQL statement to create the client state table.
///
/// Each row is one named piece of client-local state, stored as JSON text.
pub const CREATE_CLIENT_STATE_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS client_state (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_CLIENT_STATE_TABLE, CREATE_METADATA_TABLE];
