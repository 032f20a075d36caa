//! Store error handling
//!
//! Typed errors for Collection Store operations with path context.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to create the data directory
    #[error("Failed to create data directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to open the database file
    #[error("Failed to open database at '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A stored record could not be read back
    #[error("Corrupt record: {details}")]
    Corrupt { details: String },

    /// SQLite database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
