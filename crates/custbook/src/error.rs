//! Error types for custbook.
//!
//! Lookups of missing customers are not errors inside the store; this enum
//! covers storage, configuration and seed failures, plus the not-found case
//! the CLI reports to the user.

use std::path::PathBuf;
use thiserror::Error;

use crate::customer::CustomerId;

/// The main error type for custbook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
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

    /// The persisted slot holds something other than a customer list.
    #[error("slot '{key}' does not contain a customer list: {source}")]
    CorruptSlot {
        /// Key of the slot that failed to parse.
        key: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
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

    // === Seed Errors ===
    /// The seed file could not be read or parsed.
    #[error("failed to load seed data from {path}: {message}")]
    SeedLoad {
        /// Path to the seed file.
        path: PathBuf,
        /// Description of what went wrong.
        message: String,
    },

    // === Customer Errors ===
    /// No customer with the requested id exists.
    #[error("customer not found: {0}")]
    CustomerNotFound(CustomerId),

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
}

/// A specialized Result type for custbook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a seed load error for the given file.
    #[must_use]
    pub fn seed_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::SeedLoad {
            path: path.into(),
            message: message.into(),
        }
    }
}
