//! Error types for the travel planner library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all travel planner operations.
#[derive(Error, Debug)]
pub enum TravelError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// A referenced record does not exist
    #[error("{entity} with ID {id} not found")]
    NotFound { entity: &'static str, id: u64 },
    /// No trip carries the given share code
    #[error("No trip is shared under code '{0}'")]
    UnknownShareCode(String),
    /// The acting user may not touch the record
    #[error("Not allowed: {reason}")]
    Forbidden { reason: String },
    /// No user session was presented
    #[error("Authentication required")]
    Unauthenticated,
    /// Login attempt with an unknown email or wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,
    /// A unique value is already taken
    #[error("{0}")]
    Conflict(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// The text-generation service failed or returned unusable output
    #[error("Text generation failed: {message}")]
    Generation { message: String },
    /// Password hashing or verification failed
    #[error("Password hashing error: {source}")]
    PasswordHash {
        #[from]
        source: bcrypt::BcryptError,
    },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> TravelError {
        TravelError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> TravelError {
        TravelError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl TravelError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Shorthand for a missing record.
    pub fn not_found(entity: &'static str, id: u64) -> Self {
        Self::NotFound { entity, id }
    }

    /// Shorthand for an ownership failure.
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }

    /// Shorthand for a generation failure.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Wraps a `spawn_blocking` join failure.
    pub(crate) fn join(error: tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Task join error: {error}"),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| TravelError::database(message).with_source(e))
    }
}

/// Maps a missing row to `NotFound` and everything else to a database error.
pub(crate) trait LookupResultExt<T> {
    fn or_not_found(self, entity: &'static str, id: u64, message: &str) -> Result<T>;
}

impl<T> LookupResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn or_not_found(self, entity: &'static str, id: u64, message: &str) -> Result<T> {
        self.map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => TravelError::not_found(entity, id),
            other => TravelError::database(message).with_source(other),
        })
    }
}

/// Result type alias for travel planner operations
pub type Result<T> = std::result::Result<T, TravelError>;
