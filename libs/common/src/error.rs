//! Error types for the common library
//!
//! Database and cache helpers each report their own error enum so callers
//! can tell a misconfiguration apart from a backend failure.

use redis::RedisError;
use sqlx::Error as SqlxError;
use thiserror::Error;

/// Errors returned by the PostgreSQL helpers
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Error occurred while applying migrations
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

/// Errors returned by the Redis helpers
#[derive(Error, Debug)]
pub enum CacheError {
    /// The Redis URL could not be parsed
    #[error("Cache configuration error: {0}")]
    Configuration(#[source] RedisError),

    /// No connection could be obtained from the client
    #[error("Cache connection error: {0}")]
    Connection(#[source] RedisError),

    /// A command was sent but failed
    #[error("Cache command error: {0}")]
    Command(#[source] RedisError),
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Type alias for Result with CacheError
pub type CacheResult<T> = Result<T, CacheError>;
