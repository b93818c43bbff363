//! Domain models and the data-access contracts handlers depend on

pub mod snippet;
pub mod user;

use async_trait::async_trait;
use thiserror::Error;

pub use snippet::Snippet;
pub use user::User;

/// Failure outcomes of the data-access layer
///
/// Handlers branch on the first three kinds; everything else is opaque and
/// ends the request with a server error.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("no matching record found")]
    NoRecord,

    #[error("duplicate email")]
    DuplicateEmail,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("password hashing error: {0}")]
    PasswordHash(String),
}

pub type ModelResult<T> = Result<T, ModelError>;

/// Snippet storage
#[async_trait]
pub trait SnippetModel: Send + Sync {
    /// Store a new snippet that expires `expires_days` from now, returning its id
    async fn insert(&self, title: &str, content: &str, expires_days: i32) -> ModelResult<i64>;

    /// Fetch an unexpired snippet
    async fn get(&self, id: i64) -> ModelResult<Snippet>;

    /// The ten most recently created unexpired snippets, newest first
    async fn latest(&self) -> ModelResult<Vec<Snippet>>;
}

/// User account storage
#[async_trait]
pub trait UserModel: Send + Sync {
    /// Create an account; fails with `DuplicateEmail` if the email is taken
    async fn insert(&self, name: &str, email: &str, password: &str) -> ModelResult<()>;

    /// Check an email/password pair, returning the user id
    async fn authenticate(&self, email: &str, password: &str) -> ModelResult<i64>;

    async fn exists(&self, id: i64) -> ModelResult<bool>;

    async fn get(&self, id: i64) -> ModelResult<User>;

    /// Replace the password after verifying the current one
    async fn password_update(
        &self,
        id: i64,
        current_password: &str,
        new_password: &str,
    ) -> ModelResult<()>;
}
