//! User model

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// User entity as shown on the account page
///
/// The password hash never leaves the repository.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created: DateTime<Utc>,
}
