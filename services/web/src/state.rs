//! Application state shared across handlers

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    models::{SnippetModel, UserModel},
    repositories::{SnippetRepository, UserRepository},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub snippets: Arc<dyn SnippetModel>,
    pub users: Arc<dyn UserModel>,
}

impl AppState {
    /// State backed by the PostgreSQL repositories
    pub fn new(pool: PgPool) -> Self {
        Self {
            snippets: Arc::new(SnippetRepository::new(pool.clone())),
            users: Arc::new(UserRepository::new(pool)),
        }
    }
}
