use anyhow::Result;
use sqlx::migrate::Migrator;
use tokio::net::TcpListener;
use tower_sessions::{Expiry, SessionManagerLayer, cookie::SameSite};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod config;
mod error;
mod forms;
mod handlers;
mod middleware;
mod models;
mod repositories;
mod routes;
mod session;
mod session_store;
mod state;
mod templates;
mod validator;

#[cfg(test)]
mod test_utils;

use common::{
    cache::{RedisConfig, RedisPool},
    database::{DatabaseConfig, health_check, init_pool, run_migrations},
};

use crate::{config::ServerConfig, session_store::RedisSessionStore, state::AppState};

static MIGRATOR: Migrator = sqlx::migrate!();

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting Snippetbox web service");

    let server_config = ServerConfig::from_env()?;

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    run_migrations(&pool, &MIGRATOR).await?;

    // Sessions live in Redis
    let redis_pool = RedisPool::new(&RedisConfig::from_env())?;
    if !redis_pool.health_check().await? {
        anyhow::bail!("Failed to connect to Redis");
    }

    let sessions = SessionManagerLayer::new(RedisSessionStore::new(redis_pool))
        .with_secure(server_config.secure_cookies)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::hours(
            server_config.session_lifetime_hours,
        )));

    let app = routes::create_router(AppState::new(pool), sessions);

    let listener = TcpListener::bind(&server_config.addr).await?;
    info!("Snippetbox listening on {}", server_config.addr);

    axum::serve(listener, app).await?;

    Ok(())
}
