//! Integration tests for the infrastructure components
//!
//! These tests verify that the PostgreSQL database and the Redis instance
//! holding sessions are properly configured and accessible. They need both
//! services running locally, so they are ignored by default.

use common::{
    cache::{RedisConfig, RedisPool},
    database::{DatabaseConfig, health_check, init_pool},
};
use sqlx::Row;

#[tokio::test]
#[ignore = "requires running PostgreSQL and Redis"]
async fn test_infrastructure_integration() -> Result<(), Box<dyn std::error::Error>> {
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    assert!(health_check(&pool).await?, "Database health check failed");

    let row = sqlx::query("SELECT NOW() > NOW() - INTERVAL '1 day' AS ok")
        .fetch_one(&pool)
        .await?;
    let ok: bool = row.get("ok");
    assert!(ok, "PostgreSQL interval arithmetic failed");

    let redis_pool = RedisPool::new(&RedisConfig::from_env())?;
    assert!(
        redis_pool.health_check().await?,
        "Redis health check failed"
    );

    let test_key = "integration:session";
    redis_pool.set(test_key, "{}", Some(10)).await?;
    assert!(!redis_pool.set_if_absent(test_key, "{}", 10).await?);
    assert_eq!(redis_pool.get(test_key).await?, Some("{}".to_string()));

    redis_pool.delete(test_key).await?;
    assert_eq!(redis_pool.get(test_key).await?, None, "Redis delete failed");

    Ok(())
}
