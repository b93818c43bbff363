//! User repository for database operations

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::info;

use crate::models::{ModelError, ModelResult, User, UserModel};

/// Hash a plaintext password into a PHC string
pub fn hash_password(password: &str) -> ModelResult<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ModelError::PasswordHash(format!("Failed to hash password: {}", e)))?
        .to_string();

    Ok(hash)
}

/// Check a plaintext password against a stored PHC string
pub fn verify_password(password: &str, hash: &str) -> ModelResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| ModelError::PasswordHash(format!("Failed to parse password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserModel for UserRepository {
    async fn insert(&self, name: &str, email: &str, password: &str) -> ModelResult<()> {
        let hashed_password = hash_password(password)?;

        let result = sqlx::query(
            r#"
            INSERT INTO users (name, email, hashed_password, created)
            VALUES ($1, $2, $3, NOW())
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(&hashed_password)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                info!("Created user account for {}", email);
                Ok(())
            }
            Err(sqlx::Error::Database(db_err))
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some("users_uc_email") =>
            {
                Err(ModelError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn authenticate(&self, email: &str, password: &str) -> ModelResult<i64> {
        let row = sqlx::query(
            "SELECT id, hashed_password FROM users WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ModelError::InvalidCredentials)?;

        let hashed_password: String = row.get("hashed_password");
        if !verify_password(password, &hashed_password)? {
            return Err(ModelError::InvalidCredentials);
        }

        Ok(row.get("id"))
    }

    async fn exists(&self, id: i64) -> ModelResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn get(&self, id: i64) -> ModelResult<User> {
        sqlx::query_as::<_, User>("SELECT id, name, email, created FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ModelError::NoRecord)
    }

    async fn password_update(
        &self,
        id: i64,
        current_password: &str,
        new_password: &str,
    ) -> ModelResult<()> {
        let hashed_password: String =
            sqlx::query_scalar("SELECT hashed_password FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or(ModelError::NoRecord)?;

        if !verify_password(current_password, &hashed_password)? {
            return Err(ModelError::InvalidCredentials);
        }

        let new_hash = hash_password(new_password)?;
        sqlx::query("UPDATE users SET hashed_password = $1 WHERE id = $2")
            .bind(&new_hash)
            .bind(id)
            .execute(&self.pool)
            .await?;

        info!("Updated password for user {}", id);
        Ok(())
    }
}
