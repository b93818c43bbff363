//! Redis-backed session storage
//!
//! Each session record is stored as JSON under `session:<id>` with a TTL
//! matching the record's expiry, so Redis drops abandoned sessions itself.

use async_trait::async_trait;
use common::{cache::RedisPool, error::CacheError};
use time::OffsetDateTime;
use tower_sessions::{
    SessionStore,
    session::{Id, Record},
    session_store,
};

#[derive(Debug, Clone)]
pub struct RedisSessionStore {
    pool: RedisPool,
}

impl RedisSessionStore {
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

fn session_key(id: &Id) -> String {
    format!("session:{}", id)
}

/// Seconds until the record expires, at least one so Redis accepts the TTL
fn ttl_seconds(record: &Record) -> u64 {
    let remaining = (record.expiry_date - OffsetDateTime::now_utc()).whole_seconds();
    remaining.max(1) as u64
}

fn backend(e: CacheError) -> session_store::Error {
    session_store::Error::Backend(e.to_string())
}

fn encode(record: &Record) -> session_store::Result<String> {
    serde_json::to_string(record).map_err(|e| session_store::Error::Encode(e.to_string()))
}

fn decode(value: &str) -> session_store::Result<Record> {
    serde_json::from_str(value).map_err(|e| session_store::Error::Decode(e.to_string()))
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        // Regenerate the id until it does not collide with a live session.
        loop {
            let written = self
                .pool
                .set_if_absent(&session_key(&record.id), &encode(record)?, ttl_seconds(record))
                .await
                .map_err(backend)?;

            if written {
                return Ok(());
            }
            record.id = Id::default();
        }
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.pool
            .set(
                &session_key(&record.id),
                &encode(record)?,
                Some(ttl_seconds(record)),
            )
            .await
            .map_err(backend)
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let value = self
            .pool
            .get(&session_key(session_id))
            .await
            .map_err(backend)?;

        value.as_deref().map(decode).transpose()
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.pool
            .delete(&session_key(session_id))
            .await
            .map_err(backend)
    }
}
