//! Session revocation.
//!
//! Tokens are stateless until logout; logging out records the token's `jti`
//! here until the token would have expired anyway.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::common::SessionId;

#[async_trait]
pub trait SessionRegistry: Send + Sync {
    async fn revoke(&self, session: SessionId, expires_at: DateTime<Utc>) -> Result<()>;

    async fn is_revoked(&self, session: SessionId) -> Result<bool>;
}

pub struct PostgresSessionRegistry {
    pool: PgPool,
}

impl PostgresSessionRegistry {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRegistry for PostgresSessionRegistry {
    async fn revoke(&self, session: SessionId, expires_at: DateTime<Utc>) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO revoked_sessions (id, expires_at)
            VALUES ($1, $2)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(session)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        // Expired entries can never match a valid token again
        sqlx::query("DELETE FROM revoked_sessions WHERE expires_at < NOW()")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn is_revoked(&self, session: SessionId) -> Result<bool> {
        let revoked = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM revoked_sessions WHERE id = $1)",
        )
        .bind(session)
        .fetch_one(&self.pool)
        .await?;
        Ok(revoked)
    }
}

#[derive(Default)]
pub struct MemorySessionRegistry {
    revoked: RwLock<HashMap<SessionId, DateTime<Utc>>>,
}

impl MemorySessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRegistry for MemorySessionRegistry {
    async fn revoke(&self, session: SessionId, expires_at: DateTime<Utc>) -> Result<()> {
        let mut revoked = self.revoked.write().await;
        let now = Utc::now();
        revoked.retain(|_, exp| *exp >= now);
        revoked.insert(session, expires_at);
        Ok(())
    }

    async fn is_revoked(&self, session: SessionId) -> Result<bool> {
        Ok(self.revoked.read().await.contains_key(&session))
    }
}
