//! Client session: a bearer token plus the claims it carries.
//!
//! A `Session` is created from a token handed out at sign-in, passed by
//! reference into every client call, and consumed by logout. Claims are
//! decoded locally without verifying the signature; the server remains the
//! authority on whether the token is valid.

use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{ClientError, Result};
use crate::types::Role;

#[derive(Debug, Clone, Deserialize)]
struct TokenClaims {
    user_id: Uuid,
    role: Role,
    exp: i64,
    jti: Uuid,
}

#[derive(Debug, Clone)]
pub struct Session {
    token: String,
    user_id: Uuid,
    role: Role,
    session_id: Uuid,
    expires_at: DateTime<Utc>,
}

impl Session {
    pub fn from_token(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        let token = token.trim().trim_start_matches("Bearer ").to_string();

        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 3 {
            return Err(ClientError::InvalidToken("expected three segments".into()));
        }

        let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(parts[1])
            .map_err(|e| ClientError::InvalidToken(format!("bad payload encoding: {}", e)))?;
        let claims: TokenClaims = serde_json::from_slice(&payload)
            .map_err(|e| ClientError::InvalidToken(format!("bad claims: {}", e)))?;

        let expires_at = DateTime::from_timestamp(claims.exp, 0)
            .ok_or_else(|| ClientError::InvalidToken("expiry out of range".into()))?;

        Ok(Self {
            token,
            user_id: claims.user_id,
            role: claims.role,
            session_id: claims.jti,
            expires_at,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
