use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

use crate::domains::requests::TransitionPolicy;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub session_ttl_hours: i64,
    /// Empty means any origin is allowed.
    pub allowed_origins: Vec<String>,
    pub transition_policy: TransitionPolicy,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("DB_MAX_CONNECTIONS must be a valid number")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "artisan-market".to_string()),
            session_ttl_hours: env::var("SESSION_TTL_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .context("SESSION_TTL_HOURS must be a valid number")?,
            allowed_origins: parse_list(&env::var("ALLOWED_ORIGINS").unwrap_or_default()),
            transition_policy: env::var("REQUEST_TRANSITIONS")
                .unwrap_or_else(|_| "strict".to_string())
                .parse()
                .context("REQUEST_TRANSITIONS must be 'strict' or 'permissive'")?,
        })
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_trims_and_drops_empty_entries() {
        assert_eq!(
            parse_list(" https://a.example , ,https://b.example"),
            vec!["https://a.example", "https://b.example"]
        );
        assert!(parse_list("").is_empty());
    }
}
