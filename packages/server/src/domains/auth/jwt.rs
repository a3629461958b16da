use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::common::{Role, SessionId, UserId};

/// JWT Claims - data stored in the token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,     // Subject (user_id as string)
    pub user_id: UserId, // User UUID
    pub role: Role,      // Marketplace role
    pub exp: i64,        // Expiration timestamp
    pub iat: i64,        // Issued at timestamp
    pub iss: String,     // Issuer
    pub jti: SessionId,  // Session id (revocation key)
}

impl Claims {
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_default()
    }
}

/// JWT Service - creates and verifies session tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    ttl: Duration,
}

impl JwtService {
    /// Create new JWT service with secret and issuer; tokens live 24 hours
    pub fn new(secret: &str, issuer: String) -> Self {
        Self::with_ttl(secret, issuer, Duration::hours(24))
    }

    pub fn with_ttl(secret: &str, issuer: String, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            ttl,
        }
    }

    /// Issue a token for a user. This is the login half of a session's
    /// lifecycle; logout revokes the returned `jti`.
    pub fn create_token(&self, user_id: UserId, role: Role) -> Result<(String, Claims)> {
        let now = Utc::now();
        let exp = now + self.ttl;

        let claims = Claims {
            sub: user_id.to_string(),
            user_id,
            role,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
            jti: SessionId::new(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok((token, claims))
    }

    /// Verify and decode a JWT token
    ///
    /// Returns claims if token is valid and not expired
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_verify_token() {
        let service = JwtService::new("test_secret_key", "test_issuer".to_string());
        let user_id = UserId::new();

        let (token, issued) = service.create_token(user_id, Role::Artisan).unwrap();

        let claims = service.verify_token(&token).unwrap();
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.role, Role::Artisan);
        assert_eq!(claims.iss, "test_issuer");
        assert_eq!(claims.jti, issued.jti);
    }

    #[test]
    fn test_each_token_gets_its_own_session_id() {
        let service = JwtService::new("test_secret_key", "test_issuer".to_string());
        let user_id = UserId::new();
        let (_, a) = service.create_token(user_id, Role::Buyer).unwrap();
        let (_, b) = service.create_token(user_id, Role::Buyer).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_invalid_token() {
        let service = JwtService::new("test_secret_key", "test_issuer".to_string());
        assert!(service.verify_token("invalid_token").is_err());
    }

    #[test]
    fn test_wrong_secret() {
        let service1 = JwtService::new("secret1", "test_issuer".to_string());
        let service2 = JwtService::new("secret2", "test_issuer".to_string());

        let (token, _) = service1.create_token(UserId::new(), Role::Buyer).unwrap();

        // Token created with secret1 should not verify with secret2
        assert!(service2.verify_token(&token).is_err());
    }

    #[test]
    fn test_wrong_issuer() {
        let issuer_a = JwtService::new("secret", "a".to_string());
        let issuer_b = JwtService::new("secret", "b".to_string());

        let (token, _) = issuer_a.create_token(UserId::new(), Role::Buyer).unwrap();
        assert!(issuer_b.verify_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Past the default 60s leeway
        let service =
            JwtService::with_ttl("secret", "test_issuer".to_string(), Duration::minutes(-5));
        let (token, _) = service.create_token(UserId::new(), Role::Buyer).unwrap();
        assert!(service.verify_token(&token).is_err());
    }

    #[test]
    fn test_expiry_follows_ttl() {
        let service = JwtService::with_ttl("secret", "test_issuer".to_string(), Duration::hours(2));
        let (_, claims) = service.create_token(UserId::new(), Role::Buyer).unwrap();

        let expires_in = claims.exp - Utc::now().timestamp();
        assert!(expires_in > 3600);
        assert!(expires_in <= 2 * 3600);
        assert_eq!(claims.expires_at().timestamp(), claims.exp);
    }
}
