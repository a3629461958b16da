use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::common::{Actor, AuthError, Role, SessionId, UserId};
use crate::domains::auth::JwtService;
use crate::kernel::ServerDeps;
use crate::server::error::ApiError;

/// Authenticated user information from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: UserId,
    pub role: Role,
    pub session_id: SessionId,
    pub expires_at: DateTime<Utc>,
}

impl AuthUser {
    pub fn actor(&self) -> Actor {
        Actor::new(self.user_id, self.role)
    }
}

/// Why a presented token did not authenticate the request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TokenRejection {
    Invalid,
    Revoked,
}

impl From<TokenRejection> for AuthError {
    fn from(rejection: TokenRejection) -> Self {
        match rejection {
            TokenRejection::Invalid => AuthError::InvalidToken,
            TokenRejection::Revoked => AuthError::SessionRevoked,
        }
    }
}

/// JWT authentication middleware
///
/// Verifies the bearer token and, unless its session has been revoked, adds
/// AuthUser to request extensions. Requests continue either way; handlers
/// that need a caller extract [`AuthUser`], which fails with the reason the
/// token was refused.
pub async fn jwt_auth_middleware(
    deps: ServerDeps,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    match extract_auth_user(&request, &deps.jwt_service) {
        Ok(Some(user)) => match deps.sessions.is_revoked(user.session_id).await {
            Ok(false) => {
                debug!("Authenticated user: {} ({})", user.user_id, user.role);
                request.extensions_mut().insert(user);
            }
            Ok(true) => {
                debug!(session = %user.session_id, "Token belongs to a revoked session");
                request.extensions_mut().insert(TokenRejection::Revoked);
            }
            Err(e) => return ApiError::from(AuthError::InternalError(e)).into_response(),
        },
        Ok(None) => debug!("No authentication token"),
        Err(rejection) => {
            debug!("Invalid authentication token");
            request.extensions_mut().insert(rejection);
        }
    }

    next.run(request).await
}

/// Extract and verify JWT token from request
///
/// `Ok(None)` when no authorization header is present.
fn extract_auth_user(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Result<Option<AuthUser>, TokenRejection> {
    let Some(auth_header) = request.headers().get("authorization") else {
        return Ok(None);
    };
    let auth_str = auth_header.to_str().map_err(|_| TokenRejection::Invalid)?;

    // Extract token (handle both "Bearer <token>" and raw token)
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

    let claims = jwt_service
        .verify_token(token)
        .map_err(|_| TokenRejection::Invalid)?;

    Ok(Some(AuthUser {
        user_id: claims.user_id,
        role: claims.role,
        session_id: claims.jti,
        expires_at: claims.expires_at(),
    }))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }
        let error = match parts.extensions.get::<TokenRejection>() {
            Some(rejection) => AuthError::from(*rejection),
            None => AuthError::AuthenticationRequired,
        };
        Err(ApiError::Auth(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_token_with_bearer() {
        let jwt_service = JwtService::new("test_secret", "test_issuer".to_string());
        let user_id = UserId::new();
        let (token, claims) = jwt_service.create_token(user_id, Role::Admin).unwrap();

        let request = axum::http::Request::builder()
            .header("authorization", format!("Bearer {}", token))
            .body(axum::body::Body::empty())
            .unwrap();

        let auth_user = extract_auth_user(&request, &jwt_service).unwrap().unwrap();
        assert_eq!(auth_user.user_id, user_id);
        assert_eq!(auth_user.role, Role::Admin);
        assert_eq!(auth_user.session_id, claims.jti);
    }

    #[test]
    fn test_extract_token_without_bearer() {
        let jwt_service = JwtService::new("test_secret", "test_issuer".to_string());
        let user_id = UserId::new();
        let (token, _) = jwt_service.create_token(user_id, Role::Buyer).unwrap();

        let request = axum::http::Request::builder()
            .header("authorization", token)
            .body(axum::body::Body::empty())
            .unwrap();

        let auth_user = extract_auth_user(&request, &jwt_service).unwrap();
        assert_eq!(auth_user.map(|u| u.user_id), Some(user_id));
    }

    #[test]
    fn test_no_auth_header() {
        let jwt_service = JwtService::new("test_secret", "test_issuer".to_string());
        let request = axum::http::Request::builder()
            .body(axum::body::Body::empty())
            .unwrap();

        assert_eq!(extract_auth_user(&request, &jwt_service).map(|u| u.is_none()), Ok(true));
    }

    #[test]
    fn test_invalid_token() {
        let jwt_service = JwtService::new("test_secret", "test_issuer".to_string());
        let request = axum::http::Request::builder()
            .header("authorization", "Bearer invalid_token")
            .body(axum::body::Body::empty())
            .unwrap();

        let result = extract_auth_user(&request, &jwt_service).map(|u| u.is_some());
        assert_eq!(result, Err(TokenRejection::Invalid));
    }

    #[test]
    fn test_rejections_map_to_auth_errors() {
        assert!(matches!(
            AuthError::from(TokenRejection::Invalid),
            AuthError::InvalidToken
        ));
        assert!(matches!(
            AuthError::from(TokenRejection::Revoked),
            AuthError::SessionRevoked
        ));
    }

    #[test]
    fn test_actor_carries_identity_and_role() {
        let user = AuthUser {
            user_id: UserId::new(),
            role: Role::Artisan,
            session_id: SessionId::new(),
            expires_at: Utc::now(),
        };
        let actor = user.actor();
        assert_eq!(actor.user_id, user.user_id);
        assert_eq!(actor.role, Role::Artisan);
    }
}
