//! Session endpoints: who am I, and logout.

use axum::{extract::Extension, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use crate::common::{AuthError, Role, UserId};
use crate::domains::directory::UserSummary;
use crate::kernel::ServerDeps;
use crate::server::error::ApiError;
use crate::server::middleware::AuthUser;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user_id: UserId,
    pub role: Role,
    pub expires_at: DateTime<Utc>,
    pub user: Option<UserSummary>,
}

/// `GET /auth/session`
pub async fn session_handler(
    auth: AuthUser,
    Extension(deps): Extension<ServerDeps>,
) -> Result<Json<SessionResponse>, ApiError> {
    let user = deps
        .directory
        .find_user(auth.user_id)
        .await
        .map_err(AuthError::InternalError)?;

    Ok(Json(SessionResponse {
        user_id: auth.user_id,
        role: auth.role,
        expires_at: auth.expires_at,
        user,
    }))
}

/// `POST /auth/logout`. The presented token stops working immediately.
pub async fn logout_handler(
    auth: AuthUser,
    Extension(deps): Extension<ServerDeps>,
) -> Result<Json<Value>, ApiError> {
    deps.sessions
        .revoke(auth.session_id, auth.expires_at)
        .await
        .map_err(AuthError::InternalError)?;

    info!(user_id = %auth.user_id, session = %auth.session_id, "Session revoked");
    Ok(Json(json!({ "message": "Logged out" })))
}
