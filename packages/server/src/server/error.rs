//! Mapping from domain failures to HTTP responses.
//!
//! Every error body has the shape `{ "message": "..." }`. Unexpected failures
//! are logged with their cause and reported with a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::common::AuthError;
use crate::domains::requests::RequestError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Request(err) => match err {
                RequestError::NotFound(_) => StatusCode::NOT_FOUND,
                RequestError::Forbidden => StatusCode::FORBIDDEN,
                RequestError::Validation(_) => StatusCode::BAD_REQUEST,
                RequestError::InvalidTransition { .. } => StatusCode::CONFLICT,
                RequestError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Auth(err) => match err {
                AuthError::AuthenticationRequired
                | AuthError::InvalidToken
                | AuthError::SessionRevoked => StatusCode::UNAUTHORIZED,
                AuthError::UnknownRole(_) | AuthError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn public_message(&self) -> String {
        match self {
            ApiError::Request(RequestError::NotFound(_)) => "Request not found".to_string(),
            _ if self.status() == StatusCode::INTERNAL_SERVER_ERROR => "Server error".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = ?self, "Request failed");
        }
        (status, Json(json!({ "message": self.public_message() }))).into_response()
    }
}
