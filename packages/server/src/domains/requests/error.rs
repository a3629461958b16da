use thiserror::Error;

use super::models::RequestStatus;
use crate::common::RequestId;

pub type Result<T> = std::result::Result<T, RequestError>;

/// Failures of the request workflow.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Request not found: {0}")]
    NotFound(RequestId),

    #[error("Not authorized")]
    Forbidden,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: RequestStatus,
        to: RequestStatus,
    },

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl RequestError {
    pub fn validation(reason: impl Into<String>) -> Self {
        RequestError::Validation(reason.into())
    }
}
