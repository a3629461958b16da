use thiserror::Error;

/// Session and authentication failures.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Session has been revoked")]
    SessionRevoked,

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}
