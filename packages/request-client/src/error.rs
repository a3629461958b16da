use thiserror::Error;

/// Client-side view of the API's error taxonomy.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Not signed in or session expired")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid status change: {0}")]
    InvalidTransition(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed session token: {0}")]
    InvalidToken(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ClientError {
    /// Maps an error response onto the taxonomy.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            400 => ClientError::Validation(message),
            401 => ClientError::Unauthorized,
            403 => ClientError::Forbidden(message),
            404 => ClientError::NotFound(message),
            409 => ClientError::InvalidTransition(message),
            _ => ClientError::Api { status, message },
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
