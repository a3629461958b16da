//! Client for the marketplace requests API.
//!
//! # Example
//!
//! ```rust,ignore
//! use request_client::{RequestsClient, Session};
//!
//! let session = Session::from_token(token)?;
//! let client = RequestsClient::new("http://localhost:8080");
//!
//! for request in client.list(&session).await? {
//!     println!("{} ({})", request.title, request.status);
//! }
//! client.logout(session).await?;
//! ```

pub mod client;
pub mod error;
pub mod session;
pub mod types;
pub mod views;

pub use client::RequestsClient;
pub use error::{ClientError, Result};
pub use session::Session;
pub use types::{
    Budget, CreateRequest, Quotation, RequestKind, RequestStatus, RequestView, Role, SessionInfo,
    UpdateRequest,
};
