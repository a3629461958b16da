//! Requests domain - commission requests between buyers and artisans
//!
//! A buyer opens a request to one artisan, optionally about one of the
//! artisan's products. Both sides then exchange messages on the request while
//! its status moves through the lifecycle in [`RequestStatus`], and the
//! artisan may attach a [`Quotation`].
//!
//! Layout:
//! - `models`: the stored document and its API view
//! - `data`: request payloads accepted over HTTP
//! - `policy`: access rules and the status lifecycle
//! - `store`: persistence behind [`RequestStore`]
//! - `actions`: the workflow operations
//! - `edges`: axum handlers

pub mod actions;
pub mod data;
pub mod edges;
pub mod error;
pub mod models;
pub mod policy;
pub mod store;

pub use data::{BudgetInput, CreateRequestInput, UpdateRequestInput};
pub use error::RequestError;
pub use models::{
    Attachment, Budget, Message, Quotation, Request, RequestKind, RequestStatus, RequestView,
};
pub use policy::{Party, TransitionPolicy};
pub use store::{ParticipantScope, RequestStore};
