//! Persistence for commission requests.
//!
//! Every method touches at most one request and is atomic for that request.
//! Two stores implement the trait:
//! - [`PostgresRequestStore`]: production storage, one row per request
//! - [`MemoryRequestStore`]: tests and local development

use anyhow::Result;
use async_trait::async_trait;

use super::models::{NewRequest, Request, RequestChanges};
use crate::common::{RequestId, UserId};

mod memory;
mod postgres;

pub use memory::MemoryRequestStore;
pub use postgres::PostgresRequestStore;

/// Filter for [`RequestStore::find_by_participant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantScope {
    /// Requests authored by this user.
    Buyer(UserId),
    /// Requests addressed to this user.
    Artisan(UserId),
    /// Every request in the store.
    Everyone,
}

impl ParticipantScope {
    pub fn matches(&self, request: &Request) -> bool {
        match self {
            ParticipantScope::Buyer(id) => request.buyer == *id,
            ParticipantScope::Artisan(id) => request.artisan == *id,
            ParticipantScope::Everyone => true,
        }
    }
}

#[async_trait]
pub trait RequestStore: Send + Sync {
    /// Persists a new request with a generated id, status `pending` and an
    /// empty message thread.
    async fn create(&self, new: NewRequest) -> Result<Request>;

    async fn find_by_id(&self, id: RequestId) -> Result<Option<Request>>;

    /// Requests in scope, newest first.
    async fn find_by_participant(&self, scope: ParticipantScope) -> Result<Vec<Request>>;

    /// Applies `changes` atomically. Returns `None` if the request is gone or
    /// its status no longer matches `changes.expected_status`.
    async fn update(&self, id: RequestId, changes: RequestChanges) -> Result<Option<Request>>;

    /// Returns whether a request was removed.
    async fn delete(&self, id: RequestId) -> Result<bool>;

    /// Cheap liveness check of the backing storage.
    async fn health_check(&self) -> Result<()>;
}
