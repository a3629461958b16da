//! Server dependencies for domain actions (using traits for testability)
//!
//! Storage sits behind trait objects so the same actions and router run over
//! Postgres in production and over in-memory stores in tests.

use sqlx::PgPool;
use std::sync::Arc;

use crate::domains::auth::{
    JwtService, MemorySessionRegistry, PostgresSessionRegistry, SessionRegistry,
};
use crate::domains::directory::{Directory, MemoryDirectory, PostgresDirectory};
use crate::domains::requests::store::{MemoryRequestStore, PostgresRequestStore, RequestStore};
use crate::domains::requests::TransitionPolicy;

#[derive(Clone)]
pub struct ServerDeps {
    pub requests: Arc<dyn RequestStore>,
    pub directory: Arc<dyn Directory>,
    pub sessions: Arc<dyn SessionRegistry>,
    /// JWT service for token creation and verification
    pub jwt_service: Arc<JwtService>,
    pub transition_policy: TransitionPolicy,
}

impl ServerDeps {
    pub fn new(
        requests: Arc<dyn RequestStore>,
        directory: Arc<dyn Directory>,
        sessions: Arc<dyn SessionRegistry>,
        jwt_service: Arc<JwtService>,
        transition_policy: TransitionPolicy,
    ) -> Self {
        Self {
            requests,
            directory,
            sessions,
            jwt_service,
            transition_policy,
        }
    }

    /// Postgres-backed dependencies sharing one pool.
    pub fn postgres(
        pool: PgPool,
        jwt_service: Arc<JwtService>,
        transition_policy: TransitionPolicy,
    ) -> Self {
        Self::new(
            Arc::new(PostgresRequestStore::new(pool.clone())),
            Arc::new(PostgresDirectory::new(pool.clone())),
            Arc::new(PostgresSessionRegistry::new(pool)),
            jwt_service,
            transition_policy,
        )
    }

    /// In-memory dependencies. The directory is returned separately so
    /// callers can seed users and products.
    pub fn in_memory(
        jwt_service: Arc<JwtService>,
        transition_policy: TransitionPolicy,
    ) -> (Self, Arc<MemoryDirectory>) {
        let directory = Arc::new(MemoryDirectory::new());
        let deps = Self::new(
            Arc::new(MemoryRequestStore::new()),
            directory.clone(),
            Arc::new(MemorySessionRegistry::new()),
            jwt_service,
            transition_policy,
        );
        (deps, directory)
    }
}
