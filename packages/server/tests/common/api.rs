//! HTTP client for integration testing.
//!
//! Drives the axum router in-process with `oneshot`, without binding a port.

use std::sync::Arc;

use artisan_core::common::{Role, UserId};
use artisan_core::domains::auth::JwtService;
use artisan_core::domains::directory::MemoryDirectory;
use artisan_core::domains::requests::TransitionPolicy;
use artisan_core::kernel::ServerDeps;
use artisan_core::server::build_app;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test_secret_key";
pub const TEST_ISSUER: &str = "test_issuer";

/// Result of one API call.
#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}

pub struct ApiClient {
    app: Router,
    jwt_service: Arc<JwtService>,
}

impl ApiClient {
    pub fn new(deps: ServerDeps) -> Self {
        let jwt_service = deps.jwt_service.clone();
        Self {
            app: build_app(deps, &[]),
            jwt_service,
        }
    }

    /// Client over in-memory stores. Seed users through the returned directory.
    pub fn in_memory(policy: TransitionPolicy) -> (Self, Arc<MemoryDirectory>) {
        let (deps, directory) = ServerDeps::in_memory(jwt_service(), policy);
        (Self::new(deps), directory)
    }

    pub fn token_for(&self, user_id: UserId, role: Role) -> String {
        self.jwt_service
            .create_token(user_id, role)
            .expect("Failed to create token")
            .0
    }

    pub async fn call(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> ApiResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.send(builder.body(body).expect("Failed to build request"))
            .await
    }

    pub async fn send(&self, request: Request<Body>) -> ApiResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        ApiResponse { status, body }
    }

    pub async fn get(&self, path: &str, token: &str) -> ApiResponse {
        self.call(Method::GET, path, Some(token), None).await
    }

    pub async fn post(&self, path: &str, token: &str, body: Value) -> ApiResponse {
        self.call(Method::POST, path, Some(token), Some(body)).await
    }

    pub async fn put(&self, path: &str, token: &str, body: Value) -> ApiResponse {
        self.call(Method::PUT, path, Some(token), Some(body)).await
    }

    pub async fn delete(&self, path: &str, token: &str) -> ApiResponse {
        self.call(Method::DELETE, path, Some(token), None).await
    }
}

pub fn jwt_service() -> Arc<JwtService> {
    Arc::new(JwtService::new(TEST_SECRET, TEST_ISSUER.to_string()))
}
