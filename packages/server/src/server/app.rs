//! Application setup and server configuration.

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domains::requests::edges::{
    create_request, delete_request, get_request, list_requests, update_request,
};
use crate::kernel::ServerDeps;
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{health_handler, logout_handler, session_handler};

/// CORS for the configured origins; an empty list allows any origin.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}

/// Build the Axum application router
pub fn build_app(deps: ServerDeps, allowed_origins: &[String]) -> Router {
    let deps_for_middleware = deps.clone();

    Router::new()
        .route("/requests", get(list_requests).post(create_request))
        .route(
            "/requests/:id",
            get(get_request).put(update_request).delete(delete_request),
        )
        .route("/auth/session", get(session_handler))
        .route("/auth/logout", post(logout_handler))
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(deps_for_middleware.clone(), req, next)
        }))
        .layer(Extension(deps))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}
