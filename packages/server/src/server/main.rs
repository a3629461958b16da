// Main entry point for the marketplace API server

use std::sync::Arc;

use anyhow::{Context, Result};
use artisan_core::{domains::auth::JwtService, kernel::ServerDeps, server::build_app, Config};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,artisan_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Artisan Market API");

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        transitions = ?config.transition_policy,
        session_ttl_hours = config.session_ttl_hours,
        "Configuration loaded"
    );

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    let jwt_service = Arc::new(JwtService::with_ttl(
        &config.jwt_secret,
        config.jwt_issuer.clone(),
        chrono::Duration::hours(config.session_ttl_hours),
    ));
    let deps = ServerDeps::postgres(pool, jwt_service, config.transition_policy);
    let app = build_app(deps, &config.allowed_origins);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
