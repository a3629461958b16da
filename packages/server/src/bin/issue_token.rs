//! Issues a session token for an existing user.
//!
//! Sign-in itself belongs to the marketplace's account system; this tool is
//! for operators and local development.

use anyhow::{bail, Context, Result};
use artisan_core::domains::auth::JwtService;
use artisan_core::domains::directory::{Directory, PostgresDirectory};
use artisan_core::Config;
use clap::Parser;
use sqlx::postgres::PgPoolOptions;

#[derive(Parser)]
#[command(name = "issue_token")]
#[command(about = "Issue a session token for a marketplace user")]
struct Cli {
    /// Email of the user to sign in as
    email: String,

    /// Print the decoded claims as JSON alongside the token
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    let directory = PostgresDirectory::new(pool);
    let Some(user) = directory.find_user_by_email(&cli.email).await? else {
        bail!("No user with email {}", cli.email);
    };

    let jwt_service = JwtService::with_ttl(
        &config.jwt_secret,
        config.jwt_issuer,
        chrono::Duration::hours(config.session_ttl_hours),
    );
    let (token, claims) = jwt_service.create_token(user.id, user.role)?;

    if cli.verbose {
        eprintln!("{}", serde_json::to_string_pretty(&claims)?);
    }
    println!("{}", token);
    Ok(())
}
