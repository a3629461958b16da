//! `requests` - command line access to marketplace commission requests.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use request_client::views::{render_detail, render_list, DashboardStats};
use request_client::{
    Budget, CreateRequest, Quotation, RequestKind, RequestStatus, RequestsClient, Session,
    UpdateRequest,
};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "requests")]
#[command(about = "Manage commission requests on the artisan marketplace")]
struct Cli {
    /// Base URL of the marketplace API
    #[arg(long, env = "MARKET_API_URL", default_value = "http://localhost:8080")]
    api_url: String,

    /// Session token issued at sign-in
    #[arg(long, env = "MARKET_TOKEN", hide_env_values = true)]
    token: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List your requests, newest first
    List,

    /// Show one request in full
    Show { id: Uuid },

    /// Send a new request to an artisan
    Create {
        /// Artisan user id
        #[arg(long)]
        artisan: Uuid,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long = "type", value_enum, default_value_t = RequestKind::Inquiry)]
        kind: RequestKind,
        #[arg(long)]
        budget_min: Option<Decimal>,
        #[arg(long)]
        budget_max: Option<Decimal>,
        #[arg(long)]
        currency: Option<String>,
        /// RFC 3339 timestamp, e.g. 2030-01-31T00:00:00Z
        #[arg(long)]
        deadline: Option<DateTime<Utc>>,
        #[arg(long)]
        product: Option<Uuid>,
    },

    /// Change status, attach a quotation, or add a message
    Update {
        id: Uuid,
        #[arg(long, value_enum)]
        status: Option<RequestStatus>,
        #[arg(long)]
        message: Option<String>,
        /// Quotation amount
        #[arg(long)]
        quote: Option<Decimal>,
        #[arg(long, requires = "quote")]
        quote_details: Option<String>,
    },

    /// Delete a request you created
    Delete { id: Uuid },

    /// Counts by status and the five most recent requests
    Stats,

    /// Show the current session
    Whoami,

    /// Revoke the current session
    Logout,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn,request_client=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let session = Session::from_token(cli.token.as_str()).context("Invalid MARKET_TOKEN")?;
    if session.is_expired() {
        bail!("Session expired at {}; sign in again", session.expires_at());
    }
    let client = RequestsClient::new(cli.api_url);

    match cli.command {
        Commands::List => {
            let requests = client.list(&session).await?;
            println!("{}", render_list(&requests, session.role()));
        }
        Commands::Show { id } => {
            let request = client.get(&session, id).await?;
            println!("{}", render_detail(&request, session.role()));
        }
        Commands::Create {
            artisan,
            title,
            description,
            kind,
            budget_min,
            budget_max,
            currency,
            deadline,
            product,
        } => {
            let budget = (budget_min.is_some() || budget_max.is_some() || currency.is_some())
                .then(|| Budget {
                    min: budget_min,
                    max: budget_max,
                    currency: currency.unwrap_or_default(),
                });
            let input = CreateRequest {
                artisan,
                kind,
                title,
                description,
                budget,
                deadline,
                product,
            };
            let request = client.create(&session, &input).await?;
            println!("{} {}", "Created".green(), request.id);
            println!("{}", render_detail(&request, session.role()));
        }
        Commands::Update {
            id,
            status,
            message,
            quote,
            quote_details,
        } => {
            let input = UpdateRequest {
                status,
                message,
                quotation: quote.map(|amount| Quotation {
                    amount,
                    currency: None,
                    details: quote_details,
                    valid_until: None,
                }),
            };
            if input.is_empty() {
                bail!("Nothing to update: pass --status, --message or --quote");
            }
            let request = client.update(&session, id, &input).await?;
            println!("{}", render_detail(&request, session.role()));
        }
        Commands::Delete { id } => {
            client.delete(&session, id).await?;
            println!("{} {}", "Deleted".green(), id);
        }
        Commands::Stats => {
            let requests = client.list(&session).await?;
            println!("{}", DashboardStats::from_requests(&requests).render(session.role()));
        }
        Commands::Whoami => {
            let info = client.current_session(&session).await?;
            let name = info
                .user
                .map(|u| format!("{} <{}>", u.name, u.email))
                .unwrap_or_else(|| info.user_id.to_string());
            println!("{} ({})", name.bold(), info.role);
            println!("Session expires {}", info.expires_at);
        }
        Commands::Logout => {
            client.logout(session).await?;
            println!("{}", "Logged out".green());
        }
    }

    Ok(())
}
