//! CLI administration tool for url-shortener-core.
//!
//! Drives the library services directly against the configured SQLite
//! database.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL, optionally with a custom code
//! cargo run --bin admin -- shorten example.com
//! cargo run --bin admin -- shorten https://example.com/docs --code docs
//!
//! # Resolve a code (counts as a click)
//! cargo run --bin admin -- resolve docs
//!
//! # Statistics for one code, and the most recent links
//! cargo run --bin admin -- stats docs --json
//! cargo run --bin admin -- list --limit 20
//!
//! # Stop or restore resolution of a code
//! cargo run --bin admin -- deactivate docs
//! cargo run --bin admin -- activate docs
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! See [`url_shortener_core::config`]. Logs go to stderr so `--json` output
//! on stdout stays machine readable.

use url_shortener_core::config::{self, Config};
use url_shortener_core::AppError;
use url_shortener_core::domain::entities::ClickContext;
use url_shortener_core::dto::{ListItem, ListResponse, ShortenResponse, StatsResponse};
use url_shortener_core::state::AppState;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// CLI tool for managing short URLs.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Create a short URL
    Shorten {
        /// URL to shorten; https:// is assumed when no scheme is given
        url: String,

        /// Custom short code (3-20 characters: letters, digits, '-' or '_')
        #[arg(short, long)]
        code: Option<String>,

        /// Requester IP stored with the record
        #[arg(long)]
        ip: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Resolve a code to its URL and record a click
    Resolve {
        code: String,

        #[arg(long)]
        ip: Option<String>,

        #[arg(long)]
        user_agent: Option<String>,

        #[arg(long)]
        referrer: Option<String>,
    },

    /// Show statistics for a code
    Stats {
        code: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the most recently created short URLs
    List {
        /// Number of entries (1-100)
        #[arg(short, long, default_value_t = 20)]
        limit: i64,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Stop a code from resolving
    Deactivate {
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Let a deactivated code resolve again
    Activate { code: String },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and apply migrations
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    init_tracing(&config)?;
    config.print_summary();

    let state = AppState::initialize(&config)
        .await
        .with_context(|| format!("Failed to open database at {}", config.database_url))?;

    let result = run(cli.command, &state).await;

    state.shutdown().await;

    if let Err(e) = &result
        && let Some(app_err) = e.downcast_ref::<AppError>()
    {
        tracing::debug!(code = app_err.code(), client = app_err.is_client_error(), "Command failed");
        if app_err.is_retryable() {
            eprintln!("{}", "⚠️  Running the command again may succeed".yellow());
        }
    }

    result
}

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("Invalid log filter")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }

    Ok(())
}

async fn run(command: Commands, state: &AppState) -> Result<()> {
    match command {
        Commands::Shorten { url, code, ip, json } => shorten(state, url, code, ip, json).await,
        Commands::Resolve {
            code,
            ip,
            user_agent,
            referrer,
        } => {
            let context = ClickContext::new(ip, user_agent.as_deref(), referrer.as_deref());
            resolve(state, &code, context).await
        }
        Commands::Stats { code, json } => stats(state, &code, json).await,
        Commands::List { limit, json } => list(state, limit, json).await,
        Commands::Deactivate { code, yes } => deactivate(state, &code, yes).await,
        Commands::Activate { code } => {
            state.link_service.activate(&code).await?;
            println!("{} {}", "✅ Activated".green().bold(), code.cyan());
            Ok(())
        }
        Commands::Db { action } => handle_db_action(action, state).await,
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn shorten(
    state: &AppState,
    url: String,
    code: Option<String>,
    ip: Option<String>,
    json: bool,
) -> Result<()> {
    let record = state
        .link_service
        .create_short_url(url, code, ip)
        .await
        .context("Failed to shorten URL")?;

    if json {
        return print_json(&ShortenResponse::from(record));
    }

    println!("{}", "✨ Short URL created".green().bold());
    println!();
    println!("  Code: {}", record.short_code.bright_yellow().bold());
    println!("  URL:  {}", record.original_url.cyan());
    if record.is_custom() {
        println!("  Type: {}", "custom".bright_black());
    }
    println!();

    Ok(())
}

async fn resolve(state: &AppState, code: &str, context: ClickContext) -> Result<()> {
    let record = state.link_service.resolve(code, context).await?;

    println!("{}", record.original_url);

    Ok(())
}

/// Displays statistics for one code.
///
/// Shows the record details and up to ten most recent clicks, newest first.
async fn stats(state: &AppState, code: &str, json: bool) -> Result<()> {
    let stats = state.stats_service.summarize(code).await?;
    let response = StatsResponse::from(stats);

    if json {
        return print_json(&response);
    }

    let status = if response.is_active {
        "ACTIVE".green()
    } else {
        "INACTIVE".red()
    };

    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();
    println!("  Code:     {}", response.short_code.bright_yellow().bold());
    println!("  URL:      {}", response.original_url.cyan());
    println!(
        "  Created:  {}",
        response.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!(
        "  Clicks:   {}",
        response.clicks.to_string().bright_green().bold()
    );
    println!("  Events:   {}", response.total_events);
    match response.last_accessed {
        Some(at) => println!("  Last hit: {}", at.format("%Y-%m-%d %H:%M:%S")),
        None => println!("  Last hit: {}", "never".bright_black()),
    }
    println!("  Status:   {}", status);
    println!();

    if response.recent_clicks.is_empty() {
        println!("{}", "  No clicks recorded".yellow());
        println!();
        return Ok(());
    }

    println!(
        "  {:<20} {:<16} {:<30} {}",
        "Clicked".bright_white().bold(),
        "IP".bright_white().bold(),
        "Referrer".bright_white().bold(),
        "User agent".bright_white().bold()
    );
    println!("  {}", "─".repeat(90).bright_black());

    for click in &response.recent_clicks {
        println!(
            "  {:<20} {:<16} {:<30} {}",
            click
                .clicked_at
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
                .bright_black(),
            click.user_ip.as_deref().unwrap_or("-"),
            click.referrer.as_deref().unwrap_or("-"),
            click.user_agent.as_deref().unwrap_or("-")
        );
    }
    println!();

    Ok(())
}

/// Lists recent short URLs.
///
/// # Output Format
///
/// ```text
/// 📋 Short URLs
///
///   Code        Clicks   Created            Status    URL
///   ──────────────────────────────────────────────────────────────
///   aZ3kP9      12       2024-01-15 10:30   ACTIVE    https://example.com
/// ```
async fn list(state: &AppState, limit: i64, json: bool) -> Result<()> {
    let records = state.link_service.list_recent(limit).await?;
    let total = state.link_service.count().await?;
    let total_clicks = state.link_service.total_clicks().await?;

    if json {
        return print_json(&ListResponse {
            total,
            total_clicks,
            items: records.into_iter().map(ListItem::from).collect(),
        });
    }

    println!("{}", "📋 Short URLs".bright_blue().bold());
    println!();

    if records.is_empty() {
        println!("{}", "  No short URLs found".yellow());
        println!();
        println!(
            "  Create one with: {} admin shorten <url>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<20} {:<8} {:<18} {:<9} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(90).bright_black());

    for record in &records {
        let status = if record.is_active {
            "ACTIVE".green()
        } else {
            "INACTIVE".red()
        };

        println!(
            "  {:<20} {:<8} {:<18} {:<9} {}",
            record.short_code.cyan(),
            record.clicks,
            record
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status,
            record.original_url
        );
    }

    println!();
    println!(
        "  Showing {} of {}",
        records.len().to_string().bright_white().bold(),
        total.to_string().bright_white().bold()
    );
    println!(
        "  Total clicks: {}",
        total_clicks.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Deactivates a code after confirmation (default: No).
async fn deactivate(state: &AppState, code: &str, skip_confirm: bool) -> Result<()> {
    let stats = state.stats_service.summarize(code).await?;
    let record = stats.record;

    if !record.is_active {
        println!("{}", "⚠️  This code is already inactive".yellow());
        return Ok(());
    }

    println!("  Code: {}", record.short_code.cyan());
    println!("  URL:  {}", record.original_url.bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Deactivate this code?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    state.link_service.deactivate(code).await?;

    println!("{}", "✅ Deactivated".green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, state: &AppState) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            state.database.ping().await?;
            let total = state.link_service.count().await?;
            let total_clicks = state.link_service.total_clicks().await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!(
                "  Short URLs:   {}",
                total.to_string().bright_green().bold()
            );
            println!(
                "  Total clicks: {}",
                total_clicks.to_string().bright_green().bold()
            );
        }
    }

    Ok(())
}
