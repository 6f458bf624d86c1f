//! CLI administration tool for shortcode-service.
//!
//! Runs maintenance against the link store without going through HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Purge expired links now (asks for confirmation)
//! cargo run --bin admin -- sweep
//!
//! # Purge without prompting
//! cargo run --bin admin -- sweep -y
//!
//! # View link counts
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `STORE_TIMEOUT_MS` (optional): per-statement deadline, default 5000

use shortcode_service::domain::repositories::ShortLinkRepository;
use shortcode_service::infrastructure::persistence::PgShortLinkRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for managing shortcode-service.
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
    /// Delete expired links immediately
    Sweep {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show link counts
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let timeout_ms = std::env::var("STORE_TIMEOUT_MS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(5000);

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let repo = PgShortLinkRepository::new(Arc::new(pool), Duration::from_millis(timeout_ms));

    match cli.command {
        Commands::Sweep { yes } => handle_sweep(&repo, yes).await?,
        Commands::Stats => handle_stats(&repo).await?,
        Commands::Db { action } => handle_db_action(action, &repo).await?,
    }

    Ok(())
}

/// Runs one expiry sweep on demand.
///
/// Shows how many links are due before asking for confirmation (default: No)
/// unless `--yes` is given.
async fn handle_sweep(repo: &PgShortLinkRepository, skip_confirm: bool) -> Result<()> {
    println!("{}", "🧹 Sweep Expired Links".bright_blue().bold());
    println!();

    let counts = repo
        .counts()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;

    if counts.expired == 0 {
        println!("{}", "  Nothing to sweep".yellow());
        return Ok(());
    }

    println!(
        "  Expired links: {}",
        counts.expired.to_string().bright_yellow().bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete these links? Their codes become reusable")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let deleted = repo
        .delete_expired()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete expired links: {}", e))?;

    println!();
    println!(
        "{} {}",
        "✅ Deleted".green().bold(),
        format!("{} links", deleted).bright_white().bold()
    );
    println!();

    Ok(())
}

/// Displays link counts.
///
/// "Expired" includes rows past their expiry that have not been flagged yet.
async fn handle_stats(repo: &PgShortLinkRepository) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let counts = repo
        .counts()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;

    println!(
        "  Links:   {}",
        counts.total.to_string().bright_green().bold()
    );
    println!(
        "  Active:  {}",
        counts.active.to_string().bright_green().bold()
    );
    println!(
        "  Expired: {}",
        counts.expired.to_string().bright_yellow().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, repo: &PgShortLinkRepository) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            repo.ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
    }

    Ok(())
}
