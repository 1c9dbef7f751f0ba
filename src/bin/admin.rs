//! CLI administration tool for short-url-service.
//!
//! Inspects the PostgreSQL mapping store without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show where a code points
//! cargo run --bin admin -- lookup 42
//!
//! # Mapping count, highest code, sequence position
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Apply migrations
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`

use short_url_service::config::{Config, mask_connection_string};
use short_url_service::domain::entities::ShortCode;
use short_url_service::domain::repositories::MappingRepository;
use short_url_service::infrastructure::persistence::PgMappingRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing short-url-service.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Show the URL a short code points to
    Lookup {
        /// Short code (positive integer)
        code: String,
    },

    /// Show store statistics
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

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;
    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| format!("Failed to connect to {}", mask_connection_string(&database_url)))?;

    match cli.command {
        Commands::Lookup { code } => handle_lookup(&pool, &code).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Prints the mapping stored for `raw_code`.
async fn handle_lookup(pool: &PgPool, raw_code: &str) -> Result<()> {
    let code: ShortCode = raw_code
        .parse()
        .with_context(|| format!("'{raw_code}' is not a valid short code"))?;

    let repo = PgMappingRepository::new(Arc::new(pool.clone()));
    let mapping = repo
        .find_by_code(code)
        .await
        .map_err(|e| anyhow::anyhow!("Lookup failed: {}", e.detail()))?;

    match mapping {
        Some(mapping) => {
            println!("{}", "🔗 Mapping".bright_blue().bold());
            println!();
            println!("  Code:     {}", mapping.code.to_string().bright_yellow().bold());
            println!("  URL:      {}", mapping.original_url.cyan());
            println!(
                "  Created:  {}",
                mapping
                    .created_at
                    .format("%Y-%m-%d %H:%M:%S UTC")
                    .to_string()
                    .bright_black()
            );
            println!();
        }
        None => {
            println!("{}", format!("No mapping for code {code}").yellow());
        }
    }

    Ok(())
}

/// Displays store statistics.
///
/// Shows:
/// - Total number of mappings
/// - Highest issued code
/// - Next value the database sequence will hand out
///
/// Codes abandoned by failed inserts show up as the difference between the
/// highest code and the mapping count.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let repo = PgMappingRepository::new(Arc::new(pool.clone()));

    let total = repo
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count mappings: {}", e.detail()))?;
    let max_code = repo
        .max_code()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read highest code: {}", e.detail()))?;

    let (last_value, is_called): (i64, bool) =
        sqlx::query_as("SELECT last_value, is_called FROM short_code_seq")
            .fetch_one(pool)
            .await
            .context("Failed to read short_code_seq")?;
    let next_sequence = if is_called { last_value + 1 } else { last_value };

    let highest = max_code.map(ShortCode::value).unwrap_or(0);

    println!("  Mappings:       {}", total.to_string().bright_white().bold());
    println!("  Highest code:   {}", highest.to_string().bright_white().bold());
    println!(
        "  Gaps:           {}",
        (highest - total).max(0).to_string().bright_black()
    );
    println!(
        "  Next sequence:  {}",
        next_sequence.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await
                .context("Database query failed")?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  {}", version.bright_black());
        }
        DbAction::Migrate => {
            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Failed to apply migrations")?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
