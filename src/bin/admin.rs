//! CLI administration tool for quicklink.
//!
//! Provides commands for inspecting mappings, checking the database and
//! managing the Redis cache without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Show database info and totals
//! cargo run --bin admin -- db info
//!
//! # Show a stored mapping
//! cargo run --bin admin -- link show aB3xY9
//!
//! # Probe Redis
//! cargo run --bin admin -- cache ping
//!
//! # Drop cached entries for a code
//! cargo run --bin admin -- cache invalidate aB3xY9
//! ```
//!
//! # Environment Variables
//!
//! Reads the same variables as the server (`DATABASE_URL` or `DB_*`,
//! `REDIS_URL` or `REDIS_*`).

use quicklink::config::{Config, mask_connection_string};
use quicklink::domain::repositories::UrlRepository;
use quicklink::infrastructure::cache::{CacheKey, CacheService, RedisCache};
use quicklink::infrastructure::persistence::PgUrlRepository;
use quicklink::server::connect_database;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing quicklink.
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
    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Inspect short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Cache operations
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

/// Link subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Show the stored mapping for a short code
    Show {
        /// Short code to look up
        code: String,
    },
}

/// Cache subcommands.
#[derive(Subcommand)]
enum CacheAction {
    /// Check that Redis answers PING
    Ping,

    /// Remove the cached mapping, stats and click counter for a code
    Invalidate {
        /// Short code whose entries should be dropped
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    match cli.command {
        Commands::Db { action } => {
            let pool = connect_database(&config).await?;
            handle_db_action(action, &pool).await?
        }
        Commands::Link { action } => {
            let pool = connect_database(&config).await?;
            handle_link_action(action, pool).await?
        }
        Commands::Cache { action } => handle_cache_action(action, &config).await?,
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let repo = PgUrlRepository::new(Arc::new(pool.clone()));
            let links = repo
                .count()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;
            let clicks = repo
                .total_clicks()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count clicks: {}", e))?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Links:      {}", links.to_string().bright_green().bold());
            println!("  Clicks:     {}", clicks.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}

/// Handles link inspection commands.
async fn handle_link_action(action: LinkAction, pool: PgPool) -> Result<()> {
    let repo = PgUrlRepository::new(Arc::new(pool));

    match action {
        LinkAction::Show { code } => {
            let mapping = repo
                .find_by_short_code(&code)
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

            let Some(mapping) = mapping else {
                println!("{} {}", "❌ No mapping for".red(), code.cyan());
                return Ok(());
            };

            println!("{}", "🔗 Short Link".bright_blue().bold());
            println!();
            println!("  Code:     {}", mapping.short_code.cyan());
            println!("  URL:      {}", mapping.original_url.bright_white());
            println!(
                "  Clicks:   {}",
                mapping.click_count.to_string().bright_green().bold()
            );
            println!(
                "  Created:  {}",
                mapping
                    .created_at
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .bright_black()
            );

            match mapping.expires_at {
                Some(expires_at) if mapping.is_expired_at(chrono::Utc::now()) => println!(
                    "  Expires:  {} {}",
                    expires_at.format("%Y-%m-%d %H:%M").to_string().bright_black(),
                    "EXPIRED".red()
                ),
                Some(expires_at) => println!(
                    "  Expires:  {}",
                    expires_at.format("%Y-%m-%d %H:%M").to_string().bright_black()
                ),
                None => println!("  Expires:  {}", "never".bright_black()),
            }
            println!();
        }
    }

    Ok(())
}

/// Handles cache commands against the configured Redis.
async fn handle_cache_action(action: CacheAction, config: &Config) -> Result<()> {
    let redis_url = config
        .redis_url
        .as_deref()
        .context("Cache is disabled (CACHE_ENABLED=false)")?;

    match action {
        CacheAction::Ping => {
            println!(
                "{} {}",
                "🔍 Pinging".bright_blue(),
                mask_connection_string(redis_url).bright_white()
            );

            let cache = RedisCache::connect(redis_url)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;

            if cache.is_healthy().await {
                println!("{}", "✅ Redis connection OK".green().bold());
            } else {
                println!("{}", "❌ Redis did not answer PING".red().bold());
            }
        }
        CacheAction::Invalidate { code, yes } => {
            println!("{}", "🧹 Invalidate Cache Entries".bright_blue().bold());
            println!();
            for key in CacheKey::per_code(&code) {
                println!("  {}", key.to_string().cyan());
            }
            println!();

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Delete these keys?")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            let cache: Arc<dyn CacheService> = Arc::new(
                RedisCache::connect(redis_url)
                    .await
                    .map_err(|e| anyhow::anyhow!("{}", e))?,
            );
            cache.invalidate(&code).await;

            println!("{}", "✅ Cache entries removed".green().bold());
            println!();
        }
    }

    Ok(())
}
