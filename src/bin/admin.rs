//! CLI administration tool for gridiron-favorites.
//!
//! Imports the team and player catalog from the sports-data provider, lists
//! registered users and performs database checks without going through the
//! web interface.
//!
//! # Usage
//!
//! ```bash
//! # Import the 2023 season (prompts before resetting)
//! cargo run --bin admin -- seed --season 2023 --reset
//!
//! # List registered users
//! cargo run --bin admin -- users list
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `SPORTS_API_KEY` (required for `seed`): API-Sports key
//! - `SPORTS_API_URL`, `SEASON` (optional): provider base URL and default season

use gridiron_favorites::application::services::{SeedOptions, SeedService};
use gridiron_favorites::config::DEFAULT_SPORTS_API_URL;
use gridiron_favorites::domain::repositories::UserRepository;
use gridiron_favorites::infrastructure::persistence::PgUserRepository;
use gridiron_favorites::infrastructure::sports_data::{ApiSportsClient, ApiSportsConfig};
use gridiron_favorites::server::{migrate, pg_repositories};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for managing gridiron-favorites.
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
    /// Import teams and rosters from the sports-data provider
    Seed {
        /// Season to import
        #[arg(short, long, env = "SEASON", default_value_t = 2023)]
        season: i32,

        /// Delete all teams, players and favorites before importing
        #[arg(long)]
        reset: bool,

        /// Seconds to wait between teams (free provider plans are rate limited)
        #[arg(long, default_value_t = 7)]
        delay: u64,

        /// Provider key
        #[arg(long, env = "SPORTS_API_KEY", hide_env_values = true)]
        api_key: String,

        /// Provider base URL
        #[arg(long, env = "SPORTS_API_URL", default_value = DEFAULT_SPORTS_API_URL)]
        api_url: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Inspect registered users
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User subcommands.
#[derive(Subcommand)]
enum UsersAction {
    /// List all users
    List,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info and catalog counts
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Seed {
            season,
            reset,
            delay,
            api_key,
            api_url,
            yes,
        } => {
            let options = SeedOptions {
                season,
                reset,
                team_delay: Duration::from_secs(delay),
            };
            seed(&pool, options, &api_url, &api_key, yes).await?
        }
        Commands::Users { action } => handle_users_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Imports the catalog for one season.
///
/// Migrations are applied first so a fresh database can be seeded directly.
/// A reset wipes every favorite along with the catalog, so it asks for
/// confirmation unless `--yes` is given.
async fn seed(
    pool: &PgPool,
    options: SeedOptions,
    api_url: &str,
    api_key: &str,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🏈 Seed catalog".bright_blue().bold());
    println!();
    println!("  Season:   {}", options.season.to_string().cyan());
    println!("  Provider: {}", api_url.cyan());
    println!(
        "  Reset:    {}",
        if options.reset {
            "yes".red()
        } else {
            "no".green()
        }
    );
    println!();

    if options.reset && !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete all teams, players and favorites first?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    migrate(pool).await?;

    let provider = ApiSportsClient::new(ApiSportsConfig::new(api_url, api_key))
        .context("Failed to build sports-data client")?;
    let repositories = pg_repositories(pool.clone());
    let service = SeedService::new(Arc::new(provider), repositories.teams, repositories.players);

    let report = service
        .run(&options)
        .await
        .map_err(|e| anyhow::anyhow!("Seeding failed: {}", e))?;

    println!("{}", "✅ Import finished".green().bold());
    println!();
    println!(
        "  Teams imported:   {}",
        report.teams_imported.to_string().bright_green().bold()
    );
    println!(
        "  Teams skipped:    {}",
        report.teams_skipped.to_string().yellow()
    );
    println!(
        "  Players imported: {}",
        report.players_imported.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Dispatches user commands.
async fn handle_users_action(action: UsersAction, pool: &PgPool) -> Result<()> {
    let repo = PgUserRepository::new(Arc::new(pool.clone()));

    match action {
        UsersAction::List => list_users(&repo).await?,
    }

    Ok(())
}

/// Lists all users.
///
/// # Output Format
///
/// ```text
/// 👥 Users
///
///   ID  Username             Email                          Joined
///   ─────────────────────────────────────────────────────────────────────────
///   1   mike                 mike@example.com               2024-01-15 10:30
/// ```
async fn list_users(repo: &PgUserRepository) -> Result<()> {
    println!("{}", "👥 Users".bright_blue().bold());
    println!();

    let users = repo
        .list_all()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        return Ok(());
    }

    println!(
        "  {:<3} {:<20} {:<30} {:<16}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "Email".bright_white().bold(),
        "Joined".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for user in &users {
        println!(
            "  {:<3} {:<20} {:<30} {}",
            user.id.to_string().bright_black(),
            user.username.cyan(),
            user.email,
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

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
            println!("  PostgreSQL: {}", version.bright_white());
            println!();

            for (label, table) in [
                ("Users", "users"),
                ("Teams", "teams"),
                ("Players", "players"),
                ("Favorite teams", "favorite_teams"),
                ("Favorite players", "favorite_players"),
            ] {
                let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
                    .fetch_one(pool)
                    .await?;
                println!(
                    "  {:<17} {}",
                    format!("{label}:"),
                    count.to_string().bright_green().bold()
                );
            }
            println!();
        }
    }

    Ok(())
}
