//! CLI administration tool for foodgram-api.
//!
//! Provides commands for loading the tag/ingredient catalogs from
//! fixture files, creating accounts, viewing statistics, and performing
//! database checks without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Load the ingredient catalog from a JSON fixture
//! cargo run --bin admin -- load ingredients data/ingredients.json
//!
//! # Load tags
//! cargo run --bin admin -- load tags data/tags.json
//!
//! # Create an account interactively
//! cargo run --bin admin -- user create
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Fixture Formats
//!
//! ```json
//! [{"name": "salt", "measurement_unit": "g"}]
//! ```
//!
//! ```json
//! [{"name": "Breakfast", "color": "#E26C2D", "slug": "breakfast"}]
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use foodgram_api::domain::entities::{NewIngredient, NewTag, NewUser};
use foodgram_api::domain::repositories::{IngredientRepository, TagRepository, UserRepository};
use foodgram_api::infrastructure::persistence::{
    PgIngredientRepository, PgTagRepository, PgUserRepository,
};
use foodgram_api::utils::password::hash_password;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Input, Password};
use serde::Deserialize;
use sqlx::PgPool;
use std::path::PathBuf;
use std::sync::Arc;

/// CLI tool for managing foodgram-api.
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
    /// Load catalog fixtures
    Load {
        #[command(subcommand)]
        action: LoadAction,
    },

    /// Manage accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Fixture loading subcommands.
#[derive(Subcommand)]
enum LoadAction {
    /// Load ingredients from a JSON fixture
    Ingredients {
        /// Path to the fixture file
        path: PathBuf,
    },

    /// Load tags from a JSON fixture
    Tags {
        /// Path to the fixture file
        path: PathBuf,
    },
}

/// Account management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create an account interactively
    Create,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[derive(Deserialize)]
struct IngredientFixture {
    name: String,
    measurement_unit: String,
}

#[derive(Deserialize)]
struct TagFixture {
    name: String,
    color: String,
    slug: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Load { action } => handle_load_action(action, &pool).await?,
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches fixture loading commands.
async fn handle_load_action(action: LoadAction, pool: &PgPool) -> Result<()> {
    match action {
        LoadAction::Ingredients { path } => load_ingredients(pool, &path).await?,
        LoadAction::Tags { path } => load_tags(pool, &path).await?,
    }

    Ok(())
}

/// Loads the ingredient catalog, skipping exact duplicates.
async fn load_ingredients(pool: &PgPool, path: &PathBuf) -> Result<()> {
    println!("{}", "📦 Load ingredients".bright_blue().bold());
    println!();

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let fixtures: Vec<IngredientFixture> =
        serde_json::from_str(&raw).context("Fixture must be a JSON array of ingredients")?;

    let repo = PgIngredientRepository::new(Arc::new(pool.clone()));

    let mut inserted = 0usize;
    let mut skipped = 0usize;

    for fixture in fixtures {
        let created = repo
            .create(NewIngredient {
                name: fixture.name,
                measurement_unit: fixture.measurement_unit,
            })
            .await
            .map_err(|e| anyhow::anyhow!("Failed to insert ingredient: {}", e))?;

        if created {
            inserted += 1;
        } else {
            skipped += 1;
        }
    }

    println!(
        "  Inserted: {}",
        inserted.to_string().bright_green().bold()
    );
    println!("  Skipped:  {}", skipped.to_string().bright_black());
    println!();
    println!("{}", "✅ Ingredient catalog loaded".green().bold());

    Ok(())
}

/// Loads tags. Duplicate names/colors/slugs abort with an error.
async fn load_tags(pool: &PgPool, path: &PathBuf) -> Result<()> {
    println!("{}", "🏷️  Load tags".bright_blue().bold());
    println!();

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let fixtures: Vec<TagFixture> =
        serde_json::from_str(&raw).context("Fixture must be a JSON array of tags")?;

    let repo = PgTagRepository::new(Arc::new(pool.clone()));

    for fixture in fixtures {
        let tag = repo
            .create(NewTag {
                name: fixture.name,
                color: fixture.color,
                slug: fixture.slug,
            })
            .await
            .map_err(|e| anyhow::anyhow!("Failed to insert tag: {}", e))?;

        println!("  {} ({})", tag.name.cyan(), tag.slug.bright_black());
    }

    println!();
    println!("{}", "✅ Tags loaded".green().bold());

    Ok(())
}

/// Dispatches account management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    match action {
        UserAction::Create => create_user(pool).await?,
    }

    Ok(())
}

/// Creates an account with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for email, username, first and last name
/// 2. Prompt for the password (hidden, with confirmation)
/// 3. Hash the password with Argon2
/// 4. Store the account
async fn create_user(pool: &PgPool) -> Result<()> {
    println!("{}", "👤 Create account".bright_blue().bold());
    println!();

    let email: String = Input::new().with_prompt("Email").interact_text()?;
    let username: String = Input::new().with_prompt("Username").interact_text()?;
    let first_name: String = Input::new().with_prompt("First name").interact_text()?;
    let last_name: String = Input::new().with_prompt("Last name").interact_text()?;

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;

    let password_hash =
        hash_password(&password).map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;

    let repo = PgUserRepository::new(Arc::new(pool.clone()));

    let user = repo
        .create(NewUser {
            email,
            username,
            first_name,
            last_name,
            password_hash,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create account: {}", e))?;

    println!();
    println!("{}", "✅ Account created!".green().bold());
    println!("  ID:       {}", user.id.to_string().bright_black());
    println!("  Username: {}", user.username.cyan());
    println!("  Email:    {}", user.email.cyan());
    println!();

    Ok(())
}

/// Displays system statistics.
///
/// Shows row counts for the main tables.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let users_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    let recipes_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes")
        .fetch_one(pool)
        .await?;

    let ingredients_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ingredients")
        .fetch_one(pool)
        .await?;

    let tags_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tags")
        .fetch_one(pool)
        .await?;

    let subscriptions_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subscriptions")
        .fetch_one(pool)
        .await?;

    println!(
        "  Users:         {}",
        users_count.to_string().bright_green().bold()
    );
    println!(
        "  Recipes:       {}",
        recipes_count.to_string().bright_green().bold()
    );
    println!(
        "  Ingredients:   {}",
        ingredients_count.to_string().bright_green().bold()
    );
    println!(
        "  Tags:          {}",
        tags_count.to_string().bright_green().bold()
    );
    println!(
        "  Subscriptions: {}",
        subscriptions_count.to_string().bright_green().bold()
    );
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
        }
    }

    Ok(())
}
