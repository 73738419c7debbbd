//! CLI administration tool for lease-market.
//!
//! Provides commands for managing accounts and roles, viewing statistics,
//! and performing database operations without requiring HTTP API access.
//! Administrators cannot be created through the API, so this tool is how the
//! first one is made.
//!
//! # Usage
//!
//! ```bash
//! # Create an administrator account
//! cargo run --bin admin -- user create-admin
//!
//! # List accounts
//! cargo run --bin admin -- user list
//!
//! # Grant or revoke administrator rights
//! cargo run --bin admin -- user promote owner@example.com
//! cargo run --bin admin -- user demote owner@example.com
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use lease_market::domain::entities::{NewUser, Role};
use lease_market::domain::repositories::UserRepository;
use lease_market::infrastructure::persistence::PgUserRepository;
use lease_market::utils::password::hash_password;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing lease-market.
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
    /// Manage user accounts
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

/// Account management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// List accounts, newest first
    List {
        /// Maximum number of accounts to show
        #[arg(short, long, default_value_t = 50)]
        limit: i64,
    },

    /// Grant administrator rights
    Promote { email: String },

    /// Revoke administrator rights
    Demote { email: String },

    /// Create a password account with administrator rights
    CreateAdmin {
        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        name: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
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

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches account management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgUserRepository::new(Arc::new(pool.clone())));

    match action {
        UserAction::List { limit } => list_users(repo, limit).await?,
        UserAction::Promote { email } => set_role(repo, &email, Role::Admin).await?,
        UserAction::Demote { email } => set_role(repo, &email, Role::User).await?,
        UserAction::CreateAdmin { email, name, yes } => {
            create_admin(repo, email, name, yes).await?
        }
    }

    Ok(())
}

/// Lists accounts with role and sign-in method.
///
/// # Output Format
///
/// ```text
/// 👥 Users
///
///   ID    Email                          Name                 Role   Login
///   ─────────────────────────────────────────────────────────────────────────────
///   2     owner@example.com              Owner                ADMIN  password
///   1     -                              Kakao user           USER   kakao
/// ```
async fn list_users(repo: Arc<PgUserRepository>, limit: i64) -> Result<()> {
    println!("{}", "👥 Users".bright_blue().bold());
    println!();

    let users = repo
        .list(limit)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create-admin",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<5} {:<30} {:<20} {:<6} {}",
        "ID".bright_white().bold(),
        "Email".bright_white().bold(),
        "Name".bright_white().bold(),
        "Role".bright_white().bold(),
        "Login".bright_white().bold()
    );
    println!("  {}", "─".repeat(77).bright_black());

    for user in &users {
        let role = match user.role {
            Role::Admin => "ADMIN".green(),
            Role::User => "USER".normal(),
        };
        let login = user.provider.as_deref().unwrap_or("password");

        println!(
            "  {:<5} {:<30} {:<20} {:<6} {}",
            user.id.to_string().bright_black(),
            user.email.as_deref().unwrap_or("-").cyan(),
            user.name,
            role,
            login.bright_black()
        );
    }

    println!();
    println!("  Shown: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Changes an account's role. Takes effect for tokens issued afterwards.
async fn set_role(repo: Arc<PgUserRepository>, email: &str, role: Role) -> Result<()> {
    let user = repo
        .set_role(email, role)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to change role: {}", e))?;

    println!(
        "{} {} is now {}",
        "✅".green(),
        email.cyan(),
        format!("{:?}", user.role).to_uppercase().bright_white().bold()
    );
    println!(
        "{}",
        "   Existing tokens keep their old role until they expire.".bright_black()
    );

    Ok(())
}

/// Creates a password account and promotes it.
///
/// # Flow
///
/// 1. Prompt for email and name (or use provided)
/// 2. Prompt for password twice
/// 3. Confirm (unless `--yes`)
/// 4. Hash with Argon2id and store
/// 5. Promote to `ADMIN`
async fn create_admin(
    repo: Arc<PgUserRepository>,
    email: Option<String>,
    name: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Create Administrator".bright_blue().bold());
    println!();

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Name")
            .with_initial_text("Administrator")
            .interact_text()?,
    };

    let password = Password::new()
        .with_prompt("Password (min 8 characters)")
        .with_confirmation("Repeat password", "Passwords do not match")
        .validate_with(|input: &String| {
            if input.len() >= 8 {
                Ok(())
            } else {
                Err("Password must be at least 8 characters")
            }
        })
        .interact()?;

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Create administrator {email}?"))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await?
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;

    let user = repo
        .create(NewUser {
            email: email.clone(),
            name,
            password_hash,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    repo.set_role(&email, Role::Admin)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to promote user: {}", e))?;

    println!();
    println!("{}", "✅ Administrator created successfully!".green().bold());
    println!("  ID:    {}", user.id.to_string().bright_black());
    println!("  Email: {}", email.cyan());
    println!();

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Listings per status
/// - Likes, accounts and administrators
/// - Consultation requests
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let by_status: Vec<(String, i64)> = sqlx::query_as(
        "SELECT status::TEXT, COUNT(*) FROM listings GROUP BY status ORDER BY status",
    )
    .fetch_all(pool)
    .await?;

    let likes: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM listing_likes")
        .fetch_one(pool)
        .await?;

    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    let admins: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = 'ADMIN'")
        .fetch_one(pool)
        .await?;

    let consultations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM consultation_requests")
        .fetch_one(pool)
        .await?;

    println!("  {}", "Listings".bright_white().bold());
    if by_status.is_empty() {
        println!("    {}", "none".bright_black());
    }
    for (status, count) in &by_status {
        println!(
            "    {:<12} {}",
            status,
            count.to_string().bright_green().bold()
        );
    }
    println!();
    println!("  Likes:          {}", likes.to_string().bright_green().bold());
    println!("  Users:          {}", users.to_string().bright_green().bold());
    println!("  Administrators: {}", admins.to_string().bright_green().bold());
    println!(
        "  Consultations:  {}",
        consultations.to_string().bright_green().bold()
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

            let migrations: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success")
                    .fetch_one(pool)
                    .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Applied migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
