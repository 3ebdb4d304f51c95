//! Panchayat admin CLI: provisions admin accounts directly in the database.
//!
//! Reads DATABASE_URL (a `.env` file is honoured) and applies pending
//! migrations before touching the admins table.

use anyhow::Context;
use clap::{Parser, Subcommand};
use panchayat_cli::{create_admin, init_tracing, CreateOutcome};
use panchayat_db::{run_migrations, AdminRepository};
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "panchayat-admin", about = "Panchayat admin account tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an admin account (no-op if the username is taken)
    Create {
        /// Login name for the new admin
        #[arg(long, default_value = "admin")]
        username: String,
        /// Password for the new admin
        #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Create { username, password } => {
            let database_url =
                std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
            let pool = PgPoolOptions::new()
                .max_connections(1)
                .acquire_timeout(Duration::from_secs(30))
                .connect(&database_url)
                .await
                .context("Failed to connect to database")?;
            run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;

            let admins = AdminRepository::new(pool);
            match create_admin(&admins, &username, &password).await? {
                CreateOutcome::Created(admin) => {
                    println!("Admin user created: {} ({})", admin.username, admin.id);
                }
                CreateOutcome::AlreadyExists => {
                    println!("Admin user '{}' already exists", username.trim());
                }
            }
        }
    }

    Ok(())
}
