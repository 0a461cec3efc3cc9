//! Allergen Menu CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! menu-cli migrate
//!
//! # Insert sample menu items (optionally wiping existing ones)
//! menu-cli seed --reset
//!
//! # Show stored menu items
//! menu-cli list
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed database with sample menu items
//! - `list` - Print the stored menu

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "menu-cli")]
#[command(author, version, about = "Allergen Menu CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert sample menu items
    Seed {
        /// Delete all existing menu items first
        #[arg(long)]
        reset: bool,
    },
    /// Print stored menu items
    List,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Seed { reset } => commands::seed::run(reset).await,
        Commands::List => commands::list::run().await,
    }
}
