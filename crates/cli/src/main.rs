//! Curbside CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! curbside migrate
//!
//! # Seed default templates, demo crews, and ZIP routes
//! curbside seed
//!
//! # Create a crew account
//! curbside crew create -e north@example.com -n "North Crew" -p "s3cret-pw" -z 100,101
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed the database with default templates and demo data
//! - `crew create` - Create crew accounts

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "curbside")]
#[command(author, version, about = "Curbside CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed default SMS templates, demo crews, and ZIP routes
    Seed,
    /// Manage crew accounts
    Crew {
        #[command(subcommand)]
        action: CrewAction,
    },
}

#[derive(Subcommand)]
enum CrewAction {
    /// Create a new crew account
    Create {
        /// Crew email address
        #[arg(short, long)]
        email: String,

        /// Crew display name
        #[arg(short, long)]
        name: String,

        /// Crew password (hashed before storage)
        #[arg(short, long)]
        password: String,

        /// Comma-separated ZIP prefixes the crew covers (e.g. 100,101)
        #[arg(short = 'z', long, default_value = "")]
        zip_prefixes: String,
    },
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

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Seed => commands::seed::run().await,
        Commands::Crew { action } => match action {
            CrewAction::Create {
                email,
                name,
                password,
                zip_prefixes,
            } => commands::crew::create(&email, &name, &password, &zip_prefixes).await,
        },
    }
}
