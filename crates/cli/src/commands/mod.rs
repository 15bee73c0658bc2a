//! CLI command implementations.

pub mod crew;
pub mod migrate;
pub mod seed;

use thiserror::Error;

/// Errors shared by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Password hashing failed")]
    PasswordHash,
}

/// Resolve the database URL from the environment.
///
/// Prefers the generic `DATABASE_URL`; falls back to `PORTAL_DATABASE_URL`
/// (both binaries share one database).
pub fn database_url() -> Result<String, CliError> {
    dotenvy::dotenv().ok();

    std::env::var("DATABASE_URL")
        .or_else(|_| std::env::var("PORTAL_DATABASE_URL"))
        .map_err(|_| CliError::MissingEnvVar("DATABASE_URL (or PORTAL_DATABASE_URL)"))
}
