//! Database migration command.
//!
//! Applies the SQL migrations from `crates/portal/migrations/` (the portal
//! crate owns the shared schema). The tower-sessions table is provisioned
//! separately by each server binary at startup.

use sqlx::PgPool;

use super::{CliError, database_url};

/// Run all pending database migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CliError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../portal/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
