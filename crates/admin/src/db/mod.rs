//! Database operations for the admin console.
//!
//! The admin console manages the same tables the portal serves from:
//! `crew`, `pickup`, `zip_assignment`, and `sms_template`. Management CRUD
//! lives here in concrete repositories; the portal's lifecycle goes through
//! the core storage seam instead.
//!
//! # Migrations
//!
//! The schema is owned by `crates/portal/migrations/` and run via:
//! ```bash
//! cargo run -p curbside-cli -- migrate
//! ```

pub mod crews;
pub mod pickups;
pub mod templates;
pub mod zip_routes;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use crews::CrewRepository;
pub use pickups::PickupRepository;
pub use templates::TemplateRepository;
pub use zip_routes::ZipRouteRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email or ZIP prefix).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
