//! Crew repository for database operations.
//!
//! The portal only reads crews: login lookup and profile display. Crew
//! management lives in the admin binary.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use curbside_core::scheduling::Crew;
use curbside_core::{CrewId, Email, ZipPrefix};

use super::RepositoryError;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` crew queries.
#[derive(Debug, sqlx::FromRow)]
struct CrewRow {
    id: i32,
    email: String,
    display_name: String,
    zip_prefixes: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CrewRow> for Crew {
    type Error = RepositoryError;

    fn try_from(row: CrewRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        let zip_prefixes = row
            .zip_prefixes
            .iter()
            .map(|p| ZipPrefix::parse(p))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid ZIP prefix in database: {e}"))
            })?;

        Ok(Self {
            id: CrewId::new(row.id),
            email,
            display_name: row.display_name,
            zip_prefixes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Internal row type for the login query (crew + password hash).
#[derive(Debug, sqlx::FromRow)]
struct CrewWithHashRow {
    id: i32,
    email: String,
    password_hash: String,
    display_name: String,
    zip_prefixes: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for crew database operations.
pub struct CrewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CrewRepository<'a> {
    /// Create a new crew repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a crew by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_id(&self, id: CrewId) -> Result<Option<Crew>, RepositoryError> {
        let row = sqlx::query_as::<_, CrewRow>(
            r"
            SELECT id, email, display_name, zip_prefixes, created_at, updated_at
            FROM crew
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get a crew and its password hash by email, for login verification.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(Crew, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, CrewWithHashRow>(
            r"
            SELECT id, email, password_hash, display_name, zip_prefixes,
                   created_at, updated_at
            FROM crew
            WHERE email = $1
            ",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(r) => {
                let hash = r.password_hash.clone();
                let crew = Crew::try_from(CrewRow {
                    id: r.id,
                    email: r.email,
                    display_name: r.display_name,
                    zip_prefixes: r.zip_prefixes,
                    created_at: r.created_at,
                    updated_at: r.updated_at,
                })?;
                Ok(Some((crew, hash)))
            }
            None => Ok(None),
        }
    }
}
