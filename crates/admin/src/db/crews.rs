//! Crew repository: full management CRUD.

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

const CREW_COLUMNS: &str = "id, email, display_name, zip_prefixes, created_at, updated_at";

/// Fields for creating a crew. The password is hashed before it gets here.
#[derive(Debug)]
pub struct NewCrew {
    pub email: Email,
    pub password_hash: String,
    pub display_name: String,
    pub zip_prefixes: Vec<ZipPrefix>,
}

/// Partial update of a crew; `None` fields keep their current value.
#[derive(Debug, Default)]
pub struct CrewPatch {
    pub email: Option<Email>,
    pub password_hash: Option<String>,
    pub display_name: Option<String>,
    pub zip_prefixes: Option<Vec<ZipPrefix>>,
}

fn prefixes_to_strings(prefixes: &[ZipPrefix]) -> Vec<String> {
    prefixes.iter().map(|p| p.as_str().to_owned()).collect()
}

fn map_unique_violation(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict("email already exists".to_owned());
    }
    RepositoryError::Database(e)
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for crew management operations.
pub struct CrewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CrewRepository<'a> {
    /// Create a new crew repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all crews, ordered by display name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_all(&self) -> Result<Vec<Crew>, RepositoryError> {
        let rows = sqlx::query_as::<_, CrewRow>(&format!(
            "SELECT {CREW_COLUMNS} FROM crew ORDER BY display_name",
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Create a new crew.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: NewCrew) -> Result<Crew, RepositoryError> {
        let row = sqlx::query_as::<_, CrewRow>(&format!(
            r"
            INSERT INTO crew (email, password_hash, display_name, zip_prefixes)
            VALUES ($1, $2, $3, $4)
            RETURNING {CREW_COLUMNS}
            ",
        ))
        .bind(new.email.as_str())
        .bind(&new.password_hash)
        .bind(&new.display_name)
        .bind(prefixes_to_strings(&new.zip_prefixes))
        .fetch_one(self.pool)
        .await
        .map_err(map_unique_violation)?;

        row.try_into()
    }

    /// Apply a partial update to a crew. Absent fields keep their current
    /// value; the password hash is only replaced when a new one is given.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the new email is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: CrewId,
        patch: CrewPatch,
    ) -> Result<Option<Crew>, RepositoryError> {
        let row = sqlx::query_as::<_, CrewRow>(&format!(
            r"
            UPDATE crew
            SET email         = COALESCE($2, email),
                password_hash = COALESCE($3, password_hash),
                display_name  = COALESCE($4, display_name),
                zip_prefixes  = COALESCE($5, zip_prefixes),
                updated_at    = NOW()
            WHERE id = $1
            RETURNING {CREW_COLUMNS}
            ",
        ))
        .bind(id.as_i32())
        .bind(patch.email.as_ref().map(Email::as_str))
        .bind(patch.password_hash.as_deref())
        .bind(patch.display_name.as_deref())
        .bind(patch.zip_prefixes.as_deref().map(prefixes_to_strings))
        .fetch_optional(self.pool)
        .await
        .map_err(map_unique_violation)?;

        row.map(TryInto::try_into).transpose()
    }

    /// Delete a crew.
    ///
    /// Cascades in one transaction: detach referencing pickups
    /// (`crew_id -> NULL`), remove the crew's ZIP assignments, then delete
    /// the crew row. Returns `false` when the crew did not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails.
    pub async fn delete(&self, id: CrewId) -> Result<bool, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE pickup SET crew_id = NULL WHERE crew_id = $1")
            .bind(id.as_i32())
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM zip_assignment WHERE crew_id = $1")
            .bind(id.as_i32())
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM crew WHERE id = $1")
            .bind(id.as_i32())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}
