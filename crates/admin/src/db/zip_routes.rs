//! ZIP routing rule repository.

use serde::Serialize;
use sqlx::PgPool;

use curbside_core::scheduling::ZipRoute;
use curbside_core::{CrewId, ZipPrefix, ZipRouteId};

use super::RepositoryError;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for ZIP route queries joined with the crew name.
#[derive(Debug, sqlx::FromRow)]
struct ZipRouteRow {
    id: i32,
    zip_prefix: String,
    crew_id: i32,
    crew_display_name: Option<String>,
}

impl TryFrom<ZipRouteRow> for ZipRouteWithCrew {
    type Error = RepositoryError;

    fn try_from(row: ZipRouteRow) -> Result<Self, Self::Error> {
        let zip_prefix = ZipPrefix::parse(&row.zip_prefix).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid ZIP prefix in database: {e}"))
        })?;

        Ok(Self {
            route: ZipRoute {
                id: ZipRouteId::new(row.id),
                zip_prefix,
                crew_id: CrewId::new(row.crew_id),
            },
            crew_display_name: row.crew_display_name,
        })
    }
}

/// A routing rule joined with the owning crew's display name.
#[derive(Debug, Clone, Serialize)]
pub struct ZipRouteWithCrew {
    #[serde(flatten)]
    pub route: ZipRoute,
    pub crew_display_name: Option<String>,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for ZIP routing rules.
pub struct ZipRouteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ZipRouteRepository<'a> {
    /// Create a new ZIP route repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all routing rules with crew names, ordered by prefix.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<ZipRouteWithCrew>, RepositoryError> {
        let rows = sqlx::query_as::<_, ZipRouteRow>(
            r"
            SELECT za.id, za.zip_prefix, za.crew_id,
                   c.display_name AS crew_display_name
            FROM zip_assignment za
            JOIN crew c ON za.crew_id = c.id
            ORDER BY za.zip_prefix
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Create a routing rule, replacing any existing rule for the prefix.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the crew does not exist and
    /// `RepositoryError::Database` for other failures.
    pub async fn upsert(
        &self,
        prefix: &ZipPrefix,
        crew_id: CrewId,
    ) -> Result<ZipRoute, RepositoryError> {
        let row = sqlx::query_as::<_, ZipRouteRow>(
            r"
            INSERT INTO zip_assignment (zip_prefix, crew_id)
            VALUES ($1, $2)
            ON CONFLICT (zip_prefix) DO UPDATE SET crew_id = EXCLUDED.crew_id
            RETURNING id, zip_prefix, crew_id, NULL::text AS crew_display_name
            ",
        )
        .bind(prefix.as_str())
        .bind(crew_id.as_i32())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::Conflict("crew does not exist".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(ZipRouteWithCrew::try_from(row)?.route)
    }

    /// Delete a routing rule by id. Returns `false` when it did not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn delete(&self, id: ZipRouteId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM zip_assignment WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
