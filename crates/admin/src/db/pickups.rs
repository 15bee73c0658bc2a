//! Pickup repository: filtered oversight queries, reassignment, and stats.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::{PgPool, Postgres, QueryBuilder};

use curbside_core::scheduling::Pickup;
use curbside_core::{CrewId, Email, PickupId, PickupStatus, Timeslot};

use super::RepositoryError;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` pickup queries.
#[derive(Debug, sqlx::FromRow)]
struct PickupRow {
    id: i32,
    address: String,
    scheduled_date: NaiveDate,
    timeslot: String,
    status: String,
    crew_id: Option<i32>,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl TryFrom<PickupRow> for Pickup {
    type Error = RepositoryError;

    fn try_from(row: PickupRow) -> Result<Self, Self::Error> {
        let timeslot = row.timeslot.parse::<Timeslot>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid timeslot in database: {e}"))
        })?;

        let status = row.status.parse::<PickupStatus>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid status in database: {e}"))
        })?;

        Ok(Self {
            id: PickupId::new(row.id),
            address: row.address,
            scheduled_date: row.scheduled_date,
            timeslot,
            status,
            crew_id: row.crew_id.map(CrewId::new),
            created_at: row.created_at,
            completed_at: row.completed_at,
        })
    }
}

/// Internal row type for pickup queries joined with crew contact info.
#[derive(Debug, sqlx::FromRow)]
struct PickupWithCrewRow {
    id: i32,
    address: String,
    scheduled_date: NaiveDate,
    timeslot: String,
    status: String,
    crew_id: Option<i32>,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    crew_email: Option<String>,
    crew_display_name: Option<String>,
}

impl TryFrom<PickupWithCrewRow> for PickupWithCrew {
    type Error = RepositoryError;

    fn try_from(row: PickupWithCrewRow) -> Result<Self, Self::Error> {
        let crew_email = row
            .crew_email
            .as_deref()
            .map(Email::parse)
            .transpose()
            .map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
            })?;

        let pickup = Pickup::try_from(PickupRow {
            id: row.id,
            address: row.address,
            scheduled_date: row.scheduled_date,
            timeslot: row.timeslot,
            status: row.status,
            crew_id: row.crew_id,
            created_at: row.created_at,
            completed_at: row.completed_at,
        })?;

        Ok(Self {
            pickup,
            crew_email,
            crew_display_name: row.crew_display_name,
        })
    }
}

const PICKUP_COLUMNS: &str =
    "id, address, scheduled_date, timeslot, status, crew_id, created_at, completed_at";

// =============================================================================
// Query Types
// =============================================================================

/// A pickup joined with the owning crew's contact info (if any).
#[derive(Debug, Clone, Serialize)]
pub struct PickupWithCrew {
    #[serde(flatten)]
    pub pickup: Pickup,
    pub crew_email: Option<Email>,
    pub crew_display_name: Option<String>,
}

/// Optional filters for the admin pickup listing and CSV export.
#[derive(Debug, Clone, Default)]
pub struct PickupFilters {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub crew_id: Option<CrewId>,
    pub status: Option<PickupStatus>,
}

/// Dashboard statistics.
#[derive(Debug, Clone, Serialize)]
pub struct PickupStats {
    pub today_pickups: i64,
    pub unassigned_pickups: i64,
    pub completed_this_week: i64,
    pub active_crews: i64,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for admin pickup oversight.
pub struct PickupRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PickupRepository<'a> {
    /// Create a new pickup repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List pickups matching the filters, joined with crew contact info,
    /// newest-scheduled-first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_with_filters(
        &self,
        filters: &PickupFilters,
    ) -> Result<Vec<PickupWithCrew>, RepositoryError> {
        let mut query = QueryBuilder::<Postgres>::new(
            r"
            SELECT p.id, p.address, p.scheduled_date, p.timeslot, p.status,
                   p.crew_id, p.created_at, p.completed_at,
                   c.email AS crew_email, c.display_name AS crew_display_name
            FROM pickup p
            LEFT JOIN crew c ON p.crew_id = c.id
            WHERE 1=1
            ",
        );

        if let Some(start_date) = filters.start_date {
            query.push(" AND p.scheduled_date >= ").push_bind(start_date);
        }
        if let Some(end_date) = filters.end_date {
            query.push(" AND p.scheduled_date <= ").push_bind(end_date);
        }
        if let Some(crew_id) = filters.crew_id {
            query.push(" AND p.crew_id = ").push_bind(crew_id.as_i32());
        }
        if let Some(status) = filters.status {
            query.push(" AND p.status = ").push_bind(status.as_str());
        }

        query.push(" ORDER BY p.scheduled_date DESC, p.created_at DESC");

        let rows = query
            .build_query_as::<PickupWithCrewRow>()
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Overwrite a pickup's crew reference, regardless of status.
    ///
    /// Idempotent; `crew_id = None` detaches the pickup. Returns `None`
    /// when the pickup does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the target crew does not
    /// exist, and `RepositoryError::Database` for other failures.
    pub async fn assign_crew(
        &self,
        id: PickupId,
        crew_id: Option<CrewId>,
    ) -> Result<Option<Pickup>, RepositoryError> {
        let row = sqlx::query_as::<_, PickupRow>(&format!(
            r"
            UPDATE pickup
            SET crew_id = $2
            WHERE id = $1
            RETURNING {PICKUP_COLUMNS}
            ",
        ))
        .bind(id.as_i32())
        .bind(crew_id.map(|c| c.as_i32()))
        .fetch_optional(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::Conflict("crew does not exist".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.map(TryInto::try_into).transpose()
    }

    /// Compute dashboard statistics.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any count fails.
    pub async fn stats(&self, today: NaiveDate) -> Result<PickupStats, RepositoryError> {
        let today_pickups =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM pickup WHERE scheduled_date = $1")
                .bind(today)
                .fetch_one(self.pool)
                .await?;

        let unassigned_pickups = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM pickup WHERE crew_id IS NULL AND status = 'Scheduled'",
        )
        .fetch_one(self.pool)
        .await?;

        let completed_this_week = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM pickup
            WHERE status = 'Completed' AND completed_at >= NOW() - INTERVAL '7 days'
            ",
        )
        .fetch_one(self.pool)
        .await?;

        let active_crews = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM crew")
            .fetch_one(self.pool)
            .await?;

        Ok(PickupStats {
            today_pickups,
            unassigned_pickups,
            completed_this_week,
            active_crews,
        })
    }
}
