//! Pickup repository for crew-scoped reads.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use curbside_core::scheduling::Pickup;
use curbside_core::{CrewId, PickupId, PickupStatus, Timeslot};

use super::RepositoryError;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` pickup queries.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct PickupRow {
    pub id: i32,
    pub address: String,
    pub scheduled_date: NaiveDate,
    pub timeslot: String,
    pub status: String,
    pub crew_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
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

/// Column list shared by every pickup query in this crate.
pub(crate) const PICKUP_COLUMNS: &str =
    "id, address, scheduled_date, timeslot, status, crew_id, created_at, completed_at";

// =============================================================================
// Repository
// =============================================================================

/// Repository for crew-scoped pickup reads.
pub struct PickupRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PickupRepository<'a> {
    /// Create a new pickup repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a crew's `Scheduled` pickups, date ascending then timeslot
    /// ascending.
    ///
    /// The timeslot sort happens in Rust: the stored labels do not sort
    /// chronologically as text ("8 AM–10 AM" would come last).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_scheduled_for_crew(
        &self,
        crew_id: CrewId,
    ) -> Result<Vec<Pickup>, RepositoryError> {
        let rows = sqlx::query_as::<_, PickupRow>(&format!(
            r"
            SELECT {PICKUP_COLUMNS}
            FROM pickup
            WHERE crew_id = $1 AND status = 'Scheduled'
            ORDER BY scheduled_date ASC
            ",
        ))
        .bind(crew_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        let mut pickups = rows
            .into_iter()
            .map(Pickup::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        pickups.sort_by_key(|p| (p.scheduled_date, p.timeslot));

        Ok(pickups)
    }
}
