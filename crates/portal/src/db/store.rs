//! `PostgreSQL` implementation of the core `ScheduleStore` seam.

use sqlx::PgPool;

use curbside_core::scheduling::{NewPickup, Pickup, ScheduleStore, SmsTemplate, StoreError};
use curbside_core::{CrewId, PickupId, TemplateId, TemplateKind, ZipPrefix};

use super::RepositoryError;
use super::pickups::{PICKUP_COLUMNS, PickupRow};

/// Internal row type for SMS template queries.
#[derive(Debug, sqlx::FromRow)]
struct TemplateRow {
    id: i32,
    template_type: String,
    template_text: String,
}

impl TryFrom<TemplateRow> for SmsTemplate {
    type Error = RepositoryError;

    fn try_from(row: TemplateRow) -> Result<Self, Self::Error> {
        let template_type = row.template_type.parse::<TemplateKind>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid template type in database: {e}"))
        })?;

        Ok(Self {
            id: TemplateId::new(row.id),
            template_type,
            template_text: row.template_text,
        })
    }
}

/// The production [`ScheduleStore`]: pickups, ZIP routes, and templates in
/// `PostgreSQL`.
pub struct PgScheduleStore<'a> {
    pool: &'a PgPool,
}

impl<'a> PgScheduleStore<'a> {
    /// Create a store over a connection pool.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

impl ScheduleStore for PgScheduleStore<'_> {
    async fn crew_for_prefix(&self, prefix: &ZipPrefix) -> Result<Option<CrewId>, StoreError> {
        let crew_id = sqlx::query_scalar::<_, i32>(
            "SELECT crew_id FROM zip_assignment WHERE zip_prefix = $1",
        )
        .bind(prefix.as_str())
        .fetch_optional(self.pool)
        .await
        .map_err(StoreError::backend)?;

        Ok(crew_id.map(CrewId::new))
    }

    async fn insert_pickup(&self, new: NewPickup) -> Result<Pickup, StoreError> {
        let row = sqlx::query_as::<_, PickupRow>(&format!(
            r"
            INSERT INTO pickup (address, scheduled_date, timeslot, crew_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {PICKUP_COLUMNS}
            ",
        ))
        .bind(&new.address)
        .bind(new.scheduled_date)
        .bind(new.timeslot.label())
        .bind(new.crew_id.map(|c| c.as_i32()))
        .fetch_one(self.pool)
        .await
        .map_err(StoreError::backend)?;

        Pickup::try_from(row).map_err(StoreError::backend)
    }

    async fn complete_pickup(
        &self,
        id: PickupId,
        crew_id: CrewId,
    ) -> Result<Option<Pickup>, StoreError> {
        // Single conditional update: the ownership/status triple check and
        // the write are one atomic statement, so two concurrent completion
        // attempts can never both match.
        let row = sqlx::query_as::<_, PickupRow>(&format!(
            r"
            UPDATE pickup
            SET status = 'Completed', completed_at = NOW()
            WHERE id = $1 AND crew_id = $2 AND status = 'Scheduled'
            RETURNING {PICKUP_COLUMNS}
            ",
        ))
        .bind(id.as_i32())
        .bind(crew_id.as_i32())
        .fetch_optional(self.pool)
        .await
        .map_err(StoreError::backend)?;

        row.map(Pickup::try_from)
            .transpose()
            .map_err(StoreError::backend)
    }

    async fn template(&self, kind: TemplateKind) -> Result<Option<SmsTemplate>, StoreError> {
        let row = sqlx::query_as::<_, TemplateRow>(
            r"
            SELECT id, template_type, template_text
            FROM sms_template
            WHERE template_type = $1
            ",
        )
        .bind(kind.as_str())
        .fetch_optional(self.pool)
        .await
        .map_err(StoreError::backend)?;

        row.map(SmsTemplate::try_from)
            .transpose()
            .map_err(StoreError::backend)
    }
}
