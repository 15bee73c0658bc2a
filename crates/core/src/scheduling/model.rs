//! Entity records persisted by the record store.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{
    CrewId, Email, PickupId, PickupStatus, TemplateId, TemplateKind, Timeslot, ZipPrefix,
    ZipRouteId,
};

/// A field team capable of servicing assigned postal-prefix regions.
///
/// The password hash is deliberately not part of this record; repositories
/// expose it separately to the authentication path only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crew {
    pub id: CrewId,
    pub email: Email,
    pub display_name: String,
    /// Descriptive list of prefixes this crew covers. Routing reads the
    /// `zip_assignment` table, not this field.
    pub zip_prefixes: Vec<ZipPrefix>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One scheduled appliance-collection job.
///
/// Invariant: `completed_at` is `Some` if and only if `status` is
/// [`PickupStatus::Completed`]. Pickups are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: PickupId,
    /// Free text containing an embedded postal code (and sometimes a
    /// contact phone number).
    pub address: String,
    pub scheduled_date: NaiveDate,
    pub timeslot: Timeslot,
    pub status: PickupStatus,
    /// Owning crew, if any. Weak reference: set to `None` when the crew is
    /// deleted; the pickup itself survives.
    pub crew_id: Option<CrewId>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Fields for creating a pickup. Status starts as `Scheduled` and
/// `completed_at` as `None`; the store assigns id and `created_at`.
#[derive(Debug, Clone)]
pub struct NewPickup {
    pub address: String,
    pub scheduled_date: NaiveDate,
    pub timeslot: Timeslot,
    pub crew_id: Option<CrewId>,
}

/// A postal-prefix routing rule: prefix -> owning crew.
///
/// Strongly references the crew; deleted with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZipRoute {
    pub id: ZipRouteId,
    pub zip_prefix: ZipPrefix,
    pub crew_id: CrewId,
}

/// A named notification template with `[placeholder]` variables.
///
/// Exactly one row exists per [`TemplateKind`] (upsert semantics).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsTemplate {
    pub id: TemplateId,
    pub template_type: TemplateKind,
    pub template_text: String,
}
