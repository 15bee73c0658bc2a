//! The storage seam for the pickup lifecycle.

use thiserror::Error;

use super::model::{NewPickup, Pickup, SmsTemplate};
use crate::types::{CrewId, PickupId, TemplateKind, ZipPrefix};

/// Errors surfaced by a [`ScheduleStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store failed (connection loss, constraint trouble, ...).
    #[error("storage error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wrap a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(err))
    }
}

/// Storage operations required by the pickup lifecycle.
///
/// Deliberately narrower than full CRUD: only what [`super::Scheduler`]
/// needs. Management CRUD lives in the admin binary's repositories.
#[allow(async_fn_in_trait)]
pub trait ScheduleStore {
    /// Look up the crew owning an exact ZIP prefix, if any.
    async fn crew_for_prefix(&self, prefix: &ZipPrefix) -> Result<Option<CrewId>, StoreError>;

    /// Persist a new pickup with status `Scheduled` and no completion
    /// timestamp.
    async fn insert_pickup(&self, new: NewPickup) -> Result<Pickup, StoreError>;

    /// Atomically complete a pickup.
    ///
    /// Must be a single conditional update equivalent to
    /// `UPDATE ... WHERE id = ? AND crew_id = ? AND status = 'Scheduled'`:
    /// returns the updated record when exactly that row matched, `None`
    /// otherwise. The caller cannot distinguish a missing pickup, a foreign
    /// crew's pickup, or an already-completed one - by design.
    async fn complete_pickup(
        &self,
        id: PickupId,
        crew_id: CrewId,
    ) -> Result<Option<Pickup>, StoreError>;

    /// Read the named notification template, if configured.
    async fn template(&self, kind: TemplateKind) -> Result<Option<SmsTemplate>, StoreError>;
}
