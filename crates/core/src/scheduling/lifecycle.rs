//! The pickup lifecycle: create -> assign -> complete.

use chrono::NaiveDate;

use super::error::{FieldError, SchedulingError};
use super::model::{NewPickup, Pickup};
use super::notify::{self, NotifyOutcome, SmsGateway};
use super::store::{ScheduleStore, StoreError};
use crate::types::{CrewId, PickupId, TemplateKind, Timeslot, extract_zip_prefix};

/// A boundary-validated intake request.
///
/// Field types already guarantee a well-formed date and a known timeslot;
/// [`Scheduler::schedule`] still enforces the today-or-future rule.
#[derive(Debug, Clone)]
pub struct ScheduleRequest {
    pub address: String,
    pub date: NaiveDate,
    pub timeslot: Timeslot,
}

/// Drives pickup state transitions against an injected store and SMS
/// gateway.
///
/// `Scheduled -> Completed` is one-way and terminal; there is no
/// cancellation. Notification dispatch is best-effort: its failure never
/// rolls back or fails the lifecycle mutation.
pub struct Scheduler<'a, S, G> {
    store: &'a S,
    sms: &'a G,
}

impl<'a, S, G> Scheduler<'a, S, G>
where
    S: ScheduleStore,
    G: SmsGateway,
{
    /// Create a scheduler over a store and an SMS gateway.
    #[must_use]
    pub const fn new(store: &'a S, sms: &'a G) -> Self {
        Self { store, sms }
    }

    /// Determine the owning crew for an address by ZIP-prefix routing.
    ///
    /// Scans the address for the first 5-digit postal token, takes its
    /// 3-digit prefix, and looks up an exact-match assignment. `None` when
    /// the address has no postal token or no assignment matches.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store lookup fails.
    pub async fn resolve_crew(&self, address: &str) -> Result<Option<CrewId>, StoreError> {
        match extract_zip_prefix(address) {
            Some(prefix) => self.store.crew_for_prefix(&prefix).await,
            None => Ok(None),
        }
    }

    /// Create a pickup from a public intake request.
    ///
    /// Validates the date is `today` or later, routes the pickup to a crew
    /// (possibly none), persists it as `Scheduled`, and dispatches the
    /// `Scheduled` notification best-effort.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulingError::Validation`] for a past date and
    /// [`SchedulingError::Store`] if persistence fails.
    pub async fn schedule(
        &self,
        request: ScheduleRequest,
        today: NaiveDate,
    ) -> Result<Pickup, SchedulingError> {
        if request.date < today {
            return Err(SchedulingError::Validation(vec![FieldError::new(
                "desired_date",
                "date must be today or in the future",
            )]));
        }

        let crew_id = self.resolve_crew(&request.address).await?;

        let pickup = self
            .store
            .insert_pickup(NewPickup {
                address: request.address,
                scheduled_date: request.date,
                timeslot: request.timeslot,
                crew_id,
            })
            .await?;

        let date = pickup.scheduled_date.to_string();
        self.notify(
            TemplateKind::Scheduled,
            &pickup,
            &[
                ("scheduled_date", date.as_str()),
                ("timeslot", pickup.timeslot.label()),
            ],
        )
        .await;

        Ok(pickup)
    }

    /// Mark a pickup completed on behalf of a crew.
    ///
    /// Relies on the store's single conditional update: the pickup must
    /// exist, belong to `crew_id`, and still be `Scheduled`, or the call
    /// fails with [`SchedulingError::NotFound`]. Two concurrent completions
    /// can therefore never both succeed. On success the `Completed`
    /// notification is dispatched best-effort.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulingError::NotFound`] when no matching row exists
    /// and [`SchedulingError::Store`] if the update itself fails.
    pub async fn complete(
        &self,
        pickup_id: PickupId,
        crew_id: CrewId,
    ) -> Result<Pickup, SchedulingError> {
        let pickup = self
            .store
            .complete_pickup(pickup_id, crew_id)
            .await?
            .ok_or(SchedulingError::NotFound)?;

        self.notify(
            TemplateKind::Completed,
            &pickup,
            &[("address", pickup.address.as_str())],
        )
        .await;

        Ok(pickup)
    }

    async fn notify(
        &self,
        kind: TemplateKind,
        pickup: &Pickup,
        vars: &[(&str, &str)],
    ) -> NotifyOutcome {
        let to = notify::extract_phone(&pickup.address);
        notify::dispatch(self.store, self.sms, kind, to.as_deref(), vars).await
    }
}
