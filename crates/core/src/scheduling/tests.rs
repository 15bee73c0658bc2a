//! Lifecycle tests against an in-memory store and a recording SMS gateway.

#![allow(clippy::unwrap_used)]

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use chrono::{NaiveDate, Utc};

use super::*;
use crate::types::{
    CrewId, PickupId, PickupStatus, TemplateId, TemplateKind, Timeslot, ZipPrefix,
};

// =============================================================================
// Fakes
// =============================================================================

/// In-memory [`ScheduleStore`] fake.
#[derive(Default)]
struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    pickups: BTreeMap<i32, Pickup>,
    routes: HashMap<String, CrewId>,
    templates: HashMap<TemplateKind, String>,
    next_pickup_id: i32,
}

impl MemoryStore {
    fn with_route(self, prefix: &str, crew: CrewId) -> Self {
        self.inner
            .lock()
            .unwrap()
            .routes
            .insert(prefix.to_owned(), crew);
        self
    }

    fn with_template(self, kind: TemplateKind, text: &str) -> Self {
        self.inner
            .lock()
            .unwrap()
            .templates
            .insert(kind, text.to_owned());
        self
    }

    fn pickup(&self, id: PickupId) -> Option<Pickup> {
        self.inner.lock().unwrap().pickups.get(&id.as_i32()).cloned()
    }

    fn pickup_count(&self) -> usize {
        self.inner.lock().unwrap().pickups.len()
    }
}

impl ScheduleStore for MemoryStore {
    async fn crew_for_prefix(&self, prefix: &ZipPrefix) -> Result<Option<CrewId>, StoreError> {
        Ok(self.inner.lock().unwrap().routes.get(prefix.as_str()).copied())
    }

    async fn insert_pickup(&self, new: NewPickup) -> Result<Pickup, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_pickup_id += 1;
        let pickup = Pickup {
            id: PickupId::new(inner.next_pickup_id),
            address: new.address,
            scheduled_date: new.scheduled_date,
            timeslot: new.timeslot,
            status: PickupStatus::Scheduled,
            crew_id: new.crew_id,
            created_at: Utc::now(),
            completed_at: None,
        };
        inner.pickups.insert(pickup.id.as_i32(), pickup.clone());
        Ok(pickup)
    }

    async fn complete_pickup(
        &self,
        id: PickupId,
        crew_id: CrewId,
    ) -> Result<Option<Pickup>, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let Some(pickup) = inner.pickups.get_mut(&id.as_i32()) else {
            return Ok(None);
        };
        // Mirrors the conditional UPDATE: all three checks in one step.
        if pickup.crew_id != Some(crew_id) || pickup.status != PickupStatus::Scheduled {
            return Ok(None);
        }
        pickup.status = PickupStatus::Completed;
        pickup.completed_at = Some(Utc::now());
        Ok(Some(pickup.clone()))
    }

    async fn template(&self, kind: TemplateKind) -> Result<Option<SmsTemplate>, StoreError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .templates
            .get(&kind)
            .map(|text| SmsTemplate {
                id: TemplateId::new(1),
                template_type: kind,
                template_text: text.clone(),
            }))
    }
}

/// Recording [`SmsGateway`] fake, optionally failing every send.
#[derive(Default)]
struct RecordingGateway {
    sent: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingGateway {
    const fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    fn messages(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl SmsGateway for RecordingGateway {
    async fn deliver(&self, to: &str, body: &str) -> Result<(), DeliveryError> {
        if self.fail {
            return Err(DeliveryError::Failed("provider unavailable".to_owned()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_owned(), body.to_owned()));
        Ok(())
    }
}

// =============================================================================
// Helpers
// =============================================================================

const CREW_1: CrewId = CrewId::new(1);
const CREW_2: CrewId = CrewId::new(2);

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, 30).unwrap()
}

fn tomorrow() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

fn intake(address: &str) -> ScheduleRequest {
    ScheduleRequest {
        address: address.to_owned(),
        date: tomorrow(),
        timeslot: Timeslot::LateMorning,
    }
}

fn routed_store() -> MemoryStore {
    MemoryStore::default()
        .with_route("627", CREW_1)
        .with_template(
            TemplateKind::Scheduled,
            "We will be there on [scheduled_date] between [timeslot] to pick up your appliance.",
        )
        .with_template(
            TemplateKind::Completed,
            "Your pickup at [address] has been completed. Thank you!",
        )
}

fn assert_completion_invariant(pickup: &Pickup) {
    assert_eq!(
        pickup.completed_at.is_some(),
        pickup.status == PickupStatus::Completed,
        "completed_at must be set iff status is Completed"
    );
}

// =============================================================================
// Routing resolver
// =============================================================================

#[tokio::test]
async fn resolve_crew_matches_assigned_prefix() {
    let store = routed_store();
    let sms = RecordingGateway::default();
    let scheduler = Scheduler::new(&store, &sms);

    let crew = scheduler
        .resolve_crew("12 Main St, Springfield, 62704")
        .await
        .unwrap();
    assert_eq!(crew, Some(CREW_1));
}

#[tokio::test]
async fn resolve_crew_without_assignment_is_none() {
    let store = MemoryStore::default();
    let sms = RecordingGateway::default();
    let scheduler = Scheduler::new(&store, &sms);

    let crew = scheduler
        .resolve_crew("12 Main St, Springfield, 62704")
        .await
        .unwrap();
    assert_eq!(crew, None);
}

#[tokio::test]
async fn resolve_crew_without_zip_is_none() {
    let store = routed_store();
    let sms = RecordingGateway::default();
    let scheduler = Scheduler::new(&store, &sms);

    let crew = scheduler
        .resolve_crew("12 Main St, Springfield")
        .await
        .unwrap();
    assert_eq!(crew, None);
}

#[tokio::test]
async fn resolve_crew_only_considers_first_token() {
    // "10001" appears before "62704"; only the first candidate is tried,
    // and it has no assignment.
    let store = routed_store();
    let sms = RecordingGateway::default();
    let scheduler = Scheduler::new(&store, &sms);

    let crew = scheduler
        .resolve_crew("PO Box 10001, Springfield, 62704")
        .await
        .unwrap();
    assert_eq!(crew, None);
}

// =============================================================================
// Schedule (intake)
// =============================================================================

#[tokio::test]
async fn schedule_routes_to_matching_crew() {
    let store = routed_store();
    let sms = RecordingGateway::default();
    let scheduler = Scheduler::new(&store, &sms);

    let pickup = scheduler
        .schedule(intake("12 Main St, Springfield, 62704"), today())
        .await
        .unwrap();

    assert_eq!(pickup.crew_id, Some(CREW_1));
    assert_eq!(pickup.status, PickupStatus::Scheduled);
    assert!(pickup.completed_at.is_none());
    assert_completion_invariant(&pickup);
}

#[tokio::test]
async fn schedule_without_matching_route_is_unassigned() {
    let store = MemoryStore::default();
    let sms = RecordingGateway::default();
    let scheduler = Scheduler::new(&store, &sms);

    let pickup = scheduler
        .schedule(intake("12 Main St, Springfield, 62704"), today())
        .await
        .unwrap();

    assert_eq!(pickup.crew_id, None);
    assert_eq!(pickup.status, PickupStatus::Scheduled);
}

#[tokio::test]
async fn schedule_sends_substituted_notification() {
    let store = routed_store();
    let sms = RecordingGateway::default();
    let scheduler = Scheduler::new(&store, &sms);

    scheduler
        .schedule(
            intake("12 Main St, Springfield, 62704, 555-867-5309"),
            today(),
        )
        .await
        .unwrap();

    let messages = sms.messages();
    assert_eq!(messages.len(), 1);
    let (to, body) = &messages[0];
    assert_eq!(to, "555-867-5309");
    assert_eq!(
        body,
        "We will be there on 2024-05-01 between 10 AM–12 PM to pick up your appliance."
    );
}

#[tokio::test]
async fn schedule_skips_notification_without_phone() {
    let store = routed_store();
    let sms = RecordingGateway::default();
    let scheduler = Scheduler::new(&store, &sms);

    scheduler
        .schedule(intake("12 Main St, Springfield, 62704"), today())
        .await
        .unwrap();

    assert!(sms.messages().is_empty());
}

#[tokio::test]
async fn schedule_succeeds_without_template() {
    let store = MemoryStore::default().with_route("627", CREW_1);
    let sms = RecordingGateway::default();
    let scheduler = Scheduler::new(&store, &sms);

    let pickup = scheduler
        .schedule(
            intake("12 Main St, Springfield, 62704, 555-867-5309"),
            today(),
        )
        .await
        .unwrap();

    assert_eq!(pickup.status, PickupStatus::Scheduled);
    assert!(sms.messages().is_empty());
}

#[tokio::test]
async fn schedule_succeeds_when_delivery_fails() {
    let store = routed_store();
    let sms = RecordingGateway::failing();
    let scheduler = Scheduler::new(&store, &sms);

    let pickup = scheduler
        .schedule(
            intake("12 Main St, Springfield, 62704, 555-867-5309"),
            today(),
        )
        .await
        .unwrap();

    // Delivery failure is swallowed; the pickup stands.
    assert_eq!(pickup.status, PickupStatus::Scheduled);
    assert!(store.pickup(pickup.id).is_some());
}

#[tokio::test]
async fn schedule_rejects_past_date() {
    let store = routed_store();
    let sms = RecordingGateway::default();
    let scheduler = Scheduler::new(&store, &sms);

    let mut request = intake("12 Main St, Springfield, 62704");
    request.date = NaiveDate::from_ymd_opt(2024, 4, 29).unwrap();

    let err = scheduler.schedule(request, today()).await.unwrap_err();
    match err {
        SchedulingError::Validation(errors) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, "desired_date");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(store.pickup_count(), 0);
    assert!(sms.messages().is_empty());
}

#[tokio::test]
async fn schedule_accepts_today() {
    let store = routed_store();
    let sms = RecordingGateway::default();
    let scheduler = Scheduler::new(&store, &sms);

    let mut request = intake("12 Main St, Springfield, 62704");
    request.date = today();

    assert!(scheduler.schedule(request, today()).await.is_ok());
}

// =============================================================================
// Complete
// =============================================================================

#[tokio::test]
async fn complete_marks_pickup_and_notifies() {
    let store = routed_store();
    let sms = RecordingGateway::default();
    let scheduler = Scheduler::new(&store, &sms);

    let pickup = scheduler
        .schedule(
            intake("12 Main St, Springfield, 62704, 555-867-5309"),
            today(),
        )
        .await
        .unwrap();

    let completed = scheduler.complete(pickup.id, CREW_1).await.unwrap();
    assert_eq!(completed.status, PickupStatus::Completed);
    assert!(completed.completed_at.is_some());
    assert_completion_invariant(&completed);

    let messages = sms.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(
        messages[1].1,
        "Your pickup at 12 Main St, Springfield, 62704, 555-867-5309 has been completed. Thank you!"
    );
}

#[tokio::test]
async fn complete_rejects_foreign_crew() {
    let store = routed_store();
    let sms = RecordingGateway::default();
    let scheduler = Scheduler::new(&store, &sms);

    let pickup = scheduler
        .schedule(intake("12 Main St, Springfield, 62704"), today())
        .await
        .unwrap();

    let err = scheduler.complete(pickup.id, CREW_2).await.unwrap_err();
    assert!(matches!(err, SchedulingError::NotFound));

    let stored = store.pickup(pickup.id).unwrap();
    assert_eq!(stored.status, PickupStatus::Scheduled);
    assert!(stored.completed_at.is_none());
    assert_completion_invariant(&stored);
}

#[tokio::test]
async fn complete_rejects_double_completion() {
    let store = routed_store();
    let sms = RecordingGateway::default();
    let scheduler = Scheduler::new(&store, &sms);

    let pickup = scheduler
        .schedule(intake("12 Main St, Springfield, 62704"), today())
        .await
        .unwrap();

    let completed = scheduler.complete(pickup.id, CREW_1).await.unwrap();
    let first_completed_at = completed.completed_at;

    let err = scheduler.complete(pickup.id, CREW_1).await.unwrap_err();
    assert!(matches!(err, SchedulingError::NotFound));

    // The rejected call must not touch the record.
    let stored = store.pickup(pickup.id).unwrap();
    assert_eq!(stored.completed_at, first_completed_at);
    assert_completion_invariant(&stored);
}

#[tokio::test]
async fn complete_rejects_unknown_pickup() {
    let store = routed_store();
    let sms = RecordingGateway::default();
    let scheduler = Scheduler::new(&store, &sms);

    let err = scheduler
        .complete(PickupId::new(999), CREW_1)
        .await
        .unwrap_err();
    assert!(matches!(err, SchedulingError::NotFound));
}

#[tokio::test]
async fn complete_succeeds_when_delivery_fails() {
    let store = routed_store();
    let sms = RecordingGateway::failing();
    let scheduler = Scheduler::new(&store, &sms);

    let pickup = scheduler
        .schedule(
            intake("12 Main St, Springfield, 62704, 555-867-5309"),
            today(),
        )
        .await
        .unwrap();

    let completed = scheduler.complete(pickup.id, CREW_1).await.unwrap();
    assert_eq!(completed.status, PickupStatus::Completed);
}
