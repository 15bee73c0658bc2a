//! The scheduling domain: entities, storage seam, pickup lifecycle, and
//! notification dispatch.
//!
//! The lifecycle is written against two traits so it stays testable without
//! a web framework or a database:
//!
//! - [`ScheduleStore`] - the storage operations the lifecycle needs (ZIP
//!   lookup, pickup insert, atomic conditional completion, template read)
//! - [`SmsGateway`] - outbound SMS delivery
//!
//! Production wires these to `PostgreSQL` and Twilio in the portal binary;
//! tests use in-memory fakes.

mod error;
mod lifecycle;
mod model;
mod notify;
mod store;

pub use error::{FieldError, SchedulingError};
pub use lifecycle::{ScheduleRequest, Scheduler};
pub use model::{Crew, NewPickup, Pickup, SmsTemplate, ZipRoute};
pub use notify::{DeliveryError, NotifyOutcome, SmsGateway, dispatch, extract_phone, render_template};
pub use store::{ScheduleStore, StoreError};

#[cfg(test)]
mod tests;
