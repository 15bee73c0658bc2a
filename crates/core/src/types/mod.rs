//! Core domain types.
//!
//! Newtype wrappers and enums shared across the portal, admin, and CLI
//! crates. All types here are plain data: parsing and validation only.

mod email;
mod id;
mod status;
mod timeslot;
mod zip;

pub use email::{Email, EmailError};
pub use id::{CrewId, PickupId, TemplateId, ZipRouteId};
pub use status::{PickupStatus, StatusParseError, TemplateKind};
pub use timeslot::{Timeslot, TimeslotParseError};
pub use zip::{ZipPrefix, ZipPrefixError, extract_zip_prefix};
