//! Boundary validation of request bodies.
//!
//! Raw JSON bodies are deserialized into loosely-typed forms, then
//! validated into strongly-typed requests before they reach lifecycle
//! logic. Validation collects every field problem rather than stopping at
//! the first.

use chrono::NaiveDate;
use serde::Deserialize;

use curbside_core::Timeslot;
use curbside_core::scheduling::{FieldError, ScheduleRequest};

/// Minimum address length for the public intake form.
const MIN_ADDRESS_LENGTH: usize = 10;

/// Public scheduling form data.
#[derive(Debug, Deserialize)]
pub struct SchedulePickupForm {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub desired_date: String,
    #[serde(default)]
    pub timeslot: String,
}

impl SchedulePickupForm {
    /// Validate into a typed [`ScheduleRequest`].
    ///
    /// # Errors
    ///
    /// Returns every field-level problem found.
    pub fn validate(self) -> Result<ScheduleRequest, Vec<FieldError>> {
        let mut errors = Vec::new();

        let address = self.address.trim().to_owned();
        if address.len() < MIN_ADDRESS_LENGTH {
            errors.push(FieldError::new(
                "address",
                format!("Address must be at least {MIN_ADDRESS_LENGTH} characters"),
            ));
        }

        let date = if self.desired_date.is_empty() {
            errors.push(FieldError::new("desired_date", "Date is required"));
            None
        } else {
            match NaiveDate::parse_from_str(&self.desired_date, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.push(FieldError::new(
                        "desired_date",
                        "Date must be an ISO date (YYYY-MM-DD)",
                    ));
                    None
                }
            }
        };

        let timeslot = match self.timeslot.parse::<Timeslot>() {
            Ok(slot) => Some(slot),
            Err(_) => {
                errors.push(FieldError::new("timeslot", "Please select a valid time slot"));
                None
            }
        };

        match (date, timeslot) {
            (Some(date), Some(timeslot)) if errors.is_empty() => Ok(ScheduleRequest {
                address,
                date,
                timeslot,
            }),
            _ => Err(errors),
        }
    }
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}
