//! Public intake route handler.

use axum::{Json, extract::State};
use chrono::Utc;
use serde::Serialize;

use curbside_core::scheduling::{Pickup, Scheduler};

use crate::db::PgScheduleStore;
use crate::error::{AppError, Result};
use crate::models::SchedulePickupForm;
use crate::state::AppState;

/// Response body for a successful intake.
#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub success: bool,
    pub pickup: Pickup,
    pub message: String,
}

/// Handle a public pickup request.
///
/// Validates the form, routes the pickup to a crew by ZIP prefix, persists
/// it, and sends the confirmation SMS best-effort.
pub async fn schedule(
    State(state): State<AppState>,
    Json(form): Json<SchedulePickupForm>,
) -> Result<Json<ScheduleResponse>> {
    let request = form.validate().map_err(AppError::Validation)?;

    let store = PgScheduleStore::new(state.pool());
    let scheduler = Scheduler::new(&store, state.sms());

    let pickup = scheduler.schedule(request, Utc::now().date_naive()).await?;

    let message = format!(
        "Thank you—your pickup is scheduled for {} {}.",
        pickup.scheduled_date, pickup.timeslot
    );

    Ok(Json(ScheduleResponse {
        success: true,
        pickup,
        message,
    }))
}
