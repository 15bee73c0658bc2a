//! Pickup oversight route handlers: filtered listing, reassignment, CSV
//! export.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use curbside_core::scheduling::{FieldError, Pickup};
use curbside_core::{CrewId, PickupId, PickupStatus};

use crate::db::PickupRepository;
use crate::db::pickups::{PickupFilters, PickupWithCrew};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::services::pickups_to_csv;
use crate::state::AppState;

/// Raw filter query parameters (validated into [`PickupFilters`]).
#[derive(Debug, Default, Deserialize)]
pub struct PickupFilterQuery {
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    #[serde(rename = "crewId")]
    pub crew_id: Option<i32>,
    pub status: Option<String>,
}

impl PickupFilterQuery {
    /// Validate into typed filters.
    ///
    /// # Errors
    ///
    /// Returns every field-level problem found.
    fn validate(self) -> std::result::Result<PickupFilters, Vec<FieldError>> {
        let mut errors = Vec::new();

        let start_date = parse_date(self.start_date.as_deref(), "startDate", &mut errors);
        let end_date = parse_date(self.end_date.as_deref(), "endDate", &mut errors);

        let status = match self.status.as_deref() {
            None | Some("") => None,
            Some(raw) => match raw.parse::<PickupStatus>() {
                Ok(status) => Some(status),
                Err(_) => {
                    errors.push(FieldError::new(
                        "status",
                        "Status must be Scheduled or Completed",
                    ));
                    None
                }
            },
        };

        if errors.is_empty() {
            Ok(PickupFilters {
                start_date,
                end_date,
                crew_id: self.crew_id.map(CrewId::new),
                status,
            })
        } else {
            Err(errors)
        }
    }
}

fn parse_date(
    raw: Option<&str>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<NaiveDate> {
    let raw = raw.filter(|s| !s.is_empty())?;
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(FieldError::new(field, "Must be an ISO date (YYYY-MM-DD)"));
            None
        }
    }
}

/// Body for the assign endpoint. `crewId: null` detaches the pickup.
#[derive(Debug, Deserialize)]
pub struct AssignForm {
    #[serde(rename = "crewId")]
    pub crew_id: Option<i32>,
}

/// Response body for a reassignment.
#[derive(Debug, Serialize)]
pub struct AssignResponse {
    pub success: bool,
    pub pickup: Pickup,
}

/// List pickups matching the filters, joined with crew contact info.
pub async fn list(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Query(query): Query<PickupFilterQuery>,
) -> Result<Json<Vec<PickupWithCrew>>> {
    let filters = query.validate().map_err(AppError::Validation)?;

    let pickups = PickupRepository::new(state.pool())
        .list_with_filters(&filters)
        .await?;

    Ok(Json(pickups))
}

/// Overwrite a pickup's crew reference, regardless of its status.
pub async fn assign(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Path(id): Path<i32>,
    Json(form): Json<AssignForm>,
) -> Result<Json<AssignResponse>> {
    let pickup = PickupRepository::new(state.pool())
        .assign_crew(PickupId::new(id), form.crew_id.map(CrewId::new))
        .await?
        .ok_or_else(|| AppError::NotFound("pickup".to_string()))?;

    Ok(Json(AssignResponse {
        success: true,
        pickup,
    }))
}

/// Export filtered pickups as CSV.
pub async fn export(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Query(query): Query<PickupFilterQuery>,
) -> Result<Response> {
    let filters = query.validate().map_err(AppError::Validation)?;

    let pickups = PickupRepository::new(state.pool())
        .list_with_filters(&filters)
        .await?;

    let csv = pickups_to_csv(&pickups);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=pickups-export.csv",
            ),
        ],
        csv,
    )
        .into_response())
}
