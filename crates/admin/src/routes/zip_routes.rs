//! ZIP routing rule route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use curbside_core::scheduling::{FieldError, ZipRoute};
use curbside_core::{CrewId, ZipPrefix, ZipRouteId};

use crate::db::ZipRouteRepository;
use crate::db::zip_routes::ZipRouteWithCrew;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Form data for creating (upserting) a routing rule.
#[derive(Debug, Deserialize)]
pub struct CreateZipRouteForm {
    #[serde(default)]
    pub zip_prefix: String,
    pub crew_id: Option<i32>,
}

/// Response body for a created rule.
#[derive(Debug, Serialize)]
pub struct ZipRouteResponse {
    pub success: bool,
    pub zip_route: ZipRoute,
}

/// List all routing rules with crew names.
pub async fn list(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
) -> Result<Json<Vec<ZipRouteWithCrew>>> {
    let routes = ZipRouteRepository::new(state.pool()).list_all().await?;
    Ok(Json(routes))
}

/// Create a routing rule. Keyed on the prefix: an existing rule for the
/// same prefix is replaced.
pub async fn create(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Json(form): Json<CreateZipRouteForm>,
) -> Result<Json<ZipRouteResponse>> {
    let mut errors = Vec::new();

    let prefix = match ZipPrefix::parse(form.zip_prefix.trim()) {
        Ok(prefix) => Some(prefix),
        Err(e) => {
            errors.push(FieldError::new("zip_prefix", e.to_string()));
            None
        }
    };

    if form.crew_id.is_none() {
        errors.push(FieldError::new("crew_id", "Crew is required"));
    }

    let (Some(prefix), Some(crew_id)) = (prefix, form.crew_id) else {
        return Err(AppError::Validation(errors));
    };

    let zip_route = ZipRouteRepository::new(state.pool())
        .upsert(&prefix, CrewId::new(crew_id))
        .await?;

    Ok(Json(ZipRouteResponse {
        success: true,
        zip_route,
    }))
}

/// Delete a routing rule by id.
pub async fn remove(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let deleted = ZipRouteRepository::new(state.pool())
        .delete(ZipRouteId::new(id))
        .await?;

    Ok(Json(json!({ "success": deleted })))
}
