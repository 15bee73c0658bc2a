//! Dashboard statistics route handler.

use axum::{Json, extract::State};
use chrono::Utc;

use crate::db::PickupRepository;
use crate::db::pickups::PickupStats;
use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Return overview counts for the admin dashboard.
pub async fn stats(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
) -> Result<Json<PickupStats>> {
    let stats = PickupRepository::new(state.pool())
        .stats(Utc::now().date_naive())
        .await?;

    Ok(Json(stats))
}
