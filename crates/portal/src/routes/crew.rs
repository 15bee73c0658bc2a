//! Crew route handlers: login, profile, pickup listing, completion.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use serde_json::{Value, json};
use tower_sessions::Session;

use curbside_core::scheduling::{Pickup, Scheduler};
use curbside_core::{CrewId, Email, PickupId};

use crate::db::{CrewRepository, PgScheduleStore, PickupRepository};
use crate::error::{AppError, Result};
use crate::middleware::{RequireCrewAuth, clear_current_crew, set_current_crew};
use crate::models::{CurrentCrew, LoginForm};
use crate::services::CrewAuthService;
use crate::state::AppState;

/// Response body for a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub crew: CrewSummary,
}

/// The subset of crew data returned to the client on login.
#[derive(Debug, Serialize)]
pub struct CrewSummary {
    pub id: CrewId,
    pub display_name: String,
}

/// Crew profile response.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: CrewId,
    pub display_name: String,
    pub email: Email,
}

/// Response body for a completed pickup.
#[derive(Debug, Serialize)]
pub struct CompleteResponse {
    pub success: bool,
    pub pickup: Pickup,
}

/// Handle crew login.
///
/// Verifies the submitted email/password pair against the crew's stored
/// argon2 hash and binds the crew identity to the session. Failure is a
/// generic "invalid credentials" regardless of which field was wrong.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> Result<Json<LoginResponse>> {
    let auth = CrewAuthService::new(state.pool());
    let crew = auth.login(&form.email, &form.password).await?;

    let current = CurrentCrew {
        id: crew.id,
        email: crew.email,
        display_name: crew.display_name.clone(),
    };

    set_current_crew(&session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("failed to set session: {e}")))?;

    Ok(Json(LoginResponse {
        success: true,
        crew: CrewSummary {
            id: crew.id,
            display_name: crew.display_name,
        },
    }))
}

/// Handle crew logout. Destroys the session state unconditionally.
pub async fn logout(session: Session) -> Json<Value> {
    if let Err(e) = clear_current_crew(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }

    // Also destroy the entire session
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {}", e);
    }

    Json(json!({ "success": true }))
}

/// Return the logged-in crew's profile, read fresh from the store.
pub async fn profile(
    State(state): State<AppState>,
    RequireCrewAuth(current): RequireCrewAuth,
) -> Result<Json<ProfileResponse>> {
    let crew = CrewRepository::new(state.pool())
        .get_by_id(current.id)
        .await?
        .ok_or_else(|| AppError::NotFound("crew".to_string()))?;

    Ok(Json(ProfileResponse {
        id: crew.id,
        display_name: crew.display_name,
        email: crew.email,
    }))
}

/// List the crew's scheduled pickups, date then timeslot ascending.
///
/// The query is implicitly scoped to the session's crew id.
pub async fn pickups(
    State(state): State<AppState>,
    RequireCrewAuth(current): RequireCrewAuth,
) -> Result<Json<Vec<Pickup>>> {
    let pickups = PickupRepository::new(state.pool())
        .list_scheduled_for_crew(current.id)
        .await?;

    Ok(Json(pickups))
}

/// Mark a pickup completed on behalf of the logged-in crew.
///
/// The pickup must exist, belong to this crew, and still be scheduled;
/// otherwise the request fails with 404 without revealing which check
/// failed.
pub async fn complete(
    State(state): State<AppState>,
    RequireCrewAuth(current): RequireCrewAuth,
    Path(id): Path<i32>,
) -> Result<Json<CompleteResponse>> {
    let store = PgScheduleStore::new(state.pool());
    let scheduler = Scheduler::new(&store, state.sms());

    let pickup = scheduler.complete(PickupId::new(id), current.id).await?;

    Ok(Json(CompleteResponse {
        success: true,
        pickup,
    }))
}
