//! Admin authentication route handlers.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_sessions::Session;

use crate::error::{AppError, Result};
use crate::middleware::{OptionalAdminAuth, clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::services::verify_admin_credentials;
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Handle admin login.
///
/// Checks the submitted pair against the single configured credential; on
/// success binds the admin flag to the session.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> Result<Json<Value>> {
    if !verify_admin_credentials(state.config(), &form.email, &form.password) {
        return Err(AppError::Unauthorized(
            "Invalid admin credentials".to_string(),
        ));
    }

    set_current_admin(&session, &CurrentAdmin { email: form.email })
        .await
        .map_err(|e| AppError::Internal(format!("failed to set session: {e}")))?;

    Ok(Json(json!({ "success": true })))
}

/// Handle admin logout. Destroys the session state unconditionally.
pub async fn logout(session: Session) -> Json<Value> {
    if let Err(e) = clear_current_admin(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }

    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {}", e);
    }

    Json(json!({ "success": true }))
}

/// Report whether the caller holds an admin session.
pub async fn status(OptionalAdminAuth(admin): OptionalAdminAuth) -> Json<Value> {
    Json(json!({ "authenticated": admin.is_some() }))
}
