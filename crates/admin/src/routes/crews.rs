//! Crew management route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use curbside_core::scheduling::{Crew, FieldError};
use curbside_core::{CrewId, Email, ZipPrefix};

use crate::db::CrewRepository;
use crate::db::crews::{CrewPatch, NewCrew};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::services::hash_password;
use crate::state::AppState;

/// Minimum crew password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Form data for creating a crew.
#[derive(Debug, Deserialize)]
pub struct CreateCrewForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub zip_prefixes: Vec<String>,
}

/// Form data for a partial crew update. Absent fields are left unchanged;
/// an empty password means "keep the current one".
#[derive(Debug, Deserialize)]
pub struct UpdateCrewForm {
    pub email: Option<String>,
    pub password: Option<String>,
    pub display_name: Option<String>,
    pub zip_prefixes: Option<Vec<String>>,
}

/// Response body for crew create/update.
#[derive(Debug, Serialize)]
pub struct CrewResponse {
    pub success: bool,
    pub crew: Crew,
}

fn parse_prefixes(raw: &[String], errors: &mut Vec<FieldError>) -> Vec<ZipPrefix> {
    raw.iter()
        .filter_map(|p| match ZipPrefix::parse(p.trim()) {
            Ok(prefix) => Some(prefix),
            Err(e) => {
                errors.push(FieldError::new("zip_prefixes", format!("{p:?}: {e}")));
                None
            }
        })
        .collect()
}

/// List all crews.
pub async fn list(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
) -> Result<Json<Vec<Crew>>> {
    let crews = CrewRepository::new(state.pool()).list_all().await?;
    Ok(Json(crews))
}

/// Create a crew. The password is argon2-hashed before persisting.
pub async fn create(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Json(form): Json<CreateCrewForm>,
) -> Result<Json<CrewResponse>> {
    let mut errors = Vec::new();

    let email = match Email::parse(&form.email) {
        Ok(email) => Some(email),
        Err(e) => {
            errors.push(FieldError::new("email", e.to_string()));
            None
        }
    };

    if form.password.len() < MIN_PASSWORD_LENGTH {
        errors.push(FieldError::new(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
        ));
    }

    if form.display_name.trim().is_empty() {
        errors.push(FieldError::new("display_name", "Display name is required"));
    }

    let zip_prefixes = parse_prefixes(&form.zip_prefixes, &mut errors);

    let Some(email) = email else {
        return Err(AppError::Validation(errors));
    };
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let password_hash =
        hash_password(&form.password).map_err(|e| AppError::Internal(e.to_string()))?;

    let crew = CrewRepository::new(state.pool())
        .create(NewCrew {
            email,
            password_hash,
            display_name: form.display_name.trim().to_owned(),
            zip_prefixes,
        })
        .await?;

    Ok(Json(CrewResponse {
        success: true,
        crew,
    }))
}

/// Apply a partial update to a crew. The password is only re-hashed (and
/// replaced) when a non-empty one is supplied.
pub async fn update(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Path(id): Path<i32>,
    Json(form): Json<UpdateCrewForm>,
) -> Result<Json<CrewResponse>> {
    let mut errors = Vec::new();

    let email = match form.email.as_deref() {
        None | Some("") => None,
        Some(raw) => match Email::parse(raw) {
            Ok(email) => Some(email),
            Err(e) => {
                errors.push(FieldError::new("email", e.to_string()));
                None
            }
        },
    };

    let password_hash = match form.password.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(password) if password.len() < MIN_PASSWORD_LENGTH => {
            errors.push(FieldError::new(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
            ));
            None
        }
        Some(password) => Some(
            hash_password(password).map_err(|e| AppError::Internal(e.to_string()))?,
        ),
    };

    let zip_prefixes = form
        .zip_prefixes
        .as_deref()
        .map(|raw| parse_prefixes(raw, &mut errors));

    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let crew = CrewRepository::new(state.pool())
        .update(
            CrewId::new(id),
            CrewPatch {
                email,
                password_hash,
                display_name: form.display_name,
                zip_prefixes,
            },
        )
        .await?
        .ok_or_else(|| AppError::NotFound("crew".to_string()))?;

    Ok(Json(CrewResponse {
        success: true,
        crew,
    }))
}

/// Delete a crew, detaching its pickups and removing its ZIP assignments.
pub async fn remove(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let deleted = CrewRepository::new(state.pool())
        .delete(CrewId::new(id))
        .await?;

    Ok(Json(json!({ "success": deleted })))
}
