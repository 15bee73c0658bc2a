//! SMS template route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use curbside_core::TemplateKind;
use curbside_core::scheduling::{FieldError, SmsTemplate};

use crate::db::TemplateRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Form data for updating a template.
#[derive(Debug, Deserialize)]
pub struct UpdateTemplateForm {
    #[serde(default)]
    pub template_text: String,
}

/// Response body for a template update.
#[derive(Debug, Serialize)]
pub struct TemplateResponse {
    pub success: bool,
    pub template: SmsTemplate,
}

/// List both notification templates.
pub async fn list(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
) -> Result<Json<Vec<SmsTemplate>>> {
    let templates = TemplateRepository::new(state.pool()).list_all().await?;
    Ok(Json(templates))
}

/// Upsert the template for a kind (`Scheduled` or `Completed`).
pub async fn update(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Path(kind): Path<String>,
    Json(form): Json<UpdateTemplateForm>,
) -> Result<Json<TemplateResponse>> {
    let kind = kind.parse::<TemplateKind>().map_err(|_| {
        AppError::NotFound("template".to_string())
    })?;

    if form.template_text.trim().is_empty() {
        return Err(AppError::Validation(vec![FieldError::new(
            "template_text",
            "Template text is required",
        )]));
    }

    let template = TemplateRepository::new(state.pool())
        .upsert(kind, &form.template_text)
        .await?;

    Ok(Json(TemplateResponse {
        success: true,
        template,
    }))
}
