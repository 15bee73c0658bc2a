//! Authentication middleware and extractors for the crew context.
//!
//! Provides an extractor for requiring crew authentication in route
//! handlers. All crew-scoped queries derive their crew id from this
//! extractor, never from request input.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentCrew, session_keys};

/// Extractor that requires crew authentication.
///
/// If no crew is logged in, returns 401 Unauthorized for API requests and a
/// redirect to the login page otherwise.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireCrewAuth(crew): RequireCrewAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", crew.display_name)
/// }
/// ```
pub struct RequireCrewAuth(pub CurrentCrew);

/// Error returned when crew authentication is required but missing.
pub enum CrewAuthRejection {
    /// Redirect to login page (for interactive requests).
    RedirectToLogin,
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl IntoResponse for CrewAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/crew/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireCrewAuth
where
    S: Send + Sync,
{
    type Rejection = CrewAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(CrewAuthRejection::Unauthorized)?;

        // Get the current crew from the session
        let crew: CurrentCrew = session
            .get(session_keys::CURRENT_CREW)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| {
                // Check if this is an API request
                let is_api = parts.uri.path().starts_with("/api/");
                if is_api {
                    CrewAuthRejection::Unauthorized
                } else {
                    CrewAuthRejection::RedirectToLogin
                }
            })?;

        Ok(Self(crew))
    }
}

/// Helper to set the current crew in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_crew(
    session: &Session,
    crew: &CurrentCrew,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_CREW, crew).await
}

/// Helper to clear the current crew from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_crew(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<CurrentCrew>(session_keys::CURRENT_CREW).await?;
    Ok(())
}
