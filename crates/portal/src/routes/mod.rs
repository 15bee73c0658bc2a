//! HTTP route handlers for the portal.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                    - Liveness check
//! GET  /health/ready              - Readiness check (database ping)
//!
//! # Public intake
//! POST /api/schedule              - Schedule a pickup
//!
//! # Crew (session-gated except login)
//! POST /api/crew/login            - Crew login
//! POST /api/crew/logout           - Crew logout
//! GET  /api/crew/profile          - Current crew profile
//! GET  /api/crew/pickups          - Crew's scheduled pickups
//! POST /api/crew/complete/{id}    - Mark a pickup completed
//! ```

pub mod crew;
pub mod schedule;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the crew routes router.
pub fn crew_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(crew::login))
        .route("/logout", post(crew::logout))
        .route("/profile", get(crew::profile))
        .route("/pickups", get(crew::pickups))
        .route("/complete/{id}", post(crew::complete))
}

/// Create all routes for the portal.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/schedule", post(schedule::schedule))
        .nest("/api/crew", crew_routes())
}
