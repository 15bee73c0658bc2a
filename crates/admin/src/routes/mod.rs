//! HTTP route handlers for the admin console.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                       - Liveness check
//! GET  /health/ready                 - Readiness check (database ping)
//!
//! # Auth (single configured credential)
//! POST /api/admin/login              - Admin login
//! POST /api/admin/logout             - Admin logout
//! GET  /api/admin/auth               - Auth status check
//!
//! # Dashboard
//! GET  /api/admin/stats              - Overview counts
//!
//! # Pickups
//! GET  /api/admin/pickups            - Filtered listing (joined with crew)
//! POST /api/admin/pickups/{id}/assign - Reassign (or detach) a crew
//! GET  /api/admin/pickups/export     - CSV export
//!
//! # Crews
//! GET  /api/admin/crews              - List crews
//! POST /api/admin/crews              - Create crew (hashes password)
//! PUT  /api/admin/crews/{id}         - Partial update
//! DELETE /api/admin/crews/{id}       - Delete (detaches pickups first)
//!
//! # ZIP routing
//! GET  /api/admin/zip-routes         - List rules with crew names
//! POST /api/admin/zip-routes         - Upsert rule by prefix
//! DELETE /api/admin/zip-routes/{id}  - Delete rule
//!
//! # SMS templates
//! GET  /api/admin/sms-templates      - List templates
//! PUT  /api/admin/sms-templates/{type} - Upsert template text
//! ```

pub mod auth;
pub mod crews;
pub mod pickups;
pub mod stats;
pub mod templates;
pub mod zip_routes;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Create all routes for the admin console.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/api/admin/login", post(auth::login))
        .route("/api/admin/logout", post(auth::logout))
        .route("/api/admin/auth", get(auth::status))
        // Dashboard
        .route("/api/admin/stats", get(stats::stats))
        // Pickups
        .route("/api/admin/pickups", get(pickups::list))
        .route("/api/admin/pickups/export", get(pickups::export))
        .route("/api/admin/pickups/{id}/assign", post(pickups::assign))
        // Crews
        .route("/api/admin/crews", get(crews::list).post(crews::create))
        .route(
            "/api/admin/crews/{id}",
            put(crews::update).delete(crews::remove),
        )
        // ZIP routing
        .route(
            "/api/admin/zip-routes",
            get(zip_routes::list).post(zip_routes::create),
        )
        .route("/api/admin/zip-routes/{id}", delete(zip_routes::remove))
        // SMS templates
        .route("/api/admin/sms-templates", get(templates::list))
        .route("/api/admin/sms-templates/{kind}", put(templates::update))
}
