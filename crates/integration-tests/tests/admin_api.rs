//! Integration tests for the admin console API.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The admin server running (cargo run -p curbside-admin)
//! - `ADMIN_EMAIL` / `ADMIN_PASSWORD` in the environment matching the
//!   server's configuration
//!
//! Run with: cargo test -p curbside-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

/// Base URL for the admin API (configurable via environment).
fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// Create a client with a cookie store (sessions are cookie-bound).
fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Create an authenticated client by logging in with the configured
/// credential pair.
async fn authenticated_client() -> Client {
    let client = client();
    let email = std::env::var("ADMIN_EMAIL").expect("ADMIN_EMAIL not set");
    let password = std::env::var("ADMIN_PASSWORD").expect("ADMIN_PASSWORD not set");

    let resp = client
        .post(format!("{}/api/admin/login", admin_base_url()))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to log in");
    assert_eq!(resp.status(), StatusCode::OK);

    client
}

#[tokio::test]
#[ignore = "Requires running admin server and database"]
async fn test_auth_status_reflects_login() {
    let client = client();

    let resp = client
        .get(format!("{}/api/admin/auth", admin_base_url()))
        .send()
        .await
        .expect("Failed to check auth");
    let body: Value = resp.json().await.expect("Failed to read response");
    assert_eq!(body["authenticated"], json!(false));
}

#[tokio::test]
#[ignore = "Requires running admin server and database"]
async fn test_login_rejects_wrong_credentials() {
    let resp = client()
        .post(format!("{}/api/admin/login", admin_base_url()))
        .json(&json!({ "email": "nobody@example.com", "password": "wrong" }))
        .send()
        .await
        .expect("Failed to post");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running admin server and database"]
async fn test_stats_requires_auth() {
    let resp = client()
        .get(format!("{}/api/admin/stats", admin_base_url()))
        .send()
        .await
        .expect("Failed to get stats");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running admin server and database"]
async fn test_crew_crud_roundtrip() {
    let client = authenticated_client().await;
    let base_url = admin_base_url();

    // Create
    let resp = client
        .post(format!("{base_url}/api/admin/crews"))
        .json(&json!({
            "email": "itest-crew@example.com",
            "password": "itest-password",
            "display_name": "Integration Crew",
            "zip_prefixes": ["901"],
        }))
        .send()
        .await
        .expect("Failed to create crew");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to read response");
    let crew_id = body["crew"]["id"].as_i64().expect("crew id");

    // Duplicate email conflicts
    let resp = client
        .post(format!("{base_url}/api/admin/crews"))
        .json(&json!({
            "email": "itest-crew@example.com",
            "password": "itest-password",
            "display_name": "Duplicate",
        }))
        .send()
        .await
        .expect("Failed to post");
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Partial update
    let resp = client
        .put(format!("{base_url}/api/admin/crews/{crew_id}"))
        .json(&json!({ "display_name": "Renamed Crew" }))
        .send()
        .await
        .expect("Failed to update crew");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to read response");
    assert_eq!(body["crew"]["display_name"], json!("Renamed Crew"));
    assert_eq!(body["crew"]["email"], json!("itest-crew@example.com"));

    // Delete
    let resp = client
        .delete(format!("{base_url}/api/admin/crews/{crew_id}"))
        .send()
        .await
        .expect("Failed to delete crew");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to read response");
    assert_eq!(body["success"], json!(true));
}

#[tokio::test]
#[ignore = "Requires running admin server and database"]
async fn test_zip_route_upsert_replaces_prefix() {
    let client = authenticated_client().await;
    let base_url = admin_base_url();

    // Needs a crew to point at.
    let resp = client
        .post(format!("{base_url}/api/admin/crews"))
        .json(&json!({
            "email": "itest-zip@example.com",
            "password": "itest-password",
            "display_name": "Zip Crew",
        }))
        .send()
        .await
        .expect("Failed to create crew");
    let body: Value = resp.json().await.expect("Failed to read response");
    let crew_id = body["crew"]["id"].as_i64().expect("crew id");

    // Upsert the same prefix twice; the second write wins silently.
    for _ in 0..2 {
        let resp = client
            .post(format!("{base_url}/api/admin/zip-routes"))
            .json(&json!({ "zip_prefix": "902", "crew_id": crew_id }))
            .send()
            .await
            .expect("Failed to create route");
        assert_eq!(resp.status(), StatusCode::OK);
    }

    // Exactly one rule exists for the prefix.
    let resp = client
        .get(format!("{base_url}/api/admin/zip-routes"))
        .send()
        .await
        .expect("Failed to list routes");
    let routes: Vec<Value> = resp.json().await.expect("Failed to read response");
    let matching: Vec<_> = routes
        .iter()
        .filter(|r| r["zip_prefix"] == json!("902"))
        .collect();
    assert_eq!(matching.len(), 1);

    // Cleanup: deleting the crew removes its routes.
    let resp = client
        .delete(format!("{base_url}/api/admin/crews/{crew_id}"))
        .send()
        .await
        .expect("Failed to delete crew");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running portal and admin servers and database"]
async fn test_crew_deletion_detaches_pickups() {
    let portal_base_url =
        std::env::var("PORTAL_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let client = authenticated_client().await;
    let base_url = admin_base_url();

    // A crew that owns the 903 prefix.
    let resp = client
        .post(format!("{base_url}/api/admin/crews"))
        .json(&json!({
            "email": "itest-detach@example.com",
            "password": "itest-password",
            "display_name": "Detach Crew",
        }))
        .send()
        .await
        .expect("Failed to create crew");
    let body: Value = resp.json().await.expect("Failed to read response");
    let crew_id = body["crew"]["id"].as_i64().expect("crew id");

    let resp = client
        .post(format!("{base_url}/api/admin/zip-routes"))
        .json(&json!({ "zip_prefix": "903", "crew_id": crew_id }))
        .send()
        .await
        .expect("Failed to create route");
    assert_eq!(resp.status(), StatusCode::OK);

    // A pickup routed to that crew via the public intake.
    let resp = client
        .post(format!("{portal_base_url}/api/schedule"))
        .json(&json!({
            "address": "7 Detach Dr, Springfield, 90310",
            "desired_date": "2030-03-01",
            "timeslot": "12 PM–2 PM",
        }))
        .send()
        .await
        .expect("Failed to schedule");
    let body: Value = resp.json().await.expect("Failed to read response");
    let pickup_id = body["pickup"]["id"].as_i64().expect("pickup id");
    assert_eq!(body["pickup"]["crew_id"], json!(crew_id));

    // Deleting the crew detaches the pickup but leaves it otherwise intact.
    let resp = client
        .delete(format!("{base_url}/api/admin/crews/{crew_id}"))
        .send()
        .await
        .expect("Failed to delete crew");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/api/admin/pickups"))
        .send()
        .await
        .expect("Failed to list pickups");
    let pickups: Vec<Value> = resp.json().await.expect("Failed to read response");
    let pickup = pickups
        .iter()
        .find(|p| p["id"] == json!(pickup_id))
        .expect("pickup still listed");
    assert!(pickup["crew_id"].is_null());
    assert_eq!(pickup["status"], json!("Scheduled"));
    assert_eq!(pickup["scheduled_date"], json!("2030-03-01"));
    assert_eq!(pickup["timeslot"], json!("12 PM–2 PM"));
}

#[tokio::test]
#[ignore = "Requires running admin server and database"]
async fn test_csv_export_has_contract_header() {
    let client = authenticated_client().await;

    let resp = client
        .get(format!("{}/api/admin/pickups/export", admin_base_url()))
        .send()
        .await
        .expect("Failed to export");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("text/csv")
    );

    let body = resp.text().await.expect("Failed to read body");
    assert!(body.starts_with(
        "id,address,scheduled_date,timeslot,crew_email,status,created_at,completed_at"
    ));
}

#[tokio::test]
#[ignore = "Requires running admin server and database"]
async fn test_sms_template_upsert() {
    let client = authenticated_client().await;
    let base_url = admin_base_url();

    let resp = client
        .put(format!("{base_url}/api/admin/sms-templates/Scheduled"))
        .json(&json!({
            "template_text":
                "We will be there on [scheduled_date] between [timeslot] to pick up your appliance.",
        }))
        .send()
        .await
        .expect("Failed to update template");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/api/admin/sms-templates"))
        .send()
        .await
        .expect("Failed to list templates");
    let templates: Vec<Value> = resp.json().await.expect("Failed to read response");
    assert!(
        templates
            .iter()
            .any(|t| t["template_type"] == json!("Scheduled"))
    );
}
