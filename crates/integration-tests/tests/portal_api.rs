//! Integration tests for the portal API (public intake + crew).
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations and seed applied
//! - The portal server running (cargo run -p curbside-portal)
//!
//! Run with: cargo test -p curbside-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

/// Base URL for the portal API (configurable via environment).
fn portal_base_url() -> String {
    std::env::var("PORTAL_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create a client with a cookie store (sessions are cookie-bound).
fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Log in as the first seeded demo crew.
async fn login_demo_crew(client: &Client) -> Value {
    let resp = client
        .post(format!("{}/api/crew/login", portal_base_url()))
        .json(&json!({
            "email": "crew1@example.com",
            "password": "crew12345",
        }))
        .send()
        .await
        .expect("Failed to log in");

    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.expect("Failed to read login response")
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_health() {
    let resp = client()
        .get(format!("{}/health", portal_base_url()))
        .send()
        .await
        .expect("Failed to reach portal");

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_schedule_routes_to_seeded_crew() {
    // ZIP prefix 100 is routed to the first demo crew by the seed.
    let resp = client()
        .post(format!("{}/api/schedule", portal_base_url()))
        .json(&json!({
            "address": "12 Main St, Springfield, 10001",
            "desired_date": "2030-01-15",
            "timeslot": "10 AM–12 PM",
        }))
        .send()
        .await
        .expect("Failed to schedule");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to read response");
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["pickup"]["status"], json!("Scheduled"));
    assert!(body["pickup"]["crew_id"].is_number());
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_schedule_rejects_invalid_input() {
    let resp = client()
        .post(format!("{}/api/schedule", portal_base_url()))
        .json(&json!({
            "address": "too short",
            "desired_date": "not-a-date",
            "timeslot": "midnight",
        }))
        .send()
        .await
        .expect("Failed to post");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to read response");
    assert!(body["errors"].as_array().is_some_and(|e| e.len() == 3));
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_crew_login_and_profile() {
    let client = client();
    let login = login_demo_crew(&client).await;
    assert_eq!(login["success"], json!(true));

    let resp = client
        .get(format!("{}/api/crew/profile", portal_base_url()))
        .send()
        .await
        .expect("Failed to fetch profile");

    assert_eq!(resp.status(), StatusCode::OK);
    let profile: Value = resp.json().await.expect("Failed to read profile");
    assert_eq!(profile["email"], json!("crew1@example.com"));
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_crew_login_bad_password() {
    let resp = client()
        .post(format!("{}/api/crew/login", portal_base_url()))
        .json(&json!({
            "email": "crew1@example.com",
            "password": "wrong",
        }))
        .send()
        .await
        .expect("Failed to post");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_crew_pickups_requires_session() {
    let resp = client()
        .get(format!("{}/api/crew/pickups", portal_base_url()))
        .send()
        .await
        .expect("Failed to get pickups");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_schedule_then_complete_lifecycle() {
    let client = client();
    login_demo_crew(&client).await;

    // Schedule a pickup routed to crew1 (prefix 100).
    let resp = client
        .post(format!("{}/api/schedule", portal_base_url()))
        .json(&json!({
            "address": "99 Lifecycle Ln, Springfield, 10002",
            "desired_date": "2030-02-01",
            "timeslot": "8 AM–10 AM",
        }))
        .send()
        .await
        .expect("Failed to schedule");
    let body: Value = resp.json().await.expect("Failed to read response");
    let pickup_id = body["pickup"]["id"].as_i64().expect("pickup id");

    // Complete it as the assigned crew.
    let resp = client
        .post(format!(
            "{}/api/crew/complete/{pickup_id}",
            portal_base_url()
        ))
        .send()
        .await
        .expect("Failed to complete");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to read response");
    assert_eq!(body["pickup"]["status"], json!("Completed"));
    assert!(!body["pickup"]["completed_at"].is_null());

    // A second completion attempt is rejected.
    let resp = client
        .post(format!(
            "{}/api/crew/complete/{pickup_id}",
            portal_base_url()
        ))
        .send()
        .await
        .expect("Failed to post");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
