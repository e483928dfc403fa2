//! API integration tests against a running server
//!
//! Run with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_list_cards() {
    let client = Client::new();

    let response = client
        .get(format!("{}/cards", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore]
async fn test_tap_roundtrip() {
    let client = Client::new();

    // Register a throwaway card
    let uid = format!("T{}", std::process::id());
    let response = client
        .post(format!("{}/cards", BASE_URL))
        .json(&json!({ "uid": uid, "name": "Tap test card" }))
        .send()
        .await
        .expect("Failed to create card");
    assert_eq!(response.status(), 201);
    let card: Value = response.json().await.expect("Failed to parse card");

    // First tap assigns
    let response = client
        .post(format!("{}/cards/uid/{}/tap", BASE_URL, uid))
        .json(&json!({ "staff_name": "Alice" }))
        .send()
        .await
        .expect("Failed to tap");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse tap response");
    assert_eq!(body["action"], "assigned");

    // Second tap returns, no staff name needed
    let response = client
        .post(format!("{}/cards/uid/{}/tap", BASE_URL, uid))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to tap");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse tap response");
    assert_eq!(body["action"], "returned");

    // Clean up
    let response = client
        .delete(format!("{}/cards/{}", BASE_URL, card["id"]))
        .send()
        .await
        .expect("Failed to delete card");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_tap_without_staff_name_is_rejected() {
    let client = Client::new();

    let uid = format!("E{}", std::process::id());
    let response = client
        .post(format!("{}/cards", BASE_URL))
        .json(&json!({ "uid": uid, "name": "Error test card" }))
        .send()
        .await
        .expect("Failed to create card");
    assert_eq!(response.status(), 201);
    let card: Value = response.json().await.expect("Failed to parse card");

    let response = client
        .post(format!("{}/cards/uid/{}/tap", BASE_URL, uid))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to tap");
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse error");
    assert_eq!(body["error"], "InvalidInput");

    let response = client
        .delete(format!("{}/cards/{}", BASE_URL, card["id"]))
        .send()
        .await
        .expect("Failed to delete card");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_assignment_log() {
    let client = Client::new();

    let response = client
        .get(format!("{}/assignments/log", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}
