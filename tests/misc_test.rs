//! Categories, settings, health and fallback routes.

mod common;

use axum::http::StatusCode;
use common::TestClient;
use serde_json::json;

#[tokio::test]
async fn test_health() {
    let client = TestClient::new();
    let (status, body) = client.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let client = TestClient::new();
    let (status, body) = client.get_json("/api/nothing-here").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Not found"}));
}

#[tokio::test]
async fn test_default_categories() {
    let client = TestClient::new();
    let (status, body) = client.get_json("/api/categories").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            "Food",
            "Transport",
            "Shopping",
            "Bills",
            "Entertainment",
            "Health",
            "Salary",
            "Other"
        ])
    );
}

#[tokio::test]
async fn test_add_category() {
    let client = TestClient::new();

    let (status, body) = client
        .post_json("/api/categories", &json!({"category": "  Travel "}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().last().unwrap(), "Travel");

    let (_, listed) = client.get_json("/api/categories").await;
    assert_eq!(listed, body);
    assert!(client.data_dir().join("categories.json").exists());
}

#[tokio::test]
async fn test_add_category_rejects_blank_and_duplicate() {
    let client = TestClient::new();

    let (status, _) = client
        .post_json("/api/categories", &json!({"category": " "}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = client
        .post_json("/api/categories", &json!({"category": "Food"}))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("Food"));
}

#[tokio::test]
async fn test_currency_setting() {
    let client = TestClient::new();

    let (status, body) = client.get_json("/api/settings").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"currency": "₹"}));

    let (status, body) = client
        .post_json("/api/settings", &json!({"currency": "€"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"currency": "€"}));

    let (_, body) = client.get_json("/api/settings").await;
    assert_eq!(body["currency"], "€");
}

#[tokio::test]
async fn test_blank_currency_is_bad_request() {
    let client = TestClient::new();
    let (status, _) = client
        .post_json("/api/settings", &json!({"currency": ""}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = client.get_json("/api/settings").await;
    assert_eq!(body["currency"], "₹");
}
