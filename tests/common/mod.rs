//! Shared test utilities for integration tests.
//!
//! `TestClient` drives the full router (middleware included) over a fresh
//! temporary data directory. Methods are broad so that every test file can
//! use the subset it needs.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tally::config::Config;
use tally::server::build_router;
use tally::state::AppState;
use tally::store::DataFile;
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestClient {
    state: AppState,
    // Dropped with the client, removing the data directory.
    _dir: TempDir,
}

impl TestClient {
    /// Create a client over an empty data directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = Config {
            host: "127.0.0.1".into(),
            port: 5001,
            data_dir: dir.path().to_path_buf(),
        };
        let state = AppState::new(&config).expect("Failed to open data directory");
        Self { state, _dir: dir }
    }

    /// Create a client whose `data.json` already holds `json`.
    pub fn with_transactions(json: &str) -> Self {
        let client = Self::new();
        std::fs::write(client.data_path(DataFile::Transactions), json)
            .expect("Failed to seed data.json");
        client
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn data_dir(&self) -> &Path {
        self.state.store.root()
    }

    pub fn data_path(&self, file: DataFile) -> PathBuf {
        self.state.store.path(file)
    }

    /// The production router, middleware included.
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    /// Make a GET request and return status and body.
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    /// GET and parse the body as JSON.
    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let (status, body) = self.get(uri).await;
        (status, parse(&body))
    }

    async fn send_json(&self, method: &str, uri: &str, payload: &Value) -> (StatusCode, Value) {
        let (status, body) = self
            .send(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await;
        (status, parse(&body))
    }

    pub async fn post_json(&self, uri: &str, payload: &Value) -> (StatusCode, Value) {
        self.send_json("POST", uri, payload).await
    }

    pub async fn put_json(&self, uri: &str, payload: &Value) -> (StatusCode, Value) {
        self.send_json("PUT", uri, payload).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        let (status, body) = self
            .send(
                Request::builder()
                    .method("DELETE")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
        (status, parse(&body))
    }

    // =========================================================================
    // Helper methods for creating entities through the API
    // =========================================================================

    /// Create an expense via POST and return its id.
    pub async fn create_expense(
        &self,
        description: &str,
        amount: f64,
        date: &str,
        category: Option<&str>,
    ) -> String {
        let mut payload = serde_json::json!({
            "description": description,
            "amount": amount,
            "date": date,
        });
        if let Some(category) = category {
            payload["category"] = category.into();
        }

        let (status, body) = self.post_json("/api/expenses", &payload).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
        body["id"].as_str().unwrap().to_string()
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a body as JSON, or `Value::Null` for non-JSON bodies.
fn parse(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or(Value::Null)
}

/// Build a query string with every value URL-encoded.
pub fn query(uri: &str, params: &[(&str, &str)]) -> String {
    let qs = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{uri}?{qs}")
}
