//! Common test utilities for E2E testing.
//!
//! This module provides a test fixture that creates an in-process server
//! backed by a scratch SQLite database and feed files, enabling
//! comprehensive E2E testing without external infrastructure.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use gamedex_core::{
    Config, DatabaseConfig, FeedEntry, FeedsConfig, ServerConfig, SqliteGameStore,
};
use gamedex_server::api::create_router;
use gamedex_server::state::AppState;

/// Re-export fixtures for test convenience
pub use gamedex_core::testing::fixtures;

/// Test fixture for E2E testing.
///
/// Provides an in-process server with a scratch database and controllable
/// feed files.
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Path of the android feed file
    pub android_feed: PathBuf,
    /// Path of the ios feed file
    pub ios_feed: PathBuf,
    /// Temporary directory for the test database and feed files
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a fixture whose feeds carry the standard 5+5 candidates.
    pub async fn new() -> Self {
        Self::with_feeds(&fixtures::android_top5(), &fixtures::ios_top5()).await
    }

    /// Create a fixture with specific feed candidates.
    pub async fn with_feeds(android: &[FeedEntry], ios: &[FeedEntry]) -> Self {
        Self::with_raw_feeds(&fixtures::feed_json(android), &fixtures::feed_json(ios)).await
    }

    /// Create a fixture with raw feed file contents (for malformed feeds).
    pub async fn with_raw_feeds(android: &str, ios: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let android_feed = temp_dir.path().join("android.top100.json");
        let ios_feed = temp_dir.path().join("ios.top100.json");

        std::fs::write(&android_feed, android).expect("Failed to write android feed");
        std::fs::write(&ios_feed, ios).expect("Failed to write ios feed");

        let config = Config {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                path: db_path.clone(),
            },
            feeds: FeedsConfig {
                android: android_feed.clone(),
                ios: ios_feed.clone(),
            },
        };

        let store = Arc::new(SqliteGameStore::new(&db_path).expect("Failed to create game store"));

        let state = Arc::new(AppState::new(config, store));
        let router = create_router(state);

        Self {
            router,
            android_feed,
            ios_feed,
            temp_dir,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a PUT request with JSON body.
    pub async fn put(&self, path: &str, body: Value) -> TestResponse {
        self.request("PUT", path, Some(body)).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.send(request).await
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
