//! End-to-end tests running the full server stack in-process.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{fixtures, TestFixture};

async fn create_game(fixture: &TestFixture, name: &str, platform: &str, store_id: &str) -> Value {
    let body = serde_json::to_value(fixtures::game_draft(name, platform, store_id)).unwrap();
    let response = fixture.post("/api/games", body).await;
    assert_status!(response, StatusCode::CREATED);
    response.body
}

// =============================================================================
// Basic API Tests
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/api/health").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_config_endpoint_exposes_feed_paths() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/api/config").await;

    assert_status!(response, StatusCode::OK);
    let android = response.body["feeds"]["android"].as_str().unwrap();
    assert!(android.ends_with("android.top100.json"));
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let fixture = TestFixture::new().await;
    // Generate at least one request before scraping
    fixture.get("/api/health").await;

    let response = fixture.get("/api/metrics").await;
    assert_eq!(response.status, StatusCode::OK);
}

// =============================================================================
// CRUD Tests
// =============================================================================

#[tokio::test]
async fn test_create_game() {
    let fixture = TestFixture::new().await;

    let created = create_game(&fixture, "Helix Jump", "android", "com.h8games.helixjump").await;
    assert!(created["id"].is_i64());
    assert_eq!(created["name"], "Helix Jump");
    assert_eq!(created["platform"], "android");
    assert_eq!(created["storeId"], "com.h8games.helixjump");
    assert_eq!(created["isPublished"], true);
    assert!(created["createdAt"].is_string());
}

#[tokio::test]
async fn test_create_game_with_empty_required_field() {
    let fixture = TestFixture::new().await;

    let mut draft = serde_json::to_value(fixtures::game_draft("X", "ios", "x1")).unwrap();
    draft["name"] = json!("");

    let response = fixture.post("/api/games", draft).await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn test_create_game_with_missing_field_is_rejected() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post_raw("/api/games", r#"{"name": "Incomplete", "platform": "ios"}"#)
        .await;
    assert_status!(response, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_game_with_duplicate_store_id() {
    let fixture = TestFixture::new().await;
    create_game(&fixture, "First", "ios", "shared-store-id").await;

    let body = serde_json::to_value(fixtures::game_draft("Second", "android", "shared-store-id"))
        .unwrap();
    let response = fixture.post("/api/games", body).await;
    assert_status!(response, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_list_games_in_insertion_order() {
    let fixture = TestFixture::new().await;
    create_game(&fixture, "First", "ios", "a").await;
    create_game(&fixture, "Second", "android", "b").await;

    let response = fixture.get("/api/games").await;
    assert_status!(response, StatusCode::OK);

    let games = response.body.as_array().unwrap();
    assert_eq!(games.len(), 2);
    assert_eq!(games[0]["name"], "First");
    assert_eq!(games[1]["name"], "Second");
}

#[tokio::test]
async fn test_update_game() {
    let fixture = TestFixture::new().await;
    let created = create_game(&fixture, "Old Name", "ios", "u1").await;
    let id = created["id"].as_i64().unwrap();

    let mut replacement =
        serde_json::to_value(fixtures::game_draft("New Name", "android", "u1")).unwrap();
    replacement["appVersion"] = json!("2.0.0");

    let response = fixture.put(&format!("/api/games/{}", id), replacement).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["id"], id);
    assert_eq!(response.body["name"], "New Name");
    assert_eq!(response.body["platform"], "android");
    assert_eq!(response.body["appVersion"], "2.0.0");
}

#[tokio::test]
async fn test_update_nonexistent_game() {
    let fixture = TestFixture::new().await;

    let body = serde_json::to_value(fixtures::game_draft("X", "ios", "x")).unwrap();
    let response = fixture.put("/api/games/9999", body).await;
    assert_status!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_game() {
    let fixture = TestFixture::new().await;
    let created = create_game(&fixture, "Doomed", "ios", "d1").await;
    let id = created["id"].as_i64().unwrap();

    let response = fixture.delete(&format!("/api/games/{}", id)).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["id"], id);

    let list = fixture.get("/api/games").await;
    assert!(list.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_nonexistent_game() {
    let fixture = TestFixture::new().await;

    let response = fixture.delete("/api/games/9999").await;
    assert_status!(response, StatusCode::NOT_FOUND);
}

// =============================================================================
// Search Tests
// =============================================================================

async fn seed_search_games(fixture: &TestFixture) {
    create_game(fixture, "Test Game 1", "ios", "s1").await;
    create_game(fixture, "Test Game 2", "android", "s2").await;
    create_game(fixture, "Ios Game", "ios", "s3").await;
}

fn names(body: &Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_search_by_name() {
    let fixture = TestFixture::new().await;
    seed_search_games(&fixture).await;

    let response = fixture
        .post("/api/games/search", json!({ "name": "Test" }))
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(names(&response.body), vec!["Test Game 1", "Test Game 2"]);
}

#[tokio::test]
async fn test_search_by_platform() {
    let fixture = TestFixture::new().await;
    seed_search_games(&fixture).await;

    let response = fixture
        .post("/api/games/search", json!({ "platform": "ios" }))
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(names(&response.body), vec!["Test Game 1", "Ios Game"]);
}

#[tokio::test]
async fn test_search_by_name_and_platform() {
    let fixture = TestFixture::new().await;
    seed_search_games(&fixture).await;

    let response = fixture
        .post(
            "/api/games/search",
            json!({ "name": "Test", "platform": "ios" }),
        )
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(names(&response.body), vec!["Test Game 1"]);
}

#[tokio::test]
async fn test_search_without_criteria_returns_all() {
    let fixture = TestFixture::new().await;
    seed_search_games(&fixture).await;

    let response = fixture.post("/api/games/search", json!({})).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_search_treats_empty_strings_as_absent() {
    let fixture = TestFixture::new().await;
    seed_search_games(&fixture).await;

    let response = fixture
        .post("/api/games/search", json!({ "name": "", "platform": "" }))
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_search_name_is_case_sensitive() {
    let fixture = TestFixture::new().await;
    seed_search_games(&fixture).await;

    let response = fixture
        .post("/api/games/search", json!({ "name": "test" }))
        .await;
    assert_status!(response, StatusCode::OK);
    assert!(response.body.as_array().unwrap().is_empty());
}

// =============================================================================
// Populate Tests
// =============================================================================

#[tokio::test]
async fn test_populate_inserts_all_candidates() {
    let fixture = TestFixture::new().await;

    let response = fixture.post("/api/games/populate", json!({})).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(
        response.body["message"],
        "Successfully populated games database"
    );
    assert_eq!(response.body["count"], 10); // 5 android + 5 ios

    let list = fixture.get("/api/games").await;
    let games = list.body.as_array().unwrap();
    assert_eq!(games.len(), 10);

    let android: Vec<&Value> = games
        .iter()
        .filter(|g| g["platform"] == "android")
        .collect();
    assert_eq!(android.len(), 5);
    assert!(android.iter().any(|g| g["name"] == "PUBG Mobile"));
    assert!(android.iter().any(|g| g["name"] == "Candy Crush Saga"));

    let ios: Vec<&Value> = games.iter().filter(|g| g["platform"] == "ios").collect();
    assert_eq!(ios.len(), 5);
    assert!(ios.iter().any(|g| g["name"] == "Roblox"));
    assert!(ios.iter().any(|g| g["name"] == "Minecraft"));

    // Fed records are published by definition
    assert!(games.iter().all(|g| g["isPublished"] == true));
}

#[tokio::test]
async fn test_populate_is_idempotent() {
    let fixture = TestFixture::new().await;

    let first = fixture.post("/api/games/populate", json!({})).await;
    assert_status!(first, StatusCode::OK);
    assert_eq!(first.body["count"], 10);

    let second = fixture.post("/api/games/populate", json!({})).await;
    assert_status!(second, StatusCode::OK);
    assert_eq!(second.body["count"], 0);

    let list = fixture.get("/api/games").await;
    assert_eq!(list.body.as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_populate_skips_candidates_already_in_catalog() {
    let fixture = TestFixture::new().await;

    // One record whose storeId collides with a feed candidate.
    let draft = fixtures::game_draft("Pre-existing", "android", "com.tencent.ig");
    let body = serde_json::to_value(draft).unwrap();
    fixture.post("/api/games", body).await;

    let response = fixture.post("/api/games/populate", json!({})).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["count"], 9);

    // The colliding record kept its original fields.
    let list = fixture.get("/api/games").await;
    let games = list.body.as_array().unwrap();
    assert_eq!(games.len(), 10);
    assert!(games.iter().any(|g| g["name"] == "Pre-existing"));
    assert!(!games.iter().any(|g| g["name"] == "PUBG Mobile"));
}

#[tokio::test]
async fn test_populate_with_malformed_feed() {
    let fixture =
        TestFixture::with_raw_feeds("{ invalid json }", &fixtures::feed_json(&fixtures::ios_top5()))
            .await;

    let response = fixture.post("/api/games/populate", json!({})).await;
    assert_status!(response, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "Failed to parse JSON data");
    assert!(response.body["details"].is_string());

    // No partial application: nothing was written.
    let list = fixture.get("/api/games").await;
    assert!(list.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_populate_with_missing_feed_file() {
    let fixture = TestFixture::new().await;
    std::fs::remove_file(&fixture.android_feed).unwrap();

    let response = fixture.post("/api/games/populate", json!({})).await;
    assert_status!(response, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "Failed to populate games database");

    let list = fixture.get("/api/games").await;
    assert!(list.body.as_array().unwrap().is_empty());
}
