//! Game catalog API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use gamedex_core::metrics::{GAMES_CREATED, GAMES_DELETED, GAMES_UPDATED, SEARCHES_TOTAL};
use gamedex_core::{FeedError, GameDraft, GameFilter, GameRecord, PopulateError, StoreError};

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

/// Search criteria in request body; absent or empty criteria are ignored.
#[derive(Debug, Deserialize)]
pub struct SearchBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct PopulateResponse {
    pub message: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }
}

fn store_error(e: StoreError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &e {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::Conflict(_) => StatusCode::CONFLICT,
        StoreError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorResponse::new(e.to_string())))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/games
///
/// List every game in the catalog.
pub async fn list_games(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<GameRecord>>, impl IntoResponse> {
    match state.store().list() {
        Ok(games) => Ok(Json(games)),
        Err(e) => Err(store_error(e)),
    }
}

/// POST /api/games
///
/// Create a single game.
pub async fn create_game(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<GameDraft>,
) -> Result<(StatusCode, Json<GameRecord>), impl IntoResponse> {
    if let Err(e) = draft.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(e.to_string())),
        ));
    }

    match state.store().create(&draft) {
        Ok(game) => {
            GAMES_CREATED.inc();
            Ok((StatusCode::CREATED, Json(game)))
        }
        Err(e) => Err(store_error(e)),
    }
}

/// PUT /api/games/{id}
///
/// Fully replace a game's fields.
pub async fn update_game(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(draft): Json<GameDraft>,
) -> Result<Json<GameRecord>, impl IntoResponse> {
    if let Err(e) = draft.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(e.to_string())),
        ));
    }

    match state.store().update(id, &draft) {
        Ok(game) => {
            GAMES_UPDATED.inc();
            Ok(Json(game))
        }
        Err(e) => Err(store_error(e)),
    }
}

/// DELETE /api/games/{id}
///
/// Hard-delete a game.
pub async fn delete_game(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, impl IntoResponse> {
    match state.store().delete(id) {
        Ok(()) => {
            GAMES_DELETED.inc();
            Ok(Json(DeleteResponse { id }))
        }
        Err(e) => Err(store_error(e)),
    }
}

/// POST /api/games/search
///
/// Find games by optional name substring and platform.
pub async fn search_games(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SearchBody>,
) -> Result<Json<Vec<GameRecord>>, impl IntoResponse> {
    SEARCHES_TOTAL.inc();

    let mut filter = GameFilter::new();
    if let Some(name) = body.name.filter(|s| !s.is_empty()) {
        filter = filter.with_name(name);
    }
    if let Some(platform) = body.platform.filter(|s| !s.is_empty()) {
        filter = filter.with_platform(platform);
    }

    match state.store().search(&filter) {
        Ok(games) => Ok(Json(games)),
        Err(e) => Err(store_error(e)),
    }
}

/// POST /api/games/populate
///
/// Merge both feed sources into the catalog, reporting the insert count.
pub async fn populate_games(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PopulateResponse>, impl IntoResponse> {
    match state.populator().run() {
        Ok(summary) => Ok(Json(PopulateResponse {
            message: "Successfully populated games database".to_string(),
            count: summary.inserted,
        })),
        Err(PopulateError::Feed(e @ FeedError::Malformed { .. })) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to parse JSON data".to_string(),
                details: Some(e.to_string()),
            }),
        )),
        Err(e) => {
            error!("Error populating games: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to populate games database")),
            ))
        }
    }
}
