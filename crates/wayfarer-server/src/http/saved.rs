//! Saved destination endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use wayfarer_core::{models::SaveOutcome, params::SaveDestination};

use crate::{error::ApiError, extract::JsonBody, session::CurrentUser, state::AppState};

pub(super) async fn list_saved(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Value>, ApiError> {
    let destinations = state.planner.list_saved(current.user_id).await?;
    Ok(Json(json!({
        "count": destinations.len(),
        "destinations": destinations,
    })))
}

/// 201 on the first save, 200 when the city was already saved.
pub(super) async fn save_destination(
    State(state): State<AppState>,
    current: CurrentUser,
    JsonBody(params): JsonBody<SaveDestination>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let outcome = state
        .planner
        .save_destination(current.user_id, &params)
        .await?;
    Ok(match outcome {
        SaveOutcome::Created(destination) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Destination saved",
                "destination": destination,
            })),
        ),
        SaveOutcome::AlreadySaved => (
            StatusCode::OK,
            Json(json!({ "message": "Destination already saved" })),
        ),
    })
}

pub(super) async fn remove_saved(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(saved_id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    state.planner.remove_saved(saved_id, current.user_id).await?;
    Ok(Json(json!({ "message": "Destination removed" })))
}
