//! Trip, stop, itinerary and budget endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use wayfarer_core::{
    models::DashboardStats,
    params::{
        AddItineraryActivity, AddStop, CreateTrip, GenerateItinerary, UpdateBudget, UpdateStop,
        UpdateTrip,
    },
};

use crate::{error::ApiError, extract::JsonBody, session::CurrentUser, state::AppState};

type Created = (StatusCode, Json<Value>);

pub(super) async fn list_trips(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Value>, ApiError> {
    let trips = state.planner.list_trips(current.user_id).await?;
    Ok(Json(json!({ "count": trips.len(), "trips": trips })))
}

pub(super) async fn create_trip(
    State(state): State<AppState>,
    current: CurrentUser,
    JsonBody(params): JsonBody<CreateTrip>,
) -> Result<Created, ApiError> {
    let trip = state.planner.create_trip(current.user_id, &params).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Trip created successfully", "trip": trip })),
    ))
}

pub(super) async fn get_trip(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(trip_id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    let trip = state.planner.get_trip(trip_id, current.user_id).await?;
    Ok(Json(json!({ "trip": trip })))
}

pub(super) async fn update_trip(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(trip_id): Path<u64>,
    JsonBody(params): JsonBody<UpdateTrip>,
) -> Result<Json<Value>, ApiError> {
    let trip = state
        .planner
        .update_trip(trip_id, current.user_id, &params)
        .await?;
    Ok(Json(
        json!({ "message": "Trip updated successfully", "trip": trip }),
    ))
}

pub(super) async fn delete_trip(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(trip_id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    state.planner.delete_trip(trip_id, current.user_id).await?;
    Ok(Json(json!({ "message": "Trip deleted successfully" })))
}

pub(super) async fn add_stop(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(trip_id): Path<u64>,
    JsonBody(params): JsonBody<AddStop>,
) -> Result<Created, ApiError> {
    let stop = state
        .planner
        .add_stop(trip_id, current.user_id, &params)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Stop added successfully", "stop": stop })),
    ))
}

pub(super) async fn update_stop(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(stop_id): Path<u64>,
    JsonBody(params): JsonBody<UpdateStop>,
) -> Result<Json<Value>, ApiError> {
    let stop = state
        .planner
        .update_stop(stop_id, current.user_id, &params)
        .await?;
    Ok(Json(
        json!({ "message": "Stop updated successfully", "stop": stop }),
    ))
}

pub(super) async fn remove_stop(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(stop_id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    state.planner.remove_stop(stop_id, current.user_id).await?;
    Ok(Json(json!({ "message": "Stop deleted successfully" })))
}

pub(super) async fn add_stop_activity(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(stop_id): Path<u64>,
    JsonBody(params): JsonBody<AddItineraryActivity>,
) -> Result<Created, ApiError> {
    let activity = state
        .planner
        .add_itinerary_activity(stop_id, current.user_id, &params)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Activity added to itinerary",
            "activity": activity,
        })),
    ))
}

pub(super) async fn remove_stop_activity(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(item_id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    state
        .planner
        .remove_itinerary_activity(item_id, current.user_id)
        .await?;
    Ok(Json(json!({ "message": "Activity removed from itinerary" })))
}

pub(super) async fn get_budget(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(trip_id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    let budget = state.planner.get_budget(trip_id, current.user_id).await?;
    Ok(Json(json!({ "budget": budget })))
}

pub(super) async fn update_budget(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(trip_id): Path<u64>,
    JsonBody(params): JsonBody<UpdateBudget>,
) -> Result<Json<Value>, ApiError> {
    let budget = state
        .planner
        .update_budget(trip_id, current.user_id, &params)
        .await?;
    Ok(Json(
        json!({ "message": "Budget updated successfully", "budget": budget }),
    ))
}

pub(super) async fn generate_itinerary(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(trip_id): Path<u64>,
    JsonBody(params): JsonBody<GenerateItinerary>,
) -> Result<Json<Value>, ApiError> {
    let itinerary = state
        .planner
        .generate_itinerary(trip_id, current.user_id, &params)
        .await?;
    Ok(Json(json!({
        "message": "Itinerary generated successfully",
        "itinerary": itinerary,
    })))
}

/// Public view of a shared trip. No session required.
pub(super) async fn shared_trip(
    State(state): State<AppState>,
    Path(share_code): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let trip = state.planner.shared_trip(&share_code).await?;
    Ok(Json(json!({ "trip": trip })))
}

pub(super) async fn copy_trip(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(trip_id): Path<u64>,
) -> Result<Created, ApiError> {
    let trip = state.planner.copy_trip(trip_id, current.user_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Trip copied successfully", "trip": trip })),
    ))
}

pub(super) async fn dashboard(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<DashboardStats>, ApiError> {
    Ok(Json(state.planner.dashboard(current.user_id).await?))
}
