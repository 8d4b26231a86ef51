//! City and activity catalogue endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use wayfarer_core::{
    generation::CityInfo,
    models::ActivityCategory,
    params::{
        BrowseActivities, PopularCities, RefreshActivities, SearchActivities, SearchCities,
        SuggestActivities,
    },
};

use crate::{
    error::ApiError,
    extract::{JsonBody, QueryParams},
    session::CurrentUser,
    state::AppState,
};

pub(super) async fn search_cities(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<SearchCities>,
) -> Result<Json<Value>, ApiError> {
    let cities = state.planner.search_cities(&params).await?;
    Ok(Json(json!({ "count": cities.len(), "cities": cities })))
}

pub(super) async fn get_city(
    State(state): State<AppState>,
    Path(city_id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    let city = state.planner.get_city(city_id).await?;
    Ok(Json(json!({ "city": city })))
}

pub(super) async fn city_info(
    State(state): State<AppState>,
    Path(city_id): Path<u64>,
) -> Result<Json<CityInfo>, ApiError> {
    Ok(Json(state.planner.city_info(city_id).await?))
}

pub(super) async fn popular_cities(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<PopularCities>,
) -> Result<Json<Value>, ApiError> {
    let cities = state.planner.popular_cities(&params).await?;
    Ok(Json(json!({ "cities": cities })))
}

pub(super) async fn browse_activities(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(city_id): Path<u64>,
    QueryParams(params): QueryParams<BrowseActivities>,
) -> Result<Json<Value>, ApiError> {
    let city = state.planner.get_city(city_id).await?;
    let page = state.planner.browse_activities(city_id, &params).await?;
    Ok(Json(json!({
        "city": city,
        "activities": page.items,
        "pagination": page.pagination,
        "available_categories": ActivityCategory::ALL,
    })))
}

pub(super) async fn search_activities(
    State(state): State<AppState>,
    _current: CurrentUser,
    QueryParams(params): QueryParams<SearchActivities>,
) -> Result<Json<Value>, ApiError> {
    let page = state.planner.search_activities(&params).await?;
    Ok(Json(json!({
        "activities": page.items,
        "pagination": page.pagination,
    })))
}

pub(super) async fn categories(
    State(state): State<AppState>,
    _current: CurrentUser,
) -> Result<Json<Value>, ApiError> {
    let stats = state.planner.activity_categories().await?;
    Ok(Json(json!({
        "categories": ActivityCategory::ALL,
        "stats": stats,
    })))
}

pub(super) async fn refresh_activities(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(city_id): Path<u64>,
    JsonBody(params): JsonBody<RefreshActivities>,
) -> Result<Json<Value>, ApiError> {
    let refresh = state.planner.refresh_activities(city_id, &params).await?;
    Ok(Json(json!({
        "message": format!("Added {} new activities", refresh.added),
        "new_activities_added": refresh.added,
        "total_activities": refresh.activities.len(),
        "activities": refresh.activities,
    })))
}

pub(super) async fn suggest_activities(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<SuggestActivities>,
) -> Result<Json<Value>, ApiError> {
    let activities = state.planner.suggest_activities(&params).await?;
    Ok(Json(json!({ "activities": activities })))
}
