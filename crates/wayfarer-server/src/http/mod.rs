//! Route table for the JSON API.

use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};

use crate::state::AppState;

mod auth;
mod catalog;
mod saved;
mod trips;

/// Builds the application router. Every endpoint lives under `/api`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route(
            "/api/users/profile",
            put(auth::update_profile).delete(auth::delete_account),
        )
        .route("/api/cities/search", get(catalog::search_cities))
        .route("/api/cities/{id}", get(catalog::get_city))
        .route("/api/cities/{id}/info", get(catalog::city_info))
        .route("/api/cities/{id}/activities", get(catalog::browse_activities))
        .route(
            "/api/cities/{id}/activities/refresh",
            post(catalog::refresh_activities),
        )
        .route("/api/popular-cities", get(catalog::popular_cities))
        .route("/api/activities/search", get(catalog::search_activities))
        .route("/api/activities/categories", get(catalog::categories))
        .route("/api/activities/suggest", post(catalog::suggest_activities))
        .route("/api/trips", get(trips::list_trips).post(trips::create_trip))
        .route(
            "/api/trips/{id}",
            get(trips::get_trip)
                .put(trips::update_trip)
                .delete(trips::delete_trip),
        )
        .route("/api/trips/{id}/stops", post(trips::add_stop))
        .route(
            "/api/trips/{id}/budget",
            get(trips::get_budget).put(trips::update_budget),
        )
        .route(
            "/api/trips/{id}/generate-itinerary",
            post(trips::generate_itinerary),
        )
        .route("/api/trips/{id}/copy", post(trips::copy_trip))
        .route("/api/trips/shared/{share_code}", get(trips::shared_trip))
        .route(
            "/api/stops/{id}",
            put(trips::update_stop).delete(trips::remove_stop),
        )
        .route("/api/stops/{id}/activities", post(trips::add_stop_activity))
        .route(
            "/api/itinerary-activities/{id}",
            delete(trips::remove_stop_activity),
        )
        .route(
            "/api/saved-destinations",
            get(saved::list_saved).post(saved::save_destination),
        )
        .route("/api/saved-destinations/{id}", delete(saved::remove_saved))
        .route("/api/dashboard/stats", get(trips::dashboard))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "message": "Wayfarer API is running",
    }))
}
