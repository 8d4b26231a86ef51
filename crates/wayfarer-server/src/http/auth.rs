//! Registration, login and profile endpoints.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{AppendHeaders, IntoResponse},
    Json,
};
use serde_json::{json, Value};
use wayfarer_core::params::{Login, RegisterUser, UpdateProfile};

use crate::{
    error::ApiError,
    extract::JsonBody,
    session::{clear_session_cookie, session_cookie, CurrentUser},
    state::AppState,
};

pub(super) async fn register(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<RegisterUser>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.planner.register(&params).await?;
    let token = state.sessions.create(user.id).await;

    Ok((
        StatusCode::CREATED,
        AppendHeaders([(header::SET_COOKIE, session_cookie(&token))]),
        Json(json!({ "message": "User registered successfully", "user": user })),
    ))
}

pub(super) async fn login(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<Login>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.planner.login(&params).await?;
    let token = state.sessions.create(user.id).await;

    Ok((
        AppendHeaders([(header::SET_COOKIE, session_cookie(&token))]),
        Json(json!({ "message": "Login successful", "user": user })),
    ))
}

pub(super) async fn logout(
    State(state): State<AppState>,
    current: CurrentUser,
) -> impl IntoResponse {
    state.sessions.revoke(&current.token).await;
    (
        AppendHeaders([(header::SET_COOKIE, clear_session_cookie())]),
        Json(json!({ "message": "Logout successful" })),
    )
}

pub(super) async fn me(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Value>, ApiError> {
    let user = state.planner.get_user(current.user_id).await?;
    Ok(Json(json!({ "user": user })))
}

pub(super) async fn update_profile(
    State(state): State<AppState>,
    current: CurrentUser,
    JsonBody(params): JsonBody<UpdateProfile>,
) -> Result<Json<Value>, ApiError> {
    let user = state
        .planner
        .update_profile(current.user_id, &params)
        .await?;
    Ok(Json(
        json!({ "message": "Profile updated successfully", "user": user }),
    ))
}

/// Deletes the account with everything it owns and ends all its sessions.
pub(super) async fn delete_account(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    state.planner.delete_account(current.user_id).await?;
    state.sessions.revoke_user(current.user_id).await;

    Ok((
        AppendHeaders([(header::SET_COOKIE, clear_session_cookie())]),
        Json(json!({ "message": "Account deleted successfully" })),
    ))
}
