//! HTTP error mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use wayfarer_core::TravelError;

/// Error returned by every handler. Rendered as `{"error": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Travel(#[from] TravelError),

    /// Malformed request body or query string
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Travel(e) => match e {
                TravelError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
                TravelError::Unauthenticated | TravelError::InvalidCredentials => {
                    StatusCode::UNAUTHORIZED
                }
                TravelError::Forbidden { .. } => StatusCode::FORBIDDEN,
                TravelError::NotFound { .. } | TravelError::UnknownShareCode(_) => {
                    StatusCode::NOT_FOUND
                }
                TravelError::Conflict(_) => StatusCode::CONFLICT,
                TravelError::Generation { .. } => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.status();
        if code.is_server_error() {
            error!("Request failed: {self}");
        }
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (code, body).into_response()
    }
}
