//! HTTP API for the Wayfarer travel planner.
//!
//! The router in [`http`] exposes the [`wayfarer_core::TripPlanner`]
//! operations as JSON endpoints under `/api`. Authentication uses an
//! in-memory cookie session ([`session`]); errors map to status codes in
//! [`error`].

pub mod error;
pub mod extract;
pub mod http;
pub mod session;
pub mod state;

pub use error::ApiError;
pub use http::router;
pub use state::AppState;
