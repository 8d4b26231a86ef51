use std::sync::Arc;

use wayfarer_core::TripPlanner;

use crate::session::SessionStore;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<TripPlanner>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(planner: TripPlanner) -> Self {
        Self {
            planner: Arc::new(planner),
            sessions: Arc::new(SessionStore::new()),
        }
    }
}
