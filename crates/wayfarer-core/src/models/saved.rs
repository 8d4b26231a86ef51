//! Saved destination bookmarks.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::City;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedDestination {
    pub id: u64,
    pub user_id: u64,
    pub city: City,
    pub saved_at: Timestamp,
}

/// Outcome of a save request; saving twice is not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Created(SavedDestination),
    AlreadySaved,
}
