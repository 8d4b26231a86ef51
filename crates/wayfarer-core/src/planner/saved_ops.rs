//! Saved destination operations for the TripPlanner.

use super::TripPlanner;
use crate::{
    error::{Result, TravelError},
    models::{SaveOutcome, SavedDestination},
    params::SaveDestination,
};

impl TripPlanner {
    pub async fn list_saved(&self, user_id: u64) -> Result<Vec<SavedDestination>> {
        self.with_db(move |db| db.list_saved(user_id)).await
    }

    /// Bookmarks a city; repeating the call is harmless.
    pub async fn save_destination(
        &self,
        user_id: u64,
        params: &SaveDestination,
    ) -> Result<SaveOutcome> {
        let city_id = params
            .city_id
            .ok_or_else(|| TravelError::invalid_input("city_id").with_reason("is required"))?;
        self.with_db(move |db| db.save_destination(user_id, city_id)).await
    }

    pub async fn remove_saved(&self, saved_id: u64, user_id: u64) -> Result<()> {
        self.with_db(move |db| db.remove_saved(saved_id, user_id)).await
    }
}
