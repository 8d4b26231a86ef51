//! Stop and itinerary item operations for the TripPlanner.

use super::TripPlanner;
use crate::{
    error::Result,
    models::{ItineraryActivity, NewItineraryItem, NewStop, StopChanges, StopDetail},
    params::{AddItineraryActivity, AddStop, UpdateStop},
};

impl TripPlanner {
    /// Adds a stop to a trip, at `order_index` when given, otherwise last.
    pub async fn add_stop(
        &self,
        trip_id: u64,
        user_id: u64,
        params: &AddStop,
    ) -> Result<StopDetail> {
        let stop = NewStop::try_from(params)?;
        self.with_db(move |db| db.add_stop(trip_id, user_id, &stop)).await
    }

    /// Updates a stop; an `order_index` moves it within its trip.
    pub async fn update_stop(
        &self,
        stop_id: u64,
        user_id: u64,
        params: &UpdateStop,
    ) -> Result<StopDetail> {
        let changes = StopChanges::try_from(params)?;
        self.with_db(move |db| db.update_stop(stop_id, user_id, &changes)).await
    }

    pub async fn remove_stop(&self, stop_id: u64, user_id: u64) -> Result<()> {
        self.with_db(move |db| db.remove_stop(stop_id, user_id)).await
    }

    /// Schedules a catalogue activity on a stop.
    pub async fn add_itinerary_activity(
        &self,
        stop_id: u64,
        user_id: u64,
        params: &AddItineraryActivity,
    ) -> Result<ItineraryActivity> {
        let item = NewItineraryItem::try_from(params)?;
        self.with_db(move |db| db.add_itinerary_activity(stop_id, user_id, &item)).await
    }

    pub async fn remove_itinerary_activity(&self, item_id: u64, user_id: u64) -> Result<()> {
        self.with_db(move |db| db.remove_itinerary_activity(item_id, user_id)).await
    }
}
