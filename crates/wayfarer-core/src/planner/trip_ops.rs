//! Trip operations for the TripPlanner.

use jiff::Zoned;

use super::TripPlanner;
use crate::{
    error::Result,
    models::{DashboardStats, NewTrip, Trip, TripChanges, TripDetail},
    params::{CreateTrip, UpdateTrip},
};

impl TripPlanner {
    /// Creates a trip with an empty budget.
    pub async fn create_trip(&self, user_id: u64, params: &CreateTrip) -> Result<TripDetail> {
        let trip = NewTrip::try_from(params)?;
        self.with_db(move |db| db.create_trip(user_id, &trip)).await
    }

    /// The user's trips, newest first.
    pub async fn list_trips(&self, user_id: u64) -> Result<Vec<Trip>> {
        self.with_db(move |db| db.list_trips(user_id)).await
    }

    /// A trip with stops and budget, for its owner.
    pub async fn get_trip(&self, trip_id: u64, user_id: u64) -> Result<TripDetail> {
        self.with_db(move |db| db.owned_trip_detail(trip_id, user_id)).await
    }

    pub async fn update_trip(
        &self,
        trip_id: u64,
        user_id: u64,
        params: &UpdateTrip,
    ) -> Result<TripDetail> {
        let changes = TripChanges::try_from(params)?;
        self.with_db(move |db| db.update_trip(trip_id, user_id, &changes)).await
    }

    pub async fn delete_trip(&self, trip_id: u64, user_id: u64) -> Result<()> {
        self.with_db(move |db| db.delete_trip(trip_id, user_id)).await
    }

    /// A public trip looked up by share code. No session needed.
    pub async fn shared_trip(&self, share_code: &str) -> Result<TripDetail> {
        let share_code = share_code.to_string();
        self.with_db(move |db| db.shared_trip(&share_code)).await
    }

    /// Copies an owned or public trip into the user's account.
    pub async fn copy_trip(&self, trip_id: u64, user_id: u64) -> Result<TripDetail> {
        self.with_db(move |db| db.copy_trip(trip_id, user_id)).await
    }

    /// Dashboard numbers, with "upcoming" judged against today's date in
    /// the server's time zone.
    pub async fn dashboard(&self, user_id: u64) -> Result<DashboardStats> {
        let today = Zoned::now().date();
        self.with_db(move |db| db.dashboard(user_id, today)).await
    }
}
