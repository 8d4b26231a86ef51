//! Budget operations for the TripPlanner.

use super::TripPlanner;
use crate::{
    error::Result,
    models::{Budget, BudgetChanges},
    params::UpdateBudget,
};

impl TripPlanner {
    /// The trip's budget with the activities bucket and total recomputed.
    pub async fn get_budget(&self, trip_id: u64, user_id: u64) -> Result<Budget> {
        self.with_db(move |db| db.get_budget(trip_id, user_id)).await
    }

    pub async fn update_budget(
        &self,
        trip_id: u64,
        user_id: u64,
        params: &UpdateBudget,
    ) -> Result<Budget> {
        let changes = BudgetChanges::try_from(params)?;
        self.with_db(move |db| db.update_budget(trip_id, user_id, &changes)).await
    }
}
