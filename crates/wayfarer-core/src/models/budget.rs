//! Trip budget model.

use serde::{Deserialize, Serialize};

/// The five cost buckets of a trip.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct CostBreakdown {
    pub transport: f64,
    pub accommodation: f64,
    pub food: f64,
    /// Derived from the trip's itinerary items; never set directly
    pub activities: f64,
    pub misc: f64,
}

/// Budget attached one-to-one to a trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: u64,
    pub trip_id: u64,
    /// Sum of all buckets, recomputed on every read and write
    pub total_budget: f64,
    pub breakdown: CostBreakdown,
    pub currency: String,
}
