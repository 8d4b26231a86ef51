//! Stop and itinerary item models.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{inclusive_days, Activity, City, TimeOfDay};

/// A city visit within a trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stop {
    pub id: u64,
    pub trip_id: u64,
    pub city_id: u64,

    /// 1-based position within the trip; the trip's stops always hold
    /// exactly `1..=N`
    pub order_index: u32,

    pub start_date: Date,
    pub end_date: Date,
    pub notes: Option<String>,

    /// `end_date - start_date + 1`
    pub duration_days: u32,
}

impl Stop {
    pub(crate) fn new(
        id: u64,
        trip_id: u64,
        city_id: u64,
        order_index: u32,
        start_date: Date,
        end_date: Date,
        notes: Option<String>,
    ) -> Self {
        Self {
            id,
            trip_id,
            city_id,
            order_index,
            start_date,
            end_date,
            notes,
            duration_days: inclusive_days(start_date, end_date),
        }
    }
}

/// A stop with its city and scheduled activities loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StopDetail {
    #[serde(flatten)]
    pub stop: Stop,
    pub city: City,
    pub activities: Vec<ItineraryActivity>,
}

/// An activity scheduled on a given day and time slot of a stop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItineraryActivity {
    pub id: u64,
    pub stop_id: u64,
    pub activity_id: u64,
    pub activity: Activity,

    /// Day of the stop, starting at 1
    pub day_number: u32,

    pub time_of_day: TimeOfDay,
    pub custom_notes: Option<String>,

    /// Traveller-supplied price that replaces the activity's default
    pub estimated_cost_override: Option<f64>,

    /// The override when present, otherwise the activity's estimated cost
    pub estimated_cost: f64,
}

impl ItineraryActivity {
    /// Sort key for a stop's schedule: day, then slot, then insertion order.
    pub fn schedule_key(&self) -> (u32, u8, u64) {
        (self.day_number, self.time_of_day.rank(), self.id)
    }
}
