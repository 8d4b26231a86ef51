//! Trip model definition and related functionality.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{Budget, GeneratedItinerary, StopDetail};

/// A trip owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    /// Unique identifier for the trip
    pub id: u64,

    /// Owning user
    pub user_id: u64,

    pub name: String,

    pub description: Option<String>,

    /// First day of the trip, inclusive
    pub start_date: Date,

    /// Last day of the trip, inclusive
    pub end_date: Date,

    pub cover_photo_url: Option<String>,

    /// Whether the trip can be read through its share code
    pub is_public: bool,

    /// Unique code used for sharing links
    pub share_code: String,

    /// Last generated itinerary, if one was requested
    pub ai_itinerary: Option<GeneratedItinerary>,

    /// Number of stops on the trip
    pub stops_count: u32,

    /// `end_date - start_date + 1`
    pub total_days: u32,

    /// Timestamp when the trip was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the trip was last modified (UTC)
    pub updated_at: Timestamp,
}

/// A trip with its ordered stops and its budget loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripDetail {
    #[serde(flatten)]
    pub trip: Trip,
    pub stops: Vec<StopDetail>,
    pub budget: Option<Budget>,
}

/// Number of calendar days covered by an inclusive date range.
///
/// Returns 0 for a reversed range.
pub fn inclusive_days(start: Date, end: Date) -> u32 {
    if end < start {
        return 0;
    }
    let span = end - start;
    u32::try_from(span.get_days()).map_or(0, |days| days + 1)
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_inclusive_days() {
        assert_eq!(inclusive_days(date(2025, 3, 1), date(2025, 3, 1)), 1);
        assert_eq!(inclusive_days(date(2025, 3, 1), date(2025, 3, 5)), 5);
        assert_eq!(inclusive_days(date(2024, 12, 30), date(2025, 1, 2)), 4);
        assert_eq!(inclusive_days(date(2025, 3, 5), date(2025, 3, 1)), 0);
    }
}
