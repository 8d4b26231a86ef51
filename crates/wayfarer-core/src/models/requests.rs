//! Validated request types handed to the database layer.
//!
//! Each type is produced from its loosely typed counterpart in
//! [`crate::params`] through `TryFrom`, so anything that reaches
//! [`crate::db::Database`] has already passed field validation.

use jiff::civil::Date;

use super::TimeOfDay;
use crate::{
    budget::validate_amount,
    error::{Result, TravelError},
    params::{
        parse_date, parse_optional_date, require_text, AddItineraryActivity, AddStop, CreateTrip,
        UpdateBudget, UpdateProfile, UpdateStop, UpdateTrip,
    },
    sequence::parse_position,
};

/// A trip ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrip {
    pub name: String,
    pub description: Option<String>,
    pub start_date: Date,
    pub end_date: Date,
    pub cover_photo_url: Option<String>,
}

/// Partial update of a trip. Date ordering is checked against the stored
/// values once they are known.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub cover_photo_url: Option<String>,
    pub is_public: Option<bool>,
}

/// A stop ready to be placed into a trip.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStop {
    pub city_id: u64,
    pub start_date: Date,
    pub end_date: Date,
    pub notes: Option<String>,
    /// Requested 1-based slot; `None` appends
    pub position: Option<i64>,
}

/// Partial update of a stop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StopChanges {
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub notes: Option<String>,
    /// Requested 1-based slot; `None` keeps the current one
    pub position: Option<i64>,
}

/// An activity to schedule on a stop.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItineraryItem {
    pub activity_id: u64,
    pub day_number: u32,
    pub time_of_day: TimeOfDay,
    pub custom_notes: Option<String>,
    pub cost_override: Option<f64>,
}

/// New values for the user-settable budget buckets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetChanges {
    pub transport: Option<f64>,
    pub accommodation: Option<f64>,
    pub food: Option<f64>,
    pub misc: Option<f64>,
    pub currency: Option<String>,
}

/// Partial update of a user profile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub photo_url: Option<String>,
    pub language_preference: Option<String>,
}

fn ensure_ordered(start: Date, end: Date) -> Result<()> {
    if start > end {
        return Err(TravelError::invalid_input("end_date")
            .with_reason("start_date must not be after end_date"));
    }
    Ok(())
}

impl NewTrip {
    /// Re-checks the date range; used by copies and tests that build the
    /// type directly.
    pub fn check_dates(&self) -> Result<()> {
        ensure_ordered(self.start_date, self.end_date)
    }
}

impl TripChanges {
    /// Merges the requested dates with the stored ones and validates the
    /// resulting range.
    pub fn resolve_dates(&self, start: Date, end: Date) -> Result<(Date, Date)> {
        let start = self.start_date.unwrap_or(start);
        let end = self.end_date.unwrap_or(end);
        ensure_ordered(start, end)?;
        Ok((start, end))
    }
}

impl StopChanges {
    /// Merges the requested dates with the stored ones and validates the
    /// resulting range.
    pub fn resolve_dates(&self, start: Date, end: Date) -> Result<(Date, Date)> {
        let start = self.start_date.unwrap_or(start);
        let end = self.end_date.unwrap_or(end);
        ensure_ordered(start, end)?;
        Ok((start, end))
    }
}

impl TryFrom<&CreateTrip> for NewTrip {
    type Error = TravelError;

    fn try_from(params: &CreateTrip) -> Result<Self> {
        let name = require_text("name", params.name.as_deref())?;
        let start_date = parse_date("start_date", params.start_date.as_deref())?;
        let end_date = parse_date("end_date", params.end_date.as_deref())?;
        ensure_ordered(start_date, end_date)?;
        Ok(Self {
            name,
            description: params.description.clone(),
            start_date,
            end_date,
            cover_photo_url: params.cover_photo_url.clone(),
        })
    }
}

impl TryFrom<&UpdateTrip> for TripChanges {
    type Error = TravelError;

    fn try_from(params: &UpdateTrip) -> Result<Self> {
        let name = match params.name.as_deref() {
            Some(name) => Some(require_text("name", Some(name))?),
            None => None,
        };
        Ok(Self {
            name,
            description: params.description.clone(),
            start_date: parse_optional_date("start_date", params.start_date.as_deref())?,
            end_date: parse_optional_date("end_date", params.end_date.as_deref())?,
            cover_photo_url: params.cover_photo_url.clone(),
            is_public: params.is_public,
        })
    }
}

impl TryFrom<&AddStop> for NewStop {
    type Error = TravelError;

    fn try_from(params: &AddStop) -> Result<Self> {
        let city_id = params
            .city_id
            .ok_or_else(|| TravelError::invalid_input("city_id").with_reason("is required"))?;
        let start_date = parse_date("start_date", params.start_date.as_deref())?;
        let end_date = parse_date("end_date", params.end_date.as_deref())?;
        ensure_ordered(start_date, end_date)?;
        Ok(Self {
            city_id,
            start_date,
            end_date,
            notes: params.notes.clone(),
            position: parse_position("order_index", &params.order_index)?,
        })
    }
}

impl TryFrom<&UpdateStop> for StopChanges {
    type Error = TravelError;

    fn try_from(params: &UpdateStop) -> Result<Self> {
        Ok(Self {
            start_date: parse_optional_date("start_date", params.start_date.as_deref())?,
            end_date: parse_optional_date("end_date", params.end_date.as_deref())?,
            notes: params.notes.clone(),
            position: parse_position("order_index", &params.order_index)?,
        })
    }
}

impl TryFrom<&AddItineraryActivity> for NewItineraryItem {
    type Error = TravelError;

    fn try_from(params: &AddItineraryActivity) -> Result<Self> {
        let activity_id = params
            .activity_id
            .ok_or_else(|| TravelError::invalid_input("activity_id").with_reason("is required"))?;
        let day_number = params.day_number.unwrap_or(1);
        if day_number == 0 {
            return Err(TravelError::invalid_input("day_number").with_reason("must be at least 1"));
        }
        let time_of_day = match params.time_of_day.as_deref() {
            Some(slot) => slot
                .parse::<TimeOfDay>()
                .map_err(|reason| TravelError::invalid_input("time_of_day").with_reason(reason))?,
            None => TimeOfDay::default(),
        };
        let cost_override = params
            .estimated_cost_override
            .map(|cost| validate_amount("estimated_cost_override", cost))
            .transpose()?;
        Ok(Self {
            activity_id,
            day_number,
            time_of_day,
            custom_notes: params.custom_notes.clone(),
            cost_override,
        })
    }
}

impl TryFrom<&UpdateBudget> for BudgetChanges {
    type Error = TravelError;

    fn try_from(params: &UpdateBudget) -> Result<Self> {
        let check = |field: &str, value: Option<f64>| {
            value.map(|amount| validate_amount(field, amount)).transpose()
        };
        let currency = match params.currency.as_deref() {
            Some(code) => Some(require_text("currency", Some(code))?.to_uppercase()),
            None => None,
        };
        Ok(Self {
            transport: check("transport_cost", params.transport_cost)?,
            accommodation: check("accommodation_cost", params.accommodation_cost)?,
            food: check("food_cost", params.food_cost)?,
            misc: check("misc_cost", params.misc_cost)?,
            currency,
        })
    }
}

impl TryFrom<&UpdateProfile> for ProfileChanges {
    type Error = TravelError;

    fn try_from(params: &UpdateProfile) -> Result<Self> {
        let name = match params.name.as_deref() {
            Some(name) => Some(require_text("name", Some(name))?),
            None => None,
        };
        let language_preference = match params.language_preference.as_deref() {
            Some(code) => Some(require_text("language_preference", Some(code))?),
            None => None,
        };
        Ok(Self {
            name,
            photo_url: params.photo_url.clone(),
            language_preference,
        })
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_new_trip_rejects_reversed_dates() {
        let params = CreateTrip {
            name: Some("Rajasthan loop".to_string()),
            start_date: Some("2025-03-10".to_string()),
            end_date: Some("2025-03-01".to_string()),
            ..Default::default()
        };
        let err = NewTrip::try_from(&params).unwrap_err();
        assert!(matches!(err, TravelError::InvalidInput { ref field, .. } if field == "end_date"));
    }

    #[test]
    fn test_new_trip_accepts_datetime_strings() {
        let params = CreateTrip {
            name: Some("Goa".to_string()),
            start_date: Some("2025-03-01T00:00:00".to_string()),
            end_date: Some("2025-03-04".to_string()),
            ..Default::default()
        };
        let trip = NewTrip::try_from(&params).unwrap();
        assert_eq!(trip.start_date, date(2025, 3, 1));
        assert_eq!(trip.end_date, date(2025, 3, 4));
    }

    #[test]
    fn test_trip_changes_resolve_against_stored_dates() {
        let changes = TripChanges {
            end_date: Some(date(2025, 2, 1)),
            ..Default::default()
        };
        assert!(changes
            .resolve_dates(date(2025, 3, 1), date(2025, 3, 9))
            .is_err());
        let changes = TripChanges {
            end_date: Some(date(2025, 3, 20)),
            ..Default::default()
        };
        assert_eq!(
            changes
                .resolve_dates(date(2025, 3, 1), date(2025, 3, 9))
                .unwrap(),
            (date(2025, 3, 1), date(2025, 3, 20))
        );
    }

    #[test]
    fn test_new_stop_parses_string_position() {
        let params = AddStop {
            city_id: Some(3),
            start_date: Some("2025-03-01".to_string()),
            end_date: Some("2025-03-02".to_string()),
            notes: None,
            order_index: json!("2"),
        };
        assert_eq!(NewStop::try_from(&params).unwrap().position, Some(2));
    }

    #[test]
    fn test_new_stop_rejects_word_position() {
        let params = AddStop {
            city_id: Some(3),
            start_date: Some("2025-03-01".to_string()),
            end_date: Some("2025-03-02".to_string()),
            notes: None,
            order_index: json!("first"),
        };
        assert!(NewStop::try_from(&params).is_err());
    }

    #[test]
    fn test_itinerary_item_defaults() {
        let params = AddItineraryActivity {
            activity_id: Some(9),
            ..Default::default()
        };
        let item = NewItineraryItem::try_from(&params).unwrap();
        assert_eq!(item.day_number, 1);
        assert_eq!(item.time_of_day, TimeOfDay::Morning);
        assert_eq!(item.cost_override, None);
    }

    #[test]
    fn test_itinerary_item_rejects_unknown_slot() {
        let params = AddItineraryActivity {
            activity_id: Some(9),
            time_of_day: Some("brunch".to_string()),
            ..Default::default()
        };
        assert!(NewItineraryItem::try_from(&params).is_err());
    }

    #[test]
    fn test_budget_changes_reject_negative() {
        let params = UpdateBudget {
            food_cost: Some(-5.0),
            ..Default::default()
        };
        let err = BudgetChanges::try_from(&params).unwrap_err();
        assert!(matches!(err, TravelError::InvalidInput { ref field, .. } if field == "food_cost"));
    }
}
