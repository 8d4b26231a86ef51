//! Parameter structures for Wayfarer operations.
//!
//! These are the loosely typed shapes accepted from callers (JSON bodies and
//! query strings). Every field is optional or defaulted at this level so
//! that a missing value surfaces as a field-level
//! [`TravelError::InvalidInput`] rather than a framework rejection.
//! Conversion into the validated types in [`crate::models::requests`]
//! happens through `TryFrom`.

use jiff::civil::{Date, DateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{Result, TravelError},
    models::{ActivityCategory, ActivityFilter, CityFilter},
};

/// Interests used when the caller does not name any.
pub const DEFAULT_INTERESTS: [&str; 3] = ["cultural", "adventure", "food"];

/// Parameters for creating an account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterUser {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

impl RegisterUser {
    /// Returns the trimmed, lowercased email, the password and the name.
    pub fn validate(&self) -> Result<(String, String, String)> {
        let email = require_text("email", self.email.as_deref())?.to_lowercase();
        if !email.contains('@') {
            return Err(TravelError::invalid_input("email").with_reason("is not an email address"));
        }
        let password = self
            .password
            .clone()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| TravelError::invalid_input("password").with_reason("is required"))?;
        let name = require_text("name", self.name.as_deref())?;
        Ok((email, password, name))
    }
}

/// Parameters for logging in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Login {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Login {
    /// Returns the normalised email and the password.
    pub fn validate(&self) -> Result<(String, String)> {
        let email = require_text("email", self.email.as_deref())?.to_lowercase();
        let password = self
            .password
            .clone()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| TravelError::invalid_input("password").with_reason("is required"))?;
        Ok((email, password))
    }
}

/// Partial profile update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub photo_url: Option<String>,
    pub language_preference: Option<String>,
}

/// Parameters for creating a trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateTrip {
    pub name: Option<String>,
    /// `YYYY-MM-DD`, or an ISO datetime whose date part is used
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
    pub cover_photo_url: Option<String>,
}

/// Partial trip update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateTrip {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub cover_photo_url: Option<String>,
    pub is_public: Option<bool>,
}

/// Parameters for adding a stop to a trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AddStop {
    pub city_id: Option<u64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub notes: Option<String>,
    /// 1-based slot; integer, integral float or numeric string. Absent or
    /// `null` appends.
    pub order_index: Value,
}

/// Partial stop update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateStop {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub notes: Option<String>,
    /// New 1-based slot. Absent or `null` keeps the current one.
    pub order_index: Value,
}

/// Parameters for scheduling an activity on a stop.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AddItineraryActivity {
    pub activity_id: Option<u64>,
    pub day_number: Option<u32>,
    pub time_of_day: Option<String>,
    pub custom_notes: Option<String>,
    pub estimated_cost_override: Option<f64>,
}

/// New values for a trip's budget buckets. The activities bucket is derived
/// and cannot be set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateBudget {
    pub transport_cost: Option<f64>,
    pub accommodation_cost: Option<f64>,
    pub food_cost: Option<f64>,
    pub misc_cost: Option<f64>,
    pub currency: Option<String>,
}

/// Parameters for generating a trip itinerary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateItinerary {
    pub budget_min: f64,
    pub budget_max: f64,
    pub preferences: Vec<String>,
}

impl Default for GenerateItinerary {
    fn default() -> Self {
        Self {
            budget_min: 1000.0,
            budget_max: 5000.0,
            preferences: Vec::new(),
        }
    }
}

impl GenerateItinerary {
    pub fn validate(&self) -> Result<()> {
        crate::budget::validate_amount("budget_min", self.budget_min)?;
        crate::budget::validate_amount("budget_max", self.budget_max)?;
        if self.budget_min > self.budget_max {
            return Err(TravelError::invalid_input("budget_max")
                .with_reason("must not be lower than budget_min"));
        }
        Ok(())
    }
}

/// Parameters for asking the generator about activities in a named city.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestActivities {
    pub city_name: Option<String>,
    pub interests: Vec<String>,
    pub budget_per_activity: Option<f64>,
}

/// Parameters for refreshing a city's catalogue from the generator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshActivities {
    /// Defaults to [`DEFAULT_INTERESTS`]
    pub interests: Option<Vec<String>>,
    /// Defaults to 2000
    pub max_budget: Option<f64>,
}

/// Query parameters for city search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCities {
    pub q: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub limit: Option<u32>,
}

impl From<&SearchCities> for CityFilter {
    fn from(params: &SearchCities) -> Self {
        Self {
            query: non_blank(params.q.as_deref()),
            country: non_blank(params.country.as_deref()),
            region: non_blank(params.region.as_deref()),
            limit: params.limit.unwrap_or(20),
        }
    }
}

/// Query parameters for browsing one city's activities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowseActivities {
    pub category: Option<String>,
    pub max_cost: Option<f64>,
    pub max_duration: Option<f64>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl BrowseActivities {
    pub fn to_filter(&self, city_id: u64) -> Result<ActivityFilter> {
        Ok(ActivityFilter {
            query: None,
            city_id: Some(city_id),
            category: parse_category(self.category.as_deref())?,
            max_cost: self.max_cost,
            max_duration: self.max_duration,
            limit: self.limit.unwrap_or(20),
            offset: self.offset.unwrap_or(0),
        })
    }
}

/// Query parameters for searching activities across the catalogue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchActivities {
    pub q: Option<String>,
    pub category: Option<String>,
    pub max_cost: Option<f64>,
    pub city_id: Option<u64>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl TryFrom<&SearchActivities> for ActivityFilter {
    type Error = TravelError;

    fn try_from(params: &SearchActivities) -> Result<Self> {
        Ok(Self {
            query: non_blank(params.q.as_deref()),
            city_id: params.city_id,
            category: parse_category(params.category.as_deref())?,
            max_cost: params.max_cost,
            max_duration: None,
            limit: params.limit.unwrap_or(20),
            offset: params.offset.unwrap_or(0),
        })
    }
}

/// Parameters for bookmarking a city.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveDestination {
    pub city_id: Option<u64>,
}

/// Query parameters for the popular cities list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PopularCities {
    pub limit: Option<u32>,
}

/// Returns the trimmed value, or an `InvalidInput` error for a missing or
/// blank one.
pub fn require_text(field: &str, value: Option<&str>) -> Result<String> {
    non_blank(value).ok_or_else(|| TravelError::invalid_input(field).with_reason("is required"))
}

/// Parses a calendar date. Accepts `YYYY-MM-DD` and ISO datetimes, whose
/// date part is kept.
pub fn parse_date(field: &str, value: Option<&str>) -> Result<Date> {
    let text = require_text(field, value)?;
    if let Ok(date) = text.parse::<Date>() {
        return Ok(date);
    }
    text.parse::<DateTime>()
        .map(|dt| dt.date())
        .map_err(|_| TravelError::invalid_input(field).with_reason(format!("'{text}' is not a date")))
}

/// Like [`parse_date`] but an absent value is not an error.
pub fn parse_optional_date(field: &str, value: Option<&str>) -> Result<Option<Date>> {
    match value {
        Some(text) => parse_date(field, Some(text)).map(Some),
        None => Ok(None),
    }
}

fn parse_category(value: Option<&str>) -> Result<Option<ActivityCategory>> {
    match non_blank(value) {
        Some(text) => text
            .parse::<ActivityCategory>()
            .map(Some)
            .map_err(|reason| TravelError::invalid_input("category").with_reason(reason)),
        None => Ok(None),
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
