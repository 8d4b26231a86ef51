//! Destination catalogue: cities and the activities they offer.

use serde::{Deserialize, Serialize};

use super::ActivityCategory;

/// A destination city.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct City {
    pub id: u64,
    pub name: String,
    pub country: String,
    pub region: Option<String>,
    pub description: Option<String>,
    /// Relative cost multiplier; 1.0 is the baseline
    pub cost_index: f64,
    pub popularity_score: i64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<String>,
}

/// Something to do in a city.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub id: u64,
    pub city_id: u64,
    pub name: String,
    pub description: Option<String>,
    pub category: ActivityCategory,
    pub estimated_cost: f64,
    pub duration_hours: f64,
    pub image_url: Option<String>,
}

/// Activity about to be inserted into the catalogue.
#[derive(Debug, Clone, PartialEq)]
pub struct NewActivity {
    pub name: String,
    pub description: Option<String>,
    pub category: ActivityCategory,
    pub estimated_cost: f64,
    pub duration_hours: f64,
}
