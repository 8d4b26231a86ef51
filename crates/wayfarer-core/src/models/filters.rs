//! Filter types for querying the catalogue.

use super::ActivityCategory;

/// Filter options for searching cities.
#[derive(Debug, Clone)]
pub struct CityFilter {
    /// Case-insensitive partial match on name or country
    pub query: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub limit: u32,
}

impl Default for CityFilter {
    fn default() -> Self {
        Self {
            query: None,
            country: None,
            region: None,
            limit: 20,
        }
    }
}

/// Filter options for listing and searching activities.
#[derive(Debug, Clone)]
pub struct ActivityFilter {
    /// Case-insensitive partial match on name or description
    pub query: Option<String>,
    pub city_id: Option<u64>,
    pub category: Option<ActivityCategory>,
    pub max_cost: Option<f64>,
    pub max_duration: Option<f64>,
    pub limit: u32,
    pub offset: u32,
}

impl Default for ActivityFilter {
    fn default() -> Self {
        Self {
            query: None,
            city_id: None,
            category: None,
            max_cost: None,
            max_duration: None,
            limit: 20,
            offset: 0,
        }
    }
}

impl ActivityFilter {
    /// Filter restricted to one city.
    pub fn for_city(city_id: u64) -> Self {
        Self {
            city_id: Some(city_id),
            ..Default::default()
        }
    }
}
