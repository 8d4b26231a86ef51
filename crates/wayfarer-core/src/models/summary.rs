//! Aggregated views: dashboard statistics, category statistics and pages.

use serde::{Deserialize, Serialize};

use super::{Activity, ActivityCategory, Trip};

/// Numbers shown on a user's dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardStats {
    pub total_trips: u32,
    /// Trips starting today or later
    pub upcoming_trips: u32,
    pub saved_destinations: u32,
    /// Sum of every trip's recomputed budget total
    pub budget_total: f64,
    /// The five most recently updated trips
    pub recent_trips: Vec<Trip>,
}

/// Catalogue statistics for one activity category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryStats {
    pub category: ActivityCategory,
    pub count: u32,
    pub average_cost: f64,
}

/// Paging information returned with a slice of results.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub total: u32,
    pub limit: u32,
    pub offset: u32,
    pub has_more: bool,
}

impl Pagination {
    pub fn new(total: u32, limit: u32, offset: u32) -> Self {
        Self {
            total,
            limit,
            offset,
            has_more: offset.saturating_add(limit) < total,
        }
    }
}

/// Result of asking the generator for new activities in a city.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityRefresh {
    /// Suggestions whose name was new for the city
    pub added: u32,
    /// Every activity of the city after the refresh
    pub activities: Vec<Activity>,
}

/// One page of results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}
