//! Derived budget figures.
//!
//! The activities bucket is never stored as user input: it is the sum of the
//! effective cost of every itinerary item under the trip. The total is the sum
//! of all five buckets. Both are recomputed whenever a budget is read or
//! written.

use crate::{
    error::{Result, TravelError},
    models::{Budget, CostBreakdown},
};

/// Price inputs of a single itinerary item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostLine {
    /// Per-item override, when the traveller set one.
    pub override_cost: Option<f64>,
    /// Default price of the linked activity.
    pub activity_cost: f64,
}

impl CostLine {
    /// The override wins whenever it is present, including an override of 0.
    pub fn effective(&self) -> f64 {
        self.override_cost.unwrap_or(self.activity_cost)
    }
}

/// Sum of effective costs over every itinerary item of a trip.
pub fn activities_cost<'a, I>(lines: I) -> f64
where
    I: IntoIterator<Item = &'a CostLine>,
{
    lines.into_iter().map(CostLine::effective).sum()
}

/// Sum of the five buckets.
pub fn total(breakdown: &CostBreakdown) -> f64 {
    breakdown.transport
        + breakdown.accommodation
        + breakdown.food
        + breakdown.activities
        + breakdown.misc
}

/// Writes the derived activities bucket and the total into `budget`.
pub fn recompute(budget: &mut Budget, lines: &[CostLine]) {
    budget.breakdown.activities = activities_cost(lines);
    budget.total_budget = total(&budget.breakdown);
}

/// Rejects negative, infinite and NaN amounts.
pub fn validate_amount(field: &str, amount: f64) -> Result<f64> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(amount)
    } else {
        Err(TravelError::invalid_input(field).with_reason("must be a non-negative number"))
    }
}
