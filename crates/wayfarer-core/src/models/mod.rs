//! Data models for travellers, the destination catalogue and trips.
//!
//! Persisted entities ([`User`], [`City`], [`Activity`], [`Trip`], [`Stop`],
//! [`ItineraryActivity`], [`Budget`], [`SavedDestination`]) serialize to the
//! JSON shapes served by the HTTP layer. Derived fields such as
//! [`Trip::total_days`] and [`ItineraryActivity::estimated_cost`] are filled
//! in when rows are loaded and never stored.
//!
//! Generated itineraries are modelled separately in [`itinerary`], since the
//! text-generation service gives only advisory guarantees about their shape.

pub mod budget;
pub mod city;
pub mod filters;
pub mod itinerary;
pub mod kinds;
pub mod requests;
pub mod saved;
pub mod stop;
pub mod summary;
pub mod trip;
pub mod user;

pub use budget::{Budget, CostBreakdown};
pub use city::{Activity, City, NewActivity};
pub use filters::{ActivityFilter, CityFilter};
pub use itinerary::{
    Accommodation, BudgetBreakdown, DayPlan, GeneratedItinerary, ItineraryDoc, Meal,
    PlannedActivity, Transfer, TransportMode,
};
pub use kinds::{ActivityCategory, TimeOfDay};
pub use requests::{
    BudgetChanges, NewItineraryItem, NewStop, NewTrip, ProfileChanges, StopChanges, TripChanges,
};
pub use saved::{SaveOutcome, SavedDestination};
pub use stop::{ItineraryActivity, Stop, StopDetail};
pub use summary::{ActivityRefresh, CategoryStats, DashboardStats, Page, Pagination};
pub use trip::{inclusive_days, Trip, TripDetail};
pub use user::User;
