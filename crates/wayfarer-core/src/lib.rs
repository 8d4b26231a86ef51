//! Core library for the Wayfarer travel planner.
//!
//! This crate holds the business logic behind the HTTP server: accounts,
//! the destination catalogue, trips made of ordered city stops, activities
//! scheduled on those stops, budgets, saved destinations and itineraries
//! produced by a text-generation service.
//!
//! - [`sequence`] keeps a trip's stops densely numbered `1..=N` through
//!   inserts, moves and removals.
//! - [`ingest`] turns free generator text into a typed itinerary, falling
//!   back to the raw text when it does not parse.
//! - [`budget`] derives the activities bucket and the total of a budget.
//! - [`db`] stores everything in SQLite; [`planner`] wraps it in an async
//!   API and talks to the [`generation`] backend.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use wayfarer_core::{params::RegisterUser, TripPlannerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = TripPlannerBuilder::new()
//!     .with_database_path(Some("wayfarer.db"))
//!     .build()
//!     .await?;
//! planner.seed_catalogue().await?;
//!
//! let user = planner
//!     .register(&RegisterUser {
//!         email: Some("asha@example.com".to_string()),
//!         password: Some("correct horse".to_string()),
//!         name: Some("Asha".to_string()),
//!     })
//!     .await?;
//! println!("Registered {}", user.email);
//! # Ok(())
//! # }
//! ```

pub mod budget;
pub mod db;
pub mod error;
pub mod generation;
pub mod ingest;
pub mod models;
pub mod params;
pub mod planner;
pub mod sequence;

// Re-export commonly used types
pub use db::Database;
pub use error::{Result, TravelError};
pub use generation::{DisabledGenerator, GenerationRequest, GroqConfig, GroqGenerator, TextGenerator};
pub use models::{
    Activity, ActivityCategory, Budget, City, GeneratedItinerary, ItineraryActivity, SaveOutcome,
    SavedDestination, Stop, StopDetail, TimeOfDay, Trip, TripDetail, User,
};
pub use planner::{TripPlanner, TripPlannerBuilder};
