//! High-level async API for the travel planner.
//!
//! [`TripPlanner`] is the single entry point used by the server. Every
//! operation opens its own [`Database`] connection inside
//! [`tokio::task::spawn_blocking`], so SQLite work never blocks the async
//! runtime, and each mutation commits or rolls back as a whole.
//!
//! Calls to the text generator are awaited directly on the runtime; only the
//! storage before and after them moves to the blocking pool.
//!
//! ## Submodules
//!
//! - [`builder`]: configures database path, generator and password cost
//! - [`account_ops`]: registration, login and profile changes
//! - [`trip_ops`]: trips, sharing, copying and the dashboard
//! - [`stop_ops`]: stops and the activities scheduled on them
//! - [`budget_ops`]: budget reads and updates
//! - [`catalog_ops`]: cities, activities and generated suggestions
//! - [`itinerary_ops`]: generated itineraries
//! - [`saved_ops`]: saved destinations
//!
//! # Usage
//!
//! ```rust,no_run
//! use wayfarer_core::{params::CreateTrip, TripPlannerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = TripPlannerBuilder::new()
//!     .with_database_path(Some("/tmp/wayfarer.db"))
//!     .build()
//!     .await?;
//!
//! let trip = planner
//!     .create_trip(
//!         1,
//!         &CreateTrip {
//!             name: Some("Rajasthan loop".to_string()),
//!             start_date: Some("2026-12-01".to_string()),
//!             end_date: Some("2026-12-10".to_string()),
//!             ..CreateTrip::default()
//!         },
//!     )
//!     .await?;
//! println!("{} days", trip.trip.total_days);
//! # Ok(())
//! # }
//! ```

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::task;

use crate::{
    db::Database,
    error::{Result, TravelError},
    generation::TextGenerator,
};

pub mod account_ops;
pub mod builder;
pub mod budget_ops;
pub mod catalog_ops;
pub mod itinerary_ops;
pub mod saved_ops;
pub mod stop_ops;
pub mod trip_ops;


pub use builder::TripPlannerBuilder;

/// Main planner interface.
pub struct TripPlanner {
    pub(crate) db_path: PathBuf,
    pub(crate) generator: Arc<dyn TextGenerator>,
    pub(crate) hash_cost: u32,
}

impl TripPlanner {
    pub(crate) fn new(db_path: PathBuf, generator: Arc<dyn TextGenerator>, hash_cost: u32) -> Self {
        Self {
            db_path,
            generator,
            hash_cost,
        }
    }

    /// Location of the SQLite database file.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Name of the configured text generator.
    pub fn generator_name(&self) -> &str {
        self.generator.name()
    }

    /// Runs `op` against a fresh connection on the blocking pool.
    pub(crate) async fn with_db<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(TravelError::join)?
    }

    /// Loads the sample catalogue into an empty database.
    pub async fn seed_catalogue(&self) -> Result<bool> {
        self.with_db(|db| db.seed_catalogue()).await
    }
}
