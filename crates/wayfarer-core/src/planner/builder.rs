//! Builder for creating and configuring [`TripPlanner`] instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::task;

use super::TripPlanner;
use crate::{
    db::Database,
    error::{Result, TravelError},
    generation::{DisabledGenerator, TextGenerator},
};

/// Builder for creating and configuring [`TripPlanner`] instances.
#[derive(Clone)]
pub struct TripPlannerBuilder {
    database_path: Option<PathBuf>,
    generator: Option<Arc<dyn TextGenerator>>,
    hash_cost: u32,
}

impl TripPlannerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            generator: None,
            hash_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/wayfarer/wayfarer.db` or
    /// `~/.local/share/wayfarer/wayfarer.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the text generator. Defaults to [`DisabledGenerator`].
    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Sets the bcrypt cost used for new password hashes.
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    /// Builds the configured planner, creating the database file and schema
    /// if needed.
    ///
    /// # Errors
    ///
    /// Returns `TravelError::FileSystem` if the database directory cannot be
    /// created and `TravelError::Database` if schema setup fails.
    pub async fn build(self) -> Result<TripPlanner> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| TravelError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), TravelError>(())
        })
        .await
        .map_err(TravelError::join)??;

        let generator = self
            .generator
            .unwrap_or_else(|| Arc::new(DisabledGenerator));

        Ok(TripPlanner::new(db_path, generator, self.hash_cost))
    }

    /// Returns the default database path following the XDG Base Directory
    /// specification.
    pub fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("wayfarer")
            .place_data_file("wayfarer.db")
            .map_err(|e| TravelError::XdgDirectory(e.to_string()))
    }
}

impl Default for TripPlannerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
