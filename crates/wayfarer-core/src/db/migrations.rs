//! Database schema initialization and migrations.

use log::info;

use crate::error::{DatabaseResultExt, Result};

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Foreign keys are off by default in SQLite, per connection
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()?;

        Ok(())
    }

    /// Apply database migrations for existing databases
    fn apply_migrations(&self) -> Result<()> {
        let has_itinerary_column: bool = self
            .connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('trips') WHERE name = 'ai_itinerary'",
                [],
                |row| row.get(0),
            )
            .map(|count: i64| count > 0)
            .db_context("Failed to inspect trips table")?;

        if !has_itinerary_column {
            info!("Adding ai_itinerary column to trips table");
            self.connection
                .execute("ALTER TABLE trips ADD COLUMN ai_itinerary TEXT", [])
                .db_context("Failed to add ai_itinerary column to trips table")?;
        }

        Ok(())
    }
}
