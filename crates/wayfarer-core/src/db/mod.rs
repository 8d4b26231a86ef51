//! SQLite storage for accounts, the catalogue and trips.
//!
//! [`Database`] wraps one rusqlite connection. Queries are grouped by the
//! entity they serve, each file adding an `impl Database` block. Every
//! mutation that touches more than one row runs inside a single transaction
//! so that a failure leaves nothing half-applied.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod budget_queries;
pub mod city_queries;
pub mod itinerary_queries;
pub mod migrations;
pub mod saved_queries;
pub mod seed;
pub mod stop_queries;
pub mod trip_queries;
pub mod user_queries;
pub(crate) mod utils;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (creating if needed) the database file and brings the schema up
    /// to date.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Opens a private in-memory database. Used by tests.
    pub fn in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
