//! Saved destination bookmarks.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, Row};

use super::utils::{id_at, timestamp_at};
use crate::{
    error::{DatabaseResultExt, LookupResultExt, Result, TravelError},
    models::{SaveOutcome, SavedDestination},
};

const SAVED_OWNER_SQL: &str = "SELECT user_id FROM saved_destinations WHERE id = ?1";
const SAVED_EXISTS_SQL: &str =
    "SELECT id FROM saved_destinations WHERE user_id = ?1 AND city_id = ?2";
const INSERT_SAVED_SQL: &str =
    "INSERT INTO saved_destinations (user_id, city_id, saved_at) VALUES (?1, ?2, ?3)";
const DELETE_SAVED_SQL: &str = "DELETE FROM saved_destinations WHERE id = ?1";

impl super::Database {
    fn build_saved_from_row(row: &Row) -> rusqlite::Result<SavedDestination> {
        Ok(SavedDestination {
            id: id_at(row, 0)?,
            user_id: id_at(row, 1)?,
            saved_at: timestamp_at(row, 2)?,
            city: Self::build_city_from_row(row, 3)?,
        })
    }

    fn saved_sql(filter: &str) -> String {
        format!(
            "SELECT sd.id, sd.user_id, sd.saved_at, {} FROM saved_destinations sd JOIN cities c ON c.id = sd.city_id WHERE {filter}",
            Self::city_columns("c")
        )
    }

    /// A user's saved destinations, newest first.
    pub fn list_saved(&self, user_id: u64) -> Result<Vec<SavedDestination>> {
        let sql = Self::saved_sql("sd.user_id = ?1 ORDER BY sd.id DESC");
        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare saved destination query")?;
        let saved = stmt
            .query_map(params![user_id as i64], Self::build_saved_from_row)
            .db_context("Failed to query saved destinations")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read saved destination row")?;
        Ok(saved)
    }

    /// Bookmarks a city. Saving a city twice leaves the first bookmark in
    /// place and reports [`SaveOutcome::AlreadySaved`].
    pub fn save_destination(&mut self, user_id: u64, city_id: u64) -> Result<SaveOutcome> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let city_exists: bool = tx
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM cities WHERE id = ?1)",
                params![city_id as i64],
                |row| row.get(0),
            )
            .db_context("Failed to look up city")?;
        if !city_exists {
            return Err(TravelError::not_found("City", city_id));
        }

        let existing: Option<i64> = tx
            .query_row(
                SAVED_EXISTS_SQL,
                params![user_id as i64, city_id as i64],
                |row| row.get(0),
            )
            .optional()
            .db_context("Failed to query saved destination")?;
        if existing.is_some() {
            return Ok(SaveOutcome::AlreadySaved);
        }

        tx.execute(
            INSERT_SAVED_SQL,
            params![user_id as i64, city_id as i64, Timestamp::now().to_string()],
        )
        .db_context("Failed to save destination")?;
        let id = tx.last_insert_rowid();

        let sql = Self::saved_sql("sd.id = ?1");
        let saved = tx
            .query_row(&sql, params![id], Self::build_saved_from_row)
            .db_context("Failed to read saved destination")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(SaveOutcome::Created(saved))
    }

    /// Removes a bookmark owned by the user.
    pub fn remove_saved(&mut self, saved_id: u64, user_id: u64) -> Result<()> {
        let owner = self
            .connection
            .query_row(SAVED_OWNER_SQL, params![saved_id as i64], |row| id_at(row, 0))
            .or_not_found("Saved destination", saved_id, "Failed to query saved destination")?;
        if owner != user_id {
            return Err(TravelError::forbidden(
                "Saved destination belongs to another user",
            ));
        }
        self.connection
            .execute(DELETE_SAVED_SQL, params![saved_id as i64])
            .db_context("Failed to delete saved destination")?;
        Ok(())
    }
}
