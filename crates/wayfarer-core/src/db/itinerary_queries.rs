//! Activities scheduled on a stop.

use jiff::Timestamp;
use rusqlite::{params, Row};

use super::utils::{count_at, ensure_item_owner, ensure_stop_owner, id_at, parsed_at, touch_trip};
use crate::{
    budget::CostLine,
    error::{DatabaseResultExt, Result, TravelError},
    models::{ItineraryActivity, NewItineraryItem, TimeOfDay},
};

const ITEM_COLUMNS: &str = "ia.id, ia.stop_id, ia.activity_id, ia.day_number, ia.time_of_day, ia.custom_notes, ia.estimated_cost_override";
const ACTIVITY_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM activities WHERE id = ?1)";
const INSERT_ITEM_SQL: &str = "INSERT INTO itinerary_activities (stop_id, activity_id, day_number, time_of_day, custom_notes, estimated_cost_override) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const DELETE_ITEM_SQL: &str = "DELETE FROM itinerary_activities WHERE id = ?1";

impl super::Database {
    fn build_item_from_row(row: &Row) -> rusqlite::Result<ItineraryActivity> {
        let activity = Self::build_activity_from_row(row, 7)?;
        let estimated_cost_override: Option<f64> = row.get(6)?;
        let line = CostLine {
            override_cost: estimated_cost_override,
            activity_cost: activity.estimated_cost,
        };

        Ok(ItineraryActivity {
            id: id_at(row, 0)?,
            stop_id: id_at(row, 1)?,
            activity_id: id_at(row, 2)?,
            day_number: count_at(row, 3)?,
            time_of_day: parsed_at::<TimeOfDay>(row, 4)?,
            custom_notes: row.get(5)?,
            estimated_cost_override,
            estimated_cost: line.effective(),
            activity,
        })
    }

    fn item_sql(filter: &str) -> String {
        format!(
            "SELECT {ITEM_COLUMNS}, {} FROM itinerary_activities ia JOIN activities a ON a.id = ia.activity_id WHERE {filter}",
            Self::activity_columns("a")
        )
    }

    /// A stop's schedule ordered by day, then time slot, then insertion.
    pub fn stop_schedule(&self, stop_id: u64) -> Result<Vec<ItineraryActivity>> {
        let sql = Self::item_sql("ia.stop_id = ?1");
        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare schedule query")?;
        let mut items = stmt
            .query_map(params![stop_id as i64], Self::build_item_from_row)
            .db_context("Failed to query schedule")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read schedule row")?;
        items.sort_by_key(ItineraryActivity::schedule_key);
        Ok(items)
    }

    /// Schedules a catalogue activity on a stop the user owns.
    pub fn add_itinerary_activity(
        &mut self,
        stop_id: u64,
        user_id: u64,
        item: &NewItineraryItem,
    ) -> Result<ItineraryActivity> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let trip_id = ensure_stop_owner(&tx, stop_id, user_id)?;
        let exists: bool = tx
            .query_row(
                ACTIVITY_EXISTS_SQL,
                params![item.activity_id as i64],
                |row| row.get(0),
            )
            .db_context("Failed to look up activity")?;
        if !exists {
            return Err(TravelError::not_found("Activity", item.activity_id));
        }

        tx.execute(
            INSERT_ITEM_SQL,
            params![
                stop_id as i64,
                item.activity_id as i64,
                item.day_number,
                item.time_of_day.as_str(),
                item.custom_notes.as_deref(),
                item.cost_override
            ],
        )
        .db_context("Failed to insert itinerary activity")?;
        let item_id = tx.last_insert_rowid();

        touch_trip(&tx, trip_id, &Timestamp::now().to_string())?;

        let sql = Self::item_sql("ia.id = ?1");
        let created = tx
            .query_row(&sql, params![item_id], Self::build_item_from_row)
            .db_context("Failed to read itinerary activity")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(created)
    }

    /// Unschedules an itinerary item the user owns.
    pub fn remove_itinerary_activity(&mut self, item_id: u64, user_id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let trip_id = ensure_item_owner(&tx, item_id, user_id)?;
        tx.execute(DELETE_ITEM_SQL, params![item_id as i64])
            .db_context("Failed to delete itinerary activity")?;
        touch_trip(&tx, trip_id, &Timestamp::now().to_string())?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }
}
