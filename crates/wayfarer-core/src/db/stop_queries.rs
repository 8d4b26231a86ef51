//! Stop queries. Positions follow [`crate::sequence`]; every change to a
//! trip's ordering happens inside one transaction.

use jiff::{civil::Date, Timestamp};
use log::debug;
use rusqlite::{params, Connection, Row};

use super::utils::{count_at, date_at, ensure_stop_owner, ensure_trip_owner, id_at, touch_trip};
use crate::{
    error::{DatabaseResultExt, LookupResultExt, Result, TravelError},
    models::{NewStop, Stop, StopChanges, StopDetail},
    sequence::{self, Shift},
};

const STOP_COLUMNS: &str =
    "s.id, s.trip_id, s.city_id, s.order_index, s.start_date, s.end_date, s.notes";
const COUNT_STOPS_SQL: &str = "SELECT COUNT(*) FROM stops WHERE trip_id = ?1";
const STOP_POSITIONS_SQL: &str =
    "SELECT order_index FROM stops WHERE trip_id = ?1 ORDER BY order_index";
const INSERT_STOP_SQL: &str = "INSERT INTO stops (trip_id, city_id, order_index, start_date, end_date, notes) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_STOP_STATE_SQL: &str =
    "SELECT order_index, start_date, end_date FROM stops WHERE id = ?1";
const PARK_STOP_SQL: &str = "UPDATE stops SET order_index = 0 WHERE id = ?1";
const UPDATE_STOP_SQL: &str = "UPDATE stops SET order_index = ?1, start_date = ?2, end_date = ?3, notes = COALESCE(?4, notes) WHERE id = ?5";
const DELETE_STOP_SQL: &str = "DELETE FROM stops WHERE id = ?1";

// Shifts run in two passes through negative values so that
// UNIQUE(trip_id, order_index) holds after every statement.
const SHIFT_LATER_SQL: &str = "UPDATE stops SET order_index = -(order_index + 1) WHERE trip_id = ?1 AND order_index BETWEEN ?2 AND ?3";
const SHIFT_EARLIER_SQL: &str = "UPDATE stops SET order_index = -(order_index - 1) WHERE trip_id = ?1 AND order_index BETWEEN ?2 AND ?3";
const RESTORE_SHIFTED_SQL: &str =
    "UPDATE stops SET order_index = -order_index WHERE trip_id = ?1 AND order_index < 0";

fn stop_count(conn: &Connection, trip_id: u64) -> Result<u32> {
    conn.query_row(COUNT_STOPS_SQL, params![trip_id as i64], |row| count_at(row, 0))
        .db_context("Failed to count stops")
}

fn apply_shift(conn: &Connection, trip_id: u64, shift: Shift) -> Result<()> {
    let (from, to) = shift.bounds();
    let sql = match shift {
        Shift::Later { .. } => SHIFT_LATER_SQL,
        Shift::Earlier { .. } => SHIFT_EARLIER_SQL,
    };
    debug!(
        "Shifting stops {from}..={to} of trip {trip_id} by {}",
        shift.delta()
    );
    conn.execute(sql, params![trip_id as i64, from, to])
        .db_context("Failed to shift stops")?;
    conn.execute(RESTORE_SHIFTED_SQL, params![trip_id as i64])
        .db_context("Failed to shift stops")?;
    Ok(())
}

fn ensure_city(conn: &Connection, city_id: u64) -> Result<()> {
    let exists: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM cities WHERE id = ?1)",
            params![city_id as i64],
            |row| row.get(0),
        )
        .db_context("Failed to look up city")?;
    if !exists {
        return Err(TravelError::not_found("City", city_id));
    }
    Ok(())
}

impl super::Database {
    fn build_stop_detail_from_row(row: &Row) -> rusqlite::Result<StopDetail> {
        let stop = Stop::new(
            id_at(row, 0)?,
            id_at(row, 1)?,
            id_at(row, 2)?,
            count_at(row, 3)?,
            date_at(row, 4)?,
            date_at(row, 5)?,
            row.get(6)?,
        );
        Ok(StopDetail {
            stop,
            city: Self::build_city_from_row(row, 7)?,
            activities: Vec::new(),
        })
    }

    fn stop_detail_sql(filter: &str) -> String {
        format!(
            "SELECT {STOP_COLUMNS}, {} FROM stops s JOIN cities c ON c.id = s.city_id WHERE {filter}",
            Self::city_columns("c")
        )
    }

    /// Stops of a trip in order, each with its city and schedule.
    pub fn list_stop_details(&self, trip_id: u64) -> Result<Vec<StopDetail>> {
        let sql = Self::stop_detail_sql("s.trip_id = ?1 ORDER BY s.order_index");
        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare stop query")?;
        let mut stops = stmt
            .query_map(params![trip_id as i64], Self::build_stop_detail_from_row)
            .db_context("Failed to query stops")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read stop row")?;

        for detail in &mut stops {
            detail.activities = self.stop_schedule(detail.stop.id)?;
        }
        Ok(stops)
    }

    /// One stop with its city and schedule.
    pub fn get_stop_detail(&self, stop_id: u64) -> Result<StopDetail> {
        let sql = Self::stop_detail_sql("s.id = ?1");
        let mut detail = self
            .connection
            .query_row(&sql, params![stop_id as i64], Self::build_stop_detail_from_row)
            .or_not_found("Stop", stop_id, "Failed to query stop")?;
        detail.activities = self.stop_schedule(stop_id)?;
        Ok(detail)
    }

    /// Current `order_index` values of a trip, ascending.
    pub fn stop_positions(&self, trip_id: u64) -> Result<Vec<u32>> {
        let mut stmt = self
            .connection
            .prepare(STOP_POSITIONS_SQL)
            .db_context("Failed to prepare query")?;
        let positions = stmt
            .query_map(params![trip_id as i64], |row| count_at(row, 0))
            .db_context("Failed to query stop positions")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read stop position")?;
        Ok(positions)
    }

    /// Inserts a stop at the requested position (appending when none is
    /// given) and slides later stops down.
    pub fn add_stop(&mut self, trip_id: u64, user_id: u64, stop: &NewStop) -> Result<StopDetail> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        ensure_trip_owner(&tx, trip_id, user_id)?;
        ensure_city(&tx, stop.city_id)?;

        let count = stop_count(&tx, trip_id)?;
        let placement = sequence::place_new(stop.position, count);
        if let Some(shift) = placement.shift {
            apply_shift(&tx, trip_id, shift)?;
        }

        tx.execute(
            INSERT_STOP_SQL,
            params![
                trip_id as i64,
                stop.city_id as i64,
                placement.position,
                stop.start_date.to_string(),
                stop.end_date.to_string(),
                stop.notes.as_deref()
            ],
        )
        .db_context("Failed to insert stop")?;
        let stop_id = tx.last_insert_rowid() as u64;

        touch_trip(&tx, trip_id, &Timestamp::now().to_string())?;
        tx.commit().db_context("Failed to commit transaction")?;

        self.get_stop_detail(stop_id)
    }

    /// Updates dates and notes and optionally moves the stop.
    pub fn update_stop(
        &mut self,
        stop_id: u64,
        user_id: u64,
        changes: &StopChanges,
    ) -> Result<StopDetail> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let trip_id = ensure_stop_owner(&tx, stop_id, user_id)?;
        let (current, start, end): (u32, Date, Date) = tx
            .query_row(SELECT_STOP_STATE_SQL, params![stop_id as i64], |row| {
                Ok((
                    count_at(row, 0)?,
                    date_at(row, 1)?,
                    date_at(row, 2)?,
                ))
            })
            .or_not_found("Stop", stop_id, "Failed to query stop")?;
        let (start, end) = changes.resolve_dates(start, end)?;

        let mut position = current;
        if let Some(requested) = changes.position {
            let count = stop_count(&tx, trip_id)?;
            let placement = sequence::place_existing(current, requested, count);
            if let Some(shift) = placement.shift {
                tx.execute(PARK_STOP_SQL, params![stop_id as i64])
                    .db_context("Failed to move stop")?;
                apply_shift(&tx, trip_id, shift)?;
            }
            position = placement.position;
        }

        tx.execute(
            UPDATE_STOP_SQL,
            params![
                position,
                start.to_string(),
                end.to_string(),
                changes.notes.as_deref(),
                stop_id as i64
            ],
        )
        .db_context("Failed to update stop")?;

        touch_trip(&tx, trip_id, &Timestamp::now().to_string())?;
        tx.commit().db_context("Failed to commit transaction")?;

        self.get_stop_detail(stop_id)
    }

    /// Removes a stop and its scheduled activities, closing the gap it
    /// leaves.
    pub fn remove_stop(&mut self, stop_id: u64, user_id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let trip_id = ensure_stop_owner(&tx, stop_id, user_id)?;
        let removed: u32 = tx
            .query_row(SELECT_STOP_STATE_SQL, params![stop_id as i64], |row| count_at(row, 0))
            .or_not_found("Stop", stop_id, "Failed to query stop")?;
        let count = stop_count(&tx, trip_id)?;

        tx.execute(DELETE_STOP_SQL, params![stop_id as i64])
            .db_context("Failed to delete stop")?;
        if let Some(shift) = sequence::close_gap(removed, count) {
            apply_shift(&tx, trip_id, shift)?;
        }

        touch_trip(&tx, trip_id, &Timestamp::now().to_string())?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }
}
