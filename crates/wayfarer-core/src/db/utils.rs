//! Row decoding and ownership checks shared by the query modules.

use std::{fmt::Display, str::FromStr};

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, types::Type, Connection, Row};

use crate::error::{LookupResultExt, Result, TravelError};

/// Reads an `INTEGER` id column.
pub(crate) fn id_at(row: &Row, idx: usize) -> rusqlite::Result<u64> {
    Ok(row.get::<_, i64>(idx)? as u64)
}

/// Reads a `TEXT` column holding a value with a `FromStr` implementation.
pub(crate) fn parsed_at<T>(row: &Row, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let text: String = row.get(idx)?;
    text.parse::<T>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Invalid value '{text}': {e}"),
            )),
        )
    })
}

pub(crate) fn timestamp_at(row: &Row, idx: usize) -> rusqlite::Result<Timestamp> {
    parsed_at::<Timestamp>(row, idx)
}

pub(crate) fn date_at(row: &Row, idx: usize) -> rusqlite::Result<Date> {
    parsed_at::<Date>(row, idx)
}

/// Non-negative count column.
pub(crate) fn count_at(row: &Row, idx: usize) -> rusqlite::Result<u32> {
    Ok(u32::try_from(row.get::<_, i64>(idx)?).unwrap_or(0))
}

const TRIP_OWNER_SQL: &str = "SELECT user_id FROM trips WHERE id = ?1";
const STOP_OWNER_SQL: &str = "SELECT s.trip_id, t.user_id FROM stops s JOIN trips t ON t.id = s.trip_id WHERE s.id = ?1";
const ITEM_OWNER_SQL: &str = "SELECT s.trip_id, t.user_id FROM itinerary_activities ia JOIN stops s ON s.id = ia.stop_id JOIN trips t ON t.id = s.trip_id WHERE ia.id = ?1";

fn check_owner(owner: u64, user_id: u64, what: &str) -> Result<()> {
    if owner != user_id {
        return Err(TravelError::forbidden(format!("{what} belongs to another user")));
    }
    Ok(())
}

/// Fails with `NotFound` when the trip is missing and `Forbidden` when it
/// belongs to someone else.
pub(crate) fn ensure_trip_owner(conn: &Connection, trip_id: u64, user_id: u64) -> Result<()> {
    let owner = conn
        .query_row(TRIP_OWNER_SQL, params![trip_id as i64], |row| id_at(row, 0))
        .or_not_found("Trip", trip_id, "Failed to query trip owner")?;
    check_owner(owner, user_id, "Trip")
}

/// Ownership check for a stop; returns the id of its trip.
pub(crate) fn ensure_stop_owner(conn: &Connection, stop_id: u64, user_id: u64) -> Result<u64> {
    let (trip_id, owner) = conn
        .query_row(STOP_OWNER_SQL, params![stop_id as i64], |row| {
            Ok((id_at(row, 0)?, id_at(row, 1)?))
        })
        .or_not_found("Stop", stop_id, "Failed to query stop owner")?;
    check_owner(owner, user_id, "Stop")?;
    Ok(trip_id)
}

/// Ownership check for an itinerary item; returns the id of its trip.
pub(crate) fn ensure_item_owner(conn: &Connection, item_id: u64, user_id: u64) -> Result<u64> {
    let (trip_id, owner) = conn
        .query_row(ITEM_OWNER_SQL, params![item_id as i64], |row| {
            Ok((id_at(row, 0)?, id_at(row, 1)?))
        })
        .or_not_found("Itinerary activity", item_id, "Failed to query itinerary owner")?;
    check_owner(owner, user_id, "Itinerary activity")?;
    Ok(trip_id)
}

/// Bumps a trip's `updated_at`.
pub(crate) fn touch_trip(conn: &Connection, trip_id: u64, now: &str) -> Result<()> {
    conn.execute(
        "UPDATE trips SET updated_at = ?1 WHERE id = ?2",
        params![now, trip_id as i64],
    )
    .map_err(|e| TravelError::database("Failed to update trip timestamp").with_source(e))?;
    Ok(())
}

/// Escapes `%`, `_` and `\` for use in a `LIKE ... ESCAPE '\'` pattern.
pub(crate) fn like_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}
