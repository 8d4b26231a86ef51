//! Trip CRUD, sharing, copying and dashboard queries.

use jiff::{civil::Date, Timestamp};
use log::info;
use rusqlite::{params, types::Type, OptionalExtension, Row};

use super::utils::{count_at, date_at, ensure_trip_owner, id_at, timestamp_at};
use crate::{
    error::{DatabaseResultExt, LookupResultExt, Result, TravelError},
    models::{
        inclusive_days, DashboardStats, GeneratedItinerary, NewTrip, Trip, TripChanges, TripDetail,
    },
};

const TRIP_SELECT: &str = "SELECT t.id, t.user_id, t.name, t.description, t.start_date, t.end_date, t.cover_photo_url, t.is_public, t.share_code, t.ai_itinerary, t.created_at, t.updated_at, (SELECT COUNT(*) FROM stops s WHERE s.trip_id = t.id) FROM trips t";
const INSERT_TRIP_SQL: &str = "INSERT INTO trips (user_id, name, description, start_date, end_date, cover_photo_url, is_public, share_code, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7, ?8, ?9)";
const INSERT_BUDGET_SQL: &str = "INSERT INTO budgets (trip_id) VALUES (?1)";
const SELECT_TRIP_DATES_SQL: &str = "SELECT start_date, end_date FROM trips WHERE id = ?1";
const UPDATE_TRIP_SQL: &str = "UPDATE trips SET name = COALESCE(?1, name), description = COALESCE(?2, description), start_date = ?3, end_date = ?4, cover_photo_url = COALESCE(?5, cover_photo_url), is_public = COALESCE(?6, is_public), updated_at = ?7 WHERE id = ?8";
const DELETE_TRIP_SQL: &str = "DELETE FROM trips WHERE id = ?1";
const SELECT_SHARED_SQL: &str = "SELECT id, is_public FROM trips WHERE share_code = ?1";
const UPDATE_ITINERARY_SQL: &str =
    "UPDATE trips SET ai_itinerary = ?1, updated_at = ?2 WHERE id = ?3";
const SELECT_STOP_CITY_NAMES_SQL: &str = "SELECT c.name FROM stops s JOIN cities c ON c.id = s.city_id WHERE s.trip_id = ?1 ORDER BY s.order_index";

const COPY_STOPS_SQL: &str = "SELECT id, city_id, order_index, start_date, end_date, notes FROM stops WHERE trip_id = ?1 ORDER BY order_index";
const COPY_STOP_SQL: &str = "INSERT INTO stops (trip_id, city_id, order_index, start_date, end_date, notes) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const COPY_ITEMS_SQL: &str = "INSERT INTO itinerary_activities (stop_id, activity_id, day_number, time_of_day, custom_notes, estimated_cost_override) SELECT ?1, activity_id, day_number, time_of_day, custom_notes, estimated_cost_override FROM itinerary_activities WHERE stop_id = ?2 ORDER BY id";
const COPY_BUDGET_SQL: &str = "INSERT INTO budgets (trip_id, transport_cost, accommodation_cost, food_cost, misc_cost, currency) SELECT ?1, transport_cost, accommodation_cost, food_cost, misc_cost, currency FROM budgets WHERE trip_id = ?2";

const COUNT_TRIPS_SQL: &str = "SELECT COUNT(*) FROM trips WHERE user_id = ?1";
const COUNT_UPCOMING_SQL: &str = "SELECT COUNT(*) FROM trips WHERE user_id = ?1 AND start_date >= ?2";
const COUNT_SAVED_SQL: &str = "SELECT COUNT(*) FROM saved_destinations WHERE user_id = ?1";
// Same rule as crate::budget::total, evaluated over all of a user's trips.
const BUDGET_TOTAL_SQL: &str = "SELECT COALESCE(SUM(b.transport_cost + b.accommodation_cost + b.food_cost + b.misc_cost + COALESCE((SELECT SUM(COALESCE(l.override_cost, l.activity_cost)) FROM trip_cost_lines l WHERE l.trip_id = b.trip_id), 0.0)), 0.0) FROM budgets b JOIN trips t ON t.id = b.trip_id WHERE t.user_id = ?1";

/// Number of trips shown as "recent" on the dashboard.
const RECENT_TRIPS: u32 = 5;

/// Length of generated share codes.
const SHARE_CODE_LEN: usize = 12;

impl super::Database {
    fn build_trip_from_row(row: &Row) -> rusqlite::Result<Trip> {
        let start_date = date_at(row, 4)?;
        let end_date = date_at(row, 5)?;
        let ai_itinerary = row
            .get::<_, Option<String>>(9)?
            .map(|text| {
                serde_json::from_str::<GeneratedItinerary>(&text).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(9, Type::Text, Box::new(e))
                })
            })
            .transpose()?;

        Ok(Trip {
            id: id_at(row, 0)?,
            user_id: id_at(row, 1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            start_date,
            end_date,
            cover_photo_url: row.get(6)?,
            is_public: row.get(7)?,
            share_code: row.get(8)?,
            ai_itinerary,
            created_at: timestamp_at(row, 10)?,
            updated_at: timestamp_at(row, 11)?,
            stops_count: count_at(row, 12)?,
            total_days: inclusive_days(start_date, end_date),
        })
    }

    fn query_trips(&self, sql: &str, user_id: u64) -> Result<Vec<Trip>> {
        let mut stmt = self
            .connection
            .prepare(sql)
            .db_context("Failed to prepare trip query")?;
        let trips = stmt
            .query_map(params![user_id as i64], Self::build_trip_from_row)
            .db_context("Failed to query trips")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read trip row")?;
        Ok(trips)
    }

    /// Creates a trip and its empty budget in one transaction.
    pub fn create_trip(&mut self, user_id: u64, trip: &NewTrip) -> Result<TripDetail> {
        trip.check_dates()?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now_str = Timestamp::now().to_string();
        tx.execute(
            INSERT_TRIP_SQL,
            params![
                user_id as i64,
                &trip.name,
                trip.description.as_deref(),
                trip.start_date.to_string(),
                trip.end_date.to_string(),
                trip.cover_photo_url.as_deref(),
                nanoid::nanoid!(SHARE_CODE_LEN),
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert trip")?;
        let id = tx.last_insert_rowid() as u64;

        tx.execute(INSERT_BUDGET_SQL, params![id as i64])
            .db_context("Failed to create trip budget")?;

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_trip_detail(id)
    }

    /// Loads a trip without its stops.
    pub fn get_trip(&self, trip_id: u64) -> Result<Trip> {
        let sql = format!("{TRIP_SELECT} WHERE t.id = ?1");
        self.connection
            .query_row(&sql, params![trip_id as i64], Self::build_trip_from_row)
            .or_not_found("Trip", trip_id, "Failed to query trip")
    }

    /// Loads a trip with its ordered stops and recomputed budget.
    pub fn get_trip_detail(&self, trip_id: u64) -> Result<TripDetail> {
        let trip = self.get_trip(trip_id)?;
        let stops = self.list_stop_details(trip_id)?;
        let budget = self.refresh_budget(trip_id)?;
        Ok(TripDetail {
            trip,
            stops,
            budget: Some(budget),
        })
    }

    /// Like [`Self::get_trip`] but only for the trip's owner.
    pub fn owned_trip(&self, trip_id: u64, user_id: u64) -> Result<Trip> {
        ensure_trip_owner(&self.connection, trip_id, user_id)?;
        self.get_trip(trip_id)
    }

    /// Like [`Self::get_trip_detail`] but only for the trip's owner.
    pub fn owned_trip_detail(&self, trip_id: u64, user_id: u64) -> Result<TripDetail> {
        ensure_trip_owner(&self.connection, trip_id, user_id)?;
        self.get_trip_detail(trip_id)
    }

    /// A user's trips, newest first.
    pub fn list_trips(&self, user_id: u64) -> Result<Vec<Trip>> {
        let sql = format!("{TRIP_SELECT} WHERE t.user_id = ?1 ORDER BY t.id DESC");
        self.query_trips(&sql, user_id)
    }

    /// Applies a partial update. The merged date range must stay ordered.
    pub fn update_trip(
        &mut self,
        trip_id: u64,
        user_id: u64,
        changes: &TripChanges,
    ) -> Result<TripDetail> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        ensure_trip_owner(&tx, trip_id, user_id)?;
        let (start, end): (Date, Date) = tx
            .query_row(SELECT_TRIP_DATES_SQL, params![trip_id as i64], |row| {
                Ok((date_at(row, 0)?, date_at(row, 1)?))
            })
            .or_not_found("Trip", trip_id, "Failed to query trip dates")?;
        let (start, end) = changes.resolve_dates(start, end)?;

        tx.execute(
            UPDATE_TRIP_SQL,
            params![
                changes.name.as_deref(),
                changes.description.as_deref(),
                start.to_string(),
                end.to_string(),
                changes.cover_photo_url.as_deref(),
                changes.is_public,
                Timestamp::now().to_string(),
                trip_id as i64
            ],
        )
        .db_context("Failed to update trip")?;

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_trip_detail(trip_id)
    }

    /// Deletes a trip with its stops, itinerary items and budget.
    pub fn delete_trip(&mut self, trip_id: u64, user_id: u64) -> Result<()> {
        ensure_trip_owner(&self.connection, trip_id, user_id)?;
        self.connection
            .execute(DELETE_TRIP_SQL, params![trip_id as i64])
            .db_context("Failed to delete trip")?;
        Ok(())
    }

    /// Loads a trip through its share code. Only public trips are returned.
    pub fn shared_trip(&self, share_code: &str) -> Result<TripDetail> {
        let (trip_id, is_public): (i64, bool) = self
            .connection
            .query_row(SELECT_SHARED_SQL, params![share_code], |row| Ok((row.get(0)?, row.get(1)?)))
            .optional()
            .db_context("Failed to query shared trip")?
            .ok_or_else(|| TravelError::UnknownShareCode(share_code.to_string()))?;
        if !is_public {
            return Err(TravelError::forbidden("Trip is not public"));
        }
        self.get_trip_detail(trip_id as u64)
    }

    /// Copies a trip the user owns, or any public trip, into the user's
    /// account. The copy is private, gets a fresh share code and carries the
    /// stops, their scheduled activities and the budget buckets.
    pub fn copy_trip(&mut self, trip_id: u64, user_id: u64) -> Result<TripDetail> {
        let source = self.get_trip(trip_id)?;
        if source.user_id != user_id && !source.is_public {
            return Err(TravelError::forbidden("Trip is private"));
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now_str = Timestamp::now().to_string();
        tx.execute(
            INSERT_TRIP_SQL,
            params![
                user_id as i64,
                format!("{} (Copy)", source.name),
                source.description.as_deref(),
                source.start_date.to_string(),
                source.end_date.to_string(),
                source.cover_photo_url.as_deref(),
                nanoid::nanoid!(SHARE_CODE_LEN),
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert trip copy")?;
        let copy_id = tx.last_insert_rowid();

        {
            let mut stmt = tx
                .prepare(COPY_STOPS_SQL)
                .db_context("Failed to prepare stop copy")?;
            let stops = stmt
                .query_map(params![trip_id as i64], |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, i64>(1)?,
                        row.get::<_, i64>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, Option<String>>(5)?,
                    ))
                })
                .db_context("Failed to read stops")?
                .collect::<rusqlite::Result<Vec<_>>>()
                .db_context("Failed to read stop row")?;

            for (stop_id, city_id, order_index, start, end, notes) in stops {
                tx.execute(
                    COPY_STOP_SQL,
                    params![copy_id, city_id, order_index, start, end, notes],
                )
                .db_context("Failed to copy stop")?;
                let new_stop_id = tx.last_insert_rowid();
                tx.execute(COPY_ITEMS_SQL, params![new_stop_id, stop_id])
                    .db_context("Failed to copy itinerary activities")?;
            }
        }

        let copied_budget = tx
            .execute(COPY_BUDGET_SQL, params![copy_id, trip_id as i64])
            .db_context("Failed to copy budget")?;
        if copied_budget == 0 {
            tx.execute(INSERT_BUDGET_SQL, params![copy_id])
                .db_context("Failed to create trip budget")?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        info!("Copied trip {trip_id} into trip {copy_id} for user {user_id}");
        self.get_trip_detail(copy_id as u64)
    }

    /// Stores a generated itinerary on the trip.
    pub fn set_itinerary(&self, trip_id: u64, itinerary: &GeneratedItinerary) -> Result<()> {
        let text = serde_json::to_string(itinerary)?;
        let updated = self
            .connection
            .execute(
                UPDATE_ITINERARY_SQL,
                params![text, Timestamp::now().to_string(), trip_id as i64],
            )
            .db_context("Failed to store itinerary")?;
        if updated == 0 {
            return Err(TravelError::not_found("Trip", trip_id));
        }
        Ok(())
    }

    /// Distinct city names of a trip's stops in visiting order.
    pub fn trip_destinations(&self, trip_id: u64) -> Result<Vec<String>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_STOP_CITY_NAMES_SQL)
            .db_context("Failed to prepare query")?;
        let names = stmt
            .query_map(params![trip_id as i64], |row| row.get::<_, String>(0))
            .db_context("Failed to query stop cities")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read stop city")?;

        let mut distinct: Vec<String> = Vec::with_capacity(names.len());
        for name in names {
            if !distinct.contains(&name) {
                distinct.push(name);
            }
        }
        Ok(distinct)
    }

    /// Dashboard numbers for a user; `today` decides which trips are
    /// upcoming.
    pub fn dashboard(&self, user_id: u64, today: Date) -> Result<DashboardStats> {
        let count = |sql: &str, extra: Option<String>| -> Result<u32> {
            match extra {
                Some(value) => self
                    .connection
                    .query_row(sql, params![user_id as i64, value], |row| count_at(row, 0)),
                None => self
                    .connection
                    .query_row(sql, params![user_id as i64], |row| count_at(row, 0)),
            }
            .db_context("Failed to compute dashboard counts")
        };

        let total_trips = count(COUNT_TRIPS_SQL, None)?;
        let upcoming_trips = count(COUNT_UPCOMING_SQL, Some(today.to_string()))?;
        let saved_destinations = count(COUNT_SAVED_SQL, None)?;
        let budget_total: f64 = self
            .connection
            .query_row(BUDGET_TOTAL_SQL, params![user_id as i64], |row| row.get(0))
            .db_context("Failed to compute budget total")?;

        let recent_sql = format!(
            "{TRIP_SELECT} WHERE t.user_id = ?1 ORDER BY julianday(t.updated_at) DESC, t.id DESC LIMIT {RECENT_TRIPS}"
        );
        let recent_trips = self.query_trips(&recent_sql, user_id)?;

        Ok(DashboardStats {
            total_trips,
            upcoming_trips,
            saved_destinations,
            budget_total,
            recent_trips,
        })
    }
}
