//! Destination catalogue queries: cities, activities and category statistics.

use rusqlite::{params, Row, ToSql};

use super::utils::{count_at, id_at, like_pattern, parsed_at};
use crate::{
    error::{DatabaseResultExt, LookupResultExt, Result},
    models::{
        Activity, ActivityCategory, ActivityFilter, CategoryStats, City, CityFilter, NewActivity,
        Page, Pagination,
    },
};

const CITY_COLUMNS: &str = "id, name, country, region, description, cost_index, popularity_score, latitude, longitude, image_url";
const ACTIVITY_COLUMNS: &str =
    "id, city_id, name, description, category, estimated_cost, duration_hours, image_url";
const CITY_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM cities WHERE id = ?1)";
const ACTIVITY_NAME_TAKEN_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM activities WHERE city_id = ?1 AND lower(name) = lower(?2))";
const INSERT_ACTIVITY_SQL: &str = "INSERT INTO activities (city_id, name, description, category, estimated_cost, duration_hours) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const CATEGORY_STATS_SQL: &str =
    "SELECT COUNT(*), COALESCE(AVG(estimated_cost), 0.0) FROM activities WHERE category = ?1";

impl super::Database {
    pub(crate) fn build_city_from_row(row: &Row, offset: usize) -> rusqlite::Result<City> {
        Ok(City {
            id: id_at(row, offset)?,
            name: row.get(offset + 1)?,
            country: row.get(offset + 2)?,
            region: row.get(offset + 3)?,
            description: row.get(offset + 4)?,
            cost_index: row.get(offset + 5)?,
            popularity_score: row.get(offset + 6)?,
            latitude: row.get(offset + 7)?,
            longitude: row.get(offset + 8)?,
            image_url: row.get(offset + 9)?,
        })
    }

    pub(crate) fn build_activity_from_row(row: &Row, offset: usize) -> rusqlite::Result<Activity> {
        Ok(Activity {
            id: id_at(row, offset)?,
            city_id: id_at(row, offset + 1)?,
            name: row.get(offset + 2)?,
            description: row.get(offset + 3)?,
            category: parsed_at::<ActivityCategory>(row, offset + 4)?,
            estimated_cost: row.get(offset + 5)?,
            duration_hours: row.get(offset + 6)?,
            image_url: row.get(offset + 7)?,
        })
    }

    /// Column list for a city joined under alias `alias`.
    pub(crate) fn city_columns(alias: &str) -> String {
        CITY_COLUMNS
            .split(", ")
            .map(|column| format!("{alias}.{column}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Column list for an activity joined under alias `alias`.
    pub(crate) fn activity_columns(alias: &str) -> String {
        ACTIVITY_COLUMNS
            .split(", ")
            .map(|column| format!("{alias}.{column}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Searches cities, most popular first.
    pub fn search_cities(&self, filter: &CityFilter) -> Result<Vec<City>> {
        let mut query = format!("SELECT {CITY_COLUMNS} FROM cities");
        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(ref text) = filter.query {
            conditions.push("(name LIKE ? ESCAPE '\\' OR country LIKE ? ESCAPE '\\')");
            params_vec.push(Box::new(like_pattern(text)));
            params_vec.push(Box::new(like_pattern(text)));
        }
        if let Some(ref country) = filter.country {
            conditions.push("country LIKE ? ESCAPE '\\'");
            params_vec.push(Box::new(like_pattern(country)));
        }
        if let Some(ref region) = filter.region {
            conditions.push("region LIKE ? ESCAPE '\\'");
            params_vec.push(Box::new(like_pattern(region)));
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY popularity_score DESC, id ASC LIMIT ?");
        params_vec.push(Box::new(i64::from(filter.limit)));

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare city search")?;
        let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|b| &**b).collect();
        let cities = stmt
            .query_map(&params_refs[..], |row| Self::build_city_from_row(row, 0))
            .db_context("Failed to search cities")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read city row")?;
        Ok(cities)
    }

    pub fn get_city(&self, city_id: u64) -> Result<City> {
        let sql = format!("SELECT {CITY_COLUMNS} FROM cities WHERE id = ?1");
        self.connection
            .query_row(&sql, params![city_id as i64], |row| Self::build_city_from_row(row, 0))
            .or_not_found("City", city_id, "Failed to query city")
    }

    pub fn city_exists(&self, city_id: u64) -> Result<bool> {
        self.connection
            .query_row(CITY_EXISTS_SQL, params![city_id as i64], |row| row.get(0))
            .db_context("Failed to check city existence")
    }

    pub fn get_activity(&self, activity_id: u64) -> Result<Activity> {
        let sql = format!("SELECT {ACTIVITY_COLUMNS} FROM activities WHERE id = ?1");
        self.connection
            .query_row(&sql, params![activity_id as i64], |row| {
                Self::build_activity_from_row(row, 0)
            })
            .or_not_found("Activity", activity_id, "Failed to query activity")
    }

    /// One page of activities matching `filter`, cheapest first.
    pub fn find_activities(&self, filter: &ActivityFilter) -> Result<Page<Activity>> {
        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(ref text) = filter.query {
            conditions.push("(name LIKE ? ESCAPE '\\' OR description LIKE ? ESCAPE '\\')");
            params_vec.push(Box::new(like_pattern(text)));
            params_vec.push(Box::new(like_pattern(text)));
        }
        if let Some(city_id) = filter.city_id {
            conditions.push("city_id = ?");
            params_vec.push(Box::new(city_id as i64));
        }
        if let Some(category) = filter.category {
            conditions.push("category = ?");
            params_vec.push(Box::new(category.as_str()));
        }
        if let Some(max_cost) = filter.max_cost {
            conditions.push("estimated_cost <= ?");
            params_vec.push(Box::new(max_cost));
        }
        if let Some(max_duration) = filter.max_duration {
            conditions.push("duration_hours <= ?");
            params_vec.push(Box::new(max_duration));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|b| &**b).collect();
        let total: u32 = self
            .connection
            .query_row(
                &format!("SELECT COUNT(*) FROM activities{where_clause}"),
                &params_refs[..],
                |row| count_at(row, 0),
            )
            .db_context("Failed to count activities")?;

        let query = format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activities{where_clause} ORDER BY estimated_cost ASC, id ASC LIMIT {} OFFSET {}",
            filter.limit, filter.offset
        );
        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare activity search")?;
        let items = stmt
            .query_map(&params_refs[..], |row| Self::build_activity_from_row(row, 0))
            .db_context("Failed to search activities")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read activity row")?;

        Ok(Page {
            items,
            pagination: Pagination::new(total, filter.limit, filter.offset),
        })
    }

    /// Every activity of a city, in insertion order.
    pub fn list_city_activities(&self, city_id: u64) -> Result<Vec<Activity>> {
        let sql = format!("SELECT {ACTIVITY_COLUMNS} FROM activities WHERE city_id = ?1 ORDER BY id");
        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;
        let activities = stmt
            .query_map(params![city_id as i64], |row| Self::build_activity_from_row(row, 0))
            .db_context("Failed to list activities")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read activity row")?;
        Ok(activities)
    }

    /// Adds activities to a city, skipping any whose name the city already
    /// has (case-insensitively). Returns the number inserted.
    pub fn insert_activities(&mut self, city_id: u64, activities: &[NewActivity]) -> Result<u32> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut inserted = 0;
        for activity in activities {
            let taken: bool = tx
                .query_row(
                    ACTIVITY_NAME_TAKEN_SQL,
                    params![city_id as i64, &activity.name],
                    |row| row.get(0),
                )
                .db_context("Failed to check activity name")?;
            if taken {
                continue;
            }
            tx.execute(
                INSERT_ACTIVITY_SQL,
                params![
                    city_id as i64,
                    &activity.name,
                    activity.description.as_deref(),
                    activity.category.as_str(),
                    activity.estimated_cost,
                    activity.duration_hours
                ],
            )
            .db_context("Failed to insert activity")?;
            inserted += 1;
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(inserted)
    }

    /// Activity count and mean price for every category.
    pub fn category_stats(&self) -> Result<Vec<CategoryStats>> {
        let mut stmt = self
            .connection
            .prepare(CATEGORY_STATS_SQL)
            .db_context("Failed to prepare category statistics")?;
        ActivityCategory::ALL
            .iter()
            .map(|category| {
                stmt.query_row(params![category.as_str()], |row| {
                    Ok(CategoryStats {
                        category: *category,
                        count: count_at(row, 0)?,
                        average_cost: row.get(1)?,
                    })
                })
                .db_context("Failed to compute category statistics")
            })
            .collect()
    }
}
