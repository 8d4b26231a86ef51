//! Sample catalogue of cities and activities.

use log::info;

use crate::error::{DatabaseResultExt, Result};

const SEED_SQL: &str = include_str!("../../assets/seed.sql");

impl super::Database {
    /// Loads the sample catalogue when the city table is empty. Returns
    /// whether anything was inserted.
    pub fn seed_catalogue(&mut self) -> Result<bool> {
        let cities: i64 = self
            .connection
            .query_row("SELECT COUNT(*) FROM cities", [], |row| row.get(0))
            .db_context("Failed to count cities")?;
        if cities > 0 {
            info!("Catalogue already holds {cities} cities, skipping seed");
            return Ok(false);
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        tx.execute_batch(SEED_SQL)
            .db_context("Failed to load seed data")?;
        tx.commit().db_context("Failed to commit transaction")?;

        info!("Seeded the city and activity catalogue");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use crate::{db::Database, models::CityFilter};

    #[test]
    fn test_seed_runs_once() {
        let mut db = Database::in_memory().unwrap();
        assert!(db.seed_catalogue().unwrap());
        assert!(!db.seed_catalogue().unwrap());

        let cities = db
            .search_cities(&CityFilter {
                limit: 100,
                ..CityFilter::default()
            })
            .unwrap();
        assert_eq!(cities.len(), 20);
    }
}
