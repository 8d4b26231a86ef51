#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use jiff::civil::{date, Date};
use tempfile::{NamedTempFile, TempDir};
use wayfarer_core::{
    models::{NewActivity, NewStop, NewTrip},
    ActivityCategory, Database, GenerationRequest, Result, TextGenerator, TravelError,
    TripPlanner, TripPlannerBuilder,
};

/// Seeded Paris, the most popular city in the sample catalogue.
pub const PARIS: u64 = 1;
pub const TOKYO: u64 = 2;
pub const NEW_YORK: u64 = 3;
pub const LONDON: u64 = 4;

/// Helper function to create a temporary, seeded database for testing
pub fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let mut db = Database::new(temp_file.path()).expect("Failed to create test database");
    db.seed_catalogue().expect("Failed to seed catalogue");
    (temp_file, db)
}

pub fn create_user(db: &mut Database, email: &str) -> u64 {
    db.create_user(email, "not-a-real-hash", "Traveller")
        .expect("Failed to create user")
        .id
}

pub fn day(d: i8) -> Date {
    date(2099, 3, d)
}

pub fn create_trip(db: &mut Database, user_id: u64, name: &str) -> u64 {
    db.create_trip(
        user_id,
        &NewTrip {
            name: name.to_string(),
            description: None,
            start_date: day(1),
            end_date: day(20),
            cover_photo_url: None,
        },
    )
    .expect("Failed to create trip")
    .trip
    .id
}

pub fn new_stop(city_id: u64, position: Option<i64>) -> NewStop {
    NewStop {
        city_id,
        start_date: day(2),
        end_date: day(4),
        notes: None,
        position,
    }
}

/// Stop ids of a trip in order.
pub fn stop_order(db: &Database, trip_id: u64) -> Vec<u64> {
    db.list_stop_details(trip_id)
        .expect("Failed to list stops")
        .into_iter()
        .map(|detail| detail.stop.id)
        .collect()
}

/// Adds a catalogue activity and returns its id.
pub fn add_activity(db: &mut Database, city_id: u64, name: &str, cost: f64) -> u64 {
    db.insert_activities(
        city_id,
        &[NewActivity {
            name: name.to_string(),
            description: None,
            category: ActivityCategory::Sightseeing,
            estimated_cost: cost,
            duration_hours: 1.0,
        }],
    )
    .expect("Failed to insert activity");
    db.list_city_activities(city_id)
        .expect("Failed to list activities")
        .into_iter()
        .find(|a| a.name == name)
        .expect("Inserted activity should exist")
        .id
}

/// Generator returning a fixed reply, or failing when there is none.
pub struct StubGenerator {
    pub reply: Option<String>,
}

#[async_trait]
impl TextGenerator for StubGenerator {
    fn name(&self) -> &str {
        "stub"
    }

    async fn generate(&self, _request: &GenerationRequest) -> Result<String> {
        self.reply
            .clone()
            .ok_or_else(|| TravelError::generation("stub has no reply"))
    }
}

/// Helper function to create a test planner with a seeded catalogue
pub async fn create_test_planner(reply: Option<&str>) -> (TempDir, TripPlanner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = TripPlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_generator(Arc::new(StubGenerator {
            reply: reply.map(str::to_string),
        }))
        .with_hash_cost(4)
        .build()
        .await
        .expect("Failed to create planner");
    planner
        .seed_catalogue()
        .await
        .expect("Failed to seed catalogue");
    (temp_dir, planner)
}
