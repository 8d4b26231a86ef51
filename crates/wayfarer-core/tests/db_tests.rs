mod common;

use common::*;
use wayfarer_core::{
    models::{BudgetChanges, CityFilter, NewItineraryItem, StopChanges, TripChanges},
    sequence, SaveOutcome, TimeOfDay, TravelError,
};

fn move_to(position: i64) -> StopChanges {
    StopChanges {
        position: Some(position),
        ..StopChanges::default()
    }
}

#[test]
fn test_database_initialization() {
    let (temp_file, db) = create_test_db();
    assert!(temp_file.path().exists());

    let cities = db
        .search_cities(&CityFilter::default())
        .expect("Failed to search cities");
    assert_eq!(cities.len(), 20);
    assert!(cities
        .windows(2)
        .all(|w| w[0].popularity_score >= w[1].popularity_score));
}

#[test]
fn test_create_trip_computes_days_and_budget() {
    let (_temp_file, mut db) = create_test_db();
    let user = create_user(&mut db, "asha@example.com");
    let trip_id = create_trip(&mut db, user, "Spring");

    let detail = db.get_trip_detail(trip_id).expect("Failed to load trip");
    assert_eq!(detail.trip.total_days, 20);
    assert_eq!(detail.trip.stops_count, 0);
    assert!(!detail.trip.is_public);
    assert!(!detail.trip.share_code.is_empty());
    let budget = detail.budget.expect("A new trip has a budget");
    assert_eq!(budget.total_budget, 0.0);
    assert_eq!(budget.currency, "INR");
}

#[test]
fn test_append_assigns_consecutive_positions() {
    let (_temp_file, mut db) = create_test_db();
    let user = create_user(&mut db, "asha@example.com");
    let trip_id = create_trip(&mut db, user, "Spring");

    for city in [PARIS, TOKYO, NEW_YORK] {
        db.add_stop(trip_id, user, &new_stop(city, None)).unwrap();
    }

    let positions = db.stop_positions(trip_id).unwrap();
    assert_eq!(positions, vec![1, 2, 3]);
    assert_eq!(db.get_trip(trip_id).unwrap().stops_count, 3);
}

#[test]
fn test_insert_in_the_middle_shifts_later_stops() {
    let (_temp_file, mut db) = create_test_db();
    let user = create_user(&mut db, "asha@example.com");
    let trip_id = create_trip(&mut db, user, "Spring");

    let a = db.add_stop(trip_id, user, &new_stop(PARIS, None)).unwrap();
    let b = db.add_stop(trip_id, user, &new_stop(TOKYO, None)).unwrap();
    let c = db.add_stop(trip_id, user, &new_stop(NEW_YORK, None)).unwrap();
    let new = db.add_stop(trip_id, user, &new_stop(LONDON, Some(2))).unwrap();

    assert_eq!(new.stop.order_index, 2);
    assert_eq!(
        stop_order(&db, trip_id),
        vec![a.stop.id, new.stop.id, b.stop.id, c.stop.id]
    );
    assert!(sequence::is_dense(&db.stop_positions(trip_id).unwrap()));
}

#[test]
fn test_out_of_range_insert_is_clamped() {
    let (_temp_file, mut db) = create_test_db();
    let user = create_user(&mut db, "asha@example.com");
    let trip_id = create_trip(&mut db, user, "Spring");

    let a = db.add_stop(trip_id, user, &new_stop(PARIS, None)).unwrap();
    let late = db.add_stop(trip_id, user, &new_stop(TOKYO, Some(99))).unwrap();
    let early = db.add_stop(trip_id, user, &new_stop(LONDON, Some(-5))).unwrap();

    assert_eq!(late.stop.order_index, 2);
    assert_eq!(early.stop.order_index, 1);
    assert_eq!(
        stop_order(&db, trip_id),
        vec![early.stop.id, a.stop.id, late.stop.id]
    );
}

#[test]
fn test_move_stop_earlier() {
    let (_temp_file, mut db) = create_test_db();
    let user = create_user(&mut db, "asha@example.com");
    let trip_id = create_trip(&mut db, user, "Spring");

    let ids: Vec<u64> = [PARIS, TOKYO, NEW_YORK, LONDON]
        .into_iter()
        .map(|city| db.add_stop(trip_id, user, &new_stop(city, None)).unwrap().stop.id)
        .collect();

    let moved = db.update_stop(ids[3], user, &move_to(2)).unwrap();
    assert_eq!(moved.stop.order_index, 2);
    assert_eq!(stop_order(&db, trip_id), vec![ids[0], ids[3], ids[1], ids[2]]);
}

#[test]
fn test_move_stop_later() {
    let (_temp_file, mut db) = create_test_db();
    let user = create_user(&mut db, "asha@example.com");
    let trip_id = create_trip(&mut db, user, "Spring");

    let ids: Vec<u64> = [PARIS, TOKYO, NEW_YORK, LONDON]
        .into_iter()
        .map(|city| db.add_stop(trip_id, user, &new_stop(city, None)).unwrap().stop.id)
        .collect();

    db.update_stop(ids[0], user, &move_to(3)).unwrap();
    assert_eq!(stop_order(&db, trip_id), vec![ids[1], ids[2], ids[0], ids[3]]);

    // Past the end clamps to the last slot.
    db.update_stop(ids[1], user, &move_to(40)).unwrap();
    assert_eq!(stop_order(&db, trip_id), vec![ids[2], ids[0], ids[3], ids[1]]);
}

#[test]
fn test_move_to_current_position_changes_nothing() {
    let (_temp_file, mut db) = create_test_db();
    let user = create_user(&mut db, "asha@example.com");
    let trip_id = create_trip(&mut db, user, "Spring");

    let ids: Vec<u64> = [PARIS, TOKYO, NEW_YORK]
        .into_iter()
        .map(|city| db.add_stop(trip_id, user, &new_stop(city, None)).unwrap().stop.id)
        .collect();

    db.update_stop(ids[1], user, &move_to(2)).unwrap();
    assert_eq!(stop_order(&db, trip_id), ids);
    assert_eq!(db.stop_positions(trip_id).unwrap(), vec![1, 2, 3]);
}

#[test]
fn test_remove_stop_closes_gap() {
    let (_temp_file, mut db) = create_test_db();
    let user = create_user(&mut db, "asha@example.com");
    let trip_id = create_trip(&mut db, user, "Spring");

    let ids: Vec<u64> = [PARIS, TOKYO, NEW_YORK, LONDON]
        .into_iter()
        .map(|city| db.add_stop(trip_id, user, &new_stop(city, None)).unwrap().stop.id)
        .collect();

    db.remove_stop(ids[1], user).unwrap();
    assert_eq!(stop_order(&db, trip_id), vec![ids[0], ids[2], ids[3]]);
    assert_eq!(db.stop_positions(trip_id).unwrap(), vec![1, 2, 3]);

    assert!(matches!(
        db.get_stop_detail(ids[1]),
        Err(TravelError::NotFound { entity: "Stop", .. })
    ));
}

#[test]
fn test_stop_dates_must_be_ordered() {
    let (_temp_file, mut db) = create_test_db();
    let user = create_user(&mut db, "asha@example.com");
    let trip_id = create_trip(&mut db, user, "Spring");
    let stop = db.add_stop(trip_id, user, &new_stop(PARIS, None)).unwrap();

    let result = db.update_stop(
        stop.stop.id,
        user,
        &StopChanges {
            start_date: Some(day(10)),
            ..StopChanges::default()
        },
    );
    assert!(matches!(result, Err(TravelError::InvalidInput { .. })));

    let unchanged = db.get_stop_detail(stop.stop.id).unwrap();
    assert_eq!(unchanged.stop.start_date, day(2));
    assert_eq!(unchanged.stop.duration_days, 3);
}

#[test]
fn test_stop_requires_known_city_and_owner() {
    let (_temp_file, mut db) = create_test_db();
    let owner = create_user(&mut db, "asha@example.com");
    let other = create_user(&mut db, "ravi@example.com");
    let trip_id = create_trip(&mut db, owner, "Spring");

    assert!(matches!(
        db.add_stop(trip_id, owner, &new_stop(999, None)),
        Err(TravelError::NotFound { entity: "City", id: 999 })
    ));
    assert!(matches!(
        db.add_stop(trip_id, other, &new_stop(PARIS, None)),
        Err(TravelError::Forbidden { .. })
    ));
    assert!(matches!(
        db.add_stop(4242, owner, &new_stop(PARIS, None)),
        Err(TravelError::NotFound { entity: "Trip", .. })
    ));
    assert!(db.stop_positions(trip_id).unwrap().is_empty());
}

#[test]
fn test_update_trip_validates_merged_dates() {
    let (_temp_file, mut db) = create_test_db();
    let user = create_user(&mut db, "asha@example.com");
    let trip_id = create_trip(&mut db, user, "Spring");

    let bad = db.update_trip(
        trip_id,
        user,
        &TripChanges {
            end_date: Some(jiff::civil::date(2099, 2, 1)),
            ..TripChanges::default()
        },
    );
    assert!(matches!(bad, Err(TravelError::InvalidInput { .. })));

    let updated = db
        .update_trip(
            trip_id,
            user,
            &TripChanges {
                name: Some("Late spring".to_string()),
                end_date: Some(day(5)),
                is_public: Some(true),
                ..TripChanges::default()
            },
        )
        .unwrap();
    assert_eq!(updated.trip.name, "Late spring");
    assert_eq!(updated.trip.total_days, 5);
    assert!(updated.trip.is_public);
}

#[test]
fn test_budget_uses_overrides_and_activity_costs() {
    let (_temp_file, mut db) = create_test_db();
    let user = create_user(&mut db, "asha@example.com");
    let trip_id = create_trip(&mut db, user, "Spring");
    let stop = db.add_stop(trip_id, user, &new_stop(PARIS, None)).unwrap();

    let pricey = add_activity(&mut db, PARIS, "Private tour", 1200.0);
    let cheap = add_activity(&mut db, PARIS, "Bakery crawl", 300.0);

    let item = db
        .add_itinerary_activity(
            stop.stop.id,
            user,
            &NewItineraryItem {
                activity_id: pricey,
                day_number: 1,
                time_of_day: TimeOfDay::Morning,
                custom_notes: None,
                cost_override: Some(500.0),
            },
        )
        .unwrap();
    assert_eq!(item.estimated_cost, 500.0);

    db.add_itinerary_activity(
        stop.stop.id,
        user,
        &NewItineraryItem {
            activity_id: cheap,
            day_number: 1,
            time_of_day: TimeOfDay::Evening,
            custom_notes: None,
            cost_override: None,
        },
    )
    .unwrap();

    let budget = db
        .update_budget(
            trip_id,
            user,
            &BudgetChanges {
                transport: Some(2000.0),
                food: Some(700.0),
                currency: Some("EUR".to_string()),
                ..BudgetChanges::default()
            },
        )
        .unwrap();
    assert_eq!(budget.breakdown.activities, 800.0);
    assert_eq!(budget.total_budget, 2000.0 + 700.0 + 800.0);
    assert_eq!(budget.currency, "EUR");

    // Removing an item is reflected on the next read.
    db.remove_itinerary_activity(item.id, user).unwrap();
    let budget = db.get_budget(trip_id, user).unwrap();
    assert_eq!(budget.breakdown.activities, 300.0);
    assert_eq!(budget.total_budget, 3000.0);
}

#[test]
fn test_schedule_is_sorted_by_day_then_slot() {
    let (_temp_file, mut db) = create_test_db();
    let user = create_user(&mut db, "asha@example.com");
    let trip_id = create_trip(&mut db, user, "Spring");
    let stop = db.add_stop(trip_id, user, &new_stop(PARIS, None)).unwrap();
    let activity = add_activity(&mut db, PARIS, "Walk", 0.0);

    for (day_number, slot) in [
        (2, TimeOfDay::Morning),
        (1, TimeOfDay::Night),
        (1, TimeOfDay::Afternoon),
    ] {
        db.add_itinerary_activity(
            stop.stop.id,
            user,
            &NewItineraryItem {
                activity_id: activity,
                day_number,
                time_of_day: slot,
                custom_notes: None,
                cost_override: None,
            },
        )
        .unwrap();
    }

    let schedule = db.stop_schedule(stop.stop.id).unwrap();
    let keys: Vec<(u32, TimeOfDay)> = schedule
        .iter()
        .map(|item| (item.day_number, item.time_of_day))
        .collect();
    assert_eq!(
        keys,
        vec![
            (1, TimeOfDay::Afternoon),
            (1, TimeOfDay::Night),
            (2, TimeOfDay::Morning)
        ]
    );
}

#[test]
fn test_shared_trip_visibility() {
    let (_temp_file, mut db) = create_test_db();
    let user = create_user(&mut db, "asha@example.com");
    let trip_id = create_trip(&mut db, user, "Spring");
    let code = db.get_trip(trip_id).unwrap().share_code;

    assert!(matches!(
        db.shared_trip(&code),
        Err(TravelError::Forbidden { .. })
    ));
    assert!(matches!(
        db.shared_trip("no-such-code"),
        Err(TravelError::UnknownShareCode(_))
    ));

    db.update_trip(
        trip_id,
        user,
        &TripChanges {
            is_public: Some(true),
            ..TripChanges::default()
        },
    )
    .unwrap();
    assert_eq!(db.shared_trip(&code).unwrap().trip.id, trip_id);
}

#[test]
fn test_copy_trip_duplicates_stops_items_and_budget() {
    let (_temp_file, mut db) = create_test_db();
    let owner = create_user(&mut db, "asha@example.com");
    let other = create_user(&mut db, "ravi@example.com");
    let trip_id = create_trip(&mut db, owner, "Spring");
    let first = db.add_stop(trip_id, owner, &new_stop(PARIS, None)).unwrap();
    db.add_stop(trip_id, owner, &new_stop(TOKYO, None)).unwrap();
    let activity = add_activity(&mut db, PARIS, "Louvre late", 400.0);
    db.add_itinerary_activity(
        first.stop.id,
        owner,
        &NewItineraryItem {
            activity_id: activity,
            day_number: 1,
            time_of_day: TimeOfDay::Evening,
            custom_notes: Some("book ahead".to_string()),
            cost_override: None,
        },
    )
    .unwrap();
    db.update_budget(
        trip_id,
        owner,
        &BudgetChanges {
            accommodation: Some(5000.0),
            ..BudgetChanges::default()
        },
    )
    .unwrap();

    // A private trip cannot be copied by someone else.
    assert!(matches!(
        db.copy_trip(trip_id, other),
        Err(TravelError::Forbidden { .. })
    ));

    let source = db.get_trip(trip_id).unwrap();
    let copy = db.copy_trip(trip_id, owner).unwrap();
    assert_eq!(copy.trip.name, "Spring (Copy)");
    assert_eq!(copy.trip.user_id, owner);
    assert!(!copy.trip.is_public);
    assert_ne!(copy.trip.share_code, source.share_code);
    assert_eq!(copy.stops.len(), 2);
    assert_eq!(copy.stops[0].city.id, PARIS);
    assert_eq!(copy.stops[0].activities.len(), 1);
    assert_eq!(
        copy.stops[0].activities[0].custom_notes.as_deref(),
        Some("book ahead")
    );
    let budget = copy.budget.unwrap();
    assert_eq!(budget.breakdown.accommodation, 5000.0);
    assert_eq!(budget.total_budget, 5400.0);
}

#[test]
fn test_public_trip_can_be_copied_by_anyone() {
    let (_temp_file, mut db) = create_test_db();
    let owner = create_user(&mut db, "asha@example.com");
    let other = create_user(&mut db, "ravi@example.com");
    let trip_id = create_trip(&mut db, owner, "Spring");
    db.update_trip(
        trip_id,
        owner,
        &TripChanges {
            is_public: Some(true),
            ..TripChanges::default()
        },
    )
    .unwrap();

    let copy = db.copy_trip(trip_id, other).unwrap();
    assert_eq!(copy.trip.user_id, other);
    assert_eq!(db.list_trips(other).unwrap().len(), 1);
}

#[test]
fn test_save_destination_twice_is_a_no_op() {
    let (_temp_file, mut db) = create_test_db();
    let user = create_user(&mut db, "asha@example.com");

    let first = db.save_destination(user, TOKYO).unwrap();
    let SaveOutcome::Created(saved) = first else {
        panic!("first save should create a bookmark");
    };
    assert_eq!(saved.city.id, TOKYO);
    assert_eq!(
        db.save_destination(user, TOKYO).unwrap(),
        SaveOutcome::AlreadySaved
    );
    assert_eq!(db.list_saved(user).unwrap().len(), 1);

    assert!(matches!(
        db.save_destination(user, 999),
        Err(TravelError::NotFound { entity: "City", .. })
    ));
}

#[test]
fn test_remove_saved_checks_owner() {
    let (_temp_file, mut db) = create_test_db();
    let user = create_user(&mut db, "asha@example.com");
    let other = create_user(&mut db, "ravi@example.com");
    let SaveOutcome::Created(saved) = db.save_destination(user, PARIS).unwrap() else {
        panic!("expected a new bookmark");
    };

    assert!(matches!(
        db.remove_saved(saved.id, other),
        Err(TravelError::Forbidden { .. })
    ));
    db.remove_saved(saved.id, user).unwrap();
    assert!(db.list_saved(user).unwrap().is_empty());
}

#[test]
fn test_deleting_user_cascades() {
    let (_temp_file, mut db) = create_test_db();
    let user = create_user(&mut db, "asha@example.com");
    let trip_id = create_trip(&mut db, user, "Spring");
    db.add_stop(trip_id, user, &new_stop(PARIS, None)).unwrap();
    db.save_destination(user, PARIS).unwrap();

    db.delete_user(user).unwrap();
    assert!(matches!(
        db.get_trip(trip_id),
        Err(TravelError::NotFound { entity: "Trip", .. })
    ));
    assert!(db.list_saved(user).unwrap().is_empty());
    assert!(db.stop_positions(trip_id).unwrap().is_empty());
}

#[test]
fn test_duplicate_email_is_a_conflict() {
    let (_temp_file, mut db) = create_test_db();
    create_user(&mut db, "asha@example.com");
    assert!(matches!(
        db.create_user("asha@example.com", "hash", "Other"),
        Err(TravelError::Conflict(_))
    ));
}

#[test]
fn test_dashboard_budget_total_is_recomputed() {
    let (_temp_file, mut db) = create_test_db();
    let user = create_user(&mut db, "asha@example.com");
    let trip_id = create_trip(&mut db, user, "Spring");
    let stop = db.add_stop(trip_id, user, &new_stop(PARIS, None)).unwrap();
    let activity = add_activity(&mut db, PARIS, "Opera", 900.0);
    db.add_itinerary_activity(
        stop.stop.id,
        user,
        &NewItineraryItem {
            activity_id: activity,
            day_number: 1,
            time_of_day: TimeOfDay::Night,
            custom_notes: None,
            cost_override: None,
        },
    )
    .unwrap();
    db.update_budget(
        trip_id,
        user,
        &BudgetChanges {
            misc: Some(100.0),
            ..BudgetChanges::default()
        },
    )
    .unwrap();

    let stats = db
        .dashboard(user, jiff::civil::date(2026, 1, 1))
        .unwrap();
    assert_eq!(stats.total_trips, 1);
    assert_eq!(stats.upcoming_trips, 1);
    assert_eq!(stats.budget_total, 1000.0);
    assert_eq!(stats.recent_trips.len(), 1);
}

#[test]
fn test_trip_destinations_are_distinct_and_ordered() {
    let (_temp_file, mut db) = create_test_db();
    let user = create_user(&mut db, "asha@example.com");
    let trip_id = create_trip(&mut db, user, "Spring");
    for city in [TOKYO, PARIS, TOKYO] {
        db.add_stop(trip_id, user, &new_stop(city, None)).unwrap();
    }

    assert_eq!(
        db.trip_destinations(trip_id).unwrap(),
        vec!["Tokyo".to_string(), "Paris".to_string()]
    );
}
