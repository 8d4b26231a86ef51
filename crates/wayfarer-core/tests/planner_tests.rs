mod common;

use common::{create_test_planner, PARIS, TOKYO};
use serde_json::json;
use wayfarer_core::{
    params::{
        AddItineraryActivity, AddStop, CreateTrip, GenerateItinerary, RegisterUser,
        SearchActivities, SearchCities, SuggestActivities, UpdateBudget, UpdateStop, UpdateTrip,
    },
    GeneratedItinerary, TimeOfDay, TravelError, TripPlanner,
};

async fn register(planner: &TripPlanner, email: &str) -> u64 {
    planner
        .register(&RegisterUser {
            email: Some(email.to_string()),
            password: Some("hunter22".to_string()),
            name: Some("Traveller".to_string()),
        })
        .await
        .expect("Failed to register")
        .id
}

fn stop_params(city_id: u64, order_index: serde_json::Value) -> AddStop {
    AddStop {
        city_id: Some(city_id),
        start_date: Some("2099-05-02".to_string()),
        end_date: Some("2099-05-03T10:00:00".to_string()),
        notes: None,
        order_index,
    }
}

#[tokio::test]
#[allow(clippy::too_many_lines)]
async fn test_complete_trip_workflow() {
    let (_temp_dir, planner) = create_test_planner(Some(
        r#"Here you go: ```json
{"days": [{"day": 1, "title": "Tokyo arrival", "activities": [{"name": "Shibuya", "cost": "500"}]}]}
```"#,
    ))
    .await;
    let user = register(&planner, "asha@example.com").await;

    let trip = planner
        .create_trip(
            user,
            &CreateTrip {
                name: Some("  Far East  ".to_string()),
                start_date: Some("2099-05-01".to_string()),
                end_date: Some("2099-05-07".to_string()),
                ..CreateTrip::default()
            },
        )
        .await
        .expect("Failed to create trip");
    assert_eq!(trip.trip.name, "Far East");
    assert_eq!(trip.trip.total_days, 7);
    let trip_id = trip.trip.id;

    let tokyo = planner
        .add_stop(trip_id, user, &stop_params(TOKYO, json!(null)))
        .await
        .expect("Failed to add stop");
    assert_eq!(tokyo.stop.duration_days, 2);
    let paris = planner
        .add_stop(trip_id, user, &stop_params(PARIS, json!("1")))
        .await
        .expect("Failed to add stop");
    assert_eq!(paris.stop.order_index, 1);

    let moved = planner
        .update_stop(
            paris.stop.id,
            user,
            &UpdateStop {
                order_index: json!(2.0),
                notes: Some("Museums".to_string()),
                ..UpdateStop::default()
            },
        )
        .await
        .expect("Failed to move stop");
    assert_eq!(moved.stop.order_index, 2);
    assert_eq!(moved.stop.notes.as_deref(), Some("Museums"));

    let activities = planner
        .search_activities(&SearchActivities {
            city_id: Some(TOKYO),
            ..SearchActivities::default()
        })
        .await
        .expect("Failed to search activities");
    let activity = &activities.items[0];

    let item = planner
        .add_itinerary_activity(
            tokyo.stop.id,
            user,
            &AddItineraryActivity {
                activity_id: Some(activity.id),
                time_of_day: Some("Afternoon".to_string()),
                estimated_cost_override: Some(0.0),
                ..AddItineraryActivity::default()
            },
        )
        .await
        .expect("Failed to schedule activity");
    assert_eq!(item.day_number, 1);
    assert_eq!(item.time_of_day, TimeOfDay::Afternoon);
    assert_eq!(item.estimated_cost, 0.0);

    let budget = planner
        .update_budget(
            trip_id,
            user,
            &UpdateBudget {
                transport_cost: Some(45_000.0),
                currency: Some("jpy".to_string()),
                ..UpdateBudget::default()
            },
        )
        .await
        .expect("Failed to update budget");
    assert_eq!(budget.currency, "JPY");
    assert_eq!(budget.total_budget, 45_000.0);

    let itinerary = planner
        .generate_itinerary(trip_id, user, &GenerateItinerary::default())
        .await
        .expect("Failed to generate itinerary");
    let GeneratedItinerary::Structured(doc) = itinerary else {
        panic!("expected a structured itinerary");
    };
    assert_eq!(doc.days[0].activities[0].cost, Some(500.0));

    let detail = planner.get_trip(trip_id, user).await.unwrap();
    assert_eq!(detail.stops.len(), 2);
    assert_eq!(detail.stops[0].city.name, "Tokyo");
    assert_eq!(detail.stops[0].activities.len(), 1);
    assert!(detail.trip.ai_itinerary.is_some());

    planner.delete_trip(trip_id, user).await.unwrap();
    assert!(planner.list_trips(user).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_validation_errors_name_the_field() {
    let (_temp_dir, planner) = create_test_planner(None).await;
    let user = register(&planner, "asha@example.com").await;

    let missing = planner
        .create_trip(
            user,
            &CreateTrip {
                name: Some("Trip".to_string()),
                start_date: Some("2099-05-01".to_string()),
                ..CreateTrip::default()
            },
        )
        .await;
    assert!(
        matches!(missing, Err(TravelError::InvalidInput { ref field, .. }) if field == "end_date")
    );

    let reversed = planner
        .create_trip(
            user,
            &CreateTrip {
                name: Some("Trip".to_string()),
                start_date: Some("2099-05-09".to_string()),
                end_date: Some("2099-05-01".to_string()),
                ..CreateTrip::default()
            },
        )
        .await;
    assert!(matches!(reversed, Err(TravelError::InvalidInput { .. })));

    let trip_id = planner
        .create_trip(
            user,
            &CreateTrip {
                name: Some("Trip".to_string()),
                start_date: Some("2099-05-01".to_string()),
                end_date: Some("2099-05-09".to_string()),
                ..CreateTrip::default()
            },
        )
        .await
        .unwrap()
        .trip
        .id;
    let bad_position = planner
        .add_stop(trip_id, user, &stop_params(PARIS, json!("second")))
        .await;
    assert!(
        matches!(bad_position, Err(TravelError::InvalidInput { ref field, .. }) if field == "order_index")
    );
    assert!(planner.get_trip(trip_id, user).await.unwrap().stops.is_empty());
}

#[tokio::test]
async fn test_other_users_cannot_touch_a_trip() {
    let (_temp_dir, planner) = create_test_planner(None).await;
    let owner = register(&planner, "asha@example.com").await;
    let other = register(&planner, "ravi@example.com").await;
    let trip_id = planner
        .create_trip(
            owner,
            &CreateTrip {
                name: Some("Mine".to_string()),
                start_date: Some("2099-05-01".to_string()),
                end_date: Some("2099-05-09".to_string()),
                ..CreateTrip::default()
            },
        )
        .await
        .unwrap()
        .trip
        .id;

    assert!(matches!(
        planner.get_trip(trip_id, other).await,
        Err(TravelError::Forbidden { .. })
    ));
    assert!(matches!(
        planner
            .update_trip(
                trip_id,
                other,
                &UpdateTrip {
                    name: Some("Stolen".to_string()),
                    ..UpdateTrip::default()
                }
            )
            .await,
        Err(TravelError::Forbidden { .. })
    ));
    assert!(matches!(
        planner.delete_trip(trip_id, other).await,
        Err(TravelError::Forbidden { .. })
    ));
    assert!(matches!(
        planner.get_trip(trip_id + 100, owner).await,
        Err(TravelError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_city_search_and_suggestions() {
    let (_temp_dir, planner) = create_test_planner(Some(
        r#"{"activities": [{"name": "Tea ceremony", "category": "cultural", "estimated_cost": "1500"}]}"#,
    ))
    .await;

    let cities = planner
        .search_cities(&SearchCities {
            q: Some("india".to_string()),
            ..SearchCities::default()
        })
        .await
        .unwrap();
    assert_eq!(cities.len(), 12);
    assert!(cities.iter().all(|c| c.country == "India"));

    let suggestions = planner
        .suggest_activities(&SuggestActivities {
            city_name: Some("Kyoto".to_string()),
            ..SuggestActivities::default()
        })
        .await
        .unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].estimated_cost, Some(1500.0));

    let missing_city = planner
        .suggest_activities(&SuggestActivities::default())
        .await;
    assert!(matches!(missing_city, Err(TravelError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_city_info_requires_json() {
    let (_temp_dir, planner) = create_test_planner(Some("Paris is lovely in spring.")).await;

    assert!(matches!(
        planner.city_info(PARIS).await,
        Err(TravelError::Generation { .. })
    ));
    assert!(matches!(
        planner.city_info(999).await,
        Err(TravelError::NotFound { entity: "City", .. })
    ));
}
