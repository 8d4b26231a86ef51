//! Prompt templates and the shapes of their structured answers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::GenerationRequest;
use crate::models::{
    itinerary::{lenient_f64, lenient_seq, lenient_text},
    ActivityCategory, NewActivity,
};

const ITINERARY_SYSTEM: &str = "You are an expert travel planner. Provide detailed, realistic, and budget-conscious travel itineraries. Always respond with valid JSON.";
const SUGGESTION_SYSTEM: &str = "You are a local travel expert. Suggest authentic and diverse activities. Always respond with valid JSON.";
const CITY_INFO_SYSTEM: &str = "You are a travel information expert. Provide accurate, helpful city information. Always respond with valid JSON.";

const ITINERARY_LAYOUT: &str = r#"{
  "days": [
    {
      "day": 1,
      "title": "Day title",
      "activities": [
        {
          "name": "Activity name",
          "time": "morning/afternoon/evening",
          "description": "Brief description",
          "cost": 500,
          "duration": 2.5,
          "category": "sightseeing/food/adventure/culture/shopping"
        }
      ],
      "accommodation": {"name": "Hotel name", "cost": 3000, "description": "Brief description"},
      "meals": [{"type": "breakfast/lunch/dinner", "suggestion": "Restaurant name", "cost": 400}],
      "transport_to_next_day": {
        "from": "Current city",
        "to": "Next city",
        "modes": [
          {
            "mode": "flight/train/bus/car",
            "duration": "2 hours",
            "cost": 2000,
            "booking_platform": "MakeMyTrip/IRCTC/RedBus/Google Maps",
            "notes": "Best time to book"
          }
        ]
      }
    }
  ],
  "budget_breakdown": {"accommodation": 21000, "food": 7000, "activities": 9000, "transport": 6000, "misc": 2000, "total": 45000},
  "tips": ["Tip 1", "Tip 2", "Tip 3"]
}"#;

const SUGGESTION_LAYOUT: &str = r#"{
  "activities": [
    {
      "name": "Activity name",
      "description": "Brief description",
      "category": "sightseeing/food/adventure/culture/shopping",
      "estimated_cost": 500,
      "duration_hours": 2.5,
      "best_time": "morning/afternoon/evening/anytime"
    }
  ]
}"#;

/// Default price given to a suggestion that names none.
const FALLBACK_ACTIVITY_COST: f64 = 1000.0;
const FALLBACK_ACTIVITY_HOURS: f64 = 2.0;

/// Multi-day itinerary covering `destination`.
pub fn itinerary(
    destination: &str,
    days: u32,
    budget_min: f64,
    budget_max: f64,
    preferences: &[String],
) -> GenerationRequest {
    let preferences = if preferences.is_empty() {
        String::new()
    } else {
        format!("\nUser preferences: {}", preferences.join(", "))
    };
    let prompt = format!(
        "Create a detailed {days}-day travel itinerary for {destination} with a budget of \
         ₹{budget_min}-₹{budget_max}.{preferences}\n\n\
         For each day, provide:\n\
         - Morning, afternoon and evening activities (with estimated cost)\n\
         - Recommended restaurants for breakfast, lunch, dinner (with price range)\n\
         - Accommodation suggestions (with nightly rate)\n\
         - Transportation tips (with estimated cost)\n\
         - Hidden gems and local tips\n\n\
         If this is a multi-city itinerary, include transportation between cities: mode of \
         transport (flight, train, bus, car), estimated travel time, estimated cost in INR, \
         best booking platforms and travel tips.\n\n\
         Format the response as JSON with this structure:\n{ITINERARY_LAYOUT}\n\n\
         Ensure the total stays within budget and all costs are in INR ₹."
    );
    GenerationRequest {
        system: ITINERARY_SYSTEM.to_string(),
        prompt,
        temperature: 0.7,
        max_tokens: 4000,
    }
}

/// Ten activity ideas for one city.
pub fn activity_suggestions(
    city_name: &str,
    interests: &[String],
    budget_per_activity: Option<f64>,
) -> GenerationRequest {
    let budget = budget_per_activity
        .map(|b| format!(" with budget around ₹{b} per activity"))
        .unwrap_or_default();
    let prompt = format!(
        "Suggest 10 activities in {city_name} for someone interested in: {}{budget}.\n\n\
         Respond with JSON:\n{SUGGESTION_LAYOUT}",
        interests.join(", ")
    );
    GenerationRequest {
        system: SUGGESTION_SYSTEM.to_string(),
        prompt,
        temperature: 0.8,
        max_tokens: 2000,
    }
}

/// Traveller-oriented summary of a city.
pub fn city_info(city_name: &str, country: Option<&str>) -> GenerationRequest {
    let location = match country {
        Some(country) => format!("{city_name}, {country}"),
        None => city_name.to_string(),
    };
    let prompt = format!(
        "Provide comprehensive information about {location} for travelers.\n\n\
         Respond with JSON:\n\
         {{\n  \"city\": \"{city_name}\",\n  \"country\": \"Country name\",\n  \
         \"description\": \"2-3 sentence description\",\n  \
         \"best_time_to_visit\": \"Season/months\",\n  \"average_daily_cost\": 150,\n  \
         \"cost_index\": 1.2,\n  \"currency\": \"INR\",\n  \
         \"popular_for\": [\"beaches\", \"history\", \"nightlife\"],\n  \
         \"must_see\": [\"Attraction 1\", \"Attraction 2\", \"Attraction 3\"],\n  \
         \"local_tips\": [\"Tip 1\", \"Tip 2\"]\n}}"
    );
    GenerationRequest {
        system: CITY_INFO_SYSTEM.to_string(),
        prompt,
        temperature: 0.5,
        max_tokens: 1000,
    }
}

/// Answer to [`activity_suggestions`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestionList {
    #[serde(default, deserialize_with = "lenient_seq")]
    pub activities: Vec<ActivitySuggestion>,
}

/// A single suggested activity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivitySuggestion {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub estimated_cost: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub duration_hours: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub best_time: Option<String>,
}

impl ActivitySuggestion {
    /// Converts the suggestion into a catalogue entry. Suggestions without a
    /// name are dropped; missing or negative figures get defaults.
    pub fn to_new_activity(&self) -> Option<NewActivity> {
        let name = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())?;
        let non_negative = |v: Option<f64>, fallback: f64| v.filter(|n| *n >= 0.0).unwrap_or(fallback);
        Some(NewActivity {
            name: name.to_string(),
            description: self.description.clone(),
            category: self
                .category
                .as_deref()
                .map(ActivityCategory::from_suggestion)
                .unwrap_or_default(),
            estimated_cost: non_negative(self.estimated_cost, FALLBACK_ACTIVITY_COST),
            duration_hours: non_negative(self.duration_hours, FALLBACK_ACTIVITY_HOURS),
        })
    }
}

/// Answer to [`city_info`]. Unknown keys are passed through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CityInfo {
    #[serde(default, deserialize_with = "lenient_text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub best_time_to_visit: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub average_daily_cost: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cost_index: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub popular_for: Vec<String>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub must_see: Vec<String>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub local_tips: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::parse_structured;

    #[test]
    fn test_itinerary_request_parameters() {
        let request = itinerary("Jaipur, Agra", 4, 1000.0, 5000.0, &["forts".to_string()]);
        assert_eq!(request.temperature, 0.7);
        assert_eq!(request.max_tokens, 4000);
        assert!(request.prompt.contains("4-day travel itinerary for Jaipur, Agra"));
        assert!(request.prompt.contains("User preferences: forts"));
    }

    #[test]
    fn test_suggestion_and_city_parameters() {
        let request = activity_suggestions("Goa", &["food".to_string()], Some(1500.0));
        assert_eq!((request.temperature, request.max_tokens), (0.8, 2000));
        assert!(request.prompt.contains("interested in: food with budget around"));

        let request = city_info("Goa", Some("India"));
        assert_eq!((request.temperature, request.max_tokens), (0.5, 1000));
        assert!(request.prompt.contains("about Goa, India"));
    }

    #[test]
    fn test_suggestion_conversion_defaults() {
        let list: SuggestionList = parse_structured(
            r#"```json
{"activities": [
  {"name": "Spice Farm Tour", "category": "nature", "estimated_cost": "800"},
  {"description": "no name"},
  {"name": "Fish Market", "category": "food", "estimated_cost": -3, "duration_hours": 1}
]}
```"#,
        )
        .unwrap();
        let converted: Vec<NewActivity> = list
            .activities
            .iter()
            .filter_map(ActivitySuggestion::to_new_activity)
            .collect();
        assert_eq!(converted.len(), 2);
        assert_eq!(converted[0].category, ActivityCategory::Adventure);
        assert_eq!(converted[0].estimated_cost, 800.0);
        assert_eq!(converted[0].duration_hours, 2.0);
        assert_eq!(converted[1].estimated_cost, 1000.0);
        assert_eq!(converted[1].duration_hours, 1.0);
    }

    #[test]
    fn test_city_info_keeps_unknown_keys() {
        let info: CityInfo =
            parse_structured(r#"{"city": "Goa", "cost_index": "0.7", "languages": ["Konkani"]}"#)
                .unwrap();
        assert_eq!(info.city.as_deref(), Some("Goa"));
        assert_eq!(info.cost_index, Some(0.7));
        assert!(info.extra.contains_key("languages"));
    }
}
