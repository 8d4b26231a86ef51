//! Generated itinerary documents.
//!
//! The generator is asked for a fixed JSON layout but nothing forces it to
//! comply. An [`ItineraryDoc`] therefore keeps the JSON exactly as generated
//! and serializes it back unchanged; the typed fields are a lenient view over
//! it in which a value of the wrong type reads as absent.

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Key under which the unparsed generator text is carried.
pub const RAW_TEXT_KEY: &str = "raw_text";

/// Result of ingesting generator output.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedItinerary {
    /// The text contained a JSON itinerary.
    Structured(ItineraryDoc),
    /// The text could not be parsed; the original is kept verbatim.
    RawFallback(String),
}

impl GeneratedItinerary {
    pub fn is_structured(&self) -> bool {
        matches!(self, GeneratedItinerary::Structured(_))
    }

    pub fn as_doc(&self) -> Option<&ItineraryDoc> {
        match self {
            GeneratedItinerary::Structured(doc) => Some(doc),
            GeneratedItinerary::RawFallback(_) => None,
        }
    }

    pub fn raw_text(&self) -> Option<&str> {
        match self {
            GeneratedItinerary::Structured(_) => None,
            GeneratedItinerary::RawFallback(text) => Some(text),
        }
    }
}

impl Serialize for GeneratedItinerary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GeneratedItinerary::Structured(doc) => doc.serialize(serializer),
            GeneratedItinerary::RawFallback(text) => {
                let mut envelope = Map::new();
                envelope.insert(RAW_TEXT_KEY.to_string(), Value::String(text.clone()));
                envelope.serialize(serializer)
            }
        }
    }
}

impl<'de> Deserialize<'de> for GeneratedItinerary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if let Value::Object(map) = &value {
            if map.len() == 1 {
                if let Some(Value::String(text)) = map.get(RAW_TEXT_KEY) {
                    return Ok(GeneratedItinerary::RawFallback(text.clone()));
                }
            }
        }
        ItineraryDoc::from_value(value)
            .map(GeneratedItinerary::Structured)
            .ok_or_else(|| serde::de::Error::custom("itinerary must be a JSON object or array"))
    }
}

/// A multi-day itinerary as laid out in the generation prompt.
///
/// Serializes to the generated JSON as-is, whatever its shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryDoc {
    source: Value,
    /// Entries of `days` that read as day objects
    pub days: Vec<DayPlan>,
    pub budget_breakdown: Option<BudgetBreakdown>,
    /// Entries of `tips` that are strings
    pub tips: Vec<String>,
}

/// Typed fields of a top-level itinerary object.
#[derive(Default, Deserialize)]
struct DocView {
    #[serde(default, deserialize_with = "lenient_seq")]
    days: Vec<DayPlan>,
    #[serde(default, deserialize_with = "lenient")]
    budget_breakdown: Option<BudgetBreakdown>,
    #[serde(default, deserialize_with = "lenient_seq")]
    tips: Vec<String>,
}

impl ItineraryDoc {
    /// Builds a document from parsed JSON. An object is read field by field,
    /// a bare array as the list of days, and scalars are rejected.
    pub fn from_value(value: Value) -> Option<Self> {
        let view = match &value {
            Value::Object(_) => DocView::deserialize(&value).unwrap_or_default(),
            Value::Array(items) => DocView {
                days: items
                    .iter()
                    .filter_map(|item| DayPlan::deserialize(item).ok())
                    .collect(),
                ..DocView::default()
            },
            _ => return None,
        };
        Some(Self {
            source: value,
            days: view.days,
            budget_breakdown: view.budget_breakdown,
            tips: view.tips,
        })
    }

    /// The JSON as generated.
    pub fn value(&self) -> &Value {
        &self.source
    }

    /// Sum of every priced activity, meal and stay across all days.
    pub fn estimated_spend(&self) -> f64 {
        self.days
            .iter()
            .map(|day| {
                let activities: f64 = day.activities.iter().filter_map(|a| a.cost).sum();
                let meals: f64 = day.meals.iter().filter_map(|m| m.cost).sum();
                let stay = day.accommodation.as_ref().and_then(|a| a.cost).unwrap_or(0.0);
                activities + meals + stay
            })
            .sum()
    }
}

impl Serialize for ItineraryDoc {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.source.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ItineraryDoc {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value)
            .ok_or_else(|| serde::de::Error::custom("itinerary must be a JSON object or array"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    #[serde(default, deserialize_with = "lenient_u32", skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_seq", skip_serializing_if = "Vec::is_empty")]
    pub activities: Vec<PlannedActivity>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub accommodation: Option<Accommodation>,
    #[serde(default, deserialize_with = "lenient_seq", skip_serializing_if = "Vec::is_empty")]
    pub meals: Vec<Meal>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub transport_to_next_day: Option<Transfer>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannedActivity {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Accommodation {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Travel between cities at the end of a day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, deserialize_with = "lenient_seq", skip_serializing_if = "Vec::is_empty")]
    pub modes: Vec<TransportMode>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransportMode {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub booking_platform: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetBreakdown {
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub accommodation: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub food: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub activities: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub transport: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub misc: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Keeps the elements that parse and drops the rest.
pub(crate) fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

/// Numbers, or strings that hold a number ("1500", " 2.5 ").
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_from(&Value::deserialize(deserializer)?))
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_from(&Value::deserialize(deserializer)?)
        .filter(|n| *n >= 0.0 && n.fract() == 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| n as u32))
}

/// Strings as-is, numbers rendered as text.
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn number_from(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_doc_reads_prompt_layout() {
        let doc: ItineraryDoc = serde_json::from_value(json!({
            "days": [{
                "day": 1,
                "title": "Arrival",
                "activities": [{"name": "Fort walk", "time": "morning", "cost": 500, "duration": 2.5}],
                "accommodation": {"name": "Haveli", "cost": 3000},
                "meals": [{"type": "dinner", "suggestion": "Thali house", "cost": "400"}]
            }],
            "budget_breakdown": {"food": 400, "total": 3900},
            "tips": ["Carry water"]
        }))
        .unwrap();

        assert_eq!(doc.days.len(), 1);
        let day = &doc.days[0];
        assert_eq!(day.day, Some(1));
        assert_eq!(day.activities[0].cost, Some(500.0));
        assert_eq!(day.meals[0].kind.as_deref(), Some("dinner"));
        assert_eq!(day.meals[0].cost, Some(400.0));
        assert_eq!(doc.budget_breakdown.as_ref().unwrap().total, Some(3900.0));
        assert_eq!(doc.tips, vec!["Carry water".to_string()]);
        assert_eq!(doc.estimated_spend(), 3900.0);
    }

    #[test]
    fn test_wrong_types_read_as_absent_but_are_kept() {
        let input = json!({
            "days": [
                {"day": "one", "activities": "lots", "meals": [{"cost": "cheap"}]},
                "not a day"
            ],
            "budget_breakdown": [1, 2],
            "tips": "be early"
        });
        let doc: ItineraryDoc = serde_json::from_value(input.clone()).unwrap();

        assert_eq!(doc.days.len(), 1);
        assert_eq!(doc.days[0].day, None);
        assert!(doc.days[0].activities.is_empty());
        assert_eq!(doc.days[0].meals[0].cost, None);
        assert!(doc.budget_breakdown.is_none());
        assert!(doc.tips.is_empty());
        assert_eq!(serde_json::to_value(&doc).unwrap(), input);
    }

    #[test]
    fn test_unknown_keys_are_preserved() {
        let input = json!({"days": [], "currency": "INR", "summary": {"nights": 3}});
        let doc: ItineraryDoc = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(doc.value()["currency"], json!("INR"));
        assert_eq!(serde_json::to_value(&doc).unwrap(), input);
    }

    #[test]
    fn test_generated_itinerary_wire_forms() {
        let raw = GeneratedItinerary::RawFallback("plain words".to_string());
        let value = serde_json::to_value(&raw).unwrap();
        assert_eq!(value, json!({"raw_text": "plain words"}));
        let back: GeneratedItinerary = serde_json::from_value(value).unwrap();
        assert_eq!(back, raw);

        let structured: GeneratedItinerary =
            serde_json::from_value(json!({"days": [], "tips": ["a"]})).unwrap();
        assert!(structured.is_structured());
        assert_eq!(structured.as_doc().unwrap().tips, vec!["a".to_string()]);
    }

    #[test]
    fn test_bare_array_is_read_as_days() {
        let doc = ItineraryDoc::from_value(json!([{"day": 1}, {"day": 2}])).unwrap();
        assert_eq!(doc.days.len(), 2);
        assert_eq!(serde_json::to_value(&doc).unwrap(), json!([{"day": 1}, {"day": 2}]));
        assert!(ItineraryDoc::from_value(json!(42)).is_none());
    }
}
