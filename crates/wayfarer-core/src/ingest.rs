//! Turning text-generation output into structured data.
//!
//! Models are asked for JSON but often wrap it in markdown fences or pad it
//! with prose. [`extract_payload`] strips the fencing; [`ingest_itinerary`]
//! never fails and degrades to [`GeneratedItinerary::RawFallback`];
//! [`parse_structured`] is for callers that have no use for raw text.

use log::warn;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    error::{Result, TravelError},
    models::{GeneratedItinerary, ItineraryDoc},
};

const FENCE: &str = "```";
const JSON_FENCE: &str = "```json";

/// Returns the part of `text` that should hold the JSON payload.
///
/// A `` ```json `` block wins (tag matched case-insensitively), then the
/// first untagged fenced block, then the whole text. An unclosed fence runs to
/// the end of the text.
pub fn extract_payload(text: &str) -> &str {
    // ASCII lowercasing keeps byte offsets aligned with `text`.
    let lowered = text.to_ascii_lowercase();
    if let Some(start) = lowered.find(JSON_FENCE) {
        return between_fences(text, start + JSON_FENCE.len());
    }
    if let Some(start) = text.find(FENCE) {
        return between_fences(text, start + FENCE.len());
    }
    text
}

fn between_fences(text: &str, body_start: usize) -> &str {
    let rest = &text[body_start..];
    let body = match rest.find(FENCE) {
        Some(end) => &rest[..end],
        None => rest,
    };
    body.trim()
}

/// Parses an itinerary, falling back to the original text verbatim when the
/// payload is not JSON (or is a bare scalar).
pub fn ingest_itinerary(text: &str) -> GeneratedItinerary {
    let payload = extract_payload(text);
    match serde_json::from_str::<Value>(payload) {
        Ok(value) => match ItineraryDoc::from_value(value) {
            Some(doc) => GeneratedItinerary::Structured(doc),
            None => {
                warn!("Generated itinerary is JSON but not an object or array; keeping raw text");
                GeneratedItinerary::RawFallback(text.to_string())
            }
        },
        Err(e) => {
            warn!("Generated itinerary is not valid JSON ({e}); keeping raw text");
            GeneratedItinerary::RawFallback(text.to_string())
        }
    }
}

/// Parses the fenced payload of `text` strictly into `T`.
///
/// # Errors
///
/// Returns `TravelError::Generation` when the payload is not JSON of the
/// expected shape.
pub fn parse_structured<T: DeserializeOwned>(text: &str) -> Result<T> {
    serde_json::from_str(extract_payload(text))
        .map_err(|e| TravelError::generation(format!("response was not the expected JSON: {e}")))
}
