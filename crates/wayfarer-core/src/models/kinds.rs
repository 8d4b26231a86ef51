//! Closed enumerations for activity categories and itinerary time slots.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of activity categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityCategory {
    #[default]
    Sightseeing,
    Food,
    Adventure,
    Culture,
    Shopping,
}

impl ActivityCategory {
    /// Every category, in display order.
    pub const ALL: [ActivityCategory; 5] = [
        ActivityCategory::Sightseeing,
        ActivityCategory::Food,
        ActivityCategory::Adventure,
        ActivityCategory::Culture,
        ActivityCategory::Shopping,
    ];

    /// Database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityCategory::Sightseeing => "sightseeing",
            ActivityCategory::Food => "food",
            ActivityCategory::Adventure => "adventure",
            ActivityCategory::Culture => "culture",
            ActivityCategory::Shopping => "shopping",
        }
    }

    /// Reads a category suggested by the text generator, which does not
    /// always stick to the closed set. Near misses map to the closest
    /// category; anything else becomes sightseeing.
    pub fn from_suggestion(s: &str) -> Self {
        if let Ok(category) = s.parse() {
            return category;
        }
        match s.trim().to_lowercase().as_str() {
            "cultural" | "history" | "heritage" | "art" | "religious" => {
                ActivityCategory::Culture
            }
            "dining" | "cuisine" | "restaurant" | "street food" => ActivityCategory::Food,
            "outdoor" | "outdoors" | "nature" | "sports" => ActivityCategory::Adventure,
            "market" | "markets" => ActivityCategory::Shopping,
            _ => ActivityCategory::Sightseeing,
        }
    }
}

impl FromStr for ActivityCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sightseeing" => Ok(ActivityCategory::Sightseeing),
            "food" => Ok(ActivityCategory::Food),
            "adventure" => Ok(ActivityCategory::Adventure),
            "culture" => Ok(ActivityCategory::Culture),
            "shopping" => Ok(ActivityCategory::Shopping),
            _ => Err(format!("Invalid activity category: {s}")),
        }
    }
}

impl fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time-of-day slot for an itinerary item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    #[default]
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// Database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Night => "night",
        }
    }

    /// Sort key used when listing a stop's schedule.
    pub fn rank(&self) -> u8 {
        match self {
            TimeOfDay::Morning => 0,
            TimeOfDay::Afternoon => 1,
            TimeOfDay::Evening => 2,
            TimeOfDay::Night => 3,
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" => Ok(TimeOfDay::Morning),
            "afternoon" => Ok(TimeOfDay::Afternoon),
            "evening" => Ok(TimeOfDay::Evening),
            "night" => Ok(TimeOfDay::Night),
            _ => Err(format!("Invalid time of day: {s}")),
        }
    }
}
