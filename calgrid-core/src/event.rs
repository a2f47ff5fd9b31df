//! Calendar event record.
//!
//! Timestamps are wall-clock readings (`NaiveDateTime`). Any UTC offset
//! present in stored data is dropped on ingestion so that two events on
//! the same printed date always land on the same grid cell.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::category::{Category, CategoryColor};

/// A calendar event as held in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(with = "wall_clock")]
    pub date: NaiveDateTime,
    /// End of a ranged event
    #[serde(default, with = "wall_clock::option", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDateTime>,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub all_day: bool,
}

/// Event fields supplied by a caller before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    #[serde(with = "wall_clock")]
    pub date: NaiveDateTime,
    #[serde(default, with = "wall_clock::option", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDateTime>,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub all_day: bool,
}

impl Event {
    pub fn from_new(id: String, new: NewEvent) -> Self {
        Event {
            id,
            title: new.title,
            date: new.date,
            end_date: new.end_date,
            category: new.category,
            description: new.description,
            location: new.location,
            all_day: new.all_day,
        }
    }

    /// Calendar day the event starts on
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }

    pub fn hour(&self) -> u32 {
        self.date.hour()
    }

    /// Always derived from the category, never stored.
    pub fn color(&self) -> CategoryColor {
        self.category.color()
    }

    /// False for all-day events and for events stamped exactly at midnight.
    pub fn has_time(&self) -> bool {
        !self.all_day && (self.date.hour() != 0 || self.date.minute() != 0)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Parse a stored or user-supplied timestamp into a wall-clock reading.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM`, `YYYY-MM-DDTHH:MM:SS[.fff]`
/// (a space may replace the `T`) and RFC 3339 with an offset.
pub fn parse_wall_clock(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = s.parse::<NaiveDateTime>() {
        return Some(dt);
    }
    for fmt in ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Serde adapter for wall-clock timestamps.
pub mod wall_clock {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&dt.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_wall_clock(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp '{}'", raw)))
    }

    pub mod option {
        use chrono::NaiveDateTime;
        use serde::{Deserialize, Deserializer, Serializer, de::Error};

        pub fn serialize<S: Serializer>(
            dt: &Option<NaiveDateTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match dt {
                Some(dt) => super::serialize(dt, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDateTime>, D::Error> {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            match raw {
                None => Ok(None),
                Some(s) if s.trim().is_empty() => Ok(None),
                Some(s) => crate::event::parse_wall_clock(&s)
                    .map(Some)
                    .ok_or_else(|| D::Error::custom(format!("invalid timestamp '{}'", s))),
            }
        }
    }
}
