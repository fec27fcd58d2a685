use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::clients::eventbrite::EventEntry;
use crate::entities::events;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub link: String,
    pub name: String,
    pub event_date: String,
    pub summary: Option<String>,
    pub created_at: i64,
    pub location_id: i32,
}

impl Event {
    pub fn from_entry(entry: &EventEntry, fetched_at: i64, location_id: i32) -> Self {
        Self {
            link: entry.url.clone().unwrap_or_default(),
            name: entry
                .name
                .as_ref()
                .and_then(|n| n.text.clone())
                .unwrap_or_default(),
            event_date: entry
                .start
                .as_ref()
                .and_then(|s| s.local.as_deref())
                .map(display_event_date)
                .unwrap_or_default(),
            summary: entry.summary.clone(),
            created_at: fetched_at,
            location_id,
        }
    }
}

/// Event start times arrive as local ISO timestamps ("2020-01-15T19:00:00").
/// Unparseable values pass through untouched rather than failing the batch.
fn display_event_date(local: &str) -> String {
    NaiveDateTime::parse_from_str(local, "%Y-%m-%dT%H:%M:%S")
        .map(|dt| dt.format("%a %b %d %Y").to_string())
        .unwrap_or_else(|_| local.to_string())
}

impl From<events::Model> for Event {
    fn from(m: events::Model) -> Self {
        Self {
            link: m.link,
            name: m.name,
            event_date: m.event_date,
            summary: m.summary,
            created_at: m.created_at,
            location_id: m.location_id,
        }
    }
}
