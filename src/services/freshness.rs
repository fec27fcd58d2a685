//! Per-category freshness policy.
//!
//! A stored batch shares one fetch time, so age is derived from the first row
//! only and the whole batch co-expires. Location rows are not TTL-gated and
//! never pass through here.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Weather,
    Event,
    Movie,
    Business,
}

impl Category {
    #[must_use]
    pub const fn ttl(self) -> Duration {
        match self {
            // Deliberately short demo window.
            Self::Weather => Duration::from_secs(15),
            Self::Event => Duration::from_secs(6 * 60 * 60),
            Self::Business => Duration::from_secs(24 * 60 * 60),
            Self::Movie => Duration::from_secs(30 * 24 * 60 * 60),
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Weather => "weather",
            Self::Event => "event",
            Self::Movie => "movie",
            Self::Business => "business",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Fresh,
    Stale,
    Empty,
}

/// Classify a stored batch by the age of its first row, in epoch milliseconds.
#[must_use]
pub fn evaluate(category: Category, first_created_at: Option<i64>, now_ms: i64) -> Freshness {
    let Some(created_at) = first_created_at else {
        return Freshness::Empty;
    };

    let age_ms = now_ms.saturating_sub(created_at);
    if age_ms > category.ttl().as_millis() as i64 {
        Freshness::Stale
    } else {
        Freshness::Fresh
    }
}
