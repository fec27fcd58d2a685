use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::clients::weather::DailyForecast;
use crate::entities::weather_reports;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherDay {
    pub forecast: String,
    pub time: String,
    pub created_at: i64,
    pub location_id: i32,
}

impl WeatherDay {
    pub fn from_daily(day: &DailyForecast, fetched_at: i64, location_id: i32) -> Self {
        let time = DateTime::from_timestamp(day.time, 0)
            .map(super::display_date)
            .unwrap_or_default();

        Self {
            forecast: day.summary.clone().unwrap_or_default(),
            time,
            created_at: fetched_at,
            location_id,
        }
    }
}

impl From<weather_reports::Model> for WeatherDay {
    fn from(m: weather_reports::Model) -> Self {
        Self {
            forecast: m.forecast,
            time: m.time,
            created_at: m.created_at,
            location_id: m.location_id,
        }
    }
}
