pub mod business;
pub mod event;
pub mod location;
pub mod movie;
pub mod weather;

pub use business::Business;
pub use event::Event;
pub use location::Location;
pub use movie::Movie;
pub use weather::WeatherDay;

/// Display form shared by the date-bearing records, e.g. "Wed Jan 01 2020".
pub(crate) fn display_date(dt: chrono::DateTime<chrono::Utc>) -> String {
    dt.format("%a %b %d %Y").to_string()
}
