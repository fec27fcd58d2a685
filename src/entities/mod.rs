pub mod prelude;

pub mod businesses;
pub mod events;
pub mod locations;
pub mod movies;
pub mod weather_reports;
