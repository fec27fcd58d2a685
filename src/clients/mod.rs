pub mod eventbrite;
pub mod geocode;
pub mod tmdb;
pub mod weather;
pub mod yelp;
