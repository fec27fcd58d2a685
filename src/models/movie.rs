use serde::{Deserialize, Serialize};

use crate::clients::tmdb::{MovieEntry, POSTER_BASE_URL};
use crate::entities::movies;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub overview: String,
    pub average_votes: f64,
    pub total_votes: i32,
    pub image_url: Option<String>,
    pub popularity: f64,
    pub released_on: Option<String>,
    pub created_at: i64,
    pub location_id: i32,
}

impl Movie {
    pub fn from_entry(entry: &MovieEntry, fetched_at: i64, location_id: i32) -> Self {
        Self {
            title: entry.original_title.clone().unwrap_or_default(),
            overview: entry.overview.clone().unwrap_or_default(),
            average_votes: entry.vote_average.unwrap_or_default(),
            total_votes: entry.vote_count.unwrap_or_default(),
            image_url: entry
                .poster_path
                .as_ref()
                .map(|p| format!("{POSTER_BASE_URL}{p}")),
            popularity: entry.popularity.unwrap_or_default(),
            released_on: entry.release_date.clone(),
            created_at: fetched_at,
            location_id,
        }
    }
}

impl From<movies::Model> for Movie {
    fn from(m: movies::Model) -> Self {
        Self {
            title: m.title,
            overview: m.overview,
            average_votes: m.average_votes,
            total_votes: m.total_votes,
            image_url: m.image_url,
            popularity: m.popularity,
            released_on: m.released_on,
            created_at: m.created_at,
            location_id: m.location_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_movie_entry() {
        let entry = MovieEntry {
            original_title: Some("X".to_string()),
            overview: Some("A film.".to_string()),
            vote_average: Some(7.2),
            vote_count: Some(100),
            poster_path: Some("/a.jpg".to_string()),
            popularity: Some(12.3),
            release_date: Some("2020-01-01".to_string()),
        };

        let movie = Movie::from_entry(&entry, 5, 2);
        assert_eq!(movie.title, "X");
        assert_eq!(movie.overview, "A film.");
        assert_eq!(movie.average_votes, 7.2);
        assert_eq!(movie.total_votes, 100);
        assert_eq!(
            movie.image_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/a.jpg")
        );
        assert_eq!(movie.popularity, 12.3);
        assert_eq!(movie.released_on.as_deref(), Some("2020-01-01"));
        assert_eq!(movie.location_id, 2);
    }

    #[test]
    fn missing_poster_stays_null() {
        let entry = MovieEntry {
            original_title: Some("Y".to_string()),
            overview: None,
            vote_average: None,
            vote_count: None,
            poster_path: None,
            popularity: None,
            release_date: None,
        };

        let movie = Movie::from_entry(&entry, 0, 1);
        assert_eq!(movie.image_url, None);
        assert_eq!(movie.overview, "");
        assert_eq!(movie.total_votes, 0);
        assert_eq!(movie.released_on, None);
    }
}
