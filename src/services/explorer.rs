//! Cache-aside orchestration over the record store and the provider clients.
//!
//! Every lookup follows the same shape: check the store, apply the freshness
//! policy, and either return the stored batch or evict, call the provider
//! once, normalize, persist, and return. A per-key guard collapses concurrent
//! refetches of the same key into a single provider call.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, warn};

use super::freshness::{self, Category, Freshness};
use crate::clients::eventbrite::EventbriteClient;
use crate::clients::geocode::GeocodeClient;
use crate::clients::tmdb::TmdbClient;
use crate::clients::weather::WeatherClient;
use crate::clients::yelp::YelpClient;
use crate::db::Store;
use crate::models::{Business, Event, Location, Movie, WeatherDay};

#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("storage error: {0}")]
    Store(String),

    #[error("{provider} provider failure: {message}")]
    Upstream {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} returned no data")]
    NoData { provider: &'static str },

    #[error("invalid {provider} payload: {message}")]
    Validation {
        provider: &'static str,
        message: String,
    },
}

impl ExplorerError {
    fn store(err: anyhow::Error) -> Self {
        Self::Store(format!("{err:#}"))
    }

    fn upstream(provider: &'static str, err: anyhow::Error) -> Self {
        Self::Upstream {
            provider,
            message: format!("{err:#}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum FlightKey {
    Location(String),
    Rows(Category, i32),
}

/// Keyed async mutex: one refetch in flight per cache key. Waiters re-check
/// the store after acquiring the key lock, so a stale/miss window produces
/// exactly one provider call and one insert batch.
#[derive(Default)]
struct FlightTable {
    inner: Mutex<HashMap<FlightKey, Arc<Mutex<()>>>>,
}

impl FlightTable {
    async fn acquire(&self, key: FlightKey) -> OwnedMutexGuard<()> {
        let slot = {
            let mut map = self.inner.lock().await;
            map.entry(key).or_insert_with(Default::default).clone()
        };
        slot.lock_owned().await
    }
}

pub struct ExplorerService {
    store: Store,
    geocode: GeocodeClient,
    weather: WeatherClient,
    events: EventbriteClient,
    movies: TmdbClient,
    yelp: YelpClient,
    flights: FlightTable,
}

impl ExplorerService {
    #[must_use]
    pub fn new(
        store: Store,
        geocode: GeocodeClient,
        weather: WeatherClient,
        events: EventbriteClient,
        movies: TmdbClient,
        yelp: YelpClient,
    ) -> Self {
        Self {
            store,
            geocode,
            weather,
            events,
            movies,
            yelp,
            flights: FlightTable::default(),
        }
    }

    /// Resolve-or-create a location by search text. Stored locations are
    /// always fresh; resolving the same text twice returns the same id.
    pub async fn location(&self, query: &str) -> Result<Location, ExplorerError> {
        let _guard = self
            .flights
            .acquire(FlightKey::Location(query.to_string()))
            .await;

        match self.store.location_by_query(query).await {
            Ok(Some(found)) => {
                debug!("Location '{}' served from store", query);
                return Ok(found);
            }
            Ok(None) => {}
            Err(e) => warn!("Location read failed, treating as miss: {e:#}"),
        }

        let results = self
            .geocode
            .search(query)
            .await
            .map_err(|e| ExplorerError::upstream("geocoding", e))?;

        let Some(first) = results.first() else {
            return Err(ExplorerError::NoData {
                provider: "geocoding",
            });
        };

        let mut location = Location::from_geocode(query, first).ok_or_else(|| {
            ExplorerError::Validation {
                provider: "geocoding",
                message: "result carries no coordinates".to_string(),
            }
        })?;

        let id = self
            .store
            .insert_location(&location)
            .await
            .map_err(ExplorerError::store)?;
        location.id = Some(id);

        info!("Resolved '{}' to location {}", query, id);
        Ok(location)
    }

    pub async fn weather(
        &self,
        location_id: i32,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<WeatherDay>, ExplorerError> {
        let _guard = self
            .flights
            .acquire(FlightKey::Rows(Category::Weather, location_id))
            .await;

        let stored = miss_on_error(
            self.store.weather_for_location(location_id).await,
            Category::Weather,
            location_id,
        );
        let first_created_at = stored.first().map(|r| r.created_at);
        if let Some(rows) = self
            .apply_policy(Category::Weather, location_id, stored, first_created_at)
            .await?
        {
            return Ok(rows);
        }

        let payload = self
            .weather
            .daily_forecast(latitude, longitude)
            .await
            .map_err(|e| ExplorerError::upstream("weather", e))?;
        if payload.is_empty() {
            return Err(ExplorerError::NoData {
                provider: "weather",
            });
        }

        let fetched_at = now_ms();
        let rows: Vec<WeatherDay> = payload
            .iter()
            .map(|d| WeatherDay::from_daily(d, fetched_at, location_id))
            .collect();

        self.store
            .insert_weather(&rows)
            .await
            .map_err(ExplorerError::store)?;

        info!(
            "Stored {} weather rows for location {}",
            rows.len(),
            location_id
        );
        Ok(rows)
    }

    pub async fn events(
        &self,
        location_id: i32,
        formatted_query: &str,
    ) -> Result<Vec<Event>, ExplorerError> {
        let _guard = self
            .flights
            .acquire(FlightKey::Rows(Category::Event, location_id))
            .await;

        let stored = miss_on_error(
            self.store.events_for_location(location_id).await,
            Category::Event,
            location_id,
        );
        let first_created_at = stored.first().map(|r| r.created_at);
        if let Some(rows) = self
            .apply_policy(Category::Event, location_id, stored, first_created_at)
            .await?
        {
            return Ok(rows);
        }

        let payload = self
            .events
            .search(formatted_query)
            .await
            .map_err(|e| ExplorerError::upstream("events", e))?;
        if payload.is_empty() {
            return Err(ExplorerError::NoData { provider: "events" });
        }

        let fetched_at = now_ms();
        let rows: Vec<Event> = payload
            .iter()
            .map(|e| Event::from_entry(e, fetched_at, location_id))
            .collect();

        self.store
            .insert_events(&rows)
            .await
            .map_err(ExplorerError::store)?;

        info!(
            "Stored {} event rows for location {}",
            rows.len(),
            location_id
        );
        Ok(rows)
    }

    pub async fn movies(
        &self,
        location_id: i32,
        search_query: &str,
    ) -> Result<Vec<Movie>, ExplorerError> {
        let _guard = self
            .flights
            .acquire(FlightKey::Rows(Category::Movie, location_id))
            .await;

        let stored = miss_on_error(
            self.store.movies_for_location(location_id).await,
            Category::Movie,
            location_id,
        );
        let first_created_at = stored.first().map(|r| r.created_at);
        if let Some(rows) = self
            .apply_policy(Category::Movie, location_id, stored, first_created_at)
            .await?
        {
            return Ok(rows);
        }

        let payload = self
            .movies
            .search(search_query)
            .await
            .map_err(|e| ExplorerError::upstream("movies", e))?;
        if payload.is_empty() {
            return Err(ExplorerError::NoData { provider: "movies" });
        }

        let fetched_at = now_ms();
        let rows: Vec<Movie> = payload
            .iter()
            .map(|m| Movie::from_entry(m, fetched_at, location_id))
            .collect();

        self.store
            .insert_movies(&rows)
            .await
            .map_err(ExplorerError::store)?;

        info!(
            "Stored {} movie rows for location {}",
            rows.len(),
            location_id
        );
        Ok(rows)
    }

    pub async fn businesses(
        &self,
        location_id: i32,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<Business>, ExplorerError> {
        let _guard = self
            .flights
            .acquire(FlightKey::Rows(Category::Business, location_id))
            .await;

        let stored = miss_on_error(
            self.store.businesses_for_location(location_id).await,
            Category::Business,
            location_id,
        );
        let first_created_at = stored.first().map(|r| r.created_at);
        if let Some(rows) = self
            .apply_policy(Category::Business, location_id, stored, first_created_at)
            .await?
        {
            return Ok(rows);
        }

        let payload = self
            .yelp
            .search(latitude, longitude)
            .await
            .map_err(|e| ExplorerError::upstream("businesses", e))?;
        if payload.is_empty() {
            return Err(ExplorerError::NoData {
                provider: "businesses",
            });
        }

        let fetched_at = now_ms();
        let rows: Vec<Business> = payload
            .iter()
            .map(|b| Business::from_entry(b, fetched_at, location_id))
            .collect();

        self.store
            .insert_businesses(&rows)
            .await
            .map_err(ExplorerError::store)?;

        info!(
            "Stored {} business rows for location {}",
            rows.len(),
            location_id
        );
        Ok(rows)
    }

    /// Apply the freshness policy to a stored batch. Fresh batches come back
    /// verbatim; stale ones are evicted in bulk and never returned, even
    /// while the delete is in flight.
    async fn apply_policy<T>(
        &self,
        category: Category,
        location_id: i32,
        rows: Vec<T>,
        first_created_at: Option<i64>,
    ) -> Result<Option<Vec<T>>, ExplorerError> {
        match freshness::evaluate(category, first_created_at, now_ms()) {
            Freshness::Fresh => {
                debug!(
                    "{} for location {} served from store",
                    category.name(),
                    location_id
                );
                Ok(Some(rows))
            }
            Freshness::Stale => {
                let removed = self
                    .evict(category, location_id)
                    .await
                    .map_err(ExplorerError::store)?;
                info!(
                    "Evicted {} stale {} rows for location {}",
                    removed,
                    category.name(),
                    location_id
                );
                Ok(None)
            }
            Freshness::Empty => Ok(None),
        }
    }

    async fn evict(&self, category: Category, location_id: i32) -> anyhow::Result<u64> {
        match category {
            Category::Weather => self.store.evict_weather(location_id).await,
            Category::Event => self.store.evict_events(location_id).await,
            Category::Movie => self.store.evict_movies(location_id).await,
            Category::Business => self.store.evict_businesses(location_id).await,
        }
    }
}

/// A failed store read degrades to a cache miss; the provider path still runs.
fn miss_on_error<T>(
    result: anyhow::Result<Vec<T>>,
    category: Category,
    location_id: i32,
) -> Vec<T> {
    result.unwrap_or_else(|e| {
        warn!(
            "{} read failed for location {}, treating as miss: {e:#}",
            category.name(),
            location_id
        );
        Vec::new()
    })
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}
