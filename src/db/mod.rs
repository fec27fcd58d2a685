use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::models::{Business, Event, Location, Movie, WeatherDay};

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.starts_with(":memory:") && !db_url.contains("memory") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn location_repo(&self) -> repositories::location::LocationRepository {
        repositories::location::LocationRepository::new(self.conn.clone())
    }

    fn weather_repo(&self) -> repositories::weather::WeatherRepository {
        repositories::weather::WeatherRepository::new(self.conn.clone())
    }

    fn event_repo(&self) -> repositories::event::EventRepository {
        repositories::event::EventRepository::new(self.conn.clone())
    }

    fn movie_repo(&self) -> repositories::movie::MovieRepository {
        repositories::movie::MovieRepository::new(self.conn.clone())
    }

    fn business_repo(&self) -> repositories::business::BusinessRepository {
        repositories::business::BusinessRepository::new(self.conn.clone())
    }

    pub async fn location_by_query(&self, search_query: &str) -> Result<Option<Location>> {
        self.location_repo().find_by_query(search_query).await
    }

    pub async fn insert_location(&self, location: &Location) -> Result<i32> {
        self.location_repo().insert(location).await
    }

    pub async fn weather_for_location(&self, location_id: i32) -> Result<Vec<WeatherDay>> {
        self.weather_repo().for_location(location_id).await
    }

    pub async fn insert_weather(&self, days: &[WeatherDay]) -> Result<()> {
        self.weather_repo().insert_many(days).await
    }

    pub async fn evict_weather(&self, location_id: i32) -> Result<u64> {
        self.weather_repo().evict(location_id).await
    }

    pub async fn events_for_location(&self, location_id: i32) -> Result<Vec<Event>> {
        self.event_repo().for_location(location_id).await
    }

    pub async fn insert_events(&self, entries: &[Event]) -> Result<()> {
        self.event_repo().insert_many(entries).await
    }

    pub async fn evict_events(&self, location_id: i32) -> Result<u64> {
        self.event_repo().evict(location_id).await
    }

    pub async fn movies_for_location(&self, location_id: i32) -> Result<Vec<Movie>> {
        self.movie_repo().for_location(location_id).await
    }

    pub async fn insert_movies(&self, entries: &[Movie]) -> Result<()> {
        self.movie_repo().insert_many(entries).await
    }

    pub async fn evict_movies(&self, location_id: i32) -> Result<u64> {
        self.movie_repo().evict(location_id).await
    }

    pub async fn businesses_for_location(&self, location_id: i32) -> Result<Vec<Business>> {
        self.business_repo().for_location(location_id).await
    }

    pub async fn insert_businesses(&self, entries: &[Business]) -> Result<()> {
        self.business_repo().insert_many(entries).await
    }

    pub async fn evict_businesses(&self, location_id: i32) -> Result<u64> {
        self.business_repo().evict(location_id).await
    }
}
