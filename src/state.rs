use std::sync::Arc;

use crate::clients::eventbrite::EventbriteClient;
use crate::clients::geocode::GeocodeClient;
use crate::clients::tmdb::TmdbClient;
use crate::clients::weather::WeatherClient;
use crate::clients::yelp::YelpClient;
use crate::config::Config;
use crate::db::Store;
use crate::services::ExplorerService;

/// Build a shared HTTP client with reasonable defaults for API calls.
/// One client is reused across all provider adapters to enable connection
/// pooling and avoid socket exhaustion.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent("CityScout/1.0")
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub explorer: Arc<ExplorerService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.database.url,
            config.database.max_connections,
            config.database.min_connections,
        )
        .await?;

        let http_client = build_shared_http_client(config.providers.request_timeout_seconds)?;

        let providers = &config.providers;
        let explorer = Arc::new(ExplorerService::new(
            store.clone(),
            GeocodeClient::new(
                http_client.clone(),
                providers.geocode.base_url.clone(),
                providers.geocode.api_key.clone(),
            ),
            WeatherClient::new(
                http_client.clone(),
                providers.weather.base_url.clone(),
                providers.weather.api_key.clone(),
            ),
            EventbriteClient::new(
                http_client.clone(),
                providers.events.base_url.clone(),
                providers.events.api_key.clone(),
            ),
            TmdbClient::new(
                http_client.clone(),
                providers.movies.base_url.clone(),
                providers.movies.api_key.clone(),
            ),
            YelpClient::new(
                http_client,
                providers.yelp.base_url.clone(),
                providers.yelp.api_key.clone(),
            ),
        ));

        Ok(Self {
            config: Arc::new(config),
            store,
            explorer,
        })
    }
}
