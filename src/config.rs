use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::clients;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,

    pub database: DatabaseConfig,

    pub providers: ProvidersConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,

    pub port: u16,

    pub cors_allowed_origins: Vec<String>,

    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_allowed_origins: vec!["*".to_string()],
            log_level: "info,sqlx=warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,

    pub max_connections: u32,

    pub min_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:cityscout.db".to_string(),
            max_connections: 5,
            min_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Outbound timeout shared by every provider call. A hung upstream fails
    /// the request instead of holding it open.
    pub request_timeout_seconds: u64,

    pub geocode: ProviderConfig,

    pub weather: ProviderConfig,

    pub events: ProviderConfig,

    pub movies: ProviderConfig,

    pub yelp: ProviderConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: 10,
            geocode: ProviderConfig::with_base_url(clients::geocode::DEFAULT_BASE_URL),
            weather: ProviderConfig::with_base_url(clients::weather::DEFAULT_BASE_URL),
            events: ProviderConfig::with_base_url(clients::eventbrite::DEFAULT_BASE_URL),
            movies: ProviderConfig::with_base_url(clients::tmdb::DEFAULT_BASE_URL),
            yelp: ProviderConfig::with_base_url(clients::yelp::DEFAULT_BASE_URL),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub api_key: String,

    pub base_url: String,
}

impl ProviderConfig {
    fn with_base_url(base_url: &str) -> Self {
        Self {
            api_key: String::new(),
            base_url: base_url.to_string(),
        }
    }
}

impl Config {
    /// Load `config.toml` if present, then apply environment overrides
    /// (API keys and port come from the environment in deployment).
    pub fn load() -> Result<Self> {
        let path = Path::new("config.toml");

        let mut config = if path.exists() {
            info!("Loading config from: {}", path.display());
            Self::load_from_path(path)?
        } else {
            info!("No config file found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(port) = std::env::var("PORT")
            && let Ok(port) = port.parse()
        {
            self.server.port = port;
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.database.url = url;
        }

        for (var, target) in [
            ("GEOCODE_API_KEY", &mut self.providers.geocode),
            ("WEATHER_API_KEY", &mut self.providers.weather),
            ("EVENTBRITE_API_KEY", &mut self.providers.events),
            ("MOVIE_API_KEY", &mut self.providers.movies),
            ("YELP_API_KEY", &mut self.providers.yelp),
        ] {
            if let Ok(key) = std::env::var(var) {
                target.api_key = key;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.database.max_connections < self.database.min_connections {
            anyhow::bail!(
                "database.max_connections ({}) must be >= min_connections ({})",
                self.database.max_connections,
                self.database.min_connections
            );
        }
        if self.providers.request_timeout_seconds == 0 {
            anyhow::bail!("providers.request_timeout_seconds must be > 0");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 3000);
        assert!(config.database.url.starts_with("sqlite:"));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 8080

            [providers.geocode]
            api_key = "abc"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.providers.geocode.api_key, "abc");
        assert_eq!(
            config.providers.weather.base_url,
            clients::weather::DEFAULT_BASE_URL
        );
        assert_eq!(config.database.max_connections, 5);
    }
}
