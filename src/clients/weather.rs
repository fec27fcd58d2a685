use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.darksky.net/forecast";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Option<Daily>,
}

#[derive(Debug, Deserialize)]
struct Daily {
    #[serde(default)]
    data: Vec<DailyForecast>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyForecast {
    pub summary: Option<String>,
    /// Unix seconds for the forecast day.
    pub time: i64,
}

#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub async fn daily_forecast(&self, latitude: f64, longitude: f64) -> Result<Vec<DailyForecast>> {
        let url = format!(
            "{}/{}/{},{}",
            self.base_url, self.api_key, latitude, longitude
        );
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Forecast API error: {} - {}", status, body));
        }

        let response: ForecastResponse = response.json().await?;

        Ok(response.daily.map(|d| d.data).unwrap_or_default())
    }
}
