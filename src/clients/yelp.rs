use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.yelp.com/v3";

#[derive(Debug, Deserialize)]
struct BusinessSearchResponse {
    #[serde(default)]
    businesses: Vec<BusinessEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BusinessEntry {
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<String>,
    pub rating: Option<f64>,
    pub url: Option<String>,
}

#[derive(Clone)]
pub struct YelpClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl YelpClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub async fn search(&self, latitude: f64, longitude: f64) -> Result<Vec<BusinessEntry>> {
        let url = format!(
            "{}/businesses/search?latitude={}&longitude={}",
            self.base_url, latitude, longitude
        );
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Businesses API error: {} - {}",
                status,
                body
            ));
        }

        let response: BusinessSearchResponse = response.json().await?;

        Ok(response.businesses)
    }
}
