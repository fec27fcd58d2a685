use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://www.eventbriteapi.com/v3";

#[derive(Debug, Deserialize)]
struct EventSearchResponse {
    #[serde(default)]
    events: Vec<EventEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventEntry {
    pub url: Option<String>,
    pub name: Option<EventName>,
    pub start: Option<EventStart>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventName {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventStart {
    pub local: Option<String>,
}

#[derive(Clone)]
pub struct EventbriteClient {
    client: Client,
    base_url: String,
    token: String,
}

impl EventbriteClient {
    pub fn new(client: Client, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    pub async fn search(&self, address: &str) -> Result<Vec<EventEntry>> {
        let url = format!(
            "{}/events/search?token={}&location.address={}",
            self.base_url,
            self.token,
            urlencoding::encode(address)
        );
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Events API error: {} - {}", status, body));
        }

        let response: EventSearchResponse = response.json().await?;

        Ok(response.events)
    }
}
