use serde::{Deserialize, Serialize};

use crate::clients::geocode::GeocodeResult;
use crate::entities::locations;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Generated at insert; attached before the record is returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub search_query: String,
    pub formatted_query: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// Returns `None` when the result carries no coordinates. A geocoding hit
    /// without coordinates is a provider-contract violation, not a missing
    /// optional field.
    pub fn from_geocode(search_query: &str, result: &GeocodeResult) -> Option<Self> {
        let coords = result.geometry.as_ref()?.location.as_ref()?;

        Some(Self {
            id: None,
            search_query: search_query.to_string(),
            formatted_query: result.formatted_address.clone().unwrap_or_default(),
            latitude: coords.lat,
            longitude: coords.lng,
        })
    }
}

impl From<locations::Model> for Location {
    fn from(m: locations::Model) -> Self {
        Self {
            id: Some(m.id),
            search_query: m.search_query,
            formatted_query: m.formatted_query,
            latitude: m.latitude,
            longitude: m.longitude,
        }
    }
}
