use serde::{Deserialize, Serialize};

use crate::clients::yelp::BusinessEntry;
use crate::entities::businesses;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub name: String,
    pub image_url: Option<String>,
    pub price: Option<String>,
    pub rating: Option<f64>,
    pub url: String,
    pub created_at: i64,
    pub location_id: i32,
}

impl Business {
    pub fn from_entry(entry: &BusinessEntry, fetched_at: i64, location_id: i32) -> Self {
        Self {
            name: entry.name.clone().unwrap_or_default(),
            image_url: entry.image_url.clone(),
            price: entry.price.clone(),
            rating: entry.rating,
            url: entry.url.clone().unwrap_or_default(),
            created_at: fetched_at,
            location_id,
        }
    }
}

impl From<businesses::Model> for Business {
    fn from(m: businesses::Model) -> Self {
        Self {
            name: m.name,
            image_url: m.image_url,
            price: m.price,
            rating: m.rating,
            url: m.url,
            created_at: m.created_at,
            location_id: m.location_id,
        }
    }
}
