use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::models::WeatherDay;

#[derive(Deserialize)]
pub struct WeatherQuery {
    /// Location id from a prior `/location` resolution.
    pub id: i32,
    pub latitude: f64,
    pub longitude: f64,
}

pub async fn get_weather(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<Vec<WeatherDay>>, ApiError> {
    let days = state
        .explorer()
        .weather(query.id, query.latitude, query.longitude)
        .await?;
    Ok(Json(days))
}
