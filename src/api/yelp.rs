use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::models::Business;

#[derive(Deserialize)]
pub struct BusinessQuery {
    pub id: i32,
    pub latitude: f64,
    pub longitude: f64,
}

pub async fn get_businesses(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BusinessQuery>,
) -> Result<Json<Vec<Business>>, ApiError> {
    let businesses = state
        .explorer()
        .businesses(query.id, query.latitude, query.longitude)
        .await?;
    Ok(Json(businesses))
}
