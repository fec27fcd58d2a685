use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::models::Location;

#[derive(Deserialize)]
pub struct LocationQuery {
    /// Free-text place search, e.g. `?data=seattle`.
    pub data: String,
}

pub async fn resolve_location(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<Location>, ApiError> {
    let search = query.data.trim();
    if search.is_empty() {
        return Err(ApiError::BadRequest("missing search text".to_string()));
    }

    let location = state.explorer().location(search).await?;
    Ok(Json(location))
}
