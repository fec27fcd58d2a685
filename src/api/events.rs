use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::models::Event;

#[derive(Deserialize)]
pub struct EventsQuery {
    pub id: i32,
    /// Formatted address of the resolved location, used as the search area.
    pub formatted_query: String,
}

pub async fn get_events(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let events = state
        .explorer()
        .events(query.id, &query.formatted_query)
        .await?;
    Ok(Json(events))
}
