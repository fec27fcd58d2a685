use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::models::Movie;

#[derive(Deserialize)]
pub struct MoviesQuery {
    pub id: i32,
    pub search_query: String,
}

pub async fn get_movies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MoviesQuery>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies = state
        .explorer()
        .movies(query.id, &query.search_query)
        .await?;
    Ok(Json(movies))
}
