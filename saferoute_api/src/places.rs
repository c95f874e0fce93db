use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::Value;

use crate::{error::ApiError, extract::QueryParams, state::AppState};

#[derive(Deserialize)]
pub struct PlacesQuery {
    query: Option<String>,
}

pub async fn search_places_handler(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<PlacesQuery>,
) -> Result<Json<Value>, ApiError> {
    let query = params
        .query
        .filter(|query| !query.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("query is required".to_string()))?;

    let places = state.maps.search_places(&query).await?;

    Ok(Json(places))
}
