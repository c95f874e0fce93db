use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::Value;

use crate::{error::ApiError, extract::QueryParams, state::AppState};

const DEFAULT_RADIUS_KM: u32 = 10;

#[derive(Deserialize)]
pub struct EventsQuery {
    lat: Option<f64>,
    lon: Option<f64>,
    radius: Option<u32>,
}

pub async fn events_handler(
    State(state): State<Arc<AppState>>,
    QueryParams(query): QueryParams<EventsQuery>,
) -> Result<Json<Value>, ApiError> {
    let (Some(lat), Some(lon)) = (query.lat, query.lon) else {
        return Err(ApiError::BadRequest("lat and lon are required".to_string()));
    };

    let events = state
        .events
        .events_near(lat, lon, query.radius.unwrap_or(DEFAULT_RADIUS_KM))
        .await?;

    Ok(Json(events))
}
