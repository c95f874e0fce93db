use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::Value;

use crate::{error::ApiError, extract::QueryParams, state::AppState};

#[derive(Deserialize)]
pub struct WeatherQuery {
    lat: Option<f64>,
    lon: Option<f64>,
}

pub async fn weather_handler(
    State(state): State<Arc<AppState>>,
    QueryParams(query): QueryParams<WeatherQuery>,
) -> Result<Json<Value>, ApiError> {
    let (Some(lat), Some(lon)) = (query.lat, query.lon) else {
        return Err(ApiError::BadRequest("lat and lon are required".to_string()));
    };

    let weather = state.weather.current_weather(lat, lon).await?;

    Ok(Json(weather))
}
