use std::sync::Arc;

use axum::{Json, extract::State};
use saferoute_core::bbox::BBox;
use serde::Deserialize;
use serde_json::Value;

use crate::{error::ApiError, extract::QueryParams, state::AppState};

#[derive(Deserialize)]
pub struct IncidentsQuery {
    /// `minLon,minLat,maxLon,maxLat`
    bbox: Option<String>,
}

pub async fn incidents_handler(
    State(state): State<Arc<AppState>>,
    QueryParams(query): QueryParams<IncidentsQuery>,
) -> Result<Json<Value>, ApiError> {
    let bbox = query
        .bbox
        .ok_or_else(|| ApiError::BadRequest("bbox is required".to_string()))?
        .parse::<BBox>()
        .map_err(|error| ApiError::BadRequest(format!("Invalid bbox: {}", error)))?;

    let incidents = state.incidents.incident_details(&bbox.to_string()).await?;

    Ok(Json(incidents))
}
