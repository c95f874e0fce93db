use std::sync::Arc;

use axum::{Json, extract::State};
use saferoute_core::{congestion::CongestionLevel, route_leg::RouteLeg};
use saferoute_providers::google_maps::DirectionsRoute;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::{error::ApiError, extract::JsonBody, state::AppState};

#[derive(Deserialize)]
pub struct DirectionsRequestBody {
    origin: String,
    destination: String,
}

#[derive(Serialize)]
pub struct RouteSummary {
    distance: String,
    duration: String,
    duration_in_traffic: String,
    steps: Vec<Value>,
    polyline: String,
    congestion_level: CongestionLevel,
}

#[derive(Serialize)]
pub struct DirectionsResponse {
    routes: Vec<RouteSummary>,
}

/// First leg of a provider route. Routes are requested without waypoints so
/// the first leg covers the whole trip.
pub fn first_leg(route: DirectionsRoute) -> Option<RouteLeg> {
    let polyline = route.overview_polyline.points;
    let leg = route.legs.into_iter().next()?;

    Some(RouteLeg {
        normal_duration: leg.duration.value,
        traffic_duration: leg.duration_in_traffic.as_ref().map(|traffic| traffic.value),
        distance_text: leg.distance.text,
        duration_text: leg.duration.text,
        traffic_duration_text: leg.duration_in_traffic.map(|traffic| traffic.text),
        steps: leg.steps,
        polyline,
    })
}

fn summarize(leg: RouteLeg) -> RouteSummary {
    let congestion_level = leg.congestion_level().unwrap_or_else(|error| {
        warn!("{}, reporting low congestion", error);
        CongestionLevel::Low
    });

    RouteSummary {
        distance: leg.distance_text,
        duration: leg.duration_text,
        duration_in_traffic: leg
            .traffic_duration_text
            .unwrap_or_else(|| "N/A".to_string()),
        steps: leg.steps,
        polyline: leg.polyline,
        congestion_level,
    }
}

pub async fn directions_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<DirectionsRequestBody>,
) -> Result<Json<DirectionsResponse>, ApiError> {
    let routes = state.maps.directions(&body.origin, &body.destination).await?;

    let routes: Vec<RouteSummary> = routes
        .into_iter()
        .filter_map(first_leg)
        .map(summarize)
        .collect();

    info!(
        "Found {} route(s) from {:?} to {:?}",
        routes.len(),
        body.origin,
        body.destination
    );

    Ok(Json(DirectionsResponse { routes }))
}
