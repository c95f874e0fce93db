use std::sync::Arc;

use axum::{Json, extract::State};
use saferoute_core::{
    analysis::{ConditionsSource, LookupError, RouteCondition, analyze_route},
    bbox::BBox,
    congestion::CongestionLevel,
    encoded_polyline::decode_route_polyline,
    geopoint::GeoPoint,
};
use saferoute_providers::{
    error::ProviderError, openweather::OpenWeatherClient, ticketmaster::TicketmasterClient,
    tomtom::TomTomClient,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::{error::ApiError, extract::JsonBody, state::AppState};

const EVENTS_RADIUS_KM: u32 = 5;

#[derive(Deserialize)]
pub struct AnalyzedRoute {
    polyline: String,
    #[serde(default)]
    congestion_level: CongestionLevel,
}

#[derive(Deserialize)]
pub struct RouteAnalysisRequestBody {
    route: AnalyzedRoute,
}

#[derive(Serialize)]
pub struct RouteAnalysisResponse {
    conditions: Vec<RouteCondition>,
}

/// Provider clients bound to the short per-lookup timeout.
struct ProviderConditions {
    weather: OpenWeatherClient,
    events: TicketmasterClient,
    incidents: TomTomClient,
}

impl ProviderConditions {
    fn new(state: &AppState) -> Self {
        ProviderConditions {
            weather: state.weather.with_timeout(state.lookup_timeout),
            events: state.events.with_timeout(state.lookup_timeout),
            incidents: state.incidents.with_timeout(state.lookup_timeout),
        }
    }
}

/// Transport failures abort the point, a provider answering with an error
/// or lacking its key contributes an empty document.
fn lookup_result(
    provider: &'static str,
    result: Result<Value, ProviderError>,
) -> Result<Value, LookupError> {
    match result {
        Ok(document) => Ok(document),
        Err(error) if error.is_transport() => Err(LookupError {
            provider,
            message: error.to_string(),
        }),
        Err(error @ ProviderError::MissingApiKey(_)) => {
            warn!("{} lookup skipped, falling back to defaults: {}", provider, error);
            Ok(Value::Object(Map::new()))
        }
        Err(error) => {
            debug!("{} lookup answered with an error: {}", provider, error);
            Ok(Value::Object(Map::new()))
        }
    }
}

impl ConditionsSource for ProviderConditions {
    async fn weather(&self, point: GeoPoint) -> Result<Value, LookupError> {
        lookup_result(
            "weather",
            self.weather.current_weather(point.lat, point.lng).await,
        )
    }

    async fn events(&self, point: GeoPoint) -> Result<Value, LookupError> {
        lookup_result(
            "events",
            self.events
                .events_near(point.lat, point.lng, EVENTS_RADIUS_KM)
                .await,
        )
    }

    async fn incidents(&self, bbox: BBox) -> Result<Value, LookupError> {
        lookup_result(
            "incidents",
            self.incidents.incident_details(&bbox.to_string()).await,
        )
    }
}

pub async fn route_analysis_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<RouteAnalysisRequestBody>,
) -> Result<Json<RouteAnalysisResponse>, ApiError> {
    let points = decode_route_polyline(&body.route.polyline)
        .map_err(|error| ApiError::InternalServerError(error.to_string()))?;

    let source = ProviderConditions::new(&state);

    let conditions = tokio::time::timeout(
        state.analysis_timeout,
        analyze_route(&source, &points, body.route.congestion_level),
    )
    .await
    .map_err(|_| ApiError::InternalServerError("Route analysis timed out".to_string()))?;

    info!(
        "Analyzed route of {} points, {} conditions",
        points.len(),
        conditions.len()
    );

    Ok(Json(RouteAnalysisResponse { conditions }))
}
