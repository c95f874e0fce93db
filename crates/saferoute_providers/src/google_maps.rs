use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::{ProviderParams, error::ProviderError, handle_response};

pub const GOOGLE_MAPS_BASE_URL: &str = "https://maps.googleapis.com";
const DIRECTIONS_PATH: &str = "/maps/api/directions/json";
const PLACES_TEXT_SEARCH_PATH: &str = "/maps/api/place/textsearch/json";
const PROVIDER: &str = "Google Maps";

#[derive(Debug, Clone, Deserialize)]
pub struct TextValue {
    pub text: String,
    pub value: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsLeg {
    pub distance: TextValue,
    pub duration: TextValue,
    #[serde(default)]
    pub duration_in_traffic: Option<TextValue>,
    #[serde(default)]
    pub steps: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OverviewPolyline {
    pub points: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsRoute {
    #[serde(default)]
    pub legs: Vec<DirectionsLeg>,
    pub overview_polyline: OverviewPolyline,
}

#[derive(Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

/// Every Google web service reports failures in a `status` field next to a 200.
/// `ZERO_RESULTS` is an empty answer, not a failure.
fn check_status(status: &str, error_message: Option<&str>) -> Result<(), ProviderError> {
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        other => Err(ProviderError::Status {
            provider: PROVIDER,
            status: other.to_string(),
            message: error_message.unwrap_or_default().to_string(),
        }),
    }
}

#[derive(Clone)]
pub struct GoogleMapsClient {
    params: ProviderParams,
    client: reqwest::Client,
}

impl GoogleMapsClient {
    pub fn new(params: ProviderParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    /// Driving directions departing now, with alternatives and best-guess traffic.
    pub async fn directions(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Vec<DirectionsRoute>, ProviderError> {
        let api_key = self.params.api_key(PROVIDER)?;

        let response = self
            .client
            .get(self.params.url(DIRECTIONS_PATH))
            .query(&[
                ("origin", origin),
                ("destination", destination),
                ("alternatives", "true"),
                ("mode", "driving"),
                ("departure_time", "now"),
                ("traffic_model", "best_guess"),
                ("key", api_key),
            ])
            .timeout(self.params.timeout)
            .send()
            .await?;

        let body: DirectionsResponse = handle_response(response).await?;
        check_status(&body.status, body.error_message.as_deref())?;

        debug!(
            "GoogleMaps: {} route(s) from {:?} to {:?}",
            body.routes.len(),
            origin,
            destination
        );

        Ok(body.routes)
    }

    /// Places text search, returned untouched.
    pub async fn search_places(&self, query: &str) -> Result<Value, ProviderError> {
        let api_key = self.params.api_key(PROVIDER)?;

        let response = self
            .client
            .get(self.params.url(PLACES_TEXT_SEARCH_PATH))
            .query(&[("query", query), ("key", api_key)])
            .timeout(self.params.timeout)
            .send()
            .await?;

        let body: Value = handle_response(response).await?;
        let status = body.get("status").and_then(Value::as_str).unwrap_or("OK");
        check_status(
            status,
            body.get("error_message").and_then(Value::as_str),
        )?;

        Ok(body)
    }
}
