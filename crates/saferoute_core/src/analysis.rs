use std::future::Future;

use futures::future::join_all;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    bbox::{BBox, INCIDENT_SEARCH_BUFFER_DEGREES},
    congestion::CongestionLevel,
    geopoint::GeoPoint,
    sampler::{MAX_SAMPLED_POINTS, sample_evenly},
};

/// A lookup that never produced an answer: connection failure, timeout or an
/// unreadable body. A provider answering with an error status is not a failure,
/// the source reports it as an empty document instead.
#[derive(Debug, Error)]
#[error("{provider} lookup failed: {message}")]
pub struct LookupError {
    pub provider: &'static str,
    pub message: String,
}

/// Per-point enrichment lookups. Each call returns the provider's raw JSON document.
pub trait ConditionsSource: Sync {
    fn weather(&self, point: GeoPoint) -> impl Future<Output = Result<Value, LookupError>> + Send;

    fn events(&self, point: GeoPoint) -> impl Future<Output = Result<Value, LookupError>> + Send;

    fn incidents(&self, bbox: BBox) -> impl Future<Output = Result<Value, LookupError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteCondition {
    pub location: GeoPoint,
    pub weather: String,
    pub temperature: f64,
    pub events: usize,
    pub incidents: Vec<Value>,
    pub congestion: CongestionLevel,
}

impl RouteCondition {
    fn from_documents(
        location: GeoPoint,
        weather: &Value,
        events: &Value,
        incidents: Value,
        congestion: CongestionLevel,
    ) -> Self {
        let summary = weather
            .pointer("/weather/0/main")
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
            .to_string();
        let temperature = weather
            .pointer("/main/temp")
            .and_then(Value::as_f64)
            .unwrap_or(0.0);
        let events = events
            .pointer("/_embedded/events")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        let incidents = match incidents {
            Value::Object(mut document) => match document.remove("incidents") {
                Some(Value::Array(incidents)) => incidents,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };

        RouteCondition {
            location,
            weather: summary,
            temperature,
            events,
            incidents,
            congestion,
        }
    }
}

async fn point_conditions<S>(
    source: &S,
    point: GeoPoint,
    congestion: CongestionLevel,
) -> Result<RouteCondition, LookupError>
where
    S: ConditionsSource,
{
    let (weather, events, incidents) = futures::join!(
        source.weather(point),
        source.events(point),
        source.incidents(BBox::around(point, INCIDENT_SEARCH_BUFFER_DEGREES)),
    );

    Ok(RouteCondition::from_documents(
        point,
        &weather?,
        &events?,
        incidents?,
        congestion,
    ))
}

/// Samples the route and enriches every sampled point concurrently. A point for
/// which any lookup failed is left out, the others keep their route order.
pub async fn analyze_route<S>(
    source: &S,
    points: &[GeoPoint],
    congestion: CongestionLevel,
) -> Vec<RouteCondition>
where
    S: ConditionsSource,
{
    let sampled = sample_evenly(points, MAX_SAMPLED_POINTS);
    debug!(
        "Analyzing {} of {} route points",
        sampled.len(),
        points.len()
    );

    let results = join_all(
        sampled
            .iter()
            .map(|&point| point_conditions(source, point, congestion)),
    )
    .await;

    results
        .into_iter()
        .zip(sampled)
        .filter_map(|(result, point)| match result {
            Ok(condition) => Some(condition),
            Err(error) => {
                warn!(
                    "Skipping point ({}, {}): {}",
                    point.lat, point.lng, error
                );
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::{Value, json};

    use super::{ConditionsSource, LookupError, RouteCondition, analyze_route};
    use crate::{bbox::BBox, congestion::CongestionLevel, geopoint::GeoPoint};

    #[derive(Default)]
    struct FakeSource {
        failing_event_latitudes: Vec<f64>,
        calls: AtomicUsize,
    }

    impl ConditionsSource for FakeSource {
        async fn weather(&self, point: GeoPoint) -> Result<Value, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!({
                "weather": [{ "main": "Clouds" }],
                "main": { "temp": point.lat },
            }))
        }

        async fn events(&self, point: GeoPoint) -> Result<Value, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing_event_latitudes.contains(&point.lat) {
                return Err(LookupError {
                    provider: "events",
                    message: "timed out".to_string(),
                });
            }
            Ok(json!({ "_embedded": { "events": [{}, {}] } }))
        }

        async fn incidents(&self, bbox: BBox) -> Result<Value, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!({ "incidents": [{ "bbox": bbox.to_string() }] }))
        }
    }

    fn route(len: usize) -> Vec<GeoPoint> {
        (0..len)
            .map(|index| GeoPoint::new(index as f64, -(index as f64)))
            .collect()
    }

    #[tokio::test]
    async fn test_analyze_samples_and_enriches() {
        let source = FakeSource::default();

        let conditions = analyze_route(&source, &route(12), CongestionLevel::High).await;

        assert_eq!(conditions.len(), 5);
        assert_eq!(source.calls.load(Ordering::SeqCst), 15);
        let latitudes: Vec<f64> = conditions.iter().map(|c| c.location.lat).collect();
        assert_eq!(latitudes, vec![0.0, 2.0, 4.0, 6.0, 8.0]);

        let first = &conditions[0];
        assert_eq!(first.weather, "Clouds");
        assert_eq!(first.events, 2);
        assert_eq!(first.congestion, CongestionLevel::High);
        assert_eq!(first.incidents, vec![json!({ "bbox": "-0.1,-0.1,0.1,0.1" })]);
    }

    #[tokio::test]
    async fn test_analyze_skips_points_with_failed_lookup() {
        let source = FakeSource {
            failing_event_latitudes: vec![1.0],
            ..Default::default()
        };

        let conditions = analyze_route(&source, &route(3), CongestionLevel::Low).await;

        let latitudes: Vec<f64> = conditions.iter().map(|c| c.location.lat).collect();
        assert_eq!(latitudes, vec![0.0, 2.0]);
    }

    #[tokio::test]
    async fn test_analyze_empty_route_issues_no_lookups() {
        let source = FakeSource::default();

        let conditions = analyze_route(&source, &[], CongestionLevel::Medium).await;

        assert!(conditions.is_empty());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_condition_defaults_for_empty_documents() {
        let condition = RouteCondition::from_documents(
            GeoPoint::new(1.0, 2.0),
            &json!({}),
            &json!({ "page": { "totalElements": 0 } }),
            json!({ "detailedError": { "code": "INVALID_REQUEST" } }),
            CongestionLevel::Medium,
        );

        assert_eq!(condition.weather, "Unknown");
        assert_eq!(condition.temperature, 0.0);
        assert_eq!(condition.events, 0);
        assert!(condition.incidents.is_empty());
    }
}
