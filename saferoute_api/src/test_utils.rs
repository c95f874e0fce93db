use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::Query,
    http::{Request, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::{config::Config, routes::api_routes, state::AppState};

const REFERENCE_POLYLINE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

fn leg(distance: &str, duration: (&str, u64), traffic: Option<(&str, u64)>) -> Value {
    let mut leg = json!({
        "distance": { "text": distance, "value": 25_100 },
        "duration": { "text": duration.0, "value": duration.1 },
        "steps": [
            { "html_instructions": "Head <b>west</b>" },
            { "html_instructions": "Merge onto <b>E40</b>" }
        ]
    });
    if let Some((text, value)) = traffic {
        leg["duration_in_traffic"] = json!({ "text": text, "value": value });
    }
    leg
}

async fn fake_directions(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    match query.get("origin").map(String::as_str) {
        Some("denied") => Json(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        })),
        Some("nowhere") => Json(json!({ "status": "ZERO_RESULTS", "routes": [] })),
        _ => Json(json!({
            "status": "OK",
            "routes": [
                {
                    "overview_polyline": { "points": REFERENCE_POLYLINE },
                    "legs": [leg("25.1 km", ("20 mins", 1200), Some(("26 mins", 1560)))]
                },
                {
                    "overview_polyline": { "points": REFERENCE_POLYLINE },
                    "legs": [leg("27.8 km", ("23 mins", 1380), None)]
                },
                {
                    "overview_polyline": { "points": "" },
                    "legs": [leg("1 m", ("1 min", 0), Some(("1 min", 30)))]
                }
            ]
        })),
    }
}

async fn fake_places(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!({
        "status": "OK",
        "results": [{ "name": query.get("query") }]
    }))
}

fn model_answer(text: &str) -> Response {
    Json(json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] })).into_response()
}

async fn fake_gemini(Json(body): Json<Value>) -> Response {
    let prompt = body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap_or_default()
        .to_string();

    if prompt.starts_with("Extract the starting location") {
        if prompt.contains("explode") {
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
        if prompt.contains("Leuven to Brussels") {
            return model_answer(
                "```json\n{\"start\": \"Leuven\", \"end\": \"Brussels\", \"has_locations\": true}\n```",
            );
        }
        if prompt.contains("Atlantis") {
            return model_answer("{'start': 'nowhere', 'end': 'Atlantis', 'has_locations': True}");
        }
        if prompt.contains("From denied") {
            return model_answer(
                "{\"start\": \"denied\", \"end\": \"Brussels\", \"has_locations\": true}",
            );
        }
        return model_answer("There are no places in this question.");
    }

    if prompt.starts_with("Create a detailed navigation response") {
        return model_answer("Take the E40 west, traffic is moderate.");
    }

    let location = prompt
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("- ").filter(|line| line.starts_with("Current location:")))
        .unwrap_or_default();
    model_answer(location)
}

async fn fake_weather(Query(query): Query<HashMap<String, String>>) -> Response {
    let lat = query
        .get("lat")
        .and_then(|lat| lat.parse::<f64>().ok())
        .unwrap_or_default();
    if (43.0..44.0).contains(&lat) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    Json(json!({ "weather": [{ "main": "Clear" }], "main": { "temp": lat } })).into_response()
}

async fn fake_events(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!({
        "_embedded": { "events": [{}, {}, {}] },
        "radius": query.get("radius"),
    }))
}

async fn fake_incidents(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    let min_lat = query
        .get("bbox")
        .and_then(|bbox| bbox.split(',').nth(1))
        .and_then(|value| value.parse::<f64>().ok())
        .unwrap_or_default();

    if (40.0..41.0).contains(&min_lat) {
        tokio::time::sleep(Duration::from_secs(2)).await;
    }

    Json(json!({ "incidents": [{ "type": "Feature" }] }))
}

/// Starts a single local server answering for every upstream provider.
async fn spawn_fake_upstream() -> String {
    let router = Router::new()
        .route("/maps/api/directions/json", get(fake_directions))
        .route("/maps/api/place/textsearch/json", get(fake_places))
        .route(
            "/v1beta/models/test-model:generateContent",
            post(fake_gemini),
        )
        .route("/data/2.5/weather", get(fake_weather))
        .route("/discovery/v2/events.json", get(fake_events))
        .route("/maps/orbis/traffic/incidentDetails", get(fake_incidents));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", address)
}

/// The real API router wired to a fake upstream.
pub async fn test_app() -> Router {
    let base_url = spawn_fake_upstream().await;

    let mut vars: HashMap<String, String> = HashMap::new();
    for provider in ["GOOGLE_MAPS", "GEMINI", "OPENWEATHER", "TICKETMASTER", "TOMTOM"] {
        vars.insert(format!("{}_API_KEY", provider), "test-key".to_string());
        vars.insert(format!("{}_BASE_URL", provider), base_url.clone());
    }
    for (name, value) in [
        ("GEMINI_MODEL", "test-model"),
        ("REQUEST_TIMEOUT", "5s"),
        ("LOOKUP_TIMEOUT", "300ms"),
        ("ANALYSIS_TIMEOUT", "5s"),
    ] {
        vars.insert(name.to_string(), value.to_string());
    }

    let config = Config::from_lookup(|name| vars.get(name).cloned()).unwrap();

    api_routes(Arc::new(AppState::new(config)))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, &body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    send(app, request).await
}
