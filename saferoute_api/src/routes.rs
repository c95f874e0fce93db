use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    chat::chat_handler, directions::directions_handler, events::events_handler,
    incidents::incidents_handler, places::search_places_handler,
    route_analysis::route_analysis_handler, state::AppState, weather::weather_handler,
};

pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/directions", post(directions_handler))
        .route("/api/places/search", get(search_places_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/weather", get(weather_handler))
        .route("/api/events", get(events_handler))
        .route("/api/incidents", get(incidents_handler))
        .route("/api/route/analysis", post(route_analysis_handler))
        .with_state(state)
}
