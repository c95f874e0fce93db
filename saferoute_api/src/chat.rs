use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use saferoute_core::{
    locations::{LocationPair, extract_locations},
    prompts::{
        ChatContext, general_assistance_prompt, location_extraction_prompt, route_summary_prompt,
    },
    route_leg::RouteLeg,
};
use saferoute_providers::error::ProviderError;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::{directions::first_leg, error::ApiError, state::AppState};

const REPHRASE_MESSAGE: &str =
    "I'm having trouble understanding that request. Could you please rephrase it?";
const NO_ROUTE_CALCULATED_MESSAGE: &str = "I found the locations but couldn't calculate a route. Could you please be more specific with the addresses?";

#[derive(Deserialize)]
pub struct ChatRequestBody {
    query: String,
    #[serde(default)]
    context: ChatContext,
}

#[derive(Serialize)]
pub struct RouteInfo {
    distance: String,
    duration: String,
    duration_in_traffic: String,
    steps: Vec<String>,
}

#[derive(Serialize)]
pub struct ChatResponse {
    response: String,
    success: bool,
    has_route: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    locations: Option<LocationPair>,
    #[serde(skip_serializing_if = "Option::is_none")]
    route_info: Option<RouteInfo>,
}

impl ChatResponse {
    fn without_route(response: String) -> Self {
        ChatResponse {
            response,
            success: true,
            has_route: false,
            locations: None,
            route_info: None,
        }
    }
}

fn assistant_failure(error: ProviderError) -> ApiError {
    error!("Chat assistant failed: {}", error);
    ApiError::Assistant(REPHRASE_MESSAGE.to_string())
}

pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ChatRequestBody>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(body) =
        body.map_err(|rejection| ApiError::InvalidChatRequest(rejection.body_text()))?;

    let extraction = state
        .assistant
        .generate(&location_extraction_prompt(&body.query))
        .await
        .map_err(assistant_failure)?;

    let locations = extract_locations(&extraction);

    if !locations.has_locations {
        let answer = state
            .assistant
            .generate(&general_assistance_prompt(&body.query, &body.context))
            .await
            .map_err(assistant_failure)?;

        return Ok(Json(ChatResponse::without_route(answer)));
    }

    let Some((start, end)) = locations.endpoints() else {
        warn!("Model flagged locations without naming both: {:?}", locations);
        return Ok(Json(ChatResponse::without_route(
            NO_ROUTE_CALCULATED_MESSAGE.to_string(),
        )));
    };

    Ok(Json(route_answer(&state, start, end, &locations).await))
}

/// Answer for a query naming a start and a destination. Failures past this
/// point are reported to the user as a reply, not as an error.
async fn route_answer(
    state: &AppState,
    start: &str,
    end: &str,
    locations: &LocationPair,
) -> ChatResponse {
    let routes = match state.maps.directions(start, end).await {
        Ok(routes) => routes,
        Err(error) => {
            warn!("Directions from {:?} to {:?} failed: {}", start, end, error);
            return ChatResponse::without_route(NO_ROUTE_CALCULATED_MESSAGE.to_string());
        }
    };

    let Some(leg) = routes.into_iter().next().and_then(first_leg) else {
        return ChatResponse::without_route(format!(
            "I couldn't find a route between {} and {}. Could you please verify these locations and try again?",
            start, end
        ));
    };

    let answer = match state
        .assistant
        .generate(&route_summary_prompt(start, end, &leg))
        .await
    {
        Ok(answer) => answer,
        Err(error) => {
            warn!("Route summary failed: {}", error);
            return ChatResponse::without_route(NO_ROUTE_CALCULATED_MESSAGE.to_string());
        }
    };

    info!("Answered route query from {:?} to {:?}", start, end);

    ChatResponse {
        response: answer,
        success: true,
        has_route: true,
        locations: Some(locations.clone()),
        route_info: Some(route_info(leg)),
    }
}

fn route_info(leg: RouteLeg) -> RouteInfo {
    RouteInfo {
        steps: leg.instructions(),
        distance: leg.distance_text,
        duration: leg.duration_text,
        duration_in_traffic: leg
            .traffic_duration_text
            .unwrap_or_else(|| "not available".to_string()),
    }
}
