use serde::Deserialize;
use serde_json::Value;

use crate::route_leg::RouteLeg;

/// What the map client knows about the current trip when the user asks a question.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ChatContext {
    #[serde(default)]
    pub origin: Option<Value>,
    #[serde(default)]
    pub destination: Option<Value>,
    #[serde(default)]
    pub routes: Option<Value>,
}

fn describe(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "Not specified".to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

pub fn location_extraction_prompt(query: &str) -> String {
    format!(
        r#"Extract the starting location and destination from this navigation query: "{query}"
If the query contains locations, respond with a JSON object exactly like this:
{{
    "start": "exact starting location",
    "end": "exact destination location",
    "has_locations": true
}}
If no locations are found, respond with:
{{
    "has_locations": false
}}
Important: Keep location names exactly as mentioned in the query. Only include the JSON, no other text."#
    )
}

pub fn route_summary_prompt(start: &str, end: &str, leg: &RouteLeg) -> String {
    let traffic = leg
        .traffic_duration_text
        .as_deref()
        .unwrap_or("not available");

    format!(
        r#"Create a detailed navigation response for a route from {start} to {end}.

Include these exact details in a friendly, conversational way:
- Total Distance: {distance}
- Estimated Time: {duration}
- Current Traffic: {traffic}

Also include:
1. A brief overview of the main roads/highways used
2. Any notable traffic conditions
3. Suggestion for the best time to start the journey

Format it in a clear, easy-to-read way with appropriate line breaks."#,
        distance = leg.distance_text,
        duration = leg.duration_text,
    )
}

pub fn general_assistance_prompt(query: &str, context: &ChatContext) -> String {
    let routes = match &context.routes {
        None | Some(Value::Null) => "[]".to_string(),
        Some(routes) => routes.to_string(),
    };

    format!(
        r#"As a navigation assistant, help with the following query: {query}

Context:
- Current location: {origin}
- Destination: {destination}
- Available routes: {routes}

Provide a helpful, detailed response."#,
        origin = describe(context.origin.as_ref()),
        destination = describe(context.destination.as_ref()),
    )
}
