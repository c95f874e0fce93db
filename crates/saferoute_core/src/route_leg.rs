use serde_json::Value;

use crate::congestion::{CongestionError, CongestionLevel, classify_congestion};

/// One leg of a driving route, as returned by the directions provider.
#[derive(Debug, Clone)]
pub struct RouteLeg {
    /// Free-flow duration in seconds.
    pub normal_duration: u64,
    /// Duration under current traffic in seconds, when the provider knows it.
    pub traffic_duration: Option<u64>,
    pub distance_text: String,
    pub duration_text: String,
    pub traffic_duration_text: Option<String>,
    pub steps: Vec<Value>,
    pub polyline: String,
}

impl RouteLeg {
    pub fn congestion_level(&self) -> Result<CongestionLevel, CongestionError> {
        classify_congestion(self.normal_duration, self.traffic_duration)
    }

    /// Plain instruction strings of every step, in driving order.
    pub fn instructions(&self) -> Vec<String> {
        self.steps
            .iter()
            .filter_map(|step| step.get("html_instructions").and_then(Value::as_str))
            .map(str::to_string)
            .collect()
    }
}
