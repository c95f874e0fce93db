use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CongestionError {
    #[error("normal duration is zero, congestion ratio is undefined")]
    ZeroNormalDuration,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CongestionLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl Display for CongestionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                CongestionLevel::Low => "low",
                CongestionLevel::Medium => "medium",
                CongestionLevel::High => "high",
            }
        )
    }
}

/// Classifies `traffic / normal` against the 1.2 and 1.5 thresholds, both inclusive
/// on the lower side. A missing traffic duration means free flow.
///
/// Ratios are compared through integer cross multiplication so that the
/// boundaries hold exactly.
pub fn classify_congestion(
    normal_duration: u64,
    traffic_duration: Option<u64>,
) -> Result<CongestionLevel, CongestionError> {
    if normal_duration == 0 {
        return Err(CongestionError::ZeroNormalDuration);
    }

    let normal = normal_duration as u128;
    let traffic = traffic_duration.unwrap_or(normal_duration) as u128;

    if traffic * 10 <= normal * 12 {
        Ok(CongestionLevel::Low)
    } else if traffic * 10 <= normal * 15 {
        Ok(CongestionLevel::Medium)
    } else {
        Ok(CongestionLevel::High)
    }
}
