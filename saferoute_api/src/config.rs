use std::time::Duration;

use saferoute_providers::{
    ProviderParams,
    gemini::{GEMINI_BASE_URL, GEMINI_DEFAULT_MODEL},
    google_maps::GOOGLE_MAPS_BASE_URL,
    openweather::OPENWEATHER_BASE_URL,
    ticketmaster::TICKETMASTER_BASE_URL,
    tomtom::TOMTOM_BASE_URL,
};
use thiserror::Error;
use tracing::warn;

const DEFAULT_REQUEST_TIMEOUT: &str = "30s";
const DEFAULT_LOOKUP_TIMEOUT: &str = "5s";
const DEFAULT_ANALYSIS_TIMEOUT: &str = "20s";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name}={value:?} is not a valid duration: {reason}")]
    InvalidDuration {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("LOOKUP_TIMEOUT ({lookup:?}) must be shorter than ANALYSIS_TIMEOUT ({analysis:?})")]
    LookupOutlastsAnalysis { lookup: Duration, analysis: Duration },
}

/// Everything the server reads from the environment at start-up.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_maps: ProviderParams,
    pub gemini: ProviderParams,
    pub gemini_model: String,
    pub openweather: ProviderParams,
    pub ticketmaster: ProviderParams,
    pub tomtom: ProviderParams,
    /// Per-call timeout of the route analysis lookups.
    pub lookup_timeout: Duration,
    /// Bound on a whole route analysis request.
    pub analysis_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let request_timeout = parse_duration(&lookup, "REQUEST_TIMEOUT", DEFAULT_REQUEST_TIMEOUT)?;
        let lookup_timeout = parse_duration(&lookup, "LOOKUP_TIMEOUT", DEFAULT_LOOKUP_TIMEOUT)?;
        let analysis_timeout =
            parse_duration(&lookup, "ANALYSIS_TIMEOUT", DEFAULT_ANALYSIS_TIMEOUT)?;

        // A slow lookup must cost its point, not the whole analysis.
        if lookup_timeout >= analysis_timeout {
            return Err(ConfigError::LookupOutlastsAnalysis {
                lookup: lookup_timeout,
                analysis: analysis_timeout,
            });
        }

        let provider = |key_var: &'static str, url_var: &str, default_url: &str| {
            let api_key = lookup(key_var).filter(|key| !key.is_empty());
            if api_key.is_none() {
                warn!("{} is not set, calls needing it will fail", key_var);
            }
            let base_url = lookup(url_var).unwrap_or_else(|| default_url.to_string());
            ProviderParams::new(api_key, base_url, request_timeout)
        };

        Ok(Config {
            google_maps: provider(
                "GOOGLE_MAPS_API_KEY",
                "GOOGLE_MAPS_BASE_URL",
                GOOGLE_MAPS_BASE_URL,
            ),
            gemini: provider("GEMINI_API_KEY", "GEMINI_BASE_URL", GEMINI_BASE_URL),
            gemini_model: lookup("GEMINI_MODEL").unwrap_or_else(|| GEMINI_DEFAULT_MODEL.to_string()),
            openweather: provider(
                "OPENWEATHER_API_KEY",
                "OPENWEATHER_BASE_URL",
                OPENWEATHER_BASE_URL,
            ),
            ticketmaster: provider(
                "TICKETMASTER_API_KEY",
                "TICKETMASTER_BASE_URL",
                TICKETMASTER_BASE_URL,
            ),
            tomtom: provider("TOMTOM_API_KEY", "TOMTOM_BASE_URL", TOMTOM_BASE_URL),
            lookup_timeout,
            analysis_timeout,
        })
    }
}

/// Accepts friendly (`5s`, `1m 30s`) and ISO 8601 (`PT5S`) durations.
fn parse_duration<F>(lookup: &F, name: &'static str, default: &str) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(name).unwrap_or_else(|| default.to_string());
    let invalid = |reason: String| ConfigError::InvalidDuration {
        name,
        value: value.clone(),
        reason,
    };

    let signed: jiff::SignedDuration = value.parse().map_err(|e: jiff::Error| invalid(e.to_string()))?;

    Duration::try_from(signed).map_err(|e| invalid(e.to_string()))
}
