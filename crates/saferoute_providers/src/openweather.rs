use std::time::Duration;

use serde_json::Value;

use crate::{ProviderParams, error::ProviderError, handle_response};

pub const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org";
const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";
const PROVIDER: &str = "OpenWeatherMap";

#[derive(Clone)]
pub struct OpenWeatherClient {
    params: ProviderParams,
    client: reqwest::Client,
}

impl OpenWeatherClient {
    pub fn new(params: ProviderParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            params: ProviderParams {
                timeout,
                ..self.params.clone()
            },
            client: self.client.clone(),
        }
    }

    /// Current weather in metric units.
    pub async fn current_weather(&self, lat: f64, lon: f64) -> Result<Value, ProviderError> {
        let api_key = self.params.api_key(PROVIDER)?;

        let response = self
            .client
            .get(self.params.url(CURRENT_WEATHER_PATH))
            .query(&[("lat", lat), ("lon", lon)])
            .query(&[("appid", api_key), ("units", "metric")])
            .timeout(self.params.timeout)
            .send()
            .await?;

        handle_response(response).await
    }
}
