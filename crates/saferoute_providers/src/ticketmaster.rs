use std::time::Duration;

use serde_json::Value;

use crate::{ProviderParams, error::ProviderError, handle_response};

pub const TICKETMASTER_BASE_URL: &str = "https://app.ticketmaster.com";
const EVENTS_PATH: &str = "/discovery/v2/events.json";
const PROVIDER: &str = "Ticketmaster";

#[derive(Clone)]
pub struct TicketmasterClient {
    params: ProviderParams,
    client: reqwest::Client,
}

impl TicketmasterClient {
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

    /// Discovery API events within `radius_km` of a point.
    pub async fn events_near(
        &self,
        lat: f64,
        lon: f64,
        radius_km: u32,
    ) -> Result<Value, ProviderError> {
        let api_key = self.params.api_key(PROVIDER)?;
        let latlong = format!("{},{}", lat, lon);
        let radius = radius_km.to_string();

        let response = self
            .client
            .get(self.params.url(EVENTS_PATH))
            .query(&[
                ("apikey", api_key),
                ("latlong", latlong.as_str()),
                ("radius", radius.as_str()),
                ("unit", "km"),
            ])
            .timeout(self.params.timeout)
            .send()
            .await?;

        handle_response(response).await
    }
}
