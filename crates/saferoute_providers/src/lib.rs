pub mod error;
pub mod gemini;
pub mod google_maps;
pub mod openweather;
pub mod ticketmaster;
pub mod tomtom;

#[cfg(test)]
mod test_utils;

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::ProviderError;

/// Settings shared by every provider client.
#[derive(Clone, Debug)]
pub struct ProviderParams {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl ProviderParams {
    pub fn new(api_key: Option<String>, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub(crate) fn api_key(&self, provider: &'static str) -> Result<&str, ProviderError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(ProviderError::MissingApiKey(provider))
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Reads a JSON body, turning error statuses into [`ProviderError::Api`].
pub(crate) async fn handle_response<T>(response: reqwest::Response) -> Result<T, ProviderError>
where
    T: DeserializeOwned,
{
    if response.status().is_success() {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    } else {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        Err(ProviderError::Api { status, message })
    }
}
