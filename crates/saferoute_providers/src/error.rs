use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("{provider} returned status {status}: {message}")]
    Status {
        provider: &'static str,
        status: String,
        message: String,
    },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Missing API key for {0}")]
    MissingApiKey(&'static str),

    #[error("{0} returned an empty response")]
    EmptyResponse(&'static str),
}

impl ProviderError {
    /// True when the provider never produced an answer: the request could not
    /// be sent, timed out, or its body could not be read or decoded.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ProviderError::Request(_) | ProviderError::Deserialize(_)
        )
    }
}
