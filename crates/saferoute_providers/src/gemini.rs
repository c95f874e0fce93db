use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ProviderParams, error::ProviderError, handle_response};

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const GEMINI_DEFAULT_MODEL: &str = "gemini-pro";
const PROVIDER: &str = "Gemini";

#[derive(Serialize, Deserialize, Default)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Clone)]
pub struct GeminiClient {
    params: ProviderParams,
    model: String,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(params: ProviderParams, model: impl Into<String>) -> Self {
        Self {
            params,
            model: model.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Single-turn text generation. Returns the text of the first candidate.
    pub async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self.params.api_key(PROVIDER)?;
        let url = self
            .params
            .url(&format!("/v1beta/models/{}:generateContent", self.model));

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(url)
            .query(&[("key", api_key)])
            .json(&body)
            .timeout(self.params.timeout)
            .send()
            .await?;

        let response: GenerateContentResponse = handle_response(response).await?;

        let text = response
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<String>()
            })
            .filter(|text| !text.is_empty())
            .ok_or(ProviderError::EmptyResponse(PROVIDER))?;

        debug!("Gemini: generated {} characters", text.len());

        Ok(text)
    }
}
