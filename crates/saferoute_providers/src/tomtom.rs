use std::time::Duration;

use serde_json::Value;

use crate::{ProviderParams, error::ProviderError, handle_response};

pub const TOMTOM_BASE_URL: &str = "https://api.tomtom.com";
const INCIDENT_DETAILS_PATH: &str = "/maps/orbis/traffic/incidentDetails";
const INCIDENT_FIELDS: &str = "{incidents{type,geometry{type,coordinates},properties{iconCategory}}}";
const PROVIDER: &str = "TomTom";

#[derive(Clone)]
pub struct TomTomClient {
    params: ProviderParams,
    client: reqwest::Client,
}

impl TomTomClient {
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

    /// Incidents currently active inside `bbox` (`minLon,minLat,maxLon,maxLat`).
    pub async fn incident_details(&self, bbox: &str) -> Result<Value, ProviderError> {
        let api_key = self.params.api_key(PROVIDER)?;

        let response = self
            .client
            .get(self.params.url(INCIDENT_DETAILS_PATH))
            .query(&[
                ("apiVersion", "1"),
                ("key", api_key),
                ("bbox", bbox),
                ("fields", INCIDENT_FIELDS),
                ("language", "en-GB"),
                ("t", "1111"),
                ("timeValidityFilter", "present"),
            ])
            .timeout(self.params.timeout)
            .send()
            .await?;

        handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, time::Duration};

    use axum::{Json, Router, extract::Query, routing::get};
    use serde_json::json;

    use super::{INCIDENT_DETAILS_PATH, INCIDENT_FIELDS, TomTomClient};
    use crate::{ProviderParams, test_utils::serve};

    #[tokio::test]
    async fn test_incident_details_query() {
        let router = Router::new().route(
            INCIDENT_DETAILS_PATH,
            get(|Query(query): Query<HashMap<String, String>>| async move {
                assert_eq!(query["fields"], INCIDENT_FIELDS);
                assert_eq!(query["timeValidityFilter"], "present");
                Json(json!({ "incidents": [{ "bbox": query["bbox"] }] }))
            }),
        );
        let base_url = serve(router).await;
        let client = TomTomClient::new(ProviderParams::new(
            Some("key".to_string()),
            base_url,
            Duration::from_secs(5),
        ));

        let incidents = client.incident_details("4.3,50.8,4.4,50.9").await.unwrap();

        assert_eq!(incidents["incidents"][0]["bbox"], "4.3,50.8,4.4,50.9");
    }

    #[tokio::test]
    async fn test_timeout_is_transport_failure() {
        let router = Router::new().route(
            INCIDENT_DETAILS_PATH,
            get(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!({ "incidents": [] }))
            }),
        );
        let base_url = serve(router).await;
        let client = TomTomClient::new(ProviderParams::new(
            Some("key".to_string()),
            base_url,
            Duration::from_secs(5),
        ))
        .with_timeout(Duration::from_millis(100));

        let error = client.incident_details("0,0,1,1").await.unwrap_err();

        assert!(error.is_transport());
    }
}
