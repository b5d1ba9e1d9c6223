// file: src/client/http.rs
// description: reqwest-backed client for the engine management API
// reference: https://docs.rs/reqwest

use super::SearchApi;
use crate::config::Config;
use crate::error::{ExportError, Result};
use crate::models::Endpoint;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::debug;

pub struct HttpSearchApi {
    client: Client,
    engine_url: String,
    api_key: String,
}

impl HttpSearchApi {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().build().map_err(|e| ExportError::Transport {
            endpoint: config.engine_url(),
            source: e,
        })?;

        Ok(Self {
            client,
            engine_url: config.engine_url(),
            api_key: config.private_api_key.clone(),
        })
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.engine_url, endpoint.path())
    }

    fn request(&self, endpoint: Endpoint, body: Option<&Value>) -> Result<RequestBuilder> {
        let mut request = self
            .client
            .get(self.url(endpoint))
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key));

        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        Ok(request)
    }
}

#[async_trait]
impl SearchApi for HttpSearchApi {
    async fn get(&self, endpoint: Endpoint, body: Option<&Value>) -> Result<Value> {
        let response = self
            .request(endpoint, body)?
            .send()
            .await
            .map_err(|e| ExportError::Transport {
                endpoint: endpoint.path().to_string(),
                source: e,
            })?;

        let status = response.status();
        debug!("GET {} -> {}", endpoint, status);

        let text = response.text().await.map_err(|e| ExportError::Transport {
            endpoint: endpoint.path().to_string(),
            source: e,
        })?;

        if !status.is_success() {
            return Err(ExportError::Api {
                endpoint: endpoint.path().to_string(),
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            ExportError::malformed(endpoint.path(), format!("invalid JSON body: {}", e))
        })
    }
}
