//! Generic REST API adapter
//!
//! Derives a GET request from the configured cURL command, fetches once,
//! and feeds the parsed body to field discovery (test) or the row flattener
//! (fetch). Bodies that fail to parse as JSON are wrapped as `{"raw": text}`
//! so the pipeline always operates on a JSON value.

use super::types::{FetchResponse, TestResponse};
use super::SourceAdapter;
use crate::config::ApiConfig;
use crate::curl::translate;
use crate::discovery::{discover_fields, structure_of};
use crate::error::{Error, Result};
use crate::flatten::flatten;
use crate::http::{HttpClient, RequestConfig};
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Adapter for cURL-captured REST API sources
pub struct ApiAdapter {
    config: ApiConfig,
    http: HttpClient,
}

impl ApiAdapter {
    /// Create an adapter with the default HTTP client
    pub fn new(config: ApiConfig) -> Self {
        Self::with_client(config, HttpClient::new())
    }

    /// Create an adapter with a custom HTTP client
    pub fn with_client(config: ApiConfig, http: HttpClient) -> Self {
        Self { config, http }
    }

    /// Translate the cURL command and perform one GET
    async fn request(&self) -> Result<(u16, Value)> {
        let request = translate(&self.config.curl_request)?;

        let response = self
            .http
            .get_with_config(&request.url, RequestConfig::new().headers(&request.headers))
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(Error::Http)?;
        let body = serde_json::from_str(&text).unwrap_or_else(|_| json!({ "raw": text }));

        debug!("API source responded with status {status}");
        Ok((status, body))
    }
}

#[async_trait]
impl SourceAdapter for ApiAdapter {
    async fn test(&self) -> Result<TestResponse> {
        let (status, body) = self.request().await?;

        Ok(TestResponse {
            status_code: Some(status),
            fields: discover_fields(&body),
            structure: structure_of(&body),
            response: body,
            ..TestResponse::success()
        })
    }

    async fn fetch(&self) -> FetchResponse {
        match self.request().await {
            Ok((_, body)) => FetchResponse::success(flatten(
                &body,
                &self.config.selected_fields,
                &self.config.field_display_names,
            )),
            Err(e) => {
                warn!("API source fetch failed: {e}");
                FetchResponse::failure(e.to_string())
            }
        }
    }
}
