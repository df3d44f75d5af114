//! Authenticator implementation
//!
//! Applies an [`AuthConfig`] to outbound requests and manages session-token
//! acquisition. A fetched token is cached for the lifetime of the
//! authenticator; adapters create one per request chain, so no session
//! outlives a single test/fetch invocation.

use super::types::{basic_header, AuthConfig};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Authenticator handles applying authentication to HTTP requests
pub struct Authenticator {
    /// Auth configuration
    config: AuthConfig,
    /// Cached token for session auth
    cached_token: Arc<RwLock<Option<String>>>,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config,
            cached_token: Arc::new(RwLock::new(None)),
        }
    }

    /// Apply authentication to a request config
    pub async fn apply(&self, req: RequestConfig, http: &HttpClient) -> Result<RequestConfig> {
        match &self.config {
            AuthConfig::None => Ok(req),

            AuthConfig::Basic { username, password } => {
                Ok(req.header("Authorization", basic_header(username, password)))
            }

            AuthConfig::Bearer { token } => {
                Ok(req.header("Authorization", format!("Bearer {token}")))
            }

            AuthConfig::Session { .. } => {
                let token = self.session_token(http).await?;
                Ok(req.header("Authorization", format!("Bearer {token}")))
            }
        }
    }

    /// Get the session token, logging in on first use
    pub async fn session_token(&self, http: &HttpClient) -> Result<String> {
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                return Ok(token.clone());
            }
        }

        let mut cached = self.cached_token.write().await;

        // another task may have logged in while we waited for the lock
        if let Some(token) = cached.as_ref() {
            return Ok(token.clone());
        }

        let token = self.login(http).await?;
        *cached = Some(token.clone());
        Ok(token)
    }

    /// POST credentials to the login endpoint and extract the token
    async fn login(&self, http: &HttpClient) -> Result<String> {
        let AuthConfig::Session {
            login_url,
            login_body,
            token_path,
        } = &self.config
        else {
            return Err(Error::auth("not a session-authenticated source"));
        };

        let response = http
            .post_with_config(login_url, RequestConfig::new().json(login_body.clone()))
            .await
            .map_err(|e| match e {
                Error::HttpStatus { status, body } if status == 401 || status == 403 => {
                    Error::auth(format!("login rejected with status {status}: {body}"))
                }
                other => other,
            })?;

        let body = response.text().await.map_err(Error::Http)?;

        let token = match token_path {
            Some(path) => serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| extract_path(&v, path)),
            // some backends return the token as the raw response body
            None => {
                let trimmed = body.trim();
                if serde_json::from_str::<Value>(trimmed)
                    .map(|v| v.is_object() || v.is_array())
                    .unwrap_or(false)
                {
                    None
                } else {
                    trimmed.to_string().into()
                }
            }
        };

        match token {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(Error::auth("no token returned by authentication endpoint")),
        }
    }

    /// Clear the cached token (useful for testing or forced refresh)
    pub async fn clear_cache(&self) {
        let mut cached = self.cached_token.write().await;
        *cached = None;
    }

    /// Get the current auth config
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}

/// Extract a value from JSON using a simple dot-path expression
///
/// Supports paths like `token` or `session.token`.
pub fn extract_path(value: &Value, path: &str) -> Option<String> {
    let mut current = value;
    for part in path.split('.') {
        match current {
            Value::Object(map) => {
                current = map.get(part)?;
            }
            _ => return None,
        }
    }

    match current {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
