//! OpenText SMAX adapter
//!
//! Authenticates by POSTing credentials to the SMAX login endpoint; the
//! response body is the bearer token for the rest of the request chain.
//! Entities come from the EMS REST API with a fixed property layout per
//! entity type.

use super::types::{FetchResponse, SmaxService, TestResponse};
use super::SourceAdapter;
use crate::auth::{AuthConfig, Authenticator};
use crate::config::SmaxConfig;
use crate::error::{Error, Result};
use crate::flatten;
use crate::http::{HttpClient, RequestConfig};
use crate::types::{Row, StringMap};
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Record cap per fetch; no pagination is attempted
const MAX_RECORDS: u32 = 100;

/// The selectable entity types: (EMS name, label)
const ENTITY_TYPES: &[(&str, &str)] = &[
    ("Request", "Request"),
    ("Incident", "Incident"),
    ("Problem", "Problem"),
    ("Change", "Change"),
    ("Task", "Task"),
    ("KnowledgeDocument", "Knowledge Document"),
];

/// Fixed entity layout: (field path, EMS property, default display name)
const FIELD_LAYOUT: &[(&str, &str, &str)] = &[
    ("id", "Id", "Id"),
    ("title", "DisplayLabel", "Title"),
    ("description", "Description", "Description"),
    ("status", "Status", "Status"),
    ("phase", "PhaseId", "Phase"),
    ("priority", "Priority", "Priority"),
    ("urgency", "Urgency", "Urgency"),
    ("impact", "ImpactScope", "Impact"),
    ("category", "Category", "Category"),
    ("service", "RegisteredForActualService", "Service"),
    ("assignedGroup", "AssignedGroup", "Assigned Group"),
    ("owner", "Owner", "Owner"),
    ("requestedBy", "RequestedByPerson", "Requested By"),
    ("createdAt", "EmsCreationTime", "Created"),
    ("updatedAt", "LastUpdateTime", "Updated"),
    ("closedAt", "CloseTime", "Closed"),
];

/// Adapter for SMAX sources
pub struct SmaxAdapter {
    config: SmaxConfig,
    http: HttpClient,
    auth: Authenticator,
}

impl SmaxAdapter {
    /// Create an adapter with the default HTTP client
    pub fn new(config: SmaxConfig) -> Self {
        Self::with_client(config, HttpClient::new())
    }

    /// Create an adapter with a custom HTTP client
    pub fn with_client(config: SmaxConfig, http: HttpClient) -> Self {
        let base = config.smax_url.trim_end_matches('/');
        let auth = Authenticator::new(AuthConfig::Session {
            login_url: format!(
                "{base}/auth/authentication-endpoint/authenticate/login?TENANTID={}",
                config.smax_tenant_id
            ),
            login_body: json!({
                "login": config.smax_username,
                "password": config.smax_password,
            }),
            // the login endpoint answers with the raw token text
            token_path: None,
        });
        Self { config, http, auth }
    }

    fn ems_endpoint(&self, entity_type: &str) -> String {
        format!(
            "{}/rest/{}/ems/{entity_type}",
            self.config.smax_url.trim_end_matches('/'),
            self.config.smax_tenant_id
        )
    }

    /// Query one entity type with the fixed layout
    async fn entities(&self, entity_type: &str, size: u32) -> Result<Vec<Value>> {
        let layout: Vec<&str> = FIELD_LAYOUT.iter().map(|(_, prop, _)| *prop).collect();

        let mut req = RequestConfig::new()
            .query("layout", layout.join(","))
            .query("size", size.to_string());
        if let Some(query) = self.config.smax_query.as_deref().map(str::trim) {
            if !query.is_empty() {
                req = req.query("filter", query);
            }
        }
        let req = self.auth.apply(req, &self.http).await?;

        let body: Value = self
            .http
            .get_json_with_config(&self.ems_endpoint(entity_type), req)
            .await?;

        Ok(body["entities"].as_array().cloned().unwrap_or_default())
    }

    /// Best-effort lookup of the caller's Person record
    async fn current_user(&self) -> Option<Value> {
        let req = RequestConfig::new()
            .query("layout", "Id,Name,Upn,Email")
            .query("filter", format!("Upn = '{}'", self.config.smax_username))
            .query("size", "1");
        let req = match self.auth.apply(req, &self.http).await {
            Ok(req) => req,
            Err(e) => {
                warn!("SMAX user lookup could not authenticate: {e}");
                return None;
            }
        };

        match self
            .http
            .get_json_with_config::<Value>(&self.ems_endpoint("Person"), req)
            .await
        {
            Ok(body) => body["entities"]
                .as_array()
                .and_then(|entities| entities.first())
                .map(|entity| entity["properties"].clone()),
            Err(e) => {
                warn!("SMAX user lookup failed: {e}");
                None
            }
        }
    }

    /// Default labels merged under user overrides
    fn display_names(&self) -> StringMap {
        let mut names: StringMap = FIELD_LAYOUT
            .iter()
            .map(|(field, _, label)| ((*field).to_string(), (*label).to_string()))
            .collect();
        for (field, label) in &self.config.field_display_names {
            names.insert(field.clone(), label.clone());
        }
        names
    }
}

#[async_trait]
impl SourceAdapter for SmaxAdapter {
    async fn test(&self) -> Result<TestResponse> {
        // proves both the token and metadata access with a minimal query
        let probe = self.entities("Request", 1).await?;
        debug!("SMAX probe returned {} entities", probe.len());

        let services = ENTITY_TYPES
            .iter()
            .map(|(name, label)| SmaxService {
                name: (*name).to_string(),
                label: (*label).to_string(),
            })
            .collect();

        Ok(TestResponse {
            fields: FIELD_LAYOUT
                .iter()
                .map(|(field, _, _)| (*field).to_string())
                .collect(),
            services: Some(services),
            user: self.current_user().await,
            ..TestResponse::success()
        })
    }

    async fn fetch(&self) -> FetchResponse {
        let Some(entity_type) = self
            .config
            .selected_service
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        else {
            return FetchResponse::failure(Error::missing_field("selectedService").to_string());
        };

        match self.entities(entity_type, MAX_RECORDS).await {
            Ok(entities) => {
                let rows = entities.iter().map(map_entity).collect();
                FetchResponse::success(flatten::finish(
                    rows,
                    &self.config.selected_fields,
                    &self.display_names(),
                ))
            }
            Err(e) => {
                warn!("SMAX fetch failed: {e}");
                FetchResponse::failure(e.to_string())
            }
        }
    }
}

/// Map one EMS entity into the fixed flat layout
fn map_entity(entity: &Value) -> Row {
    let properties = &entity["properties"];
    let mut row = Row::new();

    for (field, property, _) in FIELD_LAYOUT {
        let value = properties.get(*property).cloned().unwrap_or(Value::Null);
        row.insert((*field).to_string(), value);
    }

    row
}
