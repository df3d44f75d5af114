//! Adapter response envelopes
//!
//! These shapes are the boundary contract with the presentation layer and
//! the configuration UI; their serialized form is part of the public API.

use crate::flatten::FlattenedData;
use crate::types::{JsonValue, Row, StringMap};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Fetch response
// ============================================================================

/// Normalized result of a scheduled fetch
///
/// On failure `data` and `fields` are empty and `error` carries the message;
/// a card rendering this shows a neutral "no data" state instead of crashing
/// the dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResponse {
    /// Flattened rows, or row-per-key for object payloads
    pub data: Vec<Row>,
    /// Field paths actually present, in order
    pub fields: Vec<String>,
    #[serde(skip_serializing_if = "StringMap::is_empty")]
    pub field_display_names: StringMap,
    /// When this fetch completed (ISO 8601)
    pub last_updated: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FetchResponse {
    /// Wrap a successful flattening pass
    pub fn success(flat: FlattenedData) -> Self {
        Self {
            data: flat.rows,
            fields: flat.fields,
            field_display_names: flat.field_display_names,
            last_updated: Utc::now(),
            error: None,
        }
    }

    /// Empty response carrying an error message
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            data: Vec::new(),
            fields: Vec::new(),
            field_display_names: StringMap::new(),
            last_updated: Utc::now(),
            error: Some(message.into()),
        }
    }

    /// Whether the fetch produced usable data
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

// ============================================================================
// Test response
// ============================================================================

/// Result of an interactive configuration test
///
/// Only populated on success; test failures propagate as errors so the
/// configuration UI can show a blocking message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Raw (JSON-parsed) backend response, for human inspection
    pub response: JsonValue,
    /// Discoverable or fixed field paths for selection
    pub fields: Vec<String>,
    /// Type-shape tree of the response
    pub structure: JsonValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<JiraProject>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_filters: Option<Vec<JiraFilter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<SmaxService>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<JsonValue>,
}

impl TestResponse {
    /// Successful test with nothing populated yet
    pub fn success() -> Self {
        Self {
            success: true,
            status_code: None,
            response: Value::Null,
            fields: Vec::new(),
            structure: Value::Null,
            projects: None,
            saved_filters: None,
            services: None,
            user: None,
        }
    }
}

// ============================================================================
// Backend catalog items
// ============================================================================

/// A JIRA project selectable in the configuration UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraProject {
    pub id: String,
    pub key: String,
    pub name: String,
}

/// A saved JIRA filter (favourite or searchable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraFilter {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jql: Option<String>,
    #[serde(default)]
    pub favourite: bool,
}

/// A SMAX entity type selectable as a service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmaxService {
    /// EMS entity type name
    pub name: String,
    /// Human-readable label
    pub label: String,
}
