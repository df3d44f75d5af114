//! Data-source configuration
//!
//! Each data source carries a configuration variant keyed by its `type` tag.
//! The sum type keeps adapter dispatch exhaustive; per-variant validation
//! rejects unusable configuration before any network call is attempted.

use crate::error::{Error, Result};
use crate::refresh::RefreshUnit;
use crate::types::{DataSourceType, StringMap};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Inclusive bounds for the refresh interval surface
pub const REFRESH_INTERVAL_RANGE: std::ops::RangeInclusive<u32> = 1..=999;

fn default_refresh_interval() -> u32 {
    5
}

// ============================================================================
// Per-type configurations
// ============================================================================

/// Configuration for a generic REST API source captured as a cURL command
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    /// The pasted cURL command
    pub curl_request: String,
    /// Field paths to keep; empty keeps every discovered field
    #[serde(default)]
    pub selected_fields: Vec<String>,
    /// Field path -> custom label
    #[serde(default)]
    pub field_display_names: StringMap,
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u32,
    #[serde(default)]
    pub refresh_unit: RefreshUnit,
}

/// Configuration for a JIRA source
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraConfig {
    /// Base URL of the JIRA site
    pub jira_url: String,
    pub jira_username: String,
    pub jira_password: String,
    /// Project key to scope the query to
    #[serde(default)]
    pub selected_jira_project: Option<String>,
    /// Raw JQL, or a fragment conjoined with the project scope
    #[serde(default)]
    pub jira_query: Option<String>,
    #[serde(default)]
    pub selected_fields: Vec<String>,
    #[serde(default)]
    pub field_display_names: StringMap,
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u32,
    #[serde(default)]
    pub refresh_unit: RefreshUnit,
}

/// Configuration for an OpenText SMAX source
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmaxConfig {
    /// Base URL of the SMAX instance
    pub smax_url: String,
    /// EMS tenant id
    pub smax_tenant_id: String,
    pub smax_username: String,
    pub smax_password: String,
    /// Entity type to query (one of the six selectable services)
    #[serde(default)]
    pub selected_service: Option<String>,
    /// Free-text filter expression
    #[serde(default)]
    pub smax_query: Option<String>,
    #[serde(default)]
    pub selected_fields: Vec<String>,
    #[serde(default)]
    pub field_display_names: StringMap,
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u32,
    #[serde(default)]
    pub refresh_unit: RefreshUnit,
}

/// Configuration for a scraping source (no adapter in this crate)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapingConfig {
    pub scraping_url: String,
    #[serde(default)]
    pub css_selector: Option<String>,
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u32,
    #[serde(default)]
    pub refresh_unit: RefreshUnit,
}

/// Configuration for a database source (no adapter in this crate)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseConfig {
    pub connection_string: String,
    pub query: String,
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u32,
    #[serde(default)]
    pub refresh_unit: RefreshUnit,
}

// ============================================================================
// The tagged union
// ============================================================================

/// Data-source configuration, keyed by the persisted `type` tag
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DataSourceConfig {
    Api(ApiConfig),
    Jira(JiraConfig),
    Smax(SmaxConfig),
    Scraping(ScrapingConfig),
    Database(DatabaseConfig),
}

impl DataSourceConfig {
    /// The discriminant of this configuration
    pub fn source_type(&self) -> DataSourceType {
        match self {
            DataSourceConfig::Api(_) => DataSourceType::Api,
            DataSourceConfig::Jira(_) => DataSourceType::Jira,
            DataSourceConfig::Smax(_) => DataSourceType::Smax,
            DataSourceConfig::Scraping(_) => DataSourceType::Scraping,
            DataSourceConfig::Database(_) => DataSourceType::Database,
        }
    }

    /// Selected field paths, when the type supports field selection
    pub fn selected_fields(&self) -> &[String] {
        match self {
            DataSourceConfig::Api(c) => &c.selected_fields,
            DataSourceConfig::Jira(c) => &c.selected_fields,
            DataSourceConfig::Smax(c) => &c.selected_fields,
            DataSourceConfig::Scraping(_) | DataSourceConfig::Database(_) => &[],
        }
    }

    /// Refresh surface: (interval, unit)
    pub fn refresh(&self) -> (u32, RefreshUnit) {
        match self {
            DataSourceConfig::Api(c) => (c.refresh_interval, c.refresh_unit),
            DataSourceConfig::Jira(c) => (c.refresh_interval, c.refresh_unit),
            DataSourceConfig::Smax(c) => (c.refresh_interval, c.refresh_unit),
            DataSourceConfig::Scraping(c) => (c.refresh_interval, c.refresh_unit),
            DataSourceConfig::Database(c) => (c.refresh_interval, c.refresh_unit),
        }
    }

    /// Validate required fields and value ranges
    pub fn validate(&self) -> Result<()> {
        let (interval, _) = self.refresh();
        if !REFRESH_INTERVAL_RANGE.contains(&interval) {
            return Err(Error::invalid_value(
                "refreshInterval",
                format!("must be between 1 and 999, got {interval}"),
            ));
        }

        match self {
            DataSourceConfig::Api(c) => {
                require("curlRequest", &c.curl_request)?;
            }
            DataSourceConfig::Jira(c) => {
                require_url("jiraUrl", &c.jira_url)?;
                require("jiraUsername", &c.jira_username)?;
                require("jiraPassword", &c.jira_password)?;
            }
            DataSourceConfig::Smax(c) => {
                require_url("smaxUrl", &c.smax_url)?;
                require("smaxTenantId", &c.smax_tenant_id)?;
                require("smaxUsername", &c.smax_username)?;
                require("smaxPassword", &c.smax_password)?;
            }
            DataSourceConfig::Scraping(c) => {
                require_url("scrapingUrl", &c.scraping_url)?;
            }
            DataSourceConfig::Database(c) => {
                require("connectionString", &c.connection_string)?;
                require("query", &c.query)?;
            }
        }

        Ok(())
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(Error::missing_field(field))
    } else {
        Ok(())
    }
}

fn require_url(field: &str, value: &str) -> Result<()> {
    require(field, value)?;
    url::Url::parse(value).map_err(|e| Error::invalid_value(field, e.to_string()))?;
    Ok(())
}

// ============================================================================
// Loading
// ============================================================================

/// Load a data-source configuration from a YAML or JSON file
///
/// YAML is a superset of JSON, so a single parser covers both. The
/// configuration is validated before it is returned.
pub fn load_config(path: impl AsRef<Path>) -> Result<DataSourceConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read data source file '{}': {e}",
            path.display()
        ))
    })?;
    load_config_from_str(&content)
}

/// Load a data-source configuration from a YAML or JSON string
pub fn load_config_from_str(content: &str) -> Result<DataSourceConfig> {
    let config: DataSourceConfig = serde_yaml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
