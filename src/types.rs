//! Common types used throughout dashsource
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// One normalized row: field path -> value, in insertion order
pub type Row = serde_json::Map<String, JsonValue>;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// Data Source Type
// ============================================================================

/// Kind of backend a data source pulls from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceType {
    Api,
    Jira,
    Smax,
    Scraping,
    Database,
}

impl DataSourceType {
    /// Stable lowercase name, matching the persisted `type` tag
    pub fn as_str(self) -> &'static str {
        match self {
            DataSourceType::Api => "api",
            DataSourceType::Jira => "jira",
            DataSourceType::Smax => "smax",
            DataSourceType::Scraping => "scraping",
            DataSourceType::Database => "database",
        }
    }
}

impl std::fmt::Display for DataSourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Visualization Type
// ============================================================================

/// How a dashboard card renders its data source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualizationType {
    /// Tabular view of the normalized rows
    #[default]
    Table,
    /// Bar chart
    Chart,
    /// Line chart
    Graph,
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_source_type_serde() {
        let ty: DataSourceType = serde_json::from_str("\"jira\"").unwrap();
        assert_eq!(ty, DataSourceType::Jira);

        let json = serde_json::to_string(&DataSourceType::Smax).unwrap();
        assert_eq!(json, "\"smax\"");
    }

    #[test]
    fn test_data_source_type_display() {
        assert_eq!(DataSourceType::Api.to_string(), "api");
        assert_eq!(DataSourceType::Database.to_string(), "database");
    }

    #[test]
    fn test_visualization_type_default() {
        assert_eq!(VisualizationType::default(), VisualizationType::Table);
    }

    #[test]
    fn test_option_string_none_if_empty() {
        assert_eq!(
            Some("test".to_string()).none_if_empty(),
            Some("test".to_string())
        );
        assert_eq!(Some(String::new()).none_if_empty(), None);
        assert_eq!(None::<String>.none_if_empty(), None);
        assert_eq!("test".to_string().none_if_empty(), Some("test".to_string()));
        assert_eq!(String::new().none_if_empty(), None);
    }
}
