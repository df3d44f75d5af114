//! Persisted models at the boundary with the storage layer
//!
//! The core only reads and stamps these records; CRUD itself belongs to the
//! hosting application's persistence layer.

use crate::config::DataSourceConfig;
use crate::types::{DataSourceType, VisualizationType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Card geometry snaps to this grid unit
pub const GRID_UNIT: i32 = 20;

/// Snap a coordinate or extent to the card grid
pub fn snap_to_grid(value: i32) -> i32 {
    ((f64::from(value) / f64::from(GRID_UNIT)).round() as i32) * GRID_UNIT
}

// ============================================================================
// Data source
// ============================================================================

/// A configured data source
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    pub id: i64,
    pub name: String,
    /// Variant configuration; serializes with its `type` tag inline
    pub config: DataSourceConfig,
    pub is_active: bool,
    /// Stamped on every fetch attempt, successful or not
    #[serde(default)]
    pub last_pull_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl DataSource {
    /// The backend kind, derived from the configuration variant
    pub fn source_type(&self) -> DataSourceType {
        self.config.source_type()
    }

    /// Record that a fetch was attempted now
    pub fn touch_last_pull(&mut self) {
        self.last_pull_at = Some(Utc::now());
    }
}

// ============================================================================
// Dashboard
// ============================================================================

/// A dashboard owning zero or more cards
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub owner_id: i64,
    /// Published dashboards are viewable without authentication
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Position of a card on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPosition {
    pub x: i32,
    pub y: i32,
}

/// Size of a card on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSize {
    pub width: i32,
    pub height: i32,
}

/// A card rendering one data source on a dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCard {
    pub id: i64,
    pub dashboard_id: i64,
    pub title: String,
    #[serde(default)]
    pub visualization_type: VisualizationType,
    /// A card whose source was deleted keeps the dangling id and simply
    /// fails to resolve data
    #[serde(default)]
    pub data_source_id: Option<i64>,
    pub position: CardPosition,
    pub size: CardSize,
    #[serde(default)]
    pub config: Value,
}

impl DashboardCard {
    /// Snap position and size to the canvas grid after a drag or resize
    pub fn snap_geometry(&mut self) {
        self.position.x = snap_to_grid(self.position.x);
        self.position.y = snap_to_grid(self.position.y);
        self.size.width = snap_to_grid(self.size.width);
        self.size.height = snap_to_grid(self.size.height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::refresh::RefreshUnit;
    use crate::types::StringMap;

    fn sample_source() -> DataSource {
        DataSource {
            id: 1,
            name: "orders".to_string(),
            config: DataSourceConfig::Api(ApiConfig {
                curl_request: "curl 'https://api.example.com/orders'".to_string(),
                selected_fields: vec![],
                field_display_names: StringMap::new(),
                refresh_interval: 5,
                refresh_unit: RefreshUnit::Minutes,
            }),
            is_active: true,
            last_pull_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_source_type_derived_from_config() {
        assert_eq!(sample_source().source_type(), DataSourceType::Api);
    }

    #[test]
    fn test_touch_last_pull() {
        let mut source = sample_source();
        assert!(source.last_pull_at.is_none());
        source.touch_last_pull();
        assert!(source.last_pull_at.is_some());
    }

    #[test]
    fn test_data_source_serde_shape() {
        let json = serde_json::to_value(sample_source()).unwrap();
        assert_eq!(json["config"]["type"], "api");
        assert_eq!(json["isActive"], true);
        assert!(json["lastPullAt"].is_null());
    }

    #[test]
    fn test_snap_to_grid() {
        assert_eq!(snap_to_grid(0), 0);
        assert_eq!(snap_to_grid(9), 0);
        assert_eq!(snap_to_grid(10), 20);
        assert_eq!(snap_to_grid(29), 20);
        assert_eq!(snap_to_grid(31), 40);
        assert_eq!(snap_to_grid(-9), 0);
        assert_eq!(snap_to_grid(-11), -20);
    }

    #[test]
    fn test_card_snap_geometry() {
        let mut card = DashboardCard {
            id: 1,
            dashboard_id: 1,
            title: "Orders".to_string(),
            visualization_type: VisualizationType::Table,
            data_source_id: Some(1),
            position: CardPosition { x: 33, y: 58 },
            size: CardSize {
                width: 215,
                height: 189,
            },
            config: Value::Null,
        };

        card.snap_geometry();

        assert_eq!(card.position, CardPosition { x: 40, y: 60 });
        assert_eq!(
            card.size,
            CardSize {
                width: 220,
                height: 180
            }
        );
    }
}
