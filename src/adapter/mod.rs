//! Source adapters
//!
//! Each adapter knows how to authenticate against its backend, fetch raw
//! data, and map backend-specific response shapes into the common
//! flat-record shape. The error contract differs by entry point and is
//! visible in the signatures: [`SourceAdapter::test`] propagates every
//! failure so the configuration UI can block saving, while
//! [`SourceAdapter::fetch`] folds every failure into the response envelope
//! so a broken source can never take the dashboard down.

pub mod api;
pub mod jira;
pub mod smax;
mod types;

pub use api::ApiAdapter;
pub use jira::JiraAdapter;
pub use smax::SmaxAdapter;
pub use types::{FetchResponse, JiraFilter, JiraProject, SmaxService, TestResponse};

use crate::config::DataSourceConfig;
use crate::error::{Error, Result};
use crate::model::DataSource;
use async_trait::async_trait;

/// Common interface of all source adapters
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Dry-run the source to populate the configuration UI.
    ///
    /// No persistence side effects; errors propagate.
    async fn test(&self) -> Result<TestResponse>;

    /// Fetch and normalize data for rendering.
    ///
    /// Never fails: any error is returned inside the envelope.
    async fn fetch(&self) -> FetchResponse;
}

/// Run the test entry point for a configuration
pub async fn test_source(config: &DataSourceConfig) -> Result<TestResponse> {
    config.validate()?;

    match config {
        DataSourceConfig::Api(c) => ApiAdapter::new(c.clone()).test().await,
        DataSourceConfig::Jira(c) => JiraAdapter::new(c.clone()).test().await,
        DataSourceConfig::Smax(c) => SmaxAdapter::new(c.clone()).test().await,
        DataSourceConfig::Scraping(_) | DataSourceConfig::Database(_) => Err(Error::config(
            format!("no adapter available for '{}' sources", config.source_type()),
        )),
    }
}

/// Run the fetch entry point for a configuration
pub async fn fetch_source(config: &DataSourceConfig) -> FetchResponse {
    if let Err(e) = config.validate() {
        return FetchResponse::failure(e.to_string());
    }

    match config {
        DataSourceConfig::Api(c) => ApiAdapter::new(c.clone()).fetch().await,
        DataSourceConfig::Jira(c) => JiraAdapter::new(c.clone()).fetch().await,
        DataSourceConfig::Smax(c) => SmaxAdapter::new(c.clone()).fetch().await,
        DataSourceConfig::Scraping(_) | DataSourceConfig::Database(_) => FetchResponse::failure(
            format!("no adapter available for '{}' sources", config.source_type()),
        ),
    }
}

/// Fetch on behalf of a stored data source
///
/// The pull timestamp is stamped before the fetch is attempted, so it
/// records the attempt itself, not its outcome.
pub async fn refresh(source: &mut DataSource) -> FetchResponse {
    source.touch_last_pull();
    fetch_source(&source.config).await
}
