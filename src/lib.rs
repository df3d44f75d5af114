//! # dashsource
//!
//! Ingestion and normalization core for dashboard data sources.
//!
//! Users capture a REST API as a cURL command, point at a JIRA site, or an
//! OpenText SMAX tenant; this crate translates, authenticates, fetches, and
//! normalizes each backend's payload into one flat-record shape a dashboard
//! card can render.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use dashsource::adapter::{fetch_source, test_source};
//! use dashsource::config::load_config;
//!
//! #[tokio::main]
//! async fn main() -> dashsource::Result<()> {
//!     let config = load_config("sources/orders.yaml")?;
//!
//!     // interactive configuration: errors propagate
//!     let test = test_source(&config).await?;
//!     println!("discoverable fields: {:?}", test.fields);
//!
//!     // scheduled refresh: errors ride inside the envelope
//!     let data = fetch_source(&config).await;
//!     println!("{} rows", data.data.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! cURL text ──> curl::translate ──> http ──┐
//! JIRA creds ──> adapter::jira ────────────┼──> flatten ──> FetchResponse
//! SMAX creds ──> adapter::smax ────────────┘       │
//!                        (test time) discovery <───┘
//! ```
//!
//! The refresh policy (`refresh`) tells the front end how often to call the
//! same pipeline again, and disables polling entirely below a 10s floor.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Common types and type aliases
pub mod types;

/// cURL command translation
pub mod curl;

/// Field discovery over arbitrary JSON
pub mod discovery;

/// Row flattening and field selection
pub mod flatten;

/// Refresh policy calculation
pub mod refresh;

/// HTTP client with timeout and retry
pub mod http;

/// Authentication for source backends
pub mod auth;

/// Data-source configuration
pub mod config;

/// Persisted boundary models
pub mod model;

/// Source adapters (generic API, JIRA, SMAX)
pub mod adapter;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use adapter::{fetch_source, refresh as refresh_source, test_source, FetchResponse, TestResponse};
pub use config::{load_config, DataSourceConfig};
pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
