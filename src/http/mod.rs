//! HTTP client module
//!
//! Wraps `reqwest` with a bounded per-request timeout and retry with
//! exponential backoff for retryable failures. Every outbound call an
//! adapter makes goes through this client, so no single slow backend can
//! block a fetch indefinitely.

mod client;

pub use client::{HttpClient, HttpClientConfig, RequestConfig};
