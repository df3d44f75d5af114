//! Authentication for source backends
//!
//! Each adapter describes how it authenticates as an [`AuthConfig`] and lets
//! an [`Authenticator`] apply it to outbound requests. Session tokens are
//! cached for the lifetime of the authenticator, which adapters scope to a
//! single request chain.

mod authenticator;
mod types;

pub use authenticator::{extract_path, Authenticator};
pub use types::{basic_header, AuthConfig};

#[cfg(test)]
mod tests;
