//! Auth configuration types

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::Value;

/// Authentication configuration for a source backend
#[derive(Debug, Clone, Default)]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },

    /// Bearer token authentication
    Bearer {
        /// The bearer token
        token: String,
    },

    /// Session-based authentication: POST credentials, receive a token
    Session {
        /// Login endpoint URL
        login_url: String,
        /// Login request body (JSON)
        login_body: Value,
        /// Dot-path to extract the token from a JSON response;
        /// `None` means the raw response body is the token
        token_path: Option<String>,
    },
}

/// Build a `Basic` authorization header value from credentials
pub fn basic_header(username: &str, password: &str) -> String {
    let encoded = BASE64.encode(format!("{username}:{password}"));
    format!("Basic {encoded}")
}

#[cfg(test)]
mod type_tests {
    use super::*;

    #[test]
    fn test_basic_header() {
        // base64("user:pass") == "dXNlcjpwYXNz"
        assert_eq!(basic_header("user", "pass"), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn test_auth_config_default() {
        assert!(matches!(AuthConfig::default(), AuthConfig::None));
    }
}
