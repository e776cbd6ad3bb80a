//! Error types for the pcloud client.
//!
//! This module provides a unified error type with explicit variants for
//! configuration, connection state, input validation, remote API and
//! transport failures.

use std::fmt;
use thiserror::Error;

/// The unified error type for pcloud operations.
///
/// Every call either returns a payload or fails with exactly one of these
/// variants. Nothing is retried internally.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid client configuration (unknown endpoint, bad base URL).
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An authenticated call was attempted with no token set.
    #[error("pCloud token is missing")]
    MissingCredentials,

    /// A call was attempted before `connect()` or after `disconnect()`.
    #[error("not connected to pCloud API, call connect() first")]
    NotConnected,

    /// None of the accepted parameter alternatives were supplied.
    #[error("missing required parameter for '{route}': expected one of {}", .alternatives.join(", "))]
    MissingRequiredParameter {
        route: String,
        alternatives: Vec<String>,
    },

    /// The API answered with a non-zero result code.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The response body was not a valid result envelope.
    #[error("malformed response from '{route}': {reason}")]
    MalformedResponse { route: String, reason: String },

    /// Network transport errors (connection, timeout, HTTP status).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

impl Error {
    /// Shorthand for [`Error::MalformedResponse`].
    pub fn malformed(route: &str, reason: impl Into<String>) -> Self {
        Error::MalformedResponse {
            route: route.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns the remote API error code, if this error carries one.
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Error::Api(err) => Some(err.code),
            _ => None,
        }
    }
}

/// Configuration errors raised while building a client.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Endpoint name is not one of the known API hosts.
    #[error("endpoint ({name}) not found, use one of: {}", .known.join(","))]
    UnknownEndpoint {
        name: String,
        known: Vec<&'static str>,
    },

    /// Base URL could not be parsed or does not meet requirements.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {message}")]
    HttpClient { message: String },
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// A raw download answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// A failure reported by the pCloud API through a non-zero `result` code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The API route that was called (e.g. `listfolder`).
    pub route: String,
    /// The HTTP method used.
    pub method: String,
    /// Numeric result code from the envelope.
    pub code: i64,
    /// Error text from the envelope.
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to {} '{}': code: {}, error: {}",
            self.method, self.route, self.code, self.message
        )
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Create a new API error.
    pub fn new(
        route: impl Into<String>,
        method: impl Into<String>,
        code: i64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            route: route.into(),
            method: method.into(),
            code,
            message: message.into(),
        }
    }

    /// Check if the error text reports a missing file or folder.
    pub fn is_not_found(&self) -> bool {
        self.message.to_ascii_lowercase().contains("not found")
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        // 1000: log in required, 2000: log in failed, 2094: invalid access token
        matches!(self.code, 1000 | 2000 | 2094)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_carries_route_and_code() {
        let err = ApiError::new("stat", "GET", 2009, "File not found.");
        let text = err.to_string();
        assert!(text.contains("GET"));
        assert!(text.contains("'stat'"));
        assert!(text.contains("2009"));
        assert!(text.contains("File not found."));
    }

    #[test]
    fn api_error_classification() {
        assert!(ApiError::new("stat", "GET", 2009, "File not found.").is_not_found());
        assert!(!ApiError::new("listfolder", "GET", 2005, "Directory does not exist.").is_not_found());
        assert!(ApiError::new("userinfo", "GET", 2000, "Log in failed.").is_auth_error());
        assert!(!ApiError::new("stat", "GET", 2009, "File not found.").is_auth_error());
    }

    #[test]
    fn missing_parameter_lists_alternatives() {
        let err = Error::MissingRequiredParameter {
            route: "listfolder".to_string(),
            alternatives: vec!["path".to_string(), "folderid".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "missing required parameter for 'listfolder': expected one of path, folderid"
        );
    }

    #[test]
    fn api_code_only_for_api_errors() {
        let err: Error = ApiError::new("stat", "GET", 2009, "File not found.").into();
        assert_eq!(err.api_code(), Some(2009));
        assert_eq!(Error::NotConnected.api_code(), None);
    }
}
