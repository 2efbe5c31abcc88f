//! Error types for itmo-schedule
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for itmo-schedule operations
///
/// This enum encompasses all possible errors that can occur during the
/// PKCE login flow, the schedule fetch, and configuration loading.
///
/// The authorization-flow variants map one-to-one onto the steps of the
/// login dance: each step fails with exactly one variant and aborts the
/// remaining steps.
#[derive(Error, Debug)]
pub enum ItmoError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The authorization endpoint returned a bad status, or the redirect
    /// it produced was missing required data (no `Location`, no `code`)
    #[error("Authorization endpoint error: {0}")]
    AuthEndpoint(String),

    /// The login page HTML contained no form action to submit credentials
    /// to; the provider's markup changed or login is unavailable
    #[error("Login form not found: {0}")]
    FormNotFound(String),

    /// The credential submission was not answered with a redirect,
    /// which the provider uses to signal a rejected login
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// The token endpoint rejected the authorization-code exchange
    #[error("Token endpoint error: {0}")]
    TokenEndpoint(String),

    /// The token endpoint answered with a body that is not valid JSON or
    /// has no `access_token` field
    #[error("Malformed token response: {0}")]
    MalformedTokenResponse(String),

    /// The schedule API returned a bad status or an unparseable body
    #[error("Schedule API error: {0}")]
    Api(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for itmo-schedule operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = ItmoError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_auth_endpoint_error_display() {
        let error = ItmoError::AuthEndpoint("status 500".to_string());
        assert_eq!(error.to_string(), "Authorization endpoint error: status 500");
    }

    #[test]
    fn test_form_not_found_error_display() {
        let error = ItmoError::FormNotFound("no <form> in login page".to_string());
        assert_eq!(
            error.to_string(),
            "Login form not found: no <form> in login page"
        );
    }

    #[test]
    fn test_invalid_credentials_error_display() {
        let error = ItmoError::InvalidCredentials("expected 302, got 200".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid credentials: expected 302, got 200"
        );
    }

    #[test]
    fn test_token_endpoint_error_display() {
        let error = ItmoError::TokenEndpoint("status 400".to_string());
        assert_eq!(error.to_string(), "Token endpoint error: status 400");
    }

    #[test]
    fn test_malformed_token_response_error_display() {
        let error = ItmoError::MalformedTokenResponse("missing access_token".to_string());
        assert_eq!(
            error.to_string(),
            "Malformed token response: missing access_token"
        );
    }

    #[test]
    fn test_api_error_display() {
        let error = ItmoError::Api("status 401".to_string());
        assert_eq!(error.to_string(), "Schedule API error: status 401");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: ItmoError = io_error.into();
        assert!(matches!(error, ItmoError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_str = "{invalid json}";
        let json_error = serde_json::from_str::<serde_json::Value>(json_str).unwrap_err();
        let error: ItmoError = json_error.into();
        assert!(matches!(error, ItmoError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_str = "invalid: : yaml";
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let error: ItmoError = yaml_error.into();
        assert!(matches!(error, ItmoError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ItmoError>();
    }
}
