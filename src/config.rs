//! Configuration management for itmo-schedule
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files and environment variables.
//!
//! The identity-provider constants (client id, redirect URI, provider base
//! URL, API base URL, opaque `state` value) are configuration, not part of
//! the login algorithm; the shipped defaults point at the production
//! my.itmo.ru deployment.

use crate::error::{ItmoError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Main configuration structure for itmo-schedule
///
/// This structure holds everything needed to drive the login flow and the
/// schedule API calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Identity-provider settings for the PKCE login flow
    #[serde(default)]
    pub auth: AuthConfig,

    /// Schedule API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Schedule fetch defaults
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

/// Identity-provider configuration
///
/// All four values are fixed per deployment and never change between login
/// attempts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Base URL of the Keycloak realm, without a trailing slash
    #[serde(default = "default_provider_url")]
    pub provider_url: String,

    /// OAuth2 client id registered for the student cabinet
    #[serde(default = "default_client_id")]
    pub client_id: String,

    /// Redirect URI the authorization code is delivered to
    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,

    /// Opaque `state` value sent with the authorization request
    ///
    /// The flow never round-trips through a browser, so a constant value is
    /// sufficient; the provider echoes it back unchanged.
    #[serde(default = "default_state")]
    pub state: String,
}

fn default_provider_url() -> String {
    "https://id.itmo.ru/auth/realms/itmo".to_string()
}

fn default_client_id() -> String {
    "student-personal-cabinet".to_string()
}

fn default_redirect_uri() -> String {
    "https://my.itmo.ru/login/callback".to_string()
}

fn default_state() -> String {
    "im_not_a_browser".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            provider_url: default_provider_url(),
            client_id: default_client_id(),
            redirect_uri: default_redirect_uri(),
            state: default_state(),
        }
    }
}

impl AuthConfig {
    /// Returns the OpenID Connect authorization endpoint URL.
    pub fn authorization_endpoint(&self) -> String {
        format!("{}/protocol/openid-connect/auth", self.provider_url)
    }

    /// Returns the OpenID Connect token endpoint URL.
    pub fn token_endpoint(&self) -> String {
        format!("{}/protocol/openid-connect/token", self.provider_url)
    }
}

/// Schedule API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the my.itmo REST API, without a trailing slash
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
}

fn default_api_base_url() -> String {
    "https://my.itmo.ru/api".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
        }
    }
}

/// Schedule fetch defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Number of days after the start date covered when `--to` is omitted
    #[serde(default = "default_days_ahead")]
    pub days_ahead: u32,
}

fn default_days_ahead() -> u32 {
    7
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            days_ahead: default_days_ahead(),
        }
    }
}

impl Config {
    /// Loads configuration from a YAML file, falling back to defaults when
    /// the file does not exist, then applies environment-variable overrides.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ItmoError::Config`] when the file exists but cannot be read
    /// or parsed.
    pub fn load(path: &str) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::debug!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ItmoError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| ItmoError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(provider_url) = std::env::var("ITMO_PROVIDER_URL") {
            self.auth.provider_url = provider_url;
        }

        if let Ok(client_id) = std::env::var("ITMO_CLIENT_ID") {
            self.auth.client_id = client_id;
        }

        if let Ok(redirect_uri) = std::env::var("ITMO_REDIRECT_URI") {
            self.auth.redirect_uri = redirect_uri;
        }

        if let Ok(base_url) = std::env::var("ITMO_API_BASE_URL") {
            self.api.base_url = base_url;
        }

        if let Ok(days_ahead) = std::env::var("ITMO_DAYS_AHEAD") {
            if let Ok(value) = days_ahead.parse() {
                self.schedule.days_ahead = value;
            } else {
                tracing::warn!("Invalid ITMO_DAYS_AHEAD: {}", days_ahead);
            }
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ItmoError::Config`] describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.auth.client_id.is_empty() {
            return Err(ItmoError::Config("client_id cannot be empty".to_string()).into());
        }

        if Url::parse(&self.auth.provider_url).is_err() {
            return Err(ItmoError::Config(format!(
                "provider_url is not a valid URL: {}",
                self.auth.provider_url
            ))
            .into());
        }

        if Url::parse(&self.auth.redirect_uri).is_err() {
            return Err(ItmoError::Config(format!(
                "redirect_uri is not a valid URL: {}",
                self.auth.redirect_uri
            ))
            .into());
        }

        if Url::parse(&self.api.base_url).is_err() {
            return Err(ItmoError::Config(format!(
                "api.base_url is not a valid URL: {}",
                self.api.base_url
            ))
            .into());
        }

        if self.schedule.days_ahead == 0 {
            return Err(
                ItmoError::Config("schedule.days_ahead must be greater than 0".to_string()).into(),
            );
        }

        if self.schedule.days_ahead > 366 {
            return Err(ItmoError::Config(
                "schedule.days_ahead must be less than or equal to 366".to_string(),
            )
            .into());
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auth: AuthConfig::default(),
            api: ApiConfig::default(),
            schedule: ScheduleConfig::default(),
        }
    }
}
