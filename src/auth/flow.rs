//! OAuth2 authorization code flow with PKCE, driven without a browser
//!
//! This module implements the full login dance against the ITMO Keycloak
//! realm as a sequence of plain HTTP requests:
//!
//! 1. Generate a PKCE pair.
//! 2. GET the authorization endpoint; the response is the hosted login page.
//! 3. Scrape the login form's `action` URL from the page.
//! 4. POST the credentials to that URL with redirect-following disabled.
//! 5. Require a 302; anything else means the login page was re-rendered,
//!    which is how the provider rejects credentials.
//! 6. Pull the authorization `code` from the `Location` header.
//! 7. Exchange the code plus the PKCE verifier for an access token.
//!
//! Every step runs to completion before the next begins; a failure at any
//! step aborts the rest. Nothing is retried and nothing outlives the call.
//!
//! # References
//!
//! - RFC 6749 <https://www.rfc-editor.org/rfc/rfc6749>
//! - RFC 7636 PKCE <https://www.rfc-editor.org/rfc/rfc7636>

use std::sync::Arc;

use reqwest::header::LOCATION;
use reqwest::{redirect, StatusCode};
use url::Url;

use crate::auth::{form, pkce};
use crate::config::AuthConfig;
use crate::error::{ItmoError, Result};

// ---------------------------------------------------------------------------
// Token endpoint response (raw deserialization)
// ---------------------------------------------------------------------------

/// Raw JSON response from the token endpoint.
///
/// Only `access_token` is consumed; the provider sends more fields
/// (`expires_in`, `refresh_token`, ...) that this client deliberately
/// ignores since it neither caches nor refreshes tokens.
#[derive(Debug, serde::Deserialize)]
struct TokenResponse {
    access_token: String,
}

// ---------------------------------------------------------------------------
// AuthFlow
// ---------------------------------------------------------------------------

/// Drives the non-interactive authorization code flow with PKCE.
///
/// An `AuthFlow` holds no per-login state; a fresh PKCE pair is generated
/// inside every [`acquire_token`](Self::acquire_token) call, so concurrent
/// calls with different credentials are independent and safe.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use itmo_schedule::auth::AuthFlow;
/// use itmo_schedule::config::AuthConfig;
///
/// # async fn example() -> itmo_schedule::error::Result<()> {
/// let http = Arc::new(AuthFlow::http_client()?);
/// let flow = AuthFlow::new(http, AuthConfig::default());
///
/// let token = flow.acquire_token("student", "secret").await?;
/// # Ok(())
/// # }
/// ```
pub struct AuthFlow {
    http: Arc<reqwest::Client>,
    config: AuthConfig,
}

impl AuthFlow {
    /// Creates a new `AuthFlow` over a shared HTTP client.
    ///
    /// The client must have redirect-following disabled; use
    /// [`http_client`](Self::http_client) to build one. Following redirects
    /// would consume the 302 that carries the authorization code.
    pub fn new(http: Arc<reqwest::Client>, config: AuthConfig) -> Self {
        Self { http, config }
    }

    /// Builds the HTTP client used by the login flow.
    ///
    /// Redirect-following is disabled for the whole client: the flow reads
    /// the `Location` header of the credential-submission response itself,
    /// and the same client is shared with the schedule fetcher, which never
    /// needs redirects either.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`reqwest::Error`] when the TLS backend fails
    /// to initialize.
    pub fn http_client() -> Result<reqwest::Client> {
        let client = reqwest::Client::builder()
            .redirect(redirect::Policy::none())
            .build()?;
        Ok(client)
    }

    /// Runs the full login flow and returns the bearer access token.
    ///
    /// # Arguments
    ///
    /// * `username` - ITMO account login.
    /// * `password` - ITMO account password.
    ///
    /// # Errors
    ///
    /// Each step fails with its own [`ItmoError`] variant:
    ///
    /// - [`ItmoError::AuthEndpoint`] - the authorization endpoint returned a
    ///   bad status, or the final redirect carried no authorization code.
    /// - [`ItmoError::FormNotFound`] - the login page had no scrapeable form.
    /// - [`ItmoError::InvalidCredentials`] - the credential submission was
    ///   answered with anything other than a 302 redirect.
    /// - [`ItmoError::TokenEndpoint`] - the code-for-token exchange was
    ///   rejected.
    /// - [`ItmoError::MalformedTokenResponse`] - the token endpoint body was
    ///   not JSON or had no `access_token`.
    pub async fn acquire_token(&self, username: &str, password: &str) -> Result<String> {
        // Step 1: fresh PKCE pair for this attempt.
        let pkce_pair = pkce::generate();

        // Step 2: fetch the hosted login page from the authorization endpoint.
        let auth_url = self.build_authorization_url(&pkce_pair.challenge)?;
        tracing::debug!("requesting authorization page");

        let auth_resp = self.http.get(auth_url).send().await.map_err(|e| {
            ItmoError::AuthEndpoint(format!("authorization request failed: {e}"))
        })?;

        if !auth_resp.status().is_success() {
            return Err(ItmoError::AuthEndpoint(format!(
                "authorization endpoint returned {}",
                auth_resp.status()
            ))
            .into());
        }

        let login_page = auth_resp.text().await.map_err(|e| {
            ItmoError::AuthEndpoint(format!("failed to read login page: {e}"))
        })?;

        // Step 3: scrape the form action out of the page.
        let form_action = form::extract_form_action(&login_page)?;
        tracing::debug!("submitting credentials to scraped form action");

        // Step 4: submit the credentials. Redirects stay disabled so the
        // 302 below reaches us instead of being followed.
        let form_resp = self
            .http
            .post(&form_action)
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(|e| ItmoError::AuthEndpoint(format!("credential submission failed: {e}")))?;

        // Step 5: only a redirect means the login was accepted. A success
        // status is the login page re-rendered with an error banner.
        if form_resp.status() != StatusCode::FOUND {
            return Err(ItmoError::InvalidCredentials(format!(
                "login form returned {} instead of a redirect",
                form_resp.status()
            ))
            .into());
        }

        // Step 6: the authorization code rides the Location header.
        let location = form_resp
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                ItmoError::AuthEndpoint("redirect carried no Location header".to_string())
            })?;

        let code = extract_authorization_code(location)?;
        tracing::debug!("authorization code received, exchanging for token");

        // Steps 7-8: exchange the code, bound by the PKCE verifier.
        self.exchange_code(&code, &pkce_pair.verifier).await
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    /// Builds the authorization URL with all required query parameters.
    fn build_authorization_url(&self, code_challenge: &str) -> Result<String> {
        let mut url = Url::parse(&self.config.authorization_endpoint()).map_err(|e| {
            ItmoError::AuthEndpoint(format!("invalid authorization endpoint URL: {e}"))
        })?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("protocol", "oauth2");
            query.append_pair("response_type", "code");
            query.append_pair("client_id", &self.config.client_id);
            query.append_pair("redirect_uri", &self.config.redirect_uri);
            query.append_pair("scope", "openid");
            query.append_pair("state", &self.config.state);
            query.append_pair("code_challenge_method", "S256");
            query.append_pair("code_challenge", code_challenge);
        }

        Ok(url.to_string())
    }

    /// Exchanges an authorization code for an access token.
    ///
    /// The original PKCE verifier (not the challenge) goes into the request
    /// body; the server recomputes the S256 hash to prove the exchange
    /// belongs to the flow that started it.
    async fn exchange_code(&self, code: &str, code_verifier: &str) -> Result<String> {
        let params = [
            ("grant_type", "authorization_code"),
            ("client_id", self.config.client_id.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("code", code),
            ("code_verifier", code_verifier),
        ];

        let resp = self
            .http
            .post(self.config.token_endpoint())
            .form(&params)
            .send()
            .await
            .map_err(|e| ItmoError::TokenEndpoint(format!("token exchange request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(
                ItmoError::TokenEndpoint(format!("token endpoint returned {status}: {body}")).into(),
            );
        }

        let body = resp.text().await.map_err(|e| {
            ItmoError::MalformedTokenResponse(format!("failed to read token response: {e}"))
        })?;

        let token: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            ItmoError::MalformedTokenResponse(format!("failed to parse token response: {e}"))
        })?;

        Ok(token.access_token)
    }
}

// ---------------------------------------------------------------------------
// Utility functions
// ---------------------------------------------------------------------------

/// Extracts the `code` query parameter from a redirect `Location` value.
///
/// # Errors
///
/// Returns [`ItmoError::AuthEndpoint`] when the value is not an absolute
/// URL or has no `code` parameter; either way the provider violated the
/// protocol the flow negotiated.
fn extract_authorization_code(location: &str) -> Result<String> {
    let url = Url::parse(location).map_err(|e| {
        ItmoError::AuthEndpoint(format!("redirect Location is not a valid URL: {e}"))
    })?;

    url.query_pairs()
        .find(|(key, _)| key == "code")
        .map(|(_, value)| value.into_owned())
        .ok_or_else(|| {
            ItmoError::AuthEndpoint("redirect Location carried no authorization code".to_string())
                .into()
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
