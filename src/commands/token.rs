//! `token` command: log in and print the raw access token
//!
//! Useful for piping the token into other tools (`curl`, `jq`) without
//! teaching them the login dance.

use std::sync::Arc;

use crate::auth::AuthFlow;
use crate::config::Config;
use crate::error::Result;

/// Runs the PKCE login flow and prints the access token to stdout.
///
/// The token is the only thing written to stdout so the output stays
/// pipeable; all diagnostics go through tracing on stderr.
pub async fn run_token(config: Config, username: String, password: String) -> Result<()> {
    let http = Arc::new(AuthFlow::http_client()?);
    let flow = AuthFlow::new(http, config.auth);

    let token = flow.acquire_token(&username, &password).await?;
    println!("{token}");

    Ok(())
}
