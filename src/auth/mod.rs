//! Non-interactive OAuth2 login against the ITMO identity provider
//!
//! This module implements the Authorization Code + PKCE flow entirely with
//! server-side HTTP requests: no browser, no local redirect listener. The
//! provider's hosted login page is scraped for its form action, credentials
//! are submitted directly, and the authorization code is lifted from the
//! `Location` header of the resulting redirect.
//!
//! # Module Layout
//!
//! - [`pkce`] -- PKCE `S256` verifier/challenge generation
//! - [`form`] -- login-form action extraction and HTML entity decoding
//! - [`flow`] -- the sequential login dance producing an access token

pub mod flow;
pub mod form;
pub mod pkce;

pub use flow::AuthFlow;
