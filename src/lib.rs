//! itmo-schedule - my.itmo.ru schedule client library
//!
//! This library implements a browserless OAuth2 Authorization Code + PKCE
//! login against the ITMO identity provider and a client for the personal
//! class schedule API.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `auth`: PKCE generation, login-form scraping, and the token flow
//! - `schedule`: schedule API client and lesson-record flattening
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//! - `commands`: CLI command handlers
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use itmo_schedule::{AuthFlow, Config, ScheduleClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml")?;
//!     config.validate()?;
//!
//!     let http = Arc::new(AuthFlow::http_client()?);
//!     let flow = AuthFlow::new(Arc::clone(&http), config.auth.clone());
//!     let token = flow.acquire_token("student", "secret").await?;
//!
//!     let client = ScheduleClient::new(http, config.api.clone());
//!     let from = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//!     let to = chrono::NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
//!     let lessons = client.fetch_lessons(&token, from, to).await?;
//!
//!     println!("{} lessons", lessons.len());
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod schedule;

// Re-export commonly used types
pub use auth::AuthFlow;
pub use config::Config;
pub use error::{ItmoError, Result};
pub use schedule::{LessonRecord, ScheduleClient};
