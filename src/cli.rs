//! Command-line interface definition for itmo-schedule
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for token acquisition and schedule display.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// itmo-schedule - my.itmo.ru schedule client
///
/// Logs in to the ITMO identity provider without a browser and fetches
/// the personal class schedule.
#[derive(Parser, Debug, Clone)]
#[command(name = "itmo-schedule")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for itmo-schedule
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Log in and print the raw access token
    Token {
        /// ITMO account login
        #[arg(short, long, env = "ITMO_USERNAME")]
        username: String,

        /// ITMO account password
        #[arg(short, long, env = "ITMO_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Fetch and display the personal class schedule
    Schedule {
        /// ITMO account login
        #[arg(short, long, env = "ITMO_USERNAME")]
        username: String,

        /// ITMO account password
        #[arg(short, long, env = "ITMO_PASSWORD", hide_env_values = true)]
        password: String,

        /// First day of the range, YYYY-MM-DD (defaults to today)
        #[arg(long, value_name = "DATE")]
        from: Option<NaiveDate>,

        /// Last day of the range, YYYY-MM-DD (defaults to the configured
        /// number of days after the start)
        #[arg(long, value_name = "DATE")]
        to: Option<NaiveDate>,

        /// Print records as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
