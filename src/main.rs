//! itmo-schedule - my.itmo.ru schedule client CLI
//!
//! Main entry point for the itmo-schedule application.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use itmo_schedule::cli::{Cli, Commands};
use itmo_schedule::commands;
use itmo_schedule::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Token { username, password } => {
            tracing::info!("Acquiring access token");
            commands::token::run_token(config, username, password).await?;
            Ok(())
        }
        Commands::Schedule {
            username,
            password,
            from,
            to,
            json,
        } => {
            tracing::info!("Fetching personal schedule");
            if let Some(f) = &from {
                tracing::debug!("Using start date override: {}", f);
            }
            if let Some(t) = &to {
                tracing::debug!("Using end date override: {}", t);
            }

            commands::schedule::run_schedule(config, username, password, from, to, json).await?;
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "itmo_schedule=debug"
    } else {
        "itmo_schedule=info"
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
