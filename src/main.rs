use clap::Parser;

use lostfound_backend::cli::{Cli, execute_command};
use lostfound_backend::config::{BootstrapSettings, LoggingConfig, init_logging};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    init_logging(&LoggingConfig::from_env())?;

    let settings = BootstrapSettings::from_env().inspect_err(|e| {
        tracing::error!("Invalid configuration: {}", e);
    })?;
    tracing::debug!("Loaded settings: {:?}", settings);

    execute_command(cli, &settings).await
}
