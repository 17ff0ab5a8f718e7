pub mod api;
pub mod config;
pub mod core_state;
pub mod models;
pub mod pipeline;
pub mod triage;

use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Anything that stops the service from starting or serving.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("State initialization failed: {0}")]
    Core(#[from] core_state::CoreError),
    #[error(transparent)]
    Server(#[from] api::ServerError),
}

pub async fn run() -> Result<(), StartupError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = config::AppConfig::from_env()?;
    tracing::info!(
        addr = %config.addr,
        models_dir = %config.models_dir.display(),
        lexicon = ?config.lexicon_path,
        extract_timeout_ms = config.extract_timeout.as_millis() as u64,
        "Configuration loaded"
    );

    let core = Arc::new(core_state::CoreState::from_config(&config)?);
    api::serve(config.addr, core).await?;

    tracing::info!("{} stopped", config::APP_NAME);
    Ok(())
}
