use std::path::{Path, PathBuf};

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{EnvironmentProvider, SystemEnvironment};

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration for application logging
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `lostfound_backend=debug,poem=info`
    pub log_level: String,
    /// Daily-rotated log file written alongside console output
    pub app_log_file: Option<PathBuf>,
}

impl LoggingConfig {
    pub fn from_env_provider(env_provider: &dyn EnvironmentProvider) -> Self {
        Self {
            log_level: env_provider
                .get_non_empty_var("LOG_LEVEL")
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            app_log_file: env_provider.get_non_empty_var("APP_LOG_FILE").map(PathBuf::from),
        }
    }

    pub fn from_env() -> Self {
        Self::from_env_provider(&SystemEnvironment)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize logging: {0}")]
    InitializationError(String),

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("File system error: {0}")]
    FileSystemError(#[from] std::io::Error),
}

/// Initialize the tracing subscriber with console and optional file output
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let env_filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| LoggingError::InvalidLogLevel(format!("{}: {}", config.log_level, e)))?;

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(env_filter.clone());

    let subscriber = tracing_subscriber::registry().with(console_layer);

    match &config.app_log_file {
        Some(log_file_path) => {
            let directory = log_file_path.parent().unwrap_or_else(|| Path::new("."));
            std::fs::create_dir_all(directory)?;

            let file_name = log_file_path.file_name().ok_or_else(|| {
                LoggingError::InitializationError(format!(
                    "Invalid log file path: {}",
                    log_file_path.display()
                ))
            })?;

            let file_layer = fmt::layer()
                .with_writer(tracing_appender::rolling::daily(directory, file_name))
                .with_target(true)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_filter(env_filter);

            subscriber
                .with(file_layer)
                .try_init()
                .map_err(|e| LoggingError::InitializationError(e.to_string()))
        }
        None => subscriber
            .try_init()
            .map_err(|e| LoggingError::InitializationError(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    #[test]
    fn test_logging_config_defaults() {
        let config = LoggingConfig::from_env_provider(&MockEnvironment::empty());

        assert_eq!(config.log_level, "info");
        assert_eq!(config.app_log_file, None);
    }

    #[test]
    fn test_logging_config_from_env() {
        let env = MockEnvironment::empty()
            .with_var("LOG_LEVEL", "lostfound_backend=debug")
            .with_var("APP_LOG_FILE", "logs/lostfound.log");
        let config = LoggingConfig::from_env_provider(&env);

        assert_eq!(config.log_level, "lostfound_backend=debug");
        assert_eq!(config.app_log_file, Some(PathBuf::from("logs/lostfound.log")));
    }

    #[test]
    fn test_invalid_log_level_is_rejected() {
        let config = LoggingConfig {
            log_level: "lostfound_backend=[".to_string(),
            app_log_file: None,
        };

        assert!(matches!(
            init_logging(&config),
            Err(LoggingError::InvalidLogLevel(_))
        ));
    }
}
