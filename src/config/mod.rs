pub mod bootstrap_settings;
pub mod config_spec;
mod database;
mod env_provider;
pub mod errors;
mod logging;

pub use bootstrap_settings::BootstrapSettings;
pub use config_spec::ConfigSpec;
pub use database::{DatabaseConnections, migrate_database};
pub use env_provider::{EnvironmentProvider, SystemEnvironment};
pub use errors::ApplicationError;
pub use logging::{LoggingConfig, LoggingError, init_logging};

#[cfg(test)]
pub use env_provider::MockEnvironment;
