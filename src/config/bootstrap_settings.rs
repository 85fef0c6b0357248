use std::fmt;
use std::sync::Arc;

use crate::config::EnvironmentProvider;
use crate::config::config_spec::ConfigSpec;
use crate::config::errors::ApplicationError;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://lostfound.db?mode=rwc";
pub const DEFAULT_PORT: u16 = 5000;

/// Bootstrap settings for infrastructure configuration
pub struct BootstrapSettings {
    database_url: String,
    server_host: String,
    server_port: u16,
    public_url: String,
}

impl BootstrapSettings {
    /// Load bootstrap settings from environment variables using ConfigSpec
    pub fn from_env_provider(
        env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    ) -> Result<Self, ApplicationError> {
        let database_url_spec = ConfigSpec::new(env_provider.clone())
            .env_override("DATABASE_URL")
            .default_value(DEFAULT_DATABASE_URL)
            .min_length(1);

        let host_spec = ConfigSpec::new(env_provider.clone())
            .env_override("HOST")
            .default_value("0.0.0.0")
            .validator(ConfigSpec::validate_host_address);

        let default_port = DEFAULT_PORT.to_string();
        let port_spec = ConfigSpec::new(env_provider.clone())
            .env_override("PORT")
            .default_value(&default_port)
            .validator(|value| ConfigSpec::validate_port_range(value, 1, 65535));

        let database_url = database_url_spec.load_value()?;
        let server_host = host_spec.load_value()?;
        let server_port = ConfigSpec::parse_port(&port_spec.load_value()?, "PORT")?;

        // Advertised in the OpenAPI document; follows the port unless overridden
        let default_public_url = format!("http://localhost:{}", server_port);
        let public_url = ConfigSpec::new(env_provider)
            .env_override("PUBLIC_URL")
            .default_value(&default_public_url)
            .validator(ConfigSpec::validate_http_url)
            .load_value()?;

        Ok(Self {
            database_url,
            server_host,
            server_port,
            public_url,
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, ApplicationError> {
        use crate::config::SystemEnvironment;
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn public_url(&self) -> &str {
        &self.public_url
    }

    pub fn server_address(&self) -> String {
        if self.server_host.contains(':') {
            format!("[{}]:{}", self.server_host, self.server_port)
        } else {
            format!("{}:{}", self.server_host, self.server_port)
        }
    }
}

impl fmt::Debug for BootstrapSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapSettings")
            .field("database_url", &self.database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("public_url", &self.public_url)
            .finish()
    }
}
