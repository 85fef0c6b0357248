use std::net::IpAddr;
use std::sync::Arc;

use crate::config::EnvironmentProvider;
use crate::config::errors::ApplicationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValue {
    pub value: String,
    pub source: ConfigValueSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValueSource {
    EnvironmentVariable { name: String },
    Default,
}

/// Configuration specification with environment override → default priority
pub struct ConfigSpec {
    env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    pub env_override: Option<String>,
    pub default_value: Option<String>,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub validator: Option<fn(&str) -> Result<(), String>>,
}

impl ConfigSpec {
    pub fn new(env_provider: Arc<dyn EnvironmentProvider + Send + Sync>) -> Self {
        Self {
            env_provider,
            env_override: None,
            default_value: None,
            required: false,
            min_length: None,
            max_length: None,
            validator: None,
        }
    }

    pub fn env_override(mut self, name: &str) -> Self {
        self.env_override = Some(name.to_string());
        self
    }

    pub fn default_value(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_string());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    pub fn max_length(mut self, length: usize) -> Self {
        self.max_length = Some(length);
        self
    }

    pub fn validator(mut self, f: fn(&str) -> Result<(), String>) -> Self {
        self.validator = Some(f);
        self
    }

    /// Load the setting value with source tracking
    ///
    /// Uses environment override → default priority. Returns `Ok(None)` when
    /// an optional setting has no value from any source.
    pub fn load_setting_with_source(&self) -> Result<Option<ConfigValue>, ApplicationError> {
        if let Some(env_var) = &self.env_override {
            if let Some(value) = self.env_provider.get_var(env_var) {
                self.validate_value(&value, env_var)?;

                return Ok(Some(ConfigValue {
                    value,
                    source: ConfigValueSource::EnvironmentVariable {
                        name: env_var.clone(),
                    },
                }));
            }
        }

        if let Some(default) = &self.default_value {
            self.validate_value(default, self.setting_name())?;

            return Ok(Some(ConfigValue {
                value: default.clone(),
                source: ConfigValueSource::Default,
            }));
        }

        if self.required {
            return Err(ApplicationError::InvalidSetting {
                setting_name: self.setting_name().to_string(),
                reason: "Required setting has no value from any source".to_string(),
            });
        }

        Ok(None)
    }

    /// Load a setting that always has a value (a default or `required`)
    pub fn load_value(&self) -> Result<String, ApplicationError> {
        match self.load_setting_with_source()? {
            Some(config_value) => Ok(config_value.value),
            None => Err(ApplicationError::InvalidSetting {
                setting_name: self.setting_name().to_string(),
                reason: "Setting has no value from any source".to_string(),
            }),
        }
    }

    fn setting_name(&self) -> &str {
        self.env_override.as_deref().unwrap_or("unknown_setting")
    }

    /// Validate a setting value according to the ConfigSpec rules
    pub fn validate_value(&self, value: &str, setting_name: &str) -> Result<(), ApplicationError> {
        if let Some(min_len) = self.min_length {
            if value.len() < min_len {
                return Err(ApplicationError::InvalidSetting {
                    setting_name: setting_name.to_string(),
                    reason: format!("Value must be at least {} characters long", min_len),
                });
            }
        }

        if let Some(max_len) = self.max_length {
            if value.len() > max_len {
                return Err(ApplicationError::InvalidSetting {
                    setting_name: setting_name.to_string(),
                    reason: format!("Value must be at most {} characters long", max_len),
                });
            }
        }

        if let Some(validator) = self.validator {
            validator(value).map_err(|reason| ApplicationError::InvalidSetting {
                setting_name: setting_name.to_string(),
                reason,
            })?;
        }

        Ok(())
    }
}

/// Parsing and validation helpers for configuration values
impl ConfigSpec {
    /// Parse a port number, rejecting 0
    pub fn parse_port(value: &str, setting_name: &str) -> Result<u16, ApplicationError> {
        let port = value
            .trim()
            .parse::<u16>()
            .map_err(|e| ApplicationError::ParseError {
                setting_name: setting_name.to_string(),
                error: format!("Expected port number (1-65535), got '{}': {}", value, e),
            })?;

        if port == 0 {
            return Err(ApplicationError::InvalidSetting {
                setting_name: setting_name.to_string(),
                reason: "Port number must be between 1 and 65535".to_string(),
            });
        }

        Ok(port)
    }

    pub fn validate_port_range(value: &str, min: u16, max: u16) -> Result<(), String> {
        let parsed = value
            .trim()
            .parse::<u16>()
            .map_err(|_| format!("Expected port number between {} and {}", min, max))?;

        if parsed < min || parsed > max {
            return Err(format!("Port {} is outside valid range {}-{}", parsed, min, max));
        }

        Ok(())
    }

    /// Validate a bind address: an IP literal or a hostname
    ///
    /// Does not perform DNS resolution.
    pub fn validate_host_address(value: &str) -> Result<(), String> {
        if value.is_empty() {
            return Err("Host address cannot be empty".to_string());
        }
        if value.parse::<IpAddr>().is_ok() {
            return Ok(());
        }
        if value.chars().any(char::is_whitespace) {
            return Err(format!("Host address '{}' contains whitespace", value));
        }

        let valid_hostname = value.len() <= 253
            && value.split('.').all(|label| {
                !label.is_empty()
                    && label.len() <= 63
                    && !label.starts_with('-')
                    && !label.ends_with('-')
                    && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            });

        if valid_hostname {
            Ok(())
        } else {
            Err(format!("Invalid host address '{}'", value))
        }
    }

    pub fn validate_http_url(value: &str) -> Result<(), String> {
        if value.starts_with("http://") || value.starts_with("https://") {
            Ok(())
        } else {
            Err(format!("Expected an http(s) URL, got '{}'", value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    fn env(vars: &[(&str, &str)]) -> Arc<MockEnvironment> {
        Arc::new(MockEnvironment::empty().with_vars(vars))
    }

    #[test]
    fn test_env_override_wins_over_default() {
        let spec = ConfigSpec::new(env(&[("PORT", "8080")]))
            .env_override("PORT")
            .default_value("5000");

        let value = spec.load_setting_with_source().unwrap().unwrap();
        assert_eq!(value.value, "8080");
        assert_eq!(
            value.source,
            ConfigValueSource::EnvironmentVariable {
                name: "PORT".to_string()
            }
        );
    }

    #[test]
    fn test_default_used_when_env_missing() {
        let spec = ConfigSpec::new(env(&[]))
            .env_override("PORT")
            .default_value("5000");

        let value = spec.load_setting_with_source().unwrap().unwrap();
        assert_eq!(value.value, "5000");
        assert_eq!(value.source, ConfigValueSource::Default);
    }

    #[test]
    fn test_optional_without_value_is_none() {
        let spec = ConfigSpec::new(env(&[])).env_override("APP_LOG_FILE");

        assert_eq!(spec.load_setting_with_source().unwrap(), None);
        assert!(spec.load_value().is_err());
    }

    #[test]
    fn test_required_without_value_fails() {
        let spec = ConfigSpec::new(env(&[]))
            .env_override("DATABASE_URL")
            .required(true);

        match spec.load_setting_with_source() {
            Err(ApplicationError::InvalidSetting { setting_name, .. }) => {
                assert_eq!(setting_name, "DATABASE_URL");
            }
            other => panic!("Expected InvalidSetting, got: {:?}", other),
        }
    }

    #[test]
    fn test_length_limits() {
        let spec = ConfigSpec::new(env(&[("NAME", "abcdef")]))
            .env_override("NAME")
            .min_length(1)
            .max_length(3);

        match spec.load_setting_with_source() {
            Err(ApplicationError::InvalidSetting { reason, .. }) => {
                assert!(reason.contains("at most 3"));
            }
            other => panic!("Expected InvalidSetting, got: {:?}", other),
        }
    }

    #[test]
    fn test_validate_host_address() {
        assert!(ConfigSpec::validate_host_address("0.0.0.0").is_ok());
        assert!(ConfigSpec::validate_host_address("::1").is_ok());
        assert!(ConfigSpec::validate_host_address("localhost").is_ok());
        assert!(ConfigSpec::validate_host_address("api.example.com").is_ok());
        assert!(ConfigSpec::validate_host_address("").is_err());
        assert!(ConfigSpec::validate_host_address("bad host").is_err());
        assert!(ConfigSpec::validate_host_address("-bad.example").is_err());
    }

    #[test]
    fn test_port_helpers() {
        assert!(ConfigSpec::validate_port_range("1", 1, 65535).is_ok());
        assert!(ConfigSpec::validate_port_range("65535", 1, 65535).is_ok());
        assert!(ConfigSpec::validate_port_range("0", 1, 65535).is_err());
        assert!(ConfigSpec::validate_port_range("http", 1, 65535).is_err());

        assert_eq!(ConfigSpec::parse_port("5000", "PORT").unwrap(), 5000);
        assert!(ConfigSpec::parse_port("0", "PORT").is_err());
    }

    #[test]
    fn test_validate_http_url() {
        assert!(ConfigSpec::validate_http_url("http://localhost:5000").is_ok());
        assert!(ConfigSpec::validate_http_url("https://lostfound.example").is_ok());
        assert!(ConfigSpec::validate_http_url("localhost:5000").is_err());
    }
}
