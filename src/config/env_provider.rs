use std::collections::HashMap;

/// Source of environment variables
///
/// Settings read through this trait so tests can supply their own values
/// instead of mutating the process environment.
pub trait EnvironmentProvider {
    fn get_var(&self, key: &str) -> Option<String>;

    /// Like `get_var`, but treats blank values as unset
    fn get_non_empty_var(&self, key: &str) -> Option<String> {
        self.get_var(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

/// Reads from the process environment
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[cfg(test)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

#[cfg(test)]
impl MockEnvironment {
    pub fn new(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }

    pub fn empty() -> Self {
        Self::new(HashMap::new())
    }

    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_vars(mut self, vars: &[(&str, &str)]) -> Self {
        for (key, value) in vars {
            self.vars.insert(key.to_string(), value.to_string());
        }
        self
    }
}

#[cfg(test)]
impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_environment_provider() {
        let provider = SystemEnvironment;

        unsafe {
            std::env::set_var("LOSTFOUND_TEST_VAR_12345", "test_value");
        }

        assert_eq!(
            provider.get_var("LOSTFOUND_TEST_VAR_12345"),
            Some("test_value".to_string())
        );
        assert_eq!(provider.get_var("LOSTFOUND_MISSING_VAR_98765"), None);

        unsafe {
            std::env::remove_var("LOSTFOUND_TEST_VAR_12345");
        }
    }

    #[test]
    fn test_mock_environment_provider() {
        let provider = MockEnvironment::empty()
            .with_var("PORT", "5000")
            .with_vars(&[("HOST", "127.0.0.1"), ("LOG_LEVEL", "debug")]);

        assert_eq!(provider.get_var("PORT"), Some("5000".to_string()));
        assert_eq!(provider.get_var("HOST"), Some("127.0.0.1".to_string()));
        assert_eq!(provider.get_var("LOG_LEVEL"), Some("debug".to_string()));
        assert_eq!(provider.get_var("DATABASE_URL"), None);
    }

    #[test]
    fn test_non_empty_var_skips_blank_values() {
        let provider = MockEnvironment::empty()
            .with_var("APP_LOG_FILE", "   ")
            .with_var("LOG_LEVEL", " warn ");

        assert_eq!(provider.get_non_empty_var("APP_LOG_FILE"), None);
        assert_eq!(provider.get_non_empty_var("LOG_LEVEL"), Some("warn".to_string()));
        assert_eq!(provider.get_non_empty_var("MISSING"), None);
    }
}
