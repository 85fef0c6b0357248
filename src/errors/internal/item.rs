use thiserror::Error;

/// Item domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemError {
    #[error("Item not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid value for filter '{parameter}': {message}")]
    InvalidFilter { parameter: String, message: String },
}

impl ItemError {
    pub fn invalid_filter(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidFilter {
            parameter: parameter.into(),
            message: message.into(),
        }
    }
}

/// A record failed the item schema
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} must be one of: {allowed} (got '{value}')")]
    InvalidEnum {
        field: &'static str,
        allowed: String,
        value: String,
    },

    #[error("{field} is not a valid date: '{value}'")]
    InvalidDate { field: &'static str, value: String },
}
