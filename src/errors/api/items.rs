use crate::errors::internal::{InternalError, ItemError};
use crate::types::dto::common::ErrorResponse;
use poem_openapi::{ApiResponse, payload::Json};
use std::fmt;

/// Item endpoint error responses
#[derive(ApiResponse, Debug)]
pub enum ItemApiError {
    /// Payload or filter failed validation
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),

    /// No item with the requested id
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl ItemApiError {
    /// Create a BadRequest error carrying the validation message
    pub fn bad_request(message: impl Into<String>) -> Self {
        ItemApiError::BadRequest(Json(ErrorResponse {
            error: message.into(),
        }))
    }

    /// Create a NotFound error
    pub fn not_found() -> Self {
        ItemApiError::NotFound(Json(ErrorResponse {
            error: "Not found".to_string(),
        }))
    }

    /// Convert InternalError to ItemApiError
    ///
    /// The only conversion point from internal errors to API errors.
    /// Infrastructure error details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match err {
            InternalError::Item(ItemError::NotFound(id)) => {
                tracing::debug!("Item not found: {}", id);
                Self::not_found()
            }
            InternalError::Item(item_err @ ItemError::Validation(_))
            | InternalError::Item(item_err @ ItemError::InvalidFilter { .. }) => {
                Self::bad_request(item_err.to_string())
            }
            InternalError::Database(_) | InternalError::Parse { .. } => {
                tracing::error!("Unexpected error in item operation: {}", err);
                Self::internal_server_error()
            }
        }
    }

    /// Generic internal error that never exposes internal details
    fn internal_server_error() -> Self {
        ItemApiError::InternalError(Json(ErrorResponse {
            error: "An internal error occurred".to_string(),
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> &str {
        match self {
            ItemApiError::BadRequest(json)
            | ItemApiError::NotFound(json)
            | ItemApiError::InternalError(json) => &json.0.error,
        }
    }

    /// Get the HTTP status code from the error variant
    pub fn status_code(&self) -> u16 {
        match self {
            ItemApiError::BadRequest(_) => 400,
            ItemApiError::NotFound(_) => 404,
            ItemApiError::InternalError(_) => 500,
        }
    }
}

impl From<InternalError> for ItemApiError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for ItemApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
