use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Response model for health check endpoint
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,

    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}

/// Error body returned by every failing endpoint
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}
