use chrono::Utc;
use poem_openapi::{OpenApi, Tags, payload::Json, payload::PlainText};

use crate::types::dto::common::HealthResponse;

/// Health check API
pub struct HealthApi;

/// API tags for health endpoints
#[derive(Tags)]
enum ApiTags {
    /// Health check endpoints
    Health,
}

#[OpenApi]
impl HealthApi {
    /// Liveness probe
    #[oai(path = "/", method = "get", tag = "ApiTags::Health")]
    async fn root(&self) -> PlainText<&'static str> {
        PlainText("Lost & Found backend running")
    }

    /// Health check endpoint
    ///
    /// Returns the current status of the API service
    #[oai(path = "/health", method = "get", tag = "ApiTags::Health")]
    async fn health(&self) -> Json<HealthResponse> {
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_root_is_plain_text() {
        let PlainText(body) = HealthApi.root().await;
        assert_eq!(body, "Lost & Found backend running");
    }

    #[tokio::test]
    async fn test_health_reports_healthy() {
        let response = HealthApi.health().await;

        assert_eq!(response.status, "healthy");
        assert!(chrono::DateTime::parse_from_rfc3339(&response.timestamp).is_ok());
    }
}
