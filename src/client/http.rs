//! reqwest-backed item source talking to a running server

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};

use crate::client::board::ItemSource;
use crate::types::dto::common::ErrorResponse;
use crate::types::dto::items::{CreateItemRequest, ItemResponse};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request failed: {message}")]
    RequestFailed { message: String },

    #[error("Server returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Please fill in all required fields: {}", .missing.join(", "))]
    MissingFields { missing: Vec<&'static str> },
}

pub struct HttpItemSource {
    client: Client,
    base_url: String,
}

impl HttpItemSource {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ClientError::RequestFailed {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn items_url(&self) -> String {
        format!("{}/api/items", self.base_url)
    }

    /// Turn a non-success response into `ClientError::Api`, using the
    /// server's `{error}` message when there is one
    async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        };

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

fn request_failed(e: reqwest::Error) -> ClientError {
    ClientError::RequestFailed {
        message: e.to_string(),
    }
}

fn decode_failed(e: reqwest::Error) -> ClientError {
    ClientError::Decode {
        message: e.to_string(),
    }
}

#[async_trait]
impl ItemSource for HttpItemSource {
    async fn fetch_items(&self) -> Result<Vec<ItemResponse>, ClientError> {
        let response = self
            .client
            .get(self.items_url())
            .send()
            .await
            .map_err(request_failed)?;

        Self::check(response)
            .await?
            .json()
            .await
            .map_err(decode_failed)
    }

    async fn create_item(&self, request: &CreateItemRequest) -> Result<ItemResponse, ClientError> {
        let response = self
            .client
            .post(self.items_url())
            .json(request)
            .send()
            .await
            .map_err(request_failed)?;

        Self::check(response)
            .await?
            .json()
            .await
            .map_err(decode_failed)
    }

    async fn delete_item(&self, id: &str) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(format!("{}/{}", self.items_url(), id))
            .send()
            .await
            .map_err(request_failed)?;

        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let source = HttpItemSource::new("http://localhost:5000/").unwrap();
        assert_eq!(source.items_url(), "http://localhost:5000/api/items");
    }

    #[test]
    fn test_missing_fields_message() {
        let err = ClientError::MissingFields {
            missing: vec!["title", "contact"],
        };
        assert_eq!(
            err.to_string(),
            "Please fill in all required fields: title, contact"
        );
    }
}
