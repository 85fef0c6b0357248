// Common test utilities for integration tests

use std::sync::Arc;

use lostfound_backend::AppData;
use lostfound_backend::api::build_routes;
use lostfound_backend::config::DatabaseConnections;
use poem::Endpoint;
use poem::test::{TestClient, TestResponse};
use sea_orm::Database;
use serde_json::{Value, json};

/// Creates a test client over a fresh in-memory database with migrations applied
pub async fn setup_test_client() -> TestClient<impl Endpoint> {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    let connections = DatabaseConnections::from_connection(db);
    connections
        .migrate()
        .await
        .expect("Failed to run migrations");

    let app_data = Arc::new(AppData::init(connections));
    TestClient::new(build_routes(app_data, "http://localhost:5000"))
}

/// Status code and JSON body of a response
pub async fn read_json(resp: TestResponse) -> (u16, Value) {
    let status = resp.0.status().as_u16();
    let body = resp
        .0
        .into_body()
        .into_json()
        .await
        .expect("Response body is not JSON");
    (status, body)
}

pub fn wallet_payload() -> Value {
    json!({
        "title": "Blue Wallet",
        "description": "Leather, blue",
        "category": "wallet",
        "status": "lost",
        "location": "Library",
        "contact": "a@b.com"
    })
}

/// POST an item and return the created JSON, asserting 201
pub async fn create_item<E: Endpoint>(client: &TestClient<E>, payload: Value) -> Value {
    let resp = client.post("/api/items").body_json(&payload).send().await;
    let (status, body) = read_json(resp).await;
    assert_eq!(status, 201, "create failed: {}", body);
    body
}
