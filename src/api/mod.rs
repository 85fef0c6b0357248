// API layer - HTTP endpoints
pub mod health;
pub mod items;

use std::sync::Arc;

use poem::http::StatusCode;
use poem::middleware::{Cors, Tracing};
use poem::{Endpoint, EndpointExt, IntoResponse, Route, web::Json};
use poem_openapi::OpenApiService;
use poem_openapi::error::ParseRequestPayloadError;

pub use health::HealthApi;
pub use items::ItemsApi;

use crate::app_data::AppData;
use crate::coordinators::ItemCoordinator;
use crate::types::dto::common::ErrorResponse;

/// Compose the application routes
///
/// Health and item endpoints are served from the root, the OpenAPI document
/// under `/openapi.json` and Swagger UI under `/swagger`. `server_url` is the
/// base URL advertised in the OpenAPI document; it is copied, so the returned
/// endpoint does not borrow it.
pub fn build_routes(app_data: Arc<AppData>, server_url: &str) -> impl Endpoint + use<> {
    let item_coordinator = Arc::new(ItemCoordinator::new(app_data));

    let api_service = OpenApiService::new(
        (HealthApi, ItemsApi::new(item_coordinator)),
        "Lost & Found API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(server_url);

    let ui = api_service.swagger_ui();
    let spec = api_service.spec_endpoint();

    Route::new()
        .nest("/swagger", ui)
        .at("/openapi.json", spec)
        .nest("/", api_service)
        .catch_error(malformed_payload)
        .with(Cors::new())
        .with(Tracing)
}

/// Bodies that are not valid JSON for the endpoint get the same `{error}`
/// shape as validation failures
async fn malformed_payload(err: ParseRequestPayloadError) -> impl IntoResponse {
    Json(ErrorResponse {
        error: err.to_string(),
    })
    .with_status(StatusCode::BAD_REQUEST)
}
