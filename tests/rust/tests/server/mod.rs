//! Router integration tests
//!
//! Requests go through the full router, layers included, with the tenant
//! API mocked by wiremock.


use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use std::sync::Arc;

use responsum_api::ResponsumClient;
use responsum_logging::SharedLogger;
use responsum_server::{build_router, AppState};
use tower::ServiceExt;

pub fn state(logger: SharedLogger, client: ResponsumClient) -> AppState {
    AppState {
        logger,
        client: Arc::new(client),
    }
}

pub async fn send(state: AppState, method: &str, uri: &str, body: Body) -> Response<Body> {
    build_router(state)
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
