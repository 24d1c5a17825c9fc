//! Handler failures and their HTTP response

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// The spawned operation task panicked or was cancelled
    #[error("operation {operation} did not complete: {source}")]
    Operation {
        operation: &'static str,
        #[source]
        source: tokio::task::JoinError,
    },
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "code": "internal server error",
                "description": "Something broke the server.",
                "error": self.to_string(),
            })),
        )
            .into_response()
    }
}
