//! HTTP handlers for the example server

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Json},
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::future::Future;
use std::sync::Arc;

use responsum_api::{operations, ResponsumClient};
use responsum_logging::{ErrorInfo, Fields, SharedLogger};

use super::ServerError;

const INDEX_HTML: &str = include_str!("../../assets/index.html");
const INDEX_JS: &str = include_str!("../../assets/index.js");
const INDEX_CSS: &str = include_str!("../../assets/index.css");

/// Uuids fetched by `POST /getUuids`
const UUIDS_PER_REQUEST: u32 = 3;

/// Country looked up by `POST /getCountriesByFilter` without a name
const DEFAULT_COUNTRY: &str = "Belgium";

#[derive(Clone)]
pub struct AppState {
    pub logger: SharedLogger,
    pub client: Arc<ResponsumClient>,
}

// ============================================
// Log viewer
// ============================================

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn index_js() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/javascript; charset=utf-8")], INDEX_JS)
}

pub async fn index_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], INDEX_CSS)
}

/// In-memory log lines, oldest first
pub async fn get_log(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.logger.get_log_memory())
}

pub async fn clear_log(State(state): State<AppState>) -> StatusCode {
    state.logger.clear_log_memory();
    StatusCode::OK
}

// ============================================
// Diagnostics
// ============================================

pub async fn ping(State(state): State<AppState>) -> Json<Value> {
    state.logger.info("POST: /ping", ());
    Json(json!({
        "status": "ok",
        "time": chrono::Utc::now().timestamp_millis(),
    }))
}

/// Log whatever the caller posts; non-JSON bodies are logged as text
pub async fn webhook(State(state): State<AppState>, body: Bytes) -> Json<Value> {
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()))
    };
    state
        .logger
        .info("POST /webhook", Fields::new().with("body", body));
    Json(json!({}))
}

// ============================================
// Operations
// ============================================

pub async fn get_uuids(State(state): State<AppState>, uri: Uri) -> Result<Json<Value>, ServerError> {
    run_operation(&state, &uri, "getUuids", |client, logger| async move {
        operations::get_uuids(&client, &logger, UUIDS_PER_REQUEST).await
    })
    .await
}

#[derive(Debug, Deserialize)]
pub struct CountryQuery {
    pub name: Option<String>,
}

pub async fn get_countries_by_filter(
    State(state): State<AppState>,
    Query(query): Query<CountryQuery>,
    uri: Uri,
) -> Result<Json<Value>, ServerError> {
    let name = query
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_COUNTRY.to_string());
    run_operation(&state, &uri, "getCountriesByFilter", |client, logger| async move {
        operations::get_countries_by_filter(&client, &logger, &name).await
    })
    .await
}

pub async fn create_new_ims(State(state): State<AppState>, uri: Uri) -> Result<Json<Value>, ServerError> {
    run_operation(&state, &uri, "createNewIMS", |client, logger| async move {
        operations::create_new_ims(&client, &logger).await
    })
    .await
}

pub async fn update_ims(State(state): State<AppState>, uri: Uri) -> Result<Json<Value>, ServerError> {
    run_operation(&state, &uri, "updateIMS", |client, logger| async move {
        operations::update_ims(&client, &logger).await
    })
    .await
}

pub async fn create_new_user_with_permissions(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Json<Value>, ServerError> {
    run_operation(&state, &uri, "createNewUserWithPermissions", |client, logger| async move {
        operations::create_new_user_with_permissions(&client, &logger).await
    })
    .await
}

/// Run an operation on its own task and answer with its result, `null` when
/// it gave up. A task that panics is logged and answered with a 500.
pub(crate) async fn run_operation<F, Fut, T>(
    state: &AppState,
    uri: &Uri,
    operation: &'static str,
    run: F,
) -> Result<Json<Value>, ServerError>
where
    F: FnOnce(Arc<ResponsumClient>, SharedLogger) -> Fut,
    Fut: Future<Output = Option<T>> + Send + 'static,
    T: serde::Serialize + Send + 'static,
{
    let task = tokio::spawn(run(state.client.clone(), state.logger.clone()));
    match task.await {
        Ok(result) => Ok(Json(serde_json::to_value(result).unwrap_or(Value::Null))),
        Err(source) => {
            let error = ServerError::Operation { operation, source };
            state.logger.error(
                "Api broke.",
                Fields::new()
                    .with("error", ErrorInfo::from_error(&error))
                    .with("request", Fields::new().with("url", uri.to_string())),
            );
            Err(error)
        }
    }
}
