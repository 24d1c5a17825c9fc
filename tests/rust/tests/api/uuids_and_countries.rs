//! getUuids and getCountriesByFilter

use pretty_assertions::assert_eq;
use responsum_api::operations;
use serde_json::json;
use tests::{last_log_line, log_contains, mock_client, tenant_path, test_logger, API_TOKEN};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_get_uuids_logs_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(tenant_path("uuids/3")))
        .and(header("Api-Token", API_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["a", "b", "c"])))
        .expect(1)
        .mount(&server)
        .await;
    let (logger, _) = test_logger();

    let uuids = operations::get_uuids(&mock_client(&server), &logger, 3).await;

    assert_eq!(uuids, Some(vec!["a".to_string(), "b".to_string(), "c".to_string()]));
    let last = last_log_line(&logger);
    assert!(last.contains("info:GET /uuids/3"));
    assert!(last.contains("\"result\": ["));
}

#[tokio::test]
async fn test_get_uuids_error_is_logged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(tenant_path("uuids/3")))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "bad token"})))
        .mount(&server)
        .await;
    let (logger, console) = test_logger();

    let uuids = operations::get_uuids(&mock_client(&server), &logger, 3).await;

    assert_eq!(uuids, None);
    assert!(console.contents().contains("[error] Got an error for GET /uuids/3"));
    let last = last_log_line(&logger);
    assert!(last.contains("\"status\": 401"));
    assert!(last.contains("bad token"));
}

#[tokio::test]
async fn test_get_countries_by_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(tenant_path("country")))
        .and(query_param("param-filter", r#"{"name":["Belgium"]}"#))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"type": "country", "uuid": "be", "name": "Belgium"}])),
        )
        .mount(&server)
        .await;
    let (logger, _) = test_logger();

    let countries = operations::get_countries_by_filter(&mock_client(&server), &logger, "Belgium")
        .await
        .unwrap();

    assert_eq!(countries.len(), 1);
    assert_eq!(countries[0].name.as_deref(), Some("Belgium"));
}

#[tokio::test]
async fn test_unreachable_api() {
    let (logger, _) = test_logger();
    let client = responsum_api::ResponsumClient::new("http://127.0.0.1:9", "tenant", "t").unwrap();

    let countries = operations::get_countries_by_filter(&client, &logger, "Belgium").await;

    assert!(countries.is_none());
    assert!(log_contains(&logger, "error:Got an error for GET /country"));
}
