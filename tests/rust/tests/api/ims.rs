//! createNewIMS and updateIMS

use chrono::Local;
use responsum_api::operations::{self, ims_name_for};
use serde_json::{json, Value};
use tests::{log_contains, mock_client, tenant_path, test_logger};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_country(server: &MockServer, name: &str, uuid: &str) {
    Mock::given(method("GET"))
        .and(path(tenant_path("country")))
        .and(query_param("param-filter", format!(r#"{{"name":["{}"]}}"#, name)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"type": "country", "uuid": uuid, "name": name}])),
        )
        .mount(server)
        .await;
}

async fn mount_uuids(server: &MockServer, uuids: &[&str]) {
    Mock::given(method("GET"))
        .and(path(tenant_path(&format!("uuids/{}", uuids.len()))))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(uuids)))
        .mount(server)
        .await;
}

async fn request_body(server: &MockServer, http_method: &str, endpoint: &str) -> Value {
    let requests = server.received_requests().await.unwrap();
    let request = requests
        .iter()
        .find(|r| r.method.as_str() == http_method && r.url.path() == tenant_path(endpoint))
        .expect("request was sent");
    serde_json::from_slice(&request.body).unwrap()
}

#[tokio::test]
async fn test_create_new_ims() {
    let server = MockServer::start().await;
    mount_country(&server, "Belgium", "be").await;
    mount_uuids(&server, &["ims-1", "link-1"]).await;
    Mock::given(method("POST"))
        .and(path(tenant_path("create")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"type": "link", "uuid": "link-1", "internalId": 1},
            {"type": "information-management-system", "uuid": "ims-1", "internalId": 42}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    let (logger, _) = test_logger();

    let created = operations::create_new_ims(&mock_client(&server), &logger).await;

    assert_eq!(created.map(|c| c.len()), Some(2));
    assert!(log_contains(&logger, "info:Created IMS internal id: 42"));

    let body = request_body(&server, "POST", "create").await;
    let ims = &body[0];
    assert_eq!(ims["type"], "information-management-system");
    assert_eq!(ims["uuid"], "ims-1");
    assert_eq!(ims["name"], ims_name_for(Local::now().date_naive()));
    assert!(ims["description"]
        .as_str()
        .unwrap()
        .starts_with("This IMS was created through the API example on "));
    assert_eq!(
        ims["country"],
        json!([{
            "type": "link",
            "uuid": "link-1",
            "linkType": "information-management-system-country",
            "links": [
                {"role": "information-management-system", "modelType": "information-management-system", "modelUuid": "ims-1"},
                {"role": "country", "modelType": "country", "modelUuid": "be"}
            ]
        }])
    );
}

#[tokio::test]
async fn test_create_new_ims_without_country() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(tenant_path("country")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(tenant_path("create")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    let (logger, console) = test_logger();

    assert!(operations::create_new_ims(&mock_client(&server), &logger).await.is_none());
    assert!(console
        .contents()
        .contains("[warn] Could not get a country by filter, exiting early"));
}

#[tokio::test]
async fn test_create_new_ims_without_uuids() {
    let server = MockServer::start().await;
    mount_country(&server, "Belgium", "be").await;
    Mock::given(method("GET"))
        .and(path(tenant_path("uuids/2")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let (logger, _) = test_logger();

    assert!(operations::create_new_ims(&mock_client(&server), &logger).await.is_none());
    assert!(log_contains(&logger, "error:Got an error for GET /uuids/2"));
    assert!(log_contains(&logger, "warn:Could not generate needed uuids, exiting early"));
}

#[tokio::test]
async fn test_update_ims() {
    let server = MockServer::start().await;
    let ims_name = ims_name_for(Local::now().date_naive());
    mount_country(&server, "Netherlands", "nl").await;
    mount_uuids(&server, &["link-2"]).await;
    Mock::given(method("GET"))
        .and(path(tenant_path("information-management-system")))
        .and(query_param("param-filter", format!(r#"{{"name":["{}"]}}"#, ims_name)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "type": "information-management-system",
            "uuid": "ims-1",
            "name": ims_name,
            "description": "created earlier"
        }])))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(tenant_path("update")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"type": "information-management-system", "uuid": "ims-1", "internalId": 7}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    let (logger, _) = test_logger();

    let updated = operations::update_ims(&mock_client(&server), &logger).await;

    assert!(updated.is_some());
    assert!(log_contains(&logger, "info:Updated IMS internal id: 7"));

    let body = request_body(&server, "PATCH", "update").await;
    let update = body[0].as_object().unwrap();
    assert_eq!(update["uuid"], "ims-1");
    assert!(!update.contains_key("name"));
    assert!(update["description"]
        .as_str()
        .unwrap()
        .starts_with("created earlier\r\nThis IMS was updated through the API example on "));
    assert_eq!(update["country"][0]["uuid"], "link-2");
    assert_eq!(update["country"][0]["links"][1]["modelUuid"], "nl");
}

#[tokio::test]
async fn test_update_ims_without_todays_ims() {
    let server = MockServer::start().await;
    mount_country(&server, "Netherlands", "nl").await;
    mount_uuids(&server, &["link-2"]).await;
    Mock::given(method("GET"))
        .and(path(tenant_path("information-management-system")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(tenant_path("update")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    let (logger, _) = test_logger();

    assert!(operations::update_ims(&mock_client(&server), &logger).await.is_none());
    assert!(log_contains(&logger, "warn:Could not get an IMS by name"));
}

#[tokio::test]
async fn test_update_ims_reads_sparse_stored_links() {
    let server = MockServer::start().await;
    let ims_name = ims_name_for(Local::now().date_naive());
    mount_country(&server, "Netherlands", "nl").await;
    mount_uuids(&server, &["link-2"]).await;
    Mock::given(method("GET"))
        .and(path(tenant_path("information-management-system")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "type": "information-management-system",
            "uuid": "ims-1",
            "name": ims_name,
            "description": "created earlier",
            "country": [{
                "type": "link",
                "uuid": "link-1",
                "links": [{"modelType": "country", "modelUuid": "be"}]
            }]
        }])))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(tenant_path("update")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"type": "information-management-system", "uuid": "ims-1", "internalId": 7}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    let (logger, _) = test_logger();

    let updated = operations::update_ims(&mock_client(&server), &logger).await;

    assert!(updated.is_some());
    assert!(!log_contains(&logger, "Got an error for GET /information-management-system"));
    assert!(log_contains(&logger, "info:Updated IMS internal id: 7"));
}

#[tokio::test]
async fn test_create_new_ims_ignores_extra_uuids() {
    let server = MockServer::start().await;
    mount_country(&server, "Belgium", "be").await;
    Mock::given(method("GET"))
        .and(path(tenant_path("uuids/2")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["ims-1", "link-1", "spare"])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(tenant_path("create")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"type": "information-management-system", "uuid": "ims-1", "internalId": 42}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    let (logger, _) = test_logger();

    assert!(operations::create_new_ims(&mock_client(&server), &logger).await.is_some());

    let body = request_body(&server, "POST", "create").await;
    assert_eq!(body[0]["uuid"], "ims-1");
    assert_eq!(body[0]["country"][0]["uuid"], "link-1");
}
