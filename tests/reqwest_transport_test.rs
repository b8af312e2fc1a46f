// ABOUTME: Wire-level tests for the reqwest transport against a mock HTTP server
// ABOUTME: Verifies bearer header, base URL joining, query encoding, bodies and 429 retry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Asana Client Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::time::Duration;

use asana_client::client::AsanaClient;
use asana_client::config::ClientConfig;
use asana_client::errors::ErrorCode;
use asana_client::http_client::{
    HttpTransport, RequestBody, RequestOptions, ReqwestTransport, TransportRequest,
};
use asana_client::models::{HttpMethod, ResponseShape};
use asana_client::oauth2_client::Credentials;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "2/1204567890/1209876543:0123456789abcdef";

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::new(Credentials::personal_access_token(TOKEN))
        .unwrap()
        .with_base_url(&format!("{}/api/1.0", server.uri()))
        .unwrap()
}

#[tokio::test]
async fn sends_bearer_header_and_query_under_base_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/1.0/users/me"))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .and(query_param("opt_fields", "name,email"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"gid": "1204567890", "name": "Ada"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = AsanaClient::new(&config_for(&server)).unwrap();
    let me = client
        .users()
        .get("me", RequestOptions::new().opt_fields(&["name", "email"]))
        .await
        .unwrap();

    assert_eq!(me["name"], "Ada");
}

#[tokio::test]
async fn posts_json_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/1.0/tasks"))
        .and(body_json(json!({"data": {"name": "Ship", "workspace": "1001"}})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {"gid": "55", "name": "Ship"}
        })))
        .mount(&server)
        .await;

    let client = AsanaClient::new(&config_for(&server)).unwrap();
    let task = client
        .tasks()
        .create(json!({"name": "Ship", "workspace": "1001"}), RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(task["gid"], "55");
}

#[tokio::test]
async fn full_shape_reports_headers_and_reason() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/1.0/workspaces"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Request-Id", "abc")
                .set_body_json(json!({"data": []})),
        )
        .mount(&server)
        .await;

    let client = AsanaClient::new(&config_for(&server)).unwrap();
    let output = client
        .pipeline()
        .execute(
            HttpMethod::Get,
            "workspaces",
            RequestOptions::new(),
            ResponseShape::Full,
        )
        .await
        .unwrap()
        .into_json();

    assert_eq!(output["status"], 200);
    assert_eq!(output["reason"], "OK");
    assert_eq!(output["headers"]["x-request-id"], "abc");
    assert_eq!(output["body"], json!({"data": []}));
    assert!(output["request"].get("headers").is_none());
}

#[tokio::test]
async fn retries_after_429_from_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/1.0/projects/7"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "0")
                .set_body_json(json!({"errors": [{"message": "Rate limit exceeded"}]})),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/1.0/projects/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"gid": "7"}})))
        .mount(&server)
        .await;

    let client = AsanaClient::new(&config_for(&server)).unwrap();
    let project = client
        .projects()
        .get("7", RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(project["gid"], "7");
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn status_errors_carry_upstream_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/1.0/tags/9"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "errors": [{"message": "Forbidden", "help": "Ask a workspace admin"}]
        })))
        .mount(&server)
        .await;

    let client = AsanaClient::new(&config_for(&server)).unwrap();
    let err = client.tags().delete("9").await.unwrap_err();

    assert_eq!(err.code(), 403);
    assert_eq!(
        err.message(),
        "DELETE /tags/9 failed with status 403: Forbidden (Ask a workspace admin)"
    );
}

#[tokio::test]
async fn connection_failure_is_a_redacted_transport_error() {
    let server = MockServer::start().await;
    let config = config_for(&server).with_request_timeout(Duration::from_secs(2));
    drop(server);

    let transport = ReqwestTransport::new(&config).unwrap();
    let request = TransportRequest::new(HttpMethod::Get, "users/me", RequestOptions::new()).unwrap();
    let err = transport.send(&request).await.unwrap_err().into_api_error();

    assert_eq!(err.error_code(), ErrorCode::Transport);
    assert!(!err.to_string().contains(TOKEN));
    assert!(!format!("{err:?}").contains(TOKEN));
}

#[tokio::test]
async fn uploads_multipart_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/1.0/attachments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"gid": "77", "name": "notes.txt"}
        })))
        .mount(&server)
        .await;

    let client = AsanaClient::new(&config_for(&server)).unwrap();
    let attachment = client
        .attachments()
        .upload("42", "notes.txt", b"hello".to_vec(), "text/plain")
        .await
        .unwrap();
    assert_eq!(attachment["gid"], "77");

    let received = server.received_requests().await.unwrap();
    let content_type = received[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_owned();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&received[0].body);
    assert!(body.contains("name=\"parent\""));
    assert!(body.contains("filename=\"notes.txt\""));
}

#[tokio::test]
async fn scheme_relative_paths_never_leave_the_api_host() {
    let api = MockServer::start().await;
    let other = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/steal"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": "stolen"})))
        .mount(&other)
        .await;

    let client = AsanaClient::new(&config_for(&api)).unwrap();
    let other_host = other.uri().trim_start_matches("http://").to_owned();

    let err = client
        .pipeline()
        .execute(
            HttpMethod::Get,
            &format!("http:{other_host}/steal"),
            RequestOptions::new(),
            ResponseShape::Data,
        )
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::Validation);

    // A hand-built request skips path validation; the transport still refuses it
    let transport = ReqwestTransport::new(&config_for(&api)).unwrap();
    for hostile in [
        format!("http:{other_host}/steal"),
        format!("//{other_host}/steal"),
        "../../steal".to_owned(),
    ] {
        let request = TransportRequest {
            method: HttpMethod::Get,
            path: hostile.clone(),
            query: Vec::new(),
            body: RequestBody::Empty,
        };
        let err = transport.send(&request).await.unwrap_err();
        assert!(err.message().contains("outside the API base URL"), "{hostile}");
    }

    assert!(other.received_requests().await.unwrap().is_empty());
    assert!(api.received_requests().await.unwrap().is_empty());
}
