// ABOUTME: Integration tests for the generic resource client
// ABOUTME: Path building, data envelopes, validation before network and uploads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Asana Client Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use asana_client::client::AsanaClient;
use asana_client::errors::ErrorCode;
use asana_client::http_client::{RequestBody, RequestOptions};
use asana_client::models::{HttpMethod, ResponseShape};
use asana_client::resources::ResourceKind;
use common::{json_response, RecordingSleeper, StubTransport};
use serde_json::json;

fn client_with(transport: &std::sync::Arc<StubTransport>) -> AsanaClient {
    AsanaClient::from_pipeline(common::pipeline(transport, &RecordingSleeper::new(), 3))
}

fn ok_transport() -> std::sync::Arc<StubTransport> {
    StubTransport::with_responses(vec![json_response(200, r#"{"data":{"gid":"42"}}"#)])
}

#[tokio::test]
async fn get_builds_item_path_with_opt_fields() {
    let transport = ok_transport();
    let client = client_with(&transport);

    let task = client
        .tasks()
        .get("42", RequestOptions::new().opt_fields(&["name", "assignee"]))
        .await
        .unwrap();

    assert_eq!(task, json!({"gid": "42"}));
    let request = transport.last_request();
    assert_eq!(request.method, HttpMethod::Get);
    assert_eq!(request.path, "tasks/42");
    assert_eq!(
        request.query,
        vec![("opt_fields".to_owned(), "name,assignee".to_owned())]
    );
}

#[tokio::test]
async fn users_accept_me_and_others_do_not() {
    let transport = ok_transport();
    let client = client_with(&transport);

    client.users().get("me", RequestOptions::new()).await.unwrap();
    assert_eq!(transport.last_request().path, "users/me");

    let err = client
        .projects()
        .get("me", RequestOptions::new())
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::Validation);
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn malformed_gids_never_reach_the_network() {
    let transport = ok_transport();
    let client = client_with(&transport);

    for gid in ["", "   ", "12a", "../users/me", "1 2"] {
        let err = client.tasks().delete(gid).await.unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::Validation, "gid {gid:?}");
        assert_eq!(err.code(), 0);
    }
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn create_wraps_payload_in_data_envelope() {
    let transport = ok_transport();
    let client = client_with(&transport);

    client
        .tasks()
        .create(json!({"name": "Ship it", "workspace": "1001"}), RequestOptions::new())
        .await
        .unwrap();

    let request = transport.last_request();
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.path, "tasks");
    assert_eq!(
        request.body,
        RequestBody::Json(json!({"data": {"name": "Ship it", "workspace": "1001"}}))
    );
}

#[tokio::test]
async fn create_checks_required_fields() {
    let transport = ok_transport();
    let client = client_with(&transport);

    let err = client
        .tasks()
        .create(json!({"name": "Orphan"}), RequestOptions::new())
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::Validation);

    let err = client
        .goals()
        .create(json!({"name": "Grow"}), RequestOptions::new())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "invalid workspace: is required");

    let err = client
        .stories()
        .create(json!({"text": "hi"}), RequestOptions::new())
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::Validation);

    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn update_rejects_empty_payloads() {
    let transport = ok_transport();
    let client = client_with(&transport);

    let err = client
        .projects()
        .update("7", json!({}), RequestOptions::new())
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::Validation);

    client
        .projects()
        .update("7", json!({"archived": true}), RequestOptions::new())
        .await
        .unwrap();
    let request = transport.last_request();
    assert_eq!(request.method, HttpMethod::Put);
    assert_eq!(request.path, "projects/7");
}

#[tokio::test]
async fn related_collections_and_actions() {
    let transport = ok_transport();
    let client = client_with(&transport);

    client
        .projects()
        .list_related("7", "tasks", RequestOptions::new().query("limit", 50u32))
        .await
        .unwrap();
    let request = transport.last_request();
    assert_eq!(request.path, "projects/7/tasks");
    assert_eq!(request.query, vec![("limit".to_owned(), "50".to_owned())]);

    client
        .projects()
        .create_related("7", "sections", json!({"name": "Backlog"}), RequestOptions::new())
        .await
        .unwrap();
    assert_eq!(transport.last_request().path, "projects/7/sections");

    client
        .tasks()
        .action("42", "addProject", json!({"project": "7"}))
        .await
        .unwrap();
    let request = transport.last_request();
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.path, "tasks/42/addProject");
    assert_eq!(request.body, RequestBody::Json(json!({"data": {"project": "7"}})));

    let err = client
        .tasks()
        .action("42", "../../users", json!({}))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::Validation);
}

#[tokio::test]
async fn upload_sends_multipart_to_attachments() {
    let transport = ok_transport();
    let client = client_with(&transport);

    client
        .attachments()
        .upload("42", "notes.txt", b"hello".to_vec(), "text/plain")
        .await
        .unwrap();

    let request = transport.last_request();
    assert_eq!(request.path, "attachments");
    let RequestBody::Multipart(fields) = request.body else {
        panic!("expected a multipart body");
    };
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].name, "parent");
    assert_eq!(fields[0].content, b"42");
    assert_eq!(fields[1].file_name.as_deref(), Some("notes.txt"));
    assert_eq!(fields[1].content_type.as_deref(), Some("text/plain"));

    let err = client
        .tasks()
        .upload("42", "notes.txt", Vec::new(), "text/plain")
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::Validation);
}

#[tokio::test]
async fn list_and_shape_override() {
    let transport = StubTransport::with_responses(vec![json_response(
        200,
        r#"{"data":[{"gid":"1"},{"gid":"2"}],"next_page":null}"#,
    )]);
    let client = client_with(&transport);

    let tags = client
        .resource(ResourceKind::Tags)
        .list(RequestOptions::new().query("workspace", "1001"))
        .await
        .unwrap();
    assert_eq!(tags.as_array().map(Vec::len), Some(2));

    let page = client
        .tags()
        .with_shape(ResponseShape::Normal)
        .list(RequestOptions::new())
        .await
        .unwrap();
    assert!(page.get("next_page").is_some());
}
