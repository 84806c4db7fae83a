//! Integration tests for the GitHub label client against a mock API.

use std::time::Duration;

use lifecycle::{
    handle_comment, CommentEvent, GitHubLabelClient, ItemRef, LabelClient, LabelClientError,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LABELS_PATH: &str = "/repos/acme/widgets/issues/42/labels";

fn client(server: &MockServer) -> GitHubLabelClient {
    GitHubLabelClient::new("test-token", server.uri(), Duration::from_secs(5)).unwrap()
}

fn item() -> ItemRef {
    ItemRef::new("acme", "widgets", 42)
}

fn labels_json(names: &[&str]) -> serde_json::Value {
    json!(names
        .iter()
        .map(|name| json!({ "id": 1, "name": name, "color": "ededed" }))
        .collect::<Vec<_>>())
}

async fn mount_labels(server: &MockServer, names: &[&str]) {
    Mock::given(method("GET"))
        .and(path(LABELS_PATH))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(labels_json(names)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_labels_sends_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LABELS_PATH))
        .and(header("authorization", "Bearer test-token"))
        .and(query_param("per_page", "100"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(labels_json(&["bug", "lifecycle/stale"])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let labels = client(&server).fetch_labels(&item()).await.unwrap();
    assert_eq!(labels, vec!["bug", "lifecycle/stale"]);
}

#[tokio::test]
async fn test_fetch_labels_follows_pages() {
    let server = MockServer::start().await;
    let first_page: Vec<String> = (0..100).map(|i| format!("label-{i}")).collect();
    let first_refs: Vec<&str> = first_page.iter().map(String::as_str).collect();

    mount_labels(&server, &first_refs).await;
    Mock::given(method("GET"))
        .and(path(LABELS_PATH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(labels_json(&["lifecycle/rotten"])))
        .expect(1)
        .mount(&server)
        .await;

    let labels = client(&server).fetch_labels(&item()).await.unwrap();
    assert_eq!(labels.len(), 101);
    assert_eq!(labels.last().map(String::as_str), Some("lifecycle/rotten"));
}

#[tokio::test]
async fn test_add_label_posts_single_label() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LABELS_PATH))
        .and(body_json(json!({ "labels": ["lifecycle/frozen"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(labels_json(&["lifecycle/frozen"])))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .add_label(&item(), "lifecycle/frozen")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_remove_label_encodes_name() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("{LABELS_PATH}/lifecycle%2Fstale")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .remove_label(&item(), "lifecycle/stale")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_api_error_carries_status_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Label does not exist" })),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .remove_label(&item(), "lifecycle/stale")
        .await
        .unwrap_err();
    match err {
        LabelClientError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Label does not exist");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_exhausted_rate_limit() {
    let server = MockServer::start().await;
    let reset = chrono::Utc::now().timestamp() + 120;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-ratelimit-remaining", "0")
                .insert_header("x-ratelimit-reset", reset.to_string().as_str())
                .set_body_json(json!({ "message": "API rate limit exceeded" })),
        )
        .mount(&server)
        .await;

    let err = client(&server).fetch_labels(&item()).await.unwrap_err();
    match err {
        LabelClientError::RateLimited { reset_in } => {
            assert!(reset_in <= Duration::from_secs(120));
            assert!(reset_in >= Duration::from_secs(100));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_comment_moves_stale_to_rotten() {
    let server = MockServer::start().await;
    mount_labels(&server, &["lifecycle/stale", "kind/bug"]).await;
    Mock::given(method("DELETE"))
        .and(path(format!("{LABELS_PATH}/lifecycle%2Fstale")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(LABELS_PATH))
        .and(body_json(json!({ "labels": ["lifecycle/rotten"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let event = CommentEvent::created(item(), "/lifecycle rotten", "octocat");
    let applied = handle_comment(&client(&server), &event).await.unwrap();
    assert_eq!(applied, 1);
}

#[tokio::test]
async fn test_comment_remove_failure_is_surfaced() {
    let server = MockServer::start().await;
    mount_labels(&server, &["lifecycle/frozen"]).await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let event = CommentEvent::created(item(), "/remove-lifecycle frozen", "octocat");
    let err = handle_comment(&client(&server), &event)
        .await
        .unwrap_err();
    assert!(matches!(err, LabelClientError::Api { status: 500, ref message } if message == "upstream unavailable"));
}

#[tokio::test]
async fn test_comment_add_failure_is_absorbed() {
    let server = MockServer::start().await;
    mount_labels(&server, &[]).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({ "message": "Validation Failed" })))
        .expect(1)
        .mount(&server)
        .await;

    let event = CommentEvent::created(item(), "/lifecycle active", "octocat");
    assert_eq!(handle_comment(&client(&server), &event).await.unwrap(), 1);
}
