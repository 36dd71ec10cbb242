//! Poll-loop state machine tests against a mocked status endpoint.

use glide_relay::StatusPoller;
use glide_types::GlideError;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INTERVAL: Duration = Duration::from_millis(10);

fn status_body(status: &str) -> serde_json::Value {
    json!({ "status": status })
}

#[tokio::test]
async fn poller_waits_through_pending_and_returns_on_success() {
    let server = MockServer::start().await;

    // Two pending snapshots, then a terminal success.
    Mock::given(method("GET"))
        .and(path("/intents/status/v3"))
        .and(query_param("requestId", "R1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body("pending")))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/intents/status/v3"))
        .and(query_param("requestId", "R1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "inTxHashes": ["0xaaa1"],
            "txHashes": ["0xbbb2", "0xbbb3"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let poller = StatusPoller::new(&server.uri(), None);
    let snapshot = poller.poll_until_terminal("R1", INTERVAL, 10).await.unwrap();
    assert_eq!(snapshot.destination_tx_hash(), Some("0xbbb2"));
}

#[tokio::test]
async fn poller_times_out_when_no_terminal_status_arrives() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/intents/status/v3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body("pending")))
        .expect(3)
        .mount(&server)
        .await;

    let poller = StatusPoller::new(&server.uri(), None);
    let err = poller.poll_until_terminal("R1", INTERVAL, 3).await.unwrap_err();
    match err {
        GlideError::PollTimeout { attempts } => assert_eq!(attempts, 3),
        other => panic!("expected PollTimeout, got {:?}", other),
    }
}

#[tokio::test]
async fn failure_status_stops_polling_immediately() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/intents/status/v3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body("failure")))
        .expect(1)
        .mount(&server)
        .await;

    let poller = StatusPoller::new(&server.uri(), None);
    let err = poller.poll_until_terminal("R1", INTERVAL, 10).await.unwrap_err();
    match err {
        GlideError::RelayExecutionFailed { status } => assert_eq!(status, "failure"),
        other => panic!("expected RelayExecutionFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn refund_is_a_terminal_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/intents/status/v3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body("refund")))
        .expect(1)
        .mount(&server)
        .await;

    let poller = StatusPoller::new(&server.uri(), None);
    let err = poller.poll_until_terminal("R1", INTERVAL, 10).await.unwrap_err();
    assert!(matches!(err, GlideError::RelayExecutionFailed { ref status } if status == "refund"));
}

#[tokio::test]
async fn waiting_and_submitted_are_not_terminal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/intents/status/v3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body("waiting")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/intents/status/v3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body("submitted")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/intents/status/v3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body("success")))
        .mount(&server)
        .await;

    let poller = StatusPoller::new(&server.uri(), None);
    let snapshot = poller.poll_until_terminal("R1", INTERVAL, 10).await.unwrap();
    assert_eq!(snapshot.status.to_string(), "success");
}
