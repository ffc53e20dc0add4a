//! End-to-end client tests against the scripted gateway

use integration_tests::fixtures;
use integration_tests::helpers::{wait_until, ScriptedGateway};
use std::time::Duration;
use tracker_client::{ClientConfig, FlightTracker};

/// Window in which a (suppressed) reconnect would have shown up
const RETRY_OBSERVATION_WINDOW: Duration = Duration::from_millis(300);

fn test_config(url: String) -> ClientConfig {
    let mut config = ClientConfig::new(url, "2063935J", "clementestreeter");
    config.reconnect_delay_ms = 50;
    config
}

#[tokio::test]
async fn test_connect_delivers_snapshot_state() {
    let mut gateway = ScriptedGateway::start().await.unwrap();
    let tracker = FlightTracker::new(&test_config(gateway.url()));

    tracker.connect();
    gateway.wait_for_connection().await.unwrap();
    assert!(wait_until(|| tracker.is_connected()).await);

    gateway.send_json(fixtures::flights_snapshot("F1"));
    assert!(wait_until(|| tracker.flights().len() == 1).await);

    assert_eq!(tracker.airports().len(), 2);
    assert_eq!(tracker.routes().len(), 1);
    assert!(tracker.live_planes().is_empty());

    tracker.disconnect();
}

#[tokio::test]
async fn test_join_before_open_sent_once_per_establishment() {
    let mut gateway = ScriptedGateway::start().await.unwrap();
    let tracker = FlightTracker::new(&test_config(gateway.url()));

    // Several joins before the socket is ready: only the last identity is
    // announced, exactly once, when the connection opens
    tracker.join("2063935J", "first");
    tracker.join("2063935J", "second");
    tracker.connect();

    gateway.wait_for_connection().await.unwrap();
    let frame = gateway.next_client_frame().await.unwrap();
    assert_eq!(frame["type"], "join");
    assert_eq!(frame["id"], "2063935J");
    assert_eq!(frame["username"], "second");

    assert!(gateway.expect_no_client_frame(RETRY_OBSERVATION_WINDOW).await);

    tracker.disconnect();
}

#[tokio::test]
async fn test_rejoin_after_abnormal_drop() {
    let mut gateway = ScriptedGateway::start().await.unwrap();
    let tracker = FlightTracker::new(&test_config(gateway.url()));

    tracker.join("2063935J", "clementestreeter");
    tracker.connect();

    gateway.wait_for_connection().await.unwrap();
    let first_join = gateway.next_client_frame().await.unwrap();
    assert_eq!(first_join["type"], "join");

    // Abnormal closure: the client must retry and re-announce itself
    gateway.drop_connection();
    gateway.wait_for_connection().await.unwrap();

    let second_join = gateway.next_client_frame().await.unwrap();
    assert_eq!(second_join["type"], "join");
    assert_eq!(second_join["username"], "clementestreeter");

    tracker.disconnect();
}

#[tokio::test]
async fn test_disconnect_suppresses_retry() {
    let mut gateway = ScriptedGateway::start().await.unwrap();
    let tracker = FlightTracker::new(&test_config(gateway.url()));

    tracker.connect();
    gateway.wait_for_connection().await.unwrap();
    assert!(wait_until(|| tracker.is_connected()).await);

    tracker.disconnect();

    assert!(wait_until(|| !tracker.is_connected()).await);
    assert!(gateway.expect_no_connection(RETRY_OBSERVATION_WINDOW).await);
}

#[tokio::test]
async fn test_connect_is_idempotent() {
    let mut gateway = ScriptedGateway::start().await.unwrap();
    let tracker = FlightTracker::new(&test_config(gateway.url()));

    tracker.connect();
    tracker.connect();
    gateway.wait_for_connection().await.unwrap();
    assert!(wait_until(|| tracker.is_connected()).await);

    // Connecting while open is also a no-op
    tracker.connect();

    assert!(gateway.expect_no_connection(RETRY_OBSERVATION_WINDOW).await);

    tracker.disconnect();
}

#[tokio::test]
async fn test_server_normal_close_does_not_retry() {
    let mut gateway = ScriptedGateway::start().await.unwrap();
    let tracker = FlightTracker::new(&test_config(gateway.url()));

    tracker.connect();
    gateway.wait_for_connection().await.unwrap();
    assert!(wait_until(|| tracker.is_connected()).await);

    gateway.close(1000);

    assert!(wait_until(|| !tracker.is_connected()).await);
    assert!(gateway.expect_no_connection(RETRY_OBSERVATION_WINDOW).await);
}

#[tokio::test]
async fn test_server_coded_close_triggers_retry() {
    let mut gateway = ScriptedGateway::start().await.unwrap();
    let tracker = FlightTracker::new(&test_config(gateway.url()));

    tracker.connect();
    gateway.wait_for_connection().await.unwrap();

    gateway.close(1001);

    // Any non-1000 close code reconnects after the fixed delay
    gateway.wait_for_connection().await.unwrap();
    assert!(wait_until(|| tracker.is_connected()).await);

    tracker.disconnect();
}

#[tokio::test]
async fn test_chat_roundtrip() {
    let mut gateway = ScriptedGateway::start().await.unwrap();
    let tracker = FlightTracker::new(&test_config(gateway.url()));

    tracker.connect();
    gateway.wait_for_connection().await.unwrap();
    assert!(wait_until(|| tracker.is_connected()).await);

    tracker.send_chat("hello tower").unwrap();
    let frame = gateway.next_client_frame().await.unwrap();
    assert_eq!(frame["type"], "chat");
    assert_eq!(frame["content"], "hello tower");

    gateway.send_json(fixtures::message_frame("tower", "roger"));
    assert!(wait_until(|| tracker.messages().len() == 1).await);
    assert_eq!(tracker.messages()[0].name, "tower");

    tracker.disconnect();
}

#[tokio::test]
async fn test_malformed_frame_is_isolated() {
    let mut gateway = ScriptedGateway::start().await.unwrap();
    let tracker = FlightTracker::new(&test_config(gateway.url()));

    tracker.connect();
    gateway.wait_for_connection().await.unwrap();
    assert!(wait_until(|| tracker.is_connected()).await);

    gateway.send_json("this is not json");
    gateway.send_json(r#"{"type":"orbit","flight_id":"F1"}"#);
    gateway.send_json(fixtures::message_frame("tower", "still here"));

    // The bad frames are dropped; the connection and later frames survive
    assert!(wait_until(|| tracker.messages().len() == 1).await);
    assert!(tracker.is_connected());

    tracker.disconnect();
}

#[tokio::test]
async fn test_landing_is_sticky_end_to_end() {
    let mut gateway = ScriptedGateway::start().await.unwrap();
    let tracker = FlightTracker::new(&test_config(gateway.url()));

    tracker.connect();
    gateway.wait_for_connection().await.unwrap();
    assert!(wait_until(|| tracker.is_connected()).await);

    gateway.send_json(fixtures::flights_snapshot("F1"));
    gateway.send_json(fixtures::plane_frame("F1", "take-off"));
    gateway.send_json(fixtures::take_off_frame("F1"));
    gateway.send_json(fixtures::landing_frame("F1"));
    assert!(wait_until(|| {
        tracker
            .routes()
            .get("F1")
            .is_some_and(tracker_client::state::FlightRoute::is_landed)
    })
    .await);

    // A later snapshot reasserting in-progress must not regress the route.
    // The chat frame is a sentinel proving the reassertion was processed.
    gateway.send_json(fixtures::flights_snapshot("F1"));
    gateway.send_json(fixtures::plane_frame("F1", "in-progress"));
    gateway.send_json(fixtures::message_frame("tower", "done"));
    assert!(wait_until(|| tracker.messages().len() == 1).await);

    assert!(tracker.routes()["F1"].is_landed());
    assert_eq!(tracker.live_planes()["F1"].plane.status, tracker_core::PlaneStatus::InProgress);
    assert_eq!(tracker.events().len(), 2);

    tracker.disconnect();
}
