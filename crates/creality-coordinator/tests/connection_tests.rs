//! Connection lifecycle tests against a local mock printer.

use std::time::{Duration, Instant};

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;

use creality_coordinator::PrinterCoordinator;
use creality_core::{PrintState, PrinterConfig};
use creality_protocol::PrinterCommand;

/// Compressed reconnect delay so tests finish quickly.
const TEST_DELAY: Duration = Duration::from_millis(100);

/// Upper bound on anything that should happen promptly.
const WAIT: Duration = Duration::from_secs(5);

/// What the mock printer observed, in order.
#[derive(Debug)]
enum ServerEvent {
    /// TCP connection dropped before the WebSocket handshake
    Refused(Instant),
    /// WebSocket handshake started
    Connected(Instant),
    /// Text frame received from the coordinator
    Frame(Value),
}

fn printer_config(port: u16) -> PrinterConfig {
    let mut config = PrinterConfig::new("127.0.0.1");
    config.ws_port = port;
    config
}

async fn next_event(events: &mut mpsc::UnboundedReceiver<ServerEvent>) -> ServerEvent {
    timeout(WAIT, events.recv())
        .await
        .expect("timed out waiting for server event")
        .expect("mock printer ended early")
}

/// Serves one WebSocket session: records every text frame and answers the
/// first one (the subscribe request) with the given outbound frames.
async fn serve_session(
    listener: &TcpListener,
    events: &mpsc::UnboundedSender<ServerEvent>,
    outbound: &[String],
) {
    let (socket, _) = listener.accept().await.unwrap();
    let _ = events.send(ServerEvent::Connected(Instant::now()));
    let mut ws = tokio_tungstenite::accept_async(socket).await.unwrap();

    let mut answered = false;
    while let Some(Ok(message)) = ws.next().await {
        if let Message::Text(text) = message {
            let _ = events.send(ServerEvent::Frame(serde_json::from_str(&text).unwrap()));
            if !answered {
                answered = true;
                for frame in outbound {
                    ws.send(Message::Text(frame.clone())).await.unwrap();
                }
            }
        }
    }
}

#[tokio::test]
async fn test_reconnect_after_failure_subscribes_once() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let (events_tx, mut events) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        // First attempt: drop the socket before the handshake completes
        let (socket, _) = listener.accept().await.unwrap();
        let _ = events_tx.send(ServerEvent::Refused(Instant::now()));
        drop(socket);

        // Second attempt: serve normally
        serve_session(&listener, &events_tx, &[]).await;
    });

    let coordinator =
        PrinterCoordinator::new(printer_config(port)).with_reconnect_delay(TEST_DELAY);
    coordinator.start().await;

    let ServerEvent::Refused(refused_at) = next_event(&mut events).await else {
        panic!("expected the refused connection first");
    };
    let ServerEvent::Connected(connected_at) = next_event(&mut events).await else {
        panic!("expected the successful connection second");
    };

    // Exactly one fixed delay between the failed and the successful attempt
    let gap = connected_at.duration_since(refused_at);
    assert!(gap >= TEST_DELAY, "reconnected too early: {:?}", gap);
    assert!(gap < TEST_DELAY * 5, "reconnected too late: {:?}", gap);

    let ServerEvent::Frame(subscribe) = next_event(&mut events).await else {
        panic!("expected the subscribe request");
    };
    assert_eq!(subscribe["method"], "printer.objects.subscribe");
    assert_eq!(subscribe["jsonrpc"], "2.0");
    let objects = subscribe["params"]["objects"].as_object().unwrap();
    assert_eq!(objects.len(), 7);
    assert!(objects.contains_key("print_stats"));

    // The live session stays quiet: no second subscribe, no reconnect
    assert!(timeout(TEST_DELAY * 3, events.recv()).await.is_err());

    coordinator.stop().await;
}

#[tokio::test]
async fn test_state_updates_flow_from_the_printer() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let (events_tx, mut events) = mpsc::unbounded_channel();

    let flat = json!({
        "nozzleTemp": 210.07,
        "bedTemp0": 60.0,
        "TotalLayer": 100,
        "layer": 4,
    })
    .to_string();
    let notify = json!({
        "method": "notify",
        "params": [{
            "print_stats": { "state": "printing", "filename": "benchy.gcode" },
            "extruder": { "temperature": 210.12, "target": 210.0 },
            "virtual_sdcard": { "progress": 0.42 },
        }],
    })
    .to_string();

    tokio::spawn(async move {
        serve_session(&listener, &events_tx, &[flat, notify]).await;
    });

    let coordinator =
        PrinterCoordinator::new(printer_config(port)).with_reconnect_delay(TEST_DELAY);
    let mut updates = coordinator.subscribe();
    coordinator.start().await;

    let first = timeout(WAIT, updates.recv()).await.unwrap().unwrap();
    assert_eq!(first.old_state.nozzle_temp, 0.0);
    assert_eq!(first.new_state.nozzle_temp, 210.1);
    assert_eq!(first.new_state.total_layers, 100);

    let second = timeout(WAIT, updates.recv()).await.unwrap().unwrap();
    assert_eq!(second.new_state.state, PrintState::Printing);
    assert_eq!(second.new_state.progress, 42.0);
    assert_eq!(second.new_state.filename, "benchy.gcode");
    assert_eq!(second.new_state.nozzle_temp, 210.1);
    // Layer counters come only from the flat shape and survive the notify
    assert_eq!(second.new_state.total_layers, 100);
    assert_eq!(second.new_state.current_layer, 4);

    assert_eq!(coordinator.state().await, second.new_state);
    assert!(coordinator.has_data());

    // Consume the subscribe frame the mock recorded
    let _ = next_event(&mut events).await;
    let _ = next_event(&mut events).await;

    coordinator.stop().await;
}

#[tokio::test]
async fn test_binary_frames_flow_like_text() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(socket).await.unwrap();

        // Answer the subscribe request with binary frames: a flat report,
        // bytes that are not UTF-8, then another report
        let _subscribe = ws.next().await;
        ws.send(Message::Binary(
            br#"{"nozzleTemp": 210.0, "bedTemp0": 60.0}"#.to_vec(),
        ))
        .await
        .unwrap();
        ws.send(Message::Binary(vec![0xff, 0xfe, 0x80]))
            .await
            .unwrap();
        ws.send(Message::Binary(br#"{"bedTemp0": 61.5}"#.to_vec()))
            .await
            .unwrap();

        while let Some(Ok(_)) = ws.next().await {}
    });

    let coordinator =
        PrinterCoordinator::new(printer_config(port)).with_reconnect_delay(TEST_DELAY);
    let mut updates = coordinator.subscribe();
    coordinator.start().await;

    let first = timeout(WAIT, updates.recv()).await.unwrap().unwrap();
    assert_eq!(first.new_state.nozzle_temp, 210.0);
    assert_eq!(first.new_state.bed_temp, 60.0);

    // The non-UTF-8 frame yields nothing and the session survives it
    let second = timeout(WAIT, updates.recv()).await.unwrap().unwrap();
    assert_eq!(second.new_state.bed_temp, 61.5);
    assert_eq!(second.new_state.nozzle_temp, 210.0);
    assert!(timeout(TEST_DELAY, updates.recv()).await.is_err());

    coordinator.stop().await;
}

#[tokio::test]
async fn test_send_command_without_connection_fails_soft() {
    let coordinator = PrinterCoordinator::new(PrinterConfig::new("127.0.0.1"));

    // Never started: no connection, no panic, just a refusal
    assert!(
        !coordinator
            .send_command(&PrinterCommand::Light { on: true })
            .await
    );
}

#[tokio::test]
async fn test_send_command_reaches_the_wire() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let (events_tx, mut events) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        serve_session(&listener, &events_tx, &[]).await;
    });

    let coordinator =
        PrinterCoordinator::new(printer_config(port)).with_reconnect_delay(TEST_DELAY);
    coordinator.start().await;

    let ServerEvent::Connected(_) = next_event(&mut events).await else {
        panic!("expected a connection");
    };
    // The subscribe frame means the write half is installed
    let ServerEvent::Frame(_) = next_event(&mut events).await else {
        panic!("expected the subscribe request");
    };

    assert!(
        coordinator
            .send_command(&PrinterCommand::Light { on: true })
            .await
    );

    let ServerEvent::Frame(command) = next_event(&mut events).await else {
        panic!("expected the command frame");
    };
    assert_eq!(command, json!({ "method": "set", "params": { "lightSw": 1 } }));

    coordinator.stop().await;
}

#[tokio::test]
async fn test_start_twice_opens_one_connection() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let (events_tx, mut events) = mpsc::unbounded_channel();

    // Accept every connection attempt immediately so none go unnoticed
    let server = tokio::spawn(async move {
        loop {
            let (socket, _) = listener.accept().await.unwrap();
            let _ = events_tx.send(ServerEvent::Connected(Instant::now()));
            tokio::spawn(async move {
                if let Ok(mut ws) = tokio_tungstenite::accept_async(socket).await {
                    while let Some(Ok(_)) = ws.next().await {}
                }
            });
        }
    });

    let coordinator =
        PrinterCoordinator::new(printer_config(port)).with_reconnect_delay(TEST_DELAY);
    coordinator.start().await;
    coordinator.start().await;

    let ServerEvent::Connected(_) = next_event(&mut events).await else {
        panic!("expected a connection");
    };
    assert!(
        timeout(TEST_DELAY * 3, events.recv()).await.is_err(),
        "second start opened another connection"
    );

    coordinator.stop().await;
    server.abort();
}

#[tokio::test]
async fn test_stop_is_idempotent_and_final() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let (events_tx, mut events) = mpsc::unbounded_channel();

    let server = tokio::spawn(async move {
        loop {
            let (socket, _) = listener.accept().await.unwrap();
            let _ = events_tx.send(ServerEvent::Connected(Instant::now()));
            tokio::spawn(async move {
                if let Ok(mut ws) = tokio_tungstenite::accept_async(socket).await {
                    while let Some(Ok(_)) = ws.next().await {}
                }
            });
        }
    });

    let coordinator =
        PrinterCoordinator::new(printer_config(port)).with_reconnect_delay(TEST_DELAY);
    coordinator.start().await;
    let ServerEvent::Connected(_) = next_event(&mut events).await else {
        panic!("expected a connection");
    };

    coordinator.stop().await;
    coordinator.stop().await;

    assert!(!coordinator.send_command(&PrinterCommand::Pause).await);

    // No reconnect after stopping
    assert!(
        timeout(TEST_DELAY * 3, events.recv()).await.is_err(),
        "coordinator reconnected after stop"
    );

    server.abort();
}

#[tokio::test]
async fn test_stop_without_start_is_safe() {
    let coordinator = PrinterCoordinator::new(PrinterConfig::new("127.0.0.1"));
    coordinator.stop().await;
    coordinator.stop().await;
    assert_eq!(coordinator.state().await, Default::default());
}
