//! Supervised WebSocket connection.
//!
//! One background task owns the socket: connect, subscribe, consume
//! messages, and on any failure wait a fixed delay and start over. The
//! retry policy is unbounded on purpose; the printer may be powered off
//! for hours and the coordinator is expected to pick it back up.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

use creality_core::{PrinterConfig, PrinterState, StateUpdate};
use creality_protocol::{
    classify, flat_delta, moonraker_delta, subscribe_request, InboundFrame, PrinterCommand,
};

use crate::publisher::StatePublisher;

/// Fixed delay between reconnect attempts.
pub const RECONNECT_DELAY: Duration = Duration::from_secs(5);

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;

/// Write half of the active connection, `None` while disconnected.
type SharedSink = Arc<Mutex<Option<WsSink>>>;

/// Synchronizes printer state over the WebSocket API.
///
/// [`PrinterCoordinator::start`] launches the supervised connection loop;
/// state flows out through [`PrinterCoordinator::subscribe`] and
/// [`PrinterCoordinator::state`], commands flow in through
/// [`PrinterCoordinator::send_command`].
pub struct PrinterCoordinator {
    config: PrinterConfig,
    reconnect_delay: Duration,
    publisher: Arc<StatePublisher>,
    sink: SharedSink,
    running: Arc<AtomicBool>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl PrinterCoordinator {
    /// Creates a coordinator for one printer. Nothing connects until
    /// [`PrinterCoordinator::start`] is called.
    pub fn new(config: PrinterConfig) -> Self {
        Self {
            config,
            reconnect_delay: RECONNECT_DELAY,
            publisher: Arc::new(StatePublisher::new()),
            sink: Arc::new(Mutex::new(None)),
            running: Arc::new(AtomicBool::new(false)),
            task: Mutex::new(None),
        }
    }

    /// Overrides the fixed reconnect delay.
    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    /// Launches the supervised connection loop.
    ///
    /// Starting an already-running coordinator is a no-op.
    pub async fn start(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            return;
        }

        let worker = ConnectionLoop {
            ws_url: self.config.ws_url(),
            reconnect_delay: self.reconnect_delay,
            publisher: Arc::clone(&self.publisher),
            sink: Arc::clone(&self.sink),
            running: Arc::clone(&self.running),
        };
        *self.task.lock().await = Some(tokio::spawn(worker.run()));
    }

    /// Serializes one command onto the active connection.
    ///
    /// Returns false when no connection is open or the write fails. A
    /// failed command is not queued or retried; callers decide whether to
    /// resend.
    pub async fn send_command(&self, command: &PrinterCommand) -> bool {
        let mut guard = self.sink.lock().await;
        let Some(sink) = guard.as_mut() else {
            warn!("Cannot send command, WebSocket not connected: {:?}", command);
            return false;
        };

        let message = command.to_message();
        match sink.send(Message::Text(message.to_string())).await {
            Ok(()) => {
                debug!("Sent command: {}", message);
                true
            }
            Err(e) => {
                warn!("Failed to send command: {}", e);
                false
            }
        }
    }

    /// Clones the latest canonical state.
    pub async fn state(&self) -> PrinterState {
        self.publisher.snapshot().await
    }

    /// Whether any printer report has been applied yet.
    pub fn has_data(&self) -> bool {
        self.publisher.has_data()
    }

    /// Subscribes to state updates.
    pub fn subscribe(&self) -> broadcast::Receiver<StateUpdate> {
        self.publisher.subscribe()
    }

    /// Stops the loop and closes the connection.
    ///
    /// Safe to call repeatedly or before [`PrinterCoordinator::start`].
    /// After it returns no further messages are processed and no
    /// reconnect occurs.
    pub async fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);

        if let Some(mut sink) = self.sink.lock().await.take() {
            let _ = sink.close().await;
        }

        if let Some(task) = self.task.lock().await.take() {
            task.abort();
            // A JoinError here is the cancellation we just requested
            let _ = task.await;
        }
    }
}

/// State owned by the background connection task.
struct ConnectionLoop {
    ws_url: String,
    reconnect_delay: Duration,
    publisher: Arc<StatePublisher>,
    sink: SharedSink,
    running: Arc<AtomicBool>,
}

impl ConnectionLoop {
    async fn run(self) {
        while self.running.load(Ordering::SeqCst) {
            match connect_async(&self.ws_url).await {
                Ok((stream, _)) => {
                    info!("WebSocket connected to {}", self.ws_url);
                    self.drive(stream).await;
                    *self.sink.lock().await = None;
                }
                Err(e) => {
                    warn!("WebSocket connect to {} failed: {}", self.ws_url, e);
                }
            }

            if !self.running.load(Ordering::SeqCst) {
                break;
            }
            debug!("Reconnecting in {:?}", self.reconnect_delay);
            tokio::time::sleep(self.reconnect_delay).await;
        }
    }

    /// Subscribes and consumes one session until the connection ends.
    async fn drive(&self, stream: WsStream) {
        let (write, mut read) = stream.split();
        *self.sink.lock().await = Some(write);

        self.send_subscribe().await;

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => process_message(&self.publisher, &text).await,
                Ok(Message::Binary(bytes)) => {
                    // The firmware occasionally ships JSON in binary frames
                    match String::from_utf8(bytes) {
                        Ok(text) => process_message(&self.publisher, &text).await,
                        Err(_) => warn!("Discarding non-UTF-8 binary frame"),
                    }
                }
                Ok(Message::Close(_)) => {
                    info!("WebSocket closed by printer");
                    break;
                }
                // Ping/pong is answered by the transport
                Ok(_) => {}
                Err(e) => {
                    warn!("WebSocket disconnected: {}. Reconnecting...", e);
                    break;
                }
            }
        }
    }

    async fn send_subscribe(&self) {
        let request = subscribe_request().to_string();
        let mut guard = self.sink.lock().await;
        let Some(sink) = guard.as_mut() else {
            return;
        };
        if let Err(e) = sink.send(Message::Text(request)).await {
            warn!("Failed to send subscribe request: {}", e);
        }
    }
}

/// Classifies, normalizes and applies one raw frame.
///
/// Moonraker notifies need an existing baseline; the flat shape seeds the
/// initial state and notifies only ever merge into it. Nothing here
/// propagates an error: malformed input is logged and dropped.
async fn process_message(publisher: &StatePublisher, raw: &str) {
    match classify(raw) {
        Ok(InboundFrame::CrealityFlat(data)) => match flat_delta(&data) {
            Ok(delta) => {
                debug!("Received Creality format data");
                publisher.apply(&delta).await;
            }
            Err(e) => warn!("Discarding malformed Creality report: {}", e),
        },
        Ok(InboundFrame::MoonrakerNotify(status)) => {
            if publisher.has_data() {
                publisher.apply(&moonraker_delta(&status)).await;
            } else {
                debug!("Dropping Moonraker notify before first Creality report");
            }
        }
        Ok(InboundFrame::Unrecognized(_)) => {
            debug!("Ignoring unrecognized frame");
        }
        Err(e) => warn!("Failed to decode WebSocket message: {}", e),
    }
}
