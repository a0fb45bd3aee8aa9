//! Printer connection settings.

use serde::{Deserialize, Serialize};

/// Default port of the HTTP API on K1-series firmware.
pub const DEFAULT_PORT: u16 = 9999;

/// Default port of the WebSocket API (shared with HTTP on stock firmware).
pub const DEFAULT_WS_PORT: u16 = 9999;

/// Default port of the mjpg-streamer webcam service.
pub const DEFAULT_CAMERA_PORT: u16 = 8080;

/// Connection settings for one printer.
///
/// Only `host` is required; the ports default to the values stock
/// firmware uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrinterConfig {
    /// Hostname or IP address of the printer
    pub host: String,
    /// HTTP API port
    #[serde(default = "default_port")]
    pub port: u16,
    /// WebSocket API port
    #[serde(default = "default_ws_port")]
    pub ws_port: u16,
    /// Webcam service port
    #[serde(default = "default_camera_port")]
    pub camera_port: u16,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_ws_port() -> u16 {
    DEFAULT_WS_PORT
}

fn default_camera_port() -> u16 {
    DEFAULT_CAMERA_PORT
}

impl PrinterConfig {
    /// Settings for `host` with the default ports.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            ws_port: DEFAULT_WS_PORT,
            camera_port: DEFAULT_CAMERA_PORT,
        }
    }

    /// WebSocket endpoint consumed by the coordinator.
    pub fn ws_url(&self) -> String {
        format!("ws://{}:{}/websocket", self.host, self.ws_port)
    }

    /// Base URL of the HTTP API.
    pub fn http_base(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Webcam still-image endpoint.
    pub fn snapshot_url(&self) -> String {
        format!("http://{}:{}/?action=snapshot", self.host, self.camera_port)
    }

    /// Webcam MJPEG stream endpoint.
    pub fn stream_url(&self) -> String {
        format!("http://{}:{}/?action=stream", self.host, self.camera_port)
    }

    /// Location of the current print's preview image.
    ///
    /// The firmware serves this from its plain web server, not from the
    /// API port.
    pub fn preview_url(&self) -> String {
        format!("http://{}/downloads/original/current_print_image.png", self.host)
    }
}
