//! HTTP collaborators for Creality printers.
//!
//! Everything the printer serves outside the WebSocket: reachability
//! probes used to validate a configured host, webcam snapshots from the
//! mjpg-streamer service, and the current print's preview image.

mod client;
mod error;
mod preview;

pub use client::PrinterWebClient;
pub use error::HttpError;
pub use preview::PreviewCache;
