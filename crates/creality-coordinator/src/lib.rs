//! Printer-state synchronization for Creality K1-series printers.
//!
//! The [`PrinterCoordinator`] owns a supervised WebSocket connection to
//! the printer, normalizes whatever dialect the firmware speaks into the
//! canonical [`creality_core::PrinterState`], and publishes every change
//! to subscribers. Connection loss is routine: the loop retries forever
//! with a fixed delay and the last known state stays served.

mod connection;
mod publisher;

pub use connection::{PrinterCoordinator, RECONNECT_DELAY};
pub use publisher::StatePublisher;
