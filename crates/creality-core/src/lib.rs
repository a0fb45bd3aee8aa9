//! Core types shared by the Creality printer stack.
//!
//! This crate defines the canonical [`PrinterState`] record, the sparse
//! [`StateDelta`] fragment that normalized messages merge into it, and the
//! [`PrinterConfig`] connection settings used by the coordinator and the
//! HTTP collaborators.

mod config;
mod delta;
mod state;

pub use config::{PrinterConfig, DEFAULT_CAMERA_PORT, DEFAULT_PORT, DEFAULT_WS_PORT};
pub use delta::StateDelta;
pub use state::{PrintState, PrinterState, StateUpdate};

/// Manufacturer of the supported printers.
pub const MANUFACTURER: &str = "Creality";

/// Printer model this stack targets.
pub const MODEL: &str = "K1 Max";
