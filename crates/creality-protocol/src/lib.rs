//! Wire protocol for Creality K1-series printers.
//!
//! The printer speaks JSON over a single WebSocket, mixing two dialects:
//! Moonraker-style JSON-RPC and a Creality-specific flat report. This
//! crate owns everything about that wire format: the outbound subscribe
//! and command envelopes, inbound frame classification, and the pure
//! normalizers that turn either dialect into a [`creality_core::StateDelta`].
//!
//! Nothing here performs I/O; the coordinator drives the socket.

mod command;
mod frame;
mod normalize;
mod wire;

pub use command::{
    PrinterCommand, PARAM_AUXILIARY_FAN, PARAM_BED_TARGET_TEMP, PARAM_CASE_FAN, PARAM_FAN,
    PARAM_GCODE, PARAM_LIGHT_SW, PARAM_NOZZLE_TARGET_TEMP, PARAM_PAUSE, PARAM_STOP,
};
pub use frame::{classify, InboundFrame};
pub use normalize::{flat_delta, moonraker_delta, NormalizeError};
pub use wire::{
    set_request, subscribe_request, METHOD_NOTIFY, METHOD_SET, METHOD_SUBSCRIBE,
    SUBSCRIBED_OBJECTS,
};
