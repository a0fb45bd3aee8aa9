//! Entity descriptors for the canonical printer state.
//!
//! Each module holds one closed descriptor table: a key enum plus pure
//! functions from [`creality_core::PrinterState`] to displayed values,
//! and from user intent to [`creality_protocol::PrinterCommand`]s.
//! Nothing here talks to the printer; consumers pair these tables with a
//! coordinator.

mod binary_sensor;
mod button;
mod number;
mod sensor;
mod switch;

pub use binary_sensor::BinarySensorKey;
pub use button::ButtonKey;
pub use number::NumberKey;
pub use sensor::{format_duration, SensorKey};
pub use switch::SwitchKey;
