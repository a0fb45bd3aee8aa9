//! Inbound frame classification.
//!
//! K1-series firmware speaks two shapes over the same socket: Moonraker
//! style `notify` envelopes and a Creality-specific flat report. The
//! firmware carries no version marker, so the shape is detected by key
//! probing. Classification happens once, here; normalizers consume a
//! closed tagged type instead of raw maps.

use serde_json::{Map, Value};

use crate::wire::METHOD_NOTIFY;

/// Top-level keys whose presence marks the Creality flat shape.
const FLAT_MARKER_KEYS: [&str; 3] = ["nozzleTemp", "bedTemp0", "TotalLayer"];

/// One parsed inbound message, tagged by recognized shape.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundFrame {
    /// Creality flat report, detected by its marker keys.
    CrealityFlat(Map<String, Value>),
    /// Moonraker `notify` envelope; holds the status object from `params[0]`.
    MoonrakerNotify(Map<String, Value>),
    /// Valid JSON matching neither shape, e.g. RPC responses.
    Unrecognized(Value),
}

/// Classifies one raw text frame.
///
/// The flat probe runs first: a frame carrying both a marker key and a
/// `notify` envelope is treated as flat. Returns an error only when the
/// frame is not valid JSON.
pub fn classify(raw: &str) -> Result<InboundFrame, serde_json::Error> {
    let value: Value = serde_json::from_str(raw)?;

    let Some(object) = value.as_object() else {
        return Ok(InboundFrame::Unrecognized(value));
    };

    if FLAT_MARKER_KEYS.iter().any(|key| object.contains_key(*key)) {
        return Ok(InboundFrame::CrealityFlat(object.clone()));
    }

    if object.get("method").and_then(Value::as_str) == Some(METHOD_NOTIFY) {
        if let Some(status) = object
            .get("params")
            .and_then(Value::as_array)
            .and_then(|params| params.first())
            .and_then(Value::as_object)
        {
            return Ok(InboundFrame::MoonrakerNotify(status.clone()));
        }
    }

    Ok(InboundFrame::Unrecognized(value))
}
