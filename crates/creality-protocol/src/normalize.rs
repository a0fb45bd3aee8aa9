//! Message normalization.
//!
//! Pure mappings from one classified frame to a sparse [`StateDelta`].
//! The Moonraker mapping is infallible: absent or mistyped fields take
//! documented defaults. The Creality flat mapping is stricter: a key that
//! is present but unparsable fails the whole message, so a garbled report
//! never half-applies.

use serde_json::{Map, Value};
use thiserror::Error;

use creality_core::{PrintState, StateDelta};

/// Failure to extract a recognized field from a Creality flat report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("field '{field}' is not a number")]
    NotANumber { field: &'static str },

    #[error("field '{field}' is not an integer")]
    NotAnInteger { field: &'static str },

    #[error("field '{field}' is not a string")]
    NotAString { field: &'static str },

    #[error("no parsable value after '{label}' in curPosition")]
    BadAxisToken { label: &'static str },
}

// ============================================================================
// Moonraker notify shape
// ============================================================================

/// Normalizes a Moonraker `notify` status object.
///
/// The returned delta always sets the same field set, so consecutive
/// notifies replace each other's values instead of accumulating. Fields
/// outside that set (remaining time, auxiliary fans, layers, light) are
/// never touched; only the flat shape reports them.
pub fn moonraker_delta(status: &Map<String, Value>) -> StateDelta {
    let print_stats = sub_object(status, "print_stats");
    let toolhead = sub_object(status, "toolhead");
    let extruder = sub_object(status, "extruder");
    let heater_bed = sub_object(status, "heater_bed");
    let fan = sub_object(status, "fan");
    let gcode_move = sub_object(status, "gcode_move");
    let virtual_sdcard = sub_object(status, "virtual_sdcard");

    let position = toolhead
        .and_then(|o| o.get("position"))
        .and_then(Value::as_array);

    StateDelta {
        state: Some(
            str_field(print_stats, "state")
                .map(PrintState::from_moonraker)
                .unwrap_or_default(),
        ),
        filename: Some(str_field(print_stats, "filename").unwrap_or_default().to_string()),
        print_duration: Some(num_field(print_stats, "print_duration", 0.0)),
        total_duration: Some(num_field(print_stats, "total_duration", 0.0)),
        // The source reports a 0-1 fraction
        progress: Some(num_field(virtual_sdcard, "progress", 0.0) * 100.0),
        nozzle_temp: Some(round1(num_field(extruder, "temperature", 0.0))),
        nozzle_target: Some(round1(num_field(extruder, "target", 0.0))),
        bed_temp: Some(round1(num_field(heater_bed, "temperature", 0.0))),
        bed_target: Some(round1(num_field(heater_bed, "target", 0.0))),
        position_x: Some(round2(axis_element(position, 0))),
        position_y: Some(round2(axis_element(position, 1))),
        position_z: Some(round2(axis_element(position, 2))),
        // Reported in mm/min
        speed: Some(round2(num_field(gcode_move, "speed", 0.0) / 60.0)),
        speed_factor: Some((num_field(gcode_move, "speed_factor", 1.0) * 100.0).round() as u32),
        fan_speed: Some((num_field(fan, "speed", 0.0) * 100.0).round() as u32),
        ..StateDelta::default()
    }
}

fn sub_object<'a>(status: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    status.get(key).and_then(Value::as_object)
}

fn num_field(object: Option<&Map<String, Value>>, key: &str, default: f64) -> f64 {
    object
        .and_then(|o| o.get(key))
        .and_then(Value::as_f64)
        .unwrap_or(default)
}

fn str_field<'a>(object: Option<&'a Map<String, Value>>, key: &str) -> Option<&'a str> {
    object.and_then(|o| o.get(key)).and_then(Value::as_str)
}

fn axis_element(position: Option<&Vec<Value>>, index: usize) -> f64 {
    position
        .and_then(|p| p.get(index))
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}

// ============================================================================
// Creality flat shape
// ============================================================================

/// Normalizes a Creality flat report.
///
/// Only the keys present contribute to the delta. Numeric values may
/// arrive as JSON numbers or as numeric strings; the firmware mixes both.
pub fn flat_delta(data: &Map<String, Value>) -> Result<StateDelta, NormalizeError> {
    let mut delta = StateDelta::default();

    if let Some(value) = data.get("nozzleTemp") {
        delta.nozzle_temp = Some(round1(lenient_f64("nozzleTemp", value)?));
    }
    if let Some(value) = data.get("bedTemp0") {
        delta.bed_temp = Some(round1(lenient_f64("bedTemp0", value)?));
    }
    if let Some(value) = data.get("targetNozzleTemp") {
        delta.nozzle_target = Some(round1(lenient_f64("targetNozzleTemp", value)?));
    }
    if let Some(value) = data.get("targetBedTemp0") {
        delta.bed_target = Some(round1(lenient_f64("targetBedTemp0", value)?));
    }

    if let Some(value) = data.get("printProgress") {
        delta.progress = Some(round1(lenient_f64("printProgress", value)?));
    }
    if let Some(value) = data.get("printJobTime") {
        delta.print_duration = Some(lenient_i64("printJobTime", value)? as f64);
    }
    if let Some(value) = data.get("printLeftTime") {
        let left = lenient_i64("printLeftTime", value)?;
        delta.print_time_remaining = Some(left as f64);
        if let Some(job) = data.get("printJobTime") {
            // Summed in f64; oversized counters would wrap an i64 add
            delta.total_duration = Some(lenient_i64("printJobTime", job)? as f64 + left as f64);
        }
    }

    if let Some(value) = data.get("printFileName") {
        delta.filename = Some(file_basename(value));
    }

    // deviceState wins when both are present, even if unmappable
    if data.contains_key("state") || data.contains_key("deviceState") {
        let code = data
            .get("deviceState")
            .or_else(|| data.get("state"))
            .and_then(Value::as_i64);
        delta.state = Some(code.map(PrintState::from_code).unwrap_or_default());
    }

    if let Some(value) = data.get("curPosition") {
        let position = value
            .as_str()
            .ok_or(NormalizeError::NotAString { field: "curPosition" })?;
        delta.position_x = Some(round2(axis_token(position, "X:")?));
        delta.position_y = Some(round2(axis_token(position, "Y:")?));
        delta.position_z = Some(round2(axis_token(position, "Z:")?));
    }

    if let Some(value) = data.get("realTimeSpeed") {
        delta.speed = Some(round2(lenient_f64("realTimeSpeed", value)?));
    }
    if let Some(value) = data.get("curFeedratePct") {
        delta.speed_factor = Some(lenient_f64("curFeedratePct", value)?.round() as u32);
    }

    if let Some(value) = data.get("layer") {
        delta.current_layer = Some(clamp_u32(lenient_i64("layer", value)?));
    }
    if let Some(value) = data.get("TotalLayer") {
        delta.total_layers = Some(clamp_u32(lenient_i64("TotalLayer", value)?));
    }

    Ok(delta)
}

/// Extracts the number following `label` in a `curPosition` string.
///
/// The token runs from the label to the next whitespace. A missing label
/// reads as 0; a present label with no parsable token is an error. The
/// format is fixed by the firmware.
fn axis_token(position: &str, label: &'static str) -> Result<f64, NormalizeError> {
    let Some((_, rest)) = position.split_once(label) else {
        return Ok(0.0);
    };
    rest.split_whitespace()
        .next()
        .and_then(|token| token.parse::<f64>().ok())
        .ok_or(NormalizeError::BadAxisToken { label })
}

/// Parses a flat-report value that may be a JSON number or a numeric string.
fn lenient_f64(field: &'static str, value: &Value) -> Result<f64, NormalizeError> {
    match value {
        Value::Number(n) => n.as_f64().ok_or(NormalizeError::NotANumber { field }),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| NormalizeError::NotANumber { field }),
        _ => Err(NormalizeError::NotANumber { field }),
    }
}

/// Like [`lenient_f64`] but for integer fields; fractional JSON numbers
/// truncate, fractional strings fail.
fn lenient_i64(field: &'static str, value: &Value) -> Result<i64, NormalizeError> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .ok_or(NormalizeError::NotAnInteger { field }),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| NormalizeError::NotAnInteger { field }),
        _ => Err(NormalizeError::NotAnInteger { field }),
    }
}

fn clamp_u32(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

/// Trailing path component of `printFileName`.
fn file_basename(value: &Value) -> String {
    let raw = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    raw.rsplit('/').next().unwrap_or_default().to_string()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
