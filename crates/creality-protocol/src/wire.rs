//! Outbound wire envelopes.

use serde_json::{json, Map, Value};

/// JSON-RPC method used to subscribe to object updates.
pub const METHOD_SUBSCRIBE: &str = "printer.objects.subscribe";

/// Method of inbound Moonraker status notifications.
pub const METHOD_NOTIFY: &str = "notify";

/// Method of outbound control commands.
pub const METHOD_SET: &str = "set";

/// Subsystem topics requested in the subscribe envelope.
pub const SUBSCRIBED_OBJECTS: [&str; 7] = [
    "print_stats",
    "toolhead",
    "extruder",
    "heater_bed",
    "fan",
    "gcode_move",
    "virtual_sdcard",
];

/// Builds the `printer.objects.subscribe` request for the fixed topic set.
///
/// Each topic maps to `null`, which asks the printer for every field of
/// that subsystem.
pub fn subscribe_request() -> Value {
    let objects: Map<String, Value> = SUBSCRIBED_OBJECTS
        .iter()
        .map(|topic| ((*topic).to_string(), Value::Null))
        .collect();

    json!({
        "jsonrpc": "2.0",
        "method": METHOD_SUBSCRIBE,
        "params": { "objects": objects },
        "id": 1,
    })
}

/// Wraps a parameter object in the `set` command envelope.
pub fn set_request(params: Value) -> Value {
    json!({
        "method": METHOD_SET,
        "params": params,
    })
}
