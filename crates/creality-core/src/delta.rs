//! Sparse merge fragments.

use crate::state::{PrintState, PrinterState};
use serde::{Deserialize, Serialize};

/// A normalized fragment of printer state.
///
/// Normalizers produce one delta per inbound message. Fields left `None`
/// keep their previous value when the delta is merged, so a message only
/// ever touches the fields it actually carried.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateDelta {
    pub state: Option<PrintState>,
    pub filename: Option<String>,
    pub print_duration: Option<f64>,
    pub total_duration: Option<f64>,
    pub print_time_remaining: Option<f64>,
    pub progress: Option<f64>,
    pub nozzle_temp: Option<f64>,
    pub nozzle_target: Option<f64>,
    pub bed_temp: Option<f64>,
    pub bed_target: Option<f64>,
    pub position_x: Option<f64>,
    pub position_y: Option<f64>,
    pub position_z: Option<f64>,
    pub speed: Option<f64>,
    pub speed_factor: Option<u32>,
    pub fan_speed: Option<u32>,
    pub auxiliary_fan: Option<u32>,
    pub case_fan: Option<u32>,
    pub current_layer: Option<u32>,
    pub total_layers: Option<u32>,
    pub light_on: Option<bool>,
}

impl StateDelta {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merges this fragment into `state`, overwriting only the set fields.
    pub fn apply_to(&self, state: &mut PrinterState) {
        if let Some(v) = self.state {
            state.state = v;
        }
        if let Some(ref v) = self.filename {
            state.filename = v.clone();
        }
        if let Some(v) = self.print_duration {
            state.print_duration = v;
        }
        if let Some(v) = self.total_duration {
            state.total_duration = v;
        }
        if let Some(v) = self.print_time_remaining {
            state.print_time_remaining = v;
        }
        if let Some(v) = self.progress {
            state.progress = v;
        }
        if let Some(v) = self.nozzle_temp {
            state.nozzle_temp = v;
        }
        if let Some(v) = self.nozzle_target {
            state.nozzle_target = v;
        }
        if let Some(v) = self.bed_temp {
            state.bed_temp = v;
        }
        if let Some(v) = self.bed_target {
            state.bed_target = v;
        }
        if let Some(v) = self.position_x {
            state.position_x = v;
        }
        if let Some(v) = self.position_y {
            state.position_y = v;
        }
        if let Some(v) = self.position_z {
            state.position_z = v;
        }
        if let Some(v) = self.speed {
            state.speed = v;
        }
        if let Some(v) = self.speed_factor {
            state.speed_factor = v;
        }
        if let Some(v) = self.fan_speed {
            state.fan_speed = v;
        }
        if let Some(v) = self.auxiliary_fan {
            state.auxiliary_fan = v;
        }
        if let Some(v) = self.case_fan {
            state.case_fan = v;
        }
        if let Some(v) = self.current_layer {
            state.current_layer = v;
        }
        if let Some(v) = self.total_layers {
            state.total_layers = v;
        }
        if let Some(v) = self.light_on {
            state.light_on = v;
        }
    }
}
