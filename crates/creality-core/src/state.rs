//! Canonical printer state.
//!
//! The coordinator merges every inbound report into a single
//! [`PrinterState`] record. Consumers never see a partial record: fields a
//! message did not carry keep their previous value, and before the first
//! report the record holds the idle defaults.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of the current print job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintState {
    #[default]
    Idle,
    Printing,
    Paused,
    Complete,
    Cancelled,
    Error,
}

impl PrintState {
    /// Maps a Moonraker `print_stats.state` string.
    ///
    /// Moonraker reports `standby` between jobs; that and any unknown
    /// string read as [`PrintState::Idle`].
    pub fn from_moonraker(state: &str) -> Self {
        match state {
            "printing" => Self::Printing,
            "paused" => Self::Paused,
            "complete" => Self::Complete,
            "cancelled" => Self::Cancelled,
            "error" => Self::Error,
            _ => Self::Idle,
        }
    }

    /// Maps a Creality `state`/`deviceState` integer code.
    ///
    /// The firmware only reports codes 0 through 3; unknown codes read as
    /// [`PrintState::Idle`].
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Printing,
            2 => Self::Paused,
            3 => Self::Complete,
            _ => Self::Idle,
        }
    }

    /// Lowercase wire/display form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Printing => "printing",
            Self::Paused => "paused",
            Self::Complete => "complete",
            Self::Cancelled => "cancelled",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for PrintState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The unified printer status record.
///
/// All temperatures are in degrees Celsius rounded to one decimal,
/// positions in millimeters rounded to two, durations in seconds and
/// percentages in the 0-100 range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrinterState {
    /// Lifecycle state of the job
    pub state: PrintState,
    /// Base name of the file being printed, empty when no job is loaded
    pub filename: String,
    /// Seconds spent printing the current job
    pub print_duration: f64,
    /// Total seconds of the current job including preparation
    pub total_duration: f64,
    /// Estimated seconds until the job completes
    pub print_time_remaining: f64,
    /// Job completion percentage
    pub progress: f64,
    /// Nozzle temperature
    pub nozzle_temp: f64,
    /// Nozzle temperature setpoint
    pub nozzle_target: f64,
    /// Bed temperature
    pub bed_temp: f64,
    /// Bed temperature setpoint
    pub bed_target: f64,
    /// Toolhead X position
    pub position_x: f64,
    /// Toolhead Y position
    pub position_y: f64,
    /// Toolhead Z position
    pub position_z: f64,
    /// Toolhead speed in mm/s
    pub speed: f64,
    /// Feed rate override percentage
    pub speed_factor: u32,
    /// Part-cooling fan duty percentage
    pub fan_speed: u32,
    /// Side fan duty percentage
    pub auxiliary_fan: u32,
    /// Chamber fan duty percentage
    pub case_fan: u32,
    /// Layer currently printing
    pub current_layer: u32,
    /// Layer count of the job
    pub total_layers: u32,
    /// Chamber LED state
    pub light_on: bool,
}

impl Default for PrinterState {
    fn default() -> Self {
        Self {
            state: PrintState::Idle,
            filename: String::new(),
            print_duration: 0.0,
            total_duration: 0.0,
            print_time_remaining: 0.0,
            progress: 0.0,
            nozzle_temp: 0.0,
            nozzle_target: 0.0,
            bed_temp: 0.0,
            bed_target: 0.0,
            position_x: 0.0,
            position_y: 0.0,
            position_z: 0.0,
            speed: 0.0,
            speed_factor: 100,
            fan_speed: 0,
            auxiliary_fan: 0,
            case_fan: 0,
            current_layer: 0,
            total_layers: 0,
            light_on: false,
        }
    }
}

impl PrinterState {
    /// True while a job is actively printing.
    pub fn is_printing(&self) -> bool {
        self.state == PrintState::Printing
    }

    /// True while the current job is paused.
    pub fn is_paused(&self) -> bool {
        self.state == PrintState::Paused
    }
}

/// Payload delivered to subscribers after each applied update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateUpdate {
    /// Record before the update was merged
    pub old_state: PrinterState,
    /// Record after the update was merged
    pub new_state: PrinterState,
    /// When the update was applied
    pub at: DateTime<Utc>,
}

impl StateUpdate {
    /// Whether the update changed anything observable.
    pub fn changed(&self) -> bool {
        self.old_state != self.new_state
    }
}
