//! Sensor descriptors.

use creality_core::PrinterState;
use serde_json::{json, Value};

/// The read-only surface of the canonical record.
///
/// Each key is one sensor: a stable identifier, a display name, an
/// optional unit and a pure extraction from [`PrinterState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKey {
    NozzleTemp,
    NozzleTarget,
    BedTemp,
    BedTarget,
    Progress,
    PrintDuration,
    PrintDurationFormatted,
    PrintTimeRemaining,
    PrintTimeRemainingFormatted,
    Filename,
    State,
    PositionX,
    PositionY,
    PositionZ,
    Speed,
    SpeedFactor,
    FanSpeed,
    AuxiliaryFan,
    CaseFan,
    CurrentLayer,
    TotalLayers,
}

impl SensorKey {
    /// Every sensor, in display order.
    pub const ALL: [SensorKey; 21] = [
        SensorKey::NozzleTemp,
        SensorKey::NozzleTarget,
        SensorKey::BedTemp,
        SensorKey::BedTarget,
        SensorKey::Progress,
        SensorKey::PrintDuration,
        SensorKey::PrintDurationFormatted,
        SensorKey::PrintTimeRemaining,
        SensorKey::PrintTimeRemainingFormatted,
        SensorKey::Filename,
        SensorKey::State,
        SensorKey::PositionX,
        SensorKey::PositionY,
        SensorKey::PositionZ,
        SensorKey::Speed,
        SensorKey::SpeedFactor,
        SensorKey::FanSpeed,
        SensorKey::AuxiliaryFan,
        SensorKey::CaseFan,
        SensorKey::CurrentLayer,
        SensorKey::TotalLayers,
    ];

    /// Stable identifier, used as the unique-id suffix.
    pub fn key(&self) -> &'static str {
        match self {
            Self::NozzleTemp => "nozzle_temp",
            Self::NozzleTarget => "nozzle_target",
            Self::BedTemp => "bed_temp",
            Self::BedTarget => "bed_target",
            Self::Progress => "progress",
            Self::PrintDuration => "print_duration",
            Self::PrintDurationFormatted => "print_duration_formatted",
            Self::PrintTimeRemaining => "print_time_remaining",
            Self::PrintTimeRemainingFormatted => "print_time_remaining_formatted",
            Self::Filename => "filename",
            Self::State => "state",
            Self::PositionX => "position_x",
            Self::PositionY => "position_y",
            Self::PositionZ => "position_z",
            Self::Speed => "speed",
            Self::SpeedFactor => "speed_factor",
            Self::FanSpeed => "fan_speed",
            Self::AuxiliaryFan => "auxiliary_fan",
            Self::CaseFan => "case_fan",
            Self::CurrentLayer => "current_layer",
            Self::TotalLayers => "total_layers",
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NozzleTemp => "Nozzle Temperature",
            Self::NozzleTarget => "Nozzle Target Temperature",
            Self::BedTemp => "Bed Temperature",
            Self::BedTarget => "Bed Target Temperature",
            Self::Progress => "Print Progress",
            Self::PrintDuration => "Print Duration",
            Self::PrintDurationFormatted => "Print Duration (Formatted)",
            Self::PrintTimeRemaining => "Print Time Remaining",
            Self::PrintTimeRemainingFormatted => "Print Time Remaining (Formatted)",
            Self::Filename => "Current File",
            Self::State => "Printer State",
            Self::PositionX => "Position X",
            Self::PositionY => "Position Y",
            Self::PositionZ => "Position Z",
            Self::Speed => "Print Speed",
            Self::SpeedFactor => "Speed Factor",
            Self::FanSpeed => "Model Fan Speed",
            Self::AuxiliaryFan => "Auxiliary Fan Speed",
            Self::CaseFan => "Case Fan Speed",
            Self::CurrentLayer => "Current Layer",
            Self::TotalLayers => "Total Layers",
        }
    }

    /// Unit of measurement, if the sensor has one.
    pub fn unit(&self) -> Option<&'static str> {
        match self {
            Self::NozzleTemp | Self::NozzleTarget | Self::BedTemp | Self::BedTarget => Some("°C"),
            Self::Progress | Self::SpeedFactor | Self::FanSpeed | Self::AuxiliaryFan
            | Self::CaseFan => Some("%"),
            Self::PrintDuration | Self::PrintTimeRemaining => Some("s"),
            Self::PositionX | Self::PositionY | Self::PositionZ => Some("mm"),
            Self::Speed => Some("mm/s"),
            _ => None,
        }
    }

    /// Icon identifier.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::NozzleTemp | Self::NozzleTarget => "mdi:printer-3d-nozzle",
            Self::BedTemp | Self::BedTarget => "mdi:radiator",
            Self::Progress => "mdi:progress-clock",
            Self::PrintDuration | Self::PrintDurationFormatted => "mdi:timer",
            Self::PrintTimeRemaining | Self::PrintTimeRemainingFormatted => "mdi:timer-sand",
            Self::Filename => "mdi:file",
            Self::State => "mdi:printer-3d",
            Self::PositionX => "mdi:axis-x-arrow",
            Self::PositionY => "mdi:axis-y-arrow",
            Self::PositionZ => "mdi:axis-z-arrow",
            Self::Speed | Self::SpeedFactor => "mdi:speedometer",
            Self::FanSpeed | Self::AuxiliaryFan | Self::CaseFan => "mdi:fan",
            Self::CurrentLayer | Self::TotalLayers => "mdi:layers",
        }
    }

    /// Current value extracted from the canonical record.
    pub fn value(&self, state: &PrinterState) -> Value {
        match self {
            Self::NozzleTemp => json!(state.nozzle_temp),
            Self::NozzleTarget => json!(state.nozzle_target),
            Self::BedTemp => json!(state.bed_temp),
            Self::BedTarget => json!(state.bed_target),
            Self::Progress => json!((state.progress * 10.0).round() / 10.0),
            Self::PrintDuration => json!(state.print_duration.round() as i64),
            Self::PrintDurationFormatted => json!(format_duration(state.print_duration)),
            Self::PrintTimeRemaining => json!(state.print_time_remaining.round() as i64),
            Self::PrintTimeRemainingFormatted => {
                json!(format_duration(state.print_time_remaining))
            }
            Self::Filename => json!(state.filename),
            Self::State => json!(state.state.as_str()),
            Self::PositionX => json!(state.position_x),
            Self::PositionY => json!(state.position_y),
            Self::PositionZ => json!(state.position_z),
            Self::Speed => json!(state.speed),
            Self::SpeedFactor => json!(state.speed_factor),
            Self::FanSpeed => json!(state.fan_speed),
            Self::AuxiliaryFan => json!(state.auxiliary_fan),
            Self::CaseFan => json!(state.case_fan),
            Self::CurrentLayer => json!(state.current_layer),
            Self::TotalLayers => json!(state.total_layers),
        }
    }
}

/// Renders a duration in seconds as `H:MM:SS`.
///
/// Zero and negative durations render as `0:00:00`.
pub fn format_duration(seconds: f64) -> String {
    if seconds <= 0.0 {
        return "0:00:00".to_string();
    }

    let total = seconds as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{hours}:{minutes:02}:{secs:02}")
}
