//! Typed command vocabulary.
//!
//! Every control the printer accepts goes through the `set` envelope with
//! a firmware-specific parameter key. The enum is the closed set of
//! commands this stack sends; the raw G-code escape hatch covers the rest.

use serde_json::{json, Value};

use crate::wire::set_request;

/// Parameter key of the part-cooling ("model") fan.
pub const PARAM_FAN: &str = "fan";
/// Parameter key of the side ("auxiliary") fan.
pub const PARAM_AUXILIARY_FAN: &str = "auxiliaryFanPct";
/// Parameter key of the chamber ("case") fan.
pub const PARAM_CASE_FAN: &str = "caseFanPct";
/// Parameter key of the chamber LED switch.
pub const PARAM_LIGHT_SW: &str = "lightSw";
/// Parameter key of the pause/resume toggle.
pub const PARAM_PAUSE: &str = "pause";
/// Parameter key of the job abort flag.
pub const PARAM_STOP: &str = "stop";
/// Parameter key of the bed temperature setpoint.
pub const PARAM_BED_TARGET_TEMP: &str = "bedTargetTemp";
/// Parameter key of the nozzle temperature setpoint.
pub const PARAM_NOZZLE_TARGET_TEMP: &str = "nozzleTargetTemp";
/// Parameter key of the raw G-code escape hatch.
pub const PARAM_GCODE: &str = "gcode";

/// A control command accepted by the printer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrinterCommand {
    /// Part-cooling fan duty, percent
    ModelFan { percent: u8 },
    /// Side fan duty, percent
    AuxiliaryFan { percent: u8 },
    /// Chamber fan duty, percent
    CaseFan { percent: u8 },
    /// Chamber LED switch
    Light { on: bool },
    /// Pause the running job
    Pause,
    /// Resume a paused job
    Resume,
    /// Abort the running job
    Stop,
    /// Nozzle temperature setpoint, degrees Celsius
    NozzleTarget { celsius: u16 },
    /// Bed temperature setpoint, degrees Celsius
    BedTarget { celsius: u16 },
    /// Raw G-code script
    Gcode { script: String },
}

impl PrinterCommand {
    /// Home all axes.
    pub fn home_all() -> Self {
        Self::Gcode {
            script: "G28".to_string(),
        }
    }

    /// Home the X axis only.
    pub fn home_x() -> Self {
        Self::Gcode {
            script: "G28 X".to_string(),
        }
    }

    /// Home the Y axis only.
    pub fn home_y() -> Self {
        Self::Gcode {
            script: "G28 Y".to_string(),
        }
    }

    /// Home the Z axis only.
    pub fn home_z() -> Self {
        Self::Gcode {
            script: "G28 Z".to_string(),
        }
    }

    /// Parameter object carried inside the `set` envelope.
    pub fn params(&self) -> Value {
        match self {
            Self::ModelFan { percent } => json!({ PARAM_FAN: percent }),
            Self::AuxiliaryFan { percent } => json!({ PARAM_AUXILIARY_FAN: percent }),
            Self::CaseFan { percent } => json!({ PARAM_CASE_FAN: percent }),
            Self::Light { on } => json!({ PARAM_LIGHT_SW: u8::from(*on) }),
            Self::Pause => json!({ PARAM_PAUSE: 1 }),
            Self::Resume => json!({ PARAM_PAUSE: 0 }),
            Self::Stop => json!({ PARAM_STOP: 1 }),
            Self::NozzleTarget { celsius } => json!({ PARAM_NOZZLE_TARGET_TEMP: celsius }),
            Self::BedTarget { celsius } => json!({ PARAM_BED_TARGET_TEMP: celsius }),
            Self::Gcode { script } => json!({ PARAM_GCODE: script }),
        }
    }

    /// Full wire message for this command.
    pub fn to_message(&self) -> Value {
        set_request(self.params())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_switch_encoding() {
        assert_eq!(
            PrinterCommand::Light { on: true }.to_message(),
            json!({ "method": "set", "params": { "lightSw": 1 } })
        );
        assert_eq!(
            PrinterCommand::Light { on: false }.to_message(),
            json!({ "method": "set", "params": { "lightSw": 0 } })
        );
    }

    #[test]
    fn test_job_control_encoding() {
        assert_eq!(
            PrinterCommand::Pause.params(),
            json!({ "pause": 1 })
        );
        assert_eq!(
            PrinterCommand::Resume.params(),
            json!({ "pause": 0 })
        );
        assert_eq!(
            PrinterCommand::Stop.params(),
            json!({ "stop": 1 })
        );
    }

    #[test]
    fn test_fan_and_temperature_encoding() {
        assert_eq!(
            PrinterCommand::ModelFan { percent: 80 }.params(),
            json!({ "fan": 80 })
        );
        assert_eq!(
            PrinterCommand::AuxiliaryFan { percent: 100 }.params(),
            json!({ "auxiliaryFanPct": 100 })
        );
        assert_eq!(
            PrinterCommand::CaseFan { percent: 0 }.params(),
            json!({ "caseFanPct": 0 })
        );
        assert_eq!(
            PrinterCommand::NozzleTarget { celsius: 220 }.params(),
            json!({ "nozzleTargetTemp": 220 })
        );
        assert_eq!(
            PrinterCommand::BedTarget { celsius: 60 }.params(),
            json!({ "bedTargetTemp": 60 })
        );
    }

    #[test]
    fn test_homing_commands_are_gcode() {
        assert_eq!(
            PrinterCommand::home_all().params(),
            json!({ "gcode": "G28" })
        );
        assert_eq!(
            PrinterCommand::home_x().params(),
            json!({ "gcode": "G28 X" })
        );
        assert_eq!(
            PrinterCommand::home_y().params(),
            json!({ "gcode": "G28 Y" })
        );
        assert_eq!(
            PrinterCommand::home_z().params(),
            json!({ "gcode": "G28 Z" })
        );
    }
}
