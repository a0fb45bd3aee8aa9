//! Number descriptors.

use creality_core::PrinterState;
use creality_protocol::PrinterCommand;

/// Adjustable values backed by printer commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKey {
    ModelFanSpeed,
    AuxiliaryFanSpeed,
    CaseFanSpeed,
    NozzleTargetTemp,
    BedTargetTemp,
}

impl NumberKey {
    /// Every number, in display order.
    pub const ALL: [NumberKey; 5] = [
        NumberKey::ModelFanSpeed,
        NumberKey::AuxiliaryFanSpeed,
        NumberKey::CaseFanSpeed,
        NumberKey::NozzleTargetTemp,
        NumberKey::BedTargetTemp,
    ];

    /// Adjustment granularity, shared by all numbers.
    pub const STEP: f64 = 1.0;

    /// Stable identifier, used as the unique-id suffix.
    pub fn key(&self) -> &'static str {
        match self {
            Self::ModelFanSpeed => "model_fan_speed",
            Self::AuxiliaryFanSpeed => "auxiliary_fan_speed",
            Self::CaseFanSpeed => "case_fan_speed",
            Self::NozzleTargetTemp => "nozzle_target_temp",
            Self::BedTargetTemp => "bed_target_temp",
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ModelFanSpeed => "Model Fan Speed",
            Self::AuxiliaryFanSpeed => "Auxiliary Fan Speed",
            Self::CaseFanSpeed => "Case Fan Speed",
            Self::NozzleTargetTemp => "Nozzle Target Temperature",
            Self::BedTargetTemp => "Bed Target Temperature",
        }
    }

    /// Unit of measurement.
    pub fn unit(&self) -> &'static str {
        match self {
            Self::ModelFanSpeed | Self::AuxiliaryFanSpeed | Self::CaseFanSpeed => "%",
            Self::NozzleTargetTemp | Self::BedTargetTemp => "°C",
        }
    }

    /// Icon identifier.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::ModelFanSpeed | Self::AuxiliaryFanSpeed | Self::CaseFanSpeed => "mdi:fan",
            Self::NozzleTargetTemp => "mdi:printer-3d-nozzle",
            Self::BedTargetTemp => "mdi:radiator",
        }
    }

    /// Accepted value range, inclusive.
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::ModelFanSpeed | Self::AuxiliaryFanSpeed | Self::CaseFanSpeed => (0.0, 100.0),
            Self::NozzleTargetTemp => (0.0, 300.0),
            Self::BedTargetTemp => (0.0, 120.0),
        }
    }

    /// Current value read from the canonical record.
    pub fn value(&self, state: &PrinterState) -> f64 {
        match self {
            Self::ModelFanSpeed => f64::from(state.fan_speed),
            Self::AuxiliaryFanSpeed => f64::from(state.auxiliary_fan),
            Self::CaseFanSpeed => f64::from(state.case_fan),
            Self::NozzleTargetTemp => state.nozzle_target,
            Self::BedTargetTemp => state.bed_target,
        }
    }

    /// Command carrying `value`, clamped to the accepted range and
    /// truncated to a whole unit.
    pub fn command(&self, value: f64) -> PrinterCommand {
        let (min, max) = self.range();
        let value = value.clamp(min, max);
        match self {
            Self::ModelFanSpeed => PrinterCommand::ModelFan {
                percent: value as u8,
            },
            Self::AuxiliaryFanSpeed => PrinterCommand::AuxiliaryFan {
                percent: value as u8,
            },
            Self::CaseFanSpeed => PrinterCommand::CaseFan {
                percent: value as u8,
            },
            Self::NozzleTargetTemp => PrinterCommand::NozzleTarget {
                celsius: value as u16,
            },
            Self::BedTargetTemp => PrinterCommand::BedTarget {
                celsius: value as u16,
            },
        }
    }
}
