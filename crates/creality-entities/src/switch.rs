//! Switch descriptors.

use creality_core::PrinterState;
use creality_protocol::PrinterCommand;

/// Two-state controls backed by printer commands.
///
/// `PauseResume` reads as on while the job is paused; turning it on
/// pauses, turning it off resumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwitchKey {
    LedLight,
    PauseResume,
}

impl SwitchKey {
    /// Every switch, in display order.
    pub const ALL: [SwitchKey; 2] = [SwitchKey::LedLight, SwitchKey::PauseResume];

    /// Stable identifier, used as the unique-id suffix.
    pub fn key(&self) -> &'static str {
        match self {
            Self::LedLight => "led_light",
            Self::PauseResume => "pause_resume",
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LedLight => "LED Light",
            Self::PauseResume => "Pause/Resume Print",
        }
    }

    /// Icon identifier.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::LedLight => "mdi:lightbulb",
            Self::PauseResume => "mdi:pause",
        }
    }

    /// Current on/off value.
    pub fn is_on(&self, state: &PrinterState) -> bool {
        match self {
            Self::LedLight => state.light_on,
            Self::PauseResume => state.is_paused(),
        }
    }

    /// Command sent when the switch is turned on.
    pub fn turn_on(&self) -> PrinterCommand {
        match self {
            Self::LedLight => PrinterCommand::Light { on: true },
            Self::PauseResume => PrinterCommand::Pause,
        }
    }

    /// Command sent when the switch is turned off.
    pub fn turn_off(&self) -> PrinterCommand {
        match self {
            Self::LedLight => PrinterCommand::Light { on: false },
            Self::PauseResume => PrinterCommand::Resume,
        }
    }
}
