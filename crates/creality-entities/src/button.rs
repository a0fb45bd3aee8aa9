//! Button descriptors.

use creality_protocol::PrinterCommand;

/// One-shot actions backed by printer commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonKey {
    CancelPrint,
    HomeAll,
    HomeX,
    HomeY,
    HomeZ,
}

impl ButtonKey {
    /// Every button, in display order.
    pub const ALL: [ButtonKey; 5] = [
        ButtonKey::CancelPrint,
        ButtonKey::HomeAll,
        ButtonKey::HomeX,
        ButtonKey::HomeY,
        ButtonKey::HomeZ,
    ];

    /// Stable identifier, used as the unique-id suffix.
    pub fn key(&self) -> &'static str {
        match self {
            Self::CancelPrint => "cancel_print",
            Self::HomeAll => "home_all",
            Self::HomeX => "home_x",
            Self::HomeY => "home_y",
            Self::HomeZ => "home_z",
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CancelPrint => "Cancel Print",
            Self::HomeAll => "Home All Axes",
            Self::HomeX => "Home X Axis",
            Self::HomeY => "Home Y Axis",
            Self::HomeZ => "Home Z Axis",
        }
    }

    /// Icon identifier.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::CancelPrint => "mdi:stop",
            Self::HomeAll => "mdi:home",
            Self::HomeX => "mdi:axis-x-arrow",
            Self::HomeY => "mdi:axis-y-arrow",
            Self::HomeZ => "mdi:axis-z-arrow",
        }
    }

    /// Command sent when the button is pressed.
    pub fn command(&self) -> PrinterCommand {
        match self {
            Self::CancelPrint => PrinterCommand::Stop,
            Self::HomeAll => PrinterCommand::home_all(),
            Self::HomeX => PrinterCommand::home_x(),
            Self::HomeY => PrinterCommand::home_y(),
            Self::HomeZ => PrinterCommand::home_z(),
        }
    }
}
