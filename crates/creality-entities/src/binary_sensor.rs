//! Binary sensor descriptors.

use creality_core::PrinterState;

/// On/off facts derived from the canonical record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinarySensorKey {
    IsPrinting,
    IsPaused,
    LightOn,
}

impl BinarySensorKey {
    /// Every binary sensor, in display order.
    pub const ALL: [BinarySensorKey; 3] = [
        BinarySensorKey::IsPrinting,
        BinarySensorKey::IsPaused,
        BinarySensorKey::LightOn,
    ];

    /// Stable identifier, used as the unique-id suffix.
    pub fn key(&self) -> &'static str {
        match self {
            Self::IsPrinting => "is_printing",
            Self::IsPaused => "is_paused",
            Self::LightOn => "light_on",
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::IsPrinting => "Printing",
            Self::IsPaused => "Paused",
            Self::LightOn => "LED Light",
        }
    }

    /// Icon identifier.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::IsPrinting => "mdi:printer-3d",
            Self::IsPaused => "mdi:pause",
            Self::LightOn => "mdi:lightbulb",
        }
    }

    /// Current on/off value.
    pub fn is_on(&self, state: &PrinterState) -> bool {
        match self {
            Self::IsPrinting => state.is_printing(),
            Self::IsPaused => state.is_paused(),
            Self::LightOn => state.light_on,
        }
    }
}
