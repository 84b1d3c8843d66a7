//! VFO (Variable Frequency Oscillator) Management
//!
//! Per-VFO squelch settings and the A/B selection the receive path reads.

use crate::types::{CodeType, Modulation, Vfo};

/// Squelch-related VFO settings (stored per VFO)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VfoSettings {
    /// Receive squelch code
    pub code_type: CodeType,
    /// Mute audio unless a code/tone matches
    pub mute_enabled: bool,
    /// Demodulator
    pub modulation: Modulation,
}

impl VfoSettings {
    /// Create new VFO settings
    #[must_use]
    pub const fn new(code_type: CodeType, mute_enabled: bool, modulation: Modulation) -> Self {
        Self {
            code_type,
            mute_enabled,
            modulation,
        }
    }

    /// Carrier-squelch FM settings
    #[must_use]
    pub const fn carrier() -> Self {
        Self::new(CodeType::Off, false, Modulation::Fm)
    }

    /// Set squelch code (returns new settings)
    #[must_use]
    pub const fn with_code(self, code_type: CodeType) -> Self {
        Self { code_type, ..self }
    }

    /// Set mute flag (returns new settings)
    #[must_use]
    pub const fn with_mute(self, mute_enabled: bool) -> Self {
        Self {
            mute_enabled,
            ..self
        }
    }

    /// Set modulation (returns new settings)
    #[must_use]
    pub const fn with_modulation(self, modulation: Modulation) -> Self {
        Self { modulation, ..self }
    }

    /// No tone squelch configured: any carrier opens the receiver
    #[must_use]
    pub const fn is_open_squelch(&self) -> bool {
        matches!(self.code_type, CodeType::Off) && !self.mute_enabled
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for VfoSettings {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "VFO({}, mute={}, {})",
            self.code_type,
            self.mute_enabled,
            self.modulation
        );
    }
}

/// Dual VFO manager
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VfoManager {
    /// Settings indexed by [`Vfo::index`]
    vfos: [VfoSettings; 2],
    /// Currently selected VFO
    selected: Vfo,
}

impl VfoManager {
    /// Create a new VFO manager
    #[must_use]
    pub const fn new(vfo_a: VfoSettings, vfo_b: VfoSettings) -> Self {
        Self {
            vfos: [vfo_a, vfo_b],
            selected: Vfo::A,
        }
    }

    /// Get currently selected VFO
    #[must_use]
    pub const fn selected(&self) -> Vfo {
        self.selected
    }

    /// Get current VFO settings
    #[must_use]
    pub const fn current(&self) -> &VfoSettings {
        &self.vfos[self.selected.index()]
    }

    /// Select a VFO
    pub fn select(&mut self, vfo: Vfo) {
        self.selected = vfo;
    }
}
