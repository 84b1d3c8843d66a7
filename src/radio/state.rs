//! Radio Session State
//!
//! The long-lived state shared between the RSSI task and the rest of the
//! radio. Other subsystems own most of these fields; the RSSI task reads
//! them every tick and writes the few it is responsible for (RSSI cache,
//! meter countdown reload, NOAA lock).
//!
//! The state is passed by `&mut` into each tick, so only one task body can
//! touch it at a time.

use super::noaa::NoaaState;
use super::vfo::{VfoManager, VfoSettings};
use crate::scheduler::CountdownTimer;
use crate::types::{RadioMode, Vfo};
use crate::ui::UiFlags;

/// Shared radio session state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RadioState {
    /// Top-level radio mode
    pub mode: RadioMode,
    /// Receive chain has locked and audio may play
    pub reception_mode: bool,
    /// Speaker path is carrying received audio
    pub receiving_audio: bool,
    /// Manual squelch-open override
    pub monitor_mode: bool,
    /// Power-save duty cycling is active
    pub save_mode: bool,
    /// VFO settings and selection
    pub vfos: VfoManager,
    /// Last 0-100 signal level per VFO
    pub current_rssi: [u8; 2],
    /// Meter countdown, decremented by the VOX tick
    pub vox_rssi_update_timer: CountdownTimer,
    /// Weather-band state
    pub noaa: NoaaState,
    /// UI flags gating the meter
    pub ui: UiFlags,
}

impl RadioState {
    /// Create a receiving radio with the given VFOs
    #[must_use]
    pub const fn new(vfos: VfoManager) -> Self {
        Self {
            mode: RadioMode::Rx,
            reception_mode: false,
            receiving_audio: false,
            monitor_mode: false,
            save_mode: false,
            vfos,
            current_rssi: [0; 2],
            vox_rssi_update_timer: CountdownTimer::expired(),
            noaa: NoaaState::idle(),
            ui: UiFlags::new(),
        }
    }

    /// Set radio mode (returns new state)
    #[must_use]
    pub const fn with_mode(self, mode: RadioMode) -> Self {
        Self { mode, ..self }
    }

    /// Set reception mode (returns new state)
    #[must_use]
    pub const fn with_reception(self, reception_mode: bool) -> Self {
        Self {
            reception_mode,
            ..self
        }
    }

    /// Set weather-band state (returns new state)
    #[must_use]
    pub const fn with_noaa(self, noaa: NoaaState) -> Self {
        Self { noaa, ..self }
    }

    /// Currently selected VFO
    #[must_use]
    pub const fn current_vfo(&self) -> Vfo {
        self.vfos.selected()
    }

    /// Settings of the selected VFO
    #[must_use]
    pub const fn current_settings(&self) -> &VfoSettings {
        self.vfos.current()
    }

    /// Last signal level recorded for a VFO
    #[must_use]
    pub const fn rssi_percent(&self, vfo: Vfo) -> u8 {
        self.current_rssi[vfo.index()]
    }

    /// Check the RSSI task's mode and power gates
    #[must_use]
    pub const fn rssi_check_allowed(&self) -> bool {
        self.mode.allows_rssi_check() && !self.save_mode
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for RadioState {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Radio({}, rx={}, audio={}, mon={}, save={}, {})",
            self.mode,
            self.reception_mode,
            self.receiving_audio,
            self.monitor_mode,
            self.save_mode,
            self.current_vfo()
        );
    }
}
