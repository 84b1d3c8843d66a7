//! System configuration and hardware constants
//!
//! Compile-time constants for the BK4819 receive path and the RSSI task,
//! plus the runtime [`RssiTaskConfig`] used by the reception controller.

/// BK4819 CTCSS/CDCSS/IRQ indicator register
pub const REG_STATUS: u8 = 0x0C;

/// BK4819 RSSI register (0.5 dB/step)
pub const REG_RSSI: u8 = 0x67;

/// Valid RSSI bits in `REG_RSSI`
pub const RSSI_MASK: u16 = 0x01FF;

/// Lowest calibrated RSSI reading (maps to 0%)
pub const RSSI_FLOOR: u16 = 72;

/// Highest calibrated RSSI reading (maps to 100%)
pub const RSSI_CEILING: u16 = 330;

/// Calibrated RSSI span
pub const RSSI_SPAN: u16 = RSSI_CEILING - RSSI_FLOOR;

/// Consecutive tail-tone ticks tolerated before reception is torn down
pub const TAIL_TONE_LIMIT: u16 = 10;

/// Consecutive no-tone ticks tolerated before reception is torn down
pub const NO_TONE_LIMIT: u16 = 1000;

/// Ticks between signal meter refreshes
#[cfg(not(feature = "slower-rssi-timer"))]
pub const RSSI_UPDATE_INTERVAL_TICKS: u16 = 100;

/// Ticks between signal meter refreshes
#[cfg(feature = "slower-rssi-timer")]
pub const RSSI_UPDATE_INTERVAL_TICKS: u16 = 500;

/// Scheduler tick period in milliseconds
pub const TICK_INTERVAL_MS: u64 = 10;

/// RSSI offset for the dBm conversion (dBm = raw / 2 - offset)
pub const RSSI_DBM_OFFSET: i16 = 160;

/// S9 reference level in dBm (VHF/UHF convention)
pub const S9_DBM: i16 = -93;

/// Width of one S-unit in dB
pub const S_UNIT_DB: i16 = 6;

/// Runtime parameters of the RSSI task
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RssiTaskConfig {
    /// Tail-tone ticks tolerated while searching
    pub tail_tone_limit: u16,
    /// No-tone ticks tolerated while searching
    pub no_tone_limit: u16,
    /// Reload value for the meter countdown
    pub meter_interval_ticks: u16,
}

impl RssiTaskConfig {
    /// Create the configuration matching the build's constants
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tail_tone_limit: TAIL_TONE_LIMIT,
            no_tone_limit: NO_TONE_LIMIT,
            meter_interval_ticks: RSSI_UPDATE_INTERVAL_TICKS,
        }
    }

    /// Set tail-tone limit
    #[must_use]
    pub const fn with_tail_tone_limit(self, tail_tone_limit: u16) -> Self {
        Self {
            tail_tone_limit,
            ..self
        }
    }

    /// Set no-tone limit
    #[must_use]
    pub const fn with_no_tone_limit(self, no_tone_limit: u16) -> Self {
        Self {
            no_tone_limit,
            ..self
        }
    }

    /// Set meter refresh interval
    #[must_use]
    pub const fn with_meter_interval(self, meter_interval_ticks: u16) -> Self {
        Self {
            meter_interval_ticks,
            ..self
        }
    }
}

impl Default for RssiTaskConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for RssiTaskConfig {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "RssiTaskConfig(tail<={}, none<={}, meter={}t)",
            self.tail_tone_limit,
            self.no_tone_limit,
            self.meter_interval_ticks
        );
    }
}
