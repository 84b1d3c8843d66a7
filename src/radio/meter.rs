//! Signal Meter
//!
//! Turns the BK4819 RSSI reading into the bar, dBm and S-meter shown on the
//! main screen, and caches the bar value per VFO for other tasks.

use super::reception::Peripherals;
use super::session::RadioSession;
use super::state::RadioState;
use crate::bk4819::Bk4819;
use crate::config::{RSSI_CEILING, RSSI_DBM_OFFSET, RSSI_FLOOR, RSSI_SPAN, S9_DBM, S_UNIT_DB};
use crate::types::SMeter;
use crate::ui::Display;

/// Map a raw RSSI reading onto 0-100
///
/// Readings outside the calibrated 72..=330 window clamp; inside it the
/// mapping is linear and truncating.
#[must_use]
pub const fn rssi_to_percent(raw: u16) -> u8 {
    if raw <= RSSI_FLOOR {
        0
    } else if raw >= RSSI_CEILING {
        100
    } else {
        (((raw - RSSI_FLOOR) as u32 * 100) / RSSI_SPAN as u32) as u8
    }
}

/// Conversions from raw RSSI to user-facing units
pub trait SignalScale {
    /// Received level in dBm
    fn to_dbm(&self, raw: u16) -> i16;

    /// Received level as an S-meter reading
    fn to_smeter(&self, raw: u16) -> SMeter;
}

/// BK4819 calibration: 0.5 dB per step, 160 dB offset
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bk4819Scale;

impl Bk4819Scale {
    /// S-meter reading for a level in dBm
    #[must_use]
    pub const fn smeter_from_dbm(dbm: i16) -> SMeter {
        let s0 = S9_DBM - 9 * S_UNIT_DB;
        if dbm <= s0 {
            SMeter::new(0, 0)
        } else if dbm >= S9_DBM {
            let over = dbm - S9_DBM;
            SMeter::new(9, if over > u8::MAX as i16 { u8::MAX } else { over as u8 })
        } else {
            SMeter::new(((dbm - s0) / S_UNIT_DB) as u8, 0)
        }
    }
}

impl SignalScale for Bk4819Scale {
    fn to_dbm(&self, raw: u16) -> i16 {
        // raw is at most 16 bits; halving keeps it within i16
        (raw / 2) as i16 - RSSI_DBM_OFFSET
    }

    fn to_smeter(&self, raw: u16) -> SMeter {
        Self::smeter_from_dbm(self.to_dbm(raw))
    }
}

/// Signal meter refresh logic
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignalMeter {
    /// Countdown reload value
    interval_ticks: u16,
}

impl SignalMeter {
    /// Create a meter refreshing every `interval_ticks`
    #[must_use]
    pub const fn new(interval_ticks: u16) -> Self {
        Self { interval_ticks }
    }

    /// Countdown reload value
    #[must_use]
    pub const fn interval_ticks(&self) -> u16 {
        self.interval_ticks
    }

    /// Check whether the meter may refresh now
    ///
    /// The countdown must have expired, nothing else may be using the meter
    /// area, and the receiver must not be playing audio.
    #[must_use]
    pub const fn is_eligible(radio: &RadioState) -> bool {
        radio.vox_rssi_update_timer.is_expired() && radio.ui.meter_visible() && !radio.reception_mode
    }

    /// Refresh the meter if eligible, restarting the countdown
    ///
    /// Returns the new 0-100 value when a refresh happened.
    ///
    /// # Errors
    ///
    /// Returns the bus error if the RSSI read fails.
    pub fn poll<B, S, D, C>(
        &self,
        radio: &mut RadioState,
        io: &mut Peripherals<B, S, D, C>,
    ) -> Result<Option<u8>, B::Error>
    where
        B: Bk4819,
        S: RadioSession,
        D: Display,
        C: SignalScale,
    {
        if !Self::is_eligible(radio) {
            return Ok(None);
        }

        radio.vox_rssi_update_timer.reload(self.interval_ticks);
        self.refresh(radio, io).map(Some)
    }

    /// Read RSSI and push it to the display and the per-VFO cache
    ///
    /// # Errors
    ///
    /// Returns the bus error if the RSSI read fails.
    pub fn refresh<B, S, D, C>(
        &self,
        radio: &mut RadioState,
        io: &mut Peripherals<B, S, D, C>,
    ) -> Result<u8, B::Error>
    where
        B: Bk4819,
        S: RadioSession,
        D: Display,
        C: SignalScale,
    {
        let vfo = radio.current_vfo();
        let raw = io.bk.read_rssi()?;
        let percent = rssi_to_percent(raw);

        io.display.draw_bar(percent, vfo);
        let dbm = io.scale.to_dbm(raw);
        io.display.draw_rx_dbm(vfo, dbm, false);
        let smeter = io.scale.to_smeter(raw);
        // S-meter sits on the other VFO's row
        io.display.draw_rx_smeter(vfo.other(), smeter, false);
        radio.current_rssi[vfo.index()] = percent;

        #[cfg(feature = "embedded")]
        defmt::trace!("rssi: raw={} {}% {}dBm {}", raw, percent, dbm, smeter);

        Ok(percent)
    }
}

impl Default for SignalMeter {
    fn default() -> Self {
        Self::new(crate::config::RSSI_UPDATE_INTERVAL_TICKS)
    }
}
