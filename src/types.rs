//! Shared types used across the squelch firmware
//!
//! This module defines the small domain vocabulary shared by the tone
//! classifier, the signal meter and the reception controller.

/// Sub-audible tone condition observed on one tick
///
/// Transient: recomputed on every run of the RSSI task and never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ToneStatus {
    /// No matching tone or code
    #[default]
    NoTone,
    /// Configured tone or code is present (or none is required)
    GotTone,
    /// Tail tone seen, squelch is about to close
    TailTone,
}

#[cfg(feature = "embedded")]
impl defmt::Format for ToneStatus {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::NoTone => defmt::write!(f, "NO_TONE"),
            Self::GotTone => defmt::write!(f, "GOT_TONE"),
            Self::TailTone => defmt::write!(f, "TAIL_TONE"),
        }
    }
}

/// Squelch code configured on a channel or VFO
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CodeType {
    /// Carrier squelch only
    #[default]
    Off,
    /// Continuous tone (CTCSS)
    Ctcss,
    /// Digital code, normal polarity
    DcsNormal,
    /// Digital code, inverted polarity
    DcsInverted,
}

impl CodeType {
    /// Check if this is either DCS polarity
    #[must_use]
    pub const fn is_dcs(self) -> bool {
        matches!(self, Self::DcsNormal | Self::DcsInverted)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for CodeType {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Off => defmt::write!(f, "OFF"),
            Self::Ctcss => defmt::write!(f, "CTCSS"),
            Self::DcsNormal => defmt::write!(f, "DCS-N"),
            Self::DcsInverted => defmt::write!(f, "DCS-I"),
        }
    }
}

/// Demodulator selected on a VFO
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Modulation {
    /// Narrow/wide FM (tone squelch applies)
    #[default]
    Fm,
    /// Amplitude Modulation
    Am,
    /// Upper Sideband
    Usb,
}

impl Modulation {
    /// Check if this is anything other than FM
    ///
    /// Tone squelch has no meaning outside FM, so these modes open the
    /// receive chain on carrier alone.
    #[must_use]
    pub const fn bypasses_tone_squelch(self) -> bool {
        !matches!(self, Self::Fm)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Modulation {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Fm => defmt::write!(f, "FM"),
            Self::Am => defmt::write!(f, "AM"),
            Self::Usb => defmt::write!(f, "USB"),
        }
    }
}

/// Top-level radio mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RadioMode {
    /// Receiver searching for a signal
    #[default]
    Rx,
    /// Transmitting
    Tx,
    /// Receiver parked, nothing to monitor
    Quiet,
    /// Carrier detected, waiting to lock onto it
    Incoming,
}

impl RadioMode {
    /// Check if the RSSI task may run in this mode
    #[must_use]
    pub const fn allows_rssi_check(self) -> bool {
        !matches!(self, Self::Tx | Self::Quiet)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for RadioMode {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Rx => defmt::write!(f, "RX"),
            Self::Tx => defmt::write!(f, "TX"),
            Self::Quiet => defmt::write!(f, "QUIET"),
            Self::Incoming => defmt::write!(f, "INCOMING"),
        }
    }
}

/// VFO slot selection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Vfo {
    /// Upper VFO
    #[default]
    A,
    /// Lower VFO
    B,
}

impl Vfo {
    /// Get the other VFO
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    /// Index into per-VFO arrays
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Vfo {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::A => defmt::write!(f, "VFO A"),
            Self::B => defmt::write!(f, "VFO B"),
        }
    }
}

/// S-meter reading
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SMeter {
    /// S-units (0-9)
    pub units: u8,
    /// dB above S9 (0 unless `units` is 9)
    pub over_s9_db: u8,
}

impl SMeter {
    /// Create a reading, clamping units to S9
    #[must_use]
    pub const fn new(units: u8, over_s9_db: u8) -> Self {
        if units >= 9 {
            Self {
                units: 9,
                over_s9_db,
            }
        } else {
            Self {
                units,
                over_s9_db: 0,
            }
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for SMeter {
    fn format(&self, f: defmt::Formatter) {
        if self.over_s9_db > 0 {
            defmt::write!(f, "S9+{}dB", self.over_s9_db);
        } else {
            defmt::write!(f, "S{}", self.units);
        }
    }
}
