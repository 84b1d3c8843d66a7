//! NOAA weather-band receive
//!
//! Weather channels use a single 1050 Hz alert tone detected on CTC1 and no
//! tail tone. Locking onto a channel bypasses the generic receive start
//! because weather channel hopping has its own sequencing.

use super::meter::SignalScale;
use super::reception::{IncomingStrategy, Peripherals, StandardIncoming, TickOutcome};
use super::session::RadioSession;
use super::state::RadioState;
use crate::bk4819::Bk4819;
use crate::types::ToneStatus;
use crate::ui::Display;

/// Weather channel index
///
/// Tuning and the channel-to-frequency table belong to the hop sequence;
/// this task only moves the index and hands it to the display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoaaChannel(u8);

impl NoaaChannel {
    /// First channel in the table
    pub const FIRST: Self = Self(0);

    /// Number of weather channels
    pub const COUNT: u8 = 10;

    /// Create from index, returns None if out of range
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Zero-based channel index
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for NoaaChannel {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "WX{}", self.0 + 1);
    }
}

/// Weather-band receive state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoaaState {
    /// Hopping between weather channels, waiting for the alert tone
    pub active: bool,
    /// Channel currently received
    pub channel_now: NoaaChannel,
    /// Channel the hop sequence tuned to last
    pub channel_next: NoaaChannel,
}

impl NoaaState {
    /// Weather band off
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            active: false,
            channel_now: NoaaChannel::FIRST,
            channel_next: NoaaChannel::FIRST,
        }
    }

    /// Start monitoring from a channel
    #[must_use]
    pub const fn monitoring(channel: NoaaChannel) -> Self {
        Self {
            active: true,
            channel_now: channel,
            channel_next: channel,
        }
    }

    /// Commit the hop target as the received channel and stop hopping
    pub fn lock(&mut self) -> NoaaChannel {
        self.active = false;
        self.channel_now = self.channel_next;
        self.channel_now
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for NoaaState {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Noaa(active={}, now={}, next={})",
            self.active,
            self.channel_now,
            self.channel_next
        );
    }
}

/// Incoming handling with weather-band support
///
/// Outside weather mode it behaves like [`StandardIncoming`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoaaIncoming;

impl IncomingStrategy for NoaaIncoming {
    fn on_incoming<B, S, D, C>(
        &mut self,
        status: ToneStatus,
        radio: &mut RadioState,
        io: &mut Peripherals<B, S, D, C>,
    ) -> Result<TickOutcome, B::Error>
    where
        B: Bk4819,
        S: RadioSession,
        D: Display,
        C: SignalScale,
    {
        if !radio.noaa.active {
            return Ok(StandardIncoming::handle(status, radio, &mut io.session));
        }

        if radio.reception_mode || status != ToneStatus::GotTone {
            return Ok(TickOutcome::Idle);
        }

        radio.reception_mode = true;
        let channel = radio.noaa.lock();
        io.display.draw_sky();
        io.display.draw_noaa(channel);
        radio.receiving_audio = true;
        io.display.screen_on();
        io.bk.start_audio()?;

        #[cfg(feature = "embedded")]
        defmt::info!("noaa: locked {}", channel);

        Ok(TickOutcome::NoaaLocked)
    }
}
