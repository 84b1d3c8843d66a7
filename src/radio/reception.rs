//! Reception Controller
//!
//! The per-tick state machine of the RSSI task. While searching it counts
//! tail-tone and no-tone ticks and tears reception down once either count
//! runs past its limit; while a carrier is incoming it decides whether to
//! start the receive chain or open audio.

use super::meter::{Bk4819Scale, SignalMeter, SignalScale};
use super::session::RadioSession;
use super::state::RadioState;
use super::tone;
use crate::bk4819::Bk4819;
use crate::config::RssiTaskConfig;
use crate::scheduler::{Scheduler, TaskId};
use crate::types::{RadioMode, ToneStatus};
use crate::ui::Display;

/// Collaborators the RSSI task drives
#[derive(Debug)]
pub struct Peripherals<B, S, D, C = Bk4819Scale> {
    /// Baseband chip
    pub bk: B,
    /// Receive-chain lifecycle
    pub session: S,
    /// Display sinks
    pub display: D,
    /// RSSI unit conversions
    pub scale: C,
}

impl<B, S, D, C> Peripherals<B, S, D, C> {
    /// Bundle the collaborators
    pub const fn new(bk: B, session: S, display: D, scale: C) -> Self {
        Self {
            bk,
            session,
            display,
            scale,
        }
    }
}

/// Tail-tone and no-tone hysteresis counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HysteresisCounters {
    tail_tone: u16,
    no_tone: u16,
}

impl HysteresisCounters {
    /// Create zeroed counters
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tail_tone: 0,
            no_tone: 0,
        }
    }

    /// Consecutive tail-tone ticks
    #[must_use]
    pub const fn tail_tone(&self) -> u16 {
        self.tail_tone
    }

    /// Accumulated no-tone ticks
    #[must_use]
    pub const fn no_tone(&self) -> u16 {
        self.no_tone
    }

    /// Account one searching tick
    ///
    /// Returns true while the signal is still considered present. Each
    /// counter only runs while its own condition repeats, so any tone
    /// clears the no-tone count, even after a teardown.
    pub fn observe(&mut self, status: ToneStatus, config: &RssiTaskConfig) -> bool {
        if status == ToneStatus::TailTone {
            self.tail_tone = self.tail_tone.saturating_add(1);
        } else {
            self.tail_tone = 0;
        }

        if status == ToneStatus::NoTone {
            self.no_tone = self.no_tone.saturating_add(1);
        } else {
            self.no_tone = 0;
        }

        self.tail_tone <= config.tail_tone_limit && self.no_tone <= config.no_tone_limit
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for HysteresisCounters {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Hyst(tail={}, none={})", self.tail_tone, self.no_tone);
    }
}

/// What a tick did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Gates closed or task not due
    Skipped,
    /// Still searching with the signal present
    SignalHeld {
        /// Meter value if the meter refreshed this tick
        percent: Option<u8>,
    },
    /// Limits exceeded with no reception: receive chain stopped
    EndRx,
    /// Limits exceeded during reception: audio muted
    EndAudio,
    /// Incoming carrier promoted to audible audio
    StartAudio,
    /// Incoming carrier accepted, receive chain started
    StartRx,
    /// Weather channel locked and audio started
    NoaaLocked,
    /// Incoming carrier without a matching tone
    Idle,
}

#[cfg(feature = "embedded")]
impl defmt::Format for TickOutcome {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Skipped => defmt::write!(f, "Skipped"),
            Self::SignalHeld { percent } => defmt::write!(f, "SignalHeld({})", percent),
            Self::EndRx => defmt::write!(f, "EndRx"),
            Self::EndAudio => defmt::write!(f, "EndAudio"),
            Self::StartAudio => defmt::write!(f, "StartAudio"),
            Self::StartRx => defmt::write!(f, "StartRx"),
            Self::NoaaLocked => defmt::write!(f, "NoaaLocked"),
            Self::Idle => defmt::write!(f, "Idle"),
        }
    }
}

/// Handler for ticks in [`RadioMode::Incoming`]
pub trait IncomingStrategy {
    /// React to the classified status of an incoming carrier
    ///
    /// # Errors
    ///
    /// Returns the bus error if a chip operation fails.
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
        C: SignalScale;
}

/// Incoming handling without weather-band support
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StandardIncoming;

impl StandardIncoming {
    /// Start audio or the receive chain as the VFO settings allow
    pub fn handle<S: RadioSession>(
        status: ToneStatus,
        radio: &mut RadioState,
        session: &mut S,
    ) -> TickOutcome {
        let vfo = *radio.current_settings();

        if radio.reception_mode {
            session.start_audio(radio);
            TickOutcome::StartAudio
        } else if vfo.is_open_squelch()
            || vfo.modulation.bypasses_tone_squelch()
            || status == ToneStatus::GotTone
        {
            session.start_rx(radio);
            TickOutcome::StartRx
        } else {
            TickOutcome::Idle
        }
    }
}

impl IncomingStrategy for StandardIncoming {
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
        Ok(Self::handle(status, radio, &mut io.session))
    }
}

/// The RSSI task
///
/// Owns the hysteresis counters and drives the collaborators in
/// [`Peripherals`]. Call [`ReceptionController::run`] once per scheduler
/// tick.
#[derive(Debug)]
pub struct ReceptionController<B, S, D, H = StandardIncoming, C = Bk4819Scale> {
    io: Peripherals<B, S, D, C>,
    incoming: H,
    meter: SignalMeter,
    counters: HysteresisCounters,
    config: RssiTaskConfig,
}

impl<B, S, D, H, C> ReceptionController<B, S, D, H, C>
where
    B: Bk4819,
    S: RadioSession,
    D: Display,
    H: IncomingStrategy,
    C: SignalScale,
{
    /// Create a controller
    pub fn new(io: Peripherals<B, S, D, C>, incoming: H, config: RssiTaskConfig) -> Self {
        Self {
            io,
            incoming,
            meter: SignalMeter::new(config.meter_interval_ticks),
            counters: HysteresisCounters::new(),
            config,
        }
    }

    /// Hysteresis counters
    #[must_use]
    pub const fn counters(&self) -> &HysteresisCounters {
        &self.counters
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &RssiTaskConfig {
        &self.config
    }

    /// Collaborators
    pub fn peripherals(&self) -> &Peripherals<B, S, D, C> {
        &self.io
    }

    /// Mutable collaborators
    pub fn peripherals_mut(&mut self) -> &mut Peripherals<B, S, D, C> {
        &mut self.io
    }

    /// Run the task if its gates are open and its tick is due
    ///
    /// Clears the scheduler flag before doing any work so the body runs at
    /// most once per due tick.
    ///
    /// # Errors
    ///
    /// Returns the bus error if a register access fails.
    pub fn run<T: Scheduler>(
        &mut self,
        radio: &mut RadioState,
        scheduler: &mut T,
    ) -> Result<TickOutcome, B::Error> {
        if !radio.rssi_check_allowed() || !scheduler.is_due(TaskId::CheckRssi) {
            return Ok(TickOutcome::Skipped);
        }

        scheduler.clear(TaskId::CheckRssi);
        self.tick(radio)
    }

    /// One pass of the state machine, without gating
    ///
    /// Code type, mute and modulation are all taken from the selected VFO.
    ///
    /// # Errors
    ///
    /// Returns the bus error if a register access fails.
    pub fn tick(&mut self, radio: &mut RadioState) -> Result<TickOutcome, B::Error> {
        let settings = *radio.current_settings();
        let status = tone::classify(
            &mut self.io.bk,
            &mut self.io.session,
            radio,
            settings.code_type,
            settings.mute_enabled,
        )?;

        let outcome = if radio.mode == RadioMode::Incoming {
            self.incoming.on_incoming(status, radio, &mut self.io)?
        } else {
            self.search(status, radio)?
        };

        #[cfg(feature = "embedded")]
        if !matches!(outcome, TickOutcome::SignalHeld { .. } | TickOutcome::Idle) {
            defmt::debug!("rssi task: {} on {} ({})", outcome, status, self.counters);
        }

        Ok(outcome)
    }

    fn search(&mut self, status: ToneStatus, radio: &mut RadioState) -> Result<TickOutcome, B::Error> {
        if self.counters.observe(status, &self.config) {
            let percent = self.meter.poll(radio, &mut self.io)?;
            self.io.display.draw_voltage(radio.current_vfo().other());
            Ok(TickOutcome::SignalHeld { percent })
        } else if !radio.reception_mode {
            self.io.session.end_rx(radio);
            Ok(TickOutcome::EndRx)
        } else {
            self.io.session.end_audio(radio);
            Ok(TickOutcome::EndAudio)
        }
    }
}
