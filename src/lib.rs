//! Squelch and RSSI Monitoring Firmware Library
//!
//! This library implements the squelch-tone detection and signal-strength
//! monitoring task of a BK4819-based handheld FM transceiver. Once per
//! scheduler tick it reads the chip's tone status and RSSI registers,
//! decides whether to keep receiving, start receiving or tear reception
//! down, and updates the signal meter.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  RECEPTION CONTROLLER                        │
//! │   gating  │  hysteresis counters  │  incoming strategy       │
//! ├─────────────────────────────────────────────────────────────┤
//! │        TONE CLASSIFIER        │        SIGNAL METER          │
//! │   REG_0C priority table       │   REG_67 → %, dBm, S-meter   │
//! ├─────────────────────────────────────────────────────────────┤
//! │                  COLLABORATOR TRAITS                         │
//! │  Bk4819  │  RadioSession  │  Display  │  Scheduler           │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    RTOS / SCHEDULER                          │
//! │           embassy-rs ticker (embedded feature)               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Explicit shared state**: everything the task reads or writes lives in
//!   [`radio::state::RadioState`], passed by `&mut` into each tick
//! - **Auditable priority**: tone classification is an ordered rule table
//! - **Hardware at the edges**: register access, display and receive-chain
//!   sequencing are traits, so the state machine runs on the host
//! - **No unsafe**
//! - **Explicit error handling**: bus failures propagate as `Result`

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// BK4819 register access
///
/// Status register bitfield and the register-read trait.
pub mod bk4819;

/// Radio Control Logic
///
/// Tone classifier, signal meter and reception state machine.
pub mod radio;

/// Cooperative scheduler interface
///
/// Task due flags and tick countdowns.
pub mod scheduler;

/// User Interface
///
/// Display sinks and UI flags read by the meter.
pub mod ui;

/// Tick driver
///
/// One scheduler period for the RSSI task, and the embassy ticker loop
/// that delivers it (embedded feature).
pub mod task;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::bk4819::{Bk4819, StatusRegister};
    pub use crate::config::*;
    pub use crate::radio::meter::{rssi_to_percent, Bk4819Scale, SignalMeter, SignalScale};
    pub use crate::radio::noaa::{NoaaChannel, NoaaIncoming, NoaaState};
    pub use crate::radio::reception::{
        HysteresisCounters, IncomingStrategy, Peripherals, ReceptionController, StandardIncoming,
        TickOutcome,
    };
    pub use crate::radio::session::RadioSession;
    pub use crate::radio::state::RadioState;
    pub use crate::radio::vfo::{VfoManager, VfoSettings};
    pub use crate::scheduler::{CountdownTimer, Scheduler, TaskFlags, TaskId};
    pub use crate::task::drive_tick;
    pub use crate::types::*;
    pub use crate::ui::{Display, ScreenMode, UiFlags};

    // Logging
    #[cfg(feature = "embedded")]
    pub use defmt::{debug, error, info, trace, warn};
}
