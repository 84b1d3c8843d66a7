//! Radio Control Logic
//!
//! Tone classification, signal metering and the reception state machine
//! that together make up the RSSI task.

pub mod meter;
pub mod noaa;
pub mod reception;
pub mod session;
pub mod state;
pub mod tone;
pub mod vfo;
