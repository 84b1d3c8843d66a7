//! Recording collaborators shared by the integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::convert::Infallible;

use squelch_firmware::bk4819::Bk4819;
use squelch_firmware::config::{REG_RSSI, REG_STATUS};
use squelch_firmware::radio::meter::Bk4819Scale;
use squelch_firmware::radio::noaa::NoaaChannel;
use squelch_firmware::radio::reception::Peripherals;
use squelch_firmware::radio::session::RadioSession;
use squelch_firmware::radio::state::RadioState;
use squelch_firmware::types::{SMeter, Vfo};
use squelch_firmware::ui::Display;

// REG_0C bits
pub const IRQ: u16 = 1 << 0;
pub const CTC1: u16 = 1 << 10;
pub const CTC2: u16 = 1 << 11;
pub const DCS_POS: u16 = 1 << 14;
pub const DCS_NEG: u16 = 1 << 15;

/// BK4819 stand-in with scripted register values
#[derive(Debug, Default)]
pub struct MockBk {
    /// Values returned by successive REG_0C reads, then `status`
    pub status_script: VecDeque<u16>,
    /// Steady-state REG_0C value
    pub status: u16,
    /// REG_67 value
    pub rssi: u16,
    /// Registers read, in order
    pub reads: Vec<u8>,
    /// `start_audio` calls
    pub audio_starts: usize,
}

impl MockBk {
    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    pub fn status_reads(&self) -> usize {
        self.reads.iter().filter(|&&r| r == REG_STATUS).count()
    }

    pub fn rssi_reads(&self) -> usize {
        self.reads.iter().filter(|&&r| r == REG_RSSI).count()
    }
}

impl Bk4819 for MockBk {
    type Error = Infallible;

    fn read_register(&mut self, address: u8) -> Result<u16, Infallible> {
        self.reads.push(address);
        Ok(match address {
            REG_STATUS => self.status_script.pop_front().unwrap_or(self.status),
            REG_RSSI => self.rssi,
            _ => 0,
        })
    }

    fn start_audio(&mut self) -> Result<(), Infallible> {
        self.audio_starts += 1;
        Ok(())
    }
}

/// Bus error raised by [`FailingBk`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusError;

/// BK4819 whose bus fails on a chosen register
#[derive(Debug, Default)]
pub struct FailingBk {
    pub fail_on: u8,
    pub status: u16,
}

impl Bk4819 for FailingBk {
    type Error = BusError;

    fn read_register(&mut self, address: u8) -> Result<u16, BusError> {
        if address == self.fail_on {
            Err(BusError)
        } else {
            Ok(self.status)
        }
    }

    fn start_audio(&mut self) -> Result<(), BusError> {
        Err(BusError)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCall {
    ReceiverCheck,
    StartRx,
    EndRx,
    StartAudio,
    EndAudio,
}

/// Session that only records what it was asked to do
#[derive(Debug, Default)]
pub struct RecordingSession {
    pub calls: Vec<SessionCall>,
}

impl RecordingSession {
    pub fn count(&self, call: SessionCall) -> usize {
        self.calls.iter().filter(|&&c| c == call).count()
    }
}

impl RadioSession for RecordingSession {
    fn receiver_check(&mut self, _radio: &mut RadioState) {
        self.calls.push(SessionCall::ReceiverCheck);
    }

    fn start_rx(&mut self, _radio: &mut RadioState) {
        self.calls.push(SessionCall::StartRx);
    }

    fn end_rx(&mut self, _radio: &mut RadioState) {
        self.calls.push(SessionCall::EndRx);
    }

    fn start_audio(&mut self, _radio: &mut RadioState) {
        self.calls.push(SessionCall::StartAudio);
    }

    fn end_audio(&mut self, _radio: &mut RadioState) {
        self.calls.push(SessionCall::EndAudio);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayCall {
    Bar(u8, Vfo),
    Dbm(Vfo, i16),
    Smeter(Vfo, SMeter),
    Voltage(Vfo),
    Sky,
    Noaa(NoaaChannel),
    ScreenOn,
}

/// Display that records draw calls
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub calls: Vec<DisplayCall>,
}

impl RecordingDisplay {
    pub fn bars(&self) -> Vec<(u8, Vfo)> {
        self.calls
            .iter()
            .filter_map(|c| match *c {
                DisplayCall::Bar(p, v) => Some((p, v)),
                _ => None,
            })
            .collect()
    }

    pub fn voltage_draws(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DisplayCall::Voltage(_)))
            .count()
    }
}

impl Display for RecordingDisplay {
    fn draw_bar(&mut self, percent: u8, vfo: Vfo) {
        self.calls.push(DisplayCall::Bar(percent, vfo));
    }

    fn draw_rx_dbm(&mut self, vfo: Vfo, dbm: i16, _full_redraw: bool) {
        self.calls.push(DisplayCall::Dbm(vfo, dbm));
    }

    fn draw_rx_smeter(&mut self, vfo: Vfo, smeter: SMeter, _full_redraw: bool) {
        self.calls.push(DisplayCall::Smeter(vfo, smeter));
    }

    fn draw_voltage(&mut self, vfo: Vfo) {
        self.calls.push(DisplayCall::Voltage(vfo));
    }

    fn draw_sky(&mut self) {
        self.calls.push(DisplayCall::Sky);
    }

    fn draw_noaa(&mut self, channel: NoaaChannel) {
        self.calls.push(DisplayCall::Noaa(channel));
    }

    fn screen_on(&mut self) {
        self.calls.push(DisplayCall::ScreenOn);
    }
}

pub type MockPeripherals = Peripherals<MockBk, RecordingSession, RecordingDisplay>;

pub fn peripherals(bk: MockBk) -> MockPeripherals {
    Peripherals::new(
        bk,
        RecordingSession::default(),
        RecordingDisplay::default(),
        Bk4819Scale,
    )
}
