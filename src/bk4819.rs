//! BK4819 register access
//!
//! The RSSI task only needs two read-only registers from the baseband chip
//! and one audio-path primitive. The bus driver itself lives elsewhere and
//! plugs in through [`Bk4819`].

use bitfield_struct::bitfield;

use crate::config::{REG_RSSI, REG_STATUS, RSSI_MASK};

/// REG_0C: CTCSS/CDCSS/VoX/squelch/IRQ indicators (read-only)
#[bitfield(u16)]
#[derive(PartialEq, Eq)]
pub struct StatusRegister {
    /// Interrupt request pending
    pub irq: bool,
    /// Squelch result (1 = link)
    pub squelch: bool,
    /// VoX indicator
    pub vox: bool,
    #[bits(7)]
    __: u8,
    /// CTC1 tone received
    pub ctc1_received: bool,
    /// CTC2 (55 Hz tail tone) received
    pub ctc2_received: bool,
    /// CTCSS phase shift received
    #[bits(2)]
    pub ctcss_phase_shift: u8,
    /// CDCSS positive (normal polarity) code received
    pub cdcss_pos: bool,
    /// CDCSS negative (inverted polarity) code received
    pub cdcss_neg: bool,
}

#[cfg(feature = "embedded")]
impl defmt::Format for StatusRegister {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "REG_0C({=u16:#x})", self.into_bits());
    }
}

/// Register-level access to a BK4819
///
/// Implementations are trusted: a successful read always returns the value
/// the chip reported. Bus failures surface through `Error`.
pub trait Bk4819 {
    /// Bus error type
    type Error;

    /// Read a 16-bit register
    fn read_register(&mut self, address: u8) -> Result<u16, Self::Error>;

    /// Enable the chip's AF output and the board audio path
    fn start_audio(&mut self) -> Result<(), Self::Error>;

    /// Read the tone/interrupt status register
    fn read_status(&mut self) -> Result<StatusRegister, Self::Error> {
        self.read_register(REG_STATUS).map(StatusRegister::from_bits)
    }

    /// Read the raw RSSI value (0.5 dB/step)
    fn read_rssi(&mut self) -> Result<u16, Self::Error> {
        Ok(self.read_register(REG_RSSI)? & RSSI_MASK)
    }
}
