//! User Interface
//!
//! Display sinks the RSSI task draws into, and the UI flags that decide
//! whether the signal meter may take over the status area.

use crate::radio::noaa::NoaaChannel;
use crate::types::{SMeter, Vfo};

/// UI screen/mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScreenMode {
    /// Main operating screen
    #[default]
    Main,
    /// Menu screen
    Menu,
    /// Frequency/CTCSS scanner
    Scanner,
}

#[cfg(feature = "embedded")]
impl defmt::Format for ScreenMode {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Main => defmt::write!(f, "Main"),
            Self::Menu => defmt::write!(f, "Menu"),
            Self::Scanner => defmt::write!(f, "Scanner"),
        }
    }
}

/// UI state that competes with the signal meter for the display
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiFlags {
    /// Received data (FSK/DTMF text) is on screen
    pub data_display: bool,
    /// User is typing a DTMF string
    pub dtmf_input_mode: bool,
    /// Frequency detection scan is running
    pub frequency_detect_mode: bool,
    /// FSK packet waiting to be shown
    pub fsk_data_received: bool,
    /// Active screen
    pub screen: ScreenMode,
}

impl UiFlags {
    /// Main screen with nothing else showing
    #[must_use]
    pub const fn new() -> Self {
        Self {
            data_display: false,
            dtmf_input_mode: false,
            frequency_detect_mode: false,
            fsk_data_received: false,
            screen: ScreenMode::Main,
        }
    }

    /// Check if nothing is occupying the main screen's meter area
    #[must_use]
    pub const fn meter_visible(&self) -> bool {
        !self.data_display
            && !self.dtmf_input_mode
            && !self.frequency_detect_mode
            && !self.fsk_data_received
            && matches!(self.screen, ScreenMode::Main)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for UiFlags {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Ui({}, data={}, dtmf={}, fdet={}, fsk={})",
            self.screen,
            self.data_display,
            self.dtmf_input_mode,
            self.frequency_detect_mode,
            self.fsk_data_received
        );
    }
}

/// Display operations used by the receive path
///
/// `full_redraw` requests a complete repaint of the element instead of an
/// incremental update.
pub trait Display {
    /// Draw the 0-100 signal bar on a VFO row
    fn draw_bar(&mut self, percent: u8, vfo: Vfo);

    /// Draw the received level in dBm on a VFO row
    fn draw_rx_dbm(&mut self, vfo: Vfo, dbm: i16, full_redraw: bool);

    /// Draw the S-meter reading on a VFO row
    fn draw_rx_smeter(&mut self, vfo: Vfo, smeter: SMeter, full_redraw: bool);

    /// Refresh the battery voltage indicator on a VFO row
    fn draw_voltage(&mut self, vfo: Vfo);

    /// Draw the weather-band status icon
    fn draw_sky(&mut self);

    /// Draw the weather channel name
    fn draw_noaa(&mut self, channel: NoaaChannel);

    /// Power the screen and backlight on
    fn screen_on(&mut self);
}
