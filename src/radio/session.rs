//! Receive-chain lifecycle
//!
//! The radio session owns the RX/audio sequencing (tuning, AF routing,
//! speaker amp, mode changes). The RSSI task only decides *when* to call it.

use super::state::RadioState;

/// Receive-chain lifecycle operations
///
/// Each call may update the shared state, typically the radio mode and the
/// reception/audio flags.
pub trait RadioSession {
    /// Service a pending BK4819 interrupt (squelch edges, FSK/DTMF data)
    fn receiver_check(&mut self, radio: &mut RadioState);

    /// Begin the full receive chain for the incoming signal
    fn start_rx(&mut self, radio: &mut RadioState);

    /// Stop the receive chain and go back to searching
    fn end_rx(&mut self, radio: &mut RadioState);

    /// Route received audio to the speaker
    fn start_audio(&mut self, radio: &mut RadioState);

    /// Mute received audio but keep the receive chain up
    fn end_audio(&mut self, radio: &mut RadioState);
}
