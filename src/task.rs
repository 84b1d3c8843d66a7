//! Tick driver for the RSSI task
//!
//! [`drive_tick`] is one scheduler period as the rest of the firmware
//! would deliver it: the tick source marks the task due, and the VOX task
//! decrements the shared meter countdown (`vox_rssi_update_timer`). Neither
//! of those subsystems lives in this crate, so the driver stands in for both
//! before running the controller.
//!
//! With the `embedded` feature, [`run_check_rssi`] calls it from an embassy
//! ticker every [`TICK_INTERVAL_MS`](crate::config::TICK_INTERVAL_MS).
//! Firmware that has a real VOX task should call
//! [`ReceptionController::run`] directly and let VOX own the countdown.
//!
//! Generic tasks cannot be `#[embassy_executor::task]` themselves, so wrap
//! the runner in a concrete task:
//!
//! ```ignore
//! static RADIO: Mutex<CriticalSectionRawMutex, RefCell<RadioState>> = ...;
//!
//! #[embassy_executor::task]
//! async fn rssi_task(mut controller: ReceptionController<Bus, Session, Lcd>) {
//!     let _ = run_check_rssi(&mut controller, &RADIO).await;
//! }
//! ```

#[cfg(feature = "embedded")]
use core::cell::RefCell;

#[cfg(feature = "embedded")]
use embassy_sync::blocking_mutex::raw::RawMutex;
#[cfg(feature = "embedded")]
use embassy_sync::blocking_mutex::Mutex;
#[cfg(feature = "embedded")]
use embassy_time::{Duration, Ticker};

use crate::bk4819::Bk4819;
#[cfg(feature = "embedded")]
use crate::config::TICK_INTERVAL_MS;
use crate::radio::meter::SignalScale;
use crate::radio::reception::{IncomingStrategy, ReceptionController, TickOutcome};
use crate::radio::session::RadioSession;
use crate::radio::state::RadioState;
use crate::scheduler::{TaskFlags, TaskId};
use crate::ui::Display;

/// Radio state shared between embassy tasks
#[cfg(feature = "embedded")]
pub type SharedRadioState<M> = Mutex<M, RefCell<RadioState>>;

/// Deliver one scheduler period to the RSSI task
///
/// Marks [`TaskId::CheckRssi`] due, advances the meter countdown on behalf
/// of the VOX task, then runs the controller.
///
/// # Errors
///
/// Returns the bus error if a register access fails.
pub fn drive_tick<B, S, D, H, C>(
    controller: &mut ReceptionController<B, S, D, H, C>,
    radio: &mut RadioState,
    flags: &mut TaskFlags,
) -> Result<TickOutcome, B::Error>
where
    B: Bk4819,
    S: RadioSession,
    D: Display,
    H: IncomingStrategy,
    C: SignalScale,
{
    flags.set(TaskId::CheckRssi);
    radio.vox_rssi_update_timer.tick();
    controller.run(radio, flags)
}

/// Drive the RSSI task until the bus fails
///
/// Returns the first bus error.
#[cfg(feature = "embedded")]
pub async fn run_check_rssi<M, B, S, D, H, C>(
    controller: &mut ReceptionController<B, S, D, H, C>,
    radio: &SharedRadioState<M>,
) -> B::Error
where
    M: RawMutex,
    B: Bk4819,
    S: RadioSession,
    D: Display,
    H: IncomingStrategy,
    C: SignalScale,
{
    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));
    let mut flags = TaskFlags::new();

    defmt::info!("rssi task started ({})", controller.config());

    loop {
        ticker.next().await;

        let result = radio.lock(|cell| drive_tick(controller, &mut cell.borrow_mut(), &mut flags));

        if let Err(err) = result {
            defmt::error!("rssi task: BK4819 bus error, stopping");
            return err;
        }
    }
}
