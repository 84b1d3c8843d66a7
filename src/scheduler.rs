//! Cooperative scheduler interface
//!
//! The radio runs its periodic work as flag-driven tasks: a tick source sets
//! a task's due flag, the task body checks and clears it. The RSSI task only
//! consumes that contract; [`TaskFlags`] is a minimal in-crate implementation
//! for the embassy runner and for host tests.

/// Scheduler task slots driven from this crate
///
/// The other firmware tasks share the same flag word but are scheduled
/// elsewhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskId {
    /// Tone and signal strength monitoring
    CheckRssi,
}

impl TaskId {
    /// Bit used for this task in a flag word
    #[must_use]
    pub const fn mask(self) -> u16 {
        1 << (self as u16)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for TaskId {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::CheckRssi => defmt::write!(f, "CHECK_RSSI"),
        }
    }
}

/// Due-flag query and acknowledge
pub trait Scheduler {
    /// Check whether the task's tick has come up
    fn is_due(&self, task: TaskId) -> bool;

    /// Acknowledge the tick so the body runs at most once per period
    fn clear(&mut self, task: TaskId);
}

/// Due flags packed into one word
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskFlags(u16);

impl TaskFlags {
    /// Create with no task due
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Mark a task due
    pub fn set(&mut self, task: TaskId) {
        self.0 |= task.mask();
    }
}

impl Scheduler for TaskFlags {
    fn is_due(&self, task: TaskId) -> bool {
        self.0 & task.mask() != 0
    }

    fn clear(&mut self, task: TaskId) {
        self.0 &= !task.mask();
    }
}

/// Tick countdown shared between tasks
///
/// One side decrements it every tick; the other waits for zero and reloads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CountdownTimer {
    remaining: u16,
}

impl CountdownTimer {
    /// Create an already expired timer
    #[must_use]
    pub const fn expired() -> Self {
        Self { remaining: 0 }
    }

    /// Ticks left before expiry
    #[must_use]
    pub const fn remaining(&self) -> u16 {
        self.remaining
    }

    /// Check if the countdown reached zero
    #[must_use]
    pub const fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Restart the countdown
    pub fn reload(&mut self, ticks: u16) {
        self.remaining = ticks;
    }

    /// Advance by one tick (saturates at zero)
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for CountdownTimer {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Countdown({}t)", self.remaining);
    }
}
