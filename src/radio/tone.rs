//! Tone Classifier
//!
//! Decodes REG_0C into a [`ToneStatus`]. The order of checks matters: a
//! tail tone must win over a CTC1 bit that is still latched from the
//! transmission that is ending.

use super::session::RadioSession;
use super::state::RadioState;
use crate::bk4819::{Bk4819, StatusRegister};
use crate::types::{CodeType, RadioMode, ToneStatus};

/// Inputs of the priority table besides the register itself
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToneContext {
    /// Code configured on the current VFO
    pub code_type: CodeType,
    /// Mute unless a code matches
    pub mute_enabled: bool,
    /// Manual squelch-open override
    pub monitor_mode: bool,
}

/// One row of the priority table
#[derive(Clone, Copy)]
pub struct ToneRule {
    /// Short name used in logs and tests
    pub name: &'static str,
    /// Predicate over the register and context
    pub matches: fn(StatusRegister, &ToneContext) -> bool,
    /// Status returned when the predicate holds
    pub status: ToneStatus,
}

impl core::fmt::Debug for ToneRule {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "ToneRule({} -> {:?})", self.name, self.status)
    }
}

/// Classification rules, first match wins
pub static TONE_RULES: [ToneRule; 7] = [
    ToneRule {
        name: "monitor",
        matches: |_, ctx| ctx.monitor_mode,
        status: ToneStatus::GotTone,
    },
    ToneRule {
        name: "ctc2-tail",
        matches: |reg, _| reg.ctc2_received(),
        status: ToneStatus::TailTone,
    },
    ToneRule {
        name: "ctc1-ctcss",
        matches: |reg, ctx| reg.ctc1_received() && matches!(ctx.code_type, CodeType::Ctcss),
        status: ToneStatus::GotTone,
    },
    ToneRule {
        name: "ctc1-tail",
        matches: |reg, ctx| reg.ctc1_received() && (ctx.code_type.is_dcs() || ctx.mute_enabled),
        status: ToneStatus::TailTone,
    },
    ToneRule {
        name: "dcs-normal",
        matches: |reg, ctx| {
            reg.cdcss_pos() && (matches!(ctx.code_type, CodeType::DcsInverted) || ctx.mute_enabled)
        },
        status: ToneStatus::GotTone,
    },
    ToneRule {
        name: "dcs-inverted",
        matches: |reg, ctx| reg.cdcss_neg() && matches!(ctx.code_type, CodeType::DcsNormal),
        status: ToneStatus::GotTone,
    },
    ToneRule {
        name: "open-squelch",
        matches: |_, ctx| matches!(ctx.code_type, CodeType::Off) && !ctx.mute_enabled,
        status: ToneStatus::GotTone,
    },
];

/// Find the first rule matching the register
#[must_use]
pub fn matching_rule(reg: StatusRegister, ctx: &ToneContext) -> Option<&'static ToneRule> {
    TONE_RULES.iter().find(|rule| (rule.matches)(reg, ctx))
}

/// Classify a register value without touching hardware
#[must_use]
pub fn decide(reg: StatusRegister, ctx: &ToneContext) -> ToneStatus {
    matching_rule(reg, ctx).map_or(ToneStatus::NoTone, |rule| rule.status)
}

/// Weather-band classification: only the CTC1 alert tone counts
#[must_use]
pub const fn decide_noaa(reg: StatusRegister) -> ToneStatus {
    if reg.ctc1_received() {
        ToneStatus::GotTone
    } else {
        ToneStatus::NoTone
    }
}

/// Read REG_0C and classify the current tone condition
///
/// If the chip has an interrupt pending while plain receiving, the session
/// services it first and the register is read again.
///
/// # Errors
///
/// Returns the bus error if a register read fails.
pub fn classify<B, S>(
    bk: &mut B,
    session: &mut S,
    radio: &mut RadioState,
    code_type: CodeType,
    mute_enabled: bool,
) -> Result<ToneStatus, B::Error>
where
    B: Bk4819,
    S: RadioSession,
{
    let mut reg = bk.read_status()?;

    if radio.noaa.active {
        return Ok(decide_noaa(reg));
    }

    if reg.irq() && radio.mode == RadioMode::Rx {
        session.receiver_check(radio);
        reg = bk.read_status()?;
    }

    let ctx = ToneContext {
        code_type,
        mute_enabled,
        monitor_mode: radio.monitor_mode,
    };
    let status = decide(reg, &ctx);

    #[cfg(feature = "embedded")]
    defmt::trace!("tone: {} {} -> {}", reg, code_type, status);

    Ok(status)
}
