//! Tone Classifier Tests
//!
//! Priority order of the REG_0C decision table, NOAA handling and the
//! interrupt re-sync.
//! Run with: cargo test --no-default-features --features std --test tone_tests

mod common;

use common::{MockBk, RecordingSession, SessionCall, CTC1, CTC2, DCS_NEG, DCS_POS, IRQ};
use squelch_firmware::bk4819::StatusRegister;
use squelch_firmware::radio::noaa::{NoaaChannel, NoaaState};
use squelch_firmware::radio::state::RadioState;
use squelch_firmware::radio::tone::{classify, decide, matching_rule, ToneContext, TONE_RULES};
use squelch_firmware::radio::vfo::{VfoManager, VfoSettings};
use squelch_firmware::types::{CodeType, RadioMode, ToneStatus};

const ALL_CODES: [CodeType; 4] = [
    CodeType::Off,
    CodeType::Ctcss,
    CodeType::DcsNormal,
    CodeType::DcsInverted,
];

fn ctx(code_type: CodeType, mute_enabled: bool) -> ToneContext {
    ToneContext {
        code_type,
        mute_enabled,
        monitor_mode: false,
    }
}

fn reg(bits: u16) -> StatusRegister {
    StatusRegister::from_bits(bits)
}

fn radio() -> RadioState {
    RadioState::new(VfoManager::new(VfoSettings::carrier(), VfoSettings::carrier()))
}

// =============================================================================
// Register Layout
// =============================================================================

#[test]
fn status_register_named_bits() {
    let r = reg(IRQ | CTC1 | CTC2 | DCS_POS | DCS_NEG);
    assert!(r.irq());
    assert!(r.ctc1_received());
    assert!(r.ctc2_received());
    assert!(r.cdcss_pos());
    assert!(r.cdcss_neg());
    assert!(!r.squelch());
    assert!(!r.vox());
}

#[test]
fn status_register_ignores_unrelated_bits() {
    let r = reg(0x03F8);
    assert!(!r.irq());
    assert!(!r.ctc1_received());
    assert!(!r.ctc2_received());
    assert!(!r.cdcss_pos());
    assert!(!r.cdcss_neg());
}

// =============================================================================
// Decision Table
// =============================================================================

#[test]
fn ctcss_match_gives_tone() {
    assert_eq!(decide(reg(CTC1), &ctx(CodeType::Ctcss, false)), ToneStatus::GotTone);
}

#[test]
fn open_squelch_with_empty_register_gives_tone() {
    assert_eq!(decide(reg(0), &ctx(CodeType::Off, false)), ToneStatus::GotTone);
}

#[test]
fn muted_carrier_without_tone_is_no_tone() {
    assert_eq!(decide(reg(0), &ctx(CodeType::Off, true)), ToneStatus::NoTone);
}

#[test]
fn tail_tone_dominates_ctc1() {
    for code in ALL_CODES {
        for mute in [false, true] {
            assert_eq!(
                decide(reg(CTC1 | CTC2), &ctx(code, mute)),
                ToneStatus::TailTone,
                "code={code:?} mute={mute}"
            );
        }
    }
}

#[test]
fn ctc1_on_dcs_channel_is_tail() {
    assert_eq!(decide(reg(CTC1), &ctx(CodeType::DcsNormal, false)), ToneStatus::TailTone);
    assert_eq!(decide(reg(CTC1), &ctx(CodeType::DcsInverted, false)), ToneStatus::TailTone);
}

#[test]
fn ctc1_with_mute_is_tail() {
    assert_eq!(decide(reg(CTC1), &ctx(CodeType::Off, true)), ToneStatus::TailTone);
}

#[test]
fn ctc1_on_open_channel_falls_through_to_open_squelch() {
    assert_eq!(decide(reg(CTC1), &ctx(CodeType::Off, false)), ToneStatus::GotTone);
    assert_eq!(
        matching_rule(reg(CTC1), &ctx(CodeType::Off, false)).map(|r| r.name),
        Some("open-squelch")
    );
}

#[test]
fn dcs_normal_bit_matches_inverted_code() {
    assert_eq!(decide(reg(DCS_POS), &ctx(CodeType::DcsInverted, false)), ToneStatus::GotTone);
    assert_eq!(decide(reg(DCS_POS), &ctx(CodeType::DcsNormal, false)), ToneStatus::NoTone);
}

#[test]
fn dcs_normal_bit_matches_with_mute() {
    assert_eq!(decide(reg(DCS_POS), &ctx(CodeType::Ctcss, true)), ToneStatus::GotTone);
}

#[test]
fn dcs_inverted_bit_matches_normal_code() {
    assert_eq!(decide(reg(DCS_NEG), &ctx(CodeType::DcsNormal, false)), ToneStatus::GotTone);
    assert_eq!(decide(reg(DCS_NEG), &ctx(CodeType::DcsInverted, false)), ToneStatus::NoTone);
    assert_eq!(decide(reg(DCS_NEG), &ctx(CodeType::Ctcss, true)), ToneStatus::NoTone);
}

#[test]
fn ctcss_without_tone_is_no_tone() {
    assert_eq!(decide(reg(0), &ctx(CodeType::Ctcss, false)), ToneStatus::NoTone);
}

#[test]
fn monitor_overrides_everything_but_noaa() {
    let monitor = ToneContext {
        code_type: CodeType::Ctcss,
        mute_enabled: true,
        monitor_mode: true,
    };
    assert_eq!(decide(reg(CTC2), &monitor), ToneStatus::GotTone);
    assert_eq!(decide(reg(0), &monitor), ToneStatus::GotTone);
}

#[test]
fn rule_table_order() {
    let names: Vec<&str> = TONE_RULES.iter().map(|r| r.name).collect();
    assert_eq!(
        names,
        [
            "monitor",
            "ctc2-tail",
            "ctc1-ctcss",
            "ctc1-tail",
            "dcs-normal",
            "dcs-inverted",
            "open-squelch"
        ]
    );
}

// =============================================================================
// Hardware Path
// =============================================================================

#[test]
fn classify_reads_status_once_without_irq() {
    let mut bk = MockBk::with_status(CTC1);
    let mut session = RecordingSession::default();
    let mut radio = radio();

    let status = classify(&mut bk, &mut session, &mut radio, CodeType::Ctcss, false).unwrap();

    assert_eq!(status, ToneStatus::GotTone);
    assert_eq!(bk.status_reads(), 1);
    assert!(session.calls.is_empty());
}

#[test]
fn classify_services_irq_and_rereads() {
    let mut bk = MockBk::with_status(CTC2);
    bk.status_script.push_back(IRQ | CTC1);
    let mut session = RecordingSession::default();
    let mut radio = radio();

    let status = classify(&mut bk, &mut session, &mut radio, CodeType::Ctcss, false).unwrap();

    // The re-read value (tail tone) decides, not the first one
    assert_eq!(status, ToneStatus::TailTone);
    assert_eq!(bk.status_reads(), 2);
    assert_eq!(session.calls, [SessionCall::ReceiverCheck]);
}

#[test]
fn classify_ignores_irq_outside_plain_rx() {
    let mut bk = MockBk::with_status(IRQ);
    let mut session = RecordingSession::default();
    let mut radio = radio().with_mode(RadioMode::Incoming);

    classify(&mut bk, &mut session, &mut radio, CodeType::Off, false).unwrap();

    assert_eq!(bk.status_reads(), 1);
    assert!(session.calls.is_empty());
}

#[test]
fn classify_applies_monitor_after_resync() {
    let mut bk = MockBk::with_status(0);
    bk.status_script.push_back(IRQ);
    let mut session = RecordingSession::default();
    let mut radio = radio();
    radio.monitor_mode = true;

    let status = classify(&mut bk, &mut session, &mut radio, CodeType::DcsNormal, true).unwrap();

    assert_eq!(status, ToneStatus::GotTone);
    assert_eq!(session.calls, [SessionCall::ReceiverCheck]);
}

#[test]
fn noaa_only_looks_at_ctc1() {
    let mut radio = radio().with_noaa(NoaaState::monitoring(NoaaChannel::FIRST));
    radio.monitor_mode = true;

    for code in ALL_CODES {
        for mute in [false, true] {
            let mut session = RecordingSession::default();

            let mut bk = MockBk::with_status(CTC1 | CTC2 | IRQ);
            let got = classify(&mut bk, &mut session, &mut radio, code, mute).unwrap();
            assert_eq!(got, ToneStatus::GotTone);

            let mut bk = MockBk::with_status(CTC2 | DCS_POS | DCS_NEG | IRQ);
            let none = classify(&mut bk, &mut session, &mut radio, code, mute).unwrap();
            assert_eq!(none, ToneStatus::NoTone);

            // No interrupt servicing in weather mode
            assert!(session.calls.is_empty());
            assert_eq!(bk.status_reads(), 1);
        }
    }
}
