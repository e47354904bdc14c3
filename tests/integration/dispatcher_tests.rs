//! Command frames in, port calls out.

use embedded_hal::digital::PinState;
use mbitmore::app::service::BridgeService;
use mbitmore::config::{BridgeConfig, Capabilities};
use mbitmore::protocol::command::{PullMode, ServoWrite};

use crate::mock_hw::{BoardCall, MockBoard};

const SET_OUTPUT: u8 = 0x21;
const SET_PWM: u8 = 0x22;
const SET_SERVO: u8 = 0x23;
const SET_PULL: u8 = 0x24;
const SET_TOUCH: u8 = 0x26;
const TEXT: u8 = 0x41;
const PIXELS_0: u8 = 0x42;
const PIXELS_1: u8 = 0x43;
const SHARED_DATA: u8 = 0x60;

fn make_service() -> (BridgeService, MockBoard) {
    (BridgeService::new(BridgeConfig::default()), MockBoard::new())
}

// ── Pin commands ──────────────────────────────────────────────

#[test]
fn set_output_drives_level() {
    let (mut svc, mut hw) = make_service();
    svc.handle_command(&[SET_OUTPUT, 8, 1], &mut hw);
    svc.handle_command(&[SET_OUTPUT, 8, 0], &mut hw);
    assert_eq!(
        hw.calls,
        vec![
            BoardCall::SetDigital { pin: 8, level: PinState::High },
            BoardCall::SetDigital { pin: 8, level: PinState::Low },
        ]
    );
}

#[test]
fn set_output_rejects_levels_above_one() {
    let (mut svc, mut hw) = make_service();
    svc.handle_command(&[SET_OUTPUT, 8, 2], &mut hw);
    svc.handle_command(&[SET_OUTPUT, 8, 0xFF], &mut hw);
    assert!(hw.calls.is_empty());
}

#[test]
fn pwm_is_clamped_to_platform_max() {
    let (mut svc, mut hw) = make_service();
    svc.handle_command(&[SET_PWM, 1, 0xFF, 0x03], &mut hw);
    svc.handle_command(&[SET_PWM, 1, 0x00, 0x02], &mut hw);
    assert_eq!(
        hw.calls,
        vec![
            BoardCall::SetAnalog { pin: 1, value: 1022 },
            BoardCall::SetAnalog { pin: 1, value: 512 },
        ]
    );
}

#[test]
fn pwm_clamp_follows_dal_capabilities() {
    let mut svc = BridgeService::new(BridgeConfig::for_platform(Capabilities::dal()));
    let mut hw = MockBoard::new();
    svc.handle_command(&[SET_PWM, 0, 0xFF, 0xFF], &mut hw);
    assert_eq!(hw.calls, vec![BoardCall::SetAnalog { pin: 0, value: 1021 }]);
}

#[test]
fn servo_overload_selected_by_non_zero_fields() {
    let (mut svc, mut hw) = make_service();
    svc.handle_command(&[SET_SERVO, 2, 90, 0], &mut hw);
    svc.handle_command(&[SET_SERVO, 2, 90, 0, 0, 0xB4, 0x00, 0, 0], &mut hw);
    svc.handle_command(&[SET_SERVO, 2, 90, 0, 0, 0xB4, 0x00, 45, 0], &mut hw);
    assert_eq!(
        hw.calls,
        vec![
            BoardCall::SetServo { pin: 2, write: ServoWrite::Angle(90) },
            BoardCall::SetServo {
                pin: 2,
                write: ServoWrite::AngleRange { angle: 90, range: 180 },
            },
            BoardCall::SetServo {
                pin: 2,
                write: ServoWrite::Full { angle: 90, range: 180, center: 45 },
            },
        ]
    );
}

#[test]
fn servo_with_zero_range_ignores_center() {
    let (mut svc, mut hw) = make_service();
    svc.handle_command(&[SET_SERVO, 2, 10, 0, 0, 0, 0, 45, 0], &mut hw);
    assert_eq!(
        hw.calls,
        vec![BoardCall::SetServo { pin: 2, write: ServoWrite::Angle(10) }]
    );
}

#[test]
fn set_pull_is_applied_and_remembered() {
    let (mut svc, mut hw) = make_service();
    svc.handle_command(&[SET_PULL, 13, 2], &mut hw);
    assert_eq!(hw.calls, vec![BoardCall::SetPull { pin: 13, mode: PullMode::Down }]);
    assert_eq!(svc.pull_mode(13), PullMode::Down);
}

#[test]
fn set_touch_enables_touch_mode() {
    let (mut svc, mut hw) = make_service();
    svc.handle_command(&[SET_TOUCH, 1], &mut hw);
    assert_eq!(hw.calls, vec![BoardCall::EnableTouch { pin: 1 }]);
}

// ── Malformed frames ──────────────────────────────────────────

#[test]
fn malformed_frames_are_no_ops() {
    let (mut svc, mut hw) = make_service();
    for frame in [
        &[][..],
        &[0x00, 1, 2][..],
        &[0xE0, 1][..],
        &[0x3F, 1, 1][..],
        &[SET_OUTPUT, 21, 1][..],
        &[SET_OUTPUT, 0xFF, 1][..],
        &[SET_OUTPUT, 1][..],
        &[SET_PWM, 1, 5][..],
        &[SET_SERVO, 1, 5][..],
        &[SET_PULL, 1, 7][..],
        &[PIXELS_0, 1, 2, 3][..],
        &[SHARED_DATA, 0, 1][..],
        &[SET_OUTPUT; 21][..],
    ] {
        svc.handle_command(frame, &mut hw);
    }
    assert!(hw.calls.is_empty(), "unexpected calls: {:?}", hw.calls);
}

// ── Display ───────────────────────────────────────────────────

#[test]
fn text_stops_animation_then_scrolls() {
    let (mut svc, mut hw) = make_service();
    let mut frame = vec![TEXT, 12];
    frame.extend_from_slice(b"Hello");
    svc.handle_command(&frame, &mut hw);
    assert_eq!(
        hw.calls,
        vec![
            BoardCall::StopAnimation,
            BoardCall::ScrollText { text: "Hello".into(), delay_ms: 120 },
        ]
    );
}

#[test]
fn text_stops_at_nul() {
    let (mut svc, mut hw) = make_service();
    svc.handle_command(&[TEXT, 1, b'h', b'i', 0, b'x'], &mut hw);
    assert_eq!(
        hw.calls.last(),
        Some(&BoardCall::ScrollText { text: "hi".into(), delay_ms: 10 })
    );
}

fn pixels_head(fill: u8) -> Vec<u8> {
    let mut frame = vec![PIXELS_0];
    frame.extend(std::iter::repeat_n(fill, 15));
    frame
}

fn pixels_tail(fill: u8) -> Vec<u8> {
    let mut frame = vec![PIXELS_1];
    frame.extend(std::iter::repeat_n(fill, 10));
    frame
}

#[test]
fn pixels_flush_once_after_both_halves() {
    let (mut svc, mut hw) = make_service();
    svc.handle_command(&pixels_head(9), &mut hw);
    assert_eq!(hw.pixel_writes(), 0, "head alone must not touch the display");

    svc.handle_command(&pixels_tail(4), &mut hw);
    assert_eq!(hw.pixel_writes(), 25);
    assert_eq!(hw.calls[0], BoardCall::StopAnimation);
    assert_eq!(hw.calls[1], BoardCall::SetPixel { x: 0, y: 0, brightness: 9 });
    assert_eq!(hw.calls[25], BoardCall::SetPixel { x: 4, y: 4, brightness: 4 });
    assert_eq!(svc.shadow_grid()[2], [9; 5]);
    assert_eq!(svc.shadow_grid()[3], [4; 5]);
}

#[test]
fn tail_without_head_still_flushes() {
    let (mut svc, mut hw) = make_service();
    svc.handle_command(&pixels_tail(7), &mut hw);
    assert_eq!(hw.pixel_writes(), 25);
    assert_eq!(hw.calls[1], BoardCall::SetPixel { x: 0, y: 0, brightness: 0 });
    assert_eq!(hw.calls[25], BoardCall::SetPixel { x: 4, y: 4, brightness: 7 });
    assert_eq!(svc.shadow_grid()[4], [7; 5]);
}

#[test]
fn repeated_tail_redraws_full_grid() {
    let (mut svc, mut hw) = make_service();
    svc.handle_command(&pixels_head(1), &mut hw);
    svc.handle_command(&pixels_tail(2), &mut hw);
    svc.handle_command(&pixels_tail(3), &mut hw);
    assert_eq!(hw.pixel_writes(), 50);
    assert_eq!(hw.count(|c| *c == BoardCall::StopAnimation), 2);
    assert_eq!(hw.calls[27], BoardCall::SetPixel { x: 0, y: 0, brightness: 1 });
    assert_eq!(hw.calls[51], BoardCall::SetPixel { x: 4, y: 4, brightness: 3 });
}

// ── Shared data ───────────────────────────────────────────────

#[test]
fn shared_data_updates_register() {
    let (mut svc, mut hw) = make_service();
    svc.handle_command(&[SHARED_DATA, 2, 0x18, 0xFC], &mut hw);
    assert_eq!(svc.shared_register(2), Ok(-1000));
    assert!(hw.calls.is_empty());
}

#[test]
fn shared_data_out_of_range_is_ignored() {
    let (mut svc, mut hw) = make_service();
    svc.handle_command(&[SHARED_DATA, 4, 1, 0], &mut hw);
    for i in 0..4 {
        assert_eq!(svc.shared_register(i), Ok(0));
    }
}

#[test]
fn local_register_writes_truncate() {
    let (mut svc, _) = make_service();
    svc.set_shared_register(0, 0x1_0005).unwrap();
    assert_eq!(svc.shared_register(0), Ok(5));
    assert!(svc.shared_register(4).is_err());
}
