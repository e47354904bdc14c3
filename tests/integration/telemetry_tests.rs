//! Scheduler-driven telemetry sampling against the mock board.

use embedded_hal::digital::PinState;
use mbitmore::app::service::BridgeService;
use mbitmore::config::{BridgeConfig, Capabilities};
use mbitmore::error::FrameError;
use mbitmore::protocol::command::PullMode;
use mbitmore::protocol::telemetry::{DIRECTION_LEN, SENSORS_LEN};

use crate::mock_hw::MockBoard;

fn levels(buf: &[u8]) -> u32 {
    u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]])
}

// ── Digital levels and environment ────────────────────────────

#[test]
fn digital_levels_only_count_high_digital_inputs() {
    let mut svc = BridgeService::new(BridgeConfig::default());
    let mut hw = MockBoard::new();
    hw.set_input_level(0, PinState::High);
    hw.set_input_level(1, PinState::Low);
    hw.set_input_level(13, PinState::High);
    hw.pins[8].level = PinState::High; // output
    hw.set_input_level(2, PinState::High);
    hw.pins[2].digital = false; // touch/analog mode

    let mut buf = [0u8; SENSORS_LEN];
    svc.sample_digital_and_environment(&mut buf, &mut hw).unwrap();
    assert_eq!(levels(&buf), (1 << 0) | (1 << 13));
}

#[test]
fn codal_reads_buttons_as_pins() {
    let mut svc = BridgeService::new(BridgeConfig::default());
    let mut hw = MockBoard::new();
    hw.pins[5].level = PinState::High;
    hw.pins[11].level = PinState::Low;
    hw.button_b = false;

    let mut buf = [0u8; SENSORS_LEN];
    svc.sample_digital_and_environment(&mut buf, &mut hw).unwrap();
    assert_eq!(levels(&buf), 1 << 5);
}

#[test]
fn dal_reports_released_buttons_high() {
    let mut svc = BridgeService::new(BridgeConfig::for_platform(Capabilities::dal()));
    let mut hw = MockBoard::new();
    hw.button_a = false;
    hw.button_b = true;

    let mut buf = [0u8; SENSORS_LEN];
    svc.sample_digital_and_environment(&mut buf, &mut hw).unwrap();
    assert_eq!(levels(&buf), 1 << 5);
}

#[test]
fn temperature_is_offset_and_clamped() {
    let mut svc = BridgeService::new(BridgeConfig::default());
    let mut hw = MockBoard::new();
    let mut buf = [0u8; SENSORS_LEN];

    hw.temperature = 20;
    svc.sample_digital_and_environment(&mut buf, &mut hw).unwrap();
    assert_eq!(buf[5], 148);

    hw.temperature = -200;
    svc.sample_digital_and_environment(&mut buf, &mut hw).unwrap();
    assert_eq!(buf[5], 0);

    hw.temperature = i32::MAX;
    svc.sample_digital_and_environment(&mut buf, &mut hw).unwrap();
    assert_eq!(buf[5], 255);

    hw.temperature = i32::MIN;
    svc.sample_digital_and_environment(&mut buf, &mut hw).unwrap();
    assert_eq!(buf[5], 0);
}

#[test]
fn light_level_is_median_of_ring() {
    let mut svc = BridgeService::new(BridgeConfig::default());
    let mut hw = MockBoard::new();
    hw.light_script
        .extend([10, 250, 12, 11, 13, 0, 14, 15, 255, 16, 17]);

    let mut buf = [0u8; SENSORS_LEN];
    for _ in 0..11 {
        svc.sample_digital_and_environment(&mut buf, &mut hw).unwrap();
    }
    // Sorted: 0 10 11 12 13 14 15 16 17 250 255
    assert_eq!(buf[4], 14);
}

#[test]
fn sensors_buffer_too_small() {
    let mut svc = BridgeService::new(BridgeConfig::default());
    let mut hw = MockBoard::new();
    assert_eq!(
        svc.sample_digital_and_environment(&mut [0u8; 4], &mut hw),
        Err(FrameError::BufferTooSmall { needed: 6, got: 4 })
    );
}

// ── Analog input ──────────────────────────────────────────────

#[test]
fn analog_sample_is_median_and_restores_pull() {
    let mut svc = BridgeService::new(BridgeConfig::default());
    let mut hw = MockBoard::new();
    svc.initial_configuration(&mut hw);
    hw.script_analog(0, &[10, 50, 30, 40, 20]);

    let mut buf = [0xAAu8; 2];
    assert_eq!(svc.sample_analog_pin(&mut buf, 0, &mut hw), Ok(Some(30)));
    assert_eq!(u16::from_le_bytes(buf), 30);
    assert_eq!(
        hw.pulls_on(0),
        vec![PullMode::Up, PullMode::None, PullMode::Up]
    );
}

#[test]
fn analog_sample_skips_outputs_and_unsampled_pins() {
    let mut svc = BridgeService::new(BridgeConfig::default());
    let mut hw = MockBoard::new();
    let mut buf = [0xAAu8; 2];

    assert_eq!(svc.sample_analog_pin(&mut buf, 2, &mut hw), Ok(None));
    hw.set_input_level(8, PinState::Low);
    assert_eq!(svc.sample_analog_pin(&mut buf, 8, &mut hw), Ok(None));
    assert_eq!(buf, [0xAA; 2]);
    assert!(hw.calls.is_empty());
}

// ── Orientation ───────────────────────────────────────────────

#[test]
fn orientation_face_up_keeps_heading() {
    let svc = BridgeService::new(BridgeConfig::default());
    let mut hw = MockBoard::new();
    hw.pitch = 0.1;
    hw.accel = [-50, 20, -1000];
    hw.heading = 200;
    hw.magnetic = [1000, 2000, -3000];

    let mut buf = [0u8; DIRECTION_LEN];
    svc.sample_orientation(&mut buf, &mut hw).unwrap();
    let i16_at = |off: usize| i16::from_le_bytes([buf[off], buf[off + 1]]);
    assert_eq!(i16_at(0), 100);
    assert_eq!(i16_at(4), 50);
    assert_eq!(i16_at(6), 20);
    assert_eq!(i16_at(8), 1000);
    assert_eq!(u16::from_le_bytes([buf[10], buf[11]]), 200);
    assert_eq!([i16_at(12), i16_at(14), i16_at(16)], [1, 2, -3]);
}

#[test]
fn tilt_follows_pitch_and_roll() {
    let svc = BridgeService::new(BridgeConfig::default());
    let mut hw = MockBoard::new();
    hw.pitch = core::f32::consts::FRAC_PI_2;
    hw.roll = -core::f32::consts::FRAC_PI_4;
    assert!((svc.pitch_tilt(&mut hw) - 1000).abs() <= 1);
    assert!((svc.roll_tilt(&mut hw) + 500).abs() <= 1);
}
