//! Session lifecycle: start, configuration, friendly name, shutdown.

use mbitmore::app::ports::{DeliveryPolicy, Listener};
use mbitmore::app::service::BridgeService;
use mbitmore::config::{BridgeConfig, Capabilities};
use mbitmore::pins::{GPIO_PINS, ID_BUTTON_A, ID_BUTTON_B, ID_GESTURE};
use mbitmore::protocol::command::{PinEventType, PullMode};

use crate::mock_hw::{BoardCall, MockBoard};

#[test]
fn start_subscribes_buttons_and_gesture() {
    let mut svc = BridgeService::new(BridgeConfig::default());
    let mut hw = MockBoard::new();
    svc.start(&mut hw);
    assert_eq!(
        hw.subscriptions(),
        vec![
            (ID_BUTTON_A, Listener::Button, DeliveryPolicy::Immediate),
            (ID_BUTTON_B, Listener::Button, DeliveryPolicy::Immediate),
            (ID_GESTURE, Listener::Gesture, DeliveryPolicy::Immediate),
        ]
    );
    assert_eq!(hw.count(|c| *c == BoardCall::CalibrateCompass), 0);
}

#[test]
fn start_calibrates_uncalibrated_compass() {
    let mut svc = BridgeService::new(BridgeConfig::default());
    let mut hw = MockBoard::new();
    hw.compass_calibrated = false;
    svc.start(&mut hw);
    assert_eq!(hw.count(|c| *c == BoardCall::CalibrateCompass), 1);
}

#[test]
fn dal_button_a_at_start_resets_compass() {
    let mut svc = BridgeService::new(BridgeConfig::for_platform(Capabilities::dal()));
    let mut hw = MockBoard::new();
    hw.button_a = true;
    svc.start(&mut hw);
    assert_eq!(
        &hw.calls[..2],
        &[BoardCall::ClearCompassCalibration, BoardCall::CalibrateCompass]
    );
}

#[test]
fn codal_button_a_at_start_keeps_compass() {
    let mut svc = BridgeService::new(BridgeConfig::default());
    let mut hw = MockBoard::new();
    hw.button_a = true;
    svc.start(&mut hw);
    assert_eq!(hw.count(|c| *c == BoardCall::ClearCompassCalibration), 0);
}

#[test]
fn initial_configuration_pulls_up_p0_to_p2_and_prints_glyph() {
    let mut svc = BridgeService::new(BridgeConfig::default());
    let mut hw = MockBoard::new();
    svc.initial_configuration(&mut hw);
    for pin in 0..3 {
        assert_eq!(hw.pulls_on(pin), vec![PullMode::Up]);
        assert_eq!(svc.pull_mode(pin), PullMode::Up);
    }
    assert_eq!(
        &hw.calls[3..],
        &[BoardCall::StopAnimation, BoardCall::PrintChar('M')]
    );
}

#[test]
fn release_configuration_resets_pulls_on_codal_only() {
    let mut svc = BridgeService::new(BridgeConfig::default());
    let mut hw = MockBoard::new();
    svc.initial_configuration(&mut hw);
    hw.clear_calls();
    svc.release_configuration(&mut hw);
    assert_eq!(hw.calls[0], BoardCall::StopAnimation);
    for pin in GPIO_PINS {
        assert_eq!(hw.pulls_on(pin), vec![PullMode::None]);
    }
    assert_eq!(svc.pull_mode(0), PullMode::None);

    let mut svc = BridgeService::new(BridgeConfig::for_platform(Capabilities::dal()));
    let mut hw = MockBoard::new();
    svc.release_configuration(&mut hw);
    assert_eq!(hw.calls, vec![BoardCall::StopAnimation]);
}

#[test]
fn friendly_name_scrolls_name_and_version() {
    let svc = BridgeService::new(BridgeConfig::default());
    let mut hw = MockBoard::new();
    svc.display_friendly_name(&mut hw);
    assert_eq!(
        hw.calls,
        vec![BoardCall::ScrollText {
            text: "micro:bit -M 0.6.0- ".into(),
            delay_ms: 120,
        }]
    );
}

#[test]
fn shutdown_releases_every_subscription() {
    let mut svc = BridgeService::new(BridgeConfig::default());
    let mut hw = MockBoard::new();
    svc.start(&mut hw);
    svc.handle_command(&[0x25, 0, PinEventType::OnEdge as u8], &mut hw);
    svc.handle_command(&[0x25, 14, PinEventType::OnPulse as u8], &mut hw);
    hw.clear_calls();

    svc.shutdown(&mut hw);
    let unsubs = hw.unsubscriptions();
    assert!(unsubs.contains(&(ID_BUTTON_A, Listener::Button)));
    assert!(unsubs.contains(&(ID_BUTTON_B, Listener::Button)));
    assert!(unsubs.contains(&(ID_GESTURE, Listener::Gesture)));
    assert!(unsubs.contains(&(100, Listener::PinEvent)));
    assert!(unsubs.contains(&(114, Listener::PinEvent)));
    assert_eq!(unsubs.len(), 5);
    assert_eq!(svc.pin_subscription_count(), 0);
}
