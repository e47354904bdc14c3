//! Fuzz target: `Command::parse` and `BridgeService::handle_command`
//!
//! Splits the input into 20-byte characteristic writes and dispatches each
//! against a board that accepts every call.  Asserts that decoding never
//! panics and that every decoded pin stays on the edge connector.
//!
//! cargo fuzz run fuzz_command_dispatch

#![no_main]

use embedded_hal::digital::PinState;
use libfuzzer_sys::fuzz_target;
use mbitmore::app::ports::{DeliveryPolicy, DisplayPort, EventBusPort, Listener, PinPort};
use mbitmore::app::service::BridgeService;
use mbitmore::config::BridgeConfig;
use mbitmore::pins::PIN_COUNT;
use mbitmore::protocol::command::{Command, PinEventType, PullMode, ServoWrite};

struct Board;

impl Board {
    fn check(pin: u8) {
        assert!(usize::from(pin) < PIN_COUNT, "pin {pin} escaped validation");
    }
}

impl PinPort for Board {
    fn is_input(&self, _: u8) -> bool {
        true
    }
    fn is_digital(&self, _: u8) -> bool {
        true
    }
    fn digital_value(&mut self, _: u8) -> PinState {
        PinState::Low
    }
    fn set_digital_value(&mut self, pin: u8, _: PinState) {
        Self::check(pin);
    }
    fn analog_value(&mut self, _: u8) -> u16 {
        0
    }
    fn set_analog_value(&mut self, pin: u8, value: u16) {
        Self::check(pin);
        assert!(value <= 1022, "PWM {value} above platform max");
    }
    fn set_servo(&mut self, pin: u8, _: ServoWrite) {
        Self::check(pin);
    }
    fn set_pull(&mut self, pin: u8, _: PullMode) {
        Self::check(pin);
    }
    fn enable_touch(&mut self, pin: u8) {
        Self::check(pin);
    }
    fn set_event_detection(&mut self, pin: u8, _: PinEventType) {
        Self::check(pin);
    }
}

impl DisplayPort for Board {
    fn stop_animation(&mut self) {}
    fn scroll_text(&mut self, text: &str, _: u32) {
        assert!(text.len() <= 18);
    }
    fn set_pixel(&mut self, x: u8, y: u8, _: u8) {
        assert!(x < 5 && y < 5);
    }
    fn print_char(&mut self, _: char) {}
}

impl EventBusPort for Board {
    fn subscribe(&mut self, _: u16, _: Listener, _: DeliveryPolicy) {}
    fn unsubscribe(&mut self, _: u16, _: Listener) {}
}

fuzz_target!(|data: &[u8]| {
    let mut svc = BridgeService::new(BridgeConfig::default());
    let mut board = Board;

    for frame in data.chunks(20) {
        let _ = Command::parse(frame);
        svc.handle_command(frame, &mut board);
    }
    // The whole input as one write: anything over 20 bytes is rejected.
    svc.handle_command(data, &mut board);
});
