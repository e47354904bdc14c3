//! Port traits: the hexagonal boundary between the bridge core and the
//! device runtime.
//!
//! ```text
//!   Host runtime ──▶ Port trait ──▶ BridgeService (codec + state)
//! ```
//!
//! Driven adapters (pins, sensors, display, message bus, transport)
//! implement these traits.  [`BridgeService`](super::service::BridgeService)
//! consumes them via generics at each call site, so the core never owns a
//! driver or the transport.

use embedded_hal::digital::PinState;

use crate::protocol::command::{PinEventType, PullMode, ServoWrite};
use crate::protocol::frame::NotificationFrame;

use super::events::{Button, NotifyChannel};

// ───────────────────────────────────────────────────────────────
// Pin port (core ↔ edge connector)
// ───────────────────────────────────────────────────────────────

/// Per-pin I/O on the edge connector.
pub trait PinPort {
    /// Whether the pin is currently configured as an input.
    fn is_input(&self, pin: u8) -> bool;

    /// Whether the pin is currently in digital (not analog/touch) mode.
    fn is_digital(&self, pin: u8) -> bool;

    fn digital_value(&mut self, pin: u8) -> PinState;

    fn set_digital_value(&mut self, pin: u8, level: PinState);

    /// Raw ADC reading (0–1023).
    fn analog_value(&mut self, pin: u8) -> u16;

    /// PWM output; callers clamp to the platform's stable range first.
    fn set_analog_value(&mut self, pin: u8, value: u16);

    fn set_servo(&mut self, pin: u8, write: ServoWrite);

    /// Configure the pin as a digital input with the given pull.
    fn set_pull(&mut self, pin: u8, mode: PullMode);

    /// Switch the pin into capacitive-touch sensing.
    fn enable_touch(&mut self, pin: u8);

    /// Enable (or with [`PinEventType::None`] disable) edge, pulse or touch
    /// detection on the pin.
    fn set_event_detection(&mut self, pin: u8, mode: PinEventType);
}

// ───────────────────────────────────────────────────────────────
// Sensor port (hardware → core)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the on-board sensors.
pub trait SensorPort {
    fn pitch_radians(&mut self) -> f32;
    fn roll_radians(&mut self) -> f32;

    /// Acceleration in milli-g, device axes.
    fn accel_x(&mut self) -> i32;
    fn accel_y(&mut self) -> i32;
    fn accel_z(&mut self) -> i32;

    /// Compass heading in degrees, 0–359.
    fn compass_heading(&mut self) -> i32;

    /// Magnetic field in nano-tesla.
    fn compass_x(&mut self) -> i32;
    fn compass_y(&mut self) -> i32;
    fn compass_z(&mut self) -> i32;

    fn is_compass_calibrated(&mut self) -> bool;
    fn calibrate_compass(&mut self);
    fn clear_compass_calibration(&mut self);

    /// Die temperature in °C.
    fn temperature(&mut self) -> i32;

    /// Ambient light, 0–255, sensed through the LED matrix.
    fn light_level(&mut self) -> u8;

    fn is_button_pressed(&mut self, button: Button) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Display port (core → LED matrix)
// ───────────────────────────────────────────────────────────────

pub trait DisplayPort {
    fn stop_animation(&mut self);

    /// Start a non-blocking scroll.
    fn scroll_text(&mut self, text: &str, delay_ms: u32);

    fn set_pixel(&mut self, x: u8, y: u8, brightness: u8);

    fn print_char(&mut self, c: char);
}

// ───────────────────────────────────────────────────────────────
// Event bus port (core ↔ host message bus)
// ───────────────────────────────────────────────────────────────

/// Which core handler a subscription targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listener {
    Button,
    Gesture,
    PinEvent,
}

/// How the host bus delivers events to a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryPolicy {
    /// Run the handler in the event's own context.
    Immediate,
    /// Discard a new event while the handler is still busy with the last.
    DropIfBusy,
}

/// Subscription side of the host message bus.
pub trait EventBusPort {
    fn subscribe(&mut self, component_id: u16, listener: Listener, policy: DeliveryPolicy);

    /// Remove a subscription.  Must be harmless if none exists.
    fn unsubscribe(&mut self, component_id: u16, listener: Listener);
}

// ───────────────────────────────────────────────────────────────
// Notify sink (core → transport)
// ───────────────────────────────────────────────────────────────

/// Tells the transport that a channel's frame is ready to send.
pub trait NotifySink {
    fn notify(&mut self, channel: NotifyChannel, frame: &NotificationFrame);
}
