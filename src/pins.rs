//! Pin assignments and host component identifiers for the micro:bit edge
//! connector.
//!
//! Single source of truth: the dispatcher, router and telemetry encoder all
//! reference this module rather than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Edge connector
// ---------------------------------------------------------------------------

/// Number of addressable pin slots (P0..=P20).
pub const PIN_COUNT: usize = 21;

/// General-purpose pins reported in the digital-level bitmask and eligible
/// for event subscription.
pub const GPIO_PINS: [u8; 9] = [0, 1, 2, 8, 12, 13, 14, 15, 16];

/// Pins pulled up at session start, matching the standard extension.
pub const INITIAL_PULL_UP_PINS: [u8; 3] = [0, 1, 2];

/// Pins with an analog-input sample ring.
pub const ANALOG_IN_PINS: [u8; 3] = [0, 1, 2];

// ---------------------------------------------------------------------------
// Buttons
// ---------------------------------------------------------------------------

/// Protocol pin number reported for button A.
pub const BUTTON_A_PIN: u8 = 5;
/// Protocol pin number reported for button B.
pub const BUTTON_B_PIN: u8 = 11;

// ---------------------------------------------------------------------------
// Host message-bus component IDs
// ---------------------------------------------------------------------------

/// Component ID of button A on the host message bus.
pub const ID_BUTTON_A: u16 = 1;
/// Component ID of button B on the host message bus.
pub const ID_BUTTON_B: u16 = 2;
/// Component ID of the accelerometer gesture detector.
pub const ID_GESTURE: u16 = 13;
/// Component ID of `P0`; pin `n` is `ID_IO_P0 + n`.
pub const ID_IO_P0: u16 = 100;

/// Resolve a pin index to its host component ID.
///
/// Only pins in [`GPIO_PINS`] have a stable mapping; anything else is
/// `None`.
pub fn component_id(pin: u8) -> Option<u16> {
    GPIO_PINS
        .contains(&pin)
        .then(|| ID_IO_P0 + u16::from(pin))
}

/// Reverse of [`component_id`].
pub fn pin_for_component(id: u16) -> Option<u8> {
    let pin = u8::try_from(id.checked_sub(ID_IO_P0)?).ok()?;
    GPIO_PINS.contains(&pin).then_some(pin)
}

/// Whether `pin` addresses a slot on the edge connector.
pub fn is_valid_pin(pin: u8) -> bool {
    usize::from(pin) < PIN_COUNT
}
