//! Event encoders: host message-bus events to notification frames.
//!
//! ACTION_EVENT (button):
//! ```text
//! [0]=BUTTON [1]=pin id [2]=event [3..7]=u32 LE timestamp ... [19]=0x12
//! ```
//! ACTION_EVENT (gesture):
//! ```text
//! [0]=GESTURE [1]=gesture [2..6]=u32 LE timestamp ... [19]=0x12
//! ```
//! PIN_EVENT:
//! ```text
//! [0]=pin [1]=event [2..6]=u32 LE timestamp ... [19]=0x11
//! ```
//!
//! Host codes are mapped explicitly so the wire stays stable if the host
//! renumbers.  Unknown codes pass through raw.

use crate::app::events::HostEvent;
use crate::pins::{BUTTON_A_PIN, BUTTON_B_PIN, ID_BUTTON_A, ID_BUTTON_B};

use super::frame::{DataFormat, NotificationFrame, write_u32_le};

/// Host runtime event codes.
pub mod host {
    pub const BUTTON_EVT_DOWN: u16 = 1;
    pub const BUTTON_EVT_UP: u16 = 2;
    pub const BUTTON_EVT_CLICK: u16 = 3;
    pub const BUTTON_EVT_LONG_CLICK: u16 = 4;
    pub const BUTTON_EVT_HOLD: u16 = 5;
    pub const BUTTON_EVT_DOUBLE_CLICK: u16 = 6;

    pub const GESTURE_TILT_UP: u16 = 1;
    pub const GESTURE_TILT_DOWN: u16 = 2;
    pub const GESTURE_TILT_LEFT: u16 = 3;
    pub const GESTURE_TILT_RIGHT: u16 = 4;
    pub const GESTURE_FACE_UP: u16 = 5;
    pub const GESTURE_FACE_DOWN: u16 = 6;
    pub const GESTURE_FREEFALL: u16 = 7;
    pub const GESTURE_3G: u16 = 8;
    pub const GESTURE_6G: u16 = 9;
    pub const GESTURE_8G: u16 = 10;
    pub const GESTURE_SHAKE: u16 = 11;

    pub const PIN_EVT_RISE: u16 = 2;
    pub const PIN_EVT_FALL: u16 = 3;
    pub const PIN_EVT_PULSE_HI: u16 = 4;
    pub const PIN_EVT_PULSE_LO: u16 = 5;
}

/// Byte 0 of an ACTION_EVENT frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ActionKind {
    Button = 0x01,
    Gesture = 0x02,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ButtonAction {
    Down = 1,
    Up = 2,
    Click = 3,
    LongClick = 4,
    Hold = 5,
    DoubleClick = 6,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Gesture {
    TiltUp = 1,
    TiltDown = 2,
    TiltLeft = 3,
    TiltRight = 4,
    FaceUp = 5,
    FaceDown = 6,
    Freefall = 7,
    G3 = 8,
    G6 = 9,
    G8 = 10,
    Shake = 11,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PinEdge {
    Rise = 2,
    Fall = 3,
    PulseHigh = 4,
    PulseLow = 5,
}

fn button_action(value: u16) -> Option<ButtonAction> {
    match value {
        host::BUTTON_EVT_DOWN => Some(ButtonAction::Down),
        host::BUTTON_EVT_UP => Some(ButtonAction::Up),
        host::BUTTON_EVT_CLICK => Some(ButtonAction::Click),
        host::BUTTON_EVT_LONG_CLICK => Some(ButtonAction::LongClick),
        host::BUTTON_EVT_HOLD => Some(ButtonAction::Hold),
        host::BUTTON_EVT_DOUBLE_CLICK => Some(ButtonAction::DoubleClick),
        _ => None,
    }
}

fn gesture(value: u16) -> Option<Gesture> {
    match value {
        host::GESTURE_TILT_UP => Some(Gesture::TiltUp),
        host::GESTURE_TILT_DOWN => Some(Gesture::TiltDown),
        host::GESTURE_TILT_LEFT => Some(Gesture::TiltLeft),
        host::GESTURE_TILT_RIGHT => Some(Gesture::TiltRight),
        host::GESTURE_FACE_UP => Some(Gesture::FaceUp),
        host::GESTURE_FACE_DOWN => Some(Gesture::FaceDown),
        host::GESTURE_FREEFALL => Some(Gesture::Freefall),
        host::GESTURE_3G => Some(Gesture::G3),
        host::GESTURE_6G => Some(Gesture::G6),
        host::GESTURE_8G => Some(Gesture::G8),
        host::GESTURE_SHAKE => Some(Gesture::Shake),
        _ => None,
    }
}

fn pin_edge(value: u16) -> Option<PinEdge> {
    match value {
        host::PIN_EVT_RISE => Some(PinEdge::Rise),
        host::PIN_EVT_FALL => Some(PinEdge::Fall),
        host::PIN_EVT_PULSE_HI => Some(PinEdge::PulseHigh),
        host::PIN_EVT_PULSE_LO => Some(PinEdge::PulseLow),
        _ => None,
    }
}

/// Button sources report fixed protocol pin numbers, not component IDs.
fn button_id(source: u16) -> u8 {
    match source {
        ID_BUTTON_A => BUTTON_A_PIN,
        ID_BUTTON_B => BUTTON_B_PIN,
        other => other as u8,
    }
}

pub fn encode_button(frame: &mut NotificationFrame, event: &HostEvent) {
    let data = frame.payload_mut();
    data[0] = ActionKind::Button as u8;
    data[1] = button_id(event.source);
    data[2] = button_action(event.value).map_or(event.value as u8, |a| a as u8);
    write_u32_le(data, 3, event.timestamp as u32);
    frame.finish(DataFormat::ActionEvent);
}

pub fn encode_gesture(frame: &mut NotificationFrame, event: &HostEvent) {
    let data = frame.payload_mut();
    data[0] = ActionKind::Gesture as u8;
    data[1] = gesture(event.value).map_or(event.value as u8, |g| g as u8);
    write_u32_le(data, 2, event.timestamp as u32);
    frame.finish(DataFormat::ActionEvent);
}

/// `pin` is the protocol pin index already resolved from the source
/// component.
pub fn encode_pin_event(frame: &mut NotificationFrame, pin: u8, event: &HostEvent) {
    let data = frame.payload_mut();
    data[0] = pin;
    data[1] = pin_edge(event.value).map_or(event.value as u8, |e| e as u8);
    write_u32_le(data, 2, event.timestamp as u32);
    frame.finish(DataFormat::PinEvent);
}
