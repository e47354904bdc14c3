//! Inbound command frame decoding.
//!
//! ```text
//!   byte 0                      bytes 1..
//! ┌──────────┬──────────────┬─────────────────────────────┐
//! │ class(3) │ subcommand(5)│ fixed-offset fields, LE     │
//! └──────────┴──────────────┴─────────────────────────────┘
//! ```
//!
//! Decoding is strict about codes and lengths; the dispatcher above it is
//! the permissive layer that turns every [`FrameError`] into a no-op.

use embedded_hal::digital::PinState;

use crate::error::FrameError;
use crate::pins;

use super::frame::{FRAME_LEN, read_i16_le, read_u16_le, read_u16_le_or_zero, require_len};

/// Longest text a TEXT frame can carry.
pub const MAX_TEXT_LEN: usize = FRAME_LEN - 2;

/// Columns in one shadow-display row.
pub const ROW_LEN: usize = 5;

// ───────────────────────────────────────────────────────────────
// Wire codes
// ───────────────────────────────────────────────────────────────

/// Top 3 bits of byte 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CommandClass {
    Pin = 0x01,
    Display = 0x02,
    SharedData = 0x03,
}

impl TryFrom<u8> for CommandClass {
    type Error = FrameError;

    fn try_from(raw: u8) -> Result<Self, FrameError> {
        match raw {
            0x01 => Ok(Self::Pin),
            0x02 => Ok(Self::Display),
            0x03 => Ok(Self::SharedData),
            other => Err(FrameError::UnknownClass(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DisplayCommand {
    Text = 0x01,
    Pixels0 = 0x02,
    Pixels1 = 0x03,
}

impl TryFrom<u8> for DisplayCommand {
    type Error = FrameError;

    fn try_from(raw: u8) -> Result<Self, FrameError> {
        match raw {
            0x01 => Ok(Self::Text),
            0x02 => Ok(Self::Pixels0),
            0x03 => Ok(Self::Pixels1),
            other => Err(FrameError::UnknownSubcommand(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PinCommand {
    SetOutput = 0x01,
    SetPwm = 0x02,
    SetServo = 0x03,
    SetPull = 0x04,
    SetEvent = 0x05,
    SetTouch = 0x06,
}

impl TryFrom<u8> for PinCommand {
    type Error = FrameError;

    fn try_from(raw: u8) -> Result<Self, FrameError> {
        match raw {
            0x01 => Ok(Self::SetOutput),
            0x02 => Ok(Self::SetPwm),
            0x03 => Ok(Self::SetServo),
            0x04 => Ok(Self::SetPull),
            0x05 => Ok(Self::SetEvent),
            0x06 => Ok(Self::SetTouch),
            other => Err(FrameError::UnknownSubcommand(other)),
        }
    }
}

/// Idle-state bias of a digital input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum PullMode {
    #[default]
    None = 0,
    Up = 1,
    Down = 2,
}

impl TryFrom<u8> for PullMode {
    type Error = FrameError;

    fn try_from(raw: u8) -> Result<Self, FrameError> {
        match raw {
            0 => Ok(Self::None),
            1 => Ok(Self::Up),
            2 => Ok(Self::Down),
            other => Err(FrameError::UnknownCode(other)),
        }
    }
}

/// Hardware detection mode requested for a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PinEventType {
    None = 0,
    OnEdge = 1,
    OnPulse = 2,
    OnTouch = 3,
}

impl TryFrom<u8> for PinEventType {
    type Error = FrameError;

    fn try_from(raw: u8) -> Result<Self, FrameError> {
        match raw {
            0 => Ok(Self::None),
            1 => Ok(Self::OnEdge),
            2 => Ok(Self::OnPulse),
            3 => Ok(Self::OnTouch),
            other => Err(FrameError::UnknownCode(other)),
        }
    }
}

/// Servo write, selected by which optional fields are non-zero.
///
/// Zero is the wire's "unset" sentinel; there is no flag bit.  This is a
/// protocol constraint kept for compatibility with existing clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServoWrite {
    Angle(u16),
    AngleRange { angle: u16, range: u16 },
    Full { angle: u16, range: u16, center: u16 },
}

impl ServoWrite {
    pub fn from_fields(angle: u16, range: u16, center: u16) -> Self {
        if range == 0 {
            Self::Angle(angle)
        } else if center == 0 {
            Self::AngleRange { angle, range }
        } else {
            Self::Full {
                angle,
                range,
                center,
            }
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Decoded command
// ───────────────────────────────────────────────────────────────

/// A fully validated inbound command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ScrollText {
        text: heapless::String<MAX_TEXT_LEN>,
        delay_ms: u32,
    },
    /// Shadow rows 0, 1, 2.
    PixelsHead([[u8; ROW_LEN]; 3]),
    /// Shadow rows 3, 4; completes the grid.
    PixelsTail([[u8; ROW_LEN]; 2]),
    SetOutput {
        pin: u8,
        level: PinState,
    },
    SetPwm {
        pin: u8,
        duty: u16,
    },
    SetServo {
        pin: u8,
        write: ServoWrite,
    },
    SetPull {
        pin: u8,
        mode: PullMode,
    },
    SetEvent {
        pin: u8,
        event: PinEventType,
    },
    SetTouch {
        pin: u8,
    },
    SetSharedData {
        index: u8,
        value: i16,
    },
}

impl Command {
    /// Decode a raw characteristic write.
    pub fn parse(data: &[u8]) -> Result<Self, FrameError> {
        let Some(&head) = data.first() else {
            return Err(FrameError::Empty);
        };
        if data.len() > FRAME_LEN {
            return Err(FrameError::TooLong(data.len()));
        }

        let sub = head & 0b1_1111;
        match CommandClass::try_from(head >> 5)? {
            CommandClass::Display => Self::parse_display(DisplayCommand::try_from(sub)?, data),
            CommandClass::Pin => Self::parse_pin(PinCommand::try_from(sub)?, data),
            CommandClass::SharedData => {
                require_len(data, 4)?;
                Ok(Self::SetSharedData {
                    index: data[1],
                    value: read_i16_le(data, 2)?,
                })
            }
        }
    }

    fn parse_display(cmd: DisplayCommand, data: &[u8]) -> Result<Self, FrameError> {
        match cmd {
            DisplayCommand::Text => {
                require_len(data, 2)?;
                Ok(Self::ScrollText {
                    text: decode_text(&data[2..]),
                    delay_ms: u32::from(data[1]) * 10,
                })
            }
            DisplayCommand::Pixels0 => {
                require_len(data, 1 + 3 * ROW_LEN)?;
                Ok(Self::PixelsHead([row(data, 1), row(data, 6), row(data, 11)]))
            }
            DisplayCommand::Pixels1 => {
                require_len(data, 1 + 2 * ROW_LEN)?;
                Ok(Self::PixelsTail([row(data, 1), row(data, 6)]))
            }
        }
    }

    fn parse_pin(cmd: PinCommand, data: &[u8]) -> Result<Self, FrameError> {
        require_len(data, 2)?;
        let pin = data[1];
        if !pins::is_valid_pin(pin) {
            return Err(FrameError::UnknownPin(pin));
        }

        match cmd {
            PinCommand::SetOutput => {
                require_len(data, 3)?;
                let level = match data[2] {
                    0 => PinState::Low,
                    1 => PinState::High,
                    other => return Err(FrameError::UnknownCode(other)),
                };
                Ok(Self::SetOutput { pin, level })
            }
            PinCommand::SetPwm => Ok(Self::SetPwm {
                pin,
                duty: read_u16_le(data, 2)?,
            }),
            PinCommand::SetServo => {
                // Byte 4 is padding; range and center may be omitted.
                let angle = read_u16_le(data, 2)?;
                let range = read_u16_le_or_zero(data, 5);
                let center = read_u16_le_or_zero(data, 7);
                Ok(Self::SetServo {
                    pin,
                    write: ServoWrite::from_fields(angle, range, center),
                })
            }
            PinCommand::SetPull => {
                require_len(data, 3)?;
                Ok(Self::SetPull {
                    pin,
                    mode: PullMode::try_from(data[2])?,
                })
            }
            PinCommand::SetEvent => {
                require_len(data, 3)?;
                Ok(Self::SetEvent {
                    pin,
                    event: PinEventType::try_from(data[2])?,
                })
            }
            PinCommand::SetTouch => Ok(Self::SetTouch { pin }),
        }
    }
}

fn row(data: &[u8], offset: usize) -> [u8; ROW_LEN] {
    let mut out = [0u8; ROW_LEN];
    out.copy_from_slice(&data[offset..offset + ROW_LEN]);
    out
}

/// Text runs up to the first NUL.  Invalid UTF-8 keeps its valid prefix.
fn decode_text(raw: &[u8]) -> heapless::String<MAX_TEXT_LEN> {
    let raw = raw.split(|&b| b == 0).next().unwrap_or_default();
    let valid = match core::str::from_utf8(raw) {
        Ok(s) => s,
        Err(e) => core::str::from_utf8(&raw[..e.valid_up_to()]).unwrap_or_default(),
    };
    let mut text = heapless::String::new();
    for c in valid.chars() {
        if text.push(c).is_err() {
            break;
        }
    }
    text
}
