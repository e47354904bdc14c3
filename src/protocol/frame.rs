//! Fixed-layout frame primitives.
//!
//! Outbound notification frame:
//! ```text
//! ┌──────────────────────────────┬───────────────┐
//! │ payload (bytes 0..19)        │ format (19)   │
//! └──────────────────────────────┴───────────────┘
//! ```
//!
//! The buffer for a channel is reused across notifications.  The format
//! byte is written last, after every payload byte, so a reader that sees a
//! fresh discriminator also sees the complete payload.

use crate::error::FrameError;

/// Size of a characteristic value, inbound or outbound.
pub const FRAME_LEN: usize = 20;

/// Offset of the data-format discriminator in a notification frame.
pub const DATA_FORMAT_INDEX: usize = 19;

/// Discriminator identifying which encoder last wrote a notification frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DataFormat {
    PinEvent = 0x11,
    ActionEvent = 0x12,
}

/// Reusable 20-byte outbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationFrame {
    buf: [u8; FRAME_LEN],
}

impl NotificationFrame {
    pub const fn new() -> Self {
        Self { buf: [0; FRAME_LEN] }
    }

    /// Mutable view of the payload region.  The discriminator byte is not
    /// reachable through this slice.
    pub fn payload_mut(&mut self) -> &mut [u8] {
        &mut self.buf[..DATA_FORMAT_INDEX]
    }

    /// Stamp the discriminator.  Must be the final write of an encoder.
    pub fn finish(&mut self, format: DataFormat) {
        self.buf[DATA_FORMAT_INDEX] = format as u8;
    }

    /// Discriminator currently stamped, or `None` for a fresh frame.
    pub fn format(&self) -> Option<DataFormat> {
        match self.buf[DATA_FORMAT_INDEX] {
            0x11 => Some(DataFormat::PinEvent),
            0x12 => Some(DataFormat::ActionEvent),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.buf
    }
}

impl Default for NotificationFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<[u8]> for NotificationFrame {
    fn as_ref(&self) -> &[u8] {
        &self.buf
    }
}

// ---------------------------------------------------------------------------
// Little-endian field access
// ---------------------------------------------------------------------------

/// Fail with [`FrameError::Truncated`] unless `data` holds `needed` bytes.
pub fn require_len(data: &[u8], needed: usize) -> Result<(), FrameError> {
    if data.len() < needed {
        return Err(FrameError::Truncated {
            needed,
            got: data.len(),
        });
    }
    Ok(())
}

/// Fail with [`FrameError::BufferTooSmall`] unless `buf` holds `needed` bytes.
pub fn require_capacity(buf: &[u8], needed: usize) -> Result<(), FrameError> {
    if buf.len() < needed {
        return Err(FrameError::BufferTooSmall {
            needed,
            got: buf.len(),
        });
    }
    Ok(())
}

pub fn read_u16_le(data: &[u8], offset: usize) -> Result<u16, FrameError> {
    require_len(data, offset + 2)?;
    Ok(u16::from_le_bytes([data[offset], data[offset + 1]]))
}

pub fn read_i16_le(data: &[u8], offset: usize) -> Result<i16, FrameError> {
    require_len(data, offset + 2)?;
    Ok(i16::from_le_bytes([data[offset], data[offset + 1]]))
}

/// Like [`read_u16_le`] but an absent field reads as 0.
pub fn read_u16_le_or_zero(data: &[u8], offset: usize) -> u16 {
    read_u16_le(data, offset).unwrap_or(0)
}

// Writers assume the caller checked capacity for the whole layout.

pub fn write_u16_le(buf: &mut [u8], offset: usize, value: u16) {
    buf[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

pub fn write_i16_le(buf: &mut [u8], offset: usize, value: i16) {
    buf[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

pub fn write_u32_le(buf: &mut [u8], offset: usize, value: u32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

/// Narrow to `i16`, saturating at the type bounds.
pub fn saturate_i16(value: i32) -> i16 {
    value.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}
