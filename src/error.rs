//! Unified error types for the bridge core.
//!
//! A single `Error` enum that every subsystem converts into.  All variants
//! are `Copy` so they can be logged and dropped on the permissive command
//! path without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the core funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An inbound command frame could not be decoded, or an outbound
    /// buffer could not hold a frame.
    Frame(FrameError),
    /// A shared-register access was rejected.
    Register(RegisterError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Frame(e) => write!(f, "frame: {e}"),
            Self::Register(e) => write!(f, "register: {e}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Frame errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// Zero-length command frame.
    Empty,
    /// Command frame longer than the 20-byte characteristic.
    TooLong(usize),
    /// Frame ended before a required field.
    Truncated { needed: usize, got: usize },
    /// Top 3 bits of byte 0 name no known command class.
    UnknownClass(u8),
    /// Bottom 5 bits of byte 0 name no known subcommand for the class.
    UnknownSubcommand(u8),
    /// Pin index is outside the addressable range.
    UnknownPin(u8),
    /// An enumerated field (pull mode, event type) carried an unknown code.
    UnknownCode(u8),
    /// Outbound buffer is shorter than the frame layout.
    BufferTooSmall { needed: usize, got: usize },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty frame"),
            Self::TooLong(len) => write!(f, "frame too long ({len} bytes)"),
            Self::Truncated { needed, got } => {
                write!(f, "truncated frame (needed {needed}, got {got})")
            }
            Self::UnknownClass(c) => write!(f, "unknown command class {c:#04x}"),
            Self::UnknownSubcommand(s) => write!(f, "unknown subcommand {s:#04x}"),
            Self::UnknownPin(p) => write!(f, "unknown pin {p}"),
            Self::UnknownCode(c) => write!(f, "unknown field code {c:#04x}"),
            Self::BufferTooSmall { needed, got } => {
                write!(f, "buffer too small (needed {needed}, got {got})")
            }
        }
    }
}

impl From<FrameError> for Error {
    fn from(e: FrameError) -> Self {
        Self::Frame(e)
    }
}

// ---------------------------------------------------------------------------
// Register errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterError {
    /// Register index outside `0..REGISTER_COUNT`.
    IndexOutOfRange(usize),
}

impl fmt::Display for RegisterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange(i) => write!(f, "register index {i} out of range"),
        }
    }
}

impl From<RegisterError> for Error {
    fn from(e: RegisterError) -> Self {
        Self::Register(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
