//! Host events flowing into the core and the outbound channels they feed.
//!
//! The host message bus delivers a [`HostEvent`] to whichever listener
//! subscribed to its source component.  The
//! [`BridgeService`](super::service::BridgeService) encodes it into the
//! channel's reusable frame and signals the
//! [`NotifySink`](super::ports::NotifySink).

/// A raw message-bus event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostEvent {
    /// Component ID that raised the event.
    pub source: u16,
    /// Host event code, component specific.
    pub value: u16,
    /// Host timestamp; the wire carries the low 32 bits.
    pub timestamp: u64,
}

impl HostEvent {
    pub const fn new(source: u16, value: u16, timestamp: u64) -> Self {
        Self {
            source,
            value,
            timestamp,
        }
    }
}

/// On-board push buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    A,
    B,
}

/// Outbound notification channels, one reusable frame each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyChannel {
    PinEvent,
    ActionEvent,
}
