//! Channel-backed notify sink.
//!
//! Bridges the synchronous event callbacks to the BLE task through an
//! `embassy-sync` bounded channel.  Each ready frame is copied into a
//! [`ReadyMsg`] so the core can reuse its frame at once.
//!
//! ```text
//! ┌──────────────┐   ReadyMsg   ┌──────────────┐
//! │ BridgeService│────────────▶│   BLE task    │
//! │  (callbacks) │              │  (notify)     │
//! └──────────────┘              └──────────────┘
//! ```
//!
//! A full channel drops the frame: events are lossy on the air anyway and
//! the callback context must not block.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::warn;

use crate::app::events::NotifyChannel;
use crate::app::ports::NotifySink;
use crate::protocol::frame::{FRAME_LEN, NotificationFrame};

/// A frame ready for the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadyMsg {
    pub channel: NotifyChannel,
    pub frame: [u8; FRAME_LEN],
}

/// Channel depth for ready frames.
pub const READY_DEPTH: usize = 8;

pub type ReadyChannel<const N: usize> = Channel<CriticalSectionRawMutex, ReadyMsg, N>;

/// Outbound ready-frame channel: event callbacks → BLE task.
pub static READY_CHANNEL: ReadyChannel<READY_DEPTH> = Channel::new();

pub struct ChannelNotifySink<'a, const N: usize> {
    channel: &'a ReadyChannel<N>,
    dropped: u32,
}

impl<'a, const N: usize> ChannelNotifySink<'a, N> {
    pub fn new(channel: &'a ReadyChannel<N>) -> Self {
        Self {
            channel,
            dropped: 0,
        }
    }

    /// Frames discarded because the channel was full.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

impl ChannelNotifySink<'static, READY_DEPTH> {
    /// Sink feeding the global [`READY_CHANNEL`].
    pub fn global() -> Self {
        Self::new(&READY_CHANNEL)
    }
}

impl<const N: usize> NotifySink for ChannelNotifySink<'_, N> {
    fn notify(&mut self, channel: NotifyChannel, frame: &NotificationFrame) {
        let msg = ReadyMsg {
            channel,
            frame: *frame.as_bytes(),
        };
        if self.channel.try_send(msg).is_err() {
            self.dropped = self.dropped.wrapping_add(1);
            warn!("{:?} frame dropped: transport queue full", channel);
        }
    }
}
