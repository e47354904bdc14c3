//! Log-based notify sink adapter.
//!
//! Implements [`NotifySink`] by writing every ready frame to the logger.
//! Useful on a bench with no BLE central attached.

use log::info;

use crate::app::events::NotifyChannel;
use crate::app::ports::NotifySink;
use crate::protocol::frame::NotificationFrame;

/// Adapter that logs every notification frame to the serial console.
pub struct LogNotifySink;

impl LogNotifySink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogNotifySink {
    fn default() -> Self {
        Self::new()
    }
}

impl NotifySink for LogNotifySink {
    fn notify(&mut self, channel: NotifyChannel, frame: &NotificationFrame) {
        let b = frame.as_bytes();
        match channel {
            NotifyChannel::PinEvent => {
                info!(
                    "PIN   | P{} event={} t={} | {:02x?}",
                    b[0],
                    b[1],
                    u32::from_le_bytes([b[2], b[3], b[4], b[5]]),
                    b
                );
            }
            NotifyChannel::ActionEvent => {
                info!("ACTION| kind={} | {:02x?}", b[0], b);
            }
        }
    }
}
