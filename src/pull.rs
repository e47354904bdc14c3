//! Persisted pull-mode configuration per pin.
//!
//! Analog sampling forces a pin to pull-none for the duration of the read;
//! this table is what it restores afterwards.

use crate::app::ports::PinPort;
use crate::pins::PIN_COUNT;
use crate::protocol::command::PullMode;

#[derive(Debug, Clone)]
pub struct PullModeTable {
    modes: [PullMode; PIN_COUNT],
}

impl PullModeTable {
    pub const fn new() -> Self {
        Self {
            modes: [PullMode::None; PIN_COUNT],
        }
    }

    /// Apply `mode` to the pin and remember it.  Out-of-range pins are
    /// ignored.
    pub fn apply(&mut self, pin: u8, mode: PullMode, hw: &mut impl PinPort) {
        let Some(slot) = self.modes.get_mut(usize::from(pin)) else {
            return;
        };
        hw.set_pull(pin, mode);
        *slot = mode;
    }

    /// Re-apply the remembered mode after a temporary override.
    pub fn restore(&self, pin: u8, hw: &mut impl PinPort) {
        hw.set_pull(pin, self.get(pin));
    }

    pub fn get(&self, pin: u8) -> PullMode {
        self.modes
            .get(usize::from(pin))
            .copied()
            .unwrap_or_default()
    }
}

impl Default for PullModeTable {
    fn default() -> Self {
        Self::new()
    }
}
