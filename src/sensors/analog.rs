//! Median-filtered analog input on P0–P2.
//!
//! Each read re-samples every slot of the pin's ring with the pull bias
//! removed, then restores the configured pull mode.

use log::debug;

use crate::app::ports::PinPort;
use crate::pins::ANALOG_IN_PINS;
use crate::protocol::command::PullMode;
use crate::pull::PullModeTable;

use super::median::MedianFilter;

/// Samples taken per analog read.
pub const ANALOG_IN_SAMPLES: usize = 5;

pub struct AnalogSampler {
    rings: [MedianFilter<ANALOG_IN_SAMPLES>; ANALOG_IN_PINS.len()],
}

impl AnalogSampler {
    pub fn new() -> Self {
        Self {
            rings: core::array::from_fn(|_| MedianFilter::new()),
        }
    }

    /// Median analog level of `pin`, or `None` if the pin has no ring or is
    /// not currently an input.
    pub fn sample(
        &mut self,
        pin: u8,
        hw: &mut impl PinPort,
        pulls: &PullModeTable,
    ) -> Option<u16> {
        let Some(idx) = ANALOG_IN_PINS.iter().position(|&p| p == pin) else {
            debug!("analog sample on P{} ignored: no sample ring", pin);
            return None;
        };
        if !hw.is_input(pin) {
            return None;
        }

        hw.set_pull(pin, PullMode::None);
        let ring = &mut self.rings[idx];
        ring.refill(|| i32::from(hw.analog_value(pin)));
        let value = ring.median();
        pulls.restore(pin, hw);

        Some(value.clamp(0, i32::from(u16::MAX)) as u16)
    }
}

impl Default for AnalogSampler {
    fn default() -> Self {
        Self::new()
    }
}
