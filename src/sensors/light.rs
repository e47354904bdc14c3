//! Median-filtered ambient light level.
//!
//! One sample per call goes into a circular ring; the median is taken over
//! the whole ring, so it settles after [`LIGHT_LEVEL_SAMPLES`] calls.

use crate::app::ports::SensorPort;

use super::median::MedianFilter;

pub const LIGHT_LEVEL_SAMPLES: usize = 11;

pub struct LightSampler {
    ring: MedianFilter<LIGHT_LEVEL_SAMPLES>,
}

impl LightSampler {
    pub const fn new() -> Self {
        Self {
            ring: MedianFilter::new(),
        }
    }

    pub fn sample(&mut self, sensors: &mut impl SensorPort) -> u8 {
        self.ring.push(i32::from(sensors.light_level()));
        self.ring.median().clamp(0, 255) as u8
    }
}

impl Default for LightSampler {
    fn default() -> Self {
        Self::new()
    }
}
