//! Sensor sampling: the two independent median-filtered streams.
//!
//! | Stream  | Ring                          | Fill discipline        |
//! |---------|-------------------------------|------------------------|
//! | analog  | one per pin P0–P2, 5 samples  | fully refilled per read|
//! | light   | one shared, 11 samples        | circular, one per read |

pub mod analog;
pub mod light;
pub mod median;

pub use analog::AnalogSampler;
pub use light::LightSampler;
pub use median::{MedianFilter, median};
