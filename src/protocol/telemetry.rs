//! Periodic sensor telemetry frames.
//!
//! Sensors (6 bytes):
//! ```text
//! [0..4] u32 LE digital levels  [4] light  [5] temperature + 128
//! ```
//! Direction (18 bytes):
//! ```text
//! [0..2] pitch  [2..4] roll          i16 LE, radians × 1000
//! [4..10] accel X, Y, Z              i16 LE, milli-g, X and Z negated
//! [10..12] heading                   u16 LE, degrees, normalized
//! [12..18] magnetic X, Y, Z          i16 LE, µT
//! ```
//! Analog input (2 bytes):
//! ```text
//! [0..2] u16 LE median ADC level
//! ```
//!
//! The accelerometer X and Z axes are negated so the label side of the
//! board reads positive along Z.

use embedded_hal::digital::PinState;

use crate::app::events::Button;
use crate::app::ports::{PinPort, SensorPort};
use crate::config::Capabilities;
use crate::error::FrameError;
use crate::pins::{BUTTON_A_PIN, BUTTON_B_PIN, GPIO_PINS};
use crate::pull::PullModeTable;
use crate::sensors::{AnalogSampler, LightSampler};

use super::frame::{require_capacity, saturate_i16, write_i16_le, write_u16_le, write_u32_le};

pub const SENSORS_LEN: usize = 6;
pub const DIRECTION_LEN: usize = 18;
pub const ANALOG_IN_LEN: usize = 2;

/// Reflect the compass heading when the board is face down (accel Z > 0),
/// since the heading is defined for the face-up orientation.
pub fn normalize_heading(heading: i32, face_down: bool) -> i32 {
    if !face_down {
        return heading;
    }
    if heading <= 180 {
        180 - heading
    } else {
        360 - (heading - 180)
    }
}

/// Convert a pitch/roll angle to the companion extension's tilt scale.
///
/// Degrees / 90 gives ±1 at a quarter turn; past that the value is folded
/// back toward zero by reflection around ±2 (not clamped), then scaled by
/// 1000 and truncated.
pub fn convert_to_tilt(radians: f32) -> i32 {
    let degrees = radians.to_degrees();
    let mut tilt = degrees / 90.0;
    if degrees > 0.0 {
        if tilt > 1.0 {
            tilt = 2.0 - tilt;
        }
    } else if tilt < -1.0 {
        tilt = -2.0 - tilt;
    }
    (tilt * 1000.0) as i32
}

/// One reading of every orientation sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    pub pitch_radians: f32,
    pub roll_radians: f32,
    pub accel: [i32; 3],
    pub heading: i32,
    pub magnetic: [i32; 3],
}

impl Orientation {
    pub fn read(sensors: &mut impl SensorPort) -> Self {
        Self {
            pitch_radians: sensors.pitch_radians(),
            roll_radians: sensors.roll_radians(),
            accel: [sensors.accel_x(), sensors.accel_y(), sensors.accel_z()],
            heading: sensors.compass_heading(),
            magnetic: [sensors.compass_x(), sensors.compass_y(), sensors.compass_z()],
        }
    }

    pub fn is_face_down(&self) -> bool {
        self.accel[2] > 0
    }

    /// Write the 18-byte direction layout.
    pub fn encode(&self, buf: &mut [u8]) -> Result<(), FrameError> {
        require_capacity(buf, DIRECTION_LEN)?;
        write_i16_le(buf, 0, saturate_i16((self.pitch_radians * 1000.0) as i32));
        write_i16_le(buf, 2, saturate_i16((self.roll_radians * 1000.0) as i32));

        let [x, y, z] = self.accel;
        write_i16_le(buf, 4, saturate_i16(x.saturating_neg()));
        write_i16_le(buf, 6, saturate_i16(y));
        write_i16_le(buf, 8, saturate_i16(z.saturating_neg()));

        let heading = normalize_heading(self.heading, self.is_face_down());
        write_u16_le(buf, 10, heading.clamp(0, i32::from(u16::MAX)) as u16);

        for (i, raw) in self.magnetic.iter().enumerate() {
            write_i16_le(buf, 12 + 2 * i, saturate_i16(raw / 1000));
        }
        Ok(())
    }
}

/// Owns the filter state behind the sampled telemetry frames.
pub struct TelemetryEncoder {
    capabilities: Capabilities,
    light: LightSampler,
    analog: AnalogSampler,
}

impl TelemetryEncoder {
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            light: LightSampler::new(),
            analog: AnalogSampler::new(),
        }
    }

    /// Digital levels, median light and temperature into the 6-byte
    /// sensors layout.
    pub fn sample_digital_and_environment(
        &mut self,
        buf: &mut [u8],
        hw: &mut (impl PinPort + SensorPort),
    ) -> Result<(), FrameError> {
        require_capacity(buf, SENSORS_LEN)?;
        let levels = self.digital_levels(hw);
        let light = self.light.sample(hw);
        let temperature = hw.temperature();

        write_u32_le(buf, 0, levels);
        buf[4] = light;
        buf[5] = temperature.saturating_add(128).clamp(0, 255) as u8;
        Ok(())
    }

    /// Orientation into the 18-byte direction layout.
    pub fn sample_orientation(
        &self,
        buf: &mut [u8],
        sensors: &mut impl SensorPort,
    ) -> Result<(), FrameError> {
        Orientation::read(sensors).encode(buf)
    }

    /// Median analog level of `pin` into bytes 0..2.  Returns the value
    /// written, or `None` with `buf` untouched if the pin is not an analog
    /// input.
    pub fn sample_analog_pin(
        &mut self,
        buf: &mut [u8],
        pin: u8,
        hw: &mut impl PinPort,
        pulls: &PullModeTable,
    ) -> Result<Option<u16>, FrameError> {
        require_capacity(buf, ANALOG_IN_LEN)?;
        let value = self.analog.sample(pin, hw, pulls);
        if let Some(v) = value {
            write_u16_le(buf, 0, v);
        }
        Ok(value)
    }

    /// Bit `p` set for each GPIO that is a digital input reading high,
    /// plus the two button bits.
    fn digital_levels(&self, hw: &mut (impl PinPort + SensorPort)) -> u32 {
        let mut levels = 0u32;
        for pin in GPIO_PINS {
            if hw.is_digital(pin) && hw.is_input(pin) && hw.digital_value(pin) == PinState::High {
                levels |= 1 << pin;
            }
        }

        for (button, pin) in [(Button::A, BUTTON_A_PIN), (Button::B, BUTTON_B_PIN)] {
            let high = if self.capabilities.reads_buttons_as_pins() {
                hw.digital_value(pin) == PinState::High
            } else {
                // Buttons are active low.
                !hw.is_button_pressed(button)
            };
            if high {
                levels |= 1 << pin;
            }
        }
        levels
    }
}
