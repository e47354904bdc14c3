//! Bridge configuration parameters.
//!
//! Captures the hardware-abstraction generation the core runs on and the
//! few tunables of the session lifecycle.  Supplied once at construction.

use serde::{Deserialize, Serialize};

/// Hardware-abstraction generation of the host runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HalGeneration {
    /// micro:bit v1.x runtime.
    Dal,
    /// micro:bit v2 runtime.
    Codal,
}

/// Platform capabilities that differ between HAL generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub generation: HalGeneration,
    /// Highest analog output level the platform drives stably.
    pub analog_max: u16,
}

impl Capabilities {
    /// micro:bit v1.5: analog output stable up to 1021.
    pub const fn dal() -> Self {
        Self {
            generation: HalGeneration::Dal,
            analog_max: 1021,
        }
    }

    /// micro:bit v2: analog output stable up to 1022.
    pub const fn codal() -> Self {
        Self {
            generation: HalGeneration::Codal,
            analog_max: 1022,
        }
    }

    /// DAL cannot read the button pins as digital inputs.
    pub fn reads_buttons_as_pins(&self) -> bool {
        self.generation == HalGeneration::Codal
    }

    /// On CODAL a compass recalibration destroys the heading, so the
    /// hold-A-to-reset gesture is DAL only.
    pub fn clears_compass_on_button_a(&self) -> bool {
        self.generation == HalGeneration::Dal
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::codal()
    }
}

/// Core bridge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    pub capabilities: Capabilities,
    /// Device name shown by [`display_friendly_name`](crate::app::service::BridgeService::display_friendly_name).
    pub friendly_name: heapless::String<16>,
    /// Firmware version appended to the friendly name.
    pub version: heapless::String<8>,
    /// Scroll delay for the friendly name (ms per column).
    pub name_scroll_delay_ms: u32,
    /// Character printed once the session is configured.
    pub ready_glyph: char,
}

impl BridgeConfig {
    /// Build a default config for the given platform.
    pub fn for_platform(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            ..Self::default()
        }
    }

    /// Decode a JSON config blob (e.g. from a provisioning tool).
    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigError> {
        serde_json::from_slice(bytes).map_err(|_| ConfigError::Corrupted)
    }

    /// Encode to the compact persisted form.
    pub fn to_postcard(&self) -> Result<Vec<u8>, ConfigError> {
        postcard::to_allocvec(self).map_err(|_| ConfigError::Corrupted)
    }

    /// Decode the compact persisted form.
    pub fn from_postcard(bytes: &[u8]) -> Result<Self, ConfigError> {
        postcard::from_bytes(bytes).map_err(|_| ConfigError::Corrupted)
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        let mut friendly_name = heapless::String::new();
        let _ = friendly_name.push_str("micro:bit");
        let mut version = heapless::String::new();
        let _ = version.push_str("0.6.0");
        Self {
            capabilities: Capabilities::default(),
            friendly_name,
            version,
            // Matches the standard extension's scroll interval.
            name_scroll_delay_ms: 120,
            ready_glyph: 'M',
        }
    }
}

/// Errors from config decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Blob failed to deserialize.
    Corrupted,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
        }
    }
}
