//! Shared registers: four signed 16-bit slots written by the client and
//! readable from local code, used for lightweight cross-context signalling.

use log::warn;

use crate::error::{RegisterError, Result};

pub const REGISTER_COUNT: usize = 4;

#[derive(Debug, Clone, Default)]
pub struct SharedRegisterStore {
    registers: [i16; REGISTER_COUNT],
}

impl SharedRegisterStore {
    pub const fn new() -> Self {
        Self {
            registers: [0; REGISTER_COUNT],
        }
    }

    /// Store `value` truncated to 16 bits.
    pub fn set(&mut self, index: usize, value: i32) -> Result<()> {
        let Some(slot) = self.registers.get_mut(index) else {
            warn!("shared register write rejected: index {}", index);
            return Err(RegisterError::IndexOutOfRange(index).into());
        };
        *slot = value as i16;
        Ok(())
    }

    pub fn get(&self, index: usize) -> Result<i16> {
        self.registers
            .get(index)
            .copied()
            .ok_or_else(|| RegisterError::IndexOutOfRange(index).into())
    }

    pub fn values(&self) -> &[i16; REGISTER_COUNT] {
        &self.registers
    }
}
