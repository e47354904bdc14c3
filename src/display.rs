//! Shadow buffer for the 5×5 LED matrix.
//!
//! A full image needs more than one 20-byte frame, so it arrives in two
//! writes: rows 0–2, then rows 3–4.  Rows accumulate here and every write of
//! rows 3–4 pushes the whole grid to the display in one flush.  Rows 0–2 on
//! their own never reach the display.

use crate::app::ports::DisplayPort;
use crate::protocol::command::ROW_LEN;

pub const GRID_SIZE: usize = 5;

/// Rows carried by the first write.
pub const HEAD_ROWS: usize = 3;

pub struct ShadowDisplayBuffer {
    grid: [[u8; GRID_SIZE]; GRID_SIZE],
}

impl ShadowDisplayBuffer {
    pub const fn new() -> Self {
        Self {
            grid: [[0; GRID_SIZE]; GRID_SIZE],
        }
    }

    /// Stage rows 0–2.
    pub fn write_head(&mut self, rows: &[[u8; ROW_LEN]; HEAD_ROWS]) {
        self.grid[..HEAD_ROWS].copy_from_slice(rows);
    }

    /// Stage rows 3–4 and flush the whole grid.
    pub fn write_tail(
        &mut self,
        rows: &[[u8; ROW_LEN]; GRID_SIZE - HEAD_ROWS],
        display: &mut impl DisplayPort,
    ) {
        self.grid[HEAD_ROWS..].copy_from_slice(rows);
        self.flush(display);
    }

    fn flush(&self, display: &mut impl DisplayPort) {
        display.stop_animation();
        for (y, row) in self.grid.iter().enumerate() {
            for (x, &brightness) in row.iter().enumerate() {
                display.set_pixel(x as u8, y as u8, brightness);
            }
        }
    }

    pub fn grid(&self) -> &[[u8; GRID_SIZE]; GRID_SIZE] {
        &self.grid
    }
}

impl Default for ShadowDisplayBuffer {
    fn default() -> Self {
        Self::new()
    }
}
