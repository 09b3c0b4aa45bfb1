use std::fmt;

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::devices::Output;

/// # FrameBuffer
/// The Chip-8 display is composed of 64x32 black/white pixels.
///
/// Pixels are stored row-major, so the pixel at column `x` of row `y` lives at
/// `y * DISPLAY_WIDTH + x`. The dirty flag is set whenever the interpreter
/// draws and cleared by whoever presents the frame.
#[derive(Copy, Clone)]
pub struct FrameBuffer {
    pixels: [bool; DISPLAY_WIDTH * DISPLAY_HEIGHT],
    dirty: bool,
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [false; DISPLAY_WIDTH * DISPLAY_HEIGHT],
            dirty: false,
        }
    }

    /// Whether the pixel at column `x` of row `y` is set; `false` off screen
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        x < DISPLAY_WIDTH && y < DISPLAY_HEIGHT && self.pixels[y * DISPLAY_WIDTH + x]
    }

    pub fn pixels(&self) -> &[bool] {
        &self.pixels
    }

    /// Each row of the frame, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.pixels.chunks(DISPLAY_WIDTH)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for FrameBuffer {
    fn clear(&mut self) {
        self.pixels = [false; DISPLAY_WIDTH * DISPLAY_HEIGHT];
        self.dirty = true;
    }

    fn flip(&mut self, index: usize) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = !*pixel;
        }
    }

    fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }
}

/// One line of `#` (set) and `.` (unset) per row
impl fmt::Display for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &pixel in row {
                f.write_str(if pixel { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
