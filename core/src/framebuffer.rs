use std::fmt;

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// A single row of pixels.
pub type Row = [bool; DISPLAY_WIDTH];

/// # Framebuffer
/// The contents of the next frame to be drawn: 64x32 on/off pixels, indexed as [y][x].
///
/// The draw flag (`dirty`) is raised whenever the pixels change and lowered by the host
/// once it has rendered them.
#[derive(Copy, Clone, PartialEq)]
pub struct Framebuffer {
    pixels: [Row; DISPLAY_HEIGHT],
    dirty: bool,
}

impl Framebuffer {
    pub fn new() -> Self {
        Framebuffer {
            pixels: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            dirty: false,
        }
    }

    /// Turns every pixel off.
    pub fn clear(&mut self) {
        self.pixels = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        self.dirty = true;
    }

    /// Flips the pixel at `(x, y)`, wrapping both coordinates around the edges of the screen.
    /// Returns whether the pixel was on beforehand (i.e. whether this is a collision).
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        let pixel = &mut self.pixels[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH];
        let was_on = *pixel;
        *pixel = !was_on;
        was_on
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH]
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.pixels.iter()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// One line per row; `#` for on and `.` for off.
impl fmt::Display for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|&p| if p { '#' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Framebuffer (dirty: {})", self.dirty)?;
        fmt::Display::fmt(self, f)
    }
}
