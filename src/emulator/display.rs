//! The monochrome framebuffer and the XOR sprite engine.

use std::fmt;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;
pub const SCREEN_SIZE: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

/// One byte per pixel, 0 or 1, row-major.
pub type Frame = [u8; SCREEN_SIZE];

#[derive(Clone)]
pub struct Screen {
    cells: Frame,
    needs_redraw: bool,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(SCREEN_WIDTH) {
            for c in row.iter() {
                write!(f, "{}", if *c == 1 { "#" } else { " " })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Screen")
            .field("lit", &self.cells.iter().filter(|&&c| c == 1).count())
            .field("needs_redraw", &self.needs_redraw)
            .finish()
    }
}

impl Screen {
    pub fn new() -> Screen {
        Screen {
            cells: [0; SCREEN_SIZE],
            needs_redraw: false,
        }
    }

    pub fn clear(&mut self) {
        self.cells = [0; SCREEN_SIZE];
        self.needs_redraw = true;
    }

    /// XOR a sprite onto the screen with its top left corner at (x, y).
    /// Each byte of `rows` is one row of 8 pixels, most significant bit leftmost.
    /// Coordinates wrap around both edges.
    /// Returns true if any lit pixel was turned off.
    pub fn draw_sprite(&mut self, x: u8, y: u8, rows: &[u8]) -> bool {
        let x0 = x as usize % SCREEN_WIDTH;
        let y0 = y as usize % SCREEN_HEIGHT;

        let mut collision = false;
        for (dy, row) in rows.iter().enumerate() {
            for dx in 0..8 {
                if (row >> (7 - dx)) & 1 == 0 {
                    continue;
                }
                let cell = &mut self.cells[index(x0 + dx, y0 + dy)];
                if *cell == 1 {
                    collision = true;
                }
                *cell ^= 1;
            }
        }

        self.needs_redraw = true;
        collision
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.cells[index(x, y)]
    }

    pub fn cells(&self) -> &Frame {
        &self.cells
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Consume the redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::replace(&mut self.needs_redraw, false)
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

fn index(x: usize, y: usize) -> usize {
    (x % SCREEN_WIDTH) + SCREEN_WIDTH * (y % SCREEN_HEIGHT)
}
