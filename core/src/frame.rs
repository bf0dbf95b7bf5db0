use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, SPRITE_WIDTH};

/// Pixel rows indexed as [y][x]; each cell is 1 (lit) or 0.
pub type Rows = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// # FrameBuffer
/// The 64x32 monochrome pixel grid that sprites are XOR'd onto.
///
/// It is only ever cleared explicitly (by `00E0` or a reset); every frame
/// handed to a display is the accumulation of all draws since then.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: Rows,
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    }

    /// A read-only view of every pixel for rendering.
    pub fn rows(&self) -> &Rows {
        &self.pixels
    }

    pub fn is_set(&self, row: usize, col: usize) -> bool {
        self.pixels[row % DISPLAY_HEIGHT][col % DISPLAY_WIDTH] == 1
    }

    pub fn lit_count(&self) -> usize {
        self.pixels
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&pixel| pixel == 1)
            .count()
    }

    /// Flips a single pixel, returning true if it went from lit to unlit.
    ///
    /// Columns always wrap. Rows only wrap when `wrap_y` is set; otherwise a
    /// row past the bottom edge is dropped and can't collide.
    pub fn toggle(&mut self, row: usize, col: usize, wrap_y: bool) -> bool {
        if !wrap_y && row >= DISPLAY_HEIGHT {
            return false;
        }
        let pixel = &mut self.pixels[row % DISPLAY_HEIGHT][col % DISPLAY_WIDTH];
        *pixel ^= 1;
        *pixel == 0
    }

    /// XORs a sprite onto the buffer with its top-left corner at (row0, col0).
    ///
    /// Each byte of `sprite` is one row, most significant bit leftmost.
    /// Returns true if any lit pixel was erased.
    pub fn draw_sprite(&mut self, row0: usize, col0: usize, sprite: &[u8], wrap_y: bool) -> bool {
        let mut collision = false;
        for (dy, byte) in sprite.iter().enumerate() {
            for dx in 0..SPRITE_WIDTH {
                if byte & (0x80 >> dx) != 0 {
                    collision |= self.toggle(row0 + dy, col0 + dx, wrap_y);
                }
            }
        }
        collision
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
