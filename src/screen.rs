// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Stores and displays the Chip-8's screen memory
//!
//! The screen is 64x32 monochrome pixels, packed 8 to a byte, MSB leftmost.
//! It can only be changed by [Screen::clear] and [Screen::draw].


use owo_colors::{OwoColorize, Style};
use std::fmt::{Display, Formatter};

/// Width of the screen, in pixels
pub const WIDTH: usize = 64;
/// Height of the screen, in pixels
pub const HEIGHT: usize = 32;
/// Width of the screen, in bytes
pub const ROW_BYTES: usize = WIDTH / 8;

/// The Chip-8's 64x32 monochrome display
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Screen {
    cells: [u8; ROW_BYTES * HEIGHT],
}

impl Screen {
    /// Constructs a blank screen
    pub fn new() -> Self {
        Screen {
            cells: [0; ROW_BYTES * HEIGHT],
        }
    }

    /// Turns every pixel off
    pub fn clear(&mut self) -> &mut Self {
        self.cells.fill(0);
        self
    }

    /// XORs an 8-pixel-wide sprite onto the screen at (`x`, `y`), one byte per row.
    ///
    /// The start position wraps around the edges of the screen, but the sprite doesn't:
    /// rows past the bottom edge, and columns past the right edge, are dropped.
    ///
    /// Returns true if any pixel which was on got turned off.
    /// # Examples
    /// ```rust
    /// # use c8core::prelude::*;
    /// let mut screen = Screen::new();
    /// assert!(!screen.draw(0, 0, &[0xff]));
    /// assert!(screen.pixel(7, 0));
    /// // Drawing the same sprite again erases it
    /// assert!(screen.draw(0, 0, &[0xff]));
    /// assert!(!screen.pixel(7, 0));
    /// ```
    pub fn draw(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let (x, y) = (x as usize % WIDTH, y as usize % HEIGHT);
        let shift = x % 8;
        let mut collision = false;
        for (line, &row) in sprite.iter().enumerate() {
            let idx = (y + line) * ROW_BYTES + x / 8;
            if idx >= self.cells.len() {
                break;
            }
            let left = row >> shift;
            collision |= self.cells[idx] & left != 0;
            self.cells[idx] ^= left;
            // the right half only exists when unaligned, and never spills into the next row
            if shift != 0 && (idx + 1) % ROW_BYTES != 0 {
                let right = row << (8 - shift);
                collision |= self.cells[idx + 1] & right != 0;
                self.cells[idx + 1] ^= right;
            }
        }
        collision
    }

    /// Gets the state of the pixel at (`x`, `y`). Out-of-range pixels are off.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }
        self.cells[y * ROW_BYTES + x / 8] & (0x80 >> (x % 8)) != 0
    }

    /// Gets one row of the screen, as 8 packed bytes
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        self.cells.chunks_exact(ROW_BYTES).nth(y)
    }

    /// Iterates over the rows of the screen
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks_exact(ROW_BYTES)
    }

    /// Gets the whole screen as packed bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }

    /// Returns true if every pixel is off
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|&cell| cell == 0)
    }

    /// Prints the screen to stdout
    pub fn print_screen(&self) {
        println!("{self}");
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

/// Draws each pixel as a pair of block characters, one line per row
impl Display for Screen {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Green phosphor style formatting, for taste
        let on: Style = Style::new().green().on_black();
        let off: Style = Style::new().on_black();
        for row in self.rows() {
            for &byte in row {
                for bit in 0..8 {
                    match (byte << bit) & 0x80 {
                        0 => write!(f, "{}", "  ".style(off))?,
                        _ => write!(f, "{}", "██".style(on))?,
                    }
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
