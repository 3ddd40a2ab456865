// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Stores the Chip-8's screen as a monochrome framebuffer
//!
//! The framebuffer only holds pixel state. Turning it into a picture is the
//! job of whatever frontend polls [Screen::get].

use std::fmt::{Display, Formatter, Result};

/// Width of the screen, in pixels
pub const WIDTH: usize = 64;
/// Height of the screen, in pixels
pub const HEIGHT: usize = 32;

/// A 64x32 row-major grid of pixels
///
/// Two screens are equal iff every pixel matches.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Screen {
    pixels: Vec<bool>,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Creates a blank screen
    pub fn new() -> Self {
        Screen {
            pixels: vec![false; WIDTH * HEIGHT],
        }
    }

    /// Width of the screen, in pixels
    pub fn width(&self) -> usize {
        WIDTH
    }

    /// Height of the screen, in pixels
    pub fn height(&self) -> usize {
        HEIGHT
    }

    /// Turns every pixel off
    pub fn clear(&mut self) {
        self.pixels.fill(false);
    }

    /// Gets the state of the pixel at (x, y)
    ///
    /// # Panics
    /// Panics if (x, y) is off-screen
    /// # Examples
    /// ```rust
    ///# use chipper::*;
    /// let mut screen = Screen::new();
    /// screen.set(63, 31, true);
    /// assert!(screen.get(63, 31));
    /// assert!(!screen.get(0, 0));
    /// ```
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.pixels[Self::index(x, y)]
    }

    /// Sets the state of the pixel at (x, y)
    ///
    /// # Panics
    /// Panics if (x, y) is off-screen
    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        self.pixels[Self::index(x, y)] = on;
    }

    /// Iterates over every row of pixels, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.pixels.chunks_exact(WIDTH)
    }

    /// Returns true if every pixel is off
    pub fn is_blank(&self) -> bool {
        !self.pixels.contains(&true)
    }

    fn index(x: usize, y: usize) -> usize {
        assert!(
            x < WIDTH && y < HEIGHT,
            "pixel ({x}, {y}) is outside the {WIDTH}x{HEIGHT} screen"
        );
        y * WIDTH + x
    }
}

impl Display for Screen {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for row in self.rows() {
            for &pixel in row {
                write!(f, "{}", if pixel { '#' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
