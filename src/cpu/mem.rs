// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The Mem represents the CPU's memory
//!
//! A flat 4 KiB byte store with the hex font preloaded at [FONT_START_ADDRESS]
//! and the program image loaded at [PROGRAM_START_ADDRESS].

use crate::error::{Error, Result};
use std::{
    fmt::{Display, Formatter},
    ops::Range,
};

/// Number of addressable bytes
pub const MEMORY_SIZE: usize = 0x1000;
/// Where the hex font lives
pub const FONT_START_ADDRESS: u16 = 0x050;
/// Where programs are loaded, and where execution begins
pub const PROGRAM_START_ADDRESS: u16 = 0x200;
/// Number of bytes in a single font glyph
pub const GLYPH_SIZE: u16 = 5;

/// The sixteen 4x5 hex digit glyphs, `0` through `F`
#[rustfmt::skip]
pub const FONT: [u8; 16 * GLYPH_SIZE as usize] = [
    0xf0, 0x90, 0x90, 0x90, 0xf0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xf0, 0x10, 0xf0, 0x80, 0xf0, // 2
    0xf0, 0x10, 0xf0, 0x10, 0xf0, // 3
    0x90, 0x90, 0xf0, 0x10, 0x10, // 4
    0xf0, 0x80, 0xf0, 0x10, 0xf0, // 5
    0xf0, 0x80, 0xf0, 0x90, 0xf0, // 6
    0xf0, 0x10, 0x20, 0x40, 0x40, // 7
    0xf0, 0x90, 0xf0, 0x90, 0xf0, // 8
    0xf0, 0x90, 0xf0, 0x10, 0xf0, // 9
    0xf0, 0x90, 0xf0, 0x90, 0x90, // A
    0xe0, 0x90, 0xe0, 0x90, 0xe0, // B
    0xf0, 0x80, 0x80, 0x80, 0xf0, // C
    0xe0, 0x90, 0x90, 0x90, 0xe0, // D
    0xf0, 0x80, 0xf0, 0x80, 0xf0, // E
    0xf0, 0x80, 0xf0, 0x80, 0x80, // F
];

/// Represents a named region in memory
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Region {
    /// Character ROM
    Charset,
    /// Program memory
    Program,
}

impl Region {
    /// The range of addresses covered by this [Region]
    pub fn range(self) -> Range<usize> {
        match self {
            Region::Charset => {
                FONT_START_ADDRESS as usize..FONT_START_ADDRESS as usize + FONT.len()
            }
            Region::Program => PROGRAM_START_ADDRESS as usize..MEMORY_SIZE,
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Region::Charset => "Charset",
                Region::Program => "Program",
            }
        )
    }
}

/// Stores the 4 KiB of CPU memory
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mem {
    memory: Vec<u8>,
}

impl Default for Mem {
    fn default() -> Self {
        Self::new()
    }
}

impl Mem {
    /// Constructs a zeroed memory with the font already loaded
    /// # Examples
    /// ```rust
    ///# use chipper::*;
    /// let mem = Mem::new();
    /// assert_eq!(0x1000, mem.len());
    /// assert_eq!(Ok(0xf0), mem.get(0x50).map_err(|e| e.to_string()));
    /// ```
    pub fn new() -> Self {
        let mut memory = vec![0; MEMORY_SIZE];
        memory[Region::Charset.range()].copy_from_slice(&FONT);
        Mem { memory }
    }

    /// Gets the length of the backing memory. Always [MEMORY_SIZE].
    pub fn len(&self) -> usize {
        self.memory.len()
    }

    /// Returns true if the backing memory contains no elements
    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }

    /// Copies a program into [Region::Program], zeroing whatever was there before.
    ///
    /// Returns [Error::ProgramTooLarge] if the program doesn't fit, leaving memory untouched.
    /// # Examples
    /// ```rust
    ///# use chipper::*;
    ///# fn main() -> Result<()> {
    /// let mut mem = Mem::new();
    /// mem.load_program(&[0x00, 0xe0])?;
    /// assert_eq!(0x00, mem.get(0x200)?);
    /// assert_eq!(0xe0, mem.get(0x201)?);
    ///
    /// assert!(mem.load_program(&[0; 0x1000]).is_err());
    ///#    Ok(())
    ///# }
    /// ```
    pub fn load_program(&mut self, program: &[u8]) -> Result<&mut Self> {
        let region = Region::Program.range();
        if program.len() > region.len() {
            return Err(Error::ProgramTooLarge {
                len: program.len(),
                max: region.len(),
            });
        }
        let start = region.start;
        let program_space = &mut self.memory[region];
        program_space.fill(0);
        program_space[..program.len()].copy_from_slice(program);
        debug_assert_eq!(self.memory[start..start + program.len()], *program);
        Ok(self)
    }

    /// Reads a single byte
    ///
    /// Returns [Error::InvalidAddress] if `addr` is outside memory
    pub fn get(&self, addr: usize) -> Result<u8> {
        self.memory
            .get(addr)
            .copied()
            .ok_or(Error::InvalidAddress { addr })
    }

    /// Writes a single byte
    ///
    /// Returns [Error::InvalidAddress] if `addr` is outside memory
    pub fn set(&mut self, addr: usize, value: u8) -> Result<()> {
        let byte = self
            .memory
            .get_mut(addr)
            .ok_or(Error::InvalidAddress { addr })?;
        *byte = value;
        Ok(())
    }

    /// Reads a big-endian word at `addr..addr + 2`
    pub fn get_word(&self, addr: usize) -> Result<u16> {
        Ok(u16::from_be_bytes([self.get(addr)?, self.get(addr + 1)?]))
    }

    /// Gets a slice of memory, or [Error::InvalidAddress] naming the first
    /// address that falls outside it
    pub fn slice(&self, range: Range<usize>) -> Result<&[u8]> {
        let first_bad = range.start.max(self.len());
        self.memory
            .get(range)
            .ok_or(Error::InvalidAddress { addr: first_bad })
    }

    /// Gets a mutable slice of memory, or [Error::InvalidAddress] naming the
    /// first address that falls outside it
    pub fn slice_mut(&mut self, range: Range<usize>) -> Result<&mut [u8]> {
        let first_bad = range.start.max(self.len());
        self.memory
            .get_mut(range)
            .ok_or(Error::InvalidAddress { addr: first_bad })
    }

    /// Gets a slice of a named [Region] of memory
    /// # Examples
    /// ```rust
    ///# use chipper::*;
    /// let mem = Mem::new();
    /// assert_eq!(&FONT[..], mem.get_region(Region::Charset));
    /// ```
    pub fn get_region(&self, name: Region) -> &[u8] {
        &self.memory[name.range()]
    }
}

impl Display for Mem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use owo_colors::{OwoColorize, Style};
        // Green phosphor style formatting, for taste
        let term = Style::new().bold().green();
        for (index, line) in self.memory.chunks(16).enumerate() {
            // skip lines that are entirely zero
            if line.iter().all(|&b| b == 0) {
                continue;
            }
            write!(f, "{}{} ", format_args!("{:03x}", index * 16).style(term), ":".style(term))?;
            for (col, byte) in line.iter().enumerate() {
                write!(f, "{byte:02x}")?;
                match col % 16 {
                    0xf => writeln!(f)?,
                    0x7 => write!(f, "  ")?,
                    _ if col % 2 == 1 => write!(f, " ")?,
                    _ => (),
                }
            }
        }
        Ok(())
    }
}
