// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! [Mem] represents the interpreter's 4 KiB of memory
//!
//! Contains some handy utils for reading and writing

use crate::{
    error::{Error, Result},
    traits::Grab,
};
use std::{
    fmt::{Display, Formatter},
    ops::Range,
    slice::SliceIndex,
};

/// Total size of addressable memory
pub const MEM_SIZE: usize = 0x1000;
/// Where the font glyphs are loaded
pub const FONT_ADDR: u16 = 0x050;
/// Where programs are loaded, and where execution starts
pub const PROGRAM_ADDR: u16 = 0x200;

/// The 4x5 hexadecimal font, glyphs `0` through `F`, 5 bytes apiece
#[rustfmt::skip]
pub const FONT: [u8; 80] = [
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

impl Grab<u8> for Mem {
    /// Gets a slice of [Mem] memory
    /// # Examples
    /// ```rust
    /// # use c8core::prelude::*;
    /// let mem = Mem::new();
    /// assert_eq!(Some([0xf0, 0x90].as_slice()), mem.grab(0x50..0x52));
    /// ```
    #[inline(always)]
    fn grab<I>(&self, index: I) -> Option<&<I as SliceIndex<[u8]>>::Output>
    where
        I: SliceIndex<[u8]>,
    {
        self.memory.get(index)
    }

    /// Gets a mutable slice of [Mem] memory
    #[inline(always)]
    fn grab_mut<I>(&mut self, index: I) -> Option<&mut <I as SliceIndex<[u8]>>::Output>
    where
        I: SliceIndex<[u8]>,
    {
        self.memory.get_mut(index)
    }
}

/// Represents a named region in memory
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Region {
    /// Character ROM (written once at power-on)
    Charset,
    /// Program memory
    Program,
}

impl Region {
    /// The address range this region covers
    pub const fn range(self) -> Range<usize> {
        match self {
            Region::Charset => FONT_ADDR as usize..FONT_ADDR as usize + FONT.len(),
            Region::Program => PROGRAM_ADDR as usize..MEM_SIZE,
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

/// Flat, fixed-size byte store, with the font preloaded into [Region::Charset]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mem {
    memory: Vec<u8>,
}

impl Mem {
    /// Constructs a zeroed [Mem] with the font loaded
    /// # Examples
    /// ```rust
    /// # use c8core::prelude::*;
    /// let mem = Mem::new();
    /// assert_eq!(0x1000, mem.len());
    /// assert_eq!(Some(&c8core::mem::FONT[..]), mem.get_region(Charset));
    /// ```
    pub fn new() -> Self {
        let mut memory = vec![0; MEM_SIZE];
        memory[Region::Charset.range()].copy_from_slice(&FONT);
        Mem { memory }
    }

    /// Gets the length of the backing memory
    pub fn len(&self) -> usize {
        self.memory.len()
    }

    /// Returns true if the backing memory contains no elements
    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }

    /// Loads data into the start of a named [Region], if it fits
    /// # Examples
    /// ```rust
    /// # use c8core::prelude::*;
    /// # fn main() -> Result<()> {
    /// let mut mem = Mem::new();
    /// mem.load_region(Program, b"Hello, world!")?;
    /// assert_eq!(Some(&b"Hello"[..]), mem.grab(0x200..0x205));
    /// # Ok(())
    /// # }
    /// ```
    /// Data which doesn't fit is rejected, and nothing is written
    /// ```rust
    /// # use c8core::prelude::*;
    /// let mut mem = Mem::new();
    /// assert!(mem.load_region(Program, &[0xff; 0xe01]).is_err());
    /// assert_eq!(Some(&[0u8; 4][..]), mem.grab(0x200..0x204));
    /// ```
    pub fn load_region(&mut self, name: Region, data: &[u8]) -> Result<&mut Self> {
        let region = self.get_region_mut(name).ok_or(Error::InvalidAddressRange {
            range: name.range(),
        })?;
        if data.len() > region.len() {
            return Err(Error::ProgramTooLarge {
                len: data.len(),
                capacity: region.len(),
            });
        }
        region[..data.len()].copy_from_slice(data);
        Ok(self)
    }

    /// Fills a [Region] with zeroes
    pub fn clear_region(&mut self, name: Region) -> &mut Self {
        if let Some(region) = self.get_region_mut(name) {
            region.fill(0)
        }
        self
    }

    /// Gets a slice of a named [Region] of memory
    #[inline(always)]
    pub fn get_region(&self, name: Region) -> Option<&[u8]> {
        self.grab(name.range())
    }

    /// Gets a mutable slice of a named region of memory
    #[inline(always)]
    pub fn get_region_mut(&mut self, name: Region) -> Option<&mut [u8]> {
        self.grab_mut(name.range())
    }
}

impl Default for Mem {
    fn default() -> Self {
        Self::new()
    }
}
