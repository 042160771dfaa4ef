// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Error type for the interpreter core

use std::ops::Range;
use thiserror::Error;

/// Result type, equivalent to [std::result::Result]<T, [enum@Error]>
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the interpreter core.
#[derive(Debug, Error)]
pub enum Error {
    /// Tried to read or write memory outside of the 4 KiB address space.
    ///
    /// When this comes out of a fetch, the program counter ran off the end of memory.
    #[error("range {range:04x?} is outside of memory")]
    InvalidAddressRange {
        /// The offending range
        range: Range<usize>,
    },
    /// A subroutine call was made with every stack slot in use
    #[error("stack overflow: call at {pc:03x} with a full stack")]
    StackOverflow {
        /// Address of the offending call
        pc: u16,
    },
    /// A return was made with nothing on the stack
    #[error("stack underflow: return at {pc:03x} with an empty stack")]
    StackUnderflow {
        /// Address of the offending return
        pc: u16,
    },
    /// The program doesn't fit in program memory
    #[error("program is {len} bytes, but only {capacity} bytes are available")]
    ProgramTooLarge {
        /// Length of the rejected program
        len: usize,
        /// Size of program memory
        capacity: usize,
    },
    /// Tried to press or release a key that doesn't exist
    #[error("key {key:X} does not exist")]
    InvalidKey {
        /// The offending key
        key: usize,
    },
    /// Tried to get/set an out-of-bounds register
    #[error("tried to access register v{reg:X} which does not exist")]
    InvalidRegister {
        /// The offending register
        reg: usize,
    },
    /// Tried to convert string into mode, but it did not match.
    #[error("no suitable conversion of \"{mode}\" into Mode")]
    InvalidMode {
        /// The string which failed to become a mode
        mode: String,
    },
    /// Error originated in [std::io]
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    /// Error originated in [std::array::TryFromSliceError]
    #[error(transparent)]
    TryFromSliceError(#[from] std::array::TryFromSliceError),
}
