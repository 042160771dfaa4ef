// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE.txt for details)

//! This crate implements the core of a Chip-8 interpreter: memory, registers,
//! timers, the 64x32 display, and the fetch-decode-execute loop that ties them together.
//!
//! Everything the interpreter needs to run lives in one [CPU](cpu::CPU) value.
//! Loading ROMs from disk, drawing to a real window, and reading a real keyboard
//! are left to the caller, who talks to the core through [io::Input] and [io::Audio].
//!
//! ```rust
//! # use c8core::prelude::*;
//! # fn main() -> Result<()> {
//! let mut cpu = CPU::default();
//! cpu.load_program_bytes(&[
//!     0x60, 0x05, // mov #05, v0
//!     0xf0, 0x29, // font v0, I
//!     0xd1, 0x15, // draw #5, v1, v1
//! ])?;
//! cpu.multistep(3)?;
//! assert!(cpu.screen().pixel(0, 0));
//! # Ok(())
//! # }
//! ```

pub mod cpu;
pub mod error;
pub mod io;
pub mod mem;
pub mod screen;
pub mod traits;

/// Common imports for c8core
pub mod prelude {
    use super::*;
    pub use cpu::{
        flags::Flags,
        instruction::{
            disassembler::{Dis, Disassembler},
            Insn,
        },
        mode::Mode,
        quirks::Quirks,
        State, CPU,
    };
    pub use error::{Error, Result};
    pub use io::{Audio, Bell, Input, Silent};
    pub use mem::{Mem, Region::*};
    pub use screen::Screen;
    pub use traits::{FallibleAutoCast, Grab};
}
