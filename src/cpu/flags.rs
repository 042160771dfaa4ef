// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Represents flags that aid in implementation but aren't a part of the Chip-8 itself

use super::{Mode, Quirks};

/// Run configuration, set up once before the run starts
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Flags {
    /// Set when debug (live disassembly) mode enabled
    pub debug: bool,
    /// Set when the emulator is paused by the user and should not update
    pub pause: bool,
    /// Represents the set of emulator [Quirks] to enable
    pub quirks: Quirks,
    /// Instructions executed per frame by [CPU::frame](super::CPU::frame)
    pub ipf: usize,
    /// Target frames per second. The core never sleeps; this is for the host's loop.
    pub frame_rate: u64,
}

impl Flags {
    /// Constructs [Flags] with the [Quirks] preset for `mode`
    /// # Examples
    /// ```rust
    /// # use c8core::prelude::*;
    /// let flags = Flags::with_mode(Mode::Vip);
    /// assert!(flags.quirks.increment_index);
    /// assert_eq!(10, flags.ipf);
    /// ```
    pub fn with_mode(mode: Mode) -> Self {
        Flags {
            quirks: mode.into(),
            ..Default::default()
        }
    }

    /// Toggles debug mode
    ///
    /// # Examples
    /// ```rust
    /// # use c8core::prelude::*;
    /// let mut cpu = CPU::default();
    /// assert_eq!(false, cpu.flags.debug);
    /// // Toggle debug mode
    /// cpu.flags.debug();
    /// assert_eq!(true, cpu.flags.debug);
    /// ```
    pub fn debug(&mut self) {
        self.debug = !self.debug
    }

    /// Toggles pause
    ///
    /// # Examples
    /// ```rust
    /// # use c8core::prelude::*;
    /// let mut cpu = CPU::default();
    /// assert_eq!(false, cpu.flags.pause);
    /// // Pause the cpu
    /// cpu.flags.pause();
    /// assert_eq!(true, cpu.flags.pause);
    /// ```
    pub fn pause(&mut self) {
        self.pause = !self.pause
    }
}

impl Default for Flags {
    fn default() -> Self {
        Flags {
            debug: false,
            pause: false,
            quirks: Quirks::default(),
            ipf: 10,
            frame_rate: 60,
        }
    }
}
