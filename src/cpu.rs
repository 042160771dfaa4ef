// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Decodes and runs instructions


pub mod behavior;
pub mod flags;
pub mod instruction;
pub mod mode;
pub mod quirks;

use self::{
    flags::Flags,
    instruction::{
        disassembler::{Dis, Disassembler},
        Insn,
    },
    mode::Mode,
    quirks::Quirks,
};
use crate::{
    error::{Error, Result},
    io::{Audio, Input},
    mem::{Mem, Region::*, PROGRAM_ADDR},
    screen::Screen,
    traits::FallibleAutoCast,
};
use log::{debug, error, info, trace};
use owo_colors::OwoColorize;
use std::fmt::Debug;

type Reg = usize;
type Adr = u16;
type Nib = u8;

/// Maximum number of return addresses on the stack
pub const STACK_SIZE: usize = 16;

/// Whether the CPU is executing instructions, or blocked on `Fx0A`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum State {
    /// Fetching and executing instructions
    #[default]
    Running,
    /// Waiting for a key to be pressed and released, after `Fx0A`
    AwaitingKeyRelease {
        /// The register which receives the key
        x: Reg,
        /// Every key seen held since the wait began
        held: u16,
        /// The key whose release ended the wait, once it's been seen
        released: Option<u8>,
    },
}

impl State {
    /// Returns true while blocked on `Fx0A`
    pub fn is_waiting(&self) -> bool {
        matches!(self, State::AwaitingKeyRelease { .. })
    }
}

/// Represents the internal state of the CPU interpreter
#[derive(Clone, PartialEq)]
pub struct CPU {
    /// Flags that control how the CPU behaves, but which aren't inherent to the
    /// chip-8. Includes [Quirks], target IPF, etc.
    pub flags: Flags,
    // memory
    mem: Mem,
    screen: Screen,
    stack: Vec<Adr>,
    // registers
    pc: Adr,
    i: Adr,
    v: [u8; 16],
    delay: u8,
    sound: u8,
    // I/O
    keys: u16,
    // Execution data
    state: State,
    cycle: usize,
    disassembler: Dis,
}

// public interface
impl CPU {
    /// Constructs a new CPU with the provided [Flags], and no program loaded
    /// # Examples
    /// ```rust
    /// # use c8core::prelude::*;
    /// let cpu = CPU::new(Flags::with_mode(Mode::SChip));
    /// assert!(cpu.flags.quirks.bxnn);
    /// assert_eq!(0x200, cpu.pc());
    /// ```
    pub fn new(flags: Flags) -> Self {
        CPU {
            flags,
            ..Default::default()
        }
    }

    /// Loads a program into the CPU's program space
    pub fn load_program(&mut self, rom: impl AsRef<std::path::Path>) -> Result<&mut Self> {
        let rom = rom.as_ref();
        info!("loading {}", rom.display());
        self.load_program_bytes(&std::fs::read(rom)?)
    }

    /// Loads bytes into the CPU's program space.
    ///
    /// Returns [Error::ProgramTooLarge] if the program doesn't fit,
    /// leaving the current program in place
    /// # Examples
    /// ```rust
    /// # use c8core::prelude::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[0x00, 0xe0]).unwrap();
    /// // Programs can be at most 0xe00 bytes long
    /// cpu.load_program_bytes(&[0; 0xe01]).unwrap_err();
    /// ```
    pub fn load_program_bytes(&mut self, rom: &[u8]) -> Result<&mut Self> {
        let capacity = Program.range().len();
        if rom.len() > capacity {
            return Err(Error::ProgramTooLarge { len: rom.len(), capacity });
        }
        self.mem.clear_region(Program).load_region(Program, rom)?;
        info!("loaded {} byte program", rom.len());
        Ok(self)
    }

    /// Replaces the set of held keys with `keys`, where bit `n` is key `n`.
    ///
    /// The host should call this once per frame.
    pub fn set_keys(&mut self, keys: u16) -> &mut Self {
        self.keys = keys;
        self.observe_keys();
        self
    }

    /// Presses a key, and reports whether the key's state changed.
    /// If key does not exist, returns [Error::InvalidKey].
    ///
    /// # Examples
    /// ```rust
    /// # use c8core::prelude::*;
    /// let mut cpu = CPU::default();
    ///
    /// // press key `7`
    /// let did_press = cpu.press(0x7).unwrap();
    /// assert!(did_press);
    ///
    /// // press key `7` again, even though it's already pressed
    /// let did_press = cpu.press(0x7).unwrap();
    /// // it was already pressed, so nothing's changed.
    /// assert!(!did_press);
    /// ```
    pub fn press(&mut self, key: usize) -> Result<bool> {
        let mask = Self::key_mask(key)?;
        if self.keys & mask != 0 {
            return Ok(false);
        }
        self.set_keys(self.keys | mask);
        Ok(true)
    }

    /// Releases a key, and reports whether the key's state changed.
    /// If key is outside range `0..=0xF`, returns [Error::InvalidKey].
    ///
    /// # Examples
    /// ```rust
    /// # use c8core::prelude::*;
    /// let mut cpu = CPU::default();
    /// // press key `7`
    /// cpu.press(0x7).unwrap();
    /// // release key `7`
    /// let changed = cpu.release(0x7).unwrap();
    /// assert!(changed); // key released
    /// // try releasing `7` again
    /// let changed = cpu.release(0x7).unwrap();
    /// assert!(!changed); // key was not held
    /// ```
    pub fn release(&mut self, key: usize) -> Result<bool> {
        let mask = Self::key_mask(key)?;
        if self.keys & mask == 0 {
            return Ok(false);
        }
        self.set_keys(self.keys & !mask);
        Ok(true)
    }

    /// Sets a general purpose register in the CPU.
    /// If the register doesn't exist, returns [Error::InvalidRegister]
    /// # Examples
    /// ```rust
    /// # use c8core::prelude::*;
    /// // Create a new CPU, and set v4 to 0x41
    /// let mut cpu = CPU::default();
    /// cpu.set_v(0x4, 0x41).unwrap();
    /// assert_eq!(0x41, cpu.v()[4]);
    /// ```
    pub fn set_v(&mut self, reg: Reg, value: u8) -> Result<()> {
        if let Some(gpr) = self.v.get_mut(reg) {
            *gpr = value;
            Ok(())
        } else {
            Err(Error::InvalidRegister { reg })
        }
    }

    /// Gets a slice of the entire general purpose registers
    pub fn v(&self) -> &[u8] {
        self.v.as_slice()
    }

    /// Gets the program counter
    /// # Examples
    /// ```rust
    /// # use c8core::prelude::*;
    /// let mut cpu = CPU::default();
    /// assert_eq!(0x200, cpu.pc());
    /// ```
    pub fn pc(&self) -> Adr {
        self.pc
    }

    /// Gets the I register
    pub fn i(&self) -> Adr {
        self.i
    }

    /// Gets the value in the Sound Timer register
    pub fn sound(&self) -> u8 {
        self.sound
    }

    /// Gets the value in the Delay Timer register
    pub fn delay(&self) -> u8 {
        self.delay
    }

    /// Gets the held keys, as a bitmask
    pub fn keys(&self) -> u16 {
        self.keys
    }

    /// Gets the return addresses on the stack, oldest first
    pub fn stack(&self) -> &[Adr] {
        self.stack.as_slice()
    }

    /// Gets the execution [State]
    pub fn state(&self) -> State {
        self.state
    }

    /// Gets the screen, for rendering
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Gets the CPU's memory
    pub fn mem(&self) -> &Mem {
        &self.mem
    }

    /// Gets the number of cycles the CPU has executed
    ///
    /// Cycles spent waiting for a key are counted
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    /// Resets the emulator.
    ///
    /// Touches the stack, pc, registers, timers, keys, screen, [State], and cycle count.
    ///
    /// Does not touch [Flags] or memory.
    pub fn reset(&mut self) {
        // clear the stack
        self.stack.truncate(0);
        // Reset the program counter
        self.pc = PROGRAM_ADDR;
        // Zero the registers
        self.i = 0;
        self.v = [0; 16];
        self.delay = 0;
        self.sound = 0;
        // I/O
        self.keys = 0;
        self.screen.clear();
        // Execution data
        self.state = State::Running;
        self.cycle = 0;
        info!("reset");
    }

    /// Executes `steps` instructions, stopping at the first error
    /// # Examples
    /// ```rust
    /// # use c8core::prelude::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[
    ///     0x00, 0xe0, // cls
    ///     0x12, 0x02, // jump 0x202 (pc)
    /// ]).unwrap();
    /// cpu.multistep(0x20)
    ///     .expect("The program should only have valid opcodes.");
    /// assert_eq!(0x202, cpu.pc());
    /// assert_eq!(0x20, cpu.cycle());
    /// ```
    pub fn multistep(&mut self, steps: usize) -> Result<&mut Self> {
        for _ in 0..steps {
            self.tick()?;
        }
        Ok(self)
    }

    /// Runs one frame: reads the held keys once, executes [Flags::ipf] instructions,
    /// then ticks the timers once.
    /// # Examples
    /// ```rust
    /// # use c8core::prelude::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[
    ///     0x60, 0x03, // mov #03, v0
    ///     0xf0, 0x15, // mov v0, DT
    ///     0x12, 0x04, // jump 0x204 (pc)
    /// ]).unwrap();
    /// cpu.frame(&mut 0u16, &mut Silent).unwrap();
    /// assert_eq!(2, cpu.delay());
    /// ```
    pub fn frame(&mut self, input: &mut impl Input, audio: &mut impl Audio) -> Result<&mut Self> {
        self.set_keys(input.keys());
        self.multistep(self.flags.ipf)?;
        self.tick_timers(audio);
        Ok(self)
    }

    /// Ticks the delay and sound timers once. Call this once per frame.
    ///
    /// Beeps once if the sound timer was running.
    /// # Examples
    /// ```rust
    /// # use c8core::prelude::*;
    /// let mut cpu = CPU::default();
    /// let mut beeps = 0usize;
    /// cpu.tick_timers(&mut beeps);
    /// assert_eq!((0, 0, 0), (cpu.delay(), cpu.sound(), beeps));
    /// ```
    pub fn tick_timers(&mut self, audio: &mut impl Audio) -> &mut Self {
        if self.flags.pause {
            return self;
        }
        self.delay = self.delay.saturating_sub(1);
        if self.sound > 0 {
            trace!("beep ({} frames left)", self.sound);
            audio.beep();
            self.sound -= 1;
        }
        self
    }

    /// Executes a single instruction
    ///
    /// While waiting on `Fx0A`, this checks for the key instead, and doesn't fetch.
    ///
    /// Unrecognized instructions are skipped.
    ///
    /// Returns [Error::InvalidAddressRange] if the pc has run off the end of memory,
    /// and [Error::StackOverflow]/[Error::StackUnderflow] for bad calls and returns.
    /// # Examples
    /// ```rust
    /// # use c8core::prelude::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[
    ///     0x00, 0xe0, // cls
    ///     0x22, 0x02, // call 0x202 (pc)
    /// ]).unwrap();
    /// cpu.tick()
    ///     .expect("0x00e0 (cls) should be a valid opcode.");
    /// assert_eq!(0x202, cpu.pc());
    /// assert_eq!(1, cpu.cycle());
    /// ```
    /// Returns [Error::InvalidAddressRange] if the program runs off the end of memory.
    /// ```rust
    /// # use c8core::prelude::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[0x1f, 0xff]).unwrap(); // jump 0xfff
    /// cpu.tick().unwrap();
    /// cpu.tick().expect_err("0xfff..0x1001 is outside of memory");
    /// ```
    pub fn tick(&mut self) -> Result<&mut Self> {
        // Do nothing if paused
        if self.flags.pause {
            return Ok(self);
        }
        self.cycle += 1;
        match self.state {
            State::Running => {}
            State::AwaitingKeyRelease {
                x,
                released: Some(key),
                ..
            } => {
                debug!("key {key:X} released, stored in v{x:X}");
                self.v[x] = key;
                self.state = State::Running;
                return Ok(self);
            }
            State::AwaitingKeyRelease { .. } => return Ok(self),
        }

        // fetch opcode
        let pc = self.pc;
        let word: u16 = self.mem.read_fallible(pc).map_err(|e| {
            error!("pc ran off the end of memory at {pc:03x}");
            e
        })?;
        self.pc = pc.wrapping_add(2);

        // Print opcode disassembly:
        if self.flags.debug {
            std::println!(
                "{:3} {:03x}: {:<36}",
                self.cycle.bright_black(),
                pc,
                self.disassembler.once(word)
            );
        }

        // decode opcode
        match Insn::word(word) {
            Some(insn) => self.execute(insn)?,
            None => debug!("{pc:03x}: skipping unrecognized word {word:04x}"),
        }
        Ok(self)
    }

    /// Dumps the current state of all CPU registers, and the cycle count
    /// # Examples
    /// ```rust
    /// # use c8core::prelude::*;
    /// let mut cpu = CPU::default();
    /// cpu.dump();
    /// ```
    /// outputs
    /// ```text
    /// PC: 0200, SP: 0000, I: 0000
    /// v0: 00 v1: 00 v2: 00 v3: 00
    /// v4: 00 v5: 00 v6: 00 v7: 00
    /// v8: 00 v9: 00 vA: 00 vB: 00
    /// vC: 00 vD: 00 vE: 00 vF: 00
    /// DLY: 0, SND: 0, CYC:      0
    /// ```
    pub fn dump(&self) {
        std::println!(
            "PC: {:04x}, SP: {:04x}, I: {:04x}\n{}DLY: {}, SND: {}, CYC: {:6}",
            self.pc,
            self.stack.len(),
            self.i,
            self.v
                .into_iter()
                .enumerate()
                .map(|(i, gpr)| {
                    format!(
                        "v{i:X}: {gpr:02x} {}",
                        match i % 4 {
                            3 => "\n",
                            _ => "",
                        }
                    )
                })
                .collect::<String>(),
            self.delay,
            self.sound,
            self.cycle,
        );
    }
}

// private helpers
impl CPU {
    fn key_mask(key: usize) -> Result<u16> {
        match key {
            0..=0xf => Ok(1 << key),
            _ => Err(Error::InvalidKey { key }),
        }
    }

    /// Tracks held keys while waiting on `Fx0A`, and latches the first release
    fn observe_keys(&mut self) {
        let now = self.keys;
        if let State::AwaitingKeyRelease { held, released, .. } = &mut self.state {
            if released.is_some() {
                return;
            }
            let up = *held & !now;
            if up != 0 {
                *released = Some(up.trailing_zeros() as u8);
            } else {
                *held |= now;
            }
        }
    }
}

impl Debug for CPU {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CPU")
            .field("flags", &self.flags)
            .field("stack", &self.stack)
            .field("pc", &self.pc)
            .field("i", &self.i)
            .field("v", &self.v)
            .field("delay", &self.delay)
            .field("sound", &self.sound)
            .field("keys", &format_args!("{:016b}", self.keys))
            .field("state", &self.state)
            .field("cycle", &self.cycle)
            .finish_non_exhaustive()
    }
}

impl Default for CPU {
    /// Constructs a new CPU with sane defaults
    ///
    /// | value  | default | description
    /// |--------|---------|------------
    /// | font   |`0x0050` | Location of font memory.
    /// | pc     |`0x0200` | Start location.
    ///
    /// # Examples
    /// ```rust
    /// use c8core::prelude::*;
    /// let mut cpu = CPU::default();
    /// ```
    fn default() -> Self {
        CPU {
            flags: Flags::default(),
            mem: Mem::new(),
            screen: Screen::new(),
            stack: Vec::with_capacity(STACK_SIZE),
            pc: PROGRAM_ADDR,
            i: 0,
            v: [0; 16],
            delay: 0,
            sound: 0,
            keys: 0,
            state: State::Running,
            cycle: 0,
            disassembler: Dis::default(),
        }
    }
}
