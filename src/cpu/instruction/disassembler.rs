// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! A disassembler for Chip-8 opcodes
use super::Insn;
use owo_colors::{OwoColorize, Style};

/// Disassembles Chip-8 instructions
pub trait Disassembler {
    /// Disassemble a single instruction
    fn once(&self, insn: u16) -> String;
}

/// Disassembles Chip-8 instructions, printing them in the provided [owo_colors::Style]s
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dis {
    /// Styles invalid instructions
    pub invalid: Style,
    /// Styles valid instruction
    pub normal: Style,
}

impl Default for Dis {
    fn default() -> Self {
        Self {
            invalid: Style::new().bold().red(),
            normal: Style::new().green(),
        }
    }
}

impl Disassembler for Dis {
    /// # Examples
    /// ```rust
    /// # use c8core::prelude::*;
    /// let dis = Dis::default();
    /// assert!(dis.once(0xd125).contains("draw   #5, v1, v2"));
    /// assert!(dis.once(0xffff).contains("inval  ffff"));
    /// ```
    fn once(&self, insn: u16) -> String {
        match Insn::word(insn) {
            Some(insn) => format!("{}", insn.style(self.normal)),
            None => format!("{}", format_args!("inval  {insn:04x}").style(self.invalid)),
        }
    }
}
