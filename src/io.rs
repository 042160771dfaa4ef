// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Capabilities the interpreter core borrows from its host.
//!
//! The host reads its keyboard however it likes, and hands the core a 16-bit
//! held-key mask once per frame through [Input]. The core hands beeps back out through [Audio].

use std::io::Write;

/// Supplies the set of held keys, once per frame
pub trait Input {
    /// Returns a bitmask of the held keys: bit `n` is set while key `n` is held
    fn keys(&mut self) -> u16;
}

/// A fixed key mask, for hosts without a keyboard (and for tests)
impl Input for u16 {
    fn keys(&mut self) -> u16 {
        *self
    }
}

/// Receives a beep once per timer tick while the sound timer is running
pub trait Audio {
    /// Makes some noise. Fire and forget.
    fn beep(&mut self);
}

/// Discards every beep
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Silent;

impl Audio for Silent {
    fn beep(&mut self) {}
}

/// Rings the terminal bell on stdout
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bell;

impl Audio for Bell {
    fn beep(&mut self) {
        let mut out = std::io::stdout();
        // write errors are dropped
        out.write_all(b"\x07").and_then(|_| out.flush()).ok();
    }
}

/// Counts beeps instead of making them
impl Audio for usize {
    fn beep(&mut self) {
        *self += 1;
    }
}
