// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Named [Quirks] presets for the [super::CPU]

use super::quirks::Quirks;
use crate::error::Error;
use std::str::FromStr;

/// Selects a set of [Quirks] matching a historical interpreter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// No quirks at all
    #[default]
    Chip8,
    /// COSMAC VIP: shifts source vY, DMA advances I
    Vip,
    /// Super Chip: indexed jumps use vX
    SChip,
}

impl From<Mode> for Quirks {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Chip8 => Quirks::default(),
            Mode::Vip => Quirks {
                shift_uses_vy: true,
                increment_index: true,
                ..Default::default()
            },
            Mode::SChip => Quirks {
                bxnn: true,
                ..Default::default()
            },
        }
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chip8" | "chip-8" => Ok(Mode::Chip8),
            "vip" | "cosmac" => Ok(Mode::Vip),
            "schip" | "superchip" => Ok(Mode::SChip),
            _ => Err(Error::InvalidMode {
                mode: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str() {
        assert_eq!(Mode::Chip8, "CHIP-8".parse().unwrap());
        assert_eq!(Mode::Vip, "cosmac".parse().unwrap());
        assert_eq!(Mode::SChip, "SuperChip".parse().unwrap());
        "xo-chip"
            .parse::<Mode>()
            .expect_err("xo-chip is not a supported mode");
    }

    #[test]
    fn presets() {
        assert_eq!(Quirks::from(Mode::Chip8), Quirks::from(false));
        let vip = Quirks::from(Mode::Vip);
        assert!(vip.shift_uses_vy && vip.increment_index && !vip.bxnn);
        let schip = Quirks::from(Mode::SChip);
        assert!(!schip.shift_uses_vy && !schip.increment_index && schip.bxnn);
    }
}
