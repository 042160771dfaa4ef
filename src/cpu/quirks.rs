// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Controls the [Quirks] behavior of the CPU on a granular level.

/// Controls the quirk behavior of the CPU on a granular level.
///
/// Every quirk is off by default. Programs written for a particular historical
/// interpreter may need some of them on; see [Mode](super::mode::Mode) for presets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quirks {
    /// COSMAC VIP: Shift ops in `8xy`(`6`, `E`) copy vY into vX, then shift vX
    pub shift_uses_vy: bool,
    /// Super Chip: Indexed jump `Bxnn` goes to `xnn` + v`x`, instead of `xnn` + v0
    pub bxnn: bool,
    /// COSMAC VIP: DMA instructions `Fx55`/`Fx65` leave I at I + x + 1
    pub increment_index: bool,
}

impl From<bool> for Quirks {
    /// Sets every quirk to `value`
    fn from(value: bool) -> Self {
        Quirks {
            shift_uses_vy: value,
            bxnn: value,
            increment_index: value,
        }
    }
}
