// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! c8-run: Runs a Chip-8 program in the terminal for a fixed number of frames,
//! then prints what's on the screen.

use c8core::{error::Result, prelude::*};
use gumdrop::*;
use log::info;
use owo_colors::OwoColorize;
use std::{
    path::PathBuf,
    thread::sleep,
    time::{Duration, Instant},
};

#[derive(Clone, Debug, PartialEq, Eq, Options, Hash)]
struct Arguments {
    #[options(help = "Load a ROM to run.", required, free)]
    pub file: PathBuf,
    #[options(help = "Print this help message.")]
    help: bool,
    #[options(help = "Print each instruction as it runs.")]
    pub debug: bool,

    #[options(help = "Run in (Chip8, Vip, SChip) mode.")]
    pub mode: Option<Mode>,
    #[options(short = "v", help = "Toggle shifting vY into vX.")]
    pub shift: bool,
    #[options(short = "b", help = "Toggle SUPER-CHIP style indexed jump, relative to v[adr].")]
    pub jumping: bool,
    #[options(short = "c", help = "Toggle COSMAC style DMA instructions, which advance I.")]
    pub memory: bool,

    #[options(help = "Set the instructions-per-frame rate.", meta = "IPF")]
    pub ipf: Option<usize>,
    #[options(help = "Set the target framerate.", default = "60", meta = "FR")]
    pub frame_rate: u64,
    #[options(short = "n", help = "Stop after this many frames.", default = "600", meta = "N")]
    pub frames: usize,
    #[options(
        help = "Hold these keys, as a hexadecimal bitmask",
        parse(try_from_str = "parse_hex"),
        meta = "MASK"
    )]
    pub keys: u16,
}

/// Parses a hexadecimal string into a u16
fn parse_hex(value: &str) -> std::result::Result<u16, std::num::ParseIntError> {
    u16::from_str_radix(value, 16)
}

impl Arguments {
    fn flags(&self) -> Flags {
        let mut flags = Flags::with_mode(self.mode.unwrap_or_default());
        flags.debug = self.debug;
        flags.frame_rate = self.frame_rate;
        if let Some(ipf) = self.ipf {
            flags.ipf = ipf;
        }
        flags.quirks.shift_uses_vy ^= self.shift;
        flags.quirks.bxnn ^= self.jumping;
        flags.quirks.increment_index ^= self.memory;
        flags
    }
}

pub fn main() {
    env_logger::init();
    let options = Arguments::parse_args_default_or_exit();
    if let Err(e) = run(&options) {
        eprintln!("{}", e.bold().red());
        std::process::exit(1);
    }
}

fn run(options: &Arguments) -> Result<()> {
    let mut cpu = CPU::new(options.flags());
    cpu.load_program(&options.file)?;
    info!("running {} frames with {:?}", options.frames, cpu.flags);

    let frame_time = match cpu.flags.frame_rate {
        0 => Duration::ZERO,
        rate => Duration::from_nanos(1_000_000_000 / rate),
    };
    let (mut keys, mut audio) = (options.keys, Bell);
    for _ in 0..options.frames {
        let start = Instant::now();
        cpu.frame(&mut keys, &mut audio)?;
        if let Some(rest) = frame_time.checked_sub(start.elapsed()) {
            sleep(rest);
        }
    }

    cpu.screen().print_screen();
    if cpu.flags.debug {
        cpu.dump();
    }
    Ok(())
}
