// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! c8-disasm: Prints the disassembly of a Chip-8 program, one word per line

use c8core::{error::Result, mem::PROGRAM_ADDR, prelude::*};
use gumdrop::*;
use log::debug;
use owo_colors::OwoColorize;
use std::{fs::read, path::PathBuf};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Show help text")]
    help: bool,
    #[options(help = "Load a ROM to disassemble", free, required)]
    pub file: PathBuf,
    #[options(help = "Load address (usually 200)", parse(try_from_str = "parse_hex"))]
    pub loadaddr: Option<u16>,
    #[options(help = "Start disassembling at offset...")]
    pub offset: usize,
}

fn parse_hex(value: &str) -> std::result::Result<u16, std::num::ParseIntError> {
    u16::from_str_radix(value, 16)
}

fn main() {
    env_logger::init();
    let options = Arguments::parse_args_default_or_exit();
    if let Err(e) = run(&options) {
        eprintln!("{}", e.bold().red());
        std::process::exit(1);
    }
}

fn run(options: &Arguments) -> Result<()> {
    let contents = read(&options.file)?;
    let loadaddr = options.loadaddr.unwrap_or(PROGRAM_ADDR) as usize;
    let body = contents.get(options.offset..).unwrap_or_default();
    debug!("disassembling {} bytes from {}", body.len(), options.file.display());
    let disassembler = Dis::default();
    for (addr, insn) in body.chunks(2).enumerate() {
        let insn = match *insn {
            [hi, lo] => u16::from_be_bytes([hi, lo]),
            // odd trailing byte
            [hi] => u16::from(hi) << 8,
            _ => continue,
        };
        println!(
            "{:03x}: {} {:04x}",
            2 * addr + loadaddr + options.offset,
            disassembler.once(insn),
            insn.bright_black(),
        );
    }
    Ok(())
}
