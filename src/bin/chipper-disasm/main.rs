// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Prints a Chip-8 ROM as a listing, one instruction word per line

use chipper::{error::Result, *};
use gumdrop::*;
use owo_colors::OwoColorize;
use std::{fs::read, path::PathBuf};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Show help text")]
    help: bool,
    #[options(help = "Load a ROM to disassemble", free, required)]
    pub file: PathBuf,
    #[options(help = "Load address (usually 200)", parse(try_from_str = "parse_hex"))]
    pub loadaddr: u16,
    #[options(help = "Start disassembling at offset...")]
    pub offset: usize,
}

/// Parses a hexadecimal string into a u16
fn parse_hex(value: &str) -> std::result::Result<u16, std::num::ParseIntError> {
    u16::from_str_radix(value.trim_start_matches("0x"), 16)
}

fn main() -> Result<()> {
    let options = Arguments::parse_args_default_or_exit();
    let contents = read(&options.file)?;
    let loadaddr = match options.loadaddr {
        0 => PROGRAM_START_ADDRESS,
        addr => addr,
    } as usize;
    let disassembler = Dis::default();
    let rom = contents.get(options.offset..).unwrap_or_default();
    for (index, pair) in rom.chunks_exact(2).enumerate() {
        let word = u16::from_be_bytes([pair[0], pair[1]]);
        println!(
            "{:03x}: {} {:04x}",
            loadaddr + options.offset + 2 * index,
            disassembler.once(word),
            word.bright_black(),
        );
    }
    Ok(())
}
