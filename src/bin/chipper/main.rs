// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Chipper: runs a Chip-8 ROM headless, and reports what it left behind

use chipper::{error::Result, *};
use gumdrop::*;
use owo_colors::OwoColorize;
use std::{ops::ControlFlow, path::PathBuf};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Load a ROM to run on Chipper.", required, free)]
    pub file: PathBuf,
    #[options(help = "Print this help message.")]
    help: bool,
    #[options(help = "Print each instruction as it executes.")]
    pub debug: bool,
    #[options(help = "Execute exactly this many instructions, then stop.")]
    pub cycles: Option<usize>,
    #[options(help = "Set the instructions-per-frame rate.")]
    pub speed: Option<usize>,
    #[options(help = "Set the frame rate. 0 runs as fast as possible.", default = "60")]
    pub frame_rate: u64,
    #[options(short = "n", help = "Stop after this many frames.")]
    pub frames: Option<usize>,
    #[options(short = "r", help = "Seed the random number generator.")]
    pub seed: Option<u64>,
    #[options(no_short, help = "Print the screen on exit.")]
    pub screen: bool,
}

fn main() -> Result<()> {
    let options = Arguments::parse_args_default_or_exit();

    let mut cpu = match options.seed {
        Some(seed) => CPU::seeded(seed),
        None => CPU::new(),
    };
    cpu.flags.debug = options.debug;
    cpu.load_program(&options.file)?;

    let mut pacing = Pacing {
        frame_rate: options.frame_rate,
        ..Default::default()
    };
    if let Some(speed) = options.speed {
        pacing.instructions_per_frame = speed;
    }
    let mut ch8 = Chip8::new(cpu, pacing);

    let result = match (options.cycles, options.frames) {
        (Some(cycles), _) => ch8.run_fixed(cycles).map(drop),
        (None, frames) => {
            let mut shown = 0;
            ch8.run(&mut |_: &Screen| {
                shown += 1;
                match frames {
                    Some(frames) if shown >= frames => ControlFlow::Break(()),
                    _ => ControlFlow::Continue(()),
                }
            })
            .map(drop)
        }
    };

    if let Err(e) = &result {
        eprintln!("{}", e.bold().red());
    }
    ch8.cpu.dump();
    if options.screen {
        print!("{}", ch8.cpu.screen());
    }
    result
}
