// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! This crate implements a Chip-8 interpreter.
//!
//! The [CPU] owns the whole machine: 4 KiB of [Mem], a 64x32 [Screen], the
//! registers, and a sixteen-deep [Stack]. [Chip8] wraps it with a run loop,
//! either for a fixed number of instructions or paced against the clock.
//!
//! Drawing the screen to anything other than a [String] is left to you.

pub mod cpu;
pub mod error;
pub mod run;

pub use cpu::{
    flags::Flags,
    instruction::{
        disassembler::{Dis, Disassembler},
        Insn, Instruction,
    },
    mem::{Mem, Region, FONT, FONT_START_ADDRESS, MEMORY_SIZE, PROGRAM_START_ADDRESS},
    random::RandomSource,
    screen::Screen,
    stack::{Stack, STACK_DEPTH},
    CPU,
};
pub use error::Result;
pub use run::{Chip8, Frontend, Pacing};
