// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Decodes and runs instructions


pub mod behavior;
pub mod flags;
pub mod instruction;
pub mod mem;
pub mod random;
pub mod screen;
pub mod stack;

use self::{
    flags::Flags,
    instruction::{
        disassembler::{Dis, Disassembler},
        Instruction,
    },
    mem::{Mem, PROGRAM_START_ADDRESS},
    random::RandomSource,
    screen::Screen,
    stack::Stack,
};
use crate::error::{Error, Result};
use owo_colors::OwoColorize;
use rand::{rngs::StdRng, SeedableRng};
use std::fmt::Debug;

type Reg = usize;
type Adr = u16;
type Nib = u8;

/// Represents the internal state of the CPU interpreter
///
/// The CPU owns its [Mem] and [Screen] outright; nothing else can touch them
/// while it runs. It has no notion of time: the delay and sound timers only
/// count down when [CPU::tick_timers] is called.
#[derive(Clone)]
pub struct CPU<R = StdRng> {
    /// Flags that control how the CPU behaves, but which aren't inherent to the
    /// chip-8.
    pub flags: Flags,
    // memory
    mem: Mem,
    screen: Screen,
    stack: Stack,
    // registers
    pc: Adr,
    i: Adr,
    v: [u8; 16],
    delay: u8,
    sound: u8,
    // Execution data
    cycle: usize,
    rng: R,
    disassembler: Dis,
}

impl CPU<StdRng> {
    /// Constructs a new CPU, drawing random numbers from system entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Constructs a new CPU whose random numbers are reproducible from `seed`
    /// # Examples
    /// ```rust
    /// # use chipper::*;
    /// let cpu = CPU::seeded(0xc0ffee);
    /// assert_eq!(0x200, cpu.pc());
    /// ```
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for CPU<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

// public interface
impl<R: RandomSource> CPU<R> {
    /// Constructs a new CPU which takes its random numbers from `rng`
    /// # Examples
    /// ```rust
    /// # use chipper::*;
    /// use rand::rngs::mock::StepRng;
    /// let cpu = CPU::with_rng(StepRng::new(0, 1));
    /// assert_eq!(0, cpu.i());
    /// ```
    pub fn with_rng(rng: R) -> Self {
        CPU {
            flags: Flags::default(),
            mem: Mem::new(),
            screen: Screen::new(),
            stack: Stack::new(),
            pc: PROGRAM_START_ADDRESS,
            i: 0,
            v: [0; 16],
            delay: 0,
            sound: 0,
            cycle: 0,
            rng,
            disassembler: Dis::default(),
        }
    }

    /// Loads a program from a ROM file into the CPU's program space
    pub fn load_program(&mut self, rom: impl AsRef<std::path::Path>) -> Result<&mut Self> {
        self.load_program_bytes(&std::fs::read(rom)?)
    }

    /// Loads bytes into the CPU's program space
    ///
    /// Returns [Error::ProgramTooLarge] if the program is larger than `0x1000 - 0x200` bytes
    /// # Examples
    /// ```rust
    /// # use chipper::*;
    /// # fn main() -> Result<()> {
    /// let mut cpu = CPU::seeded(0);
    /// cpu.load_program_bytes(&[0x60, 0x2a])?;
    /// cpu.step()?;
    /// assert_eq!(0x2a, cpu.v()[0]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_program_bytes(&mut self, rom: &[u8]) -> Result<&mut Self> {
        self.mem.load_program(rom)?;
        Ok(self)
    }

    /// Sets a general purpose register in the CPU.
    /// If the register doesn't exist, returns [Error::InvalidRegister]
    /// # Examples
    /// ```rust
    /// # use chipper::*;
    /// // Create a new CPU, and set v4 to 0x41
    /// let mut cpu = CPU::seeded(0);
    /// cpu.set_v(0x4, 0x41).unwrap();
    /// assert!(cpu.set_v(0x10, 0x41).is_err());
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
    /// # Examples
    /// ```rust
    /// # use chipper::*;
    /// let mut cpu = CPU::seeded(0);
    /// cpu.set_v(0x0, 0x41).unwrap();
    /// assert_eq!(
    ///     cpu.v(),
    ///     [0x41, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]
    /// )
    /// ```
    pub fn v(&self) -> &[u8] {
        self.v.as_slice()
    }

    /// Gets the program counter
    pub fn pc(&self) -> Adr {
        self.pc
    }

    /// Gets the I register
    pub fn i(&self) -> Adr {
        self.i
    }

    /// Gets the value in the Delay Timer register
    pub fn delay(&self) -> u8 {
        self.delay
    }

    /// Gets the value in the Sound Timer register
    pub fn sound(&self) -> u8 {
        self.sound
    }

    /// Gets the number of instructions the CPU has executed
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    /// Gets the live return addresses on the call stack, oldest first
    pub fn stack(&self) -> &[Adr] {
        self.stack.as_slice()
    }

    /// Gets the CPU's memory
    pub fn mem(&self) -> &Mem {
        &self.mem
    }

    /// Gets the CPU's screen
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Counts both timers down by one, stopping at zero.
    ///
    /// The caller decides how often this happens (canonically, 60 times a second).
    /// # Examples
    /// ```rust
    /// # use chipper::*;
    /// # fn main() -> Result<()> {
    /// let mut cpu = CPU::seeded(0);
    /// cpu.execute_instruction(Instruction::new(0x6002))?; // mov #02, v0
    /// cpu.execute_instruction(Instruction::new(0xf015))?; // mov v0, DT
    /// cpu.tick_timers();
    /// cpu.tick_timers();
    /// cpu.tick_timers();
    /// assert_eq!(0, cpu.delay());
    /// # Ok(())
    /// # }
    /// ```
    pub fn tick_timers(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    /// Resets the emulator to its power-on state.
    ///
    /// Touches the stack, pc, registers, timers, screen, and cycle count.
    ///
    /// Does not touch [Flags] or memory.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.pc = PROGRAM_START_ADDRESS;
        self.i = 0;
        self.v = [0; 16];
        self.delay = 0;
        self.sound = 0;
        self.screen.clear();
        self.cycle = 0;
    }

    /// Fetches, decodes, and executes the instruction at `pc`
    ///
    /// Does nothing if [Flags::pause] is set.
    ///
    /// Returns [Error::UnimplementedInstruction] if the instruction at `pc` is unimplemented,
    /// or [Error::InvalidAddress] if `pc` points outside memory.
    /// # Examples
    /// ```rust
    /// # use chipper::*;
    /// let mut cpu = CPU::seeded(0);
    /// cpu.load_program_bytes(&[
    ///     0x00, 0xe0, // cls
    ///     0x12, 0x02, // jump 0x202 (pc)
    /// ]).unwrap();
    /// cpu.step()
    ///     .expect("0x00e0 (cls) should be a valid opcode.");
    /// assert_eq!(0x202, cpu.pc());
    /// assert_eq!(1, cpu.cycle());
    /// ```
    /// Returns [Error::UnimplementedInstruction] if the instruction is not implemented.
    /// ```rust
    /// # use chipper::*;
    /// let mut cpu = CPU::seeded(0);
    /// cpu.load_program_bytes(&[
    ///     0xff, 0xff, // invalid!
    ///     0x12, 0x02, // jump 0x202 (pc)
    /// ]).unwrap();
    /// cpu.step()
    ///     .expect_err("Should return Error::UnimplementedInstruction { 0xffff }");
    /// ```
    pub fn step(&mut self) -> Result<&mut Self> {
        // Do nothing if paused
        if self.flags.pause {
            return Ok(self);
        }
        // fetch opcode
        let instruction = Instruction::new(self.mem.get_word(self.pc as usize)?);

        // Print opcode disassembly:
        if self.flags.debug {
            std::println!(
                "{:3} {:03x}: {:<36}",
                self.cycle.bright_black(),
                self.pc,
                self.disassembler.once(instruction.word())
            );
        }

        self.cycle += 1;
        self.pc = self.pc.wrapping_add(2);
        self.execute_instruction(instruction)?;
        Ok(self)
    }

    /// Executes `steps` instructions, stopping at the first error
    /// # Examples
    /// ```rust
    /// # use chipper::*;
    /// let mut cpu = CPU::seeded(0);
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
            self.step()?;
        }
        Ok(self)
    }

    /// Executes a single [Instruction] against the current state, without fetching it.
    ///
    /// The program counter is *not* advanced first; [CPU::step] does that.
    /// # Examples
    /// ```rust
    /// # use chipper::*;
    /// # fn main() -> Result<()> {
    /// let mut cpu = CPU::seeded(0);
    /// cpu.execute_instruction(Instruction::new(0x65ee))?;
    /// cpu.execute_instruction(Instruction::new(0x7501))?;
    /// assert_eq!(0xef, cpu.v()[5]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn execute_instruction(&mut self, instruction: Instruction) -> Result<()> {
        self.execute(instruction.decode()?)
    }

    /// Dumps the current state of all CPU registers, and the cycle count
    /// # Examples
    /// ```rust
    /// # use chipper::*;
    /// let mut cpu = CPU::seeded(0);
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
        std::println!("{}", self.dump_string());
    }

    fn dump_string(&self) -> String {
        format!(
            "PC: {:04x}, SP: {:04x}, I: {:04x}\n{}DLY: {}, SND: {}, CYC: {:6}",
            self.pc,
            self.stack.len(),
            self.i,
            self.v
                .into_iter()
                .enumerate()
                .map(|(i, gpr)| {
                    format!(
                        "v{i:X}: {gpr:02x}{}",
                        match i % 4 {
                            3 => "\n",
                            _ => " ",
                        }
                    )
                })
                .collect::<String>(),
            self.delay,
            self.sound,
            self.cycle,
        )
    }
}

impl<R> Debug for CPU<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CPU")
            .field("flags", &self.flags)
            .field("stack", &self.stack)
            .field("pc", &self.pc)
            .field("i", &self.i)
            .field("v", &self.v)
            .field("delay", &self.delay)
            .field("sound", &self.sound)
            .field("cycle", &self.cycle)
            .field("screen", &self.screen)
            .finish_non_exhaustive()
    }
}

/// Compares architectural state. The random source is not compared.
impl<R> PartialEq for CPU<R> {
    fn eq(&self, other: &Self) -> bool {
        self.flags == other.flags
            && self.mem == other.mem
            && self.screen == other.screen
            && self.stack == other.stack
            && self.pc == other.pc
            && self.i == other.i
            && self.v == other.v
            && self.delay == other.delay
            && self.sound == other.sound
            && self.cycle == other.cycle
    }
}
