// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Drives a [CPU], either for a fixed number of instructions or paced in real time
//!
//! The CPU knows nothing about time. Everything here decides *when* it runs.

use crate::{
    cpu::{random::RandomSource, screen::Screen, CPU},
    error::Result,
};
use rand::rngs::StdRng;
use std::{
    ops::ControlFlow,
    time::{Duration, Instant},
};

/// Controls how fast [Chip8::run] goes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pacing {
    /// Instructions executed between screen refreshes and timer ticks
    pub instructions_per_frame: usize,
    /// Frames per second. Zero means "as fast as possible".
    pub frame_rate: u64,
}

impl Default for Pacing {
    /// Ten instructions per frame, sixty frames a second
    fn default() -> Self {
        Pacing {
            instructions_per_frame: 10,
            frame_rate: 60,
        }
    }
}

impl Pacing {
    /// How long a single frame should take
    /// # Examples
    /// ```rust
    /// # use chipper::*;
    /// # use std::time::Duration;
    /// let pacing = Pacing { instructions_per_frame: 10, frame_rate: 50 };
    /// assert_eq!(Duration::from_millis(20), pacing.frame_time());
    /// ```
    pub fn frame_time(&self) -> Duration {
        match self.frame_rate {
            0 => Duration::ZERO,
            rate => Duration::from_secs(1) / rate.min(u32::MAX as u64) as u32,
        }
    }
}

/// Something that wants to see the screen once a frame
///
/// Returning [ControlFlow::Break] stops [Chip8::run].
pub trait Frontend {
    /// Called after every frame, with the current screen contents
    fn refresh(&mut self, screen: &Screen) -> ControlFlow<()>;
}

impl<F: FnMut(&Screen) -> ControlFlow<()>> Frontend for F {
    fn refresh(&mut self, screen: &Screen) -> ControlFlow<()> {
        self(screen)
    }
}

/// A [CPU], and the policy for running it
#[derive(Clone, Debug)]
pub struct Chip8<R = StdRng> {
    /// The interpreter
    pub cpu: CPU<R>,
    /// How fast to run it
    pub pacing: Pacing,
}

impl Default for Chip8<StdRng> {
    fn default() -> Self {
        Self::new(CPU::new(), Pacing::default())
    }
}

impl<R: RandomSource> Chip8<R> {
    /// Wraps a [CPU] with the given [Pacing]
    pub fn new(cpu: CPU<R>, pacing: Pacing) -> Self {
        Chip8 { cpu, pacing }
    }

    /// Executes exactly `cycles` instructions, as fast as possible.
    ///
    /// Timers are not touched, so the result depends only on the program.
    /// # Examples
    /// ```rust
    /// # use chipper::*;
    /// # fn main() -> Result<()> {
    /// let mut ch8 = Chip8::new(CPU::seeded(0), Pacing::default());
    /// ch8.cpu.load_program_bytes(&[0x70, 0x01, 0x12, 0x00])?; // add #01, v0; jmp 200
    /// ch8.run_fixed(10)?;
    /// assert_eq!(5, ch8.cpu.v()[0]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn run_fixed(&mut self, cycles: usize) -> Result<&mut Self> {
        self.cpu.multistep(cycles)?;
        Ok(self)
    }

    /// Runs a single frame: executes [Pacing::instructions_per_frame]
    /// instructions, shows the screen to the `frontend`, then ticks the timers.
    pub fn frame(&mut self, frontend: &mut impl Frontend) -> Result<ControlFlow<()>> {
        self.cpu.multistep(self.pacing.instructions_per_frame)?;
        let flow = frontend.refresh(self.cpu.screen());
        self.cpu.tick_timers();
        Ok(flow)
    }

    /// Runs frames until the `frontend` asks to stop, or the program fails.
    ///
    /// Each frame is padded out to [Pacing::frame_time] by sleeping the thread.
    /// # Examples
    /// ```rust
    /// # use chipper::*;
    /// # use std::ops::ControlFlow;
    /// # fn main() -> Result<()> {
    /// let mut ch8 = Chip8::new(CPU::seeded(0), Pacing { instructions_per_frame: 4, frame_rate: 0 });
    /// ch8.cpu.load_program_bytes(&[0x12, 0x00])?; // jmp 200
    /// let mut frames = 0;
    /// ch8.run(&mut |_: &Screen| {
    ///     frames += 1;
    ///     if frames < 3 { ControlFlow::Continue(()) } else { ControlFlow::Break(()) }
    /// })?;
    /// assert_eq!(12, ch8.cpu.cycle());
    /// # Ok(())
    /// # }
    /// ```
    pub fn run(&mut self, frontend: &mut impl Frontend) -> Result<&mut Self> {
        let frame_time = self.pacing.frame_time();
        loop {
            let start = Instant::now();
            if self.frame(frontend)?.is_break() {
                break;
            }
            std::thread::sleep(frame_time.saturating_sub(start.elapsed()));
        }
        Ok(self)
    }
}
