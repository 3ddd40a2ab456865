// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Error type for Chipper

use thiserror::Error;

/// Result type, equivalent to [std::result::Result]<T, [enum@Error]>
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Chipper.
///
/// Every variant is fatal to the running program: nothing here is retried.
#[derive(Debug, Error)]
pub enum Error {
    /// Represents an unimplemented operation
    #[error("opcode {word:04x} not recognized")]
    UnimplementedInstruction {
        /// The offending word
        word: u16,
    },
    /// Tried to return from a subroutine with nothing on the stack
    #[error("return at {pc:03x} with an empty call stack")]
    StackUnderflow {
        /// The address of the instruction after the `ret`
        pc: u16,
    },
    /// Tried to call a subroutine with the call stack full
    #[error("call at {pc:03x} exceeds the call stack depth of {depth}")]
    StackOverflow {
        /// The address of the instruction after the `call`
        pc: u16,
        /// The depth of the call stack
        depth: usize,
    },
    /// Tried to touch memory outside `0x000..=0xfff`
    #[error("address {addr:04x} is out of range")]
    InvalidAddress {
        /// The offending address
        addr: usize,
    },
    /// Tried to load a program that doesn't fit in program memory
    #[error("program is {len} bytes, but only {max} bytes fit in memory")]
    ProgramTooLarge {
        /// The length of the rejected program
        len: usize,
        /// The size of program memory
        max: usize,
    },
    /// Tried to get/set an out-of-bounds register
    #[error("tried to access register v{reg:X} which does not exist")]
    InvalidRegister {
        /// The offending register
        reg: usize,
    },
    /// Error originated in [std::io]
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}
