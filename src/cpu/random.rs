// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Where `Cxbb` gets its random bytes from

use rand::RngCore;

/// A source of random bytes for the `rand` instruction
///
/// Implemented for every [RngCore], so any `rand` generator can be handed to
/// the CPU. Tests can implement it directly to script the bytes they get.
pub trait RandomSource {
    /// Produces the next random byte
    fn random_byte(&mut self) -> u8;
}

impl<R: RngCore> RandomSource for R {
    fn random_byte(&mut self) -> u8 {
        self.next_u32() as u8
    }
}
