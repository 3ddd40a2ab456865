// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! A fixed-depth stack of return addresses

/// How many nested calls the stack can hold
pub const STACK_DEPTH: usize = 16;

/// Holds return addresses pushed by `call` and popped by `ret`
///
/// Pushing onto a full stack, or popping an empty one, returns [None] and
/// leaves the stack untouched. The CPU turns that into an error.
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stack {
    frames: [u16; STACK_DEPTH],
    len: usize,
}

impl Stack {
    /// Creates an empty stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a return address. Returns [None] if the stack is full.
    /// # Examples
    /// ```rust
    ///# use chipper::*;
    /// let mut stack = Stack::new();
    /// for _ in 0..STACK_DEPTH {
    ///     assert!(stack.push(0x200).is_some());
    /// }
    /// assert!(stack.push(0x200).is_none());
    /// ```
    #[must_use]
    pub fn push(&mut self, addr: u16) -> Option<()> {
        let frame = self.frames.get_mut(self.len)?;
        *frame = addr;
        self.len += 1;
        Some(())
    }

    /// Pops the most recent return address. Returns [None] if the stack is empty.
    pub fn pop(&mut self) -> Option<u16> {
        self.len = self.len.checked_sub(1)?;
        Some(self.frames[self.len])
    }

    /// Gets the live frames, oldest first
    pub fn as_slice(&self) -> &[u16] {
        &self.frames[..self.len]
    }

    /// Gets the number of frames on the stack
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if nothing is on the stack
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every frame
    pub fn clear(&mut self) {
        self.len = 0;
    }
}

// Stale frames above `len` don't count
impl PartialEq for Stack {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Stack {}

impl std::hash::Hash for Stack {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}
