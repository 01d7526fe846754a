//! Offset algebra for a ring of fixed capacity.
//!
//! A [`Wrapping`] offset only ever moves by modular increment or decrement and
//! re-checks after each step that it still lies in `[0, capacity)`.

use crate::contract::{
    DECREMENT_FROM_RING, DECREMENT_INTO_RING, INCREMENT_FROM_RING, INCREMENT_INTO_RING, ensure,
    require,
};

/// A physical offset into a ring of `capacity` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wrapping {
    pos: usize,
    capacity: usize,
}

impl Wrapping {
    /// Wraps `pos`, which the caller has already checked against `capacity`.
    #[inline]
    pub fn new(pos: usize, capacity: usize) -> Self {
        Self { pos, capacity }
    }

    /// Physical offset.
    #[inline]
    pub fn get(self) -> usize {
        self.pos
    }

    /// Moves forward by `by` bytes, passing through `0` at most once.
    #[inline]
    #[must_use]
    pub fn advance(self, by: usize) -> Self {
        require!(
            INCREMENT_FROM_RING,
            self.pos < self.capacity && by <= self.capacity
        );
        let next = self.pos + by;
        let pos = if next < self.capacity {
            next
        } else {
            next - self.capacity
        };
        ensure!(INCREMENT_INTO_RING, pos < self.capacity);
        Self { pos, ..self }
    }

    /// Moves backward by `by` bytes, passing through `capacity` at most once.
    #[inline]
    #[must_use]
    pub fn retreat(self, by: usize) -> Self {
        require!(
            DECREMENT_FROM_RING,
            self.pos < self.capacity && by <= self.capacity
        );
        let pos = if self.pos >= by {
            self.pos - by
        } else {
            self.capacity + self.pos - by
        };
        ensure!(DECREMENT_INTO_RING, pos < self.capacity);
        Self { pos, ..self }
    }
}
