//! Uniform random-pick buffer.

use super::{Buffer, GrowableArray};
use crate::ArcwalkError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Buffer that hands out a uniformly random pending element.
///
/// The chosen slot is refilled with the last element, so removal is O(1)
/// and insertion order is not preserved. Seed it for reproducible runs.
#[derive(Debug, Clone)]
pub struct RandomBuffer<T> {
    items: GrowableArray<T>,
    rng: StdRng,
}

impl<T> RandomBuffer<T> {
    /// Random buffer seeded from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Random buffer with a reproducible sequence of picks.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            items: GrowableArray::new(),
            rng,
        }
    }
}

impl<T> Default for RandomBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Buffer<T> for RandomBuffer<T> {
    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn put(&mut self, element: T) {
        self.items.push(element);
    }

    fn get_next(&mut self) -> Result<T, ArcwalkError> {
        if self.items.is_empty() {
            return Err(ArcwalkError::EmptyBuffer);
        }
        let index = self.rng.gen_range(0..self.items.len());
        self.items
            .swap_remove(index)
            .ok_or(ArcwalkError::EmptyBuffer)
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}
