use rand::rngs::{ StdRng, ThreadRng };
use rand::{ Rng, SeedableRng };

/// Source of uniformly distributed indices.
pub trait RandomSource {
    /// Uniform integer in `0..bound`. `bound` must be non-zero.
    fn below(&mut self, bound: usize) -> usize;
}

/// Adapts any `rand` generator.
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<ThreadRng> {
    /// Thread-local CSPRNG, reseeded from the operating system.
    pub fn system() -> Self {
        Self::new(rand::rng())
    }
}

impl RngSource<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn below(&mut self, bound: usize) -> usize {
        self.rng.random_range(0..bound)
    }
}

/// Uniformly chosen element of a non-empty slice.
pub fn pick<T: Copy, S: RandomSource + ?Sized>(items: &[T], rng: &mut S) -> T {
    items[rng.below(items.len())]
}

/// Fisher-Yates: walk from the back, swapping each slot with a uniform
/// index at or below it.
pub fn shuffle<T, S: RandomSource + ?Sized>(items: &mut [T], rng: &mut S) {
    for i in (1..items.len()).rev() {
        let j = rng.below(i + 1);
        items.swap(i, j);
    }
}

/// Replays a fixed list of values. Panics when exhausted or when a value
/// does not fit the requested bound.
#[cfg(test)]
pub struct FixedSequence {
    values: std::collections::VecDeque<usize>,
}

#[cfg(test)]
impl FixedSequence {
    pub fn new(values: &[usize]) -> Self {
        Self { values: values.iter().copied().collect() }
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

#[cfg(test)]
impl RandomSource for FixedSequence {
    fn below(&mut self, bound: usize) -> usize {
        let value = self.values.pop_front().expect("fixed sequence exhausted");
        assert!(value < bound, "fixed value {} out of range 0..{}", value, bound);
        value
    }
}
