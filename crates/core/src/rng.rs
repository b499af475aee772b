//! RNG module - 7-bag random piece generation
//!
//! Implements the "7-bag" randomizer: the supply keeps a queue of upcoming
//! kinds and appends one shuffled permutation of all seven whenever it needs
//! more. Every 7 draws counted from a refill point contain each kind once.
//!
//! Also provides a simple LCG so a seed reproduces the whole sequence.

use std::collections::VecDeque;

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Unbounded, fair supply of piece kinds
#[derive(Debug, Clone)]
pub struct PieceSupply {
    /// Upcoming kinds, front is drawn next
    bag: VecDeque<PieceKind>,
    /// RNG for shuffling
    rng: SimpleRng,
}

impl PieceSupply {
    /// Create a new supply with the given seed. The bag starts empty and is
    /// filled on first use.
    pub fn new(seed: u32) -> Self {
        Self {
            bag: VecDeque::with_capacity(14),
            rng: SimpleRng::new(seed),
        }
    }

    /// Append one shuffled permutation of all seven kinds
    fn refill_bag(&mut self) {
        let mut kinds = PieceKind::ALL;
        self.rng.shuffle(&mut kinds);
        self.bag.extend(kinds);
    }

    /// Draw the next kind, refilling the bag first when it is empty
    pub fn next(&mut self) -> PieceKind {
        if self.bag.is_empty() {
            self.refill_bag();
        }

        match self.bag.pop_front() {
            Some(kind) => kind,
            // refill_bag always pushes seven kinds
            None => PieceKind::I,
        }
    }

    /// Look at the next `count` kinds without consuming them.
    ///
    /// Extends the bag with further permutations when `count` exceeds what is
    /// queued; the extra kinds are exactly what later `next()` calls return.
    pub fn peek(&mut self, count: usize) -> Vec<PieceKind> {
        while self.bag.len() < count {
            self.refill_bag();
        }
        self.bag.iter().take(count).copied().collect()
    }

    /// Number of kinds currently queued
    pub fn queued(&self) -> usize {
        self.bag.len()
    }

    /// Current RNG state, used to seed the supply of the next game
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceSupply {
    fn default() -> Self {
        Self::new(1)
    }
}
