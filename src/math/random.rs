//! Seed hashing and the Mulberry32 stream that drives every generation pass
//!
//! A seed string maps to the same 32-bit state on every platform, and the
//! stream yields the same sequence of `f64` values in `[0, 1)` for that state.
//! All arithmetic is explicit 32-bit wrapping arithmetic.

use rand::rand_core::impls;
use rand::{RngCore, SeedableRng};

/// Initial accumulator for seed hashing
pub const SEED_HASH_INIT: u32 = 1_779_033_703;
/// Multiplier applied after each code unit is folded into the accumulator
pub const SEED_HASH_MULTIPLIER: u32 = 3_432_918_353;
/// Left rotation applied after each multiplication
pub const SEED_HASH_ROTATION: u32 = 13;
/// Weyl increment added to the Mulberry32 state on every draw
pub const MULBERRY_INCREMENT: u32 = 0x6D2B_79F5;

// 2^32, exactly representable as f64
const UNIT_INTERVAL_SCALE: f64 = 4_294_967_296.0;

/// Hash seed text into the initial 32-bit generator state
///
/// Characters are consumed as UTF-16 code units, so a character outside the
/// basic multilingual plane contributes two rounds. Any string, including the
/// empty string, is a valid seed.
pub fn hash_seed(text: &str) -> u32 {
    text.encode_utf16().fold(SEED_HASH_INIT, |acc, unit| {
        (acc ^ u32::from(unit))
            .wrapping_mul(SEED_HASH_MULTIPLIER)
            .rotate_left(SEED_HASH_ROTATION)
    })
}

/// Mulberry32 pseudo-random generator
///
/// A 32-bit state advanced by a Weyl increment and scrambled by two
/// xor-shift/multiply rounds. The generator also counts how many values it
/// has produced, which lets callers verify exact draw accounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
    draws: u64,
}

impl Mulberry32 {
    /// Create a generator from a raw 32-bit state
    pub const fn new(seed: u32) -> Self {
        Self {
            state: seed,
            draws: 0,
        }
    }

    /// Create a generator from seed text via [`hash_seed`]
    pub fn from_text(text: &str) -> Self {
        Self::new(hash_seed(text))
    }

    /// Current internal state
    pub const fn state(&self) -> u32 {
        self.state
    }

    /// Number of values drawn since construction
    pub const fn draws(&self) -> u64 {
        self.draws
    }

    /// Next value in `[0, 1)`
    ///
    /// The 32-bit output divided by 2^32. Both operands are exact in `f64`,
    /// so the result is bit-identical across implementations.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / UNIT_INTERVAL_SCALE
    }

    /// Uniform index into a collection of `len` items
    ///
    /// Computes `floor(draw * len)`. Always consumes exactly one draw, and
    /// returns 0 for an empty collection.
    pub fn index(&mut self, len: usize) -> usize {
        let draw = self.next_f64();
        let index = (draw * len as f64).floor() as usize;
        index.min(len.saturating_sub(1))
    }

    /// Uniform integer in the inclusive range `[low, high]`
    ///
    /// Consumes exactly one draw. `high < low` is treated as a single-value range.
    pub fn range_inclusive(&mut self, low: usize, high: usize) -> usize {
        low + self.index(high.saturating_sub(low) + 1)
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(MULBERRY_INCREMENT);
        self.draws += 1;

        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst);
    }
}

impl SeedableRng for Mulberry32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}
