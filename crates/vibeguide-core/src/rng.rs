#![forbid(unsafe_code)]

//! Injectable random sources.
//!
//! Layout generation draws block widths through [`RandomSource`] instead of an
//! ambient generator so tests can fix the seed, or script the exact rolls.

/// A source of pseudo-random 64-bit values.
pub trait RandomSource {
    /// Next raw value.
    fn next_u64(&mut self) -> u64;

    /// Uniform-ish index in `0..len`. Returns 0 when `len` is 0.
    fn pick_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_u64() % len as u64) as usize
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }

    fn pick_index(&mut self, len: usize) -> usize {
        (**self).pick_index(len)
    }
}

/// Deterministic xorshift64 generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    /// Fallback state for the one seed that would wrap to zero.
    const NONZERO: u64 = 0x9E37_79B9_7F4A_7C15;

    /// Create a generator from `seed`. Every seed (including 0) is valid.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        let state = seed.wrapping_add(1);
        Self {
            state: if state == 0 { Self::NONZERO } else { state },
        }
    }

    /// Seed from the wall clock, for non-reproducible sessions.
    #[must_use]
    pub fn from_time() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self::new(nanos)
    }
}

impl RandomSource for XorShift64 {
    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

/// Replays a fixed list of rolls, cycling when exhausted.
///
/// `pick_index(len)` returns `roll % len`, so a test can say "pick the third
/// allowed width" by scripting a `2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedRolls {
    rolls: Vec<u64>,
    cursor: usize,
}

impl ScriptedRolls {
    /// Create from a list of rolls. An empty list always yields 0.
    #[must_use]
    pub fn new(rolls: &[u64]) -> Self {
        Self {
            rolls: rolls.to_vec(),
            cursor: 0,
        }
    }

    /// Number of rolls consumed so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRolls {
    fn next_u64(&mut self) -> u64 {
        if self.rolls.is_empty() {
            return 0;
        }
        let roll = self.rolls[self.cursor % self.rolls.len()];
        self.cursor += 1;
        roll
    }
}
