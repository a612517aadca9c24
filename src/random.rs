//! Random sources for the flicker programs
//!
//! Programs never reach for a global generator. The registry owns one
//! [`RandomSource`] and lends it to each tick, so a seeded source makes every
//! frame reproducible.

/// Source of pseudo-random numbers
pub trait RandomSource {
    /// Next raw 32-bit value
    fn next_u32(&mut self) -> u32;

    /// Value in `0..bound`, or 0 when `bound` is 0
    fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.next_u32() % bound
    }
}

/// `SplitMix64` generator folded down to 32-bit outputs
#[derive(Debug, Clone)]
pub struct SplitMix {
    state: u64,
}

impl SplitMix {
    /// Create a generator from a seed (e.g. from a hardware RNG)
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl Default for SplitMix {
    fn default() -> Self {
        Self::new(0)
    }
}

impl RandomSource for SplitMix {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        #[allow(clippy::cast_possible_truncation)]
        {
            (z ^ (z >> 31)) as u32
        }
    }
}
