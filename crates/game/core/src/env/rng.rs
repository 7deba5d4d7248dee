//! Deterministic randomness for setup decisions.
//!
//! Role, color and task assignment must be reproducible from the configured
//! seed alone, so the engine never touches an OS-seeded generator. Every draw is
//! derived from `(game_seed, stream, draw index)` through [`compute_seed`].

/// RNG oracle for deterministic random number generation.
///
/// Implementations must produce the same value for the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform value in `0..bound` (`bound` must be non-zero).
    fn below(&self, seed: u64, bound: u32) -> u32 {
        self.next_u32(seed) % bound
    }
}

/// PCG-XSH-RR generator: 64-bit LCG state, 32-bit permuted output.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Mixes the game seed with a stream tag and a draw counter.
///
/// Distinct streams keep role assignment independent from color or task
/// assignment: changing the task quota never reshuffles roles.
pub fn compute_seed(game_seed: u64, stream: u32, draw: u64) -> u64 {
    let mut hash = game_seed;
    hash ^= (stream as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= draw.wrapping_mul(0x9e3779b97f4a7c15);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}

/// Stream tags for [`compute_seed`].
pub const ROLE_STREAM: u32 = 1;
pub const COLOR_STREAM: u32 = 2;
pub const TASK_STREAM: u32 = 3;

/// Sequence of draws from one named stream of the game seed.
pub struct SeedStream<'a, R: RngOracle + ?Sized> {
    rng: &'a R,
    game_seed: u64,
    stream: u32,
    draw: u64,
}

impl<'a, R: RngOracle + ?Sized> SeedStream<'a, R> {
    pub fn new(rng: &'a R, game_seed: u64, stream: u32) -> Self {
        Self {
            rng,
            game_seed,
            stream,
            draw: 0,
        }
    }

    /// Uniform index in `0..bound`.
    pub fn index(&mut self, bound: usize) -> usize {
        let seed = compute_seed(self.game_seed, self.stream, self.draw);
        self.draw += 1;
        self.rng.below(seed, bound as u32) as usize
    }

    /// In-place Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }
}
