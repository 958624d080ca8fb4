//! Injected randomness for the game engines.
//!
//! Every random draw an engine makes goes through [`RandomSource`], so hosts
//! pick the source at construction time:
//!
//! - [`GameRng`]: ChaCha8-backed, deterministic per seed, forkable and
//!   checkpointable. The normal choice for play and for seeded tests.
//! - [`ScriptedRng`]: replays a fixed list of draws. Used to pin an exact
//!   challenge (a specific letter draw, a specific pad sequence).
//!
//! ```
//! use eduplay_games::core::{GameRng, RandomSource};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.below(100), b.below(100));
//!
//! let mut items = [1, 2, 3, 4];
//! a.shuffle(&mut items);
//! items.sort();
//! assert_eq!(items, [1, 2, 3, 4]);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Source of uniform random draws.
///
/// Only [`below`](RandomSource::below) is required; everything else is
/// built on top of it so scripted sources stay trivial.
pub trait RandomSource {
    /// Uniform draw in `0..n`. `n` must be non-zero.
    fn below(&mut self, n: usize) -> usize;

    /// Uniform draw in `low..=high`.
    fn range_inclusive(&mut self, low: u32, high: u32) -> u32 {
        debug_assert!(low <= high, "empty range {low}..={high}");
        low + self.below((high - low) as usize + 1) as u32
    }

    /// Unbiased in-place shuffle (Fisher–Yates).
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.below(i + 1);
            slice.swap(i, j);
        }
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn below(&mut self, n: usize) -> usize {
        (**self).below(n)
    }
}

/// Deterministic RNG for game sessions.
///
/// Uses ChaCha8 for speed while keeping good statistical quality.
/// The same seed always yields the same challenges.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Create an RNG seeded from OS entropy, for real play.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence, so one
    /// seed can drive several engines without them sharing draws.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Create an independent stream for a named purpose (e.g. one per game).
    ///
    /// The same name always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = rustc_hash::FxHasher::default();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Get the current state for checkpointing.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

impl RandomSource for GameRng {
    fn below(&mut self, n: usize) -> usize {
        self.inner.gen_range(0..n)
    }
}

/// Serializable RNG state.
///
/// Uses the ChaCha8 word position, so capture is O(1) regardless of
/// how many draws were made.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
    /// Fork counter for deterministic branching
    pub fork_counter: u64,
}

/// Replays a fixed script of draws.
///
/// Each call to `below(n)` takes the next scripted value modulo `n`; the
/// script wraps around when exhausted. An empty script always yields 0.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    script: Vec<usize>,
    cursor: usize,
}

impl ScriptedRng {
    /// Create a source that replays `script` in order.
    pub fn new(script: impl Into<Vec<usize>>) -> Self {
        Self {
            script: script.into(),
            cursor: 0,
        }
    }

    /// Number of draws served so far.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRng {
    fn below(&mut self, n: usize) -> usize {
        if self.script.is_empty() {
            self.cursor += 1;
            return 0;
        }
        let value = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        value % n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.below(1000), rng2.below(1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.below(1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.below(1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_fork_is_deterministic_and_distinct() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        let mut forked1 = rng1.fork();
        let forked2 = rng2.fork();
        assert_eq!(forked1.seed(), forked2.seed());

        let seq1: Vec<_> = (0..10).map(|_| rng1.below(1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| forked1.below(1000)).collect();
        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_context_streams() {
        let rng = GameRng::new(42);
        let mut words = rng.for_context("words");
        let mut words_again = rng.for_context("words");
        let mut rhythm = rng.for_context("rhythm");

        let a: Vec<_> = (0..10).map(|_| words.below(1000)).collect();
        let b: Vec<_> = (0..10).map(|_| words_again.below(1000)).collect();
        let c: Vec<_> = (0..10).map(|_| rhythm.below(1000)).collect();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_range_inclusive_bounds() {
        let mut rng = GameRng::new(7);
        for _ in 0..500 {
            let v = rng.range_inclusive(1, 10);
            assert!((1..=10).contains(&v));
        }
        assert_eq!(rng.range_inclusive(5, 5), 5);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = GameRng::new(42);
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let original = data.clone();

        rng.shuffle(&mut data);

        assert_ne!(data, original);
        data.sort();
        assert_eq!(data, original);
    }

    #[test]
    fn test_shuffle_reaches_every_position() {
        // Each element of a 4-slice should land in every slot over many runs.
        let mut rng = GameRng::new(3);
        let mut seen = [[false; 4]; 4];
        for _ in 0..400 {
            let mut data = [0usize, 1, 2, 3];
            rng.shuffle(&mut data);
            for (slot, &value) in data.iter().enumerate() {
                seen[value][slot] = true;
            }
        }
        assert!(seen.iter().flatten().all(|&s| s));
    }

    #[test]
    fn test_state_restore() {
        let mut rng = GameRng::new(42);
        for _ in 0..100 {
            rng.below(1000);
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.below(1000)).collect();

        let mut restored = GameRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.below(1000)).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_state_serde() {
        let state = GameRngState {
            seed: 42,
            word_pos: 12345,
            fork_counter: 5,
        };

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: GameRngState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }

    #[test]
    fn test_scripted_replays_and_wraps() {
        let mut rng = ScriptedRng::new(vec![3, 1, 7]);
        assert_eq!(rng.below(10), 3);
        assert_eq!(rng.below(10), 1);
        assert_eq!(rng.below(4), 3); // 7 % 4
        assert_eq!(rng.below(10), 3); // wrapped
        assert_eq!(rng.draws(), 4);

        let mut empty = ScriptedRng::default();
        assert_eq!(empty.below(5), 0);
    }
}
