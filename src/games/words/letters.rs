//! Weighted letter pool, letter draws, and word scoring.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::config::DEFAULT_LETTER_FREQUENCIES;
use crate::core::rng::RandomSource;

const ALPHABET: usize = 26;

fn slot(letter: char) -> Option<usize> {
    let upper = letter.to_ascii_uppercase();
    upper
        .is_ascii_uppercase()
        .then(|| (upper as u8 - b'A') as usize)
}

/// Immutable weighted multiset of the 26 letters.
///
/// Weights model natural letter frequency: vowels and common consonants are
/// drawn far more often than `Q` or `Z`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LetterPool {
    weights: [u32; ALPHABET],
    total: u32,
}

impl Default for LetterPool {
    fn default() -> Self {
        // The default table only holds A-Z.
        Self::from_frequencies(DEFAULT_LETTER_FREQUENCIES).unwrap_or(Self {
            weights: [1; ALPHABET],
            total: ALPHABET as u32,
        })
    }
}

impl LetterPool {
    /// Build a pool where each occurrence of a letter adds one unit of
    /// weight. Case is ignored. Returns `None` if the text holds anything
    /// other than letters, or no letters at all.
    #[must_use]
    pub fn from_frequencies(text: &str) -> Option<Self> {
        let mut weights = [0u32; ALPHABET];
        for c in text.chars() {
            weights[slot(c)?] += 1;
        }
        let total: u32 = weights.iter().sum();
        (total > 0).then_some(Self { weights, total })
    }

    /// Weight of `letter` in the pool.
    #[must_use]
    pub fn weight(&self, letter: char) -> u32 {
        slot(letter).map_or(0, |i| self.weights[i])
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Draw one letter, proportionally to its weight.
    pub fn draw_one<R: RandomSource>(&self, rng: &mut R) -> char {
        let mut threshold = rng.below(self.total as usize) as u32;
        for (i, &weight) in self.weights.iter().enumerate() {
            if threshold < weight {
                return (b'A' + i as u8) as char;
            }
            threshold -= weight;
        }
        // Unreachable while total is the sum of weights.
        'E'
    }

    /// Draw `count` letters independently (with replacement).
    pub fn draw<R: RandomSource>(&self, rng: &mut R, count: usize) -> LetterDraw {
        LetterDraw {
            letters: (0..count).map(|_| self.draw_one(rng)).collect(),
        }
    }
}

/// The letters dealt for one scramble.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterDraw {
    letters: SmallVec<[char; 8]>,
}

impl LetterDraw {
    /// A draw with exactly these letters, upper-cased. Non-letters are
    /// dropped.
    pub fn from_letters(letters: impl IntoIterator<Item = char>) -> Self {
        Self {
            letters: letters
                .into_iter()
                .filter(char::is_ascii_alphabetic)
                .map(|c| c.to_ascii_uppercase())
                .collect(),
        }
    }

    #[must_use]
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    fn counts(&self) -> [usize; ALPHABET] {
        let mut counts = [0; ALPHABET];
        for &c in &self.letters {
            if let Some(i) = slot(c) {
                counts[i] += 1;
            }
        }
        counts
    }

    /// Can `word` be spelled using each drawn letter at most once?
    ///
    /// This is multiset containment: `BALL` needs two `L`s in the draw.
    /// Case is ignored; any non-letter makes the word unformable.
    #[must_use]
    pub fn can_form(&self, word: &str) -> bool {
        let mut remaining = self.counts();
        for c in word.chars() {
            let Some(i) = slot(c) else {
                return false;
            };
            if remaining[i] == 0 {
                return false;
            }
            remaining[i] -= 1;
        }
        true
    }
}

impl std::fmt::Display for LetterDraw {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, c) in self.letters.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// Points for a word of `len` letters.
#[must_use]
pub const fn points_for(len: usize) -> u32 {
    match len {
        0..=2 => 0,
        3 => 1,
        4 => 2,
        5 => 3,
        6 => 4,
        _ => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::GameRng;

    fn draw(s: &str) -> LetterDraw {
        LetterDraw::from_letters(s.chars())
    }

    #[test]
    fn test_can_form_needs_repeated_letters() {
        assert!(draw("BALLXYZ").can_form("BALL"));
        assert!(!draw("BALXYZW").can_form("BALL"));
    }

    #[test]
    fn test_can_form_with_hundreds_of_copies() {
        let many = LetterDraw::from_letters(std::iter::repeat('A').take(300));
        assert!(many.can_form(&"A".repeat(256)));
        assert!(many.can_form(&"A".repeat(300)));
        assert!(!many.can_form(&"A".repeat(301)));
    }

    #[test]
    fn test_can_form_is_not_substring() {
        // Letters out of order still form the word.
        assert!(draw("TACXXXX").can_form("CAT"));
        assert!(!draw("CAT").can_form("CATS"));
    }

    #[test]
    fn test_can_form_case_and_junk() {
        assert!(draw("RATESXY").can_form("star"));
        assert!(!draw("RATESXY").can_form("st-ar"));
        assert!(draw("ABC").can_form(""));
    }

    #[test]
    fn test_points_table() {
        assert_eq!(points_for(3), 1);
        assert_eq!(points_for(4), 2);
        assert_eq!(points_for(5), 3);
        assert_eq!(points_for(6), 4);
        assert_eq!(points_for(7), 6);
        assert_eq!(points_for(12), 6);
        assert_eq!(points_for(2), 0);
    }

    #[test]
    fn test_default_pool_weights() {
        let pool = LetterPool::default();
        assert_eq!(pool.total() as usize, DEFAULT_LETTER_FREQUENCIES.len());
        assert_eq!(pool.weight('E'), 12);
        assert_eq!(pool.weight('a'), 9);
        assert_eq!(pool.weight('Q'), 1);
        assert_eq!(pool.weight('?'), 0);
    }

    #[test]
    fn test_from_frequencies_rejects_junk() {
        assert!(LetterPool::from_frequencies("AB1").is_none());
        assert!(LetterPool::from_frequencies("").is_none());
        assert!(LetterPool::from_frequencies("aab").is_some());
    }

    #[test]
    fn test_draw_respects_weights() {
        let pool = LetterPool::from_frequencies("AAAB").unwrap();
        let mut rng = GameRng::new(8);
        let letters = pool.draw(&mut rng, 4000);
        let a = letters.letters().iter().filter(|&&c| c == 'A').count();
        assert_eq!(letters.len(), 4000);
        assert!(letters.letters().iter().all(|&c| c == 'A' || c == 'B'));
        // Expected 3000.
        assert!((2700..3300).contains(&a), "drew {a} As");
    }

    #[test]
    fn test_single_letter_pool() {
        let pool = LetterPool::from_frequencies("Z").unwrap();
        let mut rng = GameRng::new(1);
        assert_eq!(pool.draw(&mut rng, 3), draw("ZZZ"));
    }

    #[test]
    fn test_display() {
        assert_eq!(draw("cat").to_string(), "C A T");
    }
}
