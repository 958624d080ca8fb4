//! Word validity as a pluggable capability.

use rustc_hash::FxHashSet;

/// Decides whether a word counts.
///
/// Words reach this check already trimmed and upper-cased.
pub trait WordList {
    fn contains(&self, word: &str) -> bool;
}

impl<W: WordList + ?Sized> WordList for &W {
    fn contains(&self, word: &str) -> bool {
        (**self).contains(word)
    }
}

impl<W: WordList + ?Sized> WordList for Box<W> {
    fn contains(&self, word: &str) -> bool {
        (**self).contains(word)
    }
}

/// Words the game ships with.
pub const DEFAULT_WORDS: &[&str] = &[
    "CAT", "ACT", "CAR", "RAT", "ART", "TAR", "SAT", "STAR", "CART", "TRAC", "CASE", "ACE", "SEE",
    "EAT", "TEA", "ATE", "SET", "REST", "EAST", "SEAT", "TEST", "RATE", "MEET", "TEAM", "MATE",
    "META", "TAME", "RATTED", "METER", "TREE", "MERCURY", "YES", "TRY", "CRY", "YOUR", "YARD",
    "RAD", "DAY", "DRAY", "DARK", "DOCK", "COAT", "CODE", "CROW", "RAGE", "GAME", "MAN", "RACE",
    "READ", "DEAR", "RADE", "RATTLED", "TRAM", "MAR", "ARM", "RUM", "MUTT", "UTTER", "TERRA",
    "FACE", "ICE", "FINE", "FIND", "FADE", "DART", "TRADE", "MATTER", "TREAT", "TEAR", "RAIN",
    "RANT", "NICE", "DINE",
];

/// A fixed in-memory allow-list.
#[derive(Clone, Debug)]
pub struct StaticWordList {
    words: FxHashSet<String>,
}

impl Default for StaticWordList {
    fn default() -> Self {
        Self::empty().with_words(DEFAULT_WORDS.iter().copied())
    }
}

impl StaticWordList {
    /// A list that accepts nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            words: FxHashSet::default(),
        }
    }

    /// Add words, normalised to upper case.
    #[must_use]
    pub fn with_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words.extend(
            words
                .into_iter()
                .map(|w| w.as_ref().trim().to_uppercase())
                .filter(|w| !w.is_empty()),
        );
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordList for StaticWordList {
    fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}
