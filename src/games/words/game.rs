//! Letter scramble engine.

use im::OrdSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::dictionary::{StaticWordList, WordList};
use super::letters::{points_for, LetterDraw, LetterPool};
use crate::catalog::GameKind;
use crate::core::config::WordsConfig;
use crate::core::error::ConfigError;
use crate::core::rng::{GameRng, RandomSource};
use crate::core::session::{Feedback, FeedbackSlot};
use crate::core::timer::Timeline;
use crate::rules::MiniGame;

/// Session status. There is no terminal state: a new scramble can be
/// dealt at any time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordsStatus {
    #[default]
    Idle,
    Active,
}

/// Timers the engine schedules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordsTimer {
    ClearFeedback,
}

/// Result of a submitted word, in the order the checks run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "verdict")]
pub enum WordVerdict {
    /// No scramble dealt yet.
    Ignored,
    TooShort,
    /// Needs letters (or more copies of a letter) than the draw holds.
    CannotForm,
    AlreadyFound,
    NotInDictionary,
    Accepted { word: String, points: u32 },
}

impl WordVerdict {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, WordVerdict::Accepted { .. })
    }
}

/// Observable state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordsSnapshot {
    pub status: WordsStatus,
    pub score: u32,
    pub letters: Vec<char>,
    /// Credited words, alphabetical. Shares structure with the engine's
    /// set, so taking a snapshot does not copy the words.
    pub found: OrdSet<String>,
    pub feedback: Option<Feedback>,
}

/// Spell as many listed words as possible from a handful of letters.
#[derive(Clone, Debug)]
pub struct WordsGame<R = GameRng, W = StaticWordList> {
    config: WordsConfig,
    pool: LetterPool,
    words: W,
    rng: R,
    timers: Timeline<WordsTimer>,
    status: WordsStatus,
    letters: LetterDraw,
    found: OrdSet<String>,
    score: u32,
    feedback: FeedbackSlot,
}

impl<R: RandomSource> WordsGame<R, StaticWordList> {
    /// Create an idle engine using the built-in word list plus the
    /// config's `extra_words`.
    pub fn new(config: WordsConfig, rng: R) -> Self {
        let words = StaticWordList::default().with_words(&config.extra_words);
        Self::with_word_list(config, rng, words)
    }

    /// Like [`new`](Self::new), but an unusable config is an error.
    pub fn try_new(config: WordsConfig, rng: R) -> Result<Self, ConfigError> {
        let words = StaticWordList::default().with_words(&config.extra_words);
        Self::try_with_word_list(config, rng, words)
    }
}

impl<R: RandomSource, W: WordList> WordsGame<R, W> {
    /// Create an idle engine validating words against `words`.
    ///
    /// A config that does not validate is logged and replaced by the
    /// defaults.
    pub fn with_word_list(config: WordsConfig, rng: R, words: W) -> Self {
        let config = config.validate().map(|()| config).unwrap_or_else(|e| {
            warn!(target: "words", error = %e, "Unusable config; using defaults");
            WordsConfig::default()
        });
        Self::build(config, rng, words)
    }

    /// Create an idle engine validating words against `words`, rejecting a
    /// config it cannot run with.
    pub fn try_with_word_list(
        config: WordsConfig,
        rng: R,
        words: W,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, rng, words))
    }

    fn build(config: WordsConfig, rng: R, words: W) -> Self {
        let pool = LetterPool::from_frequencies(&config.letter_frequencies).unwrap_or_default();
        Self {
            config,
            pool,
            words,
            rng,
            timers: Timeline::new(),
            status: WordsStatus::Idle,
            letters: LetterDraw::default(),
            found: OrdSet::new(),
            score: 0,
            feedback: FeedbackSlot::new(),
        }
    }

    #[must_use]
    pub fn status(&self) -> WordsStatus {
        self.status
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn letters(&self) -> &LetterDraw {
        &self.letters
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.current()
    }

    /// Credited words in alphabetical order.
    pub fn found_words(&self) -> impl Iterator<Item = &str> {
        self.found.iter().map(String::as_str)
    }

    /// Deal a new scramble, abandoning the current one.
    pub fn init(&mut self) {
        let letters = self.pool.draw(&mut self.rng, self.config.letter_count);
        self.deal(letters);
    }

    /// Start a session on a fixed set of letters (a shared puzzle, a replay).
    pub fn start_with_letters(&mut self, letters: LetterDraw) {
        self.deal(letters);
    }

    #[instrument(level = "info", target = "words", skip(self, letters), fields(letters = %letters))]
    fn deal(&mut self, letters: LetterDraw) {
        self.timers.cancel_all();
        self.feedback.reset();
        self.letters = letters;
        self.found = OrdSet::new();
        self.score = 0;
        self.status = WordsStatus::Active;
        self.show_feedback(Feedback::info("New scramble generated! Good luck!"));
        info!(target: "words", "Scramble dealt");
    }

    /// Check a word typed by the player.
    ///
    /// Checks run in order: length, letter availability, duplicates,
    /// dictionary. Only a word passing all four scores.
    #[instrument(level = "debug", target = "words", skip(self), fields(score = self.score))]
    pub fn submit(&mut self, raw: &str) -> WordVerdict {
        if self.status != WordsStatus::Active {
            return WordVerdict::Ignored;
        }
        let word = raw.trim().to_uppercase();
        let min = self.config.min_word_len;

        let verdict = if word.chars().count() < min {
            self.show_feedback(Feedback::error(format!(
                "Word must be at least {min} letters long."
            )));
            WordVerdict::TooShort
        } else if !self.letters.can_form(&word) {
            self.show_feedback(Feedback::error(
                "The word uses letters not available in the scramble!",
            ));
            WordVerdict::CannotForm
        } else if self.found.contains(&word) {
            self.show_feedback(Feedback::info("Word already found!"));
            WordVerdict::AlreadyFound
        } else if !self.words.contains(&word) {
            self.show_feedback(Feedback::error("Not a valid word in our dictionary."));
            WordVerdict::NotInDictionary
        } else {
            let points = points_for(word.chars().count());
            self.score += points;
            self.found.insert(word.clone());
            self.show_feedback(Feedback::success(format!(
                "+{points} points! Word added: {word}"
            )));
            WordVerdict::Accepted { word, points }
        };
        debug!(target: "words", ?verdict, "Word checked");
        verdict
    }

    fn show_feedback(&mut self, feedback: Feedback) {
        let ttl = self.config.feedback_ttl();
        self.feedback
            .show(&mut self.timers, feedback, ttl, WordsTimer::ClearFeedback);
    }
}

impl<R: RandomSource, W: WordList> MiniGame for WordsGame<R, W> {
    type Timer = WordsTimer;
    type Snapshot = WordsSnapshot;

    fn kind(&self) -> GameKind {
        GameKind::WordWeavers
    }

    fn start(&mut self) {
        self.init();
    }

    fn reset(&mut self) {
        self.timers.cancel_all();
        self.feedback.reset();
        self.status = WordsStatus::Idle;
        self.letters = LetterDraw::default();
        self.found = OrdSet::new();
        self.score = 0;
    }

    fn snapshot(&self) -> WordsSnapshot {
        WordsSnapshot {
            status: self.status,
            score: self.score,
            letters: self.letters.letters().to_vec(),
            found: self.found.clone(),
            feedback: self.feedback.current().cloned(),
        }
    }

    fn timeline(&self) -> &Timeline<WordsTimer> {
        &self.timers
    }

    fn timeline_mut(&mut self) -> &mut Timeline<WordsTimer> {
        &mut self.timers
    }

    fn on_timer(&mut self, timer: WordsTimer) {
        match timer {
            WordsTimer::ClearFeedback => self.feedback.expire(),
        }
    }
}
