//! Game tuning loaded from TOML.
//!
//! Every section defaults to the values the games ship with, so a config
//! file only needs the keys it changes:
//!
//! ```toml
//! [arithmetic]
//! duration_secs = 60
//!
//! [words]
//! extra_words = ["LATTE", "TREAT"]
//! ```
//!
//! All delays are in milliseconds.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::error::ConfigError;

/// Environment variable naming an optional config file.
pub const CONFIG_PATH_ENV: &str = "EDUPLAY_CONFIG_PATH";

/// Letter frequencies the word game draws from: each occurrence is one unit
/// of weight.
pub const DEFAULT_LETTER_FREQUENCIES: &str =
    "AAAAAAAAABBCCDDDDEEEEEEEEEEEEFFGGGHHIIIIIIIIIJKLLLLMMNNNNNNOOOOOOOOPPQRRRRRRSSSSTTTTTTUUUUVVWWXYYZ";

/// Tuning for the timed arithmetic game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArithmeticConfig {
    /// Session length in countdown ticks.
    pub duration_secs: u32,
    /// Length of one countdown tick.
    pub tick_ms: u64,
    /// Largest operand for addition and subtraction.
    pub max_operand: u32,
    /// Largest factor for multiplication.
    pub max_factor: u32,
    /// How long answer feedback stays up.
    pub feedback_ms: u64,
}

impl Default for ArithmeticConfig {
    fn default() -> Self {
        Self {
            duration_secs: 30,
            tick_ms: 1000,
            max_operand: 10,
            max_factor: 5,
            feedback_ms: 1500,
        }
    }
}

impl ArithmeticConfig {
    #[must_use]
    pub fn with_duration_secs(mut self, secs: u32) -> Self {
        self.duration_secs = secs;
        self
    }

    #[must_use]
    pub fn with_operand_limits(mut self, max_operand: u32, max_factor: u32) -> Self {
        self.max_operand = max_operand;
        self.max_factor = max_factor;
        self
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn feedback_ttl(&self) -> Duration {
        Duration::from_millis(self.feedback_ms)
    }

    /// Reject values the game cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.duration_secs == 0 {
            return Err(ConfigError::invalid("arithmetic.duration_secs", "must be at least 1"));
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::invalid("arithmetic.tick_ms", "must be non-zero"));
        }
        if self.max_operand == 0 {
            return Err(ConfigError::invalid("arithmetic.max_operand", "must be at least 1"));
        }
        if self.max_factor == 0 {
            return Err(ConfigError::invalid("arithmetic.max_factor", "must be at least 1"));
        }
        Ok(())
    }
}

/// Tuning for the shape/colour sequence game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    /// Items shown before the hidden next item.
    pub visible_len: usize,
    /// Levels in a full run.
    pub max_levels: u32,
    /// Random draws allowed before distractors are filled by a walk.
    pub distractor_attempts: u32,
    /// Pause after a correct choice before the next level.
    pub advance_delay_ms: u64,
    /// Pause after a wrong choice before the level is re-rolled.
    pub retry_delay_ms: u64,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            visible_len: 4,
            max_levels: 10,
            distractor_attempts: 20,
            advance_delay_ms: 1000,
            retry_delay_ms: 2000,
        }
    }
}

impl SequenceConfig {
    #[must_use]
    pub fn with_max_levels(mut self, levels: u32) -> Self {
        self.max_levels = levels;
        self
    }

    #[must_use]
    pub fn with_distractor_attempts(mut self, attempts: u32) -> Self {
        self.distractor_attempts = attempts;
        self
    }

    pub fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Reject values the game cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.visible_len == 0 {
            return Err(ConfigError::invalid("sequence.visible_len", "must be at least 1"));
        }
        if self.max_levels == 0 {
            return Err(ConfigError::invalid("sequence.max_levels", "must be at least 1"));
        }
        Ok(())
    }
}

/// Tuning for the letter scramble game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordsConfig {
    /// Letters drawn per scramble.
    pub letter_count: usize,
    /// Shortest word that can score.
    pub min_word_len: usize,
    /// Weighted pool; each occurrence of a letter adds one unit of weight.
    pub letter_frequencies: String,
    /// Words accepted in addition to the built-in list.
    pub extra_words: Vec<String>,
    /// How long a verdict message stays up.
    pub feedback_ms: u64,
}

impl Default for WordsConfig {
    fn default() -> Self {
        Self {
            letter_count: 7,
            min_word_len: 3,
            letter_frequencies: DEFAULT_LETTER_FREQUENCIES.to_string(),
            extra_words: Vec::new(),
            feedback_ms: 3000,
        }
    }
}

impl WordsConfig {
    #[must_use]
    pub fn with_letter_count(mut self, count: usize) -> Self {
        self.letter_count = count;
        self
    }

    #[must_use]
    pub fn with_extra_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_words.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn feedback_ttl(&self) -> Duration {
        Duration::from_millis(self.feedback_ms)
    }

    /// Reject values the game cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.letter_count == 0 {
            return Err(ConfigError::invalid("words.letter_count", "must be at least 1"));
        }
        if self.min_word_len == 0 {
            return Err(ConfigError::invalid("words.min_word_len", "must be at least 1"));
        }
        if !self.letter_frequencies.chars().any(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::invalid(
                "words.letter_frequencies",
                "must contain at least one letter A-Z",
            ));
        }
        if let Some(bad) = self
            .letter_frequencies
            .chars()
            .find(|c| !c.is_ascii_alphabetic())
        {
            return Err(ConfigError::invalid(
                "words.letter_frequencies",
                format!("unexpected character {bad:?}"),
            ));
        }
        Ok(())
    }
}

/// Tuning for the pad-repetition game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RhythmConfig {
    /// Number of pads on the board.
    pub pads: u8,
    /// Spacing between flashes during playback.
    pub step_ms: u64,
    /// How long a flashed pad stays lit.
    pub flash_ms: u64,
    /// Pause after the last flash before the player may answer.
    pub settle_ms: u64,
    /// Pause after a completed round before the next playback.
    pub next_round_ms: u64,
}

impl Default for RhythmConfig {
    fn default() -> Self {
        Self {
            pads: 4,
            step_ms: 500,
            flash_ms: 150,
            settle_ms: 100,
            next_round_ms: 1500,
        }
    }
}

impl RhythmConfig {
    #[must_use]
    pub fn with_pads(mut self, pads: u8) -> Self {
        self.pads = pads;
        self
    }

    pub fn step(&self) -> Duration {
        Duration::from_millis(self.step_ms)
    }

    pub fn flash(&self) -> Duration {
        Duration::from_millis(self.flash_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn next_round_delay(&self) -> Duration {
        Duration::from_millis(self.next_round_ms)
    }

    /// Reject values the game cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pads < 2 {
            return Err(ConfigError::invalid("rhythm.pads", "need at least 2 pads"));
        }
        if self.step_ms == 0 {
            return Err(ConfigError::invalid("rhythm.step_ms", "must be non-zero"));
        }
        if self.flash_ms > self.step_ms {
            return Err(ConfigError::invalid(
                "rhythm.flash_ms",
                "a flash cannot outlast the step spacing",
            ));
        }
        Ok(())
    }
}

/// Configuration for all four games.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GamesConfig {
    pub arithmetic: ArithmeticConfig,
    pub sequence: SequenceConfig,
    pub words: WordsConfig,
    pub rhythm: RhythmConfig,
}

impl GamesConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Load from `EDUPLAY_CONFIG_PATH` if set.
    ///
    /// A missing variable means defaults. A file that cannot be read or
    /// validated is logged and also falls back to defaults.
    pub fn from_env() -> Self {
        let Ok(path) = std::env::var(CONFIG_PATH_ENV) else {
            return Self::default();
        };
        match Self::load(&path) {
            Ok(config) => {
                info!(target: "eduplay", %path, "Loaded games config (TOML)");
                config
            }
            Err(e) => {
                error!(target: "eduplay", %path, error = %e, "Unusable games config; using defaults");
                Self::default()
            }
        }
    }

    /// Check every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.arithmetic.validate()?;
        self.sequence.validate()?;
        self.words.validate()?;
        self.rhythm.validate()
    }
}
