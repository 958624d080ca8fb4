//! # eduplay-games
//!
//! Logic engines for EduPlay's four learning mini-games.
//!
//! ## Design Principles
//!
//! 1. **Presentation-Free**: Engines own rules and state only. A host renders
//!    snapshots and forwards player input; nothing here draws or plays audio.
//!
//! 2. **Deterministic**: Every engine takes an injected random source and
//!    runs on a virtual clock, so a seed plus a list of inputs and time
//!    steps replays a session exactly.
//!
//! 3. **Outcomes, Not Errors**: Player actions return an outcome enum
//!    (correct, incorrect, ignored...). `Result` only appears when loading
//!    configuration.
//!
//! ## Architecture
//!
//! - **Timelines**: Each engine owns a [`Timeline`] of pending timers
//!   (countdown ticks, feedback expiry, level transitions, playback flashes).
//!   Restarting or resetting cancels all of them, so a stale timer can never
//!   touch a new session.
//!
//! - **Snapshots**: Hosts re-read [`MiniGame::snapshot`] after every call.
//!   Snapshots are serde-serializable for transport to a UI.
//!
//! ## Modules
//!
//! - `core`: RNG, timers, feedback, configuration, errors
//! - `rules`: The `MiniGame` life-cycle trait
//! - `catalog`: Static game descriptions
//! - `games`: The arithmetic, sequence, words and rhythm engines

pub mod catalog;
pub mod core;
pub mod games;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, Feedback, FeedbackKind, GameRng, GameRngState, GamesConfig, RandomSource,
    ScriptedRng, TimerId, Timeline,
};

pub use crate::catalog::{catalog, GameInfo, GameKind, Skill};

pub use crate::rules::MiniGame;

pub use crate::games::arithmetic::{AnswerOutcome, ArithmeticGame};
pub use crate::games::rhythm::{InputOutcome, RhythmGame};
pub use crate::games::sequence::{ChoiceOutcome, SequenceGame};
pub use crate::games::words::{WordVerdict, WordsGame};
