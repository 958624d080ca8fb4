//! Shared building blocks: randomness, timers, feedback, configuration.
//!
//! Nothing here knows about a particular game. Engines own one of each
//! piece and are driven through the [`MiniGame`](crate::rules::MiniGame)
//! trait.

pub mod config;
pub mod error;
pub mod rng;
pub mod session;
pub mod timer;

pub use config::{ArithmeticConfig, GamesConfig, RhythmConfig, SequenceConfig, WordsConfig};
pub use error::ConfigError;
pub use rng::{GameRng, GameRngState, RandomSource, ScriptedRng};
pub use session::{Feedback, FeedbackKind, FeedbackSlot};
pub use timer::{TimerId, Timeline};
