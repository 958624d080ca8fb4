//! Level-based sequence engine.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::pattern::{Item, Round};
use crate::catalog::GameKind;
use crate::core::config::SequenceConfig;
use crate::core::error::ConfigError;
use crate::core::rng::{GameRng, RandomSource};
use crate::core::session::{Feedback, FeedbackSlot};
use crate::core::timer::Timeline;
use crate::rules::MiniGame;

/// Session status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum SequenceStatus {
    #[default]
    Idle,
    /// Playing `level`. Once a choice is made the round is `locked` until
    /// the follow-up timer sets up the next round.
    Active { level: u32, locked: bool },
    /// Every level cleared.
    Completed { final_score: u32 },
}

/// Timers the engine schedules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceTimer {
    /// Move on to the next level.
    Advance,
    /// Re-roll the current level.
    Retry,
}

/// Result of picking an option.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceOutcome {
    /// No round to answer, or the round is locked.
    Ignored,
    Correct,
    Incorrect,
}

/// Observable state. The correct answer is deliberately absent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceSnapshot {
    pub status: SequenceStatus,
    pub score: u32,
    pub max_levels: u32,
    pub sequence: Vec<Item>,
    pub choices: Vec<Item>,
    pub feedback: Option<Feedback>,
}

/// Find the item that continues a shape/colour pattern, level by level.
#[derive(Clone, Debug)]
pub struct SequenceGame<R = GameRng> {
    config: SequenceConfig,
    rng: R,
    timers: Timeline<SequenceTimer>,
    status: SequenceStatus,
    score: u32,
    round: Option<Round>,
    feedback: FeedbackSlot,
}

impl<R: RandomSource> SequenceGame<R> {
    /// Create an idle engine, falling back to the default config if
    /// `config` does not validate.
    pub fn new(config: SequenceConfig, rng: R) -> Self {
        let config = config.validate().map(|()| config).unwrap_or_else(|e| {
            warn!(target: "sequence", error = %e, "Unusable config; using defaults");
            SequenceConfig::default()
        });
        Self::build(config, rng)
    }

    /// Create an idle engine, rejecting a config it cannot run with.
    pub fn try_new(config: SequenceConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, rng))
    }

    fn build(config: SequenceConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            timers: Timeline::new(),
            status: SequenceStatus::Idle,
            score: 0,
            round: None,
            feedback: FeedbackSlot::new(),
        }
    }

    #[must_use]
    pub fn status(&self) -> SequenceStatus {
        self.status
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Current level, if a run is in progress.
    #[must_use]
    pub fn level(&self) -> Option<u32> {
        match self.status {
            SequenceStatus::Active { level, .. } => Some(level),
            _ => None,
        }
    }

    /// The posed round, including its answer.
    #[must_use]
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.current()
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        matches!(self.status, SequenceStatus::Active { locked: true, .. })
    }

    /// Pose a fresh round for `level`, or finish the run past the last level.
    fn setup_level(&mut self, level: u32) {
        self.feedback.reset();
        if level > self.config.max_levels {
            self.round = None;
            self.status = SequenceStatus::Completed {
                final_score: self.score,
            };
            info!(target: "sequence", score = self.score, "Run completed");
            return;
        }
        self.round = Some(Round::generate(&mut self.rng, &self.config));
        self.status = SequenceStatus::Active {
            level,
            locked: false,
        };
        debug!(target: "sequence", level, "Level ready");
    }

    /// Pick `item` as the continuation.
    ///
    /// Any choice locks the round. A correct pick scores and advances after
    /// a short pause; a wrong one re-rolls the same level after a longer one.
    #[instrument(level = "debug", target = "sequence", skip(self), fields(score = self.score))]
    pub fn choose(&mut self, item: Item) -> ChoiceOutcome {
        let SequenceStatus::Active {
            level,
            locked: false,
        } = self.status
        else {
            return ChoiceOutcome::Ignored;
        };
        let Some(answer) = self.round.as_ref().map(Round::answer) else {
            return ChoiceOutcome::Ignored;
        };

        self.status = SequenceStatus::Active {
            level,
            locked: true,
        };
        if item == answer {
            self.score += 1;
            self.feedback
                .pin(&mut self.timers, Feedback::success("Correct! Pattern solved."));
            self.timers
                .schedule_in(self.config.advance_delay(), SequenceTimer::Advance);
            ChoiceOutcome::Correct
        } else {
            self.feedback.pin(
                &mut self.timers,
                Feedback::error("Incorrect. Analyze the sequence!"),
            );
            self.timers
                .schedule_in(self.config.retry_delay(), SequenceTimer::Retry);
            ChoiceOutcome::Incorrect
        }
    }

    /// Pick the option at `index` in the offered choices.
    pub fn choose_index(&mut self, index: usize) -> ChoiceOutcome {
        match self.round.as_ref().and_then(|r| r.choices.get(index).copied()) {
            Some(item) => self.choose(item),
            None => ChoiceOutcome::Ignored,
        }
    }
}

impl<R: RandomSource> MiniGame for SequenceGame<R> {
    type Timer = SequenceTimer;
    type Snapshot = SequenceSnapshot;

    fn kind(&self) -> GameKind {
        GameKind::PatternDetectives
    }

    #[instrument(level = "info", target = "sequence", skip(self))]
    fn start(&mut self) {
        self.timers.cancel_all();
        self.score = 0;
        self.setup_level(1);
        info!(target: "sequence", levels = self.config.max_levels, "Run started");
    }

    fn reset(&mut self) {
        self.timers.cancel_all();
        self.feedback.reset();
        self.status = SequenceStatus::Idle;
        self.score = 0;
        self.round = None;
    }

    fn snapshot(&self) -> SequenceSnapshot {
        let (sequence, choices) = match &self.round {
            Some(round) => (round.pattern.visible.clone(), round.choices.to_vec()),
            None => (Vec::new(), Vec::new()),
        };
        SequenceSnapshot {
            status: self.status,
            score: self.score,
            max_levels: self.config.max_levels,
            sequence,
            choices,
            feedback: self.feedback.current().cloned(),
        }
    }

    fn timeline(&self) -> &Timeline<SequenceTimer> {
        &self.timers
    }

    fn timeline_mut(&mut self) -> &mut Timeline<SequenceTimer> {
        &mut self.timers
    }

    fn on_timer(&mut self, timer: SequenceTimer) {
        let Some(level) = self.level() else {
            return;
        };
        match timer {
            SequenceTimer::Advance => self.setup_level(level + 1),
            SequenceTimer::Retry => self.setup_level(level),
        }
    }
}
