//! Timed arithmetic engine.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::problem::Problem;
use crate::catalog::GameKind;
use crate::core::config::ArithmeticConfig;
use crate::core::error::ConfigError;
use crate::core::rng::{GameRng, RandomSource};
use crate::core::session::{Feedback, FeedbackSlot};
use crate::core::timer::{TimerId, Timeline};
use crate::rules::MiniGame;

/// Session status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArithmeticStatus {
    #[default]
    Idle,
    Active,
    /// The countdown ran out. Only `start` leaves this state.
    Ended,
}

/// Timers the engine schedules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithmeticTimer {
    Tick,
    ClearFeedback,
}

/// Result of a submitted answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerOutcome {
    /// Not playing, or the input was not a whole number.
    Ignored,
    Correct,
    /// Wrong; the same problem stays up for another try.
    Incorrect,
}

/// How urgent the countdown looks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePressure {
    Calm,
    Warning,
    Critical,
}

impl TimePressure {
    #[must_use]
    pub fn from_remaining(secs: u32) -> Self {
        match secs {
            0..=10 => TimePressure::Critical,
            11..=20 => TimePressure::Warning,
            _ => TimePressure::Calm,
        }
    }
}

/// Observable state of an arithmetic session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArithmeticSnapshot {
    pub status: ArithmeticStatus,
    pub score: u32,
    pub time_remaining: u32,
    pub pressure: TimePressure,
    pub problem: Option<Problem>,
    pub feedback: Option<Feedback>,
}

/// Solve as many problems as possible before the countdown ends.
#[derive(Clone, Debug)]
pub struct ArithmeticGame<R = GameRng> {
    config: ArithmeticConfig,
    rng: R,
    timers: Timeline<ArithmeticTimer>,
    status: ArithmeticStatus,
    score: u32,
    time_remaining: u32,
    problem: Option<Problem>,
    feedback: FeedbackSlot,
    tick_timer: Option<TimerId>,
}

impl<R: RandomSource> ArithmeticGame<R> {
    /// Create an idle engine.
    ///
    /// An unusable config is logged and replaced by the defaults; use
    /// [`try_new`](Self::try_new) to see the error instead.
    pub fn new(config: ArithmeticConfig, rng: R) -> Self {
        let config = config.validate().map(|()| config).unwrap_or_else(|e| {
            warn!(target: "arithmetic", error = %e, "Unusable config; using defaults");
            ArithmeticConfig::default()
        });
        Self::build(config, rng)
    }

    /// Create an idle engine, rejecting a config it cannot run with.
    pub fn try_new(config: ArithmeticConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, rng))
    }

    fn build(config: ArithmeticConfig, rng: R) -> Self {
        let time_remaining = config.duration_secs;
        Self {
            config,
            rng,
            timers: Timeline::new(),
            status: ArithmeticStatus::Idle,
            score: 0,
            time_remaining,
            problem: None,
            feedback: FeedbackSlot::new(),
            tick_timer: None,
        }
    }

    #[must_use]
    pub fn status(&self) -> ArithmeticStatus {
        self.status
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    #[must_use]
    pub fn problem(&self) -> Option<&Problem> {
        self.problem.as_ref()
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.current()
    }

    #[must_use]
    pub fn config(&self) -> &ArithmeticConfig {
        &self.config
    }

    /// Replace the posed problem with a fresh one.
    fn generate_problem(&mut self) {
        let problem = Problem::generate(&mut self.rng, &self.config);
        debug!(target: "arithmetic", %problem, answer = problem.answer, "Generated problem");
        self.problem = Some(problem);
    }

    /// Check the player's typed answer.
    ///
    /// Input is trimmed and must parse as a whole number; anything else is
    /// ignored without feedback, as is any input outside an active session.
    #[instrument(level = "debug", target = "arithmetic", skip(self), fields(score = self.score))]
    pub fn submit(&mut self, raw: &str) -> AnswerOutcome {
        if self.status != ArithmeticStatus::Active {
            return AnswerOutcome::Ignored;
        }
        let Ok(value) = raw.trim().parse::<i64>() else {
            return AnswerOutcome::Ignored;
        };
        let Some(problem) = self.problem else {
            return AnswerOutcome::Ignored;
        };

        if problem.is_answered_by(value) {
            self.score += 1;
            self.show_feedback(Feedback::success("Correct! +1 Point"));
            self.generate_problem();
            AnswerOutcome::Correct
        } else {
            self.show_feedback(Feedback::error("Try again!"));
            AnswerOutcome::Incorrect
        }
    }

    fn show_feedback(&mut self, feedback: Feedback) {
        let ttl = self.config.feedback_ttl();
        self.feedback
            .show(&mut self.timers, feedback, ttl, ArithmeticTimer::ClearFeedback);
    }

    fn schedule_tick(&mut self) {
        let tick = self.config.tick();
        self.tick_timer = Some(self.timers.schedule_in(tick, ArithmeticTimer::Tick));
    }

    fn on_tick(&mut self) {
        self.tick_timer = None;
        if self.status != ArithmeticStatus::Active {
            return;
        }
        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining == 0 {
            self.end();
        } else {
            self.schedule_tick();
        }
    }

    fn end(&mut self) {
        if let Some(tick) = self.tick_timer.take() {
            self.timers.cancel(tick);
        }
        self.status = ArithmeticStatus::Ended;
        info!(target: "arithmetic", score = self.score, "Time is up");
    }
}

impl<R: RandomSource> MiniGame for ArithmeticGame<R> {
    type Timer = ArithmeticTimer;
    type Snapshot = ArithmeticSnapshot;

    fn kind(&self) -> GameKind {
        GameKind::EquationExpedition
    }

    #[instrument(level = "info", target = "arithmetic", skip(self))]
    fn start(&mut self) {
        self.timers.cancel_all();
        self.feedback.reset();
        self.tick_timer = None;
        self.score = 0;
        self.time_remaining = self.config.duration_secs;
        self.status = ArithmeticStatus::Active;
        self.generate_problem();
        self.schedule_tick();
        info!(target: "arithmetic", seconds = self.time_remaining, "Session started");
    }

    fn reset(&mut self) {
        self.timers.cancel_all();
        self.feedback.reset();
        self.tick_timer = None;
        self.status = ArithmeticStatus::Idle;
        self.score = 0;
        self.time_remaining = self.config.duration_secs;
        self.problem = None;
    }

    fn snapshot(&self) -> ArithmeticSnapshot {
        ArithmeticSnapshot {
            status: self.status,
            score: self.score,
            time_remaining: self.time_remaining,
            pressure: TimePressure::from_remaining(self.time_remaining),
            problem: self.problem,
            feedback: self.feedback.current().cloned(),
        }
    }

    fn timeline(&self) -> &Timeline<ArithmeticTimer> {
        &self.timers
    }

    fn timeline_mut(&mut self) -> &mut Timeline<ArithmeticTimer> {
        &mut self.timers
    }

    fn on_timer(&mut self, timer: ArithmeticTimer) {
        match timer {
            ArithmeticTimer::Tick => self.on_tick(),
            ArithmeticTimer::ClearFeedback => self.feedback.expire(),
        }
    }
}
