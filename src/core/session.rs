//! Feedback annotations shared by every engine.
//!
//! Feedback is transient: it is shown after a player action and cleared by a
//! timer. It never gates play.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::Display;

use super::timer::{TimerId, Timeline};

/// Tone of a feedback message, for the host's styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FeedbackKind {
    Success,
    Error,
    Info,
}

/// A short message shown to the player after an action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub message: String,
    pub kind: FeedbackKind,
}

impl Feedback {
    pub fn new(kind: FeedbackKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(FeedbackKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(FeedbackKind::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(FeedbackKind::Info, message)
    }
}

/// The current feedback plus the timer that will clear it.
///
/// Showing new feedback cancels the previous clear timer, so an old timer
/// can never wipe a newer message early.
#[derive(Clone, Debug, Default)]
pub struct FeedbackSlot {
    current: Option<Feedback>,
    clear_timer: Option<TimerId>,
}

impl FeedbackSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The feedback currently on screen.
    #[must_use]
    pub fn current(&self) -> Option<&Feedback> {
        self.current.as_ref()
    }

    /// Show `feedback` and schedule `clear_event` after `ttl`.
    pub fn show<E>(
        &mut self,
        timers: &mut Timeline<E>,
        feedback: Feedback,
        ttl: Duration,
        clear_event: E,
    ) {
        if let Some(old) = self.clear_timer.take() {
            timers.cancel(old);
        }
        self.current = Some(feedback);
        self.clear_timer = Some(timers.schedule_in(ttl, clear_event));
    }

    /// Show `feedback` with no expiry.
    pub fn pin<E>(&mut self, timers: &mut Timeline<E>, feedback: Feedback) {
        if let Some(old) = self.clear_timer.take() {
            timers.cancel(old);
        }
        self.current = Some(feedback);
    }

    /// Handle the clear timer firing.
    pub fn expire(&mut self) {
        self.current = None;
        self.clear_timer = None;
    }

    /// Drop the feedback without touching timers.
    ///
    /// Used after the owning timeline was cleared wholesale.
    pub fn reset(&mut self) {
        self.current = None;
        self.clear_timer = None;
    }
}
