//! MiniGame trait for engine implementations.
//!
//! Engines implement `MiniGame` to expose:
//! - Session start and teardown
//! - The timeline their timers live on
//! - How a fired timer changes state
//! - An observable snapshot for the host

use std::time::Duration;

use crate::catalog::GameKind;
use crate::core::timer::Timeline;

/// Life-cycle shared by all engines.
///
/// ## Implementation Notes
///
/// - `start`: must cancel every pending timer before scheduling new ones,
///   so calling it twice is the same as calling it once
/// - `reset`: tears the session down to idle, again cancelling all timers
/// - `on_timer`: only called from `advance`, with timers this engine
///   scheduled during the current session
/// - Player actions are engine-specific methods, not part of this trait
pub trait MiniGame {
    /// Event carried by this engine's timers.
    type Timer;

    /// Read-only view handed to the presentation layer.
    type Snapshot;

    /// Which catalog entry this engine plays.
    fn kind(&self) -> GameKind;

    /// Begin a fresh session, discarding any previous one.
    fn start(&mut self);

    /// Abandon the session and return to idle.
    fn reset(&mut self);

    /// Capture the observable state.
    fn snapshot(&self) -> Self::Snapshot;

    /// The engine's timers.
    fn timeline(&self) -> &Timeline<Self::Timer>;

    /// Mutable access to the engine's timers.
    fn timeline_mut(&mut self) -> &mut Timeline<Self::Timer>;

    /// Apply a fired timer.
    fn on_timer(&mut self, timer: Self::Timer);

    // === Convenience Methods ===

    /// Current virtual time.
    fn now(&self) -> Duration {
        self.timeline().now()
    }

    /// Move time forward by `elapsed`, firing every timer that comes due.
    ///
    /// Timers fire in deadline order. A timer scheduled by a handler fires
    /// in the same call if its deadline falls inside the window.
    fn advance(&mut self, elapsed: Duration) {
        let until = self.now() + elapsed;
        while let Some(timer) = self.timeline_mut().pop_due(until) {
            self.on_timer(timer);
        }
        self.timeline_mut().settle(until);
    }

    /// Fire timers until none remain or `limit` of virtual time has passed.
    ///
    /// Returns the time actually consumed. Useful for hosts and tests that
    /// want to run a scheduled sequence (a playback, a level transition)
    /// to completion.
    fn run_pending(&mut self, limit: Duration) -> Duration {
        let start = self.now();
        let until = start + limit;
        while let Some(deadline) = self.timeline().next_deadline() {
            if deadline > until {
                break;
            }
            self.advance(deadline - self.now());
        }
        self.now() - start
    }
}
