//! Pad-repetition engine.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::catalog::GameKind;
use crate::core::config::RhythmConfig;
use crate::core::error::ConfigError;
use crate::core::rng::{GameRng, RandomSource};
use crate::core::timer::{TimerId, Timeline};
use crate::rules::MiniGame;

const NOTES: [&str; 4] = ["C4", "E4", "G4", "C5"];
const PAD_COLORS: [&str; 4] = ["red", "blue", "green", "yellow"];

/// Low tone played when the game is lost.
pub const GAME_OVER_NOTE: &str = "A2";

const IDLE_MESSAGE: &str = "Press Start to begin!";

/// A pad on the board, numbered from 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pad(pub u8);

impl Pad {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Tone the pad plays. Boards wider than four pads reuse the scale.
    #[must_use]
    pub const fn note(self) -> &'static str {
        NOTES[self.index() % NOTES.len()]
    }

    #[must_use]
    pub const fn color(self) -> &'static str {
        PAD_COLORS[self.index() % PAD_COLORS.len()]
    }
}

impl std::fmt::Display for Pad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pad({})", self.0)
    }
}

/// Where the game is in its cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "phase")]
pub enum RhythmPhase {
    #[default]
    Idle,
    /// The board is showing the sequence; input is ignored.
    PlayingBack,
    /// The player is repeating the sequence.
    AwaitingPlayer,
    /// The round was repeated correctly; the next playback is pending.
    RoundCleared,
    /// A wrong pad was pressed.
    Ended { completed_rounds: u32 },
}

/// Timers the engine schedules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RhythmTimer {
    Flash(Pad),
    Unflash(Pad),
    PlaybackDone,
    NextRound,
}

/// Sound the host should play, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "cue")]
pub enum Cue {
    Tone { pad: Pad, note: &'static str },
    GameOver { note: &'static str },
}

/// Result of a pad press.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum InputOutcome {
    /// Not the player's turn, or no such pad.
    Ignored,
    /// Right pad, more to go.
    Matched,
    /// Right pad and the whole sequence repeated.
    RoundComplete,
    /// Wrong pad; the game is over.
    Mismatch { completed_rounds: u32 },
}

/// Observable state. The sequence itself is only revealed through playback.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RhythmSnapshot {
    pub phase: RhythmPhase,
    pub round: u32,
    pub sequence_len: usize,
    /// Pads the player has repeated so far this round.
    pub progress: usize,
    /// Pad currently lit, if any.
    pub lit: Option<Pad>,
    pub message: String,
}

/// Watch a growing sequence of pads, then repeat it.
#[derive(Clone, Debug)]
pub struct RhythmGame<R = GameRng> {
    config: RhythmConfig,
    rng: R,
    timers: Timeline<RhythmTimer>,
    phase: RhythmPhase,
    round: u32,
    sequence: Vec<Pad>,
    input: Vec<Pad>,
    lit: Option<Pad>,
    unflash_timer: Option<TimerId>,
    cues: Vec<Cue>,
    message: String,
}

impl<R: RandomSource> RhythmGame<R> {
    /// Create an idle engine. A config that does not validate is logged
    /// and replaced by the defaults.
    pub fn new(config: RhythmConfig, rng: R) -> Self {
        let config = config.validate().map(|()| config).unwrap_or_else(|e| {
            warn!(target: "rhythm", error = %e, "Unusable config; using defaults");
            RhythmConfig::default()
        });
        Self::build(config, rng)
    }

    /// Create an idle engine, rejecting a config it cannot run with.
    pub fn try_new(config: RhythmConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, rng))
    }

    fn build(config: RhythmConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            timers: Timeline::new(),
            phase: RhythmPhase::Idle,
            round: 0,
            sequence: Vec::new(),
            input: Vec::new(),
            lit: None,
            unflash_timer: None,
            cues: Vec::new(),
            message: IDLE_MESSAGE.to_string(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> RhythmPhase {
        self.phase
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// The full sequence for this round.
    #[must_use]
    pub fn sequence(&self) -> &[Pad] {
        &self.sequence
    }

    #[must_use]
    pub fn lit(&self) -> Option<Pad> {
        self.lit
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn pads(&self) -> u8 {
        self.config.pads
    }

    /// Take the sounds queued since the last call.
    pub fn drain_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    /// Extend the sequence by one random pad and play it back.
    fn next_round(&mut self) {
        self.input.clear();
        let step = Pad(self.rng.below(self.config.pads as usize) as u8);
        self.sequence.push(step);
        self.round += 1;
        self.message = format!("Round {}: Computer is playing...", self.round);
        self.phase = RhythmPhase::PlayingBack;
        debug!(target: "rhythm", round = self.round, %step, "Sequence extended");
        self.schedule_playback();
    }

    /// One flash per step at even spacing, then hand over to the player.
    fn schedule_playback(&mut self) {
        let step = self.config.step();
        for (i, &pad) in self.sequence.iter().enumerate() {
            self.timers
                .schedule_in(step * i as u32, RhythmTimer::Flash(pad));
        }
        let done = step * self.sequence.len() as u32 + self.config.settle();
        self.timers.schedule_in(done, RhythmTimer::PlaybackDone);
    }

    /// Light `pad` briefly and queue its tone.
    fn flash(&mut self, pad: Pad) {
        if let Some(old) = self.unflash_timer.take() {
            self.timers.cancel(old);
        }
        self.lit = Some(pad);
        self.unflash_timer = Some(
            self.timers
                .schedule_in(self.config.flash(), RhythmTimer::Unflash(pad)),
        );
        self.cues.push(Cue::Tone {
            pad,
            note: pad.note(),
        });
    }

    /// Press a pad.
    ///
    /// Each press is checked against the same position of the sequence as
    /// it arrives. The first wrong press ends the game.
    #[instrument(level = "debug", target = "rhythm", skip(self), fields(round = self.round))]
    pub fn handle_input(&mut self, pad: Pad) -> InputOutcome {
        if self.phase != RhythmPhase::AwaitingPlayer || pad.0 >= self.config.pads {
            return InputOutcome::Ignored;
        }
        self.flash(pad);
        self.input.push(pad);

        let position = self.input.len() - 1;
        if self.sequence.get(position) != Some(&pad) {
            return self.game_over();
        }
        if self.input.len() == self.sequence.len() {
            self.phase = RhythmPhase::RoundCleared;
            self.message = "Excellent! Getting harder...".to_string();
            self.timers
                .schedule_in(self.config.next_round_delay(), RhythmTimer::NextRound);
            return InputOutcome::RoundComplete;
        }
        InputOutcome::Matched
    }

    fn game_over(&mut self) -> InputOutcome {
        let completed_rounds = self.round.saturating_sub(1);
        self.phase = RhythmPhase::Ended { completed_rounds };
        self.message = format!("Game Over! You completed {completed_rounds} rounds.");
        self.cues.push(Cue::GameOver {
            note: GAME_OVER_NOTE,
        });
        info!(target: "rhythm", round = self.round, completed_rounds, "Game over");
        InputOutcome::Mismatch { completed_rounds }
    }
}

impl<R: RandomSource> MiniGame for RhythmGame<R> {
    type Timer = RhythmTimer;
    type Snapshot = RhythmSnapshot;

    fn kind(&self) -> GameKind {
        GameKind::RhythmMaster
    }

    #[instrument(level = "info", target = "rhythm", skip(self))]
    fn start(&mut self) {
        self.timers.cancel_all();
        self.cues.clear();
        self.unflash_timer = None;
        self.lit = None;
        self.round = 0;
        self.sequence.clear();
        self.next_round();
    }

    fn reset(&mut self) {
        self.timers.cancel_all();
        self.cues.clear();
        self.unflash_timer = None;
        self.lit = None;
        self.phase = RhythmPhase::Idle;
        self.round = 0;
        self.sequence.clear();
        self.input.clear();
        self.message = IDLE_MESSAGE.to_string();
    }

    fn snapshot(&self) -> RhythmSnapshot {
        RhythmSnapshot {
            phase: self.phase,
            round: self.round,
            sequence_len: self.sequence.len(),
            progress: self.input.len(),
            lit: self.lit,
            message: self.message.clone(),
        }
    }

    fn timeline(&self) -> &Timeline<RhythmTimer> {
        &self.timers
    }

    fn timeline_mut(&mut self) -> &mut Timeline<RhythmTimer> {
        &mut self.timers
    }

    fn on_timer(&mut self, timer: RhythmTimer) {
        match timer {
            RhythmTimer::Flash(pad) => self.flash(pad),
            RhythmTimer::Unflash(pad) => {
                self.unflash_timer = None;
                if self.lit == Some(pad) {
                    self.lit = None;
                }
            }
            RhythmTimer::PlaybackDone => {
                if self.phase == RhythmPhase::PlayingBack {
                    self.phase = RhythmPhase::AwaitingPlayer;
                    self.message = "Your turn! Repeat the pattern.".to_string();
                }
            }
            RhythmTimer::NextRound => {
                if self.phase == RhythmPhase::RoundCleared {
                    self.next_round();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::ScriptedRng;
    use std::time::Duration;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn scripted(script: &[usize]) -> RhythmGame<ScriptedRng> {
        RhythmGame::new(RhythmConfig::default(), ScriptedRng::new(script.to_vec()))
    }

    #[test]
    fn test_start_plays_round_one() {
        let mut game = scripted(&[2]);
        game.start();
        assert_eq!(game.phase(), RhythmPhase::PlayingBack);
        assert_eq!(game.round(), 1);
        assert_eq!(game.sequence(), &[Pad(2)]);

        // First flash fires immediately.
        game.advance(Duration::ZERO);
        assert_eq!(game.lit(), Some(Pad(2)));
        assert_eq!(
            game.drain_cues(),
            vec![Cue::Tone {
                pad: Pad(2),
                note: "G4"
            }]
        );

        game.advance(ms(150));
        assert_eq!(game.lit(), None);

        // One step plus settle.
        game.advance(ms(449));
        assert_eq!(game.phase(), RhythmPhase::PlayingBack);
        game.advance(ms(1));
        assert_eq!(game.phase(), RhythmPhase::AwaitingPlayer);
    }

    #[test]
    fn test_input_ignored_during_playback() {
        let mut game = scripted(&[0]);
        game.start();
        assert_eq!(game.handle_input(Pad(0)), InputOutcome::Ignored);
        assert_eq!(game.snapshot().progress, 0);
    }

    #[test]
    fn test_round_complete_then_next_round() {
        let mut game = scripted(&[1, 3]);
        game.start();
        game.advance(ms(600));

        assert_eq!(game.handle_input(Pad(1)), InputOutcome::RoundComplete);
        assert_eq!(game.phase(), RhythmPhase::RoundCleared);
        assert_eq!(game.handle_input(Pad(1)), InputOutcome::Ignored);

        game.advance(ms(1500));
        assert_eq!(game.round(), 2);
        assert_eq!(game.sequence(), &[Pad(1), Pad(3)]);
        assert_eq!(game.phase(), RhythmPhase::PlayingBack);
    }

    #[test]
    fn test_playback_spacing() {
        let mut game = scripted(&[0, 1, 2]);
        game.start();
        game.advance(ms(600));
        game.handle_input(Pad(0));
        game.drain_cues();
        game.advance(ms(1500));

        // Round 2 flashes at +0 and +500, hands over at +1100.
        game.advance(Duration::ZERO);
        assert_eq!(game.lit(), Some(Pad(0)));
        game.advance(ms(500));
        assert_eq!(game.lit(), Some(Pad(1)));
        game.advance(ms(599));
        assert_eq!(game.phase(), RhythmPhase::PlayingBack);
        game.advance(ms(1));
        assert_eq!(game.phase(), RhythmPhase::AwaitingPlayer);
        assert_eq!(game.drain_cues().len(), 2);
    }

    #[test]
    fn test_wrong_pad_ends_game() {
        let mut game = scripted(&[3]);
        game.start();
        game.advance(ms(600));

        assert_eq!(
            game.handle_input(Pad(0)),
            InputOutcome::Mismatch {
                completed_rounds: 0
            }
        );
        assert_eq!(game.phase(), RhythmPhase::Ended { completed_rounds: 0 });
        assert!(game.drain_cues().contains(&Cue::GameOver { note: "A2" }));
        assert_eq!(game.handle_input(Pad(3)), InputOutcome::Ignored);
    }

    #[test]
    fn test_out_of_range_pad_ignored() {
        let mut game = scripted(&[0]);
        game.start();
        game.advance(ms(600));
        assert_eq!(game.handle_input(Pad(4)), InputOutcome::Ignored);
        assert_eq!(game.phase(), RhythmPhase::AwaitingPlayer);
    }

    #[test]
    fn test_player_press_lights_pad() {
        let mut game = scripted(&[0, 0]);
        game.start();
        game.advance(ms(600));
        game.drain_cues();

        game.handle_input(Pad(0));
        assert_eq!(game.lit(), Some(Pad(0)));
        assert_eq!(game.drain_cues().len(), 1);
    }

    #[test]
    fn test_reset_discards_playback() {
        let mut game = scripted(&[0]);
        game.start();
        game.reset();

        assert_eq!(game.timeline().pending(), 0);
        game.advance(ms(5000));
        assert_eq!(game.phase(), RhythmPhase::Idle);
        assert!(game.drain_cues().is_empty());
        assert_eq!(game.message(), "Press Start to begin!");
    }

    #[test]
    fn test_pad_tones() {
        assert_eq!(Pad(0).note(), "C4");
        assert_eq!(Pad(3).note(), "C5");
        assert_eq!(Pad(5).note(), "E4");
        assert_eq!(Pad(1).color(), "blue");
    }

    // ===== Config Validation =====

    #[test]
    fn test_try_new_rejects_small_boards() {
        for pads in [0, 1] {
            let config = RhythmConfig::default().with_pads(pads);
            let err = RhythmGame::try_new(config, GameRng::new(1)).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { field: "rhythm.pads", .. }));
        }

        let config = RhythmConfig {
            step_ms: 0,
            ..RhythmConfig::default()
        };
        assert!(RhythmGame::try_new(config, GameRng::new(1)).is_err());
        assert!(RhythmGame::try_new(RhythmConfig::default().with_pads(2), GameRng::new(1)).is_ok());
    }

    #[test]
    fn test_new_with_no_pads_uses_default_board() {
        let mut game = RhythmGame::new(RhythmConfig::default().with_pads(0), GameRng::new(1));
        game.start();
        assert_eq!(game.round(), 1);
        assert!(game.sequence().iter().all(|pad| pad.0 < 4));
    }
}
