//! Rhythm Master: watch a growing sequence of pads, then repeat it.
//!
//! - Each round appends one random pad to the sequence
//! - The board plays the whole sequence back, one flash per step
//! - The player then repeats it; every press is checked as it arrives
//! - One wrong press ends the game

mod game;

pub use game::{
    Cue, InputOutcome, Pad, RhythmGame, RhythmPhase, RhythmSnapshot, RhythmTimer, GAME_OVER_NOTE,
};
