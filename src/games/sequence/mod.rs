//! Pattern Detectives: continue a sequence of coloured shapes.
//!
//! - Each level shows four items built by one of three cyclic rules
//! - The player picks the next item from four options
//! - A correct pick scores and moves to the next level
//! - A wrong pick re-rolls the same level with no penalty
//! - Clearing level 10 completes the run

mod game;
mod pattern;

pub use game::{ChoiceOutcome, SequenceGame, SequenceSnapshot, SequenceStatus, SequenceTimer};
pub use pattern::{
    generate_distractors, Color, Item, Pattern, PatternRule, Round, Shape, CHOICE_COUNT,
    DISTRACTOR_COUNT,
};
