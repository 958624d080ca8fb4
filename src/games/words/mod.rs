//! Word Weavers: spell words from a scramble of letters.
//!
//! - Seven letters are drawn from a frequency-weighted pool
//! - A word scores if it is long enough, can be spelled from the draw,
//!   has not been found yet, and is on the word list
//! - Longer words score more; a new scramble can be dealt at any time

mod dictionary;
mod game;
mod letters;

pub use dictionary::{StaticWordList, WordList, DEFAULT_WORDS};
pub use game::{WordVerdict, WordsGame, WordsSnapshot, WordsStatus, WordsTimer};
pub use letters::{points_for, LetterDraw, LetterPool};
