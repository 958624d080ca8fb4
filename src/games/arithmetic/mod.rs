//! Equation Expedition: timed arithmetic.
//!
//! - A 30-tick countdown runs for the whole session
//! - Problems are addition, subtraction or multiplication of small numbers
//! - Each correct answer scores one point and poses a new problem
//! - A wrong answer leaves the problem up for another try
//! - When the countdown reaches zero the session ends

mod game;
mod problem;

pub use game::{
    AnswerOutcome, ArithmeticGame, ArithmeticSnapshot, ArithmeticStatus, ArithmeticTimer,
    TimePressure,
};
pub use problem::{Operator, Problem};
