//! Arithmetic problems and their generator.

use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::core::config::ArithmeticConfig;
use crate::core::rng::RandomSource;

/// Operation in a problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
}

impl Operator {
    pub const ALL: [Operator; 3] = [Operator::Add, Operator::Subtract, Operator::Multiply];

    /// Symbol shown to the player.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '×',
        }
    }

    /// Evaluate `left op right`.
    #[must_use]
    pub const fn apply(self, left: u32, right: u32) -> i64 {
        let (l, r) = (left as i64, right as i64);
        match self {
            Operator::Add => l + r,
            Operator::Subtract => l - r,
            Operator::Multiply => l * r,
        }
    }
}

/// A posed problem and its expected answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub left: u32,
    pub right: u32,
    pub operator: Operator,
    pub answer: i64,
}

impl Problem {
    /// Build a problem, computing the answer.
    #[must_use]
    pub const fn new(left: u32, operator: Operator, right: u32) -> Self {
        Self {
            left,
            right,
            operator,
            answer: operator.apply(left, right),
        }
    }

    /// Draw a fresh problem.
    ///
    /// The operator is uniform. Addition and subtraction draw both operands
    /// from `1..=max_operand`, multiplication from `1..=max_factor`.
    /// Subtraction orders its operands so the answer is never negative.
    pub fn generate<R: RandomSource>(rng: &mut R, config: &ArithmeticConfig) -> Self {
        let operator = Operator::ALL[rng.below(Operator::ALL.len())];
        match operator {
            Operator::Add => {
                let left = rng.range_inclusive(1, config.max_operand);
                let right = rng.range_inclusive(1, config.max_operand);
                Self::new(left, operator, right)
            }
            Operator::Subtract => {
                let a = rng.range_inclusive(1, config.max_operand);
                let b = rng.range_inclusive(1, config.max_operand);
                Self::new(a.max(b), operator, a.min(b))
            }
            Operator::Multiply => {
                let left = rng.range_inclusive(1, config.max_factor);
                let right = rng.range_inclusive(1, config.max_factor);
                Self::new(left, operator, right)
            }
        }
    }

    /// Does `value` answer this problem?
    #[must_use]
    pub fn is_answered_by(&self, value: i64) -> bool {
        self.answer == value
    }
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator.symbol(), self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::{GameRng, ScriptedRng};
    use strum::IntoEnumIterator;

    #[test]
    fn test_display() {
        assert_eq!(Problem::new(7, Operator::Subtract, 3).to_string(), "7 - 3");
        assert_eq!(Problem::new(3, Operator::Multiply, 4).to_string(), "3 × 4");
        assert_eq!(Problem::new(2, Operator::Add, 9).to_string(), "2 + 9");
    }

    #[test]
    fn test_subtraction_swaps_operands() {
        // operator index 1 = Subtract, then draws 2 and 8 (0-based offsets).
        let mut rng = ScriptedRng::new(vec![1, 2, 8]);
        let problem = Problem::generate(&mut rng, &ArithmeticConfig::default());
        assert_eq!(problem, Problem::new(9, Operator::Subtract, 3));
        assert_eq!(problem.answer, 6);
    }

    #[test]
    fn test_multiplication_uses_smaller_range() {
        let config = ArithmeticConfig::default();
        let mut rng = GameRng::new(11);
        for _ in 0..500 {
            let p = Problem::generate(&mut rng, &config);
            match p.operator {
                Operator::Multiply => {
                    assert!((1..=config.max_factor).contains(&p.left));
                    assert!((1..=config.max_factor).contains(&p.right));
                }
                _ => {
                    assert!((1..=config.max_operand).contains(&p.left));
                    assert!((1..=config.max_operand).contains(&p.right));
                }
            }
        }
    }

    #[test]
    fn test_every_operator_appears() {
        let mut rng = GameRng::new(5);
        let config = ArithmeticConfig::default();
        let seen: Vec<Operator> = (0..200)
            .map(|_| Problem::generate(&mut rng, &config).operator)
            .collect();
        for op in Operator::iter() {
            assert!(seen.contains(&op), "{op:?} never generated");
        }
    }
}
