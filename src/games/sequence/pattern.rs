//! Shape/colour items, cyclic pattern rules, and multiple-choice rounds.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use strum::{Display, EnumIter};
use tracing::{debug, warn};

use crate::core::config::SequenceConfig;
use crate::core::rng::RandomSource;

/// Number of wrong options offered beside the correct one.
pub const DISTRACTOR_COUNT: usize = 3;

/// Options offered each round.
pub const CHOICE_COUNT: usize = DISTRACTOR_COUNT + 1;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize,
)]
pub enum Shape {
    Circle,
    Square,
    Triangle,
    Star,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize,
)]
pub enum Color {
    Red,
    Blue,
    Green,
    Orange,
    Indigo,
}

impl Shape {
    pub const ALL: [Shape; 4] = [Shape::Circle, Shape::Square, Shape::Triangle, Shape::Star];

    fn nth(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }
}

impl Color {
    pub const ALL: [Color; 5] = [
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Orange,
        Color::Indigo,
    ];

    fn nth(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// CSS hex colour the front end paints with.
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Color::Red => "#EF4444",
            Color::Blue => "#3B82F6",
            Color::Green => "#10B981",
            Color::Orange => "#F59E0B",
            Color::Indigo => "#6366F1",
        }
    }
}

/// One cell of a sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub shape: Shape,
    pub color: Color,
}

impl Item {
    /// Every distinct item.
    pub const SPACE: usize = Shape::ALL.len() * Color::ALL.len();

    #[must_use]
    pub const fn new(shape: Shape, color: Color) -> Self {
        Self { shape, color }
    }

    /// Item at `index` in a fixed enumeration of the whole item space.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        let index = index % Self::SPACE;
        Self::new(Shape::nth(index / Color::ALL.len()), Color::nth(index % Color::ALL.len()))
    }

    /// Uniformly random item.
    pub fn random<R: RandomSource>(rng: &mut R) -> Self {
        Self::new(Shape::nth(rng.below(Shape::ALL.len())), Color::nth(rng.below(Color::ALL.len())))
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color, self.shape)
    }
}

/// How a sequence advances from one item to the next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternRule {
    /// Shape fixed, colour steps by one.
    ColorCycles,
    /// Colour fixed, shape steps by one.
    ShapeCycles,
    /// Shape steps by one, colour by two.
    BothCycle,
}

impl PatternRule {
    pub const ALL: [PatternRule; 3] = [
        PatternRule::ColorCycles,
        PatternRule::ShapeCycles,
        PatternRule::BothCycle,
    ];

    /// Item at position `step` of a sequence starting at the given indices.
    #[must_use]
    pub fn item_at(self, step: usize, shape_start: usize, color_start: usize) -> Item {
        match self {
            PatternRule::ColorCycles => {
                Item::new(Shape::nth(shape_start), Color::nth(color_start + step))
            }
            PatternRule::ShapeCycles => {
                Item::new(Shape::nth(shape_start + step), Color::nth(color_start))
            }
            PatternRule::BothCycle => {
                Item::new(Shape::nth(shape_start + step), Color::nth(color_start + 2 * step))
            }
        }
    }
}

/// A visible run plus the held-out item that continues it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub rule: PatternRule,
    pub visible: Vec<Item>,
    pub next: Item,
}

impl Pattern {
    /// Pick a rule and starting point, then lay out `visible_len` items
    /// plus the next one.
    pub fn generate<R: RandomSource>(rng: &mut R, visible_len: usize) -> Self {
        let rule = PatternRule::ALL[rng.below(PatternRule::ALL.len())];
        let shape_start = rng.below(Shape::ALL.len());
        let color_start = rng.below(Color::ALL.len());

        let visible = (0..visible_len)
            .map(|step| rule.item_at(step, shape_start, color_start))
            .collect();
        let next = rule.item_at(visible_len, shape_start, color_start);
        Self { rule, visible, next }
    }
}

/// Collect exactly three items distinct from `correct` and from each other.
///
/// Random draws are tried first, up to `attempts` of them. If that budget
/// runs out short, the remainder is filled by walking the item space from a
/// random offset, which always succeeds because the space holds 20 items.
pub fn generate_distractors<R: RandomSource>(
    rng: &mut R,
    correct: Item,
    attempts: u32,
) -> [Item; DISTRACTOR_COUNT] {
    let mut picked: SmallVec<[Item; DISTRACTOR_COUNT]> = SmallVec::new();

    for _ in 0..attempts {
        if picked.len() == DISTRACTOR_COUNT {
            break;
        }
        let candidate = Item::random(rng);
        if candidate != correct && !picked.contains(&candidate) {
            picked.push(candidate);
        }
    }

    if picked.len() < DISTRACTOR_COUNT {
        warn!(
            target: "sequence",
            collected = picked.len(),
            attempts,
            "Distractor budget exhausted; filling by walk"
        );
        let offset = rng.below(Item::SPACE);
        for k in 0..Item::SPACE {
            if picked.len() == DISTRACTOR_COUNT {
                break;
            }
            let candidate = Item::from_index(offset + k);
            if candidate != correct && !picked.contains(&candidate) {
                picked.push(candidate);
            }
        }
    }

    [picked[0], picked[1], picked[2]]
}

/// A posed sequence challenge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub pattern: Pattern,
    pub choices: [Item; CHOICE_COUNT],
}

impl Round {
    /// Generate a pattern and its shuffled options.
    pub fn generate<R: RandomSource>(rng: &mut R, config: &SequenceConfig) -> Self {
        let pattern = Pattern::generate(rng, config.visible_len);
        let [a, b, c] = generate_distractors(rng, pattern.next, config.distractor_attempts);
        let mut choices = [pattern.next, a, b, c];
        rng.shuffle(&mut choices);
        debug!(target: "sequence", rule = %pattern.rule, next = %pattern.next, "Generated round");
        Self { pattern, choices }
    }

    /// The item that continues the pattern.
    #[must_use]
    pub fn answer(&self) -> Item {
        self.pattern.next
    }

    /// Position of the correct option among `choices`.
    #[must_use]
    pub fn answer_index(&self) -> usize {
        self.choices
            .iter()
            .position(|c| *c == self.pattern.next)
            .unwrap_or_default()
    }
}
