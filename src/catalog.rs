//! Read-only descriptions of the games, as shown on the games page.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// The four mini-games.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum GameKind {
    /// Timed arithmetic.
    EquationExpedition,
    /// Letter scramble.
    WordWeavers,
    /// Shape and colour sequences.
    PatternDetectives,
    /// Repeat the pad pattern.
    RhythmMaster,
}

/// Skill a game trains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Skill {
    Math,
    Vocabulary,
    #[strum(to_string = "Problem-Solving")]
    ProblemSolving,
    Memory,
}

/// Catalog entry for one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GameInfo {
    pub kind: GameKind,
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub skill: Skill,
}

static CATALOG: [GameInfo; 4] = [
    GameInfo {
        kind: GameKind::EquationExpedition,
        id: "game-1",
        title: "Equation Expedition",
        description: "Race against the clock to solve arithmetic problems.",
        skill: Skill::Math,
    },
    GameInfo {
        kind: GameKind::WordWeavers,
        id: "game-2",
        title: "Word Weavers",
        description: "Create as many words as you can from a set of letters.",
        skill: Skill::Vocabulary,
    },
    GameInfo {
        kind: GameKind::PatternDetectives,
        id: "game-3",
        title: "Pattern Detectives",
        description: "Identify the next item in a sequence of shapes and colors.",
        skill: Skill::ProblemSolving,
    },
    GameInfo {
        kind: GameKind::RhythmMaster,
        id: "game-4",
        title: "Rhythm Master",
        description: "Follow the beat and repeat musical patterns.",
        skill: Skill::Memory,
    },
];

/// All games, in display order.
#[must_use]
pub fn catalog() -> &'static [GameInfo] {
    &CATALOG
}

impl GameKind {
    /// Catalog entry for this game.
    #[must_use]
    pub fn info(self) -> &'static GameInfo {
        match self {
            Self::EquationExpedition => &CATALOG[0],
            Self::WordWeavers => &CATALOG[1],
            Self::PatternDetectives => &CATALOG[2],
            Self::RhythmMaster => &CATALOG[3],
        }
    }

    /// Look a game up by its catalog id (`"game-3"`).
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::iter().find(|kind| kind.info().id == id)
    }
}
