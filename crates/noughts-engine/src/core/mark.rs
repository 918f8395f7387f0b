use serde::{Deserialize, Serialize};

/// One of the two symbols that can occupy a cell.
///
/// `X` belongs to the human player and `O` to the engine. The engine always
/// plays `O`; nothing else in the crate depends on which side moves first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Mark {
    #[display("X")]
    #[serde(rename = "X")]
    Player,
    #[display("O")]
    #[serde(rename = "O")]
    Opponent,
}

impl Mark {
    pub const ALL: [Mark; 2] = [Mark::Player, Mark::Opponent];

    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Mark::Player => Mark::Opponent,
            Mark::Opponent => Mark::Player,
        }
    }

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Mark::Player => "X",
            Mark::Opponent => "O",
        }
    }

    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'X' | 'x' => Some(Mark::Player),
            'O' | 'o' => Some(Mark::Opponent),
            _ => None,
        }
    }

    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let mut chars = symbol.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }
}
