use std::{fmt, str::FromStr};

use arrayvec::ArrayVec;
use serde::{Deserialize, Deserializer, Serialize, Serializer, ser::SerializeSeq as _};

use crate::{BoardParseError, MoveError};

use super::mark::Mark;

/// Index of a cell on the 3×3 grid, in row-major order (`0..9`).
///
/// A `Move` only guarantees the index is in range; whether the cell is empty
/// is checked against a concrete [`Board`] when the move is played.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(try_from = "usize", into = "usize")]
pub struct Move(usize);

impl Move {
    pub const CENTER: Self = Self(4);
    pub const CORNERS: [Self; 4] = [Self(0), Self(2), Self(6), Self(8)];
    pub const EDGES: [Self; 4] = [Self(1), Self(3), Self(5), Self(7)];

    /// All nine cells in ascending index order.
    pub const ALL: [Self; Board::CELLS] = [
        Self(0),
        Self(1),
        Self(2),
        Self(3),
        Self(4),
        Self(5),
        Self(6),
        Self(7),
        Self(8),
    ];

    #[must_use]
    pub const fn new(index: usize) -> Option<Self> {
        if index < Board::CELLS {
            Some(Self(index))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl TryFrom<usize> for Move {
    type Error = MoveError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::new(index).ok_or(MoveError::OutOfRange(index))
    }
}

impl From<Move> for usize {
    fn from(mv: Move) -> Self {
        mv.0
    }
}

/// A 3×3 tic-tac-toe grid.
///
/// The board is a plain value: it does not know whose turn it is and does not
/// check that the position is reachable by alternating play. Callers that need
/// turn order use [`Game`](crate::Game).
///
/// On the wire a board is a JSON array of nine strings, `"X"`, `"O"` or `""`:
///
/// ```
/// use noughts_engine::{Board, Mark, Move};
///
/// let board: Board = serde_json::from_str(r#"["X","","","","O","","","",""]"#).unwrap();
/// assert_eq!(board.cell(Move::CENTER), Some(Mark::Opponent));
/// assert_eq!(board.to_string(), "X..\n.O.\n...");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [Option<Mark>; Board::CELLS],
}

impl Board {
    pub const CELLS: usize = 9;
    pub const EMPTY: Self = Self {
        cells: [None; Self::CELLS],
    };

    #[must_use]
    pub fn new() -> Self {
        Self::EMPTY
    }

    #[must_use]
    pub fn from_cells(cells: [Option<Mark>; Self::CELLS]) -> Self {
        Self { cells }
    }

    #[must_use]
    pub fn cells(&self) -> &[Option<Mark>; Self::CELLS] {
        &self.cells
    }

    #[must_use]
    pub fn cell(&self, mv: Move) -> Option<Mark> {
        self.cells[mv.index()]
    }

    #[must_use]
    pub fn is_empty_at(&self, mv: Move) -> bool {
        self.cell(mv).is_none()
    }

    /// Returns the empty cells in ascending index order.
    #[must_use]
    pub fn empty_cells(&self) -> ArrayVec<Move, { Self::CELLS }> {
        Move::ALL
            .into_iter()
            .filter(|mv| self.is_empty_at(*mv))
            .collect()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    #[must_use]
    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|c| **c == Some(mark)).count()
    }

    /// Places `mark` on an empty cell.
    pub fn place(&mut self, mv: Move, mark: Mark) -> Result<(), MoveError> {
        if !self.is_empty_at(mv) {
            return Err(MoveError::Occupied(mv));
        }
        self.cells[mv.index()] = Some(mark);
        Ok(())
    }

    /// Returns a copy of this board with `mark` written at `mv`.
    ///
    /// Overwrites whatever was there; used for hypothetical placements on
    /// cells already known to be empty.
    #[must_use]
    pub fn with_mark(mut self, mv: Move, mark: Mark) -> Self {
        self.cells[mv.index()] = Some(mark);
        self
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.chunks(3).enumerate() {
            if row > 0 {
                f.write_str("\n")?;
            }
            for cell in cells {
                f.write_str(cell.map_or(".", Mark::symbol))?;
            }
        }
        Ok(())
    }
}

/// Parses the compact form: nine cells of `X`, `O` or `.`/`-`/`_` for empty.
///
/// `/`, `|` and whitespace are ignored so rows may be separated.
impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols = s
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, '/' | '|'))
            .collect::<Vec<_>>();
        if symbols.len() != Self::CELLS {
            return Err(BoardParseError::WrongLength(symbols.len()));
        }
        let mut cells = [None; Self::CELLS];
        for (index, (cell, c)) in cells.iter_mut().zip(symbols).enumerate() {
            *cell = match c {
                '.' | '-' | '_' => None,
                _ => Some(
                    Mark::from_char(c).ok_or_else(|| BoardParseError::InvalidSymbol {
                        index,
                        symbol: c.to_string(),
                    })?,
                ),
            };
        }
        Ok(Self { cells })
    }
}

impl TryFrom<Vec<String>> for Board {
    type Error = BoardParseError;

    fn try_from(symbols: Vec<String>) -> Result<Self, Self::Error> {
        if symbols.len() != Self::CELLS {
            return Err(BoardParseError::WrongLength(symbols.len()));
        }
        let mut cells = [None; Self::CELLS];
        for (index, (cell, symbol)) in cells.iter_mut().zip(symbols).enumerate() {
            if symbol.is_empty() {
                continue;
            }
            *cell = Some(
                Mark::from_symbol(&symbol)
                    .ok_or(BoardParseError::InvalidSymbol { index, symbol })?,
            );
        }
        Ok(Self { cells })
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(Self::CELLS))?;
        for cell in &self.cells {
            seq.serialize_element(cell.map_or("", Mark::symbol))?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let symbols = Vec::<String>::deserialize(deserializer)?;
        Self::try_from(symbols).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cells_ascending() {
        let board: Board = "X.O/.X./O..".parse().unwrap();
        let empty = board.empty_cells();
        assert_eq!(
            empty.iter().map(|m| m.index()).collect::<Vec<_>>(),
            vec![1, 3, 5, 7, 8]
        );
        assert!(!board.is_full());
    }

    #[test]
    fn test_place_rejects_occupied_cell() {
        let mut board = Board::new();
        board.place(Move::CENTER, Mark::Player).unwrap();
        assert_eq!(
            board.place(Move::CENTER, Mark::Opponent),
            Err(MoveError::Occupied(Move::CENTER))
        );
        assert_eq!(board.cell(Move::CENTER), Some(Mark::Player));
    }

    #[test]
    fn test_with_mark_leaves_original_untouched() {
        let board = Board::new();
        let next = board.with_mark(Move::CENTER, Mark::Opponent);
        assert!(board.is_empty_at(Move::CENTER));
        assert_eq!(next.count(Mark::Opponent), 1);
    }

    #[test]
    fn test_move_range() {
        assert_eq!(Move::new(8).map(Move::index), Some(8));
        assert_eq!(Move::new(9), None);
        assert_eq!(Move::try_from(12), Err(MoveError::OutOfRange(12)));
    }

    #[test]
    fn test_parse_compact_form() {
        let test_cases = [
            ("XO.......", Ok(2)),
            ("xo- ___ ...", Ok(2)),
            ("X|O|.\n...\n...", Ok(2)),
            ("XO", Err(BoardParseError::WrongLength(2))),
            (
                "XOZ......",
                Err(BoardParseError::InvalidSymbol {
                    index: 2,
                    symbol: "Z".to_owned(),
                }),
            ),
        ];
        for (input, expected) in test_cases {
            let parsed = input
                .parse::<Board>()
                .map(|b| b.count(Mark::Player) + b.count(Mark::Opponent));
            assert_eq!(parsed, expected, "{input:?}");
        }
    }

    #[test]
    fn test_json_format() {
        let board: Board = "X...O....".parse().unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, r#"["X","","","","O","","","",""]"#);
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }

    #[test]
    fn test_json_rejects_bad_boards() {
        assert!(serde_json::from_str::<Board>(r#"["X","O"]"#).is_err());
        let err = serde_json::from_str::<Board>(r#"["X","","","","?","","","",""]"#)
            .unwrap_err()
            .to_string();
        assert!(err.contains("invalid cell symbol"), "{err}");
    }

    #[test]
    fn test_move_serializes_as_index() {
        assert_eq!(serde_json::to_string(&Move::CENTER).unwrap(), "4");
        assert!(serde_json::from_str::<Move>("9").is_err());
    }
}
