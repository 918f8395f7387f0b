use serde::Serialize;

use super::{
    board::{Board, Move},
    mark::Mark,
};

/// One of the eight index triples that win the game when filled by one mark.
///
/// Serializes as its index triple, e.g. `[0, 1, 2]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct WinningLine([Move; 3]);

impl WinningLine {
    /// Rows, then columns, then diagonals. Outcome detection scans in this order.
    pub const ALL: [Self; 8] = {
        const fn line(a: usize, b: usize, c: usize) -> WinningLine {
            WinningLine([Move::ALL[a], Move::ALL[b], Move::ALL[c]])
        }
        [
            line(0, 1, 2),
            line(3, 4, 5),
            line(6, 7, 8),
            line(0, 3, 6),
            line(1, 4, 7),
            line(2, 5, 8),
            line(0, 4, 8),
            line(2, 4, 6),
        ]
    };

    #[must_use]
    pub fn cells(self) -> [Move; 3] {
        self.0
    }

    /// Returns the mark filling all three cells, if any.
    #[must_use]
    pub fn owner(self, board: &Board) -> Option<Mark> {
        let [a, b, c] = self.0.map(|mv| board.cell(mv));
        a.filter(|mark| b == Some(*mark) && c == Some(*mark))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant)]
pub enum OutcomeKind {
    #[display("ongoing")]
    Ongoing,
    #[display("player win")]
    PlayerWin,
    #[display("opponent win")]
    OpponentWin,
    #[display("tie")]
    Tie,
}

/// Terminal classification of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Outcome {
    Ongoing,
    Win { mark: Mark, line: WinningLine },
    Tie,
}

impl Outcome {
    #[must_use]
    pub fn kind(self) -> OutcomeKind {
        match self {
            Outcome::Ongoing => OutcomeKind::Ongoing,
            Outcome::Win {
                mark: Mark::Player, ..
            } => OutcomeKind::PlayerWin,
            Outcome::Win {
                mark: Mark::Opponent,
                ..
            } => OutcomeKind::OpponentWin,
            Outcome::Tie => OutcomeKind::Tie,
        }
    }

    #[must_use]
    pub fn winner(self) -> Option<Mark> {
        match self {
            Outcome::Win { mark, .. } => Some(mark),
            Outcome::Ongoing | Outcome::Tie => None,
        }
    }

    #[must_use]
    pub fn winning_line(self) -> Option<WinningLine> {
        match self {
            Outcome::Win { line, .. } => Some(line),
            Outcome::Ongoing | Outcome::Tie => None,
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        !self.is_ongoing()
    }
}

/// Classifies `board`.
///
/// Returns the first completed line in [`WinningLine::ALL`] order, so a board
/// with two complete lines always reports the same one. A full board without
/// a line is a tie.
#[must_use]
pub fn detect_outcome(board: &Board) -> Outcome {
    for line in WinningLine::ALL {
        if let Some(mark) = line.owner(board) {
            return Outcome::Win { mark, line };
        }
    }
    if board.is_full() {
        Outcome::Tie
    } else {
        Outcome::Ongoing
    }
}

impl Board {
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        detect_outcome(self)
    }
}
