use arrayvec::ArrayVec;

use crate::{
    MoveError,
    core::{
        board::{Board, Move},
        line::Outcome,
        mark::Mark,
    },
};

/// A single game in progress.
///
/// # Example
///
/// ```
/// use noughts_engine::{Game, Mark, Move};
///
/// let mut game = Game::new();
/// assert_eq!(game.to_move(), Mark::Player);
/// game.play(Move::CENTER).unwrap();
/// assert_eq!(game.to_move(), Mark::Opponent);
/// assert!(game.play(Move::CENTER).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    to_move: Mark,
    history: ArrayVec<Move, { Board::CELLS }>,
    outcome: Outcome,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates an empty game with `X` to move.
    #[must_use]
    pub fn new() -> Self {
        Self::with_first_mover(Mark::Player)
    }

    #[must_use]
    pub fn with_first_mover(first: Mark) -> Self {
        Self {
            board: Board::EMPTY,
            to_move: first,
            history: ArrayVec::new(),
            outcome: Outcome::Ongoing,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    #[must_use]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Plays `mv` for the side to move and returns the resulting outcome.
    pub fn play(&mut self, mv: Move) -> Result<Outcome, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        self.board.place(mv, self.to_move)?;
        self.history.push(mv);
        self.to_move = self.to_move.other();
        self.outcome = self.board.outcome();
        Ok(self.outcome)
    }
}
