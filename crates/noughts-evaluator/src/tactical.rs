//! One-ply lookahead: immediate wins and the blocks that deny them.

use noughts_engine::{Board, Mark, Move};

/// Returns the lowest-index empty cell that wins the game for `mark` at once.
///
/// Called with the engine's own mark this finds a winning move; called with the
/// other side's mark it finds the cell that must be blocked. The input board is
/// never modified: every placement is tried on a copy.
#[must_use]
pub fn find_immediate_move(board: &Board, mark: Mark) -> Option<Move> {
    board
        .empty_cells()
        .into_iter()
        .find(|mv| board.with_mark(*mv, mark).outcome().winner() == Some(mark))
}
