//! Per-turn move selection for the engine's side.
//!
//! [`MoveSelector::select_move`] runs the layers in a fixed order and stops at
//! the first one that produces a move:
//!
//! 1. Win now (`O` completes a line)
//! 2. Block (`X` would complete a line next turn)
//! 3. No empty cell left → no move
//! 4. Learned scorer, once more than
//!    [`SelectorConfig::min_examples_for_inference`] games have been seen
//! 5. Positional heuristic
//!
//! Tactical safety always overrides the learned preference, and the learned
//! preference always overrides the heuristic. A scorer that is untrained or
//! fails falls through to the heuristic; it never aborts the turn.

use log::debug;
use noughts_engine::{Board, Mark, Move};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{classifier::WinProbabilityModel, heuristic, move_scorer::MoveScorer, tactical};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// The learned scorer is consulted only when strictly more examples than
    /// this have been collected.
    pub min_examples_for_inference: usize,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            min_examples_for_inference: 10,
        }
    }
}

/// Which layer produced a move.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::IsVariant)]
pub enum SelectionSource {
    #[display("win")]
    Win,
    #[display("block")]
    Block,
    #[display("learned (p={probability:.3})")]
    Learned { probability: f32 },
    #[display("heuristic")]
    Heuristic,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub mv: Move,
    pub source: SelectionSource,
}

#[derive(Debug, Clone, Copy)]
pub struct MoveSelector<'a> {
    config: SelectorConfig,
    scorer: MoveScorer<'a>,
}

impl<'a> MoveSelector<'a> {
    #[must_use]
    pub fn new(config: SelectorConfig, model: Option<&'a dyn WinProbabilityModel>) -> Self {
        Self {
            config,
            scorer: MoveScorer::new(model),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Chooses the engine's move on `board`.
    ///
    /// `examples_seen` is the size of the training buffer. Returns `None` only
    /// when the board has no empty cell.
    pub fn select_move<R>(
        &self,
        board: &Board,
        examples_seen: usize,
        rng: &mut R,
    ) -> Option<Selection>
    where
        R: Rng + ?Sized,
    {
        let selection = |mv, source| Some(Selection { mv, source });

        if let Some(mv) = tactical::find_immediate_move(board, Mark::Opponent) {
            return selection(mv, SelectionSource::Win);
        }
        if let Some(mv) = tactical::find_immediate_move(board, Mark::Player) {
            return selection(mv, SelectionSource::Block);
        }

        let empty_cells = board.empty_cells();
        if empty_cells.is_empty() {
            return None;
        }

        if examples_seen > self.config.min_examples_for_inference {
            match self.scorer.select_best(board, &empty_cells) {
                Ok(Some((mv, probability))) => {
                    return selection(mv, SelectionSource::Learned { probability });
                }
                Ok(None) => {}
                Err(e) => debug!("learned scorer unavailable ({e}), using heuristic"),
            }
        }

        let mv = heuristic::select_heuristic(&empty_cells, rng)?;
        selection(mv, SelectionSource::Heuristic)
    }
}
