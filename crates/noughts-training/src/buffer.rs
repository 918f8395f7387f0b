use noughts_engine::{Board, Mark};
use noughts_evaluator::feature::{self, FeatureVector};
use serde::{Deserialize, Serialize};

/// A finished game reduced to classifier input and label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub features: FeatureVector,
    /// `true` when `O` won the game.
    pub opponent_won: bool,
}

impl TrainingExample {
    /// `winner` is `None` for a tie, which is labelled like an `X` win.
    #[must_use]
    pub fn from_final_board(board: &Board, winner: Option<Mark>) -> Self {
        Self {
            features: feature::encode(board),
            opponent_won: winner == Some(Mark::Opponent),
        }
    }
}

/// Append-only list of examples, in the order games finished.
#[derive(Debug, Clone, Default)]
pub struct TrainingBuffer {
    examples: Vec<TrainingExample>,
}

impl TrainingBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, example: TrainingExample) {
        self.examples.push(example);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    #[must_use]
    pub fn examples(&self) -> &[TrainingExample] {
        &self.examples
    }

    /// Count of examples labelled as `O` wins.
    #[must_use]
    pub fn opponent_wins(&self) -> usize {
        self.examples.iter().filter(|e| e.opponent_won).count()
    }
}
