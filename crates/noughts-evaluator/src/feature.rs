//! Board → classifier input.

use noughts_engine::{Board, Mark};
use serde::{Deserialize, Serialize};

/// One value per cell: `X` → `+1`, `O` → `-1`, empty → `0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector([f32; FeatureVector::LEN]);

impl FeatureVector {
    pub const LEN: usize = Board::CELLS;

    #[must_use]
    pub fn from_values(values: [f32; Self::LEN]) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn values(&self) -> &[f32; Self::LEN] {
        &self.0
    }
}

/// Encodes `board`.
///
/// Used for both inference and training; the two must never diverge.
#[must_use]
pub fn encode(board: &Board) -> FeatureVector {
    FeatureVector(board.cells().map(|cell| match cell {
        Some(Mark::Player) => 1.0,
        Some(Mark::Opponent) => -1.0,
        None => 0.0,
    }))
}
