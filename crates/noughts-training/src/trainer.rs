//! Ingestion of finished games and threshold-triggered refits.

use noughts_engine::{Board, Mark};
use noughts_evaluator::classifier::{FitError, FitParams, LogisticClassifier};
use serde::{Deserialize, Serialize};

use crate::buffer::{TrainingBuffer, TrainingExample};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// A refit happens only when strictly more examples than this are buffered.
    pub min_examples_for_retrain: usize,
    pub fit: FitParams,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            min_examples_for_retrain: 5,
            fit: FitParams::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OnlineTrainer {
    config: TrainerConfig,
    buffer: TrainingBuffer,
}

impl OnlineTrainer {
    #[must_use]
    pub fn new(config: TrainerConfig) -> Self {
        Self {
            config,
            buffer: TrainingBuffer::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    #[must_use]
    pub fn buffer(&self) -> &TrainingBuffer {
        &self.buffer
    }

    /// Records the final board of a finished game; `winner` is `None` for a tie.
    pub fn ingest(&mut self, final_board: &Board, winner: Option<Mark>) {
        self.buffer
            .push(TrainingExample::from_final_board(final_board, winner));
    }

    /// Fits a new classifier on the whole buffer once it is large enough.
    ///
    /// Returns `Ok(None)` below the threshold. The caller decides what to do
    /// with a failed fit; the trainer keeps no classifier of its own.
    pub fn maybe_retrain(&self) -> Result<Option<LogisticClassifier>, FitError> {
        if self.buffer.len() <= self.config.min_examples_for_retrain {
            return Ok(None);
        }
        let examples = self
            .buffer
            .examples()
            .iter()
            .map(|e| (e.features, e.opponent_won));
        LogisticClassifier::fit(examples, &self.config.fit).map(Some)
    }
}
