//! The learning engine as seen by a delivery layer.
//!
//! [`LearningOpponent`] owns every piece of mutable state the engine has: the
//! training buffer, the current classifier, the random generator used for
//! heuristic tie-breaks and the optional model store. One board in, one
//! [`TurnResponse`] out:
//!
//! ```
//! use noughts_engine::Board;
//! use noughts_training::opponent::{LearningOpponent, OpponentConfig, TurnStatus};
//!
//! let mut engine = LearningOpponent::with_seed(OpponentConfig::default(), None, 1);
//! let board: Board = "X........".parse().unwrap();
//! let response = engine.respond(board);
//! assert_eq!(response.status, TurnStatus::Continue);
//! assert_eq!(response.mv.map(|m| m.index()), Some(4));
//! ```

use log::{debug, info, warn};
use noughts_engine::{Board, Mark, Move, Outcome, WinningLine};
use noughts_evaluator::{
    classifier::{FitError, LogisticClassifier, WinProbabilityModel},
    move_selector::{MoveSelector, Selection, SelectionSource, SelectorConfig},
};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::{
    model_store::{ModelStore, PersistedModel},
    trainer::{OnlineTrainer, TrainerConfig},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OpponentConfig {
    pub selector: SelectorConfig,
    pub trainer: TrainerConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum TurnStatus {
    Continue,
    GameOver,
}

/// Result of a finished game as reported on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum Winner {
    #[display("X")]
    #[serde(rename = "X")]
    Player,
    #[display("O")]
    #[serde(rename = "O")]
    Opponent,
    #[display("tie")]
    #[serde(rename = "tie")]
    Tie,
}

impl Winner {
    #[must_use]
    pub fn from_outcome(outcome: Outcome) -> Option<Self> {
        match outcome {
            Outcome::Ongoing => None,
            Outcome::Win {
                mark: Mark::Player, ..
            } => Some(Winner::Player),
            Outcome::Win {
                mark: Mark::Opponent,
                ..
            } => Some(Winner::Opponent),
            Outcome::Tie => Some(Winner::Tie),
        }
    }
}

/// Reply to one move request.
///
/// Serializes as `{"status", "move", "winner", "winning_combo"}`; the resulting
/// board and the provenance of the move are kept for local callers only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnResponse {
    pub status: TurnStatus,
    #[serde(rename = "move")]
    pub mv: Option<Move>,
    pub winner: Option<Winner>,
    pub winning_combo: Option<WinningLine>,
    #[serde(skip)]
    pub board: Board,
    #[serde(skip)]
    pub source: Option<SelectionSource>,
}

impl TurnResponse {
    fn new(board: Board, selection: Option<Selection>, outcome: Outcome) -> Self {
        Self {
            status: if outcome.is_terminal() {
                TurnStatus::GameOver
            } else {
                TurnStatus::Continue
            },
            mv: selection.map(|s| s.mv),
            winner: Winner::from_outcome(outcome),
            winning_combo: outcome.winning_line(),
            board,
            source: selection.map(|s| s.source),
        }
    }
}

/// What happened to the model after a game was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum RetrainStatus {
    /// Not enough examples yet.
    BelowThreshold,
    /// A new classifier is in use; `persisted` tells whether it reached disk.
    Retrained { persisted: bool },
    /// The fit failed and the previous classifier (if any) is still in use.
    FitFailed(FitError),
}

#[derive(Debug)]
pub struct LearningOpponent {
    selector_config: SelectorConfig,
    trainer: OnlineTrainer,
    classifier: Option<LogisticClassifier>,
    store: Option<ModelStore>,
    save_models: bool,
    rng: Pcg32,
}

impl LearningOpponent {
    /// Creates an engine with an OS-seeded random generator.
    ///
    /// If `store` is given, a previously saved classifier is loaded from it.
    #[must_use]
    pub fn new(config: OpponentConfig, store: Option<ModelStore>) -> Self {
        Self::with_seed(config, store, rand::rng().random())
    }

    /// Like [`Self::new`], but heuristic choices are reproducible.
    #[must_use]
    pub fn with_seed(config: OpponentConfig, store: Option<ModelStore>, seed: u64) -> Self {
        let classifier = store.as_ref().and_then(load_classifier);
        Self {
            selector_config: config.selector,
            trainer: OnlineTrainer::new(config.trainer),
            classifier,
            store,
            save_models: true,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Keeps the model loaded from the store but never writes it back.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.save_models = false;
        self
    }

    #[must_use]
    pub fn classifier(&self) -> Option<&LogisticClassifier> {
        self.classifier.as_ref()
    }

    #[must_use]
    pub fn examples_seen(&self) -> usize {
        self.trainer.buffer().len()
    }

    #[must_use]
    pub fn trainer(&self) -> &OnlineTrainer {
        &self.trainer
    }

    #[must_use]
    pub fn store(&self) -> Option<&ModelStore> {
        self.store.as_ref()
    }

    /// Chooses a move for `O`; `None` when the board is full.
    pub fn select_move(&mut self, board: &Board) -> Option<Selection> {
        let model = self
            .classifier
            .as_ref()
            .map(|c| c as &dyn WinProbabilityModel);
        let selection = MoveSelector::new(self.selector_config, model).select_move(
            board,
            self.trainer.buffer().len(),
            &mut self.rng,
        );
        if let Some(s) = selection {
            debug!("selected cell {} ({})", s.mv, s.source);
        }
        selection
    }

    /// Handles one request: `board` is the position after `X`'s move.
    ///
    /// A board that is already decided is answered with `game_over` and
    /// recorded only if it is a win; a tie that arrives finished is not
    /// learned from. Otherwise `O` moves, and a game ended by that move is
    /// recorded whether it is a win or a tie.
    pub fn respond(&mut self, board: Board) -> TurnResponse {
        let outcome = board.outcome();
        if outcome.is_terminal() {
            if let Some(winner) = outcome.winner() {
                self.record_game(&board, Some(winner));
            }
            return TurnResponse::new(board, None, outcome);
        }

        let Some(selection) = self.select_move(&board) else {
            return TurnResponse::new(board, None, Outcome::Tie);
        };
        let board = board.with_mark(selection.mv, Mark::Opponent);
        let outcome = board.outcome();
        if outcome.is_terminal() {
            self.record_game(&board, outcome.winner());
        }
        TurnResponse::new(board, Some(selection), outcome)
    }

    /// Adds a finished game to the buffer and refits when due.
    ///
    /// `winner` is `None` for a tie.
    pub fn record_game(&mut self, final_board: &Board, winner: Option<Mark>) -> RetrainStatus {
        self.trainer.ingest(final_board, winner);
        match self.trainer.maybe_retrain() {
            Ok(None) => RetrainStatus::BelowThreshold,
            Ok(Some(classifier)) => {
                info!(
                    "retrained on {} examples ({} O wins)",
                    self.trainer.buffer().len(),
                    self.trainer.buffer().opponent_wins()
                );
                self.classifier = Some(classifier);
                let persisted = self.persist();
                RetrainStatus::Retrained { persisted }
            }
            Err(e) => {
                warn!("retraining skipped, keeping previous model: {e}");
                RetrainStatus::FitFailed(e)
            }
        }
    }

    /// Writes the installed classifier to the store, if saving is enabled.
    fn persist(&self) -> bool {
        let (Some(store), Some(classifier)) = (&self.store, &self.classifier) else {
            return false;
        };
        if !self.save_models {
            debug!("read-only, not saving model to {}", store.path().display());
            return false;
        }
        let model = PersistedModel::new(classifier.clone(), self.trainer.buffer().len());
        match store.save(&model) {
            Ok(()) => {
                info!("saved model to {}", store.path().display());
                true
            }
            Err(e) => {
                warn!("model kept in memory only: {e}");
                false
            }
        }
    }
}

fn load_classifier(store: &ModelStore) -> Option<LogisticClassifier> {
    match store.load() {
        Ok(Some(model)) => {
            info!(
                "loaded model {:?} trained at {} on {} examples",
                model.name, model.trained_at, model.example_count
            );
            Some(model.classifier)
        }
        Ok(None) => {
            info!(
                "no model at {}, starting untrained",
                store.path().display()
            );
            None
        }
        Err(e) => {
            warn!("starting untrained: {e}");
            None
        }
    }
}
