//! Move selection for the engine's side (`O`).
//!
//! Selection is layered, and each layer only runs when the one above it has
//! nothing to say:
//!
//! ```text
//! Tactical win   (tactical::find_immediate_move with O)
//!     ↓ none
//! Tactical block (tactical::find_immediate_move with X)
//!     ↓ none
//! Learned score  (move_scorer::MoveScorer, only once enough games were seen)
//!     ↓ unavailable / under-trained
//! Heuristic      (heuristic::select_heuristic: center > corner > edge)
//! ```
//!
//! [`move_selector::MoveSelector`] runs this chain. The learned layer scores a
//! candidate by placing `O` on it, encoding the resulting board with
//! [`feature::encode`], and asking a [`classifier::WinProbabilityModel`] for
//! the probability that `O` goes on to win.
//!
//! The same encoder is used when the classifier is trained (see the
//! `noughts-training` crate), so a model fitted on one encoding is never
//! queried with another.
//!
//! # Example
//!
//! ```
//! use noughts_engine::{Board, Move};
//! use noughts_evaluator::move_selector::{MoveSelector, SelectionSource, SelectorConfig};
//! use rand::SeedableRng as _;
//!
//! let selector = MoveSelector::new(SelectorConfig::default(), None);
//! let mut rng = rand::rngs::StdRng::seed_from_u64(0);
//!
//! let board: Board = "OO./.X./...".parse().unwrap();
//! let selection = selector.select_move(&board, 0, &mut rng).unwrap();
//! assert_eq!(selection.mv, Move::new(2).unwrap());
//! assert_eq!(selection.source, SelectionSource::Win);
//! ```

pub mod classifier;
pub mod feature;
pub mod heuristic;
pub mod move_scorer;
pub mod move_selector;
pub mod tactical;
