//! Online learning for the engine's move scorer.
//!
//! The engine improves by watching games end. Each finished game contributes one
//! example: the final board, labelled by whether `O` won. `X` wins and draws are
//! both negative examples. Once the buffer holds
//! enough examples the classifier is refitted from scratch on everything seen so
//! far and written to disk.
//!
//! # Architecture
//!
//! ```text
//! LearningOpponent (owns all mutable learning state)
//!     ├─ MoveSelector (noughts-evaluator) ← current classifier, buffer size, rng
//!     ├─ OnlineTrainer
//!     │     └─ TrainingBuffer (append-only)
//!     └─ ModelStore (JSON file, optional)
//! ```
//!
//! [`opponent::LearningOpponent`] is the single writer: the buffer append and
//! the classifier swap both go through `&mut self`, so a caller serving several
//! threads wraps it in one `Mutex` and can never observe a half-finished refit.
//!
//! # Failure policy
//!
//! Nothing here aborts a turn. A fit that fails leaves the previous classifier in
//! place; a save that fails leaves the in-memory classifier in use for the rest
//! of the process; a model file that cannot be read means a cold start. All of
//! these are logged through [`log`].
//!
//! # Current Limitations
//!
//! - **Final boards only**: intermediate positions of a game are not used as
//!   examples, so one game yields one example.
//! - **Only engine-made draws are learned**: a draw completed by `O`'s reply is
//!   recorded, but a board that is already drawn when it arrives is not, so in
//!   games where `X` opens (and therefore fills the last cell) draws are never
//!   learned.
//! - **Full refit**: every retrain walks the whole buffer, and the buffer is
//!   never pruned, so cost and memory grow linearly with the number of games
//!   played in the process.
//! - **Buffer is not persisted**: after a restart the loaded classifier waits
//!   until enough new games have been seen before it is consulted.

pub mod buffer;
pub mod model_store;
pub mod opponent;
pub mod self_play;
pub mod trainer;
