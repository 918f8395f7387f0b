//! Positional fallback used when no learned preference is available.
//!
//! Preference order: center, then a random empty corner, then a random empty
//! edge. Ties inside a class are broken by the caller's random generator so
//! that seeded runs are reproducible.

use arrayvec::ArrayVec;
use noughts_engine::Move;
use rand::{Rng, seq::IndexedRandom as _};

/// Picks a move from `empty_cells` by positional preference.
///
/// Returns `None` only when `empty_cells` is empty.
pub fn select_heuristic<R>(empty_cells: &[Move], rng: &mut R) -> Option<Move>
where
    R: Rng + ?Sized,
{
    if empty_cells.contains(&Move::CENTER) {
        return Some(Move::CENTER);
    }
    for class in [Move::CORNERS, Move::EDGES] {
        let available = class
            .into_iter()
            .filter(|mv| empty_cells.contains(mv))
            .collect::<ArrayVec<Move, 4>>();
        if let Some(mv) = available.choose(rng) {
            return Some(*mv);
        }
    }
    empty_cells.choose(rng).copied()
}
