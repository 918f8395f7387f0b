//! Learned move scoring.
//!
//! For every candidate cell the scorer builds the board that would result from
//! `O` playing there, encodes it, and asks the model for `P(O wins)`. The best
//! candidate is the first one (in candidate order) with the highest score, so
//! the choice is stable for a given model.

use arrayvec::ArrayVec;
use noughts_engine::{Board, Mark, Move};

use crate::{classifier::WinProbabilityModel, feature};

/// Why the learned scorer could not produce scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ScorerUnavailable {
    #[display("no trained model")]
    Untrained,
    #[display("model returned a non-finite score for cell {_0}")]
    NonFiniteScore(#[error(not(source))] Move),
}

/// Win probability per candidate move, kept in candidate order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoveScores {
    scores: ArrayVec<(Move, f32), { Board::CELLS }>,
}

impl MoveScores {
    pub fn iter(&self) -> impl Iterator<Item = (Move, f32)> + '_ {
        self.scores.iter().copied()
    }

    #[must_use]
    pub fn get(&self, mv: Move) -> Option<f32> {
        self.iter().find(|(m, _)| *m == mv).map(|(_, p)| p)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Returns the highest-scoring move; the earliest candidate wins ties.
    #[must_use]
    pub fn select_best(&self) -> Option<(Move, f32)> {
        let mut best: Option<(Move, f32)> = None;
        for (mv, p) in self.iter() {
            if best.is_none_or(|(_, best_p)| p > best_p) {
                best = Some((mv, p));
            }
        }
        best
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MoveScorer<'a> {
    model: Option<&'a dyn WinProbabilityModel>,
}

impl<'a> MoveScorer<'a> {
    /// Creates a scorer; `None` means no model has been fitted yet.
    #[must_use]
    pub fn new(model: Option<&'a dyn WinProbabilityModel>) -> Self {
        Self { model }
    }

    #[must_use]
    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    /// Scores each candidate by the probability that `O` wins after playing it.
    ///
    /// Candidates are expected to be empty cells of `board`.
    pub fn score_moves(
        &self,
        board: &Board,
        candidates: &[Move],
    ) -> Result<MoveScores, ScorerUnavailable> {
        let model = self.model.ok_or(ScorerUnavailable::Untrained)?;
        let mut scores = MoveScores::default();
        for &mv in candidates {
            let features = feature::encode(&board.with_mark(mv, Mark::Opponent));
            let p = model.win_probability(&features);
            if !p.is_finite() {
                return Err(ScorerUnavailable::NonFiniteScore(mv));
            }
            scores.scores.push((mv, p));
        }
        Ok(scores)
    }

    /// Scores `candidates` and returns the best one with its probability.
    pub fn select_best(
        &self,
        board: &Board,
        candidates: &[Move],
    ) -> Result<Option<(Move, f32)>, ScorerUnavailable> {
        Ok(self.score_moves(board, candidates)?.select_best())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{classifier::LogisticClassifier, feature::FeatureVector};

    /// Scores a board by how many `O`s sit on the listed cells.
    #[derive(Debug)]
    pub(crate) struct FavorCells(pub(crate) Vec<usize>);

    impl WinProbabilityModel for FavorCells {
        fn win_probability(&self, features: &FeatureVector) -> f32 {
            self.0
                .iter()
                .filter(|i| features.values()[**i] < 0.0)
                .fold(0.0, |p, _| p + 0.1)
        }
    }

    #[derive(Debug)]
    pub(crate) struct Broken;

    impl WinProbabilityModel for Broken {
        fn win_probability(&self, _: &FeatureVector) -> f32 {
            f32::NAN
        }
    }

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_untrained_is_unavailable() {
        let scorer = MoveScorer::new(None);
        let b = Board::new();
        assert_eq!(
            scorer.score_moves(&b, &b.empty_cells()),
            Err(ScorerUnavailable::Untrained)
        );
    }

    #[test]
    fn test_non_finite_score_is_unavailable() {
        let model = Broken;
        let scorer = MoveScorer::new(Some(&model));
        let b = board("X........");
        assert_eq!(
            scorer.select_best(&b, &b.empty_cells()),
            Err(ScorerUnavailable::NonFiniteScore(Move::new(1).unwrap()))
        );
    }

    #[test]
    fn test_scores_every_candidate_with_o_placed() {
        let model = FavorCells(vec![7]);
        let scorer = MoveScorer::new(Some(&model));
        let b = board("X../.O./...");
        let scores = scorer.score_moves(&b, &b.empty_cells()).unwrap();
        assert_eq!(scores.len(), 7);
        for (mv, p) in scores.iter() {
            let expected = if mv.index() == 7 { 0.1 } else { 0.0 };
            assert!((p - expected).abs() < f32::EPSILON, "{mv}: {p}");
        }
        assert_eq!(scores.select_best(), Some((Move::new(7).unwrap(), 0.1)));
    }

    #[test]
    fn test_ties_go_to_first_candidate() {
        // Every candidate scores the same.
        let model = LogisticClassifier::from_parts([0.0; FeatureVector::LEN], 0.3);
        let scorer = MoveScorer::new(Some(&model));
        let b = board("XO.......");
        let (mv, _) = scorer.select_best(&b, &b.empty_cells()).unwrap().unwrap();
        assert_eq!(mv.index(), 2);
    }

    #[test]
    fn test_no_candidates_no_best() {
        let model = FavorCells(vec![]);
        let scorer = MoveScorer::new(Some(&model));
        assert_eq!(scorer.select_best(&Board::new(), &[]), Ok(None));
    }
}
