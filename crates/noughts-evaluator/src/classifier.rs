//! Probabilistic binary classifier over encoded boards.
//!
//! The model answers one question: given a board (usually the board right
//! after a hypothetical `O` move), how likely is it that `O` ends up winning?
//!
//! # Model
//!
//! [`LogisticClassifier`] is L2-regularised logistic regression:
//!
//! ```text
//! P(O wins | x) = σ(w·x + b),   σ(z) = 1 / (1 + e^(-z))
//! ```
//!
//! with one weight per cell. It is small enough to refit from scratch on every
//! retrain and its parameters serialize to a short JSON document.
//!
//! # Fitting
//!
//! [`LogisticClassifier::fit`] runs full-batch gradient descent from all-zero
//! parameters for a fixed number of epochs. There is no sampling, so the same
//! examples always produce the same parameters.
//!
//! Fitting refuses data it cannot learn from: an empty set, or a set where every
//! label is the same (there is no decision boundary to find).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::feature::FeatureVector;

/// Anything that can estimate the probability that `O` wins from a board encoding.
///
/// [`MoveScorer`](crate::move_scorer::MoveScorer) only depends on this trait, so
/// callers may plug in a different model without touching move selection.
pub trait WinProbabilityModel: fmt::Debug + Send + Sync {
    /// Returns `P(O wins)`; a non-finite value means the model could not answer.
    fn win_probability(&self, features: &FeatureVector) -> f32;
}

/// Hyper-parameters for [`LogisticClassifier::fit`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitParams {
    /// Gradient descent step size
    pub learning_rate: f32,
    /// Number of full passes over the training set
    pub epochs: usize,
    /// L2 penalty on the weights (the bias is not penalised)
    pub l2: f32,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            learning_rate: 0.5,
            epochs: 500,
            l2: 1e-3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum FitError {
    #[display("no training examples")]
    Empty,
    #[display("all {count} training examples share the label {label}")]
    SingleClass { count: usize, label: bool },
    #[display("parameters diverged to a non-finite value")]
    NonFinite,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticClassifier {
    weights: [f32; FeatureVector::LEN],
    bias: f32,
}

impl LogisticClassifier {
    #[must_use]
    pub fn from_parts(weights: [f32; FeatureVector::LEN], bias: f32) -> Self {
        Self { weights, bias }
    }

    #[must_use]
    pub fn weights(&self) -> &[f32; FeatureVector::LEN] {
        &self.weights
    }

    #[must_use]
    pub fn bias(&self) -> f32 {
        self.bias
    }

    #[must_use]
    pub fn logit(&self, features: &FeatureVector) -> f32 {
        self.weights
            .iter()
            .zip(features.values())
            .map(|(w, x)| w * x)
            .sum::<f32>()
            + self.bias
    }

    #[must_use]
    pub fn predict_proba(&self, features: &FeatureVector) -> f32 {
        sigmoid(self.logit(features))
    }

    /// Fits a fresh classifier on `(features, label)` pairs, `true` meaning `O` won.
    pub fn fit<I>(examples: I, params: &FitParams) -> Result<Self, FitError>
    where
        I: IntoIterator<Item = (FeatureVector, bool)>,
    {
        let examples = examples.into_iter().collect::<Vec<_>>();
        let Some((_, first_label)) = examples.first() else {
            return Err(FitError::Empty);
        };
        if examples.iter().all(|(_, label)| label == first_label) {
            return Err(FitError::SingleClass {
                count: examples.len(),
                label: *first_label,
            });
        }

        #[expect(clippy::cast_precision_loss)]
        let n = examples.len() as f32;
        let mut model = Self::from_parts([0.0; FeatureVector::LEN], 0.0);
        for _ in 0..params.epochs {
            let mut grad_w = [0.0; FeatureVector::LEN];
            let mut grad_b = 0.0;
            for (features, label) in &examples {
                let target = if *label { 1.0 } else { 0.0 };
                let error = model.predict_proba(features) - target;
                for (g, x) in grad_w.iter_mut().zip(features.values()) {
                    *g += error * x;
                }
                grad_b += error;
            }
            for (w, g) in model.weights.iter_mut().zip(grad_w) {
                *w -= params.learning_rate * (g / n + params.l2 * *w);
            }
            model.bias -= params.learning_rate * grad_b / n;
        }

        if !model.is_finite() {
            return Err(FitError::NonFinite);
        }
        Ok(model)
    }

    fn is_finite(&self) -> bool {
        self.bias.is_finite() && self.weights.iter().all(|w| w.is_finite())
    }
}

impl WinProbabilityModel for LogisticClassifier {
    fn win_probability(&self, features: &FeatureVector) -> f32 {
        self.predict_proba(features)
    }
}

fn sigmoid(z: f32) -> f32 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use noughts_engine::Board;

    use super::*;
    use crate::feature::encode;

    fn features(s: &str) -> FeatureVector {
        encode(&s.parse::<Board>().unwrap())
    }

    /// Each `O` win paired with its colour-swapped `X` win.
    fn mirrored_games() -> Vec<(FeatureVector, bool)> {
        ["OOO/XX./X..", "O.X/OX./O..", "X.O/XO./O.X"]
            .into_iter()
            .flat_map(|s| {
                let swapped = s
                    .chars()
                    .map(|c| match c {
                        'X' => 'O',
                        'O' => 'X',
                        c => c,
                    })
                    .collect::<String>();
                [(features(s), true), (features(&swapped), false)]
            })
            .collect()
    }

    #[test]
    fn test_fit_rejects_unlearnable_data() {
        let params = FitParams::default();
        assert_eq!(
            LogisticClassifier::fit(Vec::new(), &params),
            Err(FitError::Empty)
        );
        let one_class = [(features("OOO/XX./X.."), true), (features("O.X/OX./O.."), true)];
        assert_eq!(
            LogisticClassifier::fit(one_class, &params),
            Err(FitError::SingleClass {
                count: 2,
                label: true
            })
        );
    }

    #[test]
    fn test_fit_learns_label_direction() {
        let model = LogisticClassifier::fit(mirrored_games(), &FitParams::default()).unwrap();
        let neutral = model.predict_proba(&features("........."));
        for (x, label) in mirrored_games() {
            let p = model.predict_proba(&x);
            if label {
                assert!(p > neutral, "{p} <= {neutral}");
            } else {
                assert!(p < neutral, "{p} >= {neutral}");
            }
        }
    }

    #[test]
    fn test_fit_is_deterministic() {
        let params = FitParams::default();
        let a = LogisticClassifier::fit(mirrored_games(), &params).unwrap();
        let b = LogisticClassifier::fit(mirrored_games(), &params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fit_reports_divergence() {
        let params = FitParams {
            learning_rate: f32::INFINITY,
            ..FitParams::default()
        };
        assert_eq!(
            LogisticClassifier::fit(mirrored_games(), &params),
            Err(FitError::NonFinite)
        );
    }

    #[test]
    fn test_untrained_parameters_are_neutral() {
        let model = LogisticClassifier::from_parts([0.0; FeatureVector::LEN], 0.0);
        assert!((model.predict_proba(&features("X...O....")) - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_serde_roundtrip_preserves_scores() {
        let model = LogisticClassifier::fit(mirrored_games(), &FitParams::default()).unwrap();
        let json = serde_json::to_string(&model).unwrap();
        let restored: LogisticClassifier = serde_json::from_str(&json).unwrap();
        let x = features("X.O/.X./...");
        assert_eq!(model.predict_proba(&x).to_bits(), restored.predict_proba(&x).to_bits());
    }
}
