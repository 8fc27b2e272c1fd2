//! L2-regularised binary logistic regression.
//!
//! Fit by full-batch gradient descent on
//! `mean(log loss) + |w|^2 / (2 * C * n)`, the liblinear objective divided
//! by `C * n`. The intercept is not regularised.

use super::encoder::SparseVector;
use crate::config::TrainingConfig;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Trained weights.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    weights: Vec<f64>,
    intercept: f64,
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

impl LogisticRegression {
    /// Fit on encoded samples with labels.
    ///
    /// Both classes must be present: a single-class training set cannot
    /// separate antecedents from non-antecedents.
    pub fn fit(
        samples: &[SparseVector],
        labels: &[bool],
        dim: usize,
        config: &TrainingConfig,
    ) -> Result<Self> {
        if samples.len() != labels.len() {
            return Err(Error::invalid_input(format!(
                "{} samples but {} labels",
                samples.len(),
                labels.len()
            )));
        }
        if samples.is_empty() {
            return Err(Error::training("no training examples"));
        }
        let positives = labels.iter().filter(|&&l| l).count();
        if positives == 0 || positives == labels.len() {
            return Err(Error::training(format!(
                "need both classes, got {} positive of {}",
                positives,
                labels.len()
            )));
        }
        if samples.iter().flatten().any(|&(c, _)| c >= dim) {
            return Err(Error::invalid_input("feature column out of range"));
        }
        config.validate()?;

        let n = samples.len() as f64;
        let penalty = 1.0 / (config.l2 * n);
        let mut model = Self {
            weights: vec![0.0; dim],
            intercept: 0.0,
        };
        let mut grad = vec![0.0; dim];

        for epoch in 0..config.epochs {
            grad.iter_mut().for_each(|g| *g = 0.0);
            let mut grad_b = 0.0;
            let mut loss = 0.0;
            for (x, &y) in samples.iter().zip(labels) {
                let p = model.predict_proba(x);
                let target = if y { 1.0 } else { 0.0 };
                let err = p - target;
                for &(c, v) in x {
                    grad[c] += err * v;
                }
                grad_b += err;
                loss -= if y { p.max(1e-12).ln() } else { (1.0 - p).max(1e-12).ln() };
            }
            for (w, g) in model.weights.iter_mut().zip(&grad) {
                *w -= config.learning_rate * (g / n + penalty * *w);
            }
            model.intercept -= config.learning_rate * grad_b / n;

            if epoch % 100 == 0 {
                log::debug!("epoch {}: mean log loss {:.4}", epoch, loss / n);
            }
        }
        Ok(model)
    }

    /// Probability of the positive class.
    #[must_use]
    pub fn predict_proba(&self, x: &SparseVector) -> f64 {
        let z: f64 = x
            .iter()
            .filter_map(|&(c, v)| self.weights.get(c).map(|w| w * v))
            .sum::<f64>()
            + self.intercept;
        sigmoid(z)
    }

    /// Number of weights.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.weights.len()
    }

    /// Weight of a column.
    #[must_use]
    pub fn weight(&self, column: usize) -> Option<f64> {
        self.weights.get(column).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separable_data() {
        let samples = vec![vec![(0, 1.0)], vec![(1, 1.0)], vec![(0, 1.0)], vec![(1, 1.0)]];
        let labels = vec![true, false, true, false];
        let model =
            LogisticRegression::fit(&samples, &labels, 2, &TrainingConfig::default()).unwrap();
        assert!(model.predict_proba(&vec![(0, 1.0)]) > 0.6);
        assert!(model.predict_proba(&vec![(1, 1.0)]) < 0.4);
        assert!(model.weight(0).unwrap() > model.weight(1).unwrap());
    }

    #[test]
    fn test_single_class_rejected() {
        let samples = vec![vec![(0, 1.0)]];
        let err = LogisticRegression::fit(&samples, &[true], 1, &TrainingConfig::default());
        assert!(matches!(err, Err(Error::Training(_))));
    }

    #[test]
    fn test_empty_rejected() {
        let err = LogisticRegression::fit(&[], &[], 0, &TrainingConfig::default());
        assert!(err.is_err());
    }

    #[test]
    fn test_sigmoid_is_stable() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(1000.0) <= 1.0);
        assert!(sigmoid(-1000.0) >= 0.0);
    }

    #[test]
    fn test_unknown_columns_ignored() {
        let model = LogisticRegression::default();
        assert_eq!(model.predict_proba(&vec![(5, 1.0)]), 0.5);
    }
}
