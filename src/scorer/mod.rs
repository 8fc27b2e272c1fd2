//! Antecedent scoring.
//!
//! Picking a pronoun's antecedent is a multi-way choice approximated as
//! independent binary scores plus an argmax:
//!
//! 1. [`CandidateFinder`] lists the closest eligible preceding mentions.
//! 2. [`candidate_features`] describes each candidate relative to the pronoun.
//! 3. An [`AntecedentScorer`] gives each candidate a probability.
//! 4. [`best_candidate`] takes the most probable one, if it clears a threshold.
//!
//! The scorer is a trait so resolution can be tested with fixed scores.

pub mod candidates;
pub mod features;

pub use candidates::{mention_in_quote, CandidateFinder};
pub use features::{candidate_features, FeatureSet, FeatureValue};

/// Gives each candidate the probability that it is the antecedent.
pub trait AntecedentScorer: Send + Sync {
    /// One probability per feature set, in the same order.
    fn score(&self, candidates: &[FeatureSet]) -> Vec<f64>;
}

/// Index and probability of the most probable candidate.
///
/// The first index wins ties, so with candidates listed closest first the
/// most recent mention is preferred. Returns `None` when there are no
/// probabilities or the best is below `threshold`.
///
/// ```rust
/// use attrib::scorer::best_candidate;
///
/// assert_eq!(best_candidate(&[0.4, 0.7, 0.7], 0.1), Some((1, 0.7)));
/// assert_eq!(best_candidate(&[0.05, 0.02], 0.1), None);
/// assert_eq!(best_candidate(&[], 0.1), None);
/// ```
#[must_use]
pub fn best_candidate(probabilities: &[f64], threshold: f64) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &p) in probabilities.iter().enumerate() {
        if p.is_nan() {
            continue;
        }
        if best.map_or(true, |(_, b)| p > b) {
            best = Some((i, p));
        }
    }
    best.filter(|&(_, p)| p >= threshold)
}

/// Scorer giving every candidate the same probability.
///
/// With first-wins ties this always picks the closest candidate.
#[derive(Debug, Clone, Copy)]
pub struct ConstantScorer(pub f64);

impl AntecedentScorer for ConstantScorer {
    fn score(&self, candidates: &[FeatureSet]) -> Vec<f64> {
        vec![self.0; candidates.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_candidate_first_wins_ties() {
        assert_eq!(best_candidate(&[0.5, 0.5], 0.1), Some((0, 0.5)));
    }

    #[test]
    fn test_best_candidate_threshold_inclusive() {
        assert_eq!(best_candidate(&[0.1], 0.1), Some((0, 0.1)));
        assert_eq!(best_candidate(&[0.099], 0.1), None);
    }

    #[test]
    fn test_best_candidate_ignores_nan() {
        assert_eq!(best_candidate(&[f64::NAN, 0.3], 0.1), Some((1, 0.3)));
    }

    #[test]
    fn test_constant_scorer() {
        let scores = ConstantScorer(0.5).score(&[FeatureSet::new(), FeatureSet::new()]);
        assert_eq!(scores, vec![0.5, 0.5]);
    }
}
