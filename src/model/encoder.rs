//! Dictionary feature encoder.
//!
//! Maps named features to sparse numeric vectors. Categorical features get
//! one column per `name=value` pair seen in training; binary features get
//! one column holding 0 or 1. Columns are numbered in sorted order, so the
//! same training data always yields the same encoder.

use crate::scorer::{FeatureSet, FeatureValue};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Sparse vector: `(column, value)` pairs sorted by column, zeros omitted.
pub type SparseVector = Vec<(usize, f64)>;

/// Vocabulary of feature columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureEncoder {
    vocabulary: BTreeMap<String, usize>,
}

fn column_name(name: &str, value: &FeatureValue) -> String {
    match value {
        FeatureValue::Text(v) => format!("{}={}", name, v),
        FeatureValue::Flag(_) => name.to_string(),
    }
}

impl FeatureEncoder {
    /// Build the vocabulary from training feature sets.
    #[must_use]
    pub fn fit(samples: &[FeatureSet]) -> Self {
        let columns: BTreeSet<String> = samples
            .iter()
            .flat_map(|s| s.iter().map(|(name, value)| column_name(name, value)))
            .collect();
        let vocabulary = columns
            .into_iter()
            .enumerate()
            .map(|(i, c)| (c, i))
            .collect();
        Self { vocabulary }
    }

    /// Number of columns.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.vocabulary.len()
    }

    /// Column of a `name` or `name=value` key.
    #[must_use]
    pub fn column(&self, key: &str) -> Option<usize> {
        self.vocabulary.get(key).copied()
    }

    /// Encode one feature set. Features not seen in training are dropped.
    #[must_use]
    pub fn transform(&self, features: &FeatureSet) -> SparseVector {
        let mut vector: SparseVector = features
            .iter()
            .filter_map(|(name, value)| {
                let column = self.vocabulary.get(&column_name(name, value))?;
                let x = match value {
                    FeatureValue::Text(_) => 1.0,
                    FeatureValue::Flag(true) => 1.0,
                    FeatureValue::Flag(false) => 0.0,
                };
                (x != 0.0).then_some((*column, x))
            })
            .collect();
        vector.sort_by_key(|&(c, _)| c);
        vector
    }

    /// Encode many feature sets.
    #[must_use]
    pub fn transform_all(&self, samples: &[FeatureSet]) -> Vec<SparseVector> {
        samples.iter().map(|s| self.transform(s)).collect()
    }
}
