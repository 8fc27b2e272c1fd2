//! Resolver and training configuration.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```toml
//! [resolver]
//! probability_threshold = 0.2
//!
//! [training]
//! epochs = 500
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

// =============================================================================
// Resolver
// =============================================================================

/// Configuration for pronoun resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Minimum antecedent probability; below it a pronoun stays unresolved.
    pub probability_threshold: f64,
    /// Candidates scored per pronoun at inference time.
    pub inference_candidates: usize,
    /// Candidates per pronoun when building training examples.
    pub training_candidates: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            probability_threshold: 0.1,
            inference_candidates: 2,
            training_candidates: 5,
        }
    }
}

impl ResolverConfig {
    /// Set the probability threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.probability_threshold = threshold;
        self
    }

    /// Set the number of inference candidates.
    #[must_use]
    pub fn with_inference_candidates(mut self, n: usize) -> Self {
        self.inference_candidates = n;
        self
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.probability_threshold) {
            return Err(Error::config(format!(
                "probability_threshold must be in [0, 1], got {}",
                self.probability_threshold
            )));
        }
        if self.inference_candidates == 0 || self.training_candidates == 0 {
            return Err(Error::config("candidate counts must be at least 1"));
        }
        Ok(())
    }
}

// =============================================================================
// Training
// =============================================================================

/// Configuration for fitting the antecedent classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Full-batch gradient descent iterations.
    pub epochs: usize,
    /// Step size.
    pub learning_rate: f64,
    /// Inverse regularization strength, as in liblinear's `C`.
    pub l2: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: 300,
            learning_rate: 0.5,
            l2: 1.0,
        }
    }
}

impl TrainingConfig {
    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            return Err(Error::config("epochs must be at least 1"));
        }
        if self.learning_rate <= 0.0 || !self.learning_rate.is_finite() {
            return Err(Error::config(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if self.l2 <= 0.0 || !self.l2.is_finite() {
            return Err(Error::config(format!("l2 must be positive, got {}", self.l2)));
        }
        Ok(())
    }
}

// =============================================================================
// File
// =============================================================================

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Resolution settings
    pub resolver: ResolverConfig,
    /// Training settings
    pub training: TrainingConfig,
}

impl Config {
    /// Parse and validate a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(s).map_err(|e| Error::config(format!("invalid TOML: {}", e)))?;
        config.resolver.validate()?;
        config.training.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::config(format!("cannot serialize: {}", e)))
    }
}
