//! The persisted model bundle.

use super::encoder::FeatureEncoder;
use super::logistic::LogisticRegression;
use crate::gender::{ForenameGender, ForenameGenderClassifier};
use crate::scorer::{AntecedentScorer, FeatureSet};
use crate::{Error, Result};
use attrib_core::Gender;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the bundle inside a model directory.
pub const MODEL_FILENAME: &str = "coreference-resolver.json";

/// Format version written into every bundle.
pub const FORMAT_VERSION: u32 = 1;

/// Encoder, classifier and forename tables, trained together.
///
/// Immutable once built; share it behind an `Arc`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Bundle format version
    pub version: u32,
    /// Feature vocabulary
    pub encoder: FeatureEncoder,
    /// Antecedent classifier
    pub classifier: LogisticRegression,
    /// Forename gender tables used while training
    pub forenames: ForenameGenderClassifier,
    /// Build time, `%Y-%m-%dT%H:%M:%SZ` in UTC
    pub timestamp: String,
}

impl ModelArtifact {
    /// Bundle freshly trained parts, stamped with the current time.
    #[must_use]
    pub fn new(
        encoder: FeatureEncoder,
        classifier: LogisticRegression,
        forenames: ForenameGenderClassifier,
    ) -> Self {
        Self {
            version: FORMAT_VERSION,
            encoder,
            classifier,
            forenames,
            timestamp: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        }
    }

    /// Path of the bundle inside `model_dir`.
    #[must_use]
    pub fn path_in(model_dir: impl AsRef<Path>) -> PathBuf {
        model_dir.as_ref().join(MODEL_FILENAME)
    }

    /// Write the bundle into `model_dir`, creating the directory if needed.
    pub fn save(&self, model_dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = model_dir.as_ref();
        std::fs::create_dir_all(dir)
            .map_err(|e| Error::model_save(format!("cannot create {}: {}", dir.display(), e)))?;
        let path = Self::path_in(dir);
        let serialized = serde_json::to_string(self)?;
        std::fs::write(&path, serialized)
            .map_err(|e| Error::model_save(format!("cannot write {}: {}", path.display(), e)))?;
        log::info!("Saved coreference model: {}", path.display());
        Ok(path)
    }

    /// Read the bundle from `model_dir`.
    pub fn load(model_dir: impl AsRef<Path>) -> Result<Self> {
        let path = Self::path_in(model_dir);
        log::debug!("Loading coreference model: {}", path.display());
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| Error::model_load(format!("cannot read {}: {}", path.display(), e)))?;
        let artifact: ModelArtifact = serde_json::from_str(&contents)
            .map_err(|e| Error::model_load(format!("invalid model {}: {}", path.display(), e)))?;
        if artifact.version != FORMAT_VERSION {
            return Err(Error::model_load(format!(
                "model {} has format version {}, expected {}",
                path.display(),
                artifact.version,
                FORMAT_VERSION
            )));
        }
        if artifact.classifier.dim() != artifact.encoder.dim() {
            return Err(Error::model_load(format!(
                "classifier has {} weights but encoder has {} columns",
                artifact.classifier.dim(),
                artifact.encoder.dim()
            )));
        }
        Ok(artifact)
    }
}

impl AntecedentScorer for ModelArtifact {
    fn score(&self, candidates: &[FeatureSet]) -> Vec<f64> {
        candidates
            .iter()
            .map(|f| self.classifier.predict_proba(&self.encoder.transform(f)))
            .collect()
    }
}

impl ForenameGender for ModelArtifact {
    fn forename_gender(&self, forename: &str) -> Gender {
        self.forenames.forename_gender(forename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrainingConfig;

    fn tiny_artifact() -> ModelArtifact {
        let mut pos = FeatureSet::new();
        pos.insert_flag("gender_match", true);
        let mut neg = FeatureSet::new();
        neg.insert_flag("gender_match", false);
        let samples = vec![pos.clone(), neg.clone(), pos, neg];
        let encoder = FeatureEncoder::fit(&samples);
        let classifier = LogisticRegression::fit(
            &encoder.transform_all(&samples),
            &[true, false, true, false],
            encoder.dim(),
            &TrainingConfig::default(),
        )
        .unwrap();
        ModelArtifact::new(
            encoder,
            classifier,
            ForenameGenderClassifier::from_lists(["tom"], ["ann"]),
        )
    }

    #[test]
    fn test_timestamp_format() {
        let artifact = tiny_artifact();
        assert_eq!(artifact.timestamp.len(), 20);
        assert!(artifact.timestamp.ends_with('Z'));
        assert_eq!(&artifact.timestamp[10..11], "T");
    }

    #[test]
    fn test_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = tiny_artifact();
        let path = artifact.save(dir.path().join("model")).unwrap();
        assert!(path.ends_with(MODEL_FILENAME));

        let loaded = ModelArtifact::load(dir.path().join("model")).unwrap();
        assert_eq!(loaded.timestamp, artifact.timestamp);
        let mut f = FeatureSet::new();
        f.insert_flag("gender_match", true);
        assert_eq!(loaded.score(&[f.clone()]), artifact.score(&[f]));
        assert_eq!(loaded.forename_gender("Ann"), Gender::Female);
    }

    #[test]
    fn test_missing_model_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModelArtifact::load(dir.path());
        assert!(matches!(err, Err(Error::ModelLoad(_))));
    }

    #[test]
    fn test_corrupt_model_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MODEL_FILENAME), "{not json").unwrap();
        assert!(matches!(ModelArtifact::load(dir.path()), Err(Error::ModelLoad(_))));
    }
}
