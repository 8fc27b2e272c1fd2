//! Trained antecedent model.
//!
//! - [`FeatureEncoder`]: named features to sparse vectors
//! - [`LogisticRegression`]: the binary antecedent classifier
//! - [`ModelArtifact`]: both, plus forename tables, saved as one JSON file

pub mod artifact;
pub mod encoder;
pub mod logistic;

pub use artifact::{ModelArtifact, FORMAT_VERSION, MODEL_FILENAME};
pub use encoder::{FeatureEncoder, SparseVector};
pub use logistic::LogisticRegression;
