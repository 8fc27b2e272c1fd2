//! Training the antecedent classifier.
//!
//! Every pronoun in a gold coreference group yields one example per
//! candidate antecedent, labelled by whether the candidate overlaps a span
//! of the same group. All examples across the corpus train one shared
//! binary classifier.

use crate::alias::AliasTable;
use crate::config::{Config, ResolverConfig};
use crate::corpus::{AnnotatedDocument, Corpus};
use crate::gender::{ForenameGender, ForenameGenderClassifier};
use crate::mention::{is_pronoun, MentionAttrs, MentionExtractor};
use crate::model::{FeatureEncoder, LogisticRegression, ModelArtifact};
use crate::scorer::{candidate_features, CandidateFinder, FeatureSet};
use crate::Result;
use attrib_core::{contents_of, iob_labels, is_inside_spans, overlaps_any, sources_of};
use std::path::Path;

/// Labelled candidate features.
#[derive(Debug, Clone, Default)]
pub struct TrainingExamples {
    /// One feature set per candidate
    pub features: Vec<FeatureSet>,
    /// True where the candidate is in the pronoun's group
    pub labels: Vec<bool>,
    /// Documents with coreference groups
    pub documents: usize,
    /// Pronouns that produced candidates
    pub pronouns: usize,
}

impl TrainingExamples {
    /// Number of examples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// True if there are no examples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Number of positive examples.
    #[must_use]
    pub fn positives(&self) -> usize {
        self.labels.iter().filter(|&&l| l).count()
    }

    fn extend(&mut self, other: TrainingExamples) {
        self.features.extend(other.features);
        self.labels.extend(other.labels);
        self.documents += other.documents;
        self.pronouns += other.pronouns;
    }
}

/// Examples from one document; empty when it has no coreference groups.
pub fn document_examples(
    annotated: &AnnotatedDocument,
    forenames: &dyn ForenameGender,
    config: &ResolverConfig,
) -> TrainingExamples {
    let mut examples = TrainingExamples::default();
    let Some(groups) = &annotated.coref_groups else {
        return examples;
    };
    examples.documents = 1;

    let doc = &annotated.document;
    let sources = sources_of(&annotated.quotes);
    let contents = contents_of(&annotated.quotes);
    let labels = iob_labels(doc.len(), &contents);

    let mut attrs = MentionAttrs::new();
    let mentions = MentionExtractor::new(forenames).extract(doc, &labels, &mut attrs);
    // Built for its gender and plurality back-fill.
    let _table = AliasTable::build(doc, mentions.names(), &mut attrs);
    let finder = CandidateFinder::new(doc, mentions.all(), &sources, &contents, forenames);

    for group in groups {
        for pronoun in group.iter().filter(|s| is_pronoun(doc, s)) {
            if is_inside_spans(pronoun.start, &contents) {
                continue;
            }
            let candidates =
                finder.closest_preceding(&mut attrs, pronoun, config.training_candidates, None);
            if candidates.is_empty() {
                continue;
            }
            examples.pronouns += 1;
            for (rank, candidate) in candidates.iter().enumerate() {
                let features = candidate_features(doc, &mut attrs, forenames, candidate, rank, pronoun);
                examples.features.push(features);
                examples.labels.push(overlaps_any(candidate, group));
            }
        }
    }
    examples
}

/// Examples from every annotated document of a corpus.
pub fn training_examples(
    corpus: &Corpus,
    forenames: &dyn ForenameGender,
    config: &ResolverConfig,
) -> TrainingExamples {
    let mut examples = TrainingExamples::default();
    for annotated in corpus {
        examples.extend(document_examples(annotated, forenames, config));
    }
    log::info!(
        "Training examples: {} ({} positive) from {} pronouns in {} documents",
        examples.len(),
        examples.positives(),
        examples.pronouns,
        examples.documents
    );
    examples
}

/// Train a model bundle on a corpus.
pub fn build_model(
    corpus: &Corpus,
    forenames: ForenameGenderClassifier,
    config: &Config,
) -> Result<ModelArtifact> {
    config.resolver.validate()?;
    config.training.validate()?;

    let examples = training_examples(corpus, &forenames, &config.resolver);
    log::info!("Vectorising training data");
    let encoder = FeatureEncoder::fit(&examples.features);
    let vectors = encoder.transform_all(&examples.features);
    log::debug!("Training matrix: {} x {}", vectors.len(), encoder.dim());

    log::info!("Training coreference classifier");
    let classifier = LogisticRegression::fit(&vectors, &examples.labels, encoder.dim(), &config.training)?;
    Ok(ModelArtifact::new(encoder, classifier, forenames))
}

/// Train a model bundle and save it into `model_dir`.
///
/// A failed save is logged and the trained model is still returned, so a
/// batch job can finish cleanly.
pub fn build_and_save(
    corpus: &Corpus,
    forenames: ForenameGenderClassifier,
    config: &Config,
    model_dir: impl AsRef<Path>,
) -> Result<ModelArtifact> {
    let artifact = build_model(corpus, forenames, config)?;
    if let Err(e) = artifact.save(model_dir.as_ref()) {
        log::error!("Unable to save coreference model: {}", e);
    }
    Ok(artifact)
}
