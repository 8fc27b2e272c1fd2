//! Evaluation against gold coreference groups.
//!
//! Only pronoun sources count. A pronoun source scores a true positive when
//! one of its quote's predicted coreferences overlaps the pronoun's gold
//! group, a false positive when predictions exist but none overlap, and a
//! false negative when the quote has no predictions. Documents without
//! coreference annotation, and pronouns outside every gold group, are left
//! out rather than counted as failures.

use crate::corpus::{AnnotatedDocument, Corpus};
use crate::mention::is_pronoun;
use crate::resolver::CoreferenceResolver;
use attrib_core::{contents_of, iob_labels, overlaps_any};
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;

/// Counts and scores from an evaluation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CorefEvaluation {
    /// Documents with coreference annotation
    pub documents: usize,
    /// Pronoun sources seen
    pub pronouns: usize,
    /// Predicted coreference in the gold group
    pub true_positives: usize,
    /// Predicted coreference outside the gold group
    pub false_positives: usize,
    /// No prediction for a pronoun with a gold group
    pub false_negatives: usize,
}

impl CorefEvaluation {
    /// TP / (TP + FP), or 0 without predictions.
    #[must_use]
    pub fn precision(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    /// TP / (TP + FN), or 0 without gold pronouns.
    #[must_use]
    pub fn recall(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }

    /// Harmonic mean of precision and recall.
    #[must_use]
    pub fn f1(&self) -> f64 {
        let (p, r) = (self.precision(), self.recall());
        if p + r > 0.0 {
            2.0 * p * r / (p + r)
        } else {
            0.0
        }
    }

    /// Sum of two evaluations.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            documents: self.documents + other.documents,
            pronouns: self.pronouns + other.pronouns,
            true_positives: self.true_positives + other.true_positives,
            false_positives: self.false_positives + other.false_positives,
            false_negatives: self.false_negatives + other.false_negatives,
        }
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

impl fmt::Display for CorefEvaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Document count: {}", self.documents)?;
        writeln!(f, "Pronoun count:  {}", self.pronouns)?;
        writeln!(
            f,
            "TP: {}  FP: {}  FN: {}",
            self.true_positives, self.false_positives, self.false_negatives
        )?;
        write!(
            f,
            "Precision: {:.3}  Recall: {:.3}  F1: {:.3}",
            self.precision(),
            self.recall(),
            self.f1()
        )
    }
}

/// Resolve one document and score it; `None` without coreference groups.
#[must_use]
pub fn evaluate_document(
    resolver: &CoreferenceResolver,
    annotated: &AnnotatedDocument,
) -> Option<CorefEvaluation> {
    annotated.coref_groups.as_ref()?;
    let doc = &annotated.document;
    let mut quotes = annotated.quotes.clone();
    let labels = iob_labels(doc.len(), &contents_of(&quotes));
    resolver.resolve_document(doc, &mut quotes, &labels);

    let mut eval = CorefEvaluation {
        documents: 1,
        ..Default::default()
    };
    for quote in &quotes {
        for source in quote.sources.iter().filter(|s| is_pronoun(doc, s)) {
            eval.pronouns += 1;
            let Some(group) = annotated.group_of(source) else {
                continue;
            };
            if quote.coreferences.is_empty() {
                eval.false_negatives += 1;
            } else if quote.coreferences.iter().any(|c| overlaps_any(c, group)) {
                eval.true_positives += 1;
            } else {
                eval.false_positives += 1;
            }
        }
    }
    Some(eval)
}

/// Evaluate a resolver on a corpus, documents in parallel.
#[must_use]
pub fn evaluate(resolver: &CoreferenceResolver, corpus: &Corpus) -> CorefEvaluation {
    log::info!("Evaluating coreference resolver on {} documents", corpus.len());
    let eval = corpus
        .documents()
        .par_iter()
        .filter_map(|annotated| evaluate_document(resolver, annotated))
        .reduce(CorefEvaluation::default, CorefEvaluation::merge);
    log::info!(
        "Precision {:.3}, recall {:.3}, F1 {:.3}",
        eval.precision(),
        eval.recall(),
        eval.f1()
    );
    eval
}
