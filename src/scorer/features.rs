//! Candidate feature extraction.

use crate::gender::{is_plural_pronoun, pronoun_gender, ForenameGender};
use crate::mention::{mention_kind, span_head, MentionAttrs};
use attrib_core::{Document, MentionKind, Span};
use std::collections::BTreeMap;

/// Value of one named feature.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum FeatureValue {
    /// Categorical value, one-hot encoded as `name=value`.
    Text(String),
    /// Binary value, encoded as a single 0/1 column `name`.
    Flag(bool),
}

/// Named features of one candidate antecedent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureSet {
    features: BTreeMap<String, FeatureValue>,
}

impl FeatureSet {
    /// Create an empty feature set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a categorical feature.
    pub fn insert_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.features
            .insert(name.into(), FeatureValue::Text(value.into()));
    }

    /// Add a binary feature.
    pub fn insert_flag(&mut self, name: impl Into<String>, value: bool) {
        self.features.insert(name.into(), FeatureValue::Flag(value));
    }

    /// Value of a feature.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.features.get(name)
    }

    /// Features in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureValue)> {
        self.features.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// True if there are no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Features of `candidate` as the antecedent of `pronoun`.
///
/// `rank` is the candidate's distance in mentions from the pronoun, 0 for
/// the closest.
pub fn candidate_features(
    doc: &Document,
    attrs: &mut MentionAttrs,
    forenames: &dyn ForenameGender,
    candidate: &Span,
    rank: usize,
    pronoun: &Span,
) -> FeatureSet {
    let kind = mention_kind(doc, candidate);
    let candidate_text = doc.text(candidate);
    let type_text = match kind {
        MentionKind::Pronominal => candidate_text,
        other => other.as_str().to_string(),
    };
    let pronoun_text = doc.text(pronoun);
    let head_text = span_head(doc, candidate)
        .and_then(|i| doc.token(i))
        .map(|t| t.text.as_str())
        .unwrap_or_default();
    let first = doc.span_tokens(candidate).first();

    let gender_match = pronoun_gender(&pronoun_text) == attrs.gender(doc, candidate, forenames);
    let plurality_match = is_plural_pronoun(&pronoun_text) == attrs.plural(doc, candidate);

    let mut features = FeatureSet::new();
    features.insert_text("mention_type_text", type_text.as_str());
    features.insert_text("mention_entity_type", first.map_or("", |t| t.ent_label()));
    features.insert_text("mention_pos", first.map_or("", |t| t.pos.as_str()));
    features.insert_text("pronoun_text", pronoun_text.as_str());

    features.insert_flag("gender_match", gender_match);
    features.insert_flag("plurality_match", plurality_match);

    features.insert_text(
        "mention_distance_pronoun_type",
        format!("{}{}{}", rank, pronoun_text, type_text),
    );
    features.insert_text(
        "mention_head_pronoun_type",
        format!("{}{}{}", head_text, pronoun_text, type_text),
    );
    features
}
