//! Annotated tokens.
//!
//! Tokens arrive from an upstream linguistic annotator (tokenizer, tagger,
//! NER). Labels follow the spaCy / OntoNotes conventions: universal POS tags
//! in `pos` (`PROPN`, `PRON`, `NOUN`), Penn Treebank tags in `tag` (`NNP`,
//! `NNS`) and OntoNotes entity labels (`PERSON`, `ORG`, `NORP`, `GPE`).

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Entity boundary marker
// ============================================================================

/// IOB entity boundary marker.
///
/// Also used for per-token content labels, where `Begin`/`Inside` mark
/// tokens that belong to a quote's content span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Iob {
    /// First token of a span.
    #[serde(rename = "B")]
    Begin,
    /// Continuation token of a span.
    #[serde(rename = "I")]
    Inside,
    /// Outside any span.
    #[default]
    #[serde(rename = "O", alias = "")]
    Outside,
}

impl Iob {
    /// True for `Begin` and `Inside`.
    #[must_use]
    pub const fn is_inside(&self) -> bool {
        !matches!(self, Iob::Outside)
    }

    /// Single-letter form (`B`, `I`, `O`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Iob::Begin => "B",
            Iob::Inside => "I",
            Iob::Outside => "O",
        }
    }
}

// ============================================================================
// Entity label
// ============================================================================

/// Named-entity label of a token or entity span.
///
/// Only the labels the resolver reasons about get their own variant; the rest
/// are preserved verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityLabel {
    /// People, including fictional (PERSON)
    Person,
    /// Companies, agencies, institutions (ORG)
    Organization,
    /// Nationalities, religious or political groups (NORP)
    Norp,
    /// Countries, cities, states (GPE)
    Gpe,
    /// Any other label, kept as given
    Other(String),
}

impl EntityLabel {
    /// OntoNotes label string.
    #[must_use]
    pub fn as_label(&self) -> &str {
        match self {
            EntityLabel::Person => "PERSON",
            EntityLabel::Organization => "ORG",
            EntityLabel::Norp => "NORP",
            EntityLabel::Gpe => "GPE",
            EntityLabel::Other(s) => s.as_str(),
        }
    }

    /// Parse a label, accepting CoNLL (`PER`) and BIO-prefixed (`B-PER`) forms.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let label = label
            .strip_prefix("B-")
            .or_else(|| label.strip_prefix("I-"))
            .unwrap_or(label);

        match label.to_uppercase().as_str() {
            "PERSON" | "PER" => EntityLabel::Person,
            "ORG" | "ORGANIZATION" => EntityLabel::Organization,
            "NORP" => EntityLabel::Norp,
            "GPE" => EntityLabel::Gpe,
            _ => EntityLabel::Other(label.to_string()),
        }
    }

    /// Person or organization: the labels that can be quote sources.
    #[must_use]
    pub fn is_agent(&self) -> bool {
        matches!(self, EntityLabel::Person | EntityLabel::Organization)
    }

    /// Labels that denote a group, and so take plural agreement.
    #[must_use]
    pub fn is_collective(&self) -> bool {
        matches!(self, EntityLabel::Organization | EntityLabel::Norp)
    }
}

impl From<String> for EntityLabel {
    fn from(s: String) -> Self {
        Self::from_label(&s)
    }
}

impl From<EntityLabel> for String {
    fn from(label: EntityLabel) -> Self {
        label.as_label().to_string()
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

// ============================================================================
// Token
// ============================================================================

fn default_ws() -> bool {
    true
}

/// A single annotated token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Position in the document. Assigned by [`crate::Document::new`].
    #[serde(default)]
    pub index: usize,
    /// Surface text
    pub text: String,
    /// Whether the token is followed by whitespace in the source text
    #[serde(default = "default_ws")]
    pub ws: bool,
    /// Coarse part-of-speech tag (universal POS, e.g. `PROPN`)
    #[serde(default)]
    pub pos: String,
    /// Fine-grained tag (Penn Treebank, e.g. `NNP`)
    #[serde(default)]
    pub tag: String,
    /// Entity label, if the token is part of an entity
    #[serde(default)]
    pub ent_type: Option<EntityLabel>,
    /// Entity boundary marker
    #[serde(default)]
    pub ent_iob: Iob,
    /// Dependency head (token index), if the annotator produced a parse
    #[serde(default)]
    pub head: Option<usize>,
}

impl Token {
    /// Create a token with text and tags; not part of any entity.
    #[must_use]
    pub fn new(text: impl Into<String>, pos: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            index: 0,
            text: text.into(),
            ws: true,
            pos: pos.into(),
            tag: tag.into(),
            ent_type: None,
            ent_iob: Iob::Outside,
            head: None,
        }
    }

    /// Mark this token as part of an entity.
    #[must_use]
    pub fn with_entity(mut self, label: EntityLabel, iob: Iob) -> Self {
        self.ent_type = Some(label);
        self.ent_iob = iob;
        self
    }

    /// Set the trailing-whitespace flag.
    #[must_use]
    pub fn with_ws(mut self, ws: bool) -> Self {
        self.ws = ws;
        self
    }

    /// Set the dependency head.
    #[must_use]
    pub fn with_head(mut self, head: usize) -> Self {
        self.head = Some(head);
        self
    }

    /// True if the annotator tagged this token as a pronoun.
    #[must_use]
    pub fn is_pronoun(&self) -> bool {
        self.pos == "PRON"
    }

    /// True if tagged as a proper noun.
    #[must_use]
    pub fn is_proper_noun(&self) -> bool {
        self.pos == "PROPN"
    }

    /// True if tagged as a common noun.
    #[must_use]
    pub fn is_noun(&self) -> bool {
        self.pos == "NOUN"
    }

    /// True if the fine-grained tag marks a plural noun (`NNS`, `NNPS`).
    #[must_use]
    pub fn is_plural_noun(&self) -> bool {
        matches!(self.tag.as_str(), "NNS" | "NNPS")
    }

    /// Entity label string, or `""` outside entities.
    #[must_use]
    pub fn ent_label(&self) -> &str {
        self.ent_type.as_ref().map_or("", EntityLabel::as_label)
    }

    /// True if the token carries the given entity label.
    #[must_use]
    pub fn has_label(&self, label: &EntityLabel) -> bool {
        self.ent_type.as_ref() == Some(label)
    }
}
