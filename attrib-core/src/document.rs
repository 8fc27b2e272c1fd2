//! Annotated documents.
//!
//! A [`Document`] is the immutable output of the linguistic annotator:
//! tokens, sentence boundaries and entity spans. It is built once per input
//! text and shared read-only by every later stage.

use crate::span::Span;
use crate::token::{EntityLabel, Iob, Token};
use crate::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

// ============================================================================
// Document identity
// ============================================================================

static NEXT_DOC_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique document identifier.
///
/// Used to key per-document side tables so that attributes computed for one
/// document can never leak into another, even when spans coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocId(pub u64);

impl DocId {
    /// Allocate a fresh identifier.
    #[must_use]
    pub fn next() -> Self {
        DocId(NEXT_DOC_ID.fetch_add(1, Ordering::Relaxed))
    }
}

// ============================================================================
// Entity spans
// ============================================================================

/// A labelled entity span.
///
/// Serialized as `{"start": .., "end": .., "label": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "EntitySpanRepr", into = "EntitySpanRepr")]
pub struct EntitySpan {
    /// Token range
    pub span: Span,
    /// Entity label
    pub label: EntityLabel,
}

impl EntitySpan {
    /// Create a labelled entity span.
    #[must_use]
    pub fn new(start: usize, end: usize, label: EntityLabel) -> Self {
        Self {
            span: Span::new(start, end),
            label,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct EntitySpanRepr {
    start: usize,
    end: usize,
    label: EntityLabel,
}

impl From<EntitySpanRepr> for EntitySpan {
    fn from(r: EntitySpanRepr) -> Self {
        EntitySpan::new(r.start, r.end, r.label)
    }
}

impl From<EntitySpan> for EntitySpanRepr {
    fn from(e: EntitySpan) -> Self {
        EntitySpanRepr {
            start: e.span.start,
            end: e.span.end,
            label: e.label,
        }
    }
}

/// An entity listed once per document, for summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalientEntity {
    /// Entity label
    pub label: EntityLabel,
    /// Surface text (trimmed)
    pub text: String,
    /// Start token of the first occurrence
    pub start: usize,
}

// ============================================================================
// Document
// ============================================================================

/// Immutable annotated document.
#[derive(Debug, Clone)]
pub struct Document {
    id: DocId,
    name: Option<String>,
    tokens: Vec<Token>,
    sentences: Vec<Span>,
    entities: Vec<EntitySpan>,
}

impl Document {
    /// Build a document from tokens.
    ///
    /// Token indices are reassigned to their positions. The whole document
    /// is treated as one sentence and entities are read off the tokens' IOB
    /// marks; use [`Document::with_sentences`] and
    /// [`Document::with_entities`] to supply them explicitly.
    #[must_use]
    pub fn new(mut tokens: Vec<Token>) -> Self {
        for (i, token) in tokens.iter_mut().enumerate() {
            token.index = i;
        }
        let entities = entities_from_iob(&tokens);
        let sentences = if tokens.is_empty() {
            vec![]
        } else {
            vec![Span::new(0, tokens.len())]
        };
        Self {
            id: DocId::next(),
            name: None,
            tokens,
            sentences,
            entities,
        }
    }

    /// Attach a human-readable name (file name, corpus id).
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the sentence boundaries.
    ///
    /// Sentences are sorted by start; each must fit in the document.
    pub fn with_sentences(mut self, mut sentences: Vec<Span>) -> Result<Self> {
        for s in &sentences {
            self.check_span(s)?;
        }
        sentences.sort();
        self.sentences = sentences;
        Ok(self)
    }

    /// Replace the entity spans.
    pub fn with_entities(mut self, mut entities: Vec<EntitySpan>) -> Result<Self> {
        for e in &entities {
            self.check_span(&e.span)?;
        }
        entities.sort_by_key(|e| e.span);
        self.entities = entities;
        Ok(self)
    }

    /// Process-unique identifier.
    #[must_use]
    pub fn id(&self) -> DocId {
        self.id
    }

    /// Optional name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// All tokens.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True if the document has no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token at `index`.
    #[must_use]
    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Tokens covered by `span`, clamped to the document.
    #[must_use]
    pub fn span_tokens(&self, span: &Span) -> &[Token] {
        let end = span.end.min(self.tokens.len());
        let start = span.start.min(end);
        &self.tokens[start..end]
    }

    /// Surface text of `span`, with the source whitespace between tokens.
    #[must_use]
    pub fn text(&self, span: &Span) -> String {
        let tokens = self.span_tokens(span);
        let mut out = String::new();
        for (i, token) in tokens.iter().enumerate() {
            out.push_str(&token.text);
            if token.ws && i + 1 < tokens.len() {
                out.push(' ');
            }
        }
        out
    }

    /// Sentence boundaries, sorted.
    #[must_use]
    pub fn sentences(&self) -> &[Span] {
        &self.sentences
    }

    /// Sentence containing token `index`.
    #[must_use]
    pub fn sentence_of(&self, index: usize) -> Option<Span> {
        self.sentences
            .iter()
            .find(|s| s.contains_index(index))
            .copied()
    }

    /// Entity spans, sorted by position.
    #[must_use]
    pub fn entities(&self) -> &[EntitySpan] {
        &self.entities
    }

    /// Error unless `span` lies within the document.
    pub fn check_span(&self, span: &Span) -> Result<()> {
        if span.end > self.tokens.len() || span.start > span.end {
            return Err(Error::SpanOutOfBounds {
                start: span.start,
                end: span.end,
                len: self.tokens.len(),
            });
        }
        Ok(())
    }

    /// Per-token flags marking text inside literal quotation marks.
    ///
    /// Quotation marks pair up within a sentence; the marks themselves are
    /// not flagged. A mark left open at the end of a sentence flags the rest
    /// of that sentence.
    #[must_use]
    pub fn quoted_token_mask(&self) -> Vec<bool> {
        let mut mask = vec![false; self.tokens.len()];
        for sentence in &self.sentences {
            let mut open: Option<usize> = None;
            for i in sentence.indices() {
                if !is_quotation_mark(&self.tokens[i].text) {
                    continue;
                }
                match open.take() {
                    Some(start) => mask[start + 1..i].iter_mut().for_each(|m| *m = true),
                    None => open = Some(i),
                }
            }
            if let Some(start) = open {
                mask[start + 1..sentence.end]
                    .iter_mut()
                    .for_each(|m| *m = true);
            }
        }
        mask
    }

    /// Person, organization, group and place entities, each listed once.
    ///
    /// An entity whose text is contained in one already listed ("Obama" after
    /// "Barack Obama") is skipped.
    #[must_use]
    pub fn salient_entities(&self) -> Vec<SalientEntity> {
        let mut seen: Vec<String> = Vec::new();
        let mut out = Vec::new();
        for entity in &self.entities {
            if !matches!(
                entity.label,
                EntityLabel::Person | EntityLabel::Organization | EntityLabel::Norp | EntityLabel::Gpe
            ) {
                continue;
            }
            let text = self.text(&entity.span).trim().to_string();
            if seen.iter().any(|s| s == &text) {
                continue;
            }
            let contained = seen.iter().any(|s| s.contains(text.as_str()));
            seen.push(text.clone());
            if !contained {
                out.push(SalientEntity {
                    label: entity.label.clone(),
                    text,
                    start: entity.span.start,
                });
            }
        }
        out
    }
}

/// Read entity spans off token IOB marks.
///
/// An `Inside` token without a preceding entity of the same label starts a
/// new span, as annotators occasionally emit that.
#[must_use]
pub fn entities_from_iob(tokens: &[Token]) -> Vec<EntitySpan> {
    let mut entities = Vec::new();
    let mut current: Option<(usize, EntityLabel)> = None;

    for (i, token) in tokens.iter().enumerate() {
        let continues = matches!(
            (&current, token.ent_iob, &token.ent_type),
            (Some((_, label)), Iob::Inside, Some(t)) if label == t
        );
        if continues {
            continue;
        }
        if let Some((start, label)) = current.take() {
            entities.push(EntitySpan::new(start, i, label));
        }
        if token.ent_iob.is_inside() {
            if let Some(label) = &token.ent_type {
                current = Some((i, label.clone()));
            }
        }
    }
    if let Some((start, label)) = current {
        entities.push(EntitySpan::new(start, tokens.len(), label));
    }
    entities
}

// ============================================================================
// Quotation marks
// ============================================================================

const QUOTATION_MARKS: &[&str] = &["\"", "\u{201c}", "\u{201d}", "``", "''", "\u{201e}", "\u{ab}", "\u{bb}"];

/// True if `text` is a quotation-mark token.
#[must_use]
pub fn is_quotation_mark(text: &str) -> bool {
    QUOTATION_MARKS.contains(&text)
}

static QUOTED_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""([^"]+)"|\x{201C}([^\x{201D}]+)\x{201D}|\x{AB}([^\x{BB}]+)\x{BB}"#)
        .expect("valid regex")
});

/// Text segments enclosed in quotation marks within a string.
///
/// ```rust
/// use attrib_core::quoted_segments;
///
/// let segments = quoted_segments("He said \"we will win\" and \u{201c}soon\u{201d}.");
/// assert_eq!(segments, vec!["we will win", "soon"]);
/// ```
#[must_use]
pub fn quoted_segments(text: &str) -> Vec<&str> {
    QUOTED_TEXT
        .captures_iter(text)
        .filter_map(|caps| {
            caps.iter()
                .skip(1)
                .flatten()
                .next()
                .map(|m| m.as_str())
        })
        .collect()
}
