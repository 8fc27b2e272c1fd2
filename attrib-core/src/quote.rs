//! Quotes: a cue, its sources and its content.

use crate::span::Span;
use crate::token::Iob;
use serde::{Deserialize, Serialize};

fn default_confidence() -> f64 {
    1.0
}

/// A reported-speech quote.
///
/// `cue` is the speech verb or phrase ("said"), `sources` the speaker
/// mentions and `contents` the reported text. `coreferences` is filled in by
/// the coreference resolver: one entry per source whose root mention differs
/// from the source itself.
///
/// # Example
///
/// ```rust
/// use attrib_core::{Quote, Span};
///
/// let quote = Quote::new(Span::new(4, 5), vec![Span::new(3, 4)], vec![Span::new(5, 9)]);
/// assert!(quote.coreferences.is_empty());
/// assert_eq!(quote.position(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Cue span
    pub cue: Span,
    /// Source spans
    pub sources: Vec<Span>,
    /// Content spans
    pub contents: Vec<Span>,
    /// Extraction confidence (product of source and content probabilities)
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    /// Resolved root mentions of the sources
    #[serde(default)]
    pub coreferences: Vec<Span>,
}

impl Quote {
    /// Create an unresolved quote with confidence 1.0.
    #[must_use]
    pub fn new(cue: Span, sources: Vec<Span>, contents: Vec<Span>) -> Self {
        Self {
            cue,
            sources,
            contents,
            confidence: 1.0,
            coreferences: Vec::new(),
        }
    }

    /// Set the confidence.
    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Document position used to order quotes: the earliest token of the cue
    /// or any source.
    #[must_use]
    pub fn position(&self) -> usize {
        self.sources
            .iter()
            .map(|s| s.start)
            .chain(std::iter::once(self.cue.start))
            .min()
            .unwrap_or(self.cue.start)
    }
}

/// All source spans of `quotes`, in quote order.
#[must_use]
pub fn sources_of(quotes: &[Quote]) -> Vec<Span> {
    quotes.iter().flat_map(|q| q.sources.iter().copied()).collect()
}

/// All content spans of `quotes`, in quote order.
#[must_use]
pub fn contents_of(quotes: &[Quote]) -> Vec<Span> {
    quotes.iter().flat_map(|q| q.contents.iter().copied()).collect()
}

/// Per-token IOB labels marking membership in `spans`.
///
/// Spans that run past `len` are clipped.
///
/// ```rust
/// use attrib_core::{iob_labels, Iob, Span};
///
/// let labels = iob_labels(5, &[Span::new(1, 3)]);
/// assert_eq!(labels, vec![Iob::Outside, Iob::Begin, Iob::Inside, Iob::Outside, Iob::Outside]);
/// ```
#[must_use]
pub fn iob_labels(len: usize, spans: &[Span]) -> Vec<Iob> {
    let mut labels = vec![Iob::Outside; len];
    for span in spans {
        let end = span.end.min(len);
        for i in span.start..end {
            labels[i] = if i == span.start {
                Iob::Begin
            } else {
                Iob::Inside
            };
        }
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_json_defaults() {
        let q: Quote =
            serde_json::from_str(r#"{"cue": [3,4], "sources": [[0,2]], "contents": [[5,9]]}"#)
                .unwrap();
        assert_eq!(q.confidence, 1.0);
        assert!(q.coreferences.is_empty());
        assert_eq!(q.sources, vec![Span::new(0, 2)]);
    }

    #[test]
    fn test_position_uses_earliest_source() {
        let q = Quote::new(Span::new(10, 11), vec![Span::new(12, 13)], vec![]);
        assert_eq!(q.position(), 10);
        let q = Quote::new(Span::new(10, 11), vec![Span::new(2, 4)], vec![]);
        assert_eq!(q.position(), 2);
    }

    #[test]
    fn test_iob_labels_clip() {
        let labels = iob_labels(3, &[Span::new(2, 6)]);
        assert_eq!(labels, vec![Iob::Outside, Iob::Outside, Iob::Begin]);
    }

    #[test]
    fn test_collectors() {
        let quotes = vec![
            Quote::new(Span::new(1, 2), vec![Span::new(0, 1)], vec![Span::new(2, 5)]),
            Quote::new(Span::new(7, 8), vec![Span::new(6, 7)], vec![Span::new(8, 9)]),
        ];
        assert_eq!(sources_of(&quotes), vec![Span::new(0, 1), Span::new(6, 7)]);
        assert_eq!(contents_of(&quotes).len(), 2);
    }
}
