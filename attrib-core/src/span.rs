//! Token spans.
//!
//! A [`Span`] is a half-open token range `[start, end)` over a single
//! document. Spans are plain coordinates: they carry no text and no
//! attributes, so they can be copied freely and used as map keys. Text and
//! token access go through [`crate::Document`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-open token range `[start, end)`.
///
/// Serialized as a two-element array, `[start, end]`.
///
/// # Example
///
/// ```rust
/// use attrib_core::Span;
///
/// let name = Span::new(0, 3);
/// let surname = Span::new(2, 3);
/// assert!(name.overlaps(&surname));
/// assert!(name.contains(&surname));
/// assert_eq!(name.len(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Span {
    /// First token index (inclusive)
    pub start: usize,
    /// One past the last token index (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a span. `end` is clamped to be at least `start`.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        let end = if end < start { start } else { end };
        Self { start, end }
    }

    /// Single-token span at `index`.
    #[must_use]
    pub const fn token(index: usize) -> Self {
        Self {
            start: index,
            end: index + 1,
        }
    }

    /// Number of tokens covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// True if the span covers no tokens.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// `(start, end)` tuple, the key used by alias tables.
    #[must_use]
    pub const fn key(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    /// True if the two spans share at least one token.
    #[must_use]
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True if `other` lies entirely within this span.
    #[must_use]
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// True if token `index` lies within this span.
    #[must_use]
    pub fn contains_index(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    /// Token indices covered by this span.
    pub fn indices(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

impl From<(usize, usize)> for Span {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}

impl From<Span> for (usize, usize) {
    fn from(span: Span) -> Self {
        (span.start, span.end)
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// True if `span` overlaps any span in `others`.
#[must_use]
pub fn overlaps_any(span: &Span, others: &[Span]) -> bool {
    others.iter().any(|other| span.overlaps(other))
}

/// True if token `index` falls inside any span in `spans`.
#[must_use]
pub fn is_inside_spans(index: usize, spans: &[Span]) -> bool {
    spans.iter().any(|span| span.contains_index(index))
}
