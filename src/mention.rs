//! Mentions: the names and pronouns that take part in coreference.
//!
//! A mention is a [`Span`] over a [`Document`]. Spans are plain values, so
//! derived attributes (gender, plurality) are kept in a [`MentionAttrs`]
//! side-table keyed by `(document id, start, end)` instead of on the span.

use crate::gender::{
    is_personal_pronoun, is_plural_pronoun, prefix_gender, pronoun_gender,
    split_on_longest_prefix, ForenameGender,
};
use attrib_core::{DocId, Document, EntityLabel, Gender, Iob, MentionKind, Span, Token};
use std::collections::HashMap;

// =============================================================================
// Span predicates
// =============================================================================

/// True for a single token tagged as a pronoun.
#[must_use]
pub fn is_pronoun(doc: &Document, span: &Span) -> bool {
    span.len() == 1 && doc.token(span.start).is_some_and(Token::is_pronoun)
}

/// True if every token is a proper noun.
#[must_use]
pub fn is_proper_noun(doc: &Document, span: &Span) -> bool {
    let tokens = doc.span_tokens(span);
    !tokens.is_empty() && tokens.iter().all(Token::is_proper_noun)
}

/// True if the first token is a common noun.
#[must_use]
pub fn is_noun(doc: &Document, span: &Span) -> bool {
    doc.span_tokens(span).first().is_some_and(Token::is_noun)
}

/// Kind of referring expression.
#[must_use]
pub fn mention_kind(doc: &Document, span: &Span) -> MentionKind {
    if is_pronoun(doc, span) {
        MentionKind::Pronominal
    } else if is_proper_noun(doc, span) {
        MentionKind::Proper
    } else if is_noun(doc, span) {
        MentionKind::Nominal
    } else {
        MentionKind::Unknown
    }
}

/// Entity label of a span.
///
/// The label of the document entity with exactly this span, else of the
/// smallest entity containing it, else of the last labelled token.
#[must_use]
pub fn span_label<'d>(doc: &'d Document, span: &Span) -> Option<&'d EntityLabel> {
    let entities = doc.entities();
    entities
        .iter()
        .find(|e| e.span == *span)
        .or_else(|| {
            entities
                .iter()
                .filter(|e| e.span.contains(span))
                .min_by_key(|e| e.span.len())
        })
        .map(|e| &e.label)
        .or_else(|| {
            doc.span_tokens(span)
                .iter()
                .rev()
                .find_map(|t| t.ent_type.as_ref())
        })
}

/// Plurality of a non-pronoun mention.
///
/// Plural if the first token is a plural noun, is the pronoun "they", or
/// the span is an organisation or nationality/group entity.
#[must_use]
pub fn is_plural(doc: &Document, span: &Span) -> bool {
    let Some(first) = doc.span_tokens(span).first() else {
        return false;
    };
    if first.is_plural_noun() {
        return true;
    }
    if first.is_pronoun() && first.text.eq_ignore_ascii_case("they") {
        return true;
    }
    span_label(doc, span).is_some_and(EntityLabel::is_collective)
}

/// Syntactic head of a span.
///
/// The token whose dependency head lies outside the span. Without a parse,
/// or when every head points inside, the last token.
#[must_use]
pub fn span_head(doc: &Document, span: &Span) -> Option<usize> {
    let tokens = doc.span_tokens(span);
    let last = tokens.last()?;
    let head = tokens
        .iter()
        .find(|t| t.head.is_some_and(|h| !span.contains_index(h) || h == t.index))
        .unwrap_or(last);
    Some(head.index)
}

/// Remove a trailing possessive ("Obama's" -> "Obama").
#[must_use]
pub fn strip_possessive(text: &str) -> &str {
    for suffix in ["'s", "\u{2019}s", "'", "\u{2019}"] {
        if let Some(stripped) = text.strip_suffix(suffix) {
            return stripped.trim_end();
        }
    }
    text
}

/// Text used to group names: honorific and possessive removed.
///
/// The mention's span is left unchanged; only comparisons use this text.
#[must_use]
pub fn grouping_text(doc: &Document, span: &Span) -> String {
    let text = doc.text(span);
    let rest = match split_on_longest_prefix(&text) {
        Some((_, rest)) => rest,
        None => text.as_str(),
    };
    strip_possessive(rest).to_string()
}

/// Gender of a person's name: a gendered honorific decides, otherwise the
/// first word after any honorific is looked up as a forename.
///
/// ```rust
/// use attrib::gender::ForenameGenderClassifier;
/// use attrib::mention::name_gender;
/// use attrib::Gender;
///
/// let forenames = ForenameGenderClassifier::new();
/// assert_eq!(name_gender("Mrs. Thatcher", &forenames), Gender::Female);
/// assert_eq!(name_gender("Dr. Barack Obama", &forenames), Gender::Male);
/// ```
#[must_use]
pub fn name_gender(name: &str, forenames: &dyn ForenameGender) -> Gender {
    let rest = match split_on_longest_prefix(name) {
        Some((title, rest)) => {
            let gender = prefix_gender(title);
            if gender.is_gendered() {
                return gender;
            }
            rest
        }
        None => name,
    };
    rest.split_whitespace()
        .next()
        .map_or(Gender::Unknown, |forename| forenames.forename_gender(forename))
}

/// Gender of a mention, computed from scratch.
///
/// Pronouns use the pronoun table. Multi-token person names go through
/// [`name_gender`]. Single-token person names are unknown until the alias
/// table links them to a fuller form. Organisations are neutral.
#[must_use]
pub fn mention_gender(doc: &Document, span: &Span, forenames: &dyn ForenameGender) -> Gender {
    if is_pronoun(doc, span) {
        return pronoun_gender(&doc.text(span));
    }
    match span_label(doc, span) {
        Some(EntityLabel::Person) if span.len() > 1 => name_gender(&doc.text(span), forenames),
        Some(EntityLabel::Organization) => Gender::Neutral,
        _ => Gender::Unknown,
    }
}

// =============================================================================
// Attribute side-table
// =============================================================================

/// Lazily computed attributes of one mention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MentionAttributes {
    /// Gender, once known
    pub gender: Option<Gender>,
    /// Plurality, once known
    pub plural: Option<bool>,
}

/// Gender and plurality of mentions, keyed by `(document id, start, end)`.
#[derive(Debug, Clone, Default)]
pub struct MentionAttrs {
    entries: HashMap<(DocId, usize, usize), MentionAttributes>,
}

impl MentionAttrs {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn key(doc: &Document, span: &Span) -> (DocId, usize, usize) {
        (doc.id(), span.start, span.end)
    }

    /// Stored attributes, without computing anything.
    #[must_use]
    pub fn get(&self, doc: &Document, span: &Span) -> Option<MentionAttributes> {
        self.entries.get(&Self::key(doc, span)).copied()
    }

    /// Record a gender.
    pub fn set_gender(&mut self, doc: &Document, span: &Span, gender: Gender) {
        self.entries.entry(Self::key(doc, span)).or_default().gender = Some(gender);
    }

    /// Record a plurality.
    pub fn set_plural(&mut self, doc: &Document, span: &Span, plural: bool) {
        self.entries.entry(Self::key(doc, span)).or_default().plural = Some(plural);
    }

    /// Gender of a mention, computing and storing it on first use.
    pub fn gender(&mut self, doc: &Document, span: &Span, forenames: &dyn ForenameGender) -> Gender {
        let entry = self.entries.entry(Self::key(doc, span)).or_default();
        *entry
            .gender
            .get_or_insert_with(|| mention_gender(doc, span, forenames))
    }

    /// Plurality of a mention, computing and storing it on first use.
    pub fn plural(&mut self, doc: &Document, span: &Span) -> bool {
        let entry = self.entries.entry(Self::key(doc, span)).or_default();
        *entry.plural.get_or_insert_with(|| {
            if is_pronoun(doc, span) {
                is_plural_pronoun(&doc.text(span))
            } else {
                is_plural(doc, span)
            }
        })
    }

    /// Number of mentions with stored attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Extraction
// =============================================================================

/// Mentions of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mentions {
    names: Vec<Span>,
    all: Vec<Span>,
}

impl Mentions {
    /// Person and organisation names, in document order.
    #[must_use]
    pub fn names(&self) -> &[Span] {
        &self.names
    }

    /// Names and pronouns, sorted by start offset.
    #[must_use]
    pub fn all(&self) -> &[Span] {
        &self.all
    }

    /// Number of mentions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.all.len()
    }

    /// True if the document has no mentions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

/// Collects names and pronouns from a document.
///
/// # Example
///
/// ```rust
/// use attrib::gender::ForenameGenderClassifier;
/// use attrib::mention::{MentionAttrs, MentionExtractor};
/// use attrib::{Document, EntityLabel, Iob, Token};
///
/// let doc = Document::new(vec![
///     Token::new("Jane", "PROPN", "NNP").with_entity(EntityLabel::Person, Iob::Begin),
///     Token::new("Smith", "PROPN", "NNP").with_entity(EntityLabel::Person, Iob::Inside),
///     Token::new("said", "VERB", "VBD"),
///     Token::new("she", "PRON", "PRP"),
///     Token::new("left", "VERB", "VBD"),
/// ]);
/// let forenames = ForenameGenderClassifier::new();
/// let mut attrs = MentionAttrs::new();
/// let mentions = MentionExtractor::new(&forenames).extract(&doc, &[], &mut attrs);
/// assert_eq!(mentions.names().len(), 1);
/// assert_eq!(mentions.len(), 2);
/// ```
pub struct MentionExtractor<'a> {
    forenames: &'a dyn ForenameGender,
}

impl<'a> MentionExtractor<'a> {
    /// Create an extractor using `forenames` for name gender.
    #[must_use]
    pub fn new(forenames: &'a dyn ForenameGender) -> Self {
        Self { forenames }
    }

    /// Extract mentions, recording their gender and plurality in `attrs`.
    ///
    /// `content_labels` marks tokens inside quote content; it may be empty or
    /// shorter than the document, in which case missing tokens count as
    /// outside. Names overlapping content or text in literal quotation marks
    /// are dropped, as are pronouns inside content.
    pub fn extract(&self, doc: &Document, content_labels: &[Iob], attrs: &mut MentionAttrs) -> Mentions {
        let in_content = |i: usize| content_labels.get(i).is_some_and(Iob::is_inside);
        let quoted = doc.quoted_token_mask();

        let mut labelled: Vec<(Span, &EntityLabel)> = doc
            .entities()
            .iter()
            .filter(|e| matches!(e.label, EntityLabel::Person | EntityLabel::Organization))
            .filter(|e| !e.span.indices().any(|i| quoted[i] || in_content(i)))
            .map(|e| (e.span, &e.label))
            .collect();
        labelled.sort_by_key(|(span, _)| *span);
        let names: Vec<Span> = labelled.iter().map(|(span, _)| *span).collect();

        for (idx, (name, label)) in labelled.iter().enumerate() {
            if **label == EntityLabel::Organization {
                attrs.set_gender(doc, name, Gender::Neutral);
                attrs.set_plural(doc, name, true);
                continue;
            }
            attrs.set_gender(doc, name, mention_gender(doc, name, self.forenames));
            attrs.set_plural(doc, name, false);

            // A short person name takes the gender of the nearest earlier name containing it.
            let short = grouping_text(doc, name).to_lowercase();
            if short.is_empty() {
                continue;
            }
            for earlier in names[..idx].iter().rev() {
                if !doc.text(earlier).to_lowercase().contains(&short) {
                    continue;
                }
                let inherited = attrs.get(doc, earlier).and_then(|a| a.gender);
                if let Some(gender) = inherited.filter(|g| g.is_gendered()) {
                    attrs.set_gender(doc, name, gender);
                }
                break;
            }
        }

        let mut all = names.clone();
        for token in doc.tokens() {
            if !token.is_pronoun() || !is_personal_pronoun(&token.text) || in_content(token.index) {
                continue;
            }
            let span = Span::token(token.index);
            attrs.set_gender(doc, &span, pronoun_gender(&token.text));
            attrs.set_plural(doc, &span, is_plural_pronoun(&token.text));
            all.push(span);
        }
        all.sort();
        all.dedup();

        log::debug!(
            "Mentions: {} names, {} total",
            names.len(),
            all.len()
        );
        Mentions { names, all }
    }
}
