//! Alias table: each mention mapped to the root mention it refers to.
//!
//! Built once per document from the names, then extended as pronoun chains
//! are resolved. Values are always roots, so a lookup never needs to follow
//! more than one link.

use crate::gender::split_on_longest_prefix;
use crate::mention::{grouping_text, is_pronoun, is_proper_noun, span_label, MentionAttrs};
use attrib_core::{Document, EntityLabel, Gender, Span};
use std::collections::HashMap;

/// Mapping from mention `(start, end)` to its root mention.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: HashMap<Span, Span>,
}

impl AliasTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Link every name to the earliest, fullest earlier name it matches.
    ///
    /// `names` must be sorted by position. For each name, the first of these
    /// that matches wins, always taking the earliest qualifying name:
    ///
    /// 1. For titled, person-labelled or all-proper-noun names, an earlier
    ///    name whose text contains this one ("Obama" in "Barack Obama").
    /// 2. An earlier name that is longer and starts with the same tokens
    ///    ("Jane" and "Jane Smith").
    /// 3. An earlier name with identical text.
    ///
    /// A person never links to an organisation or the reverse. A linked name
    /// inherits gender and plurality from its match when its own are unknown.
    pub fn build(doc: &Document, names: &[Span], attrs: &mut MentionAttrs) -> Self {
        let mut table = Self::new();
        let grouping: Vec<String> = names.iter().map(|n| grouping_text(doc, n)).collect();
        let texts: Vec<String> = names.iter().map(|n| doc.text(n)).collect();

        let labels: Vec<Option<&EntityLabel>> = names.iter().map(|n| span_label(doc, n)).collect();

        for (idx, name) in names.iter().enumerate() {
            // People and organisations never alias each other.
            let earlier: Vec<usize> = (0..idx)
                .filter(|&j| match (labels[j], labels[idx]) {
                    (Some(a), Some(b)) => a == b,
                    _ => true,
                })
                .collect();
            let short = grouping[idx].as_str();

            let titled = split_on_longest_prefix(&texts[idx]).is_some();
            let by_containment = if titled
                || labels[idx] == Some(&EntityLabel::Person)
                || is_proper_noun(doc, name)
            {
                earlier
                    .iter()
                    .copied()
                    .find(|&j| !short.is_empty() && grouping[j].contains(short))
            } else {
                None
            };

            let matched = by_containment
                .or_else(|| {
                    earlier
                        .iter()
                        .copied()
                        .find(|&j| is_longer_with_matching_forenames(doc, &names[j], name))
                })
                .or_else(|| earlier.iter().copied().find(|&j| texts[j] == texts[idx]));

            let Some(j) = matched else {
                continue;
            };
            let found = names[j];
            let root = table.get(&found).unwrap_or(found);

            let own = attrs.get(doc, name).unwrap_or_default();
            let theirs = attrs.get(doc, &found).unwrap_or_default();
            if own.gender.map_or(true, |g| g == Gender::Unknown) {
                if let Some(gender) = theirs.gender {
                    attrs.set_gender(doc, name, gender);
                }
            }
            if own.plural.is_none() {
                if let Some(plural) = theirs.plural {
                    attrs.set_plural(doc, name, plural);
                }
            }

            log::debug!(
                "Alias: {:?} {} -> {:?} {}",
                texts[idx],
                name,
                doc.text(&root),
                root
            );
            table.entries.insert(*name, root);
        }
        table
    }

    /// Root of `span`, after trimming it to its entity boundary.
    ///
    /// The trimmed span starts at the first entity token and ends before
    /// the next non-entity token; without entity tokens the span is used as
    /// is. "the Acme board" looks up "Acme".
    #[must_use]
    pub fn lookup(&self, doc: &Document, span: &Span) -> Option<Span> {
        let trimmed = entity_boundary(doc, span);
        let root = self.entries.get(&trimmed).copied();
        log::trace!("Lookup {} (trimmed {}): {:?}", span, trimmed, root);
        root
    }

    /// Root of exactly `span`.
    #[must_use]
    pub fn get(&self, span: &Span) -> Option<Span> {
        self.entries.get(span).copied()
    }

    /// True if `span` has an entry.
    #[must_use]
    pub fn contains(&self, span: &Span) -> bool {
        self.entries.contains_key(span)
    }

    /// Map `span` to `root`.
    ///
    /// Pronoun roots and self-links are refused; `root` is followed to its
    /// own root so values stay roots. Returns whether an entry was written.
    pub fn insert(&mut self, doc: &Document, span: Span, root: Span) -> bool {
        let root = self.get(&root).unwrap_or(root);
        if root == span || is_pronoun(doc, &root) {
            return false;
        }
        self.entries.insert(span, root);
        true
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries as `(mention, root)`, sorted by mention.
    #[must_use]
    pub fn entries(&self) -> Vec<(Span, Span)> {
        let mut entries: Vec<(Span, Span)> = self.entries.iter().map(|(k, v)| (*k, *v)).collect();
        entries.sort();
        entries
    }
}

/// `span` trimmed to its first run of entity tokens.
fn entity_boundary(doc: &Document, span: &Span) -> Span {
    let mut start = None;
    let mut end = None;
    for token in doc.span_tokens(span) {
        match start {
            None if token.ent_iob.is_inside() => start = Some(token.index),
            Some(_) if !token.ent_iob.is_inside() => {
                end = Some(token.index);
                break;
            }
            _ => {}
        }
    }
    Span::new(start.unwrap_or(span.start), end.unwrap_or(span.end))
}

/// True if `candidate` is longer than `name`, in both characters and tokens,
/// and starts with exactly `name`'s tokens.
fn is_longer_with_matching_forenames(doc: &Document, candidate: &Span, name: &Span) -> bool {
    if candidate.len() <= name.len() || doc.text(candidate).len() <= doc.text(name).len() {
        return false;
    }
    doc.span_tokens(candidate)
        .iter()
        .zip(doc.span_tokens(name))
        .all(|(a, b)| a.text == b.text)
}
