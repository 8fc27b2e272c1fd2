//! Candidate antecedent generation.

use crate::gender::ForenameGender;
use crate::mention::{is_noun, is_proper_noun, MentionAttrs};
use attrib_core::{overlaps_any, quoted_segments, Document, EntityLabel, Gender, Quote, Span};

/// Finds the mentions closest before a pronoun that could be its antecedent.
pub struct CandidateFinder<'a> {
    doc: &'a Document,
    mentions: &'a [Span],
    sources: &'a [Span],
    contents: &'a [Span],
    forenames: &'a dyn ForenameGender,
}

impl<'a> CandidateFinder<'a> {
    /// Create a finder over `mentions`, which must be sorted by position.
    #[must_use]
    pub fn new(
        doc: &'a Document,
        mentions: &'a [Span],
        sources: &'a [Span],
        contents: &'a [Span],
        forenames: &'a dyn ForenameGender,
    ) -> Self {
        Self {
            doc,
            mentions,
            sources,
            contents,
            forenames,
        }
    }

    /// Up to `n` candidates for `pronoun`, closest first.
    ///
    /// Skips mentions that end after the pronoun starts, overlap quote
    /// content, appear in the owning `quote`'s reported text, or carry a
    /// gender that contradicts a gendered pronoun. Proper and common nouns
    /// of unknown gender are kept. A candidate inside a quote source is
    /// replaced by the whole source.
    pub fn closest_preceding(
        &self,
        attrs: &mut MentionAttrs,
        pronoun: &Span,
        n: usize,
        quote: Option<&Quote>,
    ) -> Vec<Span> {
        let doc = self.doc;
        let pronoun_gender = attrs.gender(doc, pronoun, self.forenames);
        let mut found = Vec::new();
        if n == 0 {
            return found;
        }

        for candidate in self.mentions.iter().rev() {
            if candidate.end > pronoun.start {
                continue;
            }
            if overlaps_any(candidate, self.contents) {
                log::trace!("Skip {}: overlaps content", doc.text(candidate));
                continue;
            }
            if quote.is_some_and(|q| mention_in_quote(doc, candidate, q)) {
                log::trace!("Skip {}: mentioned in the quote", doc.text(candidate));
                continue;
            }

            let gender = attrs.gender(doc, candidate, self.forenames);
            let nominal = is_proper_noun(doc, candidate) || is_noun(doc, candidate);
            let unknown_noun = nominal && gender == Gender::Unknown;
            if pronoun_gender.is_gendered() && gender != pronoun_gender && !unknown_noun {
                log::trace!(
                    "Skip {}: gender {} vs {}",
                    doc.text(candidate),
                    gender,
                    pronoun_gender
                );
                continue;
            }

            let chosen = self
                .sources
                .iter()
                .find(|s| s.overlaps(candidate))
                .copied()
                .unwrap_or(*candidate);
            found.push(chosen);
            if found.len() >= n {
                break;
            }
        }
        found
    }
}

/// True if `mention` appears in the reported text of `quote`.
///
/// Each content span is checked against its text inside literal quotation
/// marks, or its whole text when it has none. A match is either the full
/// mention text or any person/organisation token of the mention.
#[must_use]
pub fn mention_in_quote(doc: &Document, mention: &Span, quote: &Quote) -> bool {
    let mention_text = doc.text(mention);
    let entity_tokens: Vec<&str> = doc
        .span_tokens(mention)
        .iter()
        .filter(|t| {
            matches!(
                t.ent_type,
                Some(EntityLabel::Person) | Some(EntityLabel::Organization)
            )
        })
        .map(|t| t.text.as_str())
        .collect();

    quote.contents.iter().any(|content| {
        let content_text = doc.text(content);
        let mut segments = quoted_segments(&content_text);
        if segments.is_empty() {
            segments.push(content_text.as_str());
        }
        segments.iter().any(|segment| {
            segment.contains(mention_text.as_str())
                || entity_tokens.iter().any(|t| segment.contains(t))
        })
    })
}
