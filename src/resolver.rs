//! Coreference resolution for quote sources.
//!
//! For each document:
//! - collect the person and organisation names and the pronouns,
//! - link every name to the earliest, fullest earlier form (the alias table),
//! - then, quote by quote in document order, follow each source through the
//!   alias table and the antecedent scorer until a root mention is reached.
//!
//! Resolved pronouns are added to the alias table, so later quotes reuse
//! earlier decisions.

use crate::alias::AliasTable;
use crate::config::ResolverConfig;
use crate::gender::ForenameGender;
use crate::mention::{is_pronoun, MentionAttrs, MentionExtractor, Mentions};
use crate::model::ModelArtifact;
use crate::scorer::{best_candidate, candidate_features, AntecedentScorer, CandidateFinder};
use crate::Result;
use attrib_core::{contents_of, sources_of, Document, Iob, Quote, Span};
use std::path::Path;
use std::sync::Arc;

/// Resolves quote sources to their root mentions.
///
/// Cheap to clone; the model is shared and never mutated, so one resolver
/// can serve many threads. All per-document state lives in a
/// [`DocumentSession`].
#[derive(Clone)]
pub struct CoreferenceResolver {
    scorer: Arc<dyn AntecedentScorer>,
    forenames: Arc<dyn ForenameGender>,
    config: ResolverConfig,
}

impl std::fmt::Debug for CoreferenceResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreferenceResolver")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CoreferenceResolver {
    /// Load the model bundle from `model_dir`.
    ///
    /// A missing or unreadable bundle is an error: there is no fallback
    /// scorer.
    pub fn load(model_dir: impl AsRef<Path>, config: ResolverConfig) -> Result<Self> {
        config.validate()?;
        let artifact = ModelArtifact::load(model_dir)?;
        log::info!("Loaded coreference model built {}", artifact.timestamp);
        Ok(Self::from_artifact(artifact, config))
    }

    /// Resolver over an in-memory bundle.
    #[must_use]
    pub fn from_artifact(artifact: ModelArtifact, config: ResolverConfig) -> Self {
        let model = Arc::new(artifact);
        Self {
            scorer: model.clone(),
            forenames: model,
            config,
        }
    }

    /// Resolver over any scorer and forename source.
    #[must_use]
    pub fn with_scorer(
        scorer: Arc<dyn AntecedentScorer>,
        forenames: Arc<dyn ForenameGender>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            scorer,
            forenames,
            config,
        }
    }

    /// Settings in use.
    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Forename gender source.
    #[must_use]
    pub fn forenames(&self) -> &dyn ForenameGender {
        self.forenames.as_ref()
    }

    /// Fill in `coreferences` for every quote of a document.
    ///
    /// `content_labels` marks the tokens of quote content spans (see
    /// [`attrib_core::iob_labels`]). Quotes are resolved in document order
    /// whatever their order in the slice.
    pub fn resolve_document(&self, doc: &Document, quotes: &mut [Quote], content_labels: &[Iob]) {
        if quotes.is_empty() {
            return;
        }
        let mut session = self.session(doc, quotes, content_labels);
        session.resolve_quotes(quotes);
    }

    /// Start resolving one document.
    ///
    /// Extracts mentions and builds the alias table; the session then
    /// resolves quotes one at a time.
    #[must_use]
    pub fn session<'a>(
        &'a self,
        doc: &'a Document,
        quotes: &[Quote],
        content_labels: &[Iob],
    ) -> DocumentSession<'a> {
        let mut attrs = MentionAttrs::new();
        let mentions = MentionExtractor::new(self.forenames.as_ref()).extract(doc, content_labels, &mut attrs);
        let table = AliasTable::build(doc, mentions.names(), &mut attrs);
        log::debug!(
            "Document {:?}: {} mentions, {} aliases",
            doc.name().unwrap_or("-"),
            mentions.len(),
            table.len()
        );
        DocumentSession {
            doc,
            resolver: self,
            sources: sources_of(quotes),
            contents: contents_of(quotes),
            mentions,
            attrs,
            table,
        }
    }
}

/// Outcome of resolving one source span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Where the chain stopped
    pub terminal: Span,
    /// The root mention, or `None` when the chain ended on a pronoun
    pub root: Option<Span>,
    /// Links followed
    pub steps: usize,
}

/// Per-document resolution state: mentions, attributes and alias table.
pub struct DocumentSession<'a> {
    doc: &'a Document,
    resolver: &'a CoreferenceResolver,
    sources: Vec<Span>,
    contents: Vec<Span>,
    mentions: Mentions,
    attrs: MentionAttrs,
    table: AliasTable,
}

impl<'a> DocumentSession<'a> {
    /// Mentions of the document.
    #[must_use]
    pub fn mentions(&self) -> &Mentions {
        &self.mentions
    }

    /// The alias table in its current state.
    #[must_use]
    pub fn table(&self) -> &AliasTable {
        &self.table
    }

    /// Resolve every quote, in document order.
    pub fn resolve_quotes(&mut self, quotes: &mut [Quote]) {
        let mut order: Vec<usize> = (0..quotes.len()).collect();
        order.sort_by_key(|&i| (quotes[i].position(), quotes[i].cue.start));
        for i in order {
            self.resolve_quote(&mut quotes[i]);
        }
    }

    /// Replace the quote's `coreferences` with the roots of its sources.
    ///
    /// A source contributes its root only when the root reads differently
    /// from the source itself.
    pub fn resolve_quote(&mut self, quote: &mut Quote) {
        let mut coreferences = Vec::new();
        for source in quote.sources.clone() {
            let resolution = self.resolve(source, Some(&*quote));
            let Some(root) = resolution.root else {
                continue;
            };
            if self.doc.text(&root) != self.doc.text(&source) && !coreferences.contains(&root) {
                coreferences.push(root);
            }
        }
        quote.coreferences = coreferences;
    }

    /// Follow `span` to its root.
    ///
    /// Loops through alias-table lookups and pronoun antecedents, never
    /// visiting a pronoun twice. Pronouns passed on the way are recorded in
    /// the alias table against the root.
    pub fn resolve(&mut self, span: Span, quote: Option<&Quote>) -> Resolution {
        let doc = self.doc;
        let limit = self.mentions.len() + 1;
        let mut visited: Vec<Span> = Vec::new();
        let mut current = span;
        let mut steps = 0;

        let terminal = loop {
            if let Some(root) = self.table.lookup(doc, &current) {
                break root;
            }
            if !is_pronoun(doc, &current) || visited.contains(&current) || steps >= limit {
                break current;
            }
            visited.push(current);
            steps += 1;
            match self.antecedent(&current, quote) {
                Some(candidate) => current = candidate,
                None => break current,
            }
        };

        let root = (!is_pronoun(doc, &terminal)).then_some(terminal);
        if root.is_some() {
            for mention in visited {
                if !self.table.contains(&mention) {
                    self.table.insert(doc, mention, terminal);
                }
            }
        }
        log::debug!(
            "Resolved {:?} {} -> {:?} in {} steps",
            doc.text(&span),
            span,
            root.map(|r| doc.text(&r)),
            steps
        );
        Resolution {
            terminal,
            root,
            steps,
        }
    }

    /// Best-scoring antecedent of a pronoun, if any clears the threshold.
    fn antecedent(&mut self, pronoun: &Span, quote: Option<&Quote>) -> Option<Span> {
        let doc = self.doc;
        let resolver = self.resolver;
        let config = &resolver.config;
        let forenames = resolver.forenames.as_ref();
        let finder = CandidateFinder::new(doc, self.mentions.all(), &self.sources, &self.contents, forenames);
        let candidates =
            finder.closest_preceding(&mut self.attrs, pronoun, config.inference_candidates, quote);
        if candidates.is_empty() {
            log::debug!("No candidates for {:?} {}", doc.text(pronoun), pronoun);
            return None;
        }

        let features: Vec<_> = candidates
            .iter()
            .enumerate()
            .map(|(rank, c)| candidate_features(doc, &mut self.attrs, forenames, c, rank, pronoun))
            .collect();
        let probabilities = resolver.scorer.score(&features);
        if probabilities.len() != candidates.len() {
            log::warn!(
                "Scorer returned {} probabilities for {} candidates",
                probabilities.len(),
                candidates.len()
            );
            return None;
        }

        let (index, probability) = best_candidate(&probabilities, config.probability_threshold)?;
        let chosen = candidates[index];
        log::debug!(
            "Antecedent of {:?} {}: {:?} {} (p={:.3})",
            doc.text(pronoun),
            pronoun,
            doc.text(&chosen),
            chosen,
            probability
        );
        Some(chosen)
    }
}
