//! # attrib
//!
//! Quote source coreference resolution.
//!
//! Given an annotated document and the quotes found in it (cue, sources,
//! content), attrib works out which earlier name a pronoun source such as
//! "she" or "they" refers to.
//!
//! - **Alias table**: short and titled names linked to their first full form
//! - **Chain resolution**: pronouns followed through other pronouns and
//!   aliases to a root name, with cycle protection
//! - **Gender and plurality**: honorifics, forename lists, pronoun tables
//! - **Antecedent classifier**: logistic regression over candidate features
//! - **Training and evaluation** on annotated JSON corpora
//!
//! ## Quick Start
//!
//! ```rust
//! use attrib::prelude::*;
//! use std::sync::Arc;
//!
//! let doc = Document::new(vec![
//!     Token::new("Jane", "PROPN", "NNP").with_entity(EntityLabel::Person, Iob::Begin),
//!     Token::new("Smith", "PROPN", "NNP").with_entity(EntityLabel::Person, Iob::Inside),
//!     Token::new("arrived", "VERB", "VBD"),
//!     Token::new(".", "PUNCT", "."),
//!     Token::new("She", "PRON", "PRP"),
//!     Token::new("said", "VERB", "VBD"),
//!     Token::new("hello", "INTJ", "UH"),
//! ]);
//! let mut quotes = vec![Quote::new(Span::new(5, 6), vec![Span::new(4, 5)], vec![Span::new(6, 7)])];
//! let labels = iob_labels(doc.len(), &contents_of(&quotes));
//!
//! // Any scorer works; a trained model comes from `CoreferenceResolver::load`.
//! let resolver = CoreferenceResolver::with_scorer(
//!     Arc::new(ConstantScorer(0.9)),
//!     Arc::new(ForenameGenderClassifier::new()),
//!     ResolverConfig::default(),
//! );
//! resolver.resolve_document(&doc, &mut quotes, &labels);
//! assert_eq!(doc.text(&quotes[0].coreferences[0]), "Jane Smith");
//! ```
//!
//! ## Training
//!
//! ```rust,ignore
//! use attrib::{Config, Corpus, ForenameGenderClassifier};
//!
//! let corpus = Corpus::load("data/train")?;
//! let model = attrib::train::build_and_save(
//!     &corpus,
//!     ForenameGenderClassifier::new(),
//!     &Config::default(),
//!     "models/coref",
//! )?;
//! ```

#![warn(missing_docs)]

pub mod alias;
pub mod config;
pub mod corpus;
pub mod error;
pub mod eval;
pub mod gender;
pub mod mention;
pub mod model;
pub mod resolver;
pub mod scorer;
pub mod train;

#[cfg(feature = "cli")]
pub mod cli;

pub mod prelude {
    //! Commonly used items, re-exported for convenience.
    pub use crate::config::{Config, ResolverConfig, TrainingConfig};
    pub use crate::error::{Error, Result};
    pub use crate::gender::{ForenameGender, ForenameGenderClassifier};
    pub use crate::resolver::CoreferenceResolver;
    pub use crate::scorer::{AntecedentScorer, ConstantScorer};
    pub use attrib_core::{
        contents_of, iob_labels, Document, EntityLabel, Gender, Iob, Quote, Span, Token,
    };
}

// Re-exports
pub use alias::AliasTable;
pub use attrib_core::{
    contents_of, iob_labels, sources_of, DocId, Document, EntityLabel, EntitySpan, Gender, Iob,
    MentionKind, Quote, SalientEntity, Span, Token,
};
pub use config::{Config, ResolverConfig, TrainingConfig};
pub use corpus::{AnnotatedDocument, Corpus};
pub use error::{Error, Result};
pub use eval::{evaluate, CorefEvaluation};
pub use gender::{ForenameGender, ForenameGenderClassifier};
pub use mention::{MentionAttrs, MentionExtractor, Mentions};
pub use model::{ModelArtifact, MODEL_FILENAME};
pub use resolver::{CoreferenceResolver, DocumentSession, Resolution};
pub use scorer::{AntecedentScorer, ConstantScorer, FeatureSet};
pub use train::{build_and_save, build_model};
