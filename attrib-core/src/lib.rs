//! # attrib-core
//!
//! Core data model for the attrib workspace.
//!
//! This crate provides:
//! - **Tokens**: `Token`, `Iob`, `EntityLabel` (annotator output)
//! - **Spans**: `Span`, half-open token ranges used as mention keys
//! - **Documents**: `Document`, `EntitySpan`, quoted-text helpers
//! - **Quotes**: `Quote` (cue, sources, content, resolved coreferences)
//! - **Attributes**: `Gender`, `MentionKind`
//!
//! All other crates in the workspace depend on `attrib-core` so that the
//! resolver, the trainer and the CLI agree on one set of types.

#![warn(missing_docs)]

pub mod attrs;
pub mod document;
pub mod error;
pub mod quote;
pub mod span;
pub mod token;

pub use attrs::{Gender, MentionKind};
pub use document::{
    entities_from_iob, is_quotation_mark, quoted_segments, DocId, Document, EntitySpan,
    SalientEntity,
};
pub use error::{Error, Result};
pub use quote::{contents_of, iob_labels, sources_of, Quote};
pub use span::{is_inside_spans, overlaps_any, Span};
pub use token::{EntityLabel, Iob, Token};
