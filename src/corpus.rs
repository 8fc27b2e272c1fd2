//! Annotated corpora.
//!
//! One JSON file per document:
//!
//! ```json
//! {
//!   "id": "bbc-001",
//!   "tokens": [{"text": "Jane", "pos": "PROPN", "tag": "NNP", "ent_type": "PERSON", "ent_iob": "B"}],
//!   "sentences": [[0, 1]],
//!   "quotes": [{"cue": [0, 1], "sources": [[0, 1]], "contents": [[0, 1]]}],
//!   "coref_groups": [[[0, 1]]]
//! }
//! ```
//!
//! `sentences`, `entities`, `quotes` and `coref_groups` are optional.
//! Entities default to the spans marked on the tokens.

use crate::{Error, Result};
use attrib_core::{Document, EntitySpan, Quote, Span, Token};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    id: Option<String>,
    tokens: Vec<Token>,
    #[serde(default)]
    sentences: Option<Vec<Span>>,
    #[serde(default)]
    entities: Option<Vec<EntitySpan>>,
    #[serde(default)]
    quotes: Vec<Quote>,
    #[serde(default)]
    coref_groups: Option<Vec<Vec<Span>>>,
}

/// A document with its gold quotes and, optionally, coreference groups.
#[derive(Debug, Clone)]
pub struct AnnotatedDocument {
    /// The annotated text
    pub document: Document,
    /// Quotes, with any gold coreferences cleared
    pub quotes: Vec<Quote>,
    /// Groups of co-referring spans; `None` when not annotated
    pub coref_groups: Option<Vec<Vec<Span>>>,
}

impl AnnotatedDocument {
    /// Parse one JSON document.
    ///
    /// Quote spans outside the document are an error. Coreference spans
    /// outside it are dropped with a warning, and groups left empty are
    /// removed.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawDocument = serde_json::from_str(json)?;
        let mut document = Document::new(raw.tokens);
        if let Some(id) = raw.id {
            document = document.with_name(id);
        }
        if let Some(sentences) = raw.sentences {
            document = document.with_sentences(sentences)?;
        }
        if let Some(entities) = raw.entities {
            document = document.with_entities(entities)?;
        }

        let mut quotes = raw.quotes;
        for quote in &mut quotes {
            document.check_span(&quote.cue)?;
            for span in quote.sources.iter().chain(&quote.contents) {
                document.check_span(span)?;
            }
            quote.coreferences.clear();
        }

        let coref_groups = raw.coref_groups.map(|groups| {
            groups
                .into_iter()
                .map(|group| {
                    group
                        .into_iter()
                        .filter(|span| match document.check_span(span) {
                            Ok(()) if !span.is_empty() => true,
                            _ => {
                                log::warn!(
                                    "Dropping coreference span {} in {:?}",
                                    span,
                                    document.name().unwrap_or("-")
                                );
                                false
                            }
                        })
                        .collect::<Vec<_>>()
                })
                .filter(|group| !group.is_empty())
                .collect()
        });

        Ok(Self {
            document,
            quotes,
            coref_groups,
        })
    }

    /// Parse one JSON file. The file name becomes the document name when
    /// the JSON has no `id`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let mut doc = Self::from_json_str(&text)
            .map_err(|e| Error::corpus(format!("{}: {}", path.display(), e)))?;
        if doc.document.name().is_none() {
            let name = path.file_stem().map_or_else(
                || path.display().to_string(),
                |s| s.to_string_lossy().into_owned(),
            );
            doc.document = doc.document.with_name(name);
        }
        Ok(doc)
    }

    /// Coreference group containing a span that starts where `span` starts.
    #[must_use]
    pub fn group_of(&self, span: &Span) -> Option<&[Span]> {
        self.coref_groups
            .as_ref()?
            .iter()
            .find(|group| group.iter().any(|s| s.start == span.start))
            .map(Vec::as_slice)
    }
}

/// A collection of annotated documents.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: Vec<AnnotatedDocument>,
}

impl Corpus {
    /// Corpus over in-memory documents.
    #[must_use]
    pub fn from_documents(documents: Vec<AnnotatedDocument>) -> Self {
        Self { documents }
    }

    /// Load a JSON file, or every `*.json` file under a directory.
    ///
    /// Directories are scanned recursively in sorted order. Files that fail
    /// to parse are skipped with a warning; a path that does not exist is an
    /// error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::corpus(format!("{} does not exist", path.display())));
        }
        let files = if path.is_dir() {
            json_files(path)?
        } else {
            vec![path.to_path_buf()]
        };

        let mut documents = Vec::with_capacity(files.len());
        for file in &files {
            match AnnotatedDocument::from_file(file) {
                Ok(doc) => documents.push(doc),
                Err(e) => log::warn!("Skipping {}: {}", file.display(), e),
            }
        }
        log::info!(
            "Loaded {} of {} documents from {}",
            documents.len(),
            files.len(),
            path.display()
        );
        Ok(Self { documents })
    }

    /// Documents in load order.
    #[must_use]
    pub fn documents(&self) -> &[AnnotatedDocument] {
        &self.documents
    }

    /// Iterate over documents.
    pub fn iter(&self) -> std::slice::Iter<'_, AnnotatedDocument> {
        self.documents.iter()
    }

    /// Number of documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True if the corpus has no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a AnnotatedDocument;
    type IntoIter = std::slice::Iter<'a, AnnotatedDocument>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}

fn json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = dir.join("**").join("*.json");
    let pattern = pattern
        .to_str()
        .ok_or_else(|| Error::corpus(format!("non UTF-8 path {}", dir.display())))?;
    let mut files: Vec<PathBuf> = glob::glob(pattern)
        .map_err(|e| Error::corpus(format!("bad pattern {}: {}", pattern, e)))?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                log::warn!("Cannot read {}: {}", e.path().display(), e);
                None
            }
        })
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "id": "d1",
        "tokens": [
            {"text": "Jane", "pos": "PROPN", "tag": "NNP", "ent_type": "PERSON", "ent_iob": "B"},
            {"text": "said", "pos": "VERB", "tag": "VBD"},
            {"text": "she", "pos": "PRON", "tag": "PRP"},
            {"text": "won", "pos": "VERB", "tag": "VBD"}
        ],
        "quotes": [{"cue": [1, 2], "sources": [[0, 1]], "contents": [[2, 4]]}],
        "coref_groups": [[[0, 1], [2, 3], [9, 10]]]
    }"#;

    #[test]
    fn test_parse_document() {
        let doc = AnnotatedDocument::from_json_str(DOC).unwrap();
        assert_eq!(doc.document.len(), 4);
        assert_eq!(doc.document.name(), Some("d1"));
        assert_eq!(doc.document.entities().len(), 1);
        assert_eq!(doc.quotes.len(), 1);
        // The out-of-range span is dropped.
        assert_eq!(doc.coref_groups, Some(vec![vec![Span::new(0, 1), Span::new(2, 3)]]));
        assert_eq!(doc.group_of(&Span::new(2, 3)).map(<[Span]>::len), Some(2));
        assert!(doc.group_of(&Span::new(1, 2)).is_none());
    }

    #[test]
    fn test_quote_out_of_range_is_error() {
        let json = r#"{"tokens": [{"text": "a"}], "quotes": [{"cue": [0, 3], "sources": [], "contents": []}]}"#;
        assert!(AnnotatedDocument::from_json_str(json).is_err());
    }

    #[test]
    fn test_load_directory_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("a.json"), DOC).unwrap();
        std::fs::write(dir.path().join("nested").join("b.json"), DOC).unwrap();
        std::fs::write(dir.path().join("broken.json"), "{").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let corpus = Corpus::load(dir.path()).unwrap();
        assert_eq!(corpus.len(), 2);
    }

    #[test]
    fn test_file_name_used_without_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("story.json");
        std::fs::write(&path, r#"{"tokens": [{"text": "a"}]}"#).unwrap();
        let corpus = Corpus::load(&path).unwrap();
        assert_eq!(corpus.documents()[0].document.name(), Some("story"));
        assert!(corpus.documents()[0].coref_groups.is_none());
    }

    #[test]
    fn test_missing_path_is_error() {
        assert!(matches!(
            Corpus::load("/definitely/not/here"),
            Err(Error::Corpus(_))
        ));
    }
}
