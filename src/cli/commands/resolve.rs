//! Resolve command - attach coreferences to the quotes of one document

use clap::Parser;
use serde::Serialize;

use super::super::output::{to_json, write_output};
use super::load_config;

use crate::corpus::AnnotatedDocument;
use crate::resolver::CoreferenceResolver;
use attrib_core::{contents_of, iob_labels, Document, Quote, SalientEntity, Span};

/// Resolve quote sources in a document
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Directory holding the model bundle
    #[arg(long, value_name = "DIR")]
    pub model_path: String,

    /// TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<String>,

    /// Write the JSON to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,

    /// Annotated document (JSON)
    #[arg(value_name = "FILE")]
    pub file: String,
}

#[derive(Debug, Serialize)]
struct ResolvedQuote {
    cue: String,
    sources: Vec<String>,
    contents: Vec<String>,
    coreferences: Vec<String>,
    spans: Quote,
}

#[derive(Debug, Serialize)]
struct ResolvedDocument {
    name: Option<String>,
    quotes: Vec<ResolvedQuote>,
    salient_entities: Vec<SalientEntity>,
}

fn texts(doc: &Document, spans: &[Span]) -> Vec<String> {
    spans.iter().map(|s| doc.text(s)).collect()
}

fn render(doc: &Document, quotes: Vec<Quote>) -> ResolvedDocument {
    let quotes = quotes
        .into_iter()
        .map(|quote| ResolvedQuote {
            cue: doc.text(&quote.cue),
            sources: texts(doc, &quote.sources),
            contents: texts(doc, &quote.contents),
            coreferences: texts(doc, &quote.coreferences),
            spans: quote,
        })
        .collect();
    ResolvedDocument {
        name: doc.name().map(str::to_string),
        quotes,
        salient_entities: doc.salient_entities(),
    }
}

/// Run the `resolve` command.
pub fn run(args: ResolveArgs) -> Result<(), String> {
    let config = load_config(args.config.as_deref())?;
    let resolver =
        CoreferenceResolver::load(&args.model_path, config.resolver).map_err(|e| e.to_string())?;
    let annotated = AnnotatedDocument::from_file(&args.file).map_err(|e| e.to_string())?;

    let doc = &annotated.document;
    let mut quotes = annotated.quotes.clone();
    let labels = iob_labels(doc.len(), &contents_of(&quotes));
    resolver.resolve_document(doc, &mut quotes, &labels);

    let output = to_json(&render(doc, quotes))?;
    write_output(&output, args.output.as_deref())
}
