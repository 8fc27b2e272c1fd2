//! Integration tests for quote source resolution.
//!
//! Resolution runs with a constant scorer, so these exercise mention
//! extraction, the alias table, candidate filtering and chain following
//! without a trained model.

use attrib::gender::{prefix_gender, ForenameGenderClassifier};
use attrib::mention::{MentionAttrs, MentionExtractor};
use attrib::{
    contents_of, iob_labels, AliasTable, ConstantScorer, CoreferenceResolver, Document,
    EntityLabel, EntitySpan, Gender, Iob, Quote, ResolverConfig, Span, Token,
};
use proptest::prelude::*;
use std::sync::Arc;

// =============================================================================
// Helpers
// =============================================================================

fn resolver() -> CoreferenceResolver {
    CoreferenceResolver::with_scorer(
        Arc::new(ConstantScorer(0.5)),
        Arc::new(ForenameGenderClassifier::new()),
        ResolverConfig::default(),
    )
}

fn person(text: &str, iob: Iob) -> Token {
    Token::new(text, "PROPN", "NNP").with_entity(EntityLabel::Person, iob)
}

fn org(text: &str) -> Token {
    Token::new(text, "PROPN", "NNP").with_entity(EntityLabel::Organization, Iob::Begin)
}

fn pron(text: &str) -> Token {
    Token::new(text, "PRON", "PRP")
}

fn word(text: &str) -> Token {
    Token::new(text, "X", "XX")
}

fn resolve(doc: &Document, quotes: &mut [Quote]) {
    let labels = iob_labels(doc.len(), &contents_of(quotes));
    resolver().resolve_document(doc, quotes, &labels);
}

fn coreference_texts(doc: &Document, quote: &Quote) -> Vec<String> {
    quote.coreferences.iter().map(|s| doc.text(s)).collect()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_titled_name_and_pronoun() {
    // Dr. Jane Smith arrived . She said the results are clear
    let doc = Document::new(vec![
        person("Dr.", Iob::Begin),
        person("Jane", Iob::Inside),
        person("Smith", Iob::Inside),
        word("arrived"),
        word("."),
        pron("She"),
        word("said"),
        word("the"),
        word("results"),
        word("are"),
        word("clear"),
    ]);
    let mut quotes = vec![Quote::new(
        Span::new(6, 7),
        vec![Span::new(5, 6)],
        vec![Span::new(7, 11)],
    )];
    resolve(&doc, &mut quotes);
    assert_eq!(coreference_texts(&doc, &quotes[0]), vec!["Dr. Jane Smith"]);
}

#[test]
fn test_source_pronoun_after_cue() {
    // Dr. Jane Smith said she was pleased .
    let doc = Document::new(vec![
        person("Dr.", Iob::Begin),
        person("Jane", Iob::Inside),
        person("Smith", Iob::Inside),
        word("said"),
        pron("she"),
        word("was"),
        word("pleased"),
        word("."),
    ]);
    let mut quotes = vec![Quote::new(
        Span::new(3, 4),
        vec![Span::new(4, 5)],
        vec![Span::new(5, 7)],
    )];
    resolve(&doc, &mut quotes);
    assert_eq!(coreference_texts(&doc, &quotes[0]), vec!["Dr. Jane Smith"]);
}

#[test]
fn test_it_picks_most_recent_organisation() {
    // Acme met Globex . It said no
    let doc = Document::new(vec![
        org("Acme"),
        word("met"),
        org("Globex"),
        word("."),
        pron("It"),
        word("said"),
        word("no"),
    ]);
    let mut quotes = vec![Quote::new(
        Span::new(5, 6),
        vec![Span::new(4, 5)],
        vec![Span::new(6, 7)],
    )];
    resolve(&doc, &mut quotes);
    assert_eq!(coreference_texts(&doc, &quotes[0]), vec!["Globex"]);
}

#[test]
fn test_pronoun_through_surname_to_full_name() {
    // Barack Obama spoke . Obama said hello . He added goodbye
    let doc = Document::new(vec![
        person("Barack", Iob::Begin),
        person("Obama", Iob::Inside),
        word("spoke"),
        word("."),
        person("Obama", Iob::Begin),
        word("said"),
        word("hello"),
        word("."),
        pron("He"),
        word("added"),
        word("goodbye"),
    ]);
    let mut quotes = vec![
        Quote::new(Span::new(5, 6), vec![Span::new(4, 5)], vec![Span::new(6, 7)]),
        Quote::new(Span::new(9, 10), vec![Span::new(8, 9)], vec![Span::new(10, 11)]),
    ];
    resolve(&doc, &mut quotes);
    assert_eq!(coreference_texts(&doc, &quotes[0]), vec!["Barack Obama"]);
    assert_eq!(coreference_texts(&doc, &quotes[1]), vec!["Barack Obama"]);
}

#[test]
fn test_quotes_resolved_in_document_order() {
    // Same document as above, quotes given out of order.
    let doc = Document::new(vec![
        person("Barack", Iob::Begin),
        person("Obama", Iob::Inside),
        word("spoke"),
        word("."),
        pron("He"),
        word("said"),
        word("hello"),
        word("."),
        pron("He"),
        word("added"),
        word("goodbye"),
    ]);
    let mut quotes = vec![
        Quote::new(Span::new(9, 10), vec![Span::new(8, 9)], vec![Span::new(10, 11)]),
        Quote::new(Span::new(5, 6), vec![Span::new(4, 5)], vec![Span::new(6, 7)]),
    ];
    resolve(&doc, &mut quotes);
    assert_eq!(coreference_texts(&doc, &quotes[0]), vec!["Barack Obama"]);
    assert_eq!(coreference_texts(&doc, &quotes[1]), vec!["Barack Obama"]);
}

#[test]
fn test_pronoun_without_candidates_is_excluded() {
    let doc = Document::new(vec![pron("She"), word("said"), word("hello")]);
    let mut quotes = vec![Quote::new(
        Span::new(1, 2),
        vec![Span::new(0, 1)],
        vec![Span::new(2, 3)],
    )];
    resolve(&doc, &mut quotes);
    assert!(quotes[0].coreferences.is_empty());
}

#[test]
fn test_gender_mismatch_filters_candidates() {
    // John Brown arrived . She said hello
    let doc = Document::new(vec![
        person("John", Iob::Begin),
        person("Brown", Iob::Inside),
        word("arrived"),
        word("."),
        pron("She"),
        word("said"),
        word("hello"),
    ]);
    let mut quotes = vec![Quote::new(
        Span::new(5, 6),
        vec![Span::new(4, 5)],
        vec![Span::new(6, 7)],
    )];
    resolve(&doc, &mut quotes);
    assert!(quotes[0].coreferences.is_empty());
}

#[test]
fn test_name_inside_content_is_not_a_candidate() {
    // She said Jane Smith won
    let doc = Document::new(vec![
        pron("She"),
        word("said"),
        person("Jane", Iob::Begin),
        person("Smith", Iob::Inside),
        word("won"),
    ]);
    let mut quotes = vec![Quote::new(
        Span::new(1, 2),
        vec![Span::new(0, 1)],
        vec![Span::new(2, 5)],
    )];
    resolve(&doc, &mut quotes);
    assert!(quotes[0].coreferences.is_empty());
}

#[test]
fn test_empty_quote_list() {
    let doc = Document::new(vec![person("Jane", Iob::Begin), word("left")]);
    let mut quotes: Vec<Quote> = Vec::new();
    resolve(&doc, &mut quotes);
    assert!(quotes.is_empty());
}

// =============================================================================
// Chains
// =============================================================================

#[test]
fn test_alternating_pronouns_terminate() {
    // it said a . they said b . it said c . they said d
    let mut tokens = Vec::new();
    let mut quotes = Vec::new();
    for (i, p) in ["it", "they", "it", "they"].iter().enumerate() {
        let base = i * 4;
        tokens.push(pron(p));
        tokens.push(word("said"));
        tokens.push(word("x"));
        tokens.push(word("."));
        quotes.push(Quote::new(
            Span::token(base + 1),
            vec![Span::token(base)],
            vec![Span::token(base + 2)],
        ));
    }
    let doc = Document::new(tokens);
    let labels = iob_labels(doc.len(), &contents_of(&quotes));
    let resolver = resolver();
    let mut session = resolver.session(&doc, &quotes, &labels);
    let mentions = session.mentions().len();
    assert_eq!(mentions, 4);

    for quote in &quotes {
        let resolution = session.resolve(quote.sources[0], Some(quote));
        assert!(resolution.steps <= mentions);
        assert_eq!(resolution.root, None);
    }
}

#[test]
fn test_opposite_gender_pronouns_do_not_link() {
    // he said a . she said b . he said c
    let mut tokens = Vec::new();
    let mut quotes = Vec::new();
    for (i, p) in ["he", "she", "he"].iter().enumerate() {
        let base = i * 4;
        tokens.extend([pron(p), word("said"), word("x"), word(".")]);
        quotes.push(Quote::new(
            Span::token(base + 1),
            vec![Span::token(base)],
            vec![Span::token(base + 2)],
        ));
    }
    let doc = Document::new(tokens);
    resolve(&doc, &mut quotes);
    assert!(quotes.iter().all(|q| q.coreferences.is_empty()));
}

#[test]
fn test_resolution_is_deterministic() {
    let build = || {
        Document::new(vec![
            person("Mrs", Iob::Begin),
            person("Thatcher", Iob::Inside),
            word("met"),
            org("Acme"),
            word("."),
            person("Thatcher", Iob::Begin),
            word("said"),
            word("yes"),
            word("."),
            pron("She"),
            word("said"),
            word("no"),
        ])
    };
    let quotes = vec![
        Quote::new(Span::new(6, 7), vec![Span::new(5, 6)], vec![Span::new(7, 8)]),
        Quote::new(Span::new(10, 11), vec![Span::new(9, 10)], vec![Span::new(11, 12)]),
    ];

    let doc = build();
    let mut first = quotes.clone();
    resolve(&doc, &mut first);
    let mut second = quotes.clone();
    resolve(&build(), &mut second);
    assert_eq!(first, second);
    assert_eq!(coreference_texts(&doc, &first[1]), vec!["Mrs Thatcher"]);
}

// =============================================================================
// Gender and plurality
// =============================================================================

#[test]
fn test_prefix_gender() {
    assert_eq!(prefix_gender("Mrs."), Gender::Female);
    assert_eq!(prefix_gender("Mr"), Gender::Male);
    assert_eq!(prefix_gender("Dr"), Gender::Unknown);
}

#[test]
fn test_they_is_plural_and_organisation_plural_neutral() {
    let doc = Document::new(vec![org("Acme"), word("said"), pron("they"), word("left")]);
    let forenames = ForenameGenderClassifier::new();
    let mut attrs = MentionAttrs::new();
    MentionExtractor::new(&forenames).extract(&doc, &[], &mut attrs);

    assert!(attrs.plural(&doc, &Span::new(2, 3)));
    assert!(attrs.plural(&doc, &Span::new(0, 1)));
    assert_eq!(attrs.gender(&doc, &Span::new(0, 1), &forenames), Gender::Neutral);
}

#[test]
fn test_organisation_sharing_a_surname_stays_neutral() {
    // Jane Ford met Ford . She said yes
    let doc = Document::new(vec![
        person("Jane", Iob::Begin),
        person("Ford", Iob::Inside),
        word("met"),
        org("Ford"),
        word("."),
        pron("She"),
        word("said"),
        word("yes"),
    ]);
    let forenames = ForenameGenderClassifier::new();
    let mut attrs = MentionAttrs::new();
    MentionExtractor::new(&forenames).extract(&doc, &[], &mut attrs);
    let company = Span::new(3, 4);
    assert_eq!(attrs.gender(&doc, &company, &forenames), Gender::Neutral);
    assert!(attrs.plural(&doc, &company));

    let mut quotes = vec![Quote::new(
        Span::new(6, 7),
        vec![Span::new(5, 6)],
        vec![Span::new(7, 8)],
    )];
    resolve(&doc, &mut quotes);
    assert_eq!(coreference_texts(&doc, &quotes[0]), vec!["Jane Ford"]);
}

#[test]
fn test_organisation_from_entity_list_only() {
    // Acme Corp grew . It said no, with the entity given apart from the tokens
    let doc = Document::new(vec![
        word("Acme"),
        word("Corp"),
        word("grew"),
        word("."),
        pron("It"),
        word("said"),
        word("no"),
    ])
    .with_entities(vec![EntitySpan::new(0, 2, EntityLabel::Organization)])
    .unwrap();
    let forenames = ForenameGenderClassifier::new();
    let mut attrs = MentionAttrs::new();
    MentionExtractor::new(&forenames).extract(&doc, &[], &mut attrs);
    let company = Span::new(0, 2);
    assert_eq!(attrs.gender(&doc, &company, &forenames), Gender::Neutral);
    assert!(attrs.plural(&doc, &company));

    let mut quotes = vec![Quote::new(
        Span::new(5, 6),
        vec![Span::new(4, 5)],
        vec![Span::new(6, 7)],
    )];
    resolve(&doc, &mut quotes);
    assert_eq!(coreference_texts(&doc, &quotes[0]), vec!["Acme Corp"]);
}

// =============================================================================
// Alias table properties
// =============================================================================

const NAMES: &[&[&str]] = &[
    &["Obama"],
    &["Barack", "Obama"],
    &["Mr", "Obama"],
    &["Jane"],
    &["Jane", "Smith"],
    &["Dr.", "Jane", "Smith"],
    &["Smith"],
];

fn names_document(picks: &[usize]) -> Document {
    let mut tokens = Vec::new();
    for (n, &pick) in picks.iter().enumerate() {
        if n > 0 {
            tokens.push(Token::new("and", "CCONJ", "CC"));
        }
        for (i, part) in NAMES[pick].iter().enumerate() {
            let iob = if i == 0 { Iob::Begin } else { Iob::Inside };
            tokens.push(person(part, iob));
        }
    }
    Document::new(tokens)
}

proptest! {
    #[test]
    fn alias_entries_never_point_forward(picks in prop::collection::vec(0..NAMES.len(), 1..12)) {
        let doc = names_document(&picks);
        let forenames = ForenameGenderClassifier::new();
        let mut attrs = MentionAttrs::new();
        let mentions = MentionExtractor::new(&forenames).extract(&doc, &[], &mut attrs);
        let table = AliasTable::build(&doc, mentions.names(), &mut attrs);
        for (mention, root) in table.entries() {
            prop_assert!(root.start < mention.start, "{} -> {}", mention, root);
            prop_assert!(!table.contains(&root), "root {} is itself aliased", root);
        }
    }

    #[test]
    fn alias_table_is_deterministic(picks in prop::collection::vec(0..NAMES.len(), 1..10)) {
        let forenames = ForenameGenderClassifier::new();
        let build = || {
            let doc = names_document(&picks);
            let mut attrs = MentionAttrs::new();
            let mentions = MentionExtractor::new(&forenames).extract(&doc, &[], &mut attrs);
            AliasTable::build(&doc, mentions.names(), &mut attrs).entries()
        };
        prop_assert_eq!(build(), build());
    }
}
