//! Train → save → load → evaluate, end to end on a small corpus.

use attrib::model::ModelArtifact;
use attrib::{
    build_and_save, evaluate, AnnotatedDocument, Config, CoreferenceResolver, Corpus,
    ForenameGenderClassifier, ResolverConfig, MODEL_FILENAME,
};
use std::fs;

const ORGS: &[(&str, &str)] = &[
    ("Acme", "Globex"),
    ("Initech", "Hooli"),
    ("Umbrella", "Stark"),
    ("Wayne", "Cyberdyne"),
];

/// `A met B . They said yes`, with B and "They" in one group.
fn org_document(first: &str, second: &str) -> String {
    format!(
        r#"{{
        "tokens": [
            {{"text": "{first}", "pos": "PROPN", "tag": "NNP", "ent_type": "ORG", "ent_iob": "B"}},
            {{"text": "met", "pos": "VERB", "tag": "VBD"}},
            {{"text": "{second}", "pos": "PROPN", "tag": "NNP", "ent_type": "ORG", "ent_iob": "B"}},
            {{"text": ".", "pos": "PUNCT", "tag": "."}},
            {{"text": "They", "pos": "PRON", "tag": "PRP"}},
            {{"text": "said", "pos": "VERB", "tag": "VBD"}},
            {{"text": "yes", "pos": "INTJ", "tag": "UH"}}
        ],
        "quotes": [{{"cue": [5, 6], "sources": [[4, 5]], "contents": [[6, 7]]}}],
        "coref_groups": [[[2, 3], [4, 5]]]
    }}"#
    )
}

const PERSON_DOCUMENT: &str = r#"{
    "tokens": [
        {"text": "Jane", "pos": "PROPN", "tag": "NNP", "ent_type": "PERSON", "ent_iob": "B"},
        {"text": "Smith", "pos": "PROPN", "tag": "NNP", "ent_type": "PERSON", "ent_iob": "I"},
        {"text": "met", "pos": "VERB", "tag": "VBD"},
        {"text": "Acme", "pos": "PROPN", "tag": "NNP", "ent_type": "ORG", "ent_iob": "B"},
        {"text": ".", "pos": "PUNCT", "tag": "."},
        {"text": "She", "pos": "PRON", "tag": "PRP"},
        {"text": "said", "pos": "VERB", "tag": "VBD"},
        {"text": "yes", "pos": "INTJ", "tag": "UH"}
    ],
    "quotes": [{"cue": [6, 7], "sources": [[5, 6]], "contents": [[7, 8]]}],
    "coref_groups": [[[0, 2], [5, 6]]]
}"#;

fn write_corpus(dir: &std::path::Path) {
    for (i, (a, b)) in ORGS.iter().enumerate() {
        fs::write(dir.join(format!("org-{}.json", i)), org_document(a, b)).unwrap();
    }
    fs::write(dir.join("person.json"), PERSON_DOCUMENT).unwrap();
    // Unannotated documents load but do not count.
    fs::write(dir.join("plain.json"), r#"{"tokens": [{"text": "Hello"}]}"#).unwrap();
}

#[test]
fn test_train_save_load_evaluate() {
    let corpus_dir = tempfile::tempdir().unwrap();
    let model_dir = tempfile::tempdir().unwrap();
    write_corpus(corpus_dir.path());

    let corpus = Corpus::load(corpus_dir.path()).unwrap();
    assert_eq!(corpus.len(), ORGS.len() + 2);

    let artifact = build_and_save(
        &corpus,
        ForenameGenderClassifier::new(),
        &Config::default(),
        model_dir.path(),
    )
    .unwrap();
    assert!(model_dir.path().join(MODEL_FILENAME).exists());
    assert!(artifact.encoder.dim() > 0);

    let loaded = ModelArtifact::load(model_dir.path()).unwrap();
    assert_eq!(loaded.encoder.dim(), artifact.encoder.dim());
    assert_eq!(loaded.timestamp, artifact.timestamp);

    let resolver = CoreferenceResolver::load(model_dir.path(), ResolverConfig::default()).unwrap();
    let eval = evaluate(&resolver, &corpus);
    assert_eq!(eval.documents, ORGS.len() + 1);
    assert_eq!(eval.pronouns, ORGS.len() + 1);
    assert_eq!(eval.true_positives, eval.pronouns);
    assert!((eval.f1() - 1.0).abs() < 1e-9);
}

#[test]
fn test_trained_model_prefers_gold_antecedent() {
    let docs: Vec<AnnotatedDocument> = ORGS
        .iter()
        .map(|(a, b)| AnnotatedDocument::from_json_str(&org_document(a, b)).unwrap())
        .collect();
    let corpus = Corpus::from_documents(docs);
    let model_dir = tempfile::tempdir().unwrap();
    let artifact = build_and_save(
        &corpus,
        ForenameGenderClassifier::new(),
        &Config::default(),
        model_dir.path(),
    )
    .unwrap();

    // An unseen pair: the closer organisation is still chosen.
    let unseen = AnnotatedDocument::from_json_str(&org_document("Vandelay", "Soylent")).unwrap();
    let resolver = CoreferenceResolver::from_artifact(artifact, ResolverConfig::default());
    let mut quotes = unseen.quotes.clone();
    let doc = &unseen.document;
    let labels = attrib::iob_labels(doc.len(), &attrib::contents_of(&quotes));
    resolver.resolve_document(doc, &mut quotes, &labels);
    let texts: Vec<String> = quotes[0].coreferences.iter().map(|s| doc.text(s)).collect();
    assert_eq!(texts, vec!["Soylent"]);
}

#[test]
fn test_missing_model_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = CoreferenceResolver::load(dir.path(), ResolverConfig::default()).unwrap_err();
    assert!(matches!(err, attrib::Error::ModelLoad(_)));
}

#[test]
fn test_corrupt_model_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(MODEL_FILENAME), "{not json").unwrap();
    assert!(ModelArtifact::load(dir.path()).is_err());
}
