//! Train command - fit the antecedent classifier on an annotated corpus

use clap::Parser;
use std::time::Instant;

use super::super::output::color;
use super::load_config;

use crate::corpus::Corpus;
use crate::gender::ForenameGenderClassifier;
use crate::model::ModelArtifact;
use crate::train::build_and_save;

/// Train the antecedent classifier
#[derive(Parser, Debug)]
pub struct TrainArgs {
    /// Annotated JSON file or directory of files
    #[arg(long, value_name = "PATH")]
    pub train_path: String,

    /// Directory to write the model bundle into
    #[arg(long, value_name = "DIR")]
    pub model_path: String,

    /// TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<String>,

    /// Directory with extra `male.txt` / `female.txt` forename lists
    #[arg(long, value_name = "DIR")]
    pub forenames: Option<String>,
}

/// Run the `train` command.
pub fn run(args: TrainArgs) -> Result<(), String> {
    let config = load_config(args.config.as_deref())?;
    let corpus = Corpus::load(&args.train_path).map_err(|e| e.to_string())?;
    if corpus.is_empty() {
        return Err(format!("No documents found in {}", args.train_path));
    }

    let mut forenames = ForenameGenderClassifier::new();
    if let Some(dir) = &args.forenames {
        forenames = forenames.with_extra_lists(dir).map_err(|e| e.to_string())?;
    }

    let start = Instant::now();
    let artifact = build_and_save(&corpus, forenames, &config, &args.model_path)
        .map_err(|e| e.to_string())?;
    let path = ModelArtifact::path_in(&args.model_path);

    println!(
        "{} {} documents in {:.1}s, {} features",
        color("32", "trained:"),
        corpus.len(),
        start.elapsed().as_secs_f64(),
        artifact.encoder.dim()
    );
    if path.exists() {
        println!("{} {}", color("32", "saved:"), path.display());
    } else {
        println!("{} model not written to {}", color("33", "warning:"), path.display());
    }
    Ok(())
}
