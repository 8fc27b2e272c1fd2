//! Eval command - score a trained model against gold coreference groups

use clap::Parser;
use std::time::Instant;

use super::super::output::{color, to_json, write_output};
use super::load_config;

use crate::corpus::Corpus;
use crate::resolver::CoreferenceResolver;

/// Evaluate a trained model
#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// Annotated JSON file or directory of files
    #[arg(long, value_name = "PATH")]
    pub test_path: String,

    /// Directory holding the model bundle
    #[arg(long, value_name = "DIR")]
    pub model_path: String,

    /// TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<String>,

    /// Print the scores as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the `eval` command.
pub fn run(args: EvalArgs) -> Result<(), String> {
    let config = load_config(args.config.as_deref())?;
    let resolver =
        CoreferenceResolver::load(&args.model_path, config.resolver).map_err(|e| e.to_string())?;
    let corpus = Corpus::load(&args.test_path).map_err(|e| e.to_string())?;

    let start = Instant::now();
    let eval = crate::eval::evaluate(&resolver, &corpus);
    let elapsed = start.elapsed();

    let output = if args.json {
        to_json(&eval)?
    } else {
        format!(
            "{}\n{}\n{:.1}s\n",
            color("1", "Coreference evaluation"),
            eval,
            elapsed.as_secs_f64()
        )
    };
    write_output(&output, None)
}
