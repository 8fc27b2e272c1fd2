//! attrib - quote source attribution CLI
//!
//! Trains, evaluates and runs the quote source coreference resolver.
//!
//! # Usage
//!
//! ```bash
//! # Train on an annotated corpus
//! attrib train --train-path corpus/train --model-path models/coref
//!
//! # Precision / recall on held-out documents
//! attrib eval --test-path corpus/test --model-path models/coref
//!
//! # Resolve one document, printing JSON
//! attrib resolve --model-path models/coref story.json
//!
//! # Inspect the gender heuristics
//! attrib gender "Mrs. Thatcher" Barack Sam
//! ```

use std::process::ExitCode;

use attrib::cli::commands::{eval, gender, resolve, train};
use attrib::cli::output::color;
use attrib::cli::parser::{Cli, Commands};
use clap::Parser;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    let result: Result<(), String> = match cli.command {
        Commands::Train(args) => train::run(args),
        Commands::Eval(args) => eval::run(args),
        Commands::Resolve(args) => resolve::run(args),
        Commands::Gender(args) => gender::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("command failed: {}", e);
            eprintln!("{} {}", color("31", "error:"), e);
            ExitCode::FAILURE
        }
    }
}
