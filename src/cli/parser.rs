//! CLI argument parsing and structure definitions

use clap::{Parser, Subcommand};

use super::commands;

/// Quote source attribution CLI - alias tables and pronoun coreference
#[derive(Parser)]
#[command(name = "attrib")]
#[command(
    author,
    version,
    about = "Quote source attribution CLI - alias tables and pronoun coreference",
    long_about = r#"
attrib - resolve who is speaking in reported speech

Quotes arrive with a cue ("said"), sources ("she") and contents. attrib links
pronoun and short-name sources to the fullest earlier mention of the speaker
("she" -> "Dr. Jane Smith").

EXAMPLES:
  attrib train --train-path corpus/train --model-path models/coref
  attrib eval --test-path corpus/test --model-path models/coref
  attrib resolve --model-path models/coref story.json
  attrib gender "Mrs. Thatcher" Barack Sam
"#
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// attrib subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Train the antecedent classifier on an annotated corpus
    #[command(visible_alias = "t")]
    Train(commands::TrainArgs),

    /// Evaluate a trained model on an annotated corpus
    #[command(visible_alias = "e")]
    Eval(commands::EvalArgs),

    /// Resolve the quote sources of one document
    #[command(visible_alias = "r")]
    Resolve(commands::ResolveArgs),

    /// Guess the gender of names and honorifics
    #[command(visible_alias = "g")]
    Gender(commands::GenderArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_train() {
        let cli = Cli::try_parse_from([
            "attrib",
            "-v",
            "train",
            "--train-path",
            "corpus",
            "--model-path",
            "model",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Train(args) => {
                assert_eq!(args.train_path, "corpus");
                assert_eq!(args.model_path, "model");
                assert!(args.config.is_none());
            }
            _ => panic!("expected train"),
        }
    }

    #[test]
    fn test_parse_gender_requires_names() {
        assert!(Cli::try_parse_from(["attrib", "gender"]).is_err());
        assert!(Cli::try_parse_from(["attrib", "g", "Jane"]).is_ok());
    }
}
