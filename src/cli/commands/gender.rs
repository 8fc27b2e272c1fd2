//! Gender command - show what the heuristics make of a name

use clap::Parser;

use super::super::output::color;

use crate::gender::ForenameGenderClassifier;
use crate::mention::name_gender;
use attrib_core::Gender;

/// Guess the gender of names
#[derive(Parser, Debug)]
pub struct GenderArgs {
    /// Directory with extra `male.txt` / `female.txt` forename lists
    #[arg(long, value_name = "DIR")]
    pub forenames: Option<String>,

    /// Names, optionally with an honorific ("Mrs. Thatcher", "Jane Smith")
    #[arg(required = true, value_name = "NAME")]
    pub names: Vec<String>,
}

/// Run the `gender` command.
pub fn run(args: GenderArgs) -> Result<(), String> {
    let mut forenames = ForenameGenderClassifier::new();
    if let Some(dir) = &args.forenames {
        forenames = forenames.with_extra_lists(dir).map_err(|e| e.to_string())?;
    }
    for name in &args.names {
        let gender = name_gender(name, &forenames);
        let code = match gender {
            Gender::Male => "34",
            Gender::Female => "35",
            Gender::Neutral | Gender::Unknown => "2",
        };
        println!("{}\t{}", name, color(code, gender.as_str()));
    }
    Ok(())
}
