//! Command implementations for the attrib CLI
//!
//! Each command has its own module with an args struct and a `run` function.

pub mod eval;
pub mod gender;
pub mod resolve;
pub mod train;

pub use eval::EvalArgs;
pub use gender::GenderArgs;
pub use resolve::ResolveArgs;
pub use train::TrainArgs;

use crate::config::Config;

/// Load a TOML config file, or defaults when no path is given.
pub(crate) fn load_config(path: Option<&str>) -> Result<Config, String> {
    match path {
        Some(path) => Config::from_toml_file(path).map_err(|e| e.to_string()),
        None => Ok(Config::default()),
    }
}
