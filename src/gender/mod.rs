//! Gender and plurality heuristics.
//!
//! - [`titles`]: honorific and pronoun lookup tables
//! - [`forenames`]: forename lists with an affix classifier fallback
//!
//! Mention-level gender (which combines both with entity labels) lives in
//! [`crate::mention`].

pub mod forenames;
pub mod titles;

pub use forenames::{ForenameGender, ForenameGenderClassifier};
pub use titles::{
    is_personal_pronoun, is_plural_pronoun, is_title, prefix_gender, pronoun_gender,
    split_on_longest_prefix, title_count,
};
