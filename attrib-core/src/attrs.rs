//! Derived mention attributes: gender and mention kind.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Grammatical gender of a mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Masculine (he, Mr, known male forename)
    Male,
    /// Feminine (she, Mrs, known female forename)
    Female,
    /// Not personal (it, they, organizations)
    Neutral,
    /// No signal
    #[default]
    Unknown,
}

impl Gender {
    /// Lower-case name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Neutral => "neutral",
            Gender::Unknown => "unknown",
        }
    }

    /// True for `Male` and `Female`.
    #[must_use]
    pub const fn is_gendered(&self) -> bool {
        matches!(self, Gender::Male | Gender::Female)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Gender {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "neutral" | "n" => Ok(Gender::Neutral),
            "unknown" | "" => Ok(Gender::Unknown),
            other => Err(crate::Error::parse(format!("unknown gender '{}'", other))),
        }
    }
}

/// Kind of referring expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MentionKind {
    /// Single-token pronoun ("he", "it", "they")
    Pronominal,
    /// All tokens are proper nouns ("Barack Obama")
    Proper,
    /// Headed by a common noun ("the minister")
    Nominal,
    /// Anything else
    Unknown,
}

impl MentionKind {
    /// Lower-case name, as used in feature strings.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            MentionKind::Pronominal => "pronominal",
            MentionKind::Proper => "proper",
            MentionKind::Nominal => "nominal",
            MentionKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for MentionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_parse_and_display() {
        assert_eq!("Female".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!(Gender::Neutral.to_string(), "neutral");
        assert!("robot".parse::<Gender>().is_err());
    }

    #[test]
    fn test_gendered() {
        assert!(Gender::Male.is_gendered());
        assert!(!Gender::Neutral.is_gendered());
        assert!(!Gender::Unknown.is_gendered());
    }
}
