//! Forename gender classification.
//!
//! Curated male and female forename lists answer most queries directly.
//! Names missing from the lists, or present in both, fall back to a Naive
//! Bayes classifier over character affixes trained on the same lists.

use crate::{Error, Result};
use attrib_core::Gender;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

const MALE_FORENAMES: &str = include_str!("../../data/forenames/male.txt");
const FEMALE_FORENAMES: &str = include_str!("../../data/forenames/female.txt");

/// Anything that can guess the gender of a forename.
pub trait ForenameGender: Send + Sync {
    /// Male, female, or unknown. Never neutral.
    fn forename_gender(&self, forename: &str) -> Gender;
}

/// List lookup plus an affix-based Naive Bayes fallback.
///
/// # Example
///
/// ```rust
/// use attrib::gender::{ForenameGender, ForenameGenderClassifier};
/// use attrib::Gender;
///
/// let classifier = ForenameGenderClassifier::new();
/// assert_eq!(classifier.forename_gender("Jane"), Gender::Female);
/// assert_eq!(classifier.forename_gender("Barack"), Gender::Male);
/// assert_eq!(classifier.forename_gender(""), Gender::Unknown);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForenameGenderClassifier {
    male: BTreeSet<String>,
    female: BTreeSet<String>,
    model: AffixNaiveBayes,
}

impl Default for ForenameGenderClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ForenameGenderClassifier {
    /// Classifier over the built-in forename lists.
    #[must_use]
    pub fn new() -> Self {
        Self::from_lists(parse_list(MALE_FORENAMES), parse_list(FEMALE_FORENAMES))
    }

    /// Classifier over caller-supplied lists.
    pub fn from_lists<M, F, S>(male: M, female: F) -> Self
    where
        M: IntoIterator<Item = S>,
        F: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let male: BTreeSet<String> = male
            .into_iter()
            .map(|n| n.as_ref().trim().to_lowercase())
            .filter(|n| !n.is_empty())
            .collect();
        let female: BTreeSet<String> = female
            .into_iter()
            .map(|n| n.as_ref().trim().to_lowercase())
            .filter(|n| !n.is_empty())
            .collect();
        let model = AffixNaiveBayes::train(&male, &female);
        log::debug!(
            "Forename lists: {} male, {} female",
            male.len(),
            female.len()
        );
        Self { male, female, model }
    }

    /// Add names from `male.txt` and `female.txt` in `dir`, when present,
    /// and retrain the fallback classifier.
    ///
    /// Files hold one name per line; blank lines are ignored.
    pub fn with_extra_lists(self, dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut male = self.male;
        let mut female = self.female;
        for (file, names) in [("male.txt", &mut male), ("female.txt", &mut female)] {
            let path = dir.join(file);
            if !path.exists() {
                continue;
            }
            let text = std::fs::read_to_string(&path).map_err(|e| {
                Error::config(format!("cannot read forenames {}: {}", path.display(), e))
            })?;
            let before = names.len();
            names.extend(parse_list(&text).map(str::to_lowercase));
            log::info!(
                "Added {} forenames from {}",
                names.len() - before,
                path.display()
            );
        }
        Ok(Self::from_lists(male, female))
    }

    /// Number of (male, female) forenames.
    #[must_use]
    pub fn list_sizes(&self) -> (usize, usize) {
        (self.male.len(), self.female.len())
    }

    fn affix_features(&self, forename: &str) -> Vec<(&'static str, String)> {
        affix_features(forename, &self.male, &self.female)
    }
}

impl ForenameGender for ForenameGenderClassifier {
    fn forename_gender(&self, forename: &str) -> Gender {
        let name = forename.trim().to_lowercase();
        if name.is_empty() {
            return Gender::Unknown;
        }
        match (self.male.contains(&name), self.female.contains(&name)) {
            (true, false) => Gender::Male,
            (false, true) => Gender::Female,
            _ => {
                let predicted = self.model.classify(&self.affix_features(&name));
                log::debug!("Predicted gender for {}: {}", forename, predicted);
                predicted
            }
        }
    }
}

fn parse_list(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty() && !l.starts_with('#'))
}

/// Lower-cased 1-3 character prefixes and suffixes, plus whether any known
/// male or female name is a prefix or suffix of `name`.
fn affix_features(
    name: &str,
    male: &BTreeSet<String>,
    female: &BTreeSet<String>,
) -> Vec<(&'static str, String)> {
    let lower = name.to_lowercase();
    let chars: Vec<char> = lower.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }
    let prefix = |n: usize| chars[..n.min(chars.len())].iter().collect::<String>();
    let suffix = |n: usize| chars[chars.len().saturating_sub(n)..].iter().collect::<String>();
    let affixed = |names: &BTreeSet<String>| {
        let mut as_prefix = false;
        let mut as_suffix = false;
        for known in names {
            as_prefix |= lower.starts_with(known.as_str());
            as_suffix |= lower.ends_with(known.as_str());
        }
        (as_prefix, as_suffix)
    };
    let (male_prefix, male_suffix) = affixed(male);
    let (female_prefix, female_suffix) = affixed(female);

    vec![
        ("suffix1", suffix(1)),
        ("suffix2", suffix(2)),
        ("suffix3", suffix(3)),
        ("prefix1", prefix(1)),
        ("prefix2", prefix(2)),
        ("prefix3", prefix(3)),
        ("male_prefix", male_prefix.to_string()),
        ("male_suffix", male_suffix.to_string()),
        ("female_prefix", female_prefix.to_string()),
        ("female_suffix", female_suffix.to_string()),
    ]
}

// =============================================================================
// Naive Bayes
// =============================================================================

/// Two-class Naive Bayes with expected-likelihood (add one half) smoothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct AffixNaiveBayes {
    /// Training names per class: `[male, female]`.
    class_counts: [usize; 2],
    /// feature name -> feature value -> per-class counts.
    counts: BTreeMap<String, BTreeMap<String, [usize; 2]>>,
}

impl AffixNaiveBayes {
    fn train(male: &BTreeSet<String>, female: &BTreeSet<String>) -> Self {
        let mut model = Self::default();
        for (class, names) in [(0usize, male), (1usize, female)] {
            for name in names {
                model.class_counts[class] += 1;
                for (fname, fval) in affix_features(name, male, female) {
                    model
                        .counts
                        .entry(fname.to_string())
                        .or_default()
                        .entry(fval)
                        .or_default()[class] += 1;
                }
            }
        }
        model
    }

    fn classify(&self, features: &[(&'static str, String)]) -> Gender {
        let total = self.class_counts[0] + self.class_counts[1];
        if total == 0 || features.is_empty() {
            return Gender::Unknown;
        }
        let mut log_probs = [0.0f64; 2];
        for (class, lp) in log_probs.iter_mut().enumerate() {
            let n = self.class_counts[class] as f64;
            *lp = ((n + 0.5) / (total as f64 + 1.0)).ln();
            for (fname, fval) in features {
                // Feature names never seen in training carry no evidence.
                let Some(values) = self.counts.get(*fname) else {
                    continue;
                };
                let bins = values.len() as f64;
                let count = values.get(fval).map_or(0, |c| c[class]) as f64;
                *lp += ((count + 0.5) / (n + 0.5 * bins)).ln();
            }
        }
        if log_probs[0] > log_probs[1] {
            Gender::Male
        } else if log_probs[1] > log_probs[0] {
            Gender::Female
        } else {
            Gender::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_lookup_is_case_insensitive() {
        let c = ForenameGenderClassifier::new();
        assert_eq!(c.forename_gender("JANE"), Gender::Female);
        assert_eq!(c.forename_gender("david"), Gender::Male);
    }

    #[test]
    fn test_embedded_lists_cover_less_common_names() {
        let c = ForenameGenderClassifier::new();
        assert_eq!(c.forename_gender("Jacinda"), Gender::Female);
        assert_eq!(c.forename_gender("Olaf"), Gender::Male);
    }

    #[test]
    fn test_ambiguous_name_uses_fallback() {
        let c = ForenameGenderClassifier::from_lists(
            ["john", "mark", "luke", "alex"],
            ["anna", "maria", "julia", "alex"],
        );
        // In both lists: decided by the affix model, never neutral.
        assert_ne!(c.forename_gender("Alex"), Gender::Neutral);
    }

    #[test]
    fn test_fallback_learns_suffixes() {
        let c = ForenameGenderClassifier::from_lists(
            ["bob", "tom", "jim", "sam", "ron"],
            ["anna", "maria", "julia", "sofia", "lena"],
        );
        assert_eq!(c.forename_gender("Petra"), Gender::Female);
        assert_eq!(c.forename_gender("Dom"), Gender::Male);
    }

    #[test]
    fn test_empty_name_unknown() {
        let c = ForenameGenderClassifier::new();
        assert_eq!(c.forename_gender("   "), Gender::Unknown);
    }

    #[test]
    fn test_affix_features() {
        let male: BTreeSet<String> = ["jo".to_string()].into_iter().collect();
        let female = BTreeSet::new();
        let features = affix_features("Joan", &male, &female);
        let get = |k: &str| features.iter().find(|(n, _)| *n == k).map(|(_, v)| v.clone());
        assert_eq!(get("prefix3").as_deref(), Some("joa"));
        assert_eq!(get("suffix1").as_deref(), Some("n"));
        assert_eq!(get("male_prefix").as_deref(), Some("true"));
        assert_eq!(get("female_suffix").as_deref(), Some("false"));
        assert!(affix_features("", &male, &female).is_empty());
    }

    #[test]
    fn test_extra_lists() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("female.txt"), "Zanthia\n\n").unwrap();
        let c = ForenameGenderClassifier::new()
            .with_extra_lists(dir.path())
            .unwrap();
        assert_eq!(c.forename_gender("Zanthia"), Gender::Female);
    }

    #[test]
    fn test_serde_roundtrip() {
        let c = ForenameGenderClassifier::from_lists(["tom"], ["ann"]);
        let json = serde_json::to_string(&c).unwrap();
        let back: ForenameGenderClassifier = serde_json::from_str(&json).unwrap();
        assert_eq!(back.forename_gender("Tom"), Gender::Male);
        assert_eq!(back.list_sizes(), (1, 1));
    }
}
