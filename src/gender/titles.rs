//! Honorific and pronoun gender tables.
//!
//! Both tables are process-wide constants built on first use.

use attrib_core::Gender;
use once_cell::sync::Lazy;
use std::collections::HashMap;

const MALE_TITLES: &[&str] = &[
    "mr", "sir", "lord", "duke", "marquess", "count", "viscount", "baron", "prince", "king",
    "spokesman", "brother",
];

const FEMALE_TITLES: &[&str] = &[
    "mrs", "miss", "ms", "lady", "duchess", "marchioness", "countess", "viscountess",
    "baroness", "princess", "queen", "spokeswoman", "sister",
];

/// Titles that mark a person but say nothing about gender.
const UNGENDERED_TITLES: &[&str] = &[
    "dr", "doctor", "judge", "justice", "prof", "professor", "rep", "representative", "sen",
    "senator", "official", "aide-de-camp", "alderman", "ambassador", "appraiser", "attaché",
    "bureaucrat", "cabinet secretary", "chief agricultural negotiator", "chief of district",
    "chief of local state administration", "chief of protocol", "city attorney", "manager",
    "managers", "city remembrancer", "municipal clerk", "commissioner of official languages",
    "commissioner of the republic", "coordinating secretary", "council architect",
    "council ranger", "county executive", "county administrator", "county surveyor",
    "courtier", "cultural attaché", "department secretary", "deputy mayor",
    "deputy prime minister", "director of communications",
    "director of the u.s. government publishing office", "drain commissioner", "diak",
    "fence viewer", "first civil service commissioner", "general register office",
    "gold commissioner", "government agent", "governor", "gov", "guardian minister",
    "hardship post", "high bailiff", "historiographer royal", "hofmeister", "interim leader",
    "keeper of the privy seal of scotland", "keeper of the seals", "king of arms",
    "language commissioner", "marshal of the sejm", "mayor", "member of congress", "minister",
    "min", "ministerial diary secretary", "municipal commissioner", "obersthofmeister",
    "official secretary to the governor", "ombudsman", "parliamentary state secretary",
    "permanent representative", "permanent secretary", "portreeve", "postal worker",
    "postmaster", "prefect", "president of the council of ministers",
    "president of the municipal chamber", "press secretary", "prosecutor", "pursuivant",
    "reading clerk", "receiver general", "recorder of deeds", "royal secretary", "secretary",
    "sec", "secretary of state", "secretary of the government", "sheriff", "sovereign",
    "speaker", "spokesperson", "state architect", "sub-divisional magistrate", "tax collector",
    "supervisor", "treasurer", "undersecretary", "wazira", "whip", "president", "director",
    "ceo", "chief", "attorney", "district attorney", "general", "gen", "leader",
    "director-general", "chair", "chairman", "chairwoman", "administrator", "adm", "admiral",
    "chancellor", "commissioner", "superintendent", "secretary-general", "cardinal",
    "undersheriff", "president-elect", "lt", "lieutenant", "pastor", "historian", "coroner",
    "sgt", "sergeant", "priest", "politician", "mayor-elect", "founder", "adviser", "advisor",
    "biologist", "qb", "democrat", "republican", "bishop", "principal", "filmmaker",
    "organizer", "archbishop", "col", "colonel", "co-ceo", "journalist", "sheikh", "officer",
    "fire marshall", "u.s. marshal", "midshipman", "comic", "psychotherapist", "wrangler",
    "archaeologist", "rescuer", "trustee",
];

static TITLE_GENDERS: Lazy<HashMap<&'static str, Gender>> = Lazy::new(|| {
    let mut table = HashMap::new();
    for title in UNGENDERED_TITLES {
        table.insert(*title, Gender::Unknown);
    }
    for title in MALE_TITLES {
        table.insert(*title, Gender::Male);
    }
    for title in FEMALE_TITLES {
        table.insert(*title, Gender::Female);
    }
    table
});

/// Titles ordered longest first, then alphabetically, for prefix matching.
static TITLES_LONGEST_FIRST: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let mut titles: Vec<&'static str> = TITLE_GENDERS.keys().copied().collect();
    titles.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    titles
});

static PRONOUN_GENDERS: Lazy<HashMap<&'static str, Gender>> = Lazy::new(|| {
    HashMap::from([
        ("he", Gender::Male),
        ("she", Gender::Female),
        ("it", Gender::Neutral),
        ("they", Gender::Neutral),
        ("we", Gender::Neutral),
    ])
});

/// Number of known honorifics.
#[must_use]
pub fn title_count() -> usize {
    TITLE_GENDERS.len()
}

/// True if `word` (case-insensitive, trailing period ignored) is a known title.
#[must_use]
pub fn is_title(word: &str) -> bool {
    let word = word.strip_suffix('.').unwrap_or(word).to_lowercase();
    TITLE_GENDERS.contains_key(word.as_str())
}

/// Gender implied by an honorific.
///
/// Case-insensitive; a trailing period is ignored. Titles without a gender
/// and unrecognised words both give [`Gender::Unknown`].
///
/// ```rust
/// use attrib::gender::prefix_gender;
/// use attrib::Gender;
///
/// assert_eq!(prefix_gender("Mrs."), Gender::Female);
/// assert_eq!(prefix_gender("Dr"), Gender::Unknown);
/// ```
#[must_use]
pub fn prefix_gender(prefix: &str) -> Gender {
    let prefix = prefix.strip_suffix('.').unwrap_or(prefix).to_lowercase();
    TITLE_GENDERS
        .get(prefix.as_str())
        .copied()
        .unwrap_or(Gender::Unknown)
}

/// Split the longest leading honorific off a name.
///
/// The title must end at a word boundary: "Mrs. Smith" splits on "mrs",
/// never on "mr". Returns the table key and the rest of the name with the
/// title's period and surrounding whitespace removed.
///
/// ```rust
/// use attrib::gender::split_on_longest_prefix;
///
/// assert_eq!(split_on_longest_prefix("Mrs. Jane Smith"), Some(("mrs", "Jane Smith")));
/// assert_eq!(split_on_longest_prefix("Deputy Prime Minister Jones"), Some(("deputy prime minister", "Jones")));
/// assert_eq!(split_on_longest_prefix("Kingsley Amis"), None);
/// ```
#[must_use]
pub fn split_on_longest_prefix(name: &str) -> Option<(&'static str, &str)> {
    for title in TITLES_LONGEST_FIRST.iter() {
        let Some(head) = name.get(..title.len()) else {
            continue;
        };
        if head.to_lowercase() != *title {
            continue;
        }
        let rest = &name[title.len()..];
        let bounded = rest.is_empty() || rest.starts_with('.') || rest.starts_with(char::is_whitespace);
        if !bounded {
            continue;
        }
        let rest = rest.trim_start();
        let rest = rest.strip_prefix('.').unwrap_or(rest).trim();
        return Some((title, rest));
    }
    None
}

/// Gender of a pronoun: he, she, it, they and we are known.
#[must_use]
pub fn pronoun_gender(pronoun: &str) -> Gender {
    PRONOUN_GENDERS
        .get(pronoun.to_lowercase().as_str())
        .copied()
        .unwrap_or(Gender::Unknown)
}

/// True for the personal and collective pronouns that take part in
/// coreference: he, she, it, they and we.
#[must_use]
pub fn is_personal_pronoun(pronoun: &str) -> bool {
    PRONOUN_GENDERS.contains_key(pronoun.to_lowercase().as_str())
}

/// True for pronouns that can refer to a group.
///
/// "it" counts: a pronoun source saying "it" almost always stands for an
/// organisation, and organisations are plural.
#[must_use]
pub fn is_plural_pronoun(pronoun: &str) -> bool {
    matches!(pronoun.to_lowercase().as_str(), "it" | "they" | "we")
}
