//! Sponsor and condition standardization
//!
//! Both standardizers are pure `&str -> String` functions. A name is split
//! into words (maximal runs of alphanumerics or `_`) and the words are
//! compared case-insensitively against a small keyword list per label.
//! Matching a keyword inside a longer word does not count.

/// Canonical label for academic and research-institute sponsors
pub const ACADEMIC_SPONSOR: &str = "University";

pub const ALZHEIMERS_DISEASE: &str = "Alzheimer's Disease";
pub const MILD_COGNITIVE_IMPAIRMENT: &str = "Mild Cognitive Impairment";

const ACADEMIC_KEYWORDS: &[&str] = &["university", "institute"];

/// Condition rules, first match wins
const CONDITION_RULES: &[(&[&str], &str)] = &[
    (&["alzheimer", "alzheimers"], ALZHEIMERS_DISEASE),
    (&["mild"], MILD_COGNITIVE_IMPAIRMENT),
];

/// Map academic sponsors onto one label; everything else passes through
pub fn standardize_sponsor(name: &str) -> String {
    if contains_any_word(name, ACADEMIC_KEYWORDS) {
        ACADEMIC_SPONSOR.to_string()
    } else {
        name.to_string()
    }
}

/// Map Alzheimer's and MCI condition names onto their canonical labels
pub fn standardize_condition(name: &str) -> String {
    CONDITION_RULES
        .iter()
        .find(|(keywords, _)| contains_any_word(name, keywords))
        .map_or_else(|| name.to_string(), |(_, label)| label.to_string())
}

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
}

fn contains_any_word(text: &str, keywords: &[&str]) -> bool {
    words(text).any(|word| keywords.iter().any(|k| word.eq_ignore_ascii_case(k)))
}
