//! Field extractors.
//!
//! Pure pattern matchers, one per semantic field. Each takes normalized text
//! and returns absence rather than erroring; page structure is unpredictable
//! enough that no single extraction strategy is authoritative.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::extractor::numeric::parse_count;

static GRADE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    // "PSA10" appears in the wild alongside "PSA 10", hence \s* after the label
    Regex::new(r"(?i)\bPSA\s*(\d{1,2})\b[\s:]*([0-9][0-9,]*)").expect("grade pattern")
});

static TOTAL_POP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:total\s+)?population\b\s*:?\s*([0-9][0-9,]*)").expect("total pattern")
});

static POP_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:total\s+)?population\b").expect("marker pattern"));

static CARD_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,4})\s*/\s*(\d{1,4})").expect("card number pattern"));

static NAME_BEFORE_NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z][A-Za-z0-9'&.:! \-]{0,79}?)\s*#?\s*\d{1,4}\s*/\s*\d{1,4}")
        .expect("name span pattern")
});

static BOILERPLATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:psa\s+)?pop(?:ulation)?\s+report\b").expect("boilerplate pattern")
});

/// Every "PSA <grade> <count>" occurrence, in text order. Occurrences whose
/// count fails to parse are omitted.
pub fn grade_pairs(text: &str) -> Vec<(String, u64)> {
    GRADE_REGEX
        .captures_iter(text)
        .filter_map(|caps| {
            let value = parse_count(caps.get(2)?.as_str())?;
            Some((format!("PSA {}", &caps[1]), value))
        })
        .collect()
}

/// Mapping variant of [`grade_pairs`]: the first occurrence per grade wins.
pub fn grade_map(text: &str) -> BTreeMap<String, u64> {
    first_per_grade(grade_pairs(text))
}

pub fn first_per_grade(pairs: Vec<(String, u64)>) -> BTreeMap<String, u64> {
    let mut grades = BTreeMap::new();
    for (label, value) in pairs {
        grades.entry(label).or_insert(value);
    }
    grades
}

pub fn distinct_grade_count(pairs: &[(String, u64)]) -> usize {
    pairs
        .iter()
        .map(|(label, _)| label.as_str())
        .collect::<BTreeSet<_>>()
        .len()
}

/// "Total Population <n>" or "Population <n>", when present.
pub fn total_population(text: &str) -> Option<u64> {
    let caps = TOTAL_POP_REGEX.captures(text)?;
    parse_count(&caps[1])
}

/// Whether the text mentions a population figure at all. Used by block
/// selection fallback, which cannot demand a full match.
pub fn has_population_marker(text: &str) -> bool {
    POP_MARKER_REGEX.is_match(text)
}

/// First "N/M" fraction anywhere in the text, internal whitespace stripped.
pub fn card_number(text: &str) -> Option<String> {
    let caps = CARD_NUMBER_REGEX.captures(text)?;
    Some(format!("{}/{}", &caps[1], &caps[2]))
}

/// Fallback name heuristic: the word span immediately preceding the first
/// card-number fraction, with pop-report boilerplate stripped out.
pub fn name_before_number(text: &str) -> Option<String> {
    let caps = NAME_BEFORE_NUMBER_REGEX.captures(text)?;
    let span = BOILERPLATE_REGEX.replace_all(caps[1].trim(), "");
    let name = span
        .trim()
        .trim_matches(|c: char| matches!(c, '-' | ':' | '#'))
        .trim()
        .to_string();
    if name.is_empty() { None } else { Some(name) }
}
