//! Numeric normalization for population counts.

/// Parses a digit-bearing string as a base-10 integer, ignoring thousands
/// separators and any other stray characters. Digitless input yields `None`;
/// this never panics.
pub fn parse_count(raw: &str) -> Option<u64> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
