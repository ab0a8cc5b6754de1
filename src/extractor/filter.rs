//! Post-assembly filtering and result capping.

use crate::extractor::model::CardRecord;

pub const MIN_LIMIT: usize = 1;
pub const MAX_LIMIT: usize = 200;

/// Optional record filters; both compose by logical AND when given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Case-insensitive substring over name or details.
    pub name: Option<String>,
    /// Exact card-number match, whitespace-insensitive.
    pub number: Option<String>,
    /// Result cap, clamped to [`MIN_LIMIT`]..=[`MAX_LIMIT`].
    pub limit: Option<usize>,
}

pub fn apply(records: Vec<CardRecord>, filter: &RecordFilter) -> Vec<CardRecord> {
    let mut kept: Vec<CardRecord> = records
        .into_iter()
        .filter(|record| matches(record, filter))
        .collect();
    if let Some(limit) = filter.limit {
        kept.truncate(limit.clamp(MIN_LIMIT, MAX_LIMIT));
    }
    kept
}

fn matches(record: &CardRecord, filter: &RecordFilter) -> bool {
    if let Some(name) = &filter.name {
        let needle = name.to_lowercase();
        if !record.name.to_lowercase().contains(&needle)
            && !record.details.to_lowercase().contains(&needle)
        {
            return false;
        }
    }
    if let Some(number) = &filter.number {
        let wanted: String = number.chars().filter(|c| !c.is_whitespace()).collect();
        if record.card_number.as_deref() != Some(wanted.as_str()) {
            return false;
        }
    }
    true
}
