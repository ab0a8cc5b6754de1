use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One card's population data as extracted from a pop-report page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    /// Display name; empty when unrecoverable.
    pub name: String,
    /// Secondary descriptive text (rarity, subtype); may be empty.
    pub details: String,
    /// Normalized "N/M" fraction with no internal whitespace.
    pub card_number: Option<String>,
    /// Total graded population, when the page states one.
    pub total_pop: Option<u64>,
    /// Grade label ("PSA 10") to population count. Keys are unique; iteration
    /// order is deterministic but carries no meaning.
    pub grades: BTreeMap<String, u64>,
}

/// How candidate blocks are chosen from a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectStrategy {
    /// Try known structural conventions first; fall back to marker text.
    StructuralFirst,
    /// Consider every generic container and let content checks decide.
    /// Used when structure is unknown, e.g. a freshly rendered page.
    BroadSweep,
}

/// A structural node hypothesized to hold one card's data. Transient; only
/// [`CardRecord`]s leave the pipeline.
#[derive(Debug, Clone)]
pub struct CandidateBlock {
    /// Node text with whitespace collapsed and trimmed.
    pub text: String,
    /// Name candidate captured from heading/name-class descendants.
    pub name_hint: Option<String>,
    /// Details candidate captured from paragraph/details-class descendants.
    pub details_hint: Option<String>,
    /// Raw text length, used only to rank blocks by information richness.
    pub raw_len: usize,
}

pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
