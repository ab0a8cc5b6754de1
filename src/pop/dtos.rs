use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::extractor::CardRecord;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PopQuery {
    /// Case-insensitive substring filter over card name and details.
    pub pokemon_name: Option<String>,
    /// Exact card-number filter, e.g. "4/102".
    pub card_number: Option<String>,
    /// Maximum number of records to return (1..=200).
    pub limit: Option<usize>,
    /// Include internal extraction counts in the response.
    pub debug: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PopReportResponse {
    pub ok: bool,
    /// The resolved page address the records came from.
    pub source: String,
    /// Record count before filtering.
    pub total_found: usize,
    /// Record count after filtering and limiting.
    pub returned: usize,
    pub filtered_by: FilterEcho,
    pub cards: Vec<CardRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugCounts>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterEcho {
    pub pokemon_name: Option<String>,
    pub card_number: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DebugCounts {
    pub candidate_blocks: usize,
    pub kept_blocks: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Set slugs address a page resource: lowercase, no whitespace.
pub fn normalize_slug(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}
