//! Block selection: which document nodes might be card entries.

use crate::extractor::dom::BlockSource;
use crate::extractor::fields;
use crate::extractor::model::{CandidateBlock, SelectStrategy};

/// Structural conventions tried against the document, most specific first.
const STRUCTURAL_QUERIES: &[&str] = &[
    ".card-entry",
    ".pop-card",
    "[class*='card']",
    "article",
    "li",
];

/// Everything that could plausibly wrap one card on an unknown page.
const GENERIC_CONTAINERS: &str = "div, section, ul, ol, li, article";

pub fn select_blocks(doc: &dyn BlockSource, strategy: SelectStrategy) -> Vec<CandidateBlock> {
    match strategy {
        SelectStrategy::StructuralFirst => structural_first(doc),
        SelectStrategy::BroadSweep => doc.select_blocks(GENERIC_CONTAINERS),
    }
}

fn structural_first(doc: &dyn BlockSource) -> Vec<CandidateBlock> {
    // Pages rarely follow a guessed convention completely, so every query is
    // evaluated and the largest result set wins; ties keep the more specific
    // query's matches.
    let mut best: Vec<CandidateBlock> = Vec::new();
    for query in STRUCTURAL_QUERIES {
        let found = doc.select_blocks(query);
        if found.len() > best.len() {
            best = found;
        }
    }
    if !best.is_empty() {
        return best;
    }

    // No convention matched at all; fall back to any generic container that
    // at least mentions a population figure.
    doc.select_blocks(GENERIC_CONTAINERS)
        .into_iter()
        .filter(|block| fields::has_population_marker(&block.text))
        .collect()
}
