//! The page-to-record extraction pipeline.
//!
//! Block Selector -> per-block Field Extractors -> Record Assembler. The
//! caller supplies raw HTML (fetched or rendered, the pipeline does not
//! care) and a selection strategy; filtering happens afterwards in
//! [`filter`].

pub mod assemble;
pub mod blocks;
pub mod dom;
pub mod fields;
pub mod filter;
pub mod model;
pub mod numeric;

#[cfg(test)]
mod tests;

pub use model::{CardRecord, SelectStrategy};

use tracing::instrument;

use crate::extractor::dom::{BlockSource, ScraperDocument};

/// Result of one extraction run, with the internal counts the debug output
/// reports.
#[derive(Debug)]
pub struct Extraction {
    pub records: Vec<CardRecord>,
    /// Blocks the selector produced.
    pub candidate_blocks: usize,
    /// Records surviving acceptance and deduplication, before filtering.
    pub kept_blocks: usize,
}

#[instrument(skip_all, fields(strategy = ?strategy, html_len = html.len()))]
pub fn extract(html: &str, strategy: SelectStrategy) -> Extraction {
    let doc = ScraperDocument::parse(html);
    extract_from(&doc, strategy)
}

pub fn extract_from(doc: &dyn BlockSource, strategy: SelectStrategy) -> Extraction {
    let candidates = blocks::select_blocks(doc, strategy);
    let records = assemble::assemble(&candidates, strategy);
    Extraction {
        candidate_blocks: candidates.len(),
        kept_blocks: records.len(),
        records,
    }
}
