//! Document access for block selection.
//!
//! The pipeline only ever needs "all nodes matching a structural query,
//! as text plus a couple of structural hints", so that capability is a
//! trait and `scraper` is one implementation behind it.

use scraper::{ElementRef, Html, Selector};

use crate::extractor::model::{CandidateBlock, normalize_whitespace};

pub trait BlockSource {
    /// All nodes matching `query`, in document order, materialized as
    /// candidate blocks. An unparseable query yields no matches.
    fn select_blocks(&self, query: &str) -> Vec<CandidateBlock>;
}

/// Sub-queries probed for a block's display name, headings before
/// class-based conventions.
const NAME_HINT_QUERIES: &[&str] = &["h1", "h2", "h3", "h4", ".name", ".card-name", ".title"];
/// Sub-queries probed for a block's secondary details text.
const DETAILS_HINT_QUERIES: &[&str] = &[".details", ".card-details", ".subtitle", "p"];

pub struct ScraperDocument {
    doc: Html,
}

impl ScraperDocument {
    pub fn parse(html: &str) -> Self {
        Self {
            doc: Html::parse_document(html),
        }
    }
}

impl BlockSource for ScraperDocument {
    fn select_blocks(&self, query: &str) -> Vec<CandidateBlock> {
        let Ok(selector) = Selector::parse(query) else {
            return Vec::new();
        };
        self.doc.select(&selector).map(materialize).collect()
    }
}

fn materialize(element: ElementRef<'_>) -> CandidateBlock {
    let raw: String = element.text().collect();
    CandidateBlock {
        name_hint: first_descendant_text(element, NAME_HINT_QUERIES),
        details_hint: first_descendant_text(element, DETAILS_HINT_QUERIES),
        text: normalize_whitespace(&raw),
        raw_len: raw.len(),
    }
}

fn first_descendant_text(element: ElementRef<'_>, queries: &[&str]) -> Option<String> {
    for query in queries {
        if let Ok(selector) = Selector::parse(query)
            && let Some(hit) = element.select(&selector).next()
        {
            let text = normalize_whitespace(&hit.text().collect::<String>());
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}
