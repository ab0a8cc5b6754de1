//! Record assembly: extractor outputs per block into accepted, deduplicated
//! card records.

use std::collections::HashSet;

use crate::extractor::fields;
use crate::extractor::model::{CandidateBlock, CardRecord, SelectStrategy};

/// Broad-sweep blocks must show this many distinct grades before they are
/// believed; generic containers match far too much page furniture otherwise.
const MIN_DISTINCT_GRADES: usize = 3;

pub fn assemble(blocks: &[CandidateBlock], strategy: SelectStrategy) -> Vec<CardRecord> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut kept: Vec<(CardRecord, usize)> = Vec::new();

    for block in blocks {
        let Some(record) = build_record(block, strategy) else {
            continue;
        };
        if let Some(key) = identity_key(&record)
            && !seen.insert(key)
        {
            continue;
        }
        kept.push((record, block.raw_len));
    }

    // Broad-sweep candidates vary wildly in quality; longer raw text is the
    // better information source. Stable, so equal lengths keep selection order.
    if strategy == SelectStrategy::BroadSweep {
        kept.sort_by(|a, b| b.1.cmp(&a.1));
    }

    kept.into_iter().map(|(record, _)| record).collect()
}

fn build_record(block: &CandidateBlock, strategy: SelectStrategy) -> Option<CardRecord> {
    let pairs = fields::grade_pairs(&block.text);
    let card_number = fields::card_number(&block.text);

    let name = block
        .name_hint
        .clone()
        .or_else(|| fields::name_before_number(&block.text))
        .unwrap_or_default();
    let details = block.details_hint.clone().unwrap_or_default();

    let accepted = match strategy {
        SelectStrategy::StructuralFirst => !name.is_empty() || !details.is_empty(),
        SelectStrategy::BroadSweep => {
            card_number.is_some() && fields::distinct_grade_count(&pairs) >= MIN_DISTINCT_GRADES
        }
    };
    if !accepted {
        return None;
    }

    Some(CardRecord {
        name,
        details,
        card_number,
        total_pop: fields::total_population(&block.text),
        grades: fields::first_per_grade(pairs),
    })
}

/// Identity for deduplication: lowercased name plus card number. `None` when
/// both components are empty; such records never collide, so multiple
/// no-name/no-number entries are not collapsed into one.
fn identity_key(record: &CardRecord) -> Option<String> {
    let number = record.card_number.as_deref().unwrap_or("");
    if record.name.is_empty() && number.is_empty() {
        return None;
    }
    Some(format!("{}|{}", record.name.to_lowercase(), number))
}
