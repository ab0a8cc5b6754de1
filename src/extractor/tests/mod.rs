use std::fs;

use crate::extractor::{SelectStrategy, extract};

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture")
}

#[test]
fn structured_page_yields_records_in_document_order() {
    let outcome = extract(&fixture("structured.html"), SelectStrategy::StructuralFirst);

    // Three tagged blocks; the one with neither name nor details is noise.
    assert_eq!(outcome.candidate_blocks, 3);
    assert_eq!(outcome.records.len(), 2);

    let charizard = &outcome.records[0];
    assert_eq!(charizard.name, "Charizard");
    assert_eq!(charizard.details, "Holo Rare");
    assert_eq!(charizard.card_number.as_deref(), Some("4/102"));
    assert_eq!(charizard.total_pop, Some(2500));
    assert_eq!(charizard.grades.get("PSA 10"), Some(&1234));
    assert_eq!(charizard.grades.get("PSA 9"), Some(&850));
    assert_eq!(charizard.grades.get("PSA 8"), Some(&300));

    // Nameless but detailed: retained under the weak acceptance rule.
    let energy = &outcome.records[1];
    assert_eq!(energy.name, "");
    assert_eq!(energy.details, "Water Energy Uncommon");
    assert_eq!(energy.card_number.as_deref(), Some("17/102"));
    assert_eq!(energy.total_pop, None);
    assert_eq!(energy.grades.get("PSA 10"), Some(&44));
}

#[test]
fn rendered_page_broad_sweep_accepts_only_card_shaped_blocks() {
    let outcome = extract(&fixture("rendered.html"), SelectStrategy::BroadSweep);

    assert_eq!(outcome.candidate_blocks, 6);
    // Interstitial text, a ratings fraction with no grades, a grade list with
    // no fraction, and a duplicate entry are all dropped.
    assert_eq!(outcome.records.len(), 2);

    // Ranked by raw text length, so the richer Umbreon block leads even
    // though Espeon appears first in the document.
    assert_eq!(outcome.records[0].name, "Umbreon Gold Star");
    assert_eq!(outcome.records[0].card_number.as_deref(), Some("17/17"));
    assert_eq!(outcome.records[0].total_pop, Some(540));
    assert_eq!(outcome.records[0].grades.len(), 4);

    assert_eq!(outcome.records[1].name, "Espeon Gold Star");
    // The duplicate Espeon block came later, so the first one's counts win.
    assert_eq!(outcome.records[1].grades.get("PSA 10"), Some(&88));
}

#[test]
fn page_without_cards_yields_nothing() {
    for strategy in [SelectStrategy::StructuralFirst, SelectStrategy::BroadSweep] {
        let outcome = extract(&fixture("empty.html"), strategy);
        assert!(outcome.records.is_empty());
    }
}

#[test]
fn malformed_html_is_handled_gracefully() {
    let html = "<div class='card-entry'><h2>Broken</h2><p class='details'>Rare<span>12/99 PSA 10 4";
    let outcome = extract(html, SelectStrategy::StructuralFirst);
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].name, "Broken");
    assert_eq!(outcome.records[0].card_number.as_deref(), Some("12/99"));
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn extract_never_panics(html in ".*") {
            let _ = extract(&html, SelectStrategy::StructuralFirst);
            let _ = extract(&html, SelectStrategy::BroadSweep);
        }

        #[test]
        fn card_numbers_are_normalized(html in ".*") {
            for strategy in [SelectStrategy::StructuralFirst, SelectStrategy::BroadSweep] {
                for record in extract(&html, strategy).records {
                    if let Some(number) = record.card_number {
                        prop_assert!(!number.contains(char::is_whitespace));
                        prop_assert!(number.contains('/'));
                    }
                }
            }
        }
    }
}
