#![no_main]

use libfuzzer_sys::fuzz_target;

use popscope::extractor::{SelectStrategy, extract};

fuzz_target!(|data: &[u8]| {
    // Invalid UTF-8 is replaced rather than rejected; the extractor must
    // never panic regardless of input.
    let html = String::from_utf8_lossy(data).to_string();

    let _ = extract(&html, SelectStrategy::StructuralFirst);
    let _ = extract(&html, SelectStrategy::BroadSweep);
});
