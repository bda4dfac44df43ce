#![no_main]

use libfuzzer_sys::fuzz_target;

use reviewscope::extractor::{ReviewExtractor, isolate_review_blocks};
use reviewscope::fetcher::decode;

fuzz_target!(|data: &[u8]| {
    let encoding = decode::sniff_encoding("text/html", data);
    let (html, _) = decode::decode(data, encoding);

    // Isolation and extraction should never panic, and never drop a block
    let blocks = isolate_review_blocks(&html);
    let reviews = ReviewExtractor::default().extract(&blocks);
    assert_eq!(reviews.len(), blocks.len());
});
