#![no_main]

use libfuzzer_sys::fuzz_target;
use markup::{TagMatching, TreeBuilderConfig, traverse::count_leaves};

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);
    for matching in [TagMatching::NearestForward, TagMatching::Balanced] {
        let config = TreeBuilderConfig { matching };
        let parsed = markup::parse_with_config(&input, config);
        let leaves = count_leaves(&parsed.elements);
        let segments = markup::segment(&input).len();
        assert!(leaves <= segments, "{leaves} leaves from {segments} segments");
        let _ = markup::render(&parsed.elements);
    }
});
