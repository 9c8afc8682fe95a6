#![no_main]

use libfuzzer_sys::fuzz_target;

use paver::classify::{classify, convert_source_candidates, swap_extension};

fuzz_target!(|data: &[u8]| {
    if let Ok(path) = std::str::from_utf8(data) {
        // Classification is total and must never panic
        let class = classify(path);

        // Case-insensitivity over the ASCII range
        assert_eq!(class, classify(&path.to_ascii_uppercase()));
        assert_eq!(class, classify(&path.to_ascii_lowercase()));

        // Extension swapping and candidate reversal must never panic
        let texture = swap_extension(path, "paa");
        let _ = convert_source_candidates(&texture);
    }
});
