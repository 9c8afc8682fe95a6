#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Hash parsing must never panic, and anything accepted must
        // round-trip through its display form.
        if let Some(hash) = paver::ContentHash::parse(text) {
            assert_eq!(paver::ContentHash::parse(&hash.to_string()), Some(hash));
        }
    }
});
