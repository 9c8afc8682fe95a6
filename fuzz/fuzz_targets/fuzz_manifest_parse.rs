#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Manifest parsing must never panic; on success, serialization of
        // the parsed manifest must parse back to the same manifest.
        if let Ok(manifest) = paver::Manifest::parse(text) {
            let round = paver::Manifest::parse(&manifest.serialize())
                .expect("serialized manifest must parse");
            assert_eq!(round, manifest);
        }
    }
});
