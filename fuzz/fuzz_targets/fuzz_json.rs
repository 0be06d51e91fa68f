#![no_main]
use libfuzzer_sys::fuzz_target;
use spdx_tools::parsers::parse_json;
use spdx_tools::writers::write_json;

/// Fuzz the SPDX JSON parser; anything that parses must also serialize.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(document) = parse_json(s) {
            let _ = write_json(&document);
        }
    }
});
