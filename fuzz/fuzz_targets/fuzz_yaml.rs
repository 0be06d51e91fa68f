#![no_main]
use libfuzzer_sys::fuzz_target;
use spdx_tools::parsers::parse_yaml;

/// Fuzz the SPDX YAML parser.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = parse_yaml(s);
    }
});
