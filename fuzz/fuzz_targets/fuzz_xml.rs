#![no_main]
use libfuzzer_sys::fuzz_target;
use spdx_tools::parsers::parse_xml;

/// Fuzz the SPDX XML parser.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = parse_xml(s);
    }
});
