#![no_main]
use libfuzzer_sys::fuzz_target;
use spdx_tools::parsers::parse_rdf;
use spdx_tools::spdx3::bump_document;

/// Fuzz the SPDX RDF/XML parser and feed parsed documents to the SPDX 3
/// conversion.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(document) = parse_rdf(s) {
            let _ = bump_document(&document);
        }
    }
});
