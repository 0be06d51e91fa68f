#![no_main]
use libfuzzer_sys::fuzz_target;
use spdx_tools::parsers::parse_tag_value;
use spdx_tools::validate_full_spdx_document;

/// Fuzz the SPDX tag-value parser.
///
/// Prefixes input with a complete document header so the element and
/// relationship tags are reached, and validates whatever parses.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = parse_tag_value(s);

        if s.len() < 10_000 {
            let wrapped = format!(
                "SPDXVersion: SPDX-2.3\nDataLicense: CC0-1.0\nSPDXID: SPDXRef-DOCUMENT\nDocumentName: fuzz\nDocumentNamespace: https://example.com/fuzz\nCreator: Tool: fuzz\nCreated: 2024-01-01T00:00:00Z\n{s}",
            );
            if let Ok(document) = parse_tag_value(&wrapped) {
                let _ = validate_full_spdx_document(&document, None);
            }
        }
    }
});
