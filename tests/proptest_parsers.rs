//! Property-based tests for the SPDX parsers.
//!
//! Ensures parsers don't panic on arbitrary input, including random strings,
//! tag-value lines, JSON-like fragments, and XML-like fragments.

use proptest::prelude::*;
use spdx_tools::parsers::{parse_json, parse_rdf, parse_tag_value, parse_xml, parse_yaml};

proptest! {
    // Parser tests only assert no-panic: random input is expected to
    // produce Err in almost all cases.
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn parsers_dont_panic(s in "\\PC{0,2000}") {
        let _ = parse_tag_value(&s);
        let _ = parse_json(&s);
        let _ = parse_yaml(&s);
        let _ = parse_xml(&s);
        let _ = parse_rdf(&s);
    }

    #[test]
    fn tag_value_lines_dont_panic(
        lines in prop::collection::vec(("[A-Za-z]{1,24}", "\\PC{0,80}"), 0..40)
    ) {
        let input: String = lines
            .iter()
            .map(|(tag, value)| format!("{tag}: {value}\n"))
            .collect();
        let _ = parse_tag_value(&input);
    }

    #[test]
    fn tag_value_without_header_is_rejected(value in "[a-z0-9 ]{0,40}") {
        let input = format!("PackageName: {value}\nSPDXID: SPDXRef-x\n");
        prop_assert!(parse_tag_value(&input).is_err());
    }

    #[test]
    fn unterminated_text_blocks_dont_panic(body in "\\PC{0,200}") {
        let input = format!("SPDXVersion: SPDX-2.3\nDocumentComment: <text>{body}\n");
        let _ = parse_tag_value(&input);
    }

    #[test]
    fn json_like_input_doesnt_panic(
        s in prop::string::string_regex(r#"\{[^\}]{0,500}\}"#).unwrap()
    ) {
        let _ = parse_json(&s);
        let _ = parse_yaml(&s);
    }

    #[test]
    fn xml_like_input_doesnt_panic(
        s in prop::string::string_regex(r#"<[a-z]{1,20}>[^<]{0,200}</[a-z]{1,20}>"#).unwrap()
    ) {
        let _ = parse_xml(&s);
        let _ = parse_rdf(&s);
    }

    #[test]
    fn document_shaped_json_doesnt_panic(
        version in "SPDX-2\\.[0-9]",
        name in "\\PC{0,40}",
        created in "\\PC{0,30}",
    ) {
        let input = serde_json::json!({
            "spdxVersion": version,
            "SPDXID": "SPDXRef-DOCUMENT",
            "name": name,
            "dataLicense": "CC0-1.0",
            "documentNamespace": "https://example.com/doc",
            "creationInfo": { "creators": ["Tool: x"], "created": created },
        })
        .to_string();
        let _ = parse_json(&input);
    }
}
