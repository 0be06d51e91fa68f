//! Integration tests for spdx-tools
//!
//! These tests verify end-to-end behavior across the codecs, the validator,
//! the SPDX 3 conversion and the command handlers.

use spdx_tools::{
    cli::{run_bump, run_convert, run_parse, BumpArgs, ConvertArgs, Outcome, ParseArgs},
    model::{Document, RelationshipType},
    parse_file,
    spdx3::{bump_document, Element},
    write_file, FileFormat, SpdxError, ToolConfig,
};
use std::path::{Path, PathBuf};

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn hello() -> Document {
    parse_file(&fixture_path("hello.spdx")).expect("Failed to parse hello.spdx")
}

// ============================================================================
// Round Trip Tests
// ============================================================================

mod round_trip_tests {
    use super::*;
    use spdx_tools::parsers::parse_tag_value;
    use spdx_tools::validate_full_spdx_document;

    #[test]
    fn test_every_format_preserves_document() {
        let expected = hello();
        for format in FileFormat::ALL {
            let rendered = format.writer().write_str(&expected).expect("render");
            let parsed = format.parser().parse_str(&rendered).expect("parse");
            assert_eq!(parsed, expected, "round trip through {format}");
        }
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        for file_name in [
            "out.spdx",
            "out.spdx.json",
            "out.spdx.yaml",
            "out.spdx.xml",
            "out.spdx.rdf.xml",
        ] {
            let path = dir.path().join(file_name);
            write_file(&hello(), &path, true).expect("Failed to write document");
            let parsed = parse_file(&path).expect("Failed to parse written document");
            assert_eq!(parsed, hello(), "round trip through {file_name}");
        }
    }

    #[test]
    fn test_file_after_package_is_contained() {
        let input = "\
SPDXVersion: SPDX-2.3
DataLicense: CC0-1.0
SPDXID: SPDXRef-DOCUMENT
DocumentName: contained
DocumentNamespace: https://example.com/spdx/contained
Creator: Tool: test
Created: 2024-03-01T12:00:00Z
Relationship: SPDXRef-DOCUMENT DESCRIBES SPDXRef-Package-x

PackageName: x
SPDXID: SPDXRef-Package-x
PackageDownloadLocation: NOASSERTION
FilesAnalyzed: true

FileName: ./y.c
SPDXID: SPDXRef-File-y
FileChecksum: SHA1: d6a770ba38583ed4bb4525bd96e50461655d2758
";
        let document = parse_tag_value(input).expect("parse");
        let contains: Vec<_> = document
            .relationships
            .iter()
            .filter(|r| r.relationship_type == RelationshipType::Contains)
            .collect();
        assert_eq!(contains.len(), 1);
        assert_eq!(contains[0].spdx_element_id, "SPDXRef-Package-x");
        assert_eq!(contains[0].related_spdx_element_id.to_string(), "SPDXRef-File-y");
        assert!(validate_full_spdx_document(&document, None).is_empty());
    }
}

// ============================================================================
// Validation Tests
// ============================================================================

mod validation_tests {
    use super::*;
    use spdx_tools::validate_full_spdx_document;

    #[test]
    fn test_write_refuses_invalid_document() {
        let mut document = hello();
        document.files[0].name = "src/hello.c".to_string();

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("invalid.spdx.json");
        let err = write_file(&document, &path, true).expect_err("should refuse to write");
        match err {
            SpdxError::Validation { messages } => {
                assert!(messages.iter().any(|m| m.contains("./")));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!path.exists());

        write_file(&document, &path, false).expect("unvalidated write");
        assert!(path.exists());
    }

    #[test]
    fn test_spdx_2_2_requires_license_fields() {
        let document = hello();
        let messages = validate_full_spdx_document(&document, Some("SPDX-2.2"));
        // the snippet carries no copyright text
        assert!(messages.iter().any(|m| {
            m.context.spdx_id.as_deref() == Some("SPDXRef-Snippet-main")
                && m.validation_message.contains("copyright_text is mandatory")
        }));
    }

    #[test]
    fn test_undeclared_license_ref() {
        let mut document = hello();
        document.extracted_licensing_info.clear();
        let messages = validate_full_spdx_document(&document, None);
        assert!(messages
            .iter()
            .any(|m| m.to_string().contains("LicenseRef-Greet")));
    }

    #[test]
    fn test_unknown_suffix_is_rejected() {
        let err = parse_file(Path::new("document.txt")).expect_err("unknown suffix");
        assert!(matches!(err, SpdxError::UnsupportedFormat(_)));
    }
}

// ============================================================================
// SPDX 3 Conversion Tests
// ============================================================================

mod bump_tests {
    use super::*;
    use spdx_tools::spdx3::model::RelationshipType as Spdx3RelationshipType;

    const NAMESPACE: &str = "https://example.com/spdx/hello-world-1.0";

    fn relationships_of(elements: &[&Element], kind: Spdx3RelationshipType) -> usize {
        elements
            .iter()
            .filter(|e| matches!(e, Element::Relationship(r) if r.relationship_type == kind))
            .count()
    }

    #[test]
    fn test_bump_fixture() {
        let result = bump_document(&hello());
        let payload = &result.payload;

        assert!(matches!(
            payload.get_element(&format!("{NAMESPACE}#SPDXRef-Package-hello")),
            Some(Element::Package(_))
        ));
        assert!(matches!(
            payload.get_element(&format!("{NAMESPACE}#SPDXRef-File-hello-c")),
            Some(Element::File(_))
        ));
        assert!(matches!(
            payload.get_element(&format!("{NAMESPACE}#SPDXRef-Snippet-main")),
            Some(Element::Snippet(_))
        ));

        let elements: Vec<&Element> = payload.elements().collect();
        let expressions = elements
            .iter()
            .filter(|e| matches!(e, Element::LicenseExpression(_)))
            .count();
        // MIT and "LicenseRef-Greet OR Apache-2.0"
        assert_eq!(expressions, 2);
        assert_eq!(
            relationships_of(&elements, Spdx3RelationshipType::HasConcludedLicense),
            4
        );
        assert_eq!(
            relationships_of(&elements, Spdx3RelationshipType::HasDeclaredLicense),
            1
        );
        assert_eq!(
            elements
                .iter()
                .filter(|e| matches!(e, Element::Annotation(_)))
                .count(),
            1
        );
        assert!(elements
            .iter()
            .any(|e| matches!(e, Element::SimpleLicensingText(_))));
    }

    #[test]
    fn test_bump_reports_dropped_fields() {
        let result = bump_document(&hello());
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("package.license_info_from_files")));
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("package.verification_code")));
    }

    #[test]
    fn test_bump_json_ld() {
        let result = bump_document(&hello());
        let json = spdx_tools::spdx3::write_payload_json(&result.payload).expect("serialize");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        assert!(value.get("@context").is_some());
        assert!(json.contains("software_Package"));
        assert!(json.contains("simplelicensing_LicenseExpression"));
    }
}

// ============================================================================
// Command Handler Tests
// ============================================================================

mod cli_tests {
    use super::*;

    #[test]
    fn test_parse_validates_fixture() {
        let args = ParseArgs {
            file: fixture_path("hello.spdx.json"),
            version: None,
            validate: true,
            printout: false,
        };
        let mut out = Vec::new();
        let outcome = run_parse(&args, &ToolConfig::default(), &mut out).expect("parse");
        assert_eq!(outcome, Outcome::Success);
    }

    #[test]
    fn test_parse_against_older_version_fails() {
        let args = ParseArgs {
            file: fixture_path("hello.spdx"),
            version: Some("SPDX-2.2".to_string()),
            validate: true,
            printout: false,
        };
        let mut out = Vec::new();
        let outcome = run_parse(&args, &ToolConfig::default(), &mut out).expect("parse");
        assert_eq!(outcome, Outcome::ValidationFailed);
        assert_eq!(outcome.exit_code(), 1);
        let printed = String::from_utf8(out).expect("utf-8");
        assert!(printed.contains("The document is invalid"));
    }

    #[test]
    fn test_convert_to_rdf() {
        let dir = tempfile::tempdir().expect("tempdir");
        let outfile = dir.path().join("hello.rdf.xml");
        let args = ConvertArgs {
            infile: fixture_path("hello.spdx"),
            outfile: outfile.clone(),
            novalidation: false,
            version: None,
        };
        let mut out = Vec::new();
        let outcome = run_convert(&args, &ToolConfig::default(), &mut out).expect("convert");
        assert_eq!(outcome, Outcome::Success);

        let converted = parse_file(&outfile).expect("parse converted");
        assert_eq!(converted.packages.len(), 2);
    }

    #[test]
    fn test_bump_to_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let outfile = dir.path().join("hello.spdx3.json");
        let args = BumpArgs {
            infile: fixture_path("hello.spdx.yaml"),
            outfile: Some(outfile.clone()),
            novalidation: false,
        };
        let mut out = Vec::new();
        let outcome = run_bump(&args, &ToolConfig::default(), &mut out).expect("bump");
        assert_eq!(outcome, Outcome::Success);

        let written = std::fs::read_to_string(&outfile).expect("read output");
        let value: serde_json::Value = serde_json::from_str(&written).expect("valid JSON");
        assert!(value.get("@graph").is_some());
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let args = ParseArgs {
            file: fixture_path("missing.spdx"),
            ..ParseArgs::default()
        };
        let mut out = Vec::new();
        assert!(run_parse(&args, &ToolConfig::default(), &mut out).is_err());
    }
}
