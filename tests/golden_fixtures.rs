use spdx_tools::model::{
    ActorType, AnnotationType, ChecksumAlgorithm, Document, LicenseExpression, RelationshipType,
    ThreeValued,
};
use spdx_tools::{parse_file, validate_full_spdx_document};
use std::path::Path;

fn sorted_relationships(document: &mut Document) {
    document.relationships.sort_by(|a, b| {
        (&a.spdx_element_id, a.relationship_type, a.related_spdx_element_id.to_string()).cmp(&(
            &b.spdx_element_id,
            b.relationship_type,
            b.related_spdx_element_id.to_string(),
        ))
    });
}

fn has_relationship(document: &Document, from: &str, kind: RelationshipType, to: &str) -> bool {
    document.relationships.iter().any(|r| {
        r.spdx_element_id == from
            && r.relationship_type == kind
            && r.related_spdx_element_id.value().map(String::as_str) == Some(to)
    })
}

#[test]
fn golden_parse_tag_value() {
    let document = parse_file(Path::new("tests/fixtures/hello.spdx"))
        .expect("failed to parse tag-value fixture");

    let info = &document.creation_info;
    assert_eq!(info.spdx_version, "SPDX-2.3");
    assert_eq!(info.name, "hello-world");
    assert_eq!(info.creators.len(), 2);
    assert_eq!(info.creators[0].actor_type, ActorType::Tool);
    assert_eq!(info.creators[1].email.as_deref(), Some("sbom@example.com"));
    assert_eq!(
        info.document_comment.as_deref(),
        Some("Shared by the integration tests.")
    );

    assert_eq!(document.packages.len(), 2);
    assert_eq!(document.files.len(), 2);
    assert_eq!(document.snippets.len(), 1);
    assert_eq!(document.extracted_licensing_info.len(), 1);
    assert_eq!(document.annotations.len(), 1);

    let hello = &document.packages[0];
    assert_eq!(hello.checksums[0].algorithm, ChecksumAlgorithm::Sha256);
    assert_eq!(hello.external_references[0].reference_type, "purl");

    let libgreet = &document.packages[1];
    assert!(!libgreet.files_analyzed);
    assert_eq!(
        libgreet.license_concluded,
        Some(ThreeValued::Value(LicenseExpression::Or(vec![
            LicenseExpression::Custom("LicenseRef-Greet".to_string()),
            LicenseExpression::Listed("Apache-2.0".to_string()),
        ])))
    );
    assert_eq!(libgreet.license_declared, Some(ThreeValued::NoAssertion));
    assert_eq!(libgreet.copyright_text, Some(ThreeValued::None));

    let snippet = &document.snippets[0];
    assert_eq!(snippet.byte_range, (1, 120));
    assert_eq!(snippet.line_range, Some((1, 8)));

    // Files following a package are contained by it.
    assert_eq!(document.relationships.len(), 4);
    assert!(has_relationship(
        &document,
        "SPDXRef-Package-hello",
        RelationshipType::Contains,
        "SPDXRef-File-license"
    ));
    let depends = document
        .relationships
        .iter()
        .find(|r| r.relationship_type == RelationshipType::DependsOn)
        .expect("DEPENDS_ON relationship");
    assert_eq!(depends.comment.as_deref(), Some("linked statically"));

    assert_eq!(document.annotations[0].annotation_type, AnnotationType::Review);
    assert_eq!(document.annotations[0].spdx_id, "SPDXRef-Package-hello");
}

#[test]
fn golden_tag_value_fixture_is_valid() {
    let document = parse_file(Path::new("tests/fixtures/hello.spdx"))
        .expect("failed to parse tag-value fixture");
    let messages = validate_full_spdx_document(&document, None);
    assert!(messages.is_empty(), "unexpected messages: {messages:#?}");
}

#[test]
fn golden_tag_value_and_json_agree() {
    let mut tag_value = parse_file(Path::new("tests/fixtures/hello.spdx"))
        .expect("failed to parse tag-value fixture");
    let mut json = parse_file(Path::new("tests/fixtures/hello.spdx.json"))
        .expect("failed to parse JSON fixture");

    sorted_relationships(&mut tag_value);
    sorted_relationships(&mut json);
    assert_eq!(tag_value, json);
}

#[test]
fn golden_parse_yaml() {
    let document = parse_file(Path::new("tests/fixtures/hello.spdx.yaml"))
        .expect("failed to parse YAML fixture");

    assert_eq!(document.packages.len(), 1);
    let package = &document.packages[0];
    assert_eq!(package.download_location, ThreeValued::NoAssertion);
    assert_eq!(
        package.license_concluded.as_ref().map(ToString::to_string).as_deref(),
        Some("MIT AND BSD-3-Clause")
    );
    assert_eq!(package.external_references[0].reference_type, "cpe23Type");
    assert!(has_relationship(
        &document,
        "SPDXRef-DOCUMENT",
        RelationshipType::Describes,
        "SPDXRef-Package-hello"
    ));
    assert!(validate_full_spdx_document(&document, None).is_empty());
}

#[test]
fn golden_parse_xml() {
    let document = parse_file(Path::new("tests/fixtures/hello.spdx.xml"))
        .expect("failed to parse XML fixture");

    assert_eq!(document.creation_info.creators.len(), 2);
    assert_eq!(document.packages[0].download_location, ThreeValued::None);
    assert_eq!(document.files[0].name, "./src/hello.c");
    assert!(has_relationship(
        &document,
        "SPDXRef-Package-hello",
        RelationshipType::Contains,
        "SPDXRef-File-hello-c"
    ));
    assert!(has_relationship(
        &document,
        "SPDXRef-DOCUMENT",
        RelationshipType::Describes,
        "SPDXRef-Package-hello"
    ));
}

#[test]
fn golden_parse_rdf() {
    let document = parse_file(Path::new("tests/fixtures/hello.spdx.rdf.xml"))
        .expect("failed to parse RDF fixture");

    assert_eq!(document.creation_info.spdx_id, "SPDXRef-DOCUMENT");
    assert_eq!(
        document.creation_info.document_namespace,
        "https://example.com/spdx/hello-world-1.0"
    );
    assert_eq!(document.creation_info.data_license, "CC0-1.0");
    assert_eq!(document.packages.len(), 1);
    assert_eq!(document.packages[0].version.as_deref(), Some("1.0.0"));
    assert_eq!(document.files.len(), 1);
    assert_eq!(document.files[0].checksums[0].algorithm, ChecksumAlgorithm::Sha1);
    assert_eq!(document.files[0].copyright_text, Some(ThreeValued::NoAssertion));
    assert!(has_relationship(
        &document,
        "SPDXRef-DOCUMENT",
        RelationshipType::Describes,
        "SPDXRef-Package-hello"
    ));
    assert!(has_relationship(
        &document,
        "SPDXRef-Package-hello",
        RelationshipType::Contains,
        "SPDXRef-File-hello-c"
    ));
}
