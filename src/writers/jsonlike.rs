//! Converts a [`Document`] into the tree shared by the JSON, YAML and XML
//! writers.
//!
//! All relationships are written explicitly. `documentDescribes` and
//! `hasFiles` are added as convenience lists; readers skip the edges they
//! imply when an equivalent relationship is present. Annotations are nested
//! under the package, file or snippet they target.

use crate::model::datetime::format_datetime;
use crate::model::{
    get_contained_spdx_element_ids, Annotation, Checksum, Document, ExternalPackageRef,
    ExtractedLicensingInfo, File, LicenseExpression, Package, Range, Relationship, Snippet,
    SpdxEnum, ThreeValued,
};
use serde_json::{json, Map, Value};
use std::collections::HashSet;
use std::fmt::Display;

/// Insertion-ordered mapping that leaves out absent values and empty lists.
#[derive(Debug, Default)]
struct Obj(Map<String, Value>);

impl Obj {
    fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    fn opt(self, key: &str, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(value) => self.set(key, value),
            None => self,
        }
    }

    fn text(self, key: &str, value: Option<&impl Display>) -> Self {
        self.opt(key, value.map(ToString::to_string))
    }

    fn list(self, key: &str, values: Vec<Value>) -> Self {
        if values.is_empty() {
            self
        } else {
            self.set(key, Value::Array(values))
        }
    }

    fn strings<T: Display>(self, key: &str, values: &[T]) -> Self {
        let values = values.iter().map(|v| Value::String(v.to_string())).collect();
        self.list(key, values)
    }

    fn build(self) -> Value {
        Value::Object(self.0)
    }
}

/// Builds the wire tree for `document`.
#[must_use]
pub fn document_to_value(document: &Document) -> Value {
    let info = &document.creation_info;
    let nested_targets: HashSet<&str> = document.element_ids().collect();

    let creation_info = Obj::default()
        .text("comment", info.creator_comment.as_ref())
        .set("created", format_datetime(&info.created))
        .strings("creators", &info.creators)
        .text("licenseListVersion", info.license_list_version.as_ref())
        .build();

    let external_refs = info
        .external_document_refs
        .iter()
        .map(|external| {
            Obj::default()
                .set("externalDocumentId", external.document_ref_id.as_str())
                .set("spdxDocument", external.document_uri.as_str())
                .set("checksum", checksum(&external.checksum))
                .build()
        })
        .collect();

    let top_level_annotations = document
        .annotations
        .iter()
        .filter(|a| !nested_targets.contains(a.spdx_id.as_str()))
        .map(|a| {
            let target = (a.spdx_id != info.spdx_id).then_some(a.spdx_id.as_str());
            annotation(a, target)
        })
        .collect();

    Obj::default()
        .set("spdxVersion", info.spdx_version.as_str())
        .set("dataLicense", info.data_license.as_str())
        .set("SPDXID", info.spdx_id.as_str())
        .set("name", info.name.as_str())
        .set("documentNamespace", info.document_namespace.as_str())
        .opt("comment", info.document_comment.as_deref())
        .set("creationInfo", creation_info)
        .list("externalDocumentRefs", external_refs)
        .strings("documentDescribes", &document.described_ids())
        .list(
            "packages",
            document.packages.iter().map(|p| package(p, document)).collect(),
        )
        .list(
            "files",
            document.files.iter().map(|f| file(f, document)).collect(),
        )
        .list(
            "snippets",
            document.snippets.iter().map(|s| snippet(s, document)).collect(),
        )
        .list("annotations", top_level_annotations)
        .list(
            "relationships",
            document.relationships.iter().map(relationship).collect(),
        )
        .list(
            "hasExtractedLicensingInfos",
            document
                .extracted_licensing_info
                .iter()
                .map(extracted_licensing_info)
                .collect(),
        )
        .build()
}

fn checksum(checksum: &Checksum) -> Value {
    json!({
        "algorithm": checksum.algorithm.as_str(),
        "checksumValue": checksum.value,
    })
}

fn license(value: Option<&ThreeValued<LicenseExpression>>) -> Option<String> {
    value.map(ToString::to_string)
}

/// Annotations are written under the element they annotate, so reading the
/// document back groups them by element instead of keeping document order.
fn annotations_for(document: &Document, spdx_id: &str) -> Vec<Value> {
    document
        .annotations
        .iter()
        .filter(|a| a.spdx_id == spdx_id)
        .map(|a| annotation(a, None))
        .collect()
}

fn package(package: &Package, document: &Document) -> Value {
    let file_ids: HashSet<&str> = document.files.iter().map(|f| f.spdx_id.as_str()).collect();
    let has_files: Vec<&str> = get_contained_spdx_element_ids(document, &package.spdx_id)
        .into_iter()
        .filter(|id| file_ids.contains(id))
        .collect();
    let verification_code = package.verification_code.as_ref().map(|code| {
        Obj::default()
            .set("packageVerificationCodeValue", code.value.as_str())
            .strings("packageVerificationCodeExcludedFiles", &code.excluded_files)
            .build()
    });

    Obj::default()
        .set("SPDXID", package.spdx_id.as_str())
        .list("annotations", annotations_for(document, &package.spdx_id))
        .strings("attributionTexts", &package.attribution_texts)
        .text("builtDate", package.built_date.as_ref().map(format_datetime).as_ref())
        .list("checksums", package.checksums.iter().map(checksum).collect())
        .opt("comment", package.comment.as_deref())
        .text("copyrightText", package.copyright_text.as_ref())
        .opt("description", package.description.as_deref())
        .set("downloadLocation", package.download_location.to_string())
        .list(
            "externalRefs",
            package.external_references.iter().map(external_ref).collect(),
        )
        .set("filesAnalyzed", package.files_analyzed)
        .strings("hasFiles", &has_files)
        .text("homepage", package.homepage.as_ref())
        .opt("licenseComments", package.license_comment.as_deref())
        .opt("licenseConcluded", license(package.license_concluded.as_ref()))
        .opt("licenseDeclared", license(package.license_declared.as_ref()))
        .strings("licenseInfoFromFiles", &package.license_info_from_files)
        .set("name", package.name.as_str())
        .text("originator", package.originator.as_ref())
        .opt("packageFileName", package.file_name.as_deref())
        .opt("packageVerificationCode", verification_code)
        .opt(
            "primaryPackagePurpose",
            package.primary_package_purpose.map(|p| p.json_name()),
        )
        .text("releaseDate", package.release_date.as_ref().map(format_datetime).as_ref())
        .opt("sourceInfo", package.source_info.as_deref())
        .opt("summary", package.summary.as_deref())
        .text("supplier", package.supplier.as_ref())
        .text(
            "validUntilDate",
            package.valid_until_date.as_ref().map(format_datetime).as_ref(),
        )
        .opt("versionInfo", package.version.as_deref())
        .build()
}

fn external_ref(external: &ExternalPackageRef) -> Value {
    Obj::default()
        .opt("comment", external.comment.as_deref())
        .set("referenceCategory", external.category.json_name())
        .set("referenceLocator", external.locator.as_str())
        .set("referenceType", external.reference_type.as_str())
        .build()
}

fn file(file: &File, document: &Document) -> Value {
    let file_types: Vec<&str> = file.file_types.iter().map(|t| t.json_name()).collect();
    Obj::default()
        .set("SPDXID", file.spdx_id.as_str())
        .list("annotations", annotations_for(document, &file.spdx_id))
        .strings("attributionTexts", &file.attribution_texts)
        .list("checksums", file.checksums.iter().map(checksum).collect())
        .opt("comment", file.comment.as_deref())
        .text("copyrightText", file.copyright_text.as_ref())
        .strings("fileContributors", &file.contributors)
        .set("fileName", file.name.as_str())
        .strings("fileTypes", &file_types)
        .opt("licenseComments", file.license_comment.as_deref())
        .opt("licenseConcluded", license(file.license_concluded.as_ref()))
        .strings("licenseInfoInFiles", &file.license_info_in_file)
        .opt("noticeText", file.notice.as_deref())
        .build()
}

fn range(file_id: &str, (start, end): Range, pointer_key: &str) -> Value {
    json!({
        "startPointer": {"reference": file_id, pointer_key: start},
        "endPointer": {"reference": file_id, pointer_key: end},
    })
}

fn snippet(snippet: &Snippet, document: &Document) -> Value {
    let mut ranges = vec![range(&snippet.file_spdx_id, snippet.byte_range, "offset")];
    if let Some(line_range) = snippet.line_range {
        ranges.push(range(&snippet.file_spdx_id, line_range, "lineNumber"));
    }
    Obj::default()
        .set("SPDXID", snippet.spdx_id.as_str())
        .list("annotations", annotations_for(document, &snippet.spdx_id))
        .strings("attributionTexts", &snippet.attribution_texts)
        .opt("comment", snippet.comment.as_deref())
        .text("copyrightText", snippet.copyright_text.as_ref())
        .opt("licenseComments", snippet.license_comment.as_deref())
        .opt("licenseConcluded", license(snippet.license_concluded.as_ref()))
        .strings("licenseInfoInSnippets", &snippet.license_info_in_snippet)
        .opt("name", snippet.name.as_deref())
        .list("ranges", ranges)
        .set("snippetFromFile", snippet.file_spdx_id.as_str())
        .build()
}

fn annotation(annotation: &Annotation, target: Option<&str>) -> Value {
    Obj::default()
        .opt("SPDXID", target)
        .set("annotationDate", format_datetime(&annotation.annotation_date))
        .set("annotationType", annotation.annotation_type.json_name())
        .set("annotator", annotation.annotator.to_string())
        .set("comment", annotation.annotation_comment.as_str())
        .build()
}

fn relationship(relationship: &Relationship) -> Value {
    Obj::default()
        .set("spdxElementId", relationship.spdx_element_id.as_str())
        .set(
            "relatedSpdxElement",
            relationship.related_spdx_element_id.to_string(),
        )
        .set("relationshipType", relationship.relationship_type.json_name())
        .opt("comment", relationship.comment.as_deref())
        .build()
}

fn extracted_licensing_info(info: &ExtractedLicensingInfo) -> Value {
    Obj::default()
        .opt("comment", info.comment.as_deref())
        .opt("extractedText", info.extracted_text.as_deref())
        .opt("licenseId", info.license_id.as_deref())
        .text("name", info.license_name.as_ref())
        .strings("seeAlsos", &info.cross_references)
        .build()
}
