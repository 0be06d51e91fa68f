//! SPDX tag-value writer.
//!
//! Sections are written in a fixed order: document header and creation info,
//! external document references, extracted licensing info, files no package
//! contains, each package followed by the files it contains, snippets,
//! relationships and annotations. Unpackaged files go before the first
//! package because a file after a package is read back as part of it.

use crate::model::datetime::format_datetime;
use crate::model::{
    Annotation, Document, ExtractedLicensingInfo, File, Package, Relationship,
    RelationshipType, Snippet, SpdxEnum,
};
use std::collections::HashSet;
use std::fmt::Display;

/// Writes `document` as tag-value text.
#[must_use]
pub fn write_tag_value(document: &Document) -> String {
    let mut writer = Sections::default();
    writer.document(document);
    writer.out
}

#[derive(Debug, Default)]
struct Sections {
    out: String,
}

impl Sections {
    fn value(&mut self, tag: &str, value: impl Display) {
        self.out.push_str(tag);
        self.out.push_str(": ");
        self.out.push_str(&value.to_string());
        self.out.push('\n');
    }

    fn optional(&mut self, tag: &str, value: Option<impl Display>) {
        if let Some(value) = value {
            self.value(tag, value);
        }
    }

    /// Wraps the value in `<text>` when reading it back line by line would
    /// change it.
    fn text(&mut self, tag: &str, value: &str) {
        if needs_text_block(value) {
            self.value(tag, format_args!("<text>{value}</text>"));
        } else {
            self.value(tag, value);
        }
    }

    fn optional_text(&mut self, tag: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.text(tag, value);
        }
    }

    fn section(&mut self, title: &str) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        self.out.push_str("## ");
        self.out.push_str(title);
        self.out.push('\n');
    }

    fn document(&mut self, document: &Document) {
        let info = &document.creation_info;
        self.section("Document Information");
        self.value("SPDXVersion", &info.spdx_version);
        self.value("DataLicense", &info.data_license);
        self.value("SPDXID", &info.spdx_id);
        self.value("DocumentName", &info.name);
        self.value("DocumentNamespace", &info.document_namespace);
        self.optional_text("DocumentComment", info.document_comment.as_deref());

        if !info.external_document_refs.is_empty() {
            self.section("External Document References");
            for external in &info.external_document_refs {
                self.value(
                    "ExternalDocumentRef",
                    format_args!(
                        "{} {} {}",
                        external.document_ref_id, external.document_uri, external.checksum
                    ),
                );
            }
        }

        self.section("Creation Information");
        self.optional("LicenseListVersion", info.license_list_version.as_ref());
        for creator in &info.creators {
            self.value("Creator", creator);
        }
        self.value("Created", format_datetime(&info.created));
        self.optional_text("CreatorComment", info.creator_comment.as_deref());

        for license in &document.extracted_licensing_info {
            self.section("License Information");
            self.extracted_licensing_info(license);
        }

        let placement = FilePlacement::new(document);
        for file in placement.unpackaged(document) {
            self.section("File Information");
            self.file(file);
        }
        for package in &document.packages {
            self.section("Package Information");
            self.package(package);
            for file in placement.contained_in(document, &package.spdx_id) {
                self.section("File Information");
                self.file(file);
            }
        }

        for snippet in &document.snippets {
            self.section("Snippet Information");
            self.snippet(snippet);
        }

        let relationships: Vec<&Relationship> = document
            .relationships
            .iter()
            .filter(|rel| !placement.is_implied(rel))
            .collect();
        if !relationships.is_empty() {
            self.section("Relationships");
            for relationship in relationships {
                self.relationship(relationship);
            }
        }

        if !document.annotations.is_empty() {
            self.section("Annotations");
            for annotation in &document.annotations {
                self.annotation(annotation);
            }
        }
    }

    fn package(&mut self, package: &Package) {
        self.value("PackageName", &package.name);
        self.value("SPDXID", &package.spdx_id);
        self.optional("PackageVersion", package.version.as_ref());
        self.optional("PackageFileName", package.file_name.as_ref());
        self.optional("PackageSupplier", package.supplier.as_ref());
        self.optional("PackageOriginator", package.originator.as_ref());
        self.value("PackageDownloadLocation", &package.download_location);
        self.value("FilesAnalyzed", package.files_analyzed);
        if let Some(code) = &package.verification_code {
            if code.excluded_files.is_empty() {
                self.value("PackageVerificationCode", &code.value);
            } else {
                self.value(
                    "PackageVerificationCode",
                    format_args!("{} (excludes: {})", code.value, code.excluded_files.join(", ")),
                );
            }
        }
        for checksum in &package.checksums {
            self.value("PackageChecksum", checksum);
        }
        self.optional("PackageHomePage", package.homepage.as_ref());
        self.optional_text("PackageSourceInfo", package.source_info.as_deref());
        self.optional("PackageLicenseConcluded", package.license_concluded.as_ref());
        for license in &package.license_info_from_files {
            self.value("PackageLicenseInfoFromFiles", license);
        }
        self.optional("PackageLicenseDeclared", package.license_declared.as_ref());
        self.optional_text("PackageLicenseComments", package.license_comment.as_deref());
        if let Some(copyright) = &package.copyright_text {
            self.text("PackageCopyrightText", &copyright.to_string());
        }
        self.optional_text("PackageSummary", package.summary.as_deref());
        self.optional_text("PackageDescription", package.description.as_deref());
        self.optional_text("PackageComment", package.comment.as_deref());
        for external in &package.external_references {
            self.value(
                "ExternalRef",
                format_args!(
                    "{} {} {}",
                    external.category.tag_value_name(),
                    external.reference_type,
                    external.locator
                ),
            );
            self.optional_text("ExternalRefComment", external.comment.as_deref());
        }
        for text in &package.attribution_texts {
            self.text("PackageAttributionText", text);
        }
        if let Some(purpose) = package.primary_package_purpose {
            self.value("PrimaryPackagePurpose", purpose.tag_value_name());
        }
        self.optional("ReleaseDate", package.release_date.as_ref().map(format_datetime));
        self.optional("BuiltDate", package.built_date.as_ref().map(format_datetime));
        self.optional("ValidUntilDate", package.valid_until_date.as_ref().map(format_datetime));
    }

    fn file(&mut self, file: &File) {
        self.value("FileName", &file.name);
        self.value("SPDXID", &file.spdx_id);
        for file_type in &file.file_types {
            self.value("FileType", file_type.tag_value_name());
        }
        for checksum in &file.checksums {
            self.value("FileChecksum", checksum);
        }
        self.optional("LicenseConcluded", file.license_concluded.as_ref());
        for license in &file.license_info_in_file {
            self.value("LicenseInfoInFile", license);
        }
        self.optional_text("LicenseComments", file.license_comment.as_deref());
        if let Some(copyright) = &file.copyright_text {
            self.text("FileCopyrightText", &copyright.to_string());
        }
        self.optional_text("FileComment", file.comment.as_deref());
        self.optional_text("FileNotice", file.notice.as_deref());
        for contributor in &file.contributors {
            self.text("FileContributor", contributor);
        }
        for text in &file.attribution_texts {
            self.text("FileAttributionText", text);
        }
    }

    fn snippet(&mut self, snippet: &Snippet) {
        self.value("SnippetSPDXID", &snippet.spdx_id);
        self.value("SnippetFromFileSPDXID", &snippet.file_spdx_id);
        let (start, end) = snippet.byte_range;
        self.value("SnippetByteRange", format_args!("{start}:{end}"));
        if let Some((start, end)) = snippet.line_range {
            self.value("SnippetLineRange", format_args!("{start}:{end}"));
        }
        self.optional("SnippetLicenseConcluded", snippet.license_concluded.as_ref());
        for license in &snippet.license_info_in_snippet {
            self.value("LicenseInfoInSnippet", license);
        }
        self.optional_text("SnippetLicenseComments", snippet.license_comment.as_deref());
        if let Some(copyright) = &snippet.copyright_text {
            self.text("SnippetCopyrightText", &copyright.to_string());
        }
        self.optional_text("SnippetComment", snippet.comment.as_deref());
        self.optional_text("SnippetName", snippet.name.as_deref());
        for text in &snippet.attribution_texts {
            self.text("SnippetAttributionText", text);
        }
    }

    fn extracted_licensing_info(&mut self, info: &ExtractedLicensingInfo) {
        self.optional("LicenseID", info.license_id.as_ref());
        if let Some(text) = &info.extracted_text {
            self.value("ExtractedText", format_args!("<text>{text}</text>"));
        }
        self.optional("LicenseName", info.license_name.as_ref());
        for reference in &info.cross_references {
            self.value("LicenseCrossReference", reference);
        }
        self.optional_text("LicenseComment", info.comment.as_deref());
    }

    fn relationship(&mut self, relationship: &Relationship) {
        self.value(
            "Relationship",
            format_args!(
                "{} {} {}",
                relationship.spdx_element_id,
                relationship.relationship_type,
                relationship.related_spdx_element_id
            ),
        );
        self.optional_text("RelationshipComment", relationship.comment.as_deref());
    }

    fn annotation(&mut self, annotation: &Annotation) {
        self.value("Annotator", &annotation.annotator);
        self.value("AnnotationDate", format_datetime(&annotation.annotation_date));
        self.value("AnnotationType", annotation.annotation_type.tag_value_name());
        self.value("SPDXREF", &annotation.spdx_id);
        self.text("AnnotationComment", &annotation.annotation_comment);
    }
}

fn needs_text_block(value: &str) -> bool {
    value.is_empty()
        || value.contains('\n')
        || value != value.trim()
        || value.starts_with("<text>")
}

/// Which package each file is written under.
struct FilePlacement {
    /// `(package, file)` pairs; a file goes under the first package containing it
    placed: Vec<(String, String)>,
    placed_files: HashSet<String>,
}

impl FilePlacement {
    fn new(document: &Document) -> Self {
        let packages: HashSet<&str> = document.packages.iter().map(|p| p.spdx_id.as_str()).collect();
        let files: HashSet<&str> = document.files.iter().map(|f| f.spdx_id.as_str()).collect();
        let mut placed = Vec::new();
        let mut placed_files = HashSet::new();
        for rel in &document.relationships {
            let Some(target) = rel.related_spdx_element_id.value() else {
                continue;
            };
            let (package, file) = match rel.relationship_type {
                RelationshipType::Contains => (rel.spdx_element_id.as_str(), target.as_str()),
                RelationshipType::ContainedBy => (target.as_str(), rel.spdx_element_id.as_str()),
                _ => continue,
            };
            if packages.contains(package)
                && files.contains(file)
                && placed_files.insert(file.to_string())
            {
                placed.push((package.to_string(), file.to_string()));
            }
        }
        Self {
            placed,
            placed_files,
        }
    }

    fn unpackaged<'a>(&'a self, document: &'a Document) -> impl Iterator<Item = &'a File> + 'a {
        document
            .files
            .iter()
            .filter(move |file| !self.placed_files.contains(&file.spdx_id))
    }

    fn contained_in<'a>(
        &'a self,
        document: &'a Document,
        package_id: &'a str,
    ) -> impl Iterator<Item = &'a File> + 'a {
        document.files.iter().filter(move |file| {
            self.placed
                .iter()
                .any(|(package, placed)| package == package_id && *placed == file.spdx_id)
        })
    }

    /// A comment-less containment edge that the file order already expresses.
    fn is_implied(&self, relationship: &Relationship) -> bool {
        relationship.comment.is_none()
            && self
                .placed
                .iter()
                .any(|(package, file)| relationship.is_containment(package, file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::datetime::parse_datetime;
    use crate::model::{
        Actor, Checksum, ChecksumAlgorithm, CreationInfo, LicenseExpression, ThreeValued,
    };
    use crate::parsers::tagvalue::parse_tag_value;

    const SHA1: &str = "85ed0817af83a24ad8da68c2b5094de69833983c";

    fn document() -> Document {
        let info = CreationInfo::new(
            "SPDX-2.3",
            "SPDXRef-DOCUMENT",
            "Doc",
            "https://x/y",
            vec![Actor::tool("LF-1.0").unwrap()],
            parse_datetime("2022-12-01T00:00:00Z").unwrap(),
        );
        let mut document = Document::new(info);
        let mut package = Package::new("SPDXRef-P", "package", ThreeValued::NoAssertion);
        package.checksums.push(Checksum::new(ChecksumAlgorithm::Sha1, SHA1));
        package.files_analyzed = false;
        document.packages.push(package);
        document.relationships.push(Relationship::new(
            "SPDXRef-DOCUMENT",
            RelationshipType::Describes,
            ThreeValued::Value("SPDXRef-P".to_string()),
        ));
        document
    }

    fn file(id: &str, name: &str) -> File {
        let mut file = File::new(name, id, vec![Checksum::new(ChecksumAlgorithm::Sha1, SHA1)]);
        file.copyright_text = Some(ThreeValued::NoAssertion);
        file
    }

    #[test]
    fn test_round_trip() {
        let document = document();
        let written = write_tag_value(&document);
        assert_eq!(parse_tag_value(&written).unwrap(), document);
    }

    #[test]
    fn test_literals_and_text_blocks() {
        let mut document = document();
        document.packages[0].files_analyzed = true;
        let mut f = file("SPDXRef-F", "./f.c");
        f.comment = Some("two\nlines".to_string());
        document.files.push(f);
        document.relationships.push(Relationship::new(
            "SPDXRef-P",
            RelationshipType::Contains,
            ThreeValued::Value("SPDXRef-F".to_string()),
        ));
        let written = write_tag_value(&document);
        assert!(written.contains("FileCopyrightText: NOASSERTION\n"));
        assert!(written.contains("FileComment: <text>two\nlines</text>\n"));
        assert!(!written.contains("Relationship: SPDXRef-P CONTAINS SPDXRef-F"));
        assert_eq!(parse_tag_value(&written).unwrap(), document);
    }

    #[test]
    fn test_unpackaged_files_precede_packages() {
        let mut document = document();
        document.files.push(file("SPDXRef-Free", "./free.c"));
        let written = write_tag_value(&document);
        let file_at = written.find("FileName: ./free.c").unwrap();
        let package_at = written.find("PackageName: package").unwrap();
        assert!(file_at < package_at);
        let reparsed = parse_tag_value(&written).unwrap();
        assert_eq!(reparsed.relationships.len(), 1);
    }

    #[test]
    fn test_commented_containment_is_kept() {
        let mut document = document();
        document.packages[0].files_analyzed = true;
        document.files.push(file("SPDXRef-F", "./f.c"));
        document.relationships.push(
            Relationship::new(
                "SPDXRef-P",
                RelationshipType::Contains,
                ThreeValued::Value("SPDXRef-F".to_string()),
            )
            .with_comment("vendored"),
        );
        let written = write_tag_value(&document);
        assert!(written.contains("RelationshipComment: vendored"));
        assert_eq!(parse_tag_value(&written).unwrap(), document);
    }

    #[test]
    fn test_license_and_enum_spellings() {
        let mut document = document();
        let package = &mut document.packages[0];
        package.license_concluded = Some(ThreeValued::Value(
            "(MIT OR Apache-2.0) AND GPL-2.0-or-later".parse::<LicenseExpression>().unwrap(),
        ));
        package.primary_package_purpose = Some(crate::model::PrimaryPackagePurpose::OperatingSystem);
        let written = write_tag_value(&document);
        assert!(written.contains("PackageLicenseConcluded: (MIT OR Apache-2.0) AND GPL-2.0-or-later\n"));
        assert!(written.contains("PrimaryPackagePurpose: OPERATING-SYSTEM\n"));
        assert_eq!(parse_tag_value(&written).unwrap(), document);
    }
}
