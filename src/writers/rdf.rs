//! SPDX RDF/XML writer.
//!
//! The document node comes first and holds creation info, external document
//! refs and extracted licensing info. Packages, files and snippets follow as
//! typed nodes named by `<namespace>#<id>`. Relationships and annotations are
//! written in document order, each in an `rdf:Description` of the element
//! holding it. Checksums, verification codes, external refs, license sets
//! and range pointers are blank nodes.

use crate::error::{Result, SpdxError};
use crate::model::datetime::format_datetime;
use crate::model::{
    get_contained_spdx_element_ids, Annotation, Checksum, Document, ExternalPackageRef,
    ExtractedLicensingInfo, File, LicenseExpression, Package, Range, Relationship, Snippet,
    SpdxEnum, ThreeValued,
};
use crate::parsers::rdf::graph::{
    DOAP_NS, LICENSES_NS, NOASSERTION_URI, NONE_URI, POINTER_NS, RDFS_NS, RDF_NS,
    REFERENCES_NS, SPDX_NS,
};
use crate::parsers::rdf::IdResolver;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::collections::HashSet;
use std::fmt::Display;

/// Reference types with an individual under `http://spdx.org/rdf/references/`.
const LISTED_REFERENCE_TYPES: &[&str] = &[
    "cpe22Type",
    "cpe23Type",
    "advisory",
    "fix",
    "url",
    "swid",
    "maven-central",
    "npm",
    "nuget",
    "bower",
    "purl",
    "swh",
    "gitoid",
];

/// Writes `document` as SPDX RDF/XML.
pub fn write_rdf(document: &Document) -> Result<String> {
    let ids = IdResolver::new(
        document.namespace(),
        &document.creation_info.external_document_refs,
    );
    let mut out = RdfXmlWriter {
        writer: Writer::new_with_indent(Vec::new(), b' ', 2),
        ids: &ids,
    };
    out.event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    out.event(Event::Start(BytesStart::new("rdf:RDF").with_attributes([
        ("xmlns:rdf", RDF_NS),
        ("xmlns:rdfs", RDFS_NS),
        ("xmlns:spdx", SPDX_NS),
        ("xmlns:ptr", POINTER_NS),
        ("xmlns:doap", DOAP_NS),
    ])))?;

    out.document(document)?;
    for package in &document.packages {
        out.package(package, document)?;
    }
    for file in &document.files {
        out.file(file)?;
    }
    for snippet in &document.snippets {
        out.snippet(snippet)?;
    }
    for relationship in &document.relationships {
        out.relationship(relationship)?;
    }
    for annotation in &document.annotations {
        out.annotation(annotation)?;
    }

    out.end("rdf:RDF")?;
    String::from_utf8(out.writer.into_inner()).map_err(serialization)
}

fn serialization(err: impl Display) -> SpdxError {
    SpdxError::Serialization(format!("RDF/XML: {err}"))
}

struct RdfXmlWriter<'a> {
    writer: Writer<Vec<u8>>,
    ids: &'a IdResolver,
}

impl RdfXmlWriter<'_> {
    fn event(&mut self, event: Event<'_>) -> Result<()> {
        self.writer.write_event(event).map_err(serialization)
    }

    fn start(&mut self, name: &str, about: Option<&str>) -> Result<()> {
        let mut start = BytesStart::new(name);
        if let Some(about) = about {
            start.push_attribute(("rdf:about", about));
        }
        self.event(Event::Start(start))
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    /// `<prop>text</prop>`; the text event keeps the end tag on the same line.
    fn literal(&mut self, property: &str, text: impl Display) -> Result<()> {
        self.start(property, None)?;
        self.event(Event::Text(BytesText::new(&text.to_string())))?;
        self.end(property)
    }

    fn optional(&mut self, property: &str, text: Option<impl Display>) -> Result<()> {
        match text {
            Some(text) => self.literal(property, text),
            None => Ok(()),
        }
    }

    fn literals<T: Display>(&mut self, property: &str, texts: &[T]) -> Result<()> {
        for text in texts {
            self.literal(property, text)?;
        }
        Ok(())
    }

    fn resource(&mut self, property: &str, uri: &str) -> Result<()> {
        let mut empty = BytesStart::new(property);
        empty.push_attribute(("rdf:resource", uri));
        self.event(Event::Empty(empty))
    }

    fn element_ref(&mut self, property: &str, spdx_id: &str) -> Result<()> {
        let uri = self.ids.to_uri(spdx_id);
        self.resource(property, &uri)
    }

    fn individual<E: SpdxEnum>(&mut self, property: &str, value: E) -> Result<()> {
        self.resource(property, &format!("{SPDX_NS}{}", value.rdf_fragment()))
    }

    /// NOASSERTION and NONE as `spdx:noassertion` / `spdx:none`.
    fn three_valued(&mut self, property: &str, value: Option<&ThreeValued<String>>) -> Result<()> {
        match value {
            Some(ThreeValued::Value(text)) => self.literal(property, text),
            Some(ThreeValued::NoAssertion) => self.resource(property, NOASSERTION_URI),
            Some(ThreeValued::None) => self.resource(property, NONE_URI),
            None => Ok(()),
        }
    }

    fn checksum(&mut self, checksum: &Checksum) -> Result<()> {
        self.start("spdx:checksum", None)?;
        self.start("spdx:Checksum", None)?;
        self.resource(
            "spdx:algorithm",
            &format!("{SPDX_NS}{}", checksum.algorithm.rdf_fragment()),
        )?;
        self.literal("spdx:checksumValue", &checksum.value)?;
        self.end("spdx:Checksum")?;
        self.end("spdx:checksum")
    }

    fn license(&mut self, property: &str, license: Option<&ThreeValued<LicenseExpression>>) -> Result<()> {
        match license {
            Some(ThreeValued::Value(expression)) => self.license_expression(property, expression),
            Some(ThreeValued::NoAssertion) => self.resource(property, NOASSERTION_URI),
            Some(ThreeValued::None) => self.resource(property, NONE_URI),
            None => Ok(()),
        }
    }

    fn license_expression(&mut self, property: &str, expression: &LicenseExpression) -> Result<()> {
        let class = match expression {
            LicenseExpression::Listed(id) => {
                return self.resource(property, &format!("{LICENSES_NS}{id}"))
            }
            LicenseExpression::Custom(id) => return self.element_ref(property, id),
            LicenseExpression::And(_) => "spdx:ConjunctiveLicenseSet",
            LicenseExpression::Or(_) => "spdx:DisjunctiveLicenseSet",
            LicenseExpression::OrLater(_) => "spdx:OrLaterOperator",
            LicenseExpression::WithException { .. } => "spdx:WithExceptionOperator",
        };
        self.start(property, None)?;
        self.start(class, None)?;
        match expression {
            LicenseExpression::And(members) | LicenseExpression::Or(members) => {
                for member in members {
                    self.license_expression("spdx:member", member)?;
                }
            }
            LicenseExpression::OrLater(member) => self.license_expression("spdx:member", member)?,
            LicenseExpression::WithException { license, exception } => {
                self.license_expression("spdx:member", license)?;
                self.start("spdx:licenseException", None)?;
                self.start("spdx:ListedLicenseException", None)?;
                self.literal("spdx:licenseExceptionId", exception)?;
                self.end("spdx:ListedLicenseException")?;
                self.end("spdx:licenseException")?;
            }
            LicenseExpression::Listed(_) | LicenseExpression::Custom(_) => {}
        }
        self.end(class)?;
        self.end(property)
    }

    fn licenses(&mut self, property: &str, licenses: &[ThreeValued<LicenseExpression>]) -> Result<()> {
        for license in licenses {
            self.license(property, Some(license))?;
        }
        Ok(())
    }

    // ========================================================================
    // Document
    // ========================================================================

    fn document(&mut self, document: &Document) -> Result<()> {
        let info = &document.creation_info;
        let about = self.ids.to_uri(&info.spdx_id);
        self.start("spdx:SpdxDocument", Some(&about))?;
        self.literal("spdx:specVersion", &info.spdx_version)?;
        self.license_expression(
            "spdx:dataLicense",
            &LicenseExpression::symbol(info.data_license.clone()),
        )?;
        self.literal("spdx:name", &info.name)?;
        self.optional("rdfs:comment", info.document_comment.as_ref())?;

        self.start("spdx:creationInfo", None)?;
        self.start("spdx:CreationInfo", None)?;
        self.literals("spdx:creator", &info.creators)?;
        self.literal("spdx:created", format_datetime(&info.created))?;
        self.optional("rdfs:comment", info.creator_comment.as_ref())?;
        self.optional("spdx:licenseListVersion", info.license_list_version.as_ref())?;
        self.end("spdx:CreationInfo")?;
        self.end("spdx:creationInfo")?;

        for external in &info.external_document_refs {
            self.start("spdx:externalDocumentRef", None)?;
            self.start("spdx:ExternalDocumentRef", None)?;
            self.literal("spdx:externalDocumentId", &external.document_ref_id)?;
            self.resource("spdx:spdxDocument", &external.document_uri)?;
            self.checksum(&external.checksum)?;
            self.end("spdx:ExternalDocumentRef")?;
            self.end("spdx:externalDocumentRef")?;
        }

        for extracted in &document.extracted_licensing_info {
            self.extracted_licensing_info(extracted)?;
        }

        let package_ids: HashSet<&str> =
            document.packages.iter().map(|p| p.spdx_id.as_str()).collect();
        for described in document.described_ids() {
            if package_ids.contains(described) {
                self.element_ref("spdx:describesPackage", described)?;
            }
        }
        self.end("spdx:SpdxDocument")
    }

    fn extracted_licensing_info(&mut self, extracted: &ExtractedLicensingInfo) -> Result<()> {
        let about = extracted.license_id.as_deref().map(|id| self.ids.to_uri(id));
        self.start("spdx:hasExtractedLicensingInfo", None)?;
        self.start("spdx:ExtractedLicensingInfo", about.as_deref())?;
        self.optional("spdx:licenseId", extracted.license_id.as_ref())?;
        self.optional("spdx:extractedText", extracted.extracted_text.as_ref())?;
        self.three_valued("spdx:name", extracted.license_name.as_ref())?;
        self.optional("rdfs:comment", extracted.comment.as_ref())?;
        self.literals("rdfs:seeAlso", &extracted.cross_references)?;
        self.end("spdx:ExtractedLicensingInfo")?;
        self.end("spdx:hasExtractedLicensingInfo")
    }

    // ========================================================================
    // Elements
    // ========================================================================

    fn package(&mut self, package: &Package, document: &Document) -> Result<()> {
        let about = self.ids.to_uri(&package.spdx_id);
        self.start("spdx:Package", Some(&about))?;
        self.literal("spdx:name", &package.name)?;
        self.optional("spdx:versionInfo", package.version.as_ref())?;
        self.optional("spdx:packageFileName", package.file_name.as_ref())?;
        self.optional("spdx:supplier", package.supplier.as_ref())?;
        self.optional("spdx:originator", package.originator.as_ref())?;
        self.three_valued("spdx:downloadLocation", Some(&package.download_location))?;
        self.literal("spdx:filesAnalyzed", package.files_analyzed)?;
        if let Some(code) = &package.verification_code {
            self.start("spdx:packageVerificationCode", None)?;
            self.start("spdx:PackageVerificationCode", None)?;
            self.literal("spdx:packageVerificationCodeValue", &code.value)?;
            self.literals("spdx:packageVerificationCodeExcludedFile", &code.excluded_files)?;
            self.end("spdx:PackageVerificationCode")?;
            self.end("spdx:packageVerificationCode")?;
        }
        for checksum in &package.checksums {
            self.checksum(checksum)?;
        }
        self.three_valued("doap:homepage", package.homepage.as_ref())?;
        self.optional("spdx:sourceInfo", package.source_info.as_ref())?;
        self.license("spdx:licenseConcluded", package.license_concluded.as_ref())?;
        self.licenses("spdx:licenseInfoFromFiles", &package.license_info_from_files)?;
        self.license("spdx:licenseDeclared", package.license_declared.as_ref())?;
        self.optional("spdx:licenseComments", package.license_comment.as_ref())?;
        self.three_valued("spdx:copyrightText", package.copyright_text.as_ref())?;
        self.optional("spdx:summary", package.summary.as_ref())?;
        self.optional("spdx:description", package.description.as_ref())?;
        self.optional("rdfs:comment", package.comment.as_ref())?;
        for external in &package.external_references {
            self.external_ref(external)?;
        }
        self.literals("spdx:attributionText", &package.attribution_texts)?;
        if let Some(purpose) = package.primary_package_purpose {
            self.individual("spdx:primaryPackagePurpose", purpose)?;
        }
        self.optional("spdx:releaseDate", package.release_date.as_ref().map(format_datetime))?;
        self.optional("spdx:builtDate", package.built_date.as_ref().map(format_datetime))?;
        self.optional(
            "spdx:validUntilDate",
            package.valid_until_date.as_ref().map(format_datetime),
        )?;

        let file_ids: HashSet<&str> = document.files.iter().map(|f| f.spdx_id.as_str()).collect();
        for contained in get_contained_spdx_element_ids(document, &package.spdx_id) {
            if file_ids.contains(contained) {
                self.element_ref("spdx:hasFile", contained)?;
            }
        }
        self.end("spdx:Package")
    }

    fn external_ref(&mut self, external: &ExternalPackageRef) -> Result<()> {
        self.start("spdx:externalRef", None)?;
        self.start("spdx:ExternalRef", None)?;
        self.individual("spdx:referenceCategory", external.category)?;
        let reference_type = &external.reference_type;
        if reference_type.contains("://") {
            self.resource("spdx:referenceType", reference_type)?;
        } else if LISTED_REFERENCE_TYPES.contains(&reference_type.as_str()) {
            self.resource("spdx:referenceType", &format!("{REFERENCES_NS}{reference_type}"))?;
        } else {
            self.element_ref("spdx:referenceType", reference_type)?;
        }
        self.literal("spdx:referenceLocator", &external.locator)?;
        self.optional("rdfs:comment", external.comment.as_ref())?;
        self.end("spdx:ExternalRef")?;
        self.end("spdx:externalRef")
    }

    fn file(&mut self, file: &File) -> Result<()> {
        let about = self.ids.to_uri(&file.spdx_id);
        self.start("spdx:File", Some(&about))?;
        self.literal("spdx:fileName", &file.name)?;
        for checksum in &file.checksums {
            self.checksum(checksum)?;
        }
        for file_type in &file.file_types {
            self.individual("spdx:fileType", *file_type)?;
        }
        self.license("spdx:licenseConcluded", file.license_concluded.as_ref())?;
        self.licenses("spdx:licenseInfoInFile", &file.license_info_in_file)?;
        self.optional("spdx:licenseComments", file.license_comment.as_ref())?;
        self.three_valued("spdx:copyrightText", file.copyright_text.as_ref())?;
        self.optional("rdfs:comment", file.comment.as_ref())?;
        self.optional("spdx:noticeText", file.notice.as_ref())?;
        self.literals("spdx:fileContributor", &file.contributors)?;
        self.literals("spdx:attributionText", &file.attribution_texts)?;
        self.end("spdx:File")
    }

    fn snippet(&mut self, snippet: &Snippet) -> Result<()> {
        let about = self.ids.to_uri(&snippet.spdx_id);
        self.start("spdx:Snippet", Some(&about))?;
        self.element_ref("spdx:snippetFromFile", &snippet.file_spdx_id)?;
        self.range(&snippet.file_spdx_id, snippet.byte_range, "ptr:ByteOffsetPointer", "ptr:offset")?;
        if let Some(lines) = snippet.line_range {
            self.range(&snippet.file_spdx_id, lines, "ptr:LineCharPointer", "ptr:lineNumber")?;
        }
        self.license("spdx:licenseConcluded", snippet.license_concluded.as_ref())?;
        self.licenses("spdx:licenseInfoInSnippet", &snippet.license_info_in_snippet)?;
        self.optional("spdx:licenseComments", snippet.license_comment.as_ref())?;
        self.three_valued("spdx:copyrightText", snippet.copyright_text.as_ref())?;
        self.optional("rdfs:comment", snippet.comment.as_ref())?;
        self.optional("spdx:name", snippet.name.as_ref())?;
        self.literals("spdx:attributionText", &snippet.attribution_texts)?;
        self.end("spdx:Snippet")
    }

    fn range(&mut self, file_id: &str, (start, end): Range, class: &str, value_property: &str) -> Result<()> {
        self.start("spdx:range", None)?;
        self.start("ptr:StartEndPointer", None)?;
        for (property, value) in [("ptr:startPointer", start), ("ptr:endPointer", end)] {
            self.start(property, None)?;
            self.start(class, None)?;
            self.element_ref("ptr:reference", file_id)?;
            self.literal(value_property, value)?;
            self.end(class)?;
            self.end(property)?;
        }
        self.end("ptr:StartEndPointer")?;
        self.end("spdx:range")
    }

    // ========================================================================
    // Relationships and annotations
    // ========================================================================

    fn relationship(&mut self, relationship: &Relationship) -> Result<()> {
        let about = self.ids.to_uri(&relationship.spdx_element_id);
        self.start("rdf:Description", Some(&about))?;
        self.start("spdx:relationship", None)?;
        self.start("spdx:Relationship", None)?;
        self.individual("spdx:relationshipType", relationship.relationship_type)?;
        match &relationship.related_spdx_element_id {
            ThreeValued::Value(id) => self.element_ref("spdx:relatedSpdxElement", id)?,
            ThreeValued::NoAssertion => self.resource("spdx:relatedSpdxElement", NOASSERTION_URI)?,
            ThreeValued::None => self.resource("spdx:relatedSpdxElement", NONE_URI)?,
        }
        self.optional("rdfs:comment", relationship.comment.as_ref())?;
        self.end("spdx:Relationship")?;
        self.end("spdx:relationship")?;
        self.end("rdf:Description")
    }

    fn annotation(&mut self, annotation: &Annotation) -> Result<()> {
        let about = self.ids.to_uri(&annotation.spdx_id);
        self.start("rdf:Description", Some(&about))?;
        self.start("spdx:annotation", None)?;
        self.start("spdx:Annotation", None)?;
        self.individual("spdx:annotationType", annotation.annotation_type)?;
        self.literal("spdx:annotator", &annotation.annotator)?;
        self.literal("spdx:annotationDate", format_datetime(&annotation.annotation_date))?;
        self.literal("rdfs:comment", &annotation.annotation_comment)?;
        self.end("spdx:Annotation")?;
        self.end("spdx:annotation")?;
        self.end("rdf:Description")
    }
}
