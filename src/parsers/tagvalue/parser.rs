//! State machine that turns lexer tokens into a [`Document`].
//!
//! The parser keeps a single "current element" slot. A starting tag
//! (`PackageName`, `FileName`, `SnippetSPDXID`, `LicenseID`, `Annotator`,
//! `Relationship`) finishes whatever element is in progress and opens a new
//! one:
//!
//! ```text
//! Idle ──PackageName──▶ Package ──FileName──▶ File ──Relationship──▶ Relationship ─▶ …
//! ```
//!
//! Element tags that do not belong to the element in progress are reported
//! and dropped. Document-level tags are accepted anywhere. Problems are
//! collected per element and raised together once the input is consumed.

use super::lexer::{tokenize, Token, ValueKind};
use crate::error::SpdxParsingError;
use crate::logger::Logger;
use crate::model::datetime::parse_datetime;
use crate::model::license::parse_license_field;
use crate::model::{
    parse_range, Actor, AnnotationType, Annotation, Checksum, CreationInfo, Document, ElementKind,
    ExternalDocumentRef, ExternalPackageRef, ExternalPackageRefCategory, ExtractedLicensingInfo,
    File, FileType, Package, PackageVerificationCode, PrimaryPackagePurpose, Relationship,
    RelationshipType, Snippet, SpdxEnum, ThreeValued, Version, DEFAULT_DATA_LICENSE,
};
use chrono::{DateTime, Utc};
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

static VERIFICATION_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9a-fA-F]+)\s*(\(excludes:\s*(.*)\))?$").expect("static regex")
});

/// The tag that opens an element of `kind`.
#[must_use]
pub const fn start_tag(kind: ElementKind) -> &'static str {
    match kind {
        ElementKind::Package => "PackageName",
        ElementKind::File => "FileName",
        ElementKind::Snippet => "SnippetSPDXID",
        ElementKind::ExtractedLicensingInfo => "LicenseID",
        ElementKind::Annotation => "Annotator",
        ElementKind::Relationship => "Relationship",
        _ => "",
    }
}

/// The element class a non-starting tag belongs to.
fn owning_kind(tag: &str) -> Option<ElementKind> {
    let kind = match tag {
        "PackageVersion" | "PackageFileName" | "PackageSupplier" | "PackageOriginator"
        | "PackageDownloadLocation" | "FilesAnalyzed" | "PackageVerificationCode"
        | "PackageChecksum" | "PackageHomePage" | "PackageSourceInfo"
        | "PackageLicenseConcluded" | "PackageLicenseInfoFromFiles" | "PackageLicenseDeclared"
        | "PackageLicenseComments" | "PackageCopyrightText" | "PackageSummary"
        | "PackageDescription" | "PackageComment" | "ExternalRef" | "ExternalRefComment"
        | "PackageAttributionText" | "PrimaryPackagePurpose" | "ReleaseDate" | "BuiltDate"
        | "ValidUntilDate" => ElementKind::Package,
        "FileType" | "FileChecksum" | "LicenseConcluded" | "LicenseInfoInFile"
        | "FileCopyrightText" | "LicenseComments" | "FileComment" | "FileNotice"
        | "FileContributor" | "FileAttributionText" | "FileDependency"
        | "ArtifactOfProjectName" | "ArtifactOfProjectHomePage" | "ArtifactOfProjectURI" => {
            ElementKind::File
        }
        "SnippetFromFileSPDXID" | "SnippetByteRange" | "SnippetLineRange"
        | "SnippetLicenseConcluded" | "LicenseInfoInSnippet" | "SnippetLicenseComments"
        | "SnippetCopyrightText" | "SnippetComment" | "SnippetName"
        | "SnippetAttributionText" => ElementKind::Snippet,
        "ExtractedText" | "LicenseName" | "LicenseCrossReference" | "LicenseComment" => {
            ElementKind::ExtractedLicensingInfo
        }
        "AnnotationDate" | "AnnotationComment" | "AnnotationType" | "SPDXREF" => {
            ElementKind::Annotation
        }
        "RelationshipComment" => ElementKind::Relationship,
        _ => return None,
    };
    Some(kind)
}

fn is_creation_info_tag(tag: &str) -> bool {
    matches!(
        tag,
        "SPDXVersion"
            | "DataLicense"
            | "DocumentName"
            | "DocumentComment"
            | "DocumentNamespace"
            | "ExternalDocumentRef"
            | "Creator"
            | "Created"
            | "CreatorComment"
            | "LicenseListVersion"
    )
}

// ============================================================================
// Elements in progress
// ============================================================================

/// An element being assembled, with its own message log.
#[derive(Debug)]
struct InProgress<T> {
    element: T,
    logger: Logger,
    seen: HashSet<String>,
}

impl<T> InProgress<T> {
    fn new(element: T) -> Self {
        Self {
            element,
            logger: Logger::new(),
            seen: HashSet::new(),
        }
    }

    /// Records a single-valued tag; a repeated tag is logged and refused.
    fn first_value(&mut self, token: &Token) -> bool {
        if self.seen.insert(token.tag.clone()) {
            true
        } else {
            self.logger.append(format!(
                "Multiple values for {} found. Line: {}",
                token.tag, token.line
            ));
            false
        }
    }

    /// Logs a failed value conversion and returns the converted value otherwise.
    fn check<V, E: fmt::Display>(&mut self, token: &Token, result: Result<V, E>) -> Option<V> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.logger.append(format!(
                    "Error while parsing {}: {err}. Line: {}",
                    token.tag, token.line
                ));
                None
            }
        }
    }

    fn require(&mut self, tags: &[&str]) {
        for tag in tags {
            if !self.seen.contains(*tag) {
                self.logger
                    .append(format!("{tag} is required, but was not provided"));
            }
        }
    }
}

#[derive(Debug, Default)]
struct PartialAnnotation {
    annotator: Option<Actor>,
    date: Option<DateTime<Utc>>,
    annotation_type: Option<AnnotationType>,
    spdx_id: Option<String>,
    comment: Option<String>,
}

#[derive(Debug, Default)]
struct PartialCreationInfo {
    spdx_version: Option<String>,
    spdx_id: Option<String>,
    name: Option<String>,
    document_namespace: Option<String>,
    data_license: Option<String>,
    creators: Vec<Actor>,
    created: Option<DateTime<Utc>>,
    creator_comment: Option<String>,
    document_comment: Option<String>,
    license_list_version: Option<Version>,
    external_document_refs: Vec<ExternalDocumentRef>,
}

#[derive(Debug)]
enum Current {
    Idle,
    Package(InProgress<Package>),
    File(InProgress<File>),
    Snippet(InProgress<Snippet>),
    ExtractedLicensingInfo(InProgress<ExtractedLicensingInfo>),
    Annotation(InProgress<PartialAnnotation>),
    /// `None` when the `Relationship` line itself could not be parsed
    Relationship(InProgress<Option<Relationship>>),
}

// ============================================================================
// Parser
// ============================================================================

#[derive(Debug)]
pub struct TagValueBuilder {
    creation_info: InProgress<PartialCreationInfo>,
    current: Current,
    packages: Vec<Package>,
    files: Vec<File>,
    snippets: Vec<Snippet>,
    extracted_licensing_info: Vec<ExtractedLicensingInfo>,
    annotations: Vec<Annotation>,
    relationships: Vec<Relationship>,
    /// `(package, file)` pairs implied by a file following a package
    implied_containment: Vec<(String, String)>,
    logger: Logger,
}

impl Default for TagValueBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TagValueBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            creation_info: InProgress::new(PartialCreationInfo::default()),
            current: Current::Idle,
            packages: Vec::new(),
            files: Vec::new(),
            snippets: Vec::new(),
            extracted_licensing_info: Vec::new(),
            annotations: Vec::new(),
            relationships: Vec::new(),
            implied_containment: Vec::new(),
            logger: Logger::new(),
        }
    }

    /// Parses a whole tag-value document.
    pub fn run(mut self, input: &str) -> Result<Document, SpdxParsingError> {
        let (tokens, lexer_errors) = tokenize(input);
        self.logger.extend(lexer_errors);
        for token in &tokens {
            self.handle(token);
        }
        self.finish()
    }

    fn handle(&mut self, token: &Token) {
        let value = token.value.as_str();
        match token.tag.as_str() {
            "PackageName" => {
                let package = Package::new("", value, ThreeValued::NoAssertion);
                self.start(Current::Package(InProgress::new(package)));
            }
            "FileName" => {
                let file = File::new(value, "", Vec::new());
                self.start(Current::File(InProgress::new(file)));
            }
            "SnippetSPDXID" => {
                let snippet = Snippet::new(value, "", (0, 0));
                self.start(Current::Snippet(InProgress::new(snippet)));
            }
            "LicenseID" => {
                let info = ExtractedLicensingInfo {
                    license_id: Some(value.to_string()),
                    ..Default::default()
                };
                self.start(Current::ExtractedLicensingInfo(InProgress::new(info)));
            }
            "Annotator" => {
                let mut annotation = InProgress::new(PartialAnnotation::default());
                annotation.element.annotator = annotation.check(token, value.parse::<Actor>());
                self.start(Current::Annotation(annotation));
            }
            "Relationship" => {
                let mut relationship = InProgress::new(None);
                relationship.element = relationship.check(token, parse_relationship(value));
                self.start(Current::Relationship(relationship));
            }
            "SPDXID" => self.spdx_id(token),
            tag if is_creation_info_tag(tag) => creation_info_value(&mut self.creation_info, token),
            tag => self.element_value(tag, token),
        }
    }

    fn start(&mut self, next: Current) {
        self.finish_current();
        self.current = next;
    }

    /// `SPDXID` names the document until the first element starts.
    fn spdx_id(&mut self, token: &Token) {
        let id = token.value.clone();
        match &mut self.current {
            Current::Idle => {
                if self.creation_info.first_value(token) {
                    self.creation_info.element.spdx_id = Some(id);
                }
            }
            Current::Package(package) => {
                if package.first_value(token) {
                    package.element.spdx_id = id;
                }
            }
            Current::File(file) => {
                if file.first_value(token) {
                    file.element.spdx_id = id;
                }
            }
            _ => self.logger.append(format!(
                "SPDXID is only allowed for the document, packages and files. Line: {}",
                token.line
            )),
        }
    }

    fn element_value(&mut self, tag: &str, token: &Token) {
        let Some(owner) = owning_kind(tag) else {
            self.logger
                .append(format!("Unknown tag provided in line {}", token.line));
            return;
        };
        match (&mut self.current, owner) {
            (Current::Package(package), ElementKind::Package) => package_value(package, token),
            (Current::File(file), ElementKind::File) => file_value(file, token),
            (Current::Snippet(snippet), ElementKind::Snippet) => snippet_value(snippet, token),
            (Current::ExtractedLicensingInfo(info), ElementKind::ExtractedLicensingInfo) => {
                extracted_value(info, token);
            }
            (Current::Annotation(annotation), ElementKind::Annotation) => {
                annotation_value(annotation, token);
            }
            (Current::Relationship(relationship), ElementKind::Relationship) => {
                if relationship.first_value(token) {
                    if let Some(rel) = &mut relationship.element {
                        rel.comment = Some(token.value.clone());
                    }
                }
            }
            _ => self.logger.append(format!(
                "Element {owner} is not the current element in scope, probably the expected tag to start the element ({}) is missing. Line: {}",
                start_tag(owner),
                token.line
            )),
        }
    }

    /// Moves the element in progress into the document, or its messages
    /// into the parser log.
    fn finish_current(&mut self) {
        match std::mem::replace(&mut self.current, Current::Idle) {
            Current::Idle => {}
            Current::Package(mut package) => {
                package.require(&["SPDXID", "PackageDownloadLocation"]);
                if let Some(package) = self.accept(ElementKind::Package, package) {
                    self.packages.push(package);
                }
            }
            Current::File(mut file) => {
                file.require(&["SPDXID", "FileChecksum"]);
                if let Some(file) = self.accept(ElementKind::File, file) {
                    if let Some(package) = self.packages.last() {
                        self.implied_containment
                            .push((package.spdx_id.clone(), file.spdx_id.clone()));
                    }
                    self.files.push(file);
                }
            }
            Current::Snippet(mut snippet) => {
                snippet.require(&["SnippetFromFileSPDXID", "SnippetByteRange"]);
                if let Some(snippet) = self.accept(ElementKind::Snippet, snippet) {
                    self.snippets.push(snippet);
                }
            }
            Current::ExtractedLicensingInfo(info) => {
                if let Some(info) = self.accept(ElementKind::ExtractedLicensingInfo, info) {
                    self.extracted_licensing_info.push(info);
                }
            }
            Current::Annotation(mut annotation) => {
                annotation.require(&["AnnotationDate", "AnnotationType", "SPDXREF", "AnnotationComment"]);
                if let Some(partial) = self.accept(ElementKind::Annotation, annotation) {
                    if let PartialAnnotation {
                        annotator: Some(annotator),
                        date: Some(date),
                        annotation_type: Some(annotation_type),
                        spdx_id: Some(spdx_id),
                        comment: Some(comment),
                    } = partial
                    {
                        self.annotations.push(Annotation::new(
                            spdx_id,
                            annotation_type,
                            annotator,
                            date,
                            comment,
                        ));
                    }
                }
            }
            Current::Relationship(relationship) => {
                if let Some(Some(relationship)) = self.accept(ElementKind::Relationship, relationship) {
                    self.relationships.push(relationship);
                }
            }
        }
    }

    fn accept<T>(&mut self, kind: ElementKind, in_progress: InProgress<T>) -> Option<T> {
        if in_progress.logger.has_messages() {
            self.logger.append_element(kind.as_str(), in_progress.logger);
            None
        } else {
            Some(in_progress.element)
        }
    }

    fn finish(mut self) -> Result<Document, SpdxParsingError> {
        self.finish_current();

        let creation_info = match build_creation_info(self.creation_info) {
            Ok(creation_info) => creation_info,
            Err(local) => {
                self.logger.append_element(ElementKind::CreationInfo.as_str(), local);
                return Err(SpdxParsingError::new(self.logger.into_messages()));
            }
        };
        self.logger.raise_if_nonempty()?;

        let mut document = Document::new(creation_info);
        document.packages = self.packages;
        document.files = self.files;
        document.snippets = self.snippets;
        document.extracted_licensing_info = self.extracted_licensing_info;
        document.annotations = self.annotations;
        document.relationships = self.relationships;

        let mut synthesized = 0usize;
        for (package_id, file_id) in self.implied_containment {
            let contains = Relationship::new(
                package_id,
                RelationshipType::Contains,
                ThreeValued::Value(file_id),
            );
            if document.add_relationship_if_absent(contains) {
                synthesized += 1;
            }
        }

        debug!(
            packages = document.packages.len(),
            files = document.files.len(),
            snippets = document.snippets.len(),
            relationships = document.relationships.len(),
            synthesized,
            "Parsed tag-value document"
        );
        Ok(document)
    }
}

/// Parses tag-value input into a document.
pub fn parse_tag_value(input: &str) -> Result<Document, SpdxParsingError> {
    TagValueBuilder::new().run(input)
}

// ============================================================================
// Creation info
// ============================================================================

fn creation_info_value(info: &mut InProgress<PartialCreationInfo>, token: &Token) {
    let value = token.value.as_str();
    match token.tag.as_str() {
        "Creator" => {
            if let Some(actor) = info.check(token, value.parse::<Actor>()) {
                info.element.creators.push(actor);
            }
        }
        "ExternalDocumentRef" => {
            if let Some(external) = info.check(token, parse_external_document_ref(value)) {
                info.element.external_document_refs.push(external);
            }
        }
        _ if !info.first_value(token) => {}
        "SPDXVersion" => info.element.spdx_version = Some(value.to_string()),
        "DataLicense" => info.element.data_license = Some(value.to_string()),
        "DocumentName" => info.element.name = Some(value.to_string()),
        "DocumentNamespace" => info.element.document_namespace = Some(value.to_string()),
        "DocumentComment" => info.element.document_comment = Some(value.to_string()),
        "CreatorComment" => info.element.creator_comment = Some(value.to_string()),
        "Created" => info.element.created = info.check(token, datetime(token)),
        "LicenseListVersion" => {
            info.element.license_list_version = info.check(token, value.parse::<Version>());
        }
        _ => {}
    }
}

fn build_creation_info(mut info: InProgress<PartialCreationInfo>) -> Result<CreationInfo, Logger> {
    info.require(&["SPDXVersion", "SPDXID", "DocumentName", "DocumentNamespace", "Created"]);
    if info.element.creators.is_empty() {
        info.logger.append("Creator is required, but was not provided");
    }
    let partial = info.element;
    match (
        partial.spdx_version,
        partial.spdx_id,
        partial.name,
        partial.document_namespace,
        partial.created,
    ) {
        (Some(version), Some(spdx_id), Some(name), Some(namespace), Some(created))
            if !info.logger.has_messages() =>
        {
            let mut creation_info =
                CreationInfo::new(version, spdx_id, name, namespace, partial.creators, created);
            creation_info.data_license = partial
                .data_license
                .unwrap_or_else(|| DEFAULT_DATA_LICENSE.to_string());
            creation_info.creator_comment = partial.creator_comment;
            creation_info.document_comment = partial.document_comment;
            creation_info.license_list_version = partial.license_list_version;
            creation_info.external_document_refs = partial.external_document_refs;
            Ok(creation_info)
        }
        _ => Err(info.logger),
    }
}

// ============================================================================
// Element fields
// ============================================================================

fn package_value(package: &mut InProgress<Package>, token: &Token) {
    let value = token.value.as_str();
    match token.tag.as_str() {
        "PackageChecksum" => {
            if let Some(checksum) = package.check(token, value.parse::<Checksum>()) {
                package.element.checksums.push(checksum);
            }
        }
        "PackageLicenseInfoFromFiles" => {
            if let Some(license) = package.check(token, parse_license_field(value)) {
                package.element.license_info_from_files.push(license);
            }
        }
        "ExternalRef" => {
            if let Some(external) = package.check(token, parse_external_package_ref(value)) {
                package.element.external_references.push(external);
            }
        }
        "ExternalRefComment" => match package.element.external_references.last_mut() {
            Some(external) if external.comment.is_none() => {
                external.comment = Some(value.to_string());
            }
            Some(_) => package.logger.append(format!(
                "Multiple values for ExternalRefComment found. Line: {}",
                token.line
            )),
            None => package.logger.append(format!(
                "ExternalRefComment must follow an ExternalRef. Line: {}",
                token.line
            )),
        },
        "PackageAttributionText" => package.element.attribution_texts.push(value.to_string()),
        _ if !package.first_value(token) => {}
        "PackageVersion" => package.element.version = Some(value.to_string()),
        "PackageFileName" => package.element.file_name = Some(value.to_string()),
        "PackageSupplier" => {
            package.element.supplier = package.check(token, ThreeValued::parse_with(value, str::parse));
        }
        "PackageOriginator" => {
            package.element.originator =
                package.check(token, ThreeValued::parse_with(value, str::parse));
        }
        "PackageDownloadLocation" => {
            package.element.download_location = ThreeValued::parse_str(value);
        }
        "FilesAnalyzed" => {
            if let Some(analyzed) = package.check(token, parse_bool(value)) {
                package.element.files_analyzed = analyzed;
            }
        }
        "PackageVerificationCode" => {
            package.element.verification_code =
                package.check(token, parse_verification_code(value));
        }
        "PackageHomePage" => package.element.homepage = Some(ThreeValued::parse_str(value)),
        "PackageSourceInfo" => package.element.source_info = Some(value.to_string()),
        "PackageLicenseConcluded" => {
            package.element.license_concluded = package.check(token, parse_license_field(value));
        }
        "PackageLicenseDeclared" => {
            package.element.license_declared = package.check(token, parse_license_field(value));
        }
        "PackageLicenseComments" => package.element.license_comment = Some(value.to_string()),
        "PackageCopyrightText" => {
            package.element.copyright_text = Some(ThreeValued::parse_str(value));
        }
        "PackageSummary" => package.element.summary = Some(value.to_string()),
        "PackageDescription" => package.element.description = Some(value.to_string()),
        "PackageComment" => package.element.comment = Some(value.to_string()),
        "PrimaryPackagePurpose" => {
            package.element.primary_package_purpose =
                package.check(token, parse_enum::<PrimaryPackagePurpose>(value));
        }
        "ReleaseDate" => package.element.release_date = package.check(token, datetime(token)),
        "BuiltDate" => package.element.built_date = package.check(token, datetime(token)),
        "ValidUntilDate" => {
            package.element.valid_until_date = package.check(token, datetime(token));
        }
        _ => {}
    }
}

fn file_value(file: &mut InProgress<File>, token: &Token) {
    let value = token.value.as_str();
    match token.tag.as_str() {
        "FileType" => {
            if let Some(file_type) = file.check(token, parse_enum::<FileType>(value)) {
                file.element.file_types.push(file_type);
            }
        }
        "FileChecksum" => {
            file.seen.insert(token.tag.clone());
            if let Some(checksum) = file.check(token, value.parse::<Checksum>()) {
                file.element.checksums.push(checksum);
            }
        }
        "LicenseInfoInFile" => {
            if let Some(license) = file.check(token, parse_license_field(value)) {
                file.element.license_info_in_file.push(license);
            }
        }
        "FileContributor" => file.element.contributors.push(value.to_string()),
        "FileAttributionText" => file.element.attribution_texts.push(value.to_string()),
        "FileDependency" | "ArtifactOfProjectName" | "ArtifactOfProjectHomePage"
        | "ArtifactOfProjectURI" => {
            debug!(tag = %token.tag, line = token.line, "Dropping deprecated tag");
        }
        _ if !file.first_value(token) => {}
        "LicenseConcluded" => {
            file.element.license_concluded = file.check(token, parse_license_field(value));
        }
        "FileCopyrightText" => file.element.copyright_text = Some(ThreeValued::parse_str(value)),
        "LicenseComments" => file.element.license_comment = Some(value.to_string()),
        "FileComment" => file.element.comment = Some(value.to_string()),
        "FileNotice" => file.element.notice = Some(value.to_string()),
        _ => {}
    }
}

fn snippet_value(snippet: &mut InProgress<Snippet>, token: &Token) {
    let value = token.value.as_str();
    match token.tag.as_str() {
        "LicenseInfoInSnippet" => {
            if let Some(license) = snippet.check(token, parse_license_field(value)) {
                snippet.element.license_info_in_snippet.push(license);
            }
        }
        "SnippetAttributionText" => snippet.element.attribution_texts.push(value.to_string()),
        _ if !snippet.first_value(token) => {}
        "SnippetFromFileSPDXID" => snippet.element.file_spdx_id = value.to_string(),
        "SnippetByteRange" => {
            if let Some(range) = snippet.check(token, parse_range(value)) {
                snippet.element.byte_range = range;
            }
        }
        "SnippetLineRange" => snippet.element.line_range = snippet.check(token, parse_range(value)),
        "SnippetLicenseConcluded" => {
            snippet.element.license_concluded = snippet.check(token, parse_license_field(value));
        }
        "SnippetLicenseComments" => snippet.element.license_comment = Some(value.to_string()),
        "SnippetCopyrightText" => {
            snippet.element.copyright_text = Some(ThreeValued::parse_str(value));
        }
        "SnippetComment" => snippet.element.comment = Some(value.to_string()),
        "SnippetName" => snippet.element.name = Some(value.to_string()),
        _ => {}
    }
}

fn extracted_value(info: &mut InProgress<ExtractedLicensingInfo>, token: &Token) {
    let value = token.value.as_str();
    match token.tag.as_str() {
        "LicenseCrossReference" => info.element.cross_references.push(value.to_string()),
        _ if !info.first_value(token) => {}
        "ExtractedText" => info.element.extracted_text = Some(value.to_string()),
        "LicenseName" => info.element.license_name = Some(ThreeValued::parse_str(value)),
        "LicenseComment" => info.element.comment = Some(value.to_string()),
        _ => {}
    }
}

fn annotation_value(annotation: &mut InProgress<PartialAnnotation>, token: &Token) {
    if !annotation.first_value(token) {
        return;
    }
    let value = token.value.as_str();
    match token.tag.as_str() {
        "AnnotationDate" => annotation.element.date = annotation.check(token, datetime(token)),
        "AnnotationType" => {
            annotation.element.annotation_type =
                annotation.check(token, parse_enum::<AnnotationType>(value));
        }
        "SPDXREF" => annotation.element.spdx_id = Some(value.to_string()),
        "AnnotationComment" => annotation.element.comment = Some(value.to_string()),
        _ => {}
    }
}

// ============================================================================
// Value helpers
// ============================================================================

fn datetime(token: &Token) -> Result<DateTime<Utc>, String> {
    if token.kind != ValueKind::DateTime {
        return Err(format!(
            "Value must be a date of the form YYYY-MM-DDThh:mm:ssZ, but is: {}",
            token.value
        ));
    }
    parse_datetime(&token.value)
}

fn parse_bool(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(format!("FilesAnalyzed must be a boolean value, but is: {value}")),
    }
}

fn parse_enum<E: SpdxEnum>(value: &str) -> Result<E, String> {
    E::parse_name(value).ok_or_else(|| format!("Invalid value: {value}"))
}

/// `hex (excludes: ./a, ./b)`
pub(crate) fn parse_verification_code(value: &str) -> Result<PackageVerificationCode, String> {
    let caps = VERIFICATION_CODE
        .captures(value.trim())
        .ok_or_else(|| format!("Value did not match expected format, but is: {value}"))?;
    let mut code = PackageVerificationCode::new(caps.get(1).map_or("", |m| m.as_str()));
    if let Some(excluded) = caps.get(3) {
        code.excluded_files = excluded
            .as_str()
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
    }
    Ok(code)
}

/// `CATEGORY type locator`
fn parse_external_package_ref(value: &str) -> Result<ExternalPackageRef, String> {
    let parts: Vec<&str> = value.split_whitespace().collect();
    let [category, reference_type, locator] = parts.as_slice() else {
        return Err(format!(
            "Couldn't split ExternalRef in category, reference_type and locator: {value}"
        ));
    };
    let category = ExternalPackageRefCategory::parse_name(category)
        .ok_or_else(|| format!("Invalid ExternalPackageRefCategory: {category}"))?;
    Ok(ExternalPackageRef::new(category, *reference_type, *locator))
}

/// `DocumentRef-id uri SHA1: hex`
fn parse_external_document_ref(value: &str) -> Result<ExternalDocumentRef, String> {
    let mut parts = value.split_whitespace();
    let (Some(id), Some(uri)) = (parts.next(), parts.next()) else {
        return Err(format!(
            "Couldn't split ExternalDocumentRef in document_ref_id, document_uri and checksum: {value}"
        ));
    };
    let checksum = parts.collect::<Vec<_>>().join(" ").parse::<Checksum>()?;
    Ok(ExternalDocumentRef::new(id, uri, checksum))
}

/// `source TYPE target`
fn parse_relationship(value: &str) -> Result<Relationship, String> {
    let parts: Vec<&str> = value.split_whitespace().collect();
    let [source, kind, target] = parts.as_slice() else {
        return Err(format!(
            "Relationship couldn't be split in spdx_element_id, relationship_type and related_spdx_element: {value}"
        ));
    };
    let relationship_type = RelationshipType::parse_name(kind)
        .ok_or_else(|| format!("Invalid RelationshipType: {kind}"))?;
    Ok(Relationship::new(
        *source,
        relationship_type,
        ThreeValued::parse_str(target),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ActorType, ChecksumAlgorithm, LicenseExpression};

    const HEADER: &str = "SPDXVersion: SPDX-2.3
DataLicense: CC0-1.0
SPDXID: SPDXRef-DOCUMENT
DocumentName: Doc
DocumentNamespace: https://x/y
Creator: Tool: LF-1.0
Created: 2022-12-01T00:00:00Z
";

    fn parse(body: &str) -> Result<Document, SpdxParsingError> {
        parse_tag_value(&format!("{HEADER}{body}"))
    }

    #[test]
    fn test_creation_info() {
        let input = format!(
            "{HEADER}CreatorComment: <text>made
by hand</text>
LicenseListVersion: 3.19
ExternalDocumentRef: DocumentRef-other https://other/doc SHA1: 85ed0817af83a24ad8da68c2b5094de69833983c
"
        );
        let document = parse_tag_value(&input).unwrap();
        let info = &document.creation_info;
        assert_eq!(info.spdx_version, "SPDX-2.3");
        assert_eq!(info.spdx_id, "SPDXRef-DOCUMENT");
        assert_eq!(info.creators[0].actor_type, ActorType::Tool);
        assert_eq!(info.creator_comment.as_deref(), Some("made\nby hand"));
        assert_eq!(info.license_list_version, Some(Version::new(3, 19)));
        assert_eq!(info.external_document_refs[0].document_ref_id, "DocumentRef-other");
        assert_eq!(
            info.external_document_refs[0].checksum.algorithm,
            ChecksumAlgorithm::Sha1
        );
    }

    #[test]
    fn test_missing_creation_info_fields() {
        let err = parse_tag_value("SPDXVersion: SPDX-2.3\nSPDXID: SPDXRef-DOCUMENT\n").unwrap_err();
        assert_eq!(err.messages.len(), 1);
        assert!(err.messages[0].starts_with("Error while parsing CreationInfo: ["));
        assert!(err.messages[0].contains("DocumentName is required"));
    }

    #[test]
    fn test_package_and_file_fields() {
        let document = parse(
            "PackageName: pkg
SPDXID: SPDXRef-P
PackageDownloadLocation: NOASSERTION
FilesAnalyzed: false
PackageChecksum: SHA1: 85ed0817af83a24ad8da68c2b5094de69833983c
PackageLicenseConcluded: MIT OR Apache-2.0
PackageLicenseDeclared: NONE
PackageCopyrightText: <text>Copyright 2022</text>
PackageSupplier: Organization: Acme (acme@example.com)
ExternalRef: PACKAGE-MANAGER purl pkg:npm/left-pad@1.3.0
ExternalRefComment: <text>from npm</text>
PrimaryPackagePurpose: OPERATING-SYSTEM
PackageVerificationCode: d6a770ba38583ed4bb4525bd96e50461655d2758 (excludes: ./a.spdx, ./b)
",
        )
        .unwrap();
        let package = &document.packages[0];
        assert_eq!(package.spdx_id, "SPDXRef-P");
        assert!(!package.files_analyzed);
        assert!(package.download_location.is_no_assertion());
        assert_eq!(package.license_declared, Some(ThreeValued::None));
        assert!(matches!(
            package.license_concluded,
            Some(ThreeValued::Value(LicenseExpression::Or(_)))
        ));
        assert_eq!(package.copyright_text, Some(ThreeValued::Value("Copyright 2022".to_string())));
        assert_eq!(
            package.external_references[0].category,
            ExternalPackageRefCategory::PackageManager
        );
        assert_eq!(package.external_references[0].comment.as_deref(), Some("from npm"));
        assert_eq!(
            package.primary_package_purpose,
            Some(PrimaryPackagePurpose::OperatingSystem)
        );
        let code = package.verification_code.as_ref().unwrap();
        assert_eq!(code.excluded_files, vec!["./a.spdx", "./b"]);
    }

    #[test]
    fn test_file_after_package_is_contained() {
        let document = parse(
            "PackageName: X
SPDXID: SPDXRef-X
PackageDownloadLocation: NONE
FileName: ./y.c
SPDXID: SPDXRef-Y
FileChecksum: SHA1: 85ed0817af83a24ad8da68c2b5094de69833983c
",
        )
        .unwrap();
        assert_eq!(document.relationships.len(), 1);
        assert!(document.relationships[0].is_containment("SPDXRef-X", "SPDXRef-Y"));
    }

    #[test]
    fn test_explicit_containment_is_not_duplicated() {
        let document = parse(
            "PackageName: X
SPDXID: SPDXRef-X
PackageDownloadLocation: NONE
FileName: ./y.c
SPDXID: SPDXRef-Y
FileChecksum: SHA1: 85ed0817af83a24ad8da68c2b5094de69833983c
Relationship: SPDXRef-Y CONTAINED_BY SPDXRef-X
RelationshipComment: explicit
",
        )
        .unwrap();
        assert_eq!(document.relationships.len(), 1);
        assert_eq!(document.relationships[0].comment.as_deref(), Some("explicit"));
    }

    #[test]
    fn test_files_before_packages_stay_unassigned() {
        let document = parse(
            "FileName: ./free.c
SPDXID: SPDXRef-F
FileChecksum: SHA1: 85ed0817af83a24ad8da68c2b5094de69833983c
PackageName: X
SPDXID: SPDXRef-X
PackageDownloadLocation: NONE
",
        )
        .unwrap();
        assert!(document.relationships.is_empty());
        assert_eq!(document.files.len(), 1);
    }

    #[test]
    fn test_tag_outside_its_element() {
        let err = parse("FileChecksum: SHA1: 85ed0817af83a24ad8da68c2b5094de69833983c\n").unwrap_err();
        assert_eq!(
            err.messages,
            vec![
                "Element File is not the current element in scope, probably the expected tag to start the element (FileName) is missing. Line: 8"
            ]
        );
    }

    #[test]
    fn test_element_errors_are_batched() {
        let err = parse(
            "PackageName: X
SPDXID: SPDXRef-X
PackageDownloadLocation: NONE
FilesAnalyzed: maybe
PackageChecksum: SHA1: 85ed0817af83a24ad8da68c2b5094de69833983c
PackageVersion: 1
PackageVersion: 2
Relationship: SPDXRef-DOCUMENT DESCRIBES
",
        )
        .unwrap_err();
        assert_eq!(err.messages.len(), 2);
        assert!(err.messages[0].starts_with("Error while parsing Package: ["));
        assert!(err.messages[0].contains("FilesAnalyzed must be a boolean value, but is: maybe"));
        assert!(err.messages[0].contains("Multiple values for PackageVersion found. Line: 14"));
        assert!(err.messages[1].starts_with("Error while parsing Relationship: ["));
    }

    #[test]
    fn test_snippet_annotation_and_license() {
        let document = parse(
            "LicenseID: LicenseRef-1
ExtractedText: <text>Some license</text>
LicenseName: Custom
LicenseCrossReference: https://example.com/l1
SnippetSPDXID: SPDXRef-S
SnippetFromFileSPDXID: SPDXRef-F
SnippetByteRange: 310:420
SnippetLineRange: 5:23
SnippetLicenseConcluded: LicenseRef-1
Annotator: Person: Jane Doe (jane@example.com)
AnnotationDate: 2023-01-01T00:00:00Z
AnnotationType: REVIEW
SPDXREF: SPDXRef-S
AnnotationComment: <text>ok</text>
",
        )
        .unwrap();
        assert_eq!(document.extracted_licensing_info.len(), 1);
        assert_eq!(document.snippets[0].byte_range, (310, 420));
        assert_eq!(document.snippets[0].line_range, Some((5, 23)));
        assert_eq!(document.annotations[0].annotation_comment, "ok");
        assert_eq!(document.annotations[0].annotation_type, AnnotationType::Review);
    }

    #[test]
    fn test_deprecated_tags_are_dropped() {
        let document = parse(
            "FileName: ./a
SPDXID: SPDXRef-A
FileChecksum: SHA1: 85ed0817af83a24ad8da68c2b5094de69833983c
FileDependency: ./b
ArtifactOfProjectName: project
",
        )
        .unwrap();
        assert_eq!(document.files.len(), 1);
    }

    #[test]
    fn test_verification_code_forms() {
        let plain = parse_verification_code("d6a770ba38583ed4bb4525bd96e50461655d2758").unwrap();
        assert!(plain.excluded_files.is_empty());
        let single =
            parse_verification_code("d6a770ba38583ed4bb4525bd96e50461655d2758 (excludes: ./p.spdx)")
                .unwrap();
        assert_eq!(single.excluded_files, vec!["./p.spdx"]);
        assert!(parse_verification_code("(excludes: ./x)").is_err());
    }
}
