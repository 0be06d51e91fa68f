//! Packages, files, snippets and extracted licensing info.

use super::graph::{
    local_name, pointer, spdx, Graph, Term, DOAP_HOMEPAGE, RDFS_COMMENT, RDFS_SEE_ALSO,
    REFERENCES_NS,
};
use super::node::{IdResolver, Properties};
use crate::logger::Logger;
use crate::model::datetime::parse_datetime;
use crate::model::{
    Actor, ExternalPackageRef, ExternalPackageRefCategory, ExtractedLicensingInfo, File, FileType,
    Package, PackageVerificationCode, PrimaryPackagePurpose, Range, Snippet, ThreeValued,
};
use tracing::debug;

/// The SPDX id of an element node; elements must be named by a URI.
pub(super) fn element_id(props: &mut Properties<'_>) -> Option<String> {
    match props.subject {
        Term::Iri(uri) => Some(props.ids.to_spdx_id(uri)),
        other => {
            props
                .logger
                .append(format!("SPDX element {other} must be identified by a URI"));
            None
        }
    }
}

fn parse_actor_field(raw: &str) -> Result<ThreeValued<Actor>, String> {
    ThreeValued::parse_with(raw, str::parse::<Actor>)
}

pub(super) fn parse_package(graph: &Graph, node: &Term, ids: &IdResolver) -> Result<Package, Logger> {
    let mut props = Properties::new(graph, node, ids);
    let spdx_id = element_id(&mut props);
    let name = props.required_literal(&spdx("name"));
    let download_location = props.three_valued(&spdx("downloadLocation"));
    if download_location.is_none() {
        props.missing(&spdx("downloadLocation"));
    }

    let supplier = props.parse(&spdx("supplier"), parse_actor_field);
    let originator = props.parse(&spdx("originator"), parse_actor_field);
    let files_analyzed = props.bool(&spdx("filesAnalyzed")).unwrap_or(true);
    let verification_code = match props.object(&spdx("packageVerificationCode")) {
        Some(code_node) => match parse_verification_code(graph, code_node, ids) {
            Ok(code) => Some(code),
            Err(local) => {
                props.nested("PackageVerificationCode", local);
                None
            }
        },
        None => None,
    };
    let checksums = props.checksums(&spdx("checksum"));

    let mut external_references = Vec::new();
    for ref_node in props.objects(&spdx("externalRef")) {
        match parse_external_ref(graph, ref_node, ids) {
            Ok(external) => external_references.push(external),
            Err(local) => props.nested("ExternalPackageRef", local),
        }
    }

    let homepage = props.three_valued(DOAP_HOMEPAGE);
    let source_info = props.literal(&spdx("sourceInfo"));
    let license_concluded = props.license(&spdx("licenseConcluded"));
    let license_info_from_files = props.license_list(&spdx("licenseInfoFromFiles"));
    let license_declared = props.license(&spdx("licenseDeclared"));
    let license_comment = props.literal(&spdx("licenseComments"));
    let copyright_text = props.three_valued(&spdx("copyrightText"));
    let summary = props.literal(&spdx("summary"));
    let description = props.literal(&spdx("description"));
    let comment = props.literal(RDFS_COMMENT);
    let attribution_texts = props.literals(&spdx("attributionText"));
    let primary_package_purpose =
        props.enumeration::<PrimaryPackagePurpose>(&spdx("primaryPackagePurpose"));
    let release_date = props.parse(&spdx("releaseDate"), parse_datetime);
    let built_date = props.parse(&spdx("builtDate"), parse_datetime);
    let valid_until_date = props.parse(&spdx("validUntilDate"), parse_datetime);
    let version = props.literal(&spdx("versionInfo"));
    let file_name = props.literal(&spdx("packageFileName"));

    let package = match (spdx_id, name, download_location) {
        (Some(spdx_id), Some(name), Some(download_location)) => {
            let mut package = Package::new(spdx_id, name, download_location);
            package.version = version;
            package.file_name = file_name;
            package.supplier = supplier;
            package.originator = originator;
            package.files_analyzed = files_analyzed;
            package.verification_code = verification_code;
            package.checksums = checksums;
            package.homepage = homepage;
            package.source_info = source_info;
            package.license_concluded = license_concluded;
            package.license_info_from_files = license_info_from_files;
            package.license_declared = license_declared;
            package.license_comment = license_comment;
            package.copyright_text = copyright_text;
            package.summary = summary;
            package.description = description;
            package.comment = comment;
            package.external_references = external_references;
            package.attribution_texts = attribution_texts;
            package.primary_package_purpose = primary_package_purpose;
            package.release_date = release_date;
            package.built_date = built_date;
            package.valid_until_date = valid_until_date;
            Some(package)
        }
        _ => None,
    };
    props.finish(package)
}

fn parse_verification_code(
    graph: &Graph,
    node: &Term,
    ids: &IdResolver,
) -> Result<PackageVerificationCode, Logger> {
    let mut props = Properties::new(graph, node, ids);
    let code = props
        .required_literal(&spdx("packageVerificationCodeValue"))
        .map(|value| {
            let mut code = PackageVerificationCode::new(value);
            code.excluded_files = props.literals(&spdx("packageVerificationCodeExcludedFile"));
            code
        });
    props.finish(code)
}

fn parse_external_ref(graph: &Graph, node: &Term, ids: &IdResolver) -> Result<ExternalPackageRef, Logger> {
    let mut props = Properties::new(graph, node, ids);
    let category = if props.object(&spdx("referenceCategory")).is_some() {
        props.enumeration::<ExternalPackageRefCategory>(&spdx("referenceCategory"))
    } else {
        props.missing(&spdx("referenceCategory"));
        None
    };
    let reference_type = match props.object(&spdx("referenceType")) {
        Some(Term::Iri(uri)) => Some(reference_type_name(uri, ids)),
        Some(_) => props.literal(&spdx("referenceType")),
        None => {
            props.missing(&spdx("referenceType"));
            None
        }
    };
    let locator = props.required_literal(&spdx("referenceLocator"));
    let comment = props.literal(RDFS_COMMENT);
    let external = match (category, reference_type, locator) {
        (Some(category), Some(reference_type), Some(locator)) => {
            let mut external = ExternalPackageRef::new(category, reference_type, locator);
            external.comment = comment;
            Some(external)
        }
        _ => None,
    };
    props.finish(external)
}

/// `http://spdx.org/rdf/references/purl` -> `purl`; a type defined in the
/// document itself keeps its fragment.
fn reference_type_name(uri: &str, ids: &IdResolver) -> String {
    if let Some(listed) = uri.strip_prefix(REFERENCES_NS) {
        return listed.to_string();
    }
    match uri.split_once('#') {
        Some((base, fragment)) if base == ids.namespace() => fragment.to_string(),
        _ => uri.to_string(),
    }
}

pub(super) fn parse_file(graph: &Graph, node: &Term, ids: &IdResolver) -> Result<File, Logger> {
    let mut props = Properties::new(graph, node, ids);
    let spdx_id = element_id(&mut props);
    let name = props.required_literal(&spdx("fileName"));
    if props.object(&spdx("checksum")).is_none() {
        props.missing(&spdx("checksum"));
    }
    let checksums = props.checksums(&spdx("checksum"));
    let file_types = props.enumerations::<FileType>(&spdx("fileType"));
    let license_concluded = props.license(&spdx("licenseConcluded"));
    let license_info_in_file = props.license_list(&spdx("licenseInfoInFile"));
    let license_comment = props.literal(&spdx("licenseComments"));
    let copyright_text = props.three_valued(&spdx("copyrightText"));
    let comment = props.literal(RDFS_COMMENT);
    let notice = props.literal(&spdx("noticeText"));
    let contributors = props.literals(&spdx("fileContributor"));
    let attribution_texts = props.literals(&spdx("attributionText"));
    for deprecated in ["fileDependency", "artifactOf"] {
        if props.object(&spdx(deprecated)).is_some() {
            debug!(field = deprecated, "dropping deprecated file field");
        }
    }

    let file = match (spdx_id, name) {
        (Some(spdx_id), Some(name)) => {
            let mut file = File::new(name, spdx_id, checksums);
            file.file_types = file_types;
            file.license_concluded = license_concluded;
            file.license_info_in_file = license_info_in_file;
            file.license_comment = license_comment;
            file.copyright_text = copyright_text;
            file.comment = comment;
            file.notice = notice;
            file.contributors = contributors;
            file.attribution_texts = attribution_texts;
            Some(file)
        }
        _ => None,
    };
    props.finish(file)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PointerKind {
    Byte,
    Line,
}

pub(super) fn parse_snippet(graph: &Graph, node: &Term, ids: &IdResolver) -> Result<Snippet, Logger> {
    let mut props = Properties::new(graph, node, ids);
    let spdx_id = element_id(&mut props);
    let file_spdx_id = props.reference(&spdx("snippetFromFile"));
    if file_spdx_id.is_none() && props.object(&spdx("snippetFromFile")).is_none() {
        props.missing(&spdx("snippetFromFile"));
    }

    let mut byte_range = None;
    let mut line_range = None;
    let ranges = props.objects(&spdx("range"));
    if ranges.is_empty() {
        props.missing(&spdx("range"));
    }
    for range_node in ranges {
        match parse_range(graph, range_node) {
            Ok((PointerKind::Byte, range)) => byte_range = Some(range),
            Ok((PointerKind::Line, range)) => line_range = Some(range),
            Err(message) => props.logger.append(message),
        }
    }

    let license_concluded = props.license(&spdx("licenseConcluded"));
    let license_info_in_snippet = props.license_list(&spdx("licenseInfoInSnippet"));
    let license_comment = props.literal(&spdx("licenseComments"));
    let copyright_text = props.three_valued(&spdx("copyrightText"));
    let comment = props.literal(RDFS_COMMENT);
    let name = props.literal(&spdx("name"));
    let attribution_texts = props.literals(&spdx("attributionText"));

    if byte_range.is_none() && !props.logger.has_messages() {
        props
            .logger
            .append("Snippet must have a byte range, but none was found in ranges");
    }

    let snippet = match (spdx_id, file_spdx_id, byte_range) {
        (Some(spdx_id), Some(file_spdx_id), Some(byte_range)) => {
            let mut snippet = Snippet::new(spdx_id, file_spdx_id, byte_range);
            snippet.line_range = line_range;
            snippet.license_concluded = license_concluded;
            snippet.license_info_in_snippet = license_info_in_snippet;
            snippet.license_comment = license_comment;
            snippet.copyright_text = copyright_text;
            snippet.comment = comment;
            snippet.name = name;
            snippet.attribution_texts = attribution_texts;
            Some(snippet)
        }
        _ => None,
    };
    props.finish(snippet)
}

/// Reads a `pointer:StartEndPointer`; both ends must be of the same kind.
fn parse_range(graph: &Graph, node: &Term) -> Result<(PointerKind, Range), String> {
    let end_point = |predicate: &str| -> Result<(PointerKind, u64), String> {
        let name = local_name(predicate);
        let Some(point) = graph.object(node, predicate) else {
            return Err(format!("{name} is required, but was not provided"));
        };
        let class = graph.type_of(point).map(local_name);
        let offset = graph.object(point, &pointer("offset"));
        let line = graph.object(point, &pointer("lineNumber"));
        let (kind, raw) = match (class, offset, line) {
            (Some("ByteOffsetPointer") | None, Some(raw), None) => (PointerKind::Byte, raw),
            (Some("LineCharPointer") | None, None, Some(raw)) => (PointerKind::Line, raw),
            _ => {
                return Err(format!(
                    "{name} must be a ByteOffsetPointer with an offset or a LineCharPointer with a lineNumber"
                ))
            }
        };
        raw.as_literal()
            .and_then(|text| text.trim().parse().ok())
            .map(|n| (kind, n))
            .ok_or_else(|| format!("{name} must hold a non-negative integer, but is: {raw}"))
    };
    let (start_kind, start) = end_point(&pointer("startPointer"))?;
    let (end_kind, end) = end_point(&pointer("endPointer"))?;
    if start_kind != end_kind {
        return Err("Type of startpointer is not the same as type of endpointer.".to_string());
    }
    Ok((start_kind, (start, end)))
}

pub(super) fn parse_extracted_licensing_info(
    graph: &Graph,
    node: &Term,
    ids: &IdResolver,
) -> Result<ExtractedLicensingInfo, Logger> {
    let mut props = Properties::new(graph, node, ids);
    let license_id = props.literal(&spdx("licenseId")).or_else(|| match node {
        Term::Iri(uri) => Some(ids.license_id(uri)),
        _ => None,
    });
    let info = ExtractedLicensingInfo {
        license_id,
        extracted_text: props.literal(&spdx("extractedText")),
        license_name: props.three_valued(&spdx("name")),
        comment: props.literal(RDFS_COMMENT),
        cross_references: props.literals(RDFS_SEE_ALSO),
    };
    props.finish(Some(info))
}
