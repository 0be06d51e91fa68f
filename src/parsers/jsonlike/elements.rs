//! Packages, files, snippets and extracted licensing info.

use super::fields::Fields;
use crate::logger::Logger;
use crate::model::datetime::parse_datetime;
use crate::model::{
    Actor, ExternalPackageRef, ExternalPackageRefCategory, ExtractedLicensingInfo, File, FileType,
    Package, PackageVerificationCode, PrimaryPackagePurpose, Range, Snippet, SpdxEnum,
    ThreeValued,
};
use serde_json::Value;
use tracing::debug;

pub(super) fn parse_package(value: &Value) -> Result<Package, Logger> {
    let mut fields = Fields::new(value);
    let spdx_id = fields.required_str("SPDXID");
    let name = fields.required_str("name");
    let download_location = fields.three_valued("downloadLocation");
    if download_location.is_none() && !fields.has("downloadLocation") {
        fields.missing("downloadLocation");
    }

    let supplier = fields.parse("supplier", parse_actor_field);
    let originator = fields.parse("originator", parse_actor_field);
    let files_analyzed = fields.bool("filesAnalyzed").unwrap_or(true);
    let verification_code = match fields.get("packageVerificationCode") {
        Some(raw) => match parse_verification_code(raw) {
            Ok(code) => Some(code),
            Err(local) => {
                fields.nested("PackageVerificationCode", local);
                None
            }
        },
        None => None,
    };
    let checksums = fields.checksums("checksums");

    let mut external_references = Vec::new();
    for item in fields.list("externalRefs") {
        match parse_external_ref(item) {
            Ok(external) => external_references.push(external),
            Err(local) => fields.nested("ExternalPackageRef", local),
        }
    }

    let homepage = fields.three_valued("homepage");
    let source_info = fields.str("sourceInfo");
    let license_concluded = fields.license("licenseConcluded");
    let license_info_from_files = fields.license_list("licenseInfoFromFiles");
    let license_declared = fields.license("licenseDeclared");
    let license_comment = fields.str("licenseComments");
    let copyright_text = fields.three_valued("copyrightText");
    let summary = fields.str("summary");
    let description = fields.str("description");
    let comment = fields.str("comment");
    let attribution_texts = fields.str_list("attributionTexts");
    let primary_package_purpose = fields.enumeration::<PrimaryPackagePurpose>("primaryPackagePurpose");
    let release_date = fields.parse("releaseDate", parse_datetime);
    let built_date = fields.parse("builtDate", parse_datetime);
    let valid_until_date = fields.parse("validUntilDate", parse_datetime);
    let version = fields.str("versionInfo");
    let file_name = fields.str("packageFileName");

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
    fields.finish(package)
}

fn parse_actor_field(raw: &str) -> Result<ThreeValued<Actor>, String> {
    ThreeValued::parse_with(raw, str::parse::<Actor>)
}

fn parse_verification_code(value: &Value) -> Result<PackageVerificationCode, Logger> {
    let mut fields = Fields::new(value);
    let code = fields
        .required_str("packageVerificationCodeValue")
        .map(|value| {
            let mut code = PackageVerificationCode::new(value);
            code.excluded_files = fields.str_list("packageVerificationCodeExcludedFiles");
            code
        });
    fields.finish(code)
}

fn parse_external_ref(value: &Value) -> Result<ExternalPackageRef, Logger> {
    let mut fields = Fields::new(value);
    let category = if fields.has("referenceCategory") {
        fields.enumeration::<ExternalPackageRefCategory>("referenceCategory")
    } else {
        fields.missing("referenceCategory");
        None
    };
    let reference_type = fields.required_str("referenceType");
    let locator = fields.required_str("referenceLocator");
    let comment = fields.str("comment");
    let external = match (category, reference_type, locator) {
        (Some(category), Some(reference_type), Some(locator)) => {
            let mut external = ExternalPackageRef::new(category, reference_type, locator);
            external.comment = comment;
            Some(external)
        }
        _ => None,
    };
    fields.finish(external)
}

pub(super) fn parse_file(value: &Value) -> Result<File, Logger> {
    let mut fields = Fields::new(value);
    let spdx_id = fields.required_str("SPDXID");
    let name = fields.required_str("fileName");
    if !fields.has("checksums") {
        fields.missing("checksums");
    }
    let checksums = fields.checksums("checksums");

    let mut file_types = Vec::new();
    for raw in fields.str_list("fileTypes") {
        let parsed = FileType::parse_name(&raw).ok_or_else(|| format!("Invalid FileType: {raw}"));
        if let Some(file_type) = fields.check("fileTypes", parsed) {
            file_types.push(file_type);
        }
    }
    let license_concluded = fields.license("licenseConcluded");
    let license_info_in_file = fields.license_list("licenseInfoInFiles");
    let license_comment = fields.str("licenseComments");
    let copyright_text = fields.three_valued("copyrightText");
    let comment = fields.str("comment");
    let notice = fields.str("noticeText");
    let contributors = fields.str_list("fileContributors");
    let attribution_texts = fields.str_list("attributionTexts");
    for deprecated in ["fileDependencies", "artifactOf"] {
        if fields.has(deprecated) {
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
    fields.finish(file)
}

pub(super) fn parse_snippet(value: &Value) -> Result<Snippet, Logger> {
    let mut fields = Fields::new(value);
    let spdx_id = fields.required_str("SPDXID");
    let file_spdx_id = fields.required_str("snippetFromFile");

    let mut byte_range = None;
    let mut line_range = None;
    if !fields.has("ranges") {
        fields.missing("ranges");
    }
    for item in fields.list("ranges") {
        match parse_range_pointers(item) {
            Ok((PointerKind::Byte, range)) => byte_range = Some(range),
            Ok((PointerKind::Line, range)) => line_range = Some(range),
            Err(logger) => fields.logger.extend(logger.into_messages()),
        }
    }
    if fields.has("ranges") && byte_range.is_none() && !fields.logger.has_messages() {
        fields.logger.append("Snippet must have a byte range, but none was found in ranges");
    }

    let license_concluded = fields.license("licenseConcluded");
    let license_info_in_snippet = fields.license_list("licenseInfoInSnippets");
    let license_comment = fields.str("licenseComments");
    let copyright_text = fields.three_valued("copyrightText");
    let comment = fields.str("comment");
    let name = fields.str("name");
    let attribution_texts = fields.str_list("attributionTexts");

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
    fields.finish(snippet)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PointerKind {
    Byte,
    Line,
}

/// Reads `{startPointer, endPointer}`; both pointers must be of the same kind.
fn parse_range_pointers(value: &Value) -> Result<(PointerKind, Range), Logger> {
    let mut fields = Fields::new(value);
    let start = parse_pointer(&mut fields, "startPointer");
    let end = parse_pointer(&mut fields, "endPointer");
    let range = match (start, end) {
        (Some((start_kind, start)), Some((end_kind, end))) if start_kind == end_kind => {
            Some((start_kind, (start, end)))
        }
        (Some(_), Some(_)) => {
            fields
                .logger
                .append("Type of startpointer is not the same as type of endpointer.");
            None
        }
        _ => None,
    };
    fields.finish(range)
}

fn parse_pointer(fields: &mut Fields<'_>, key: &str) -> Option<(PointerKind, u64)> {
    let Some(value) = fields.get(key) else {
        fields.missing(key);
        return None;
    };
    let mut pointer = Fields::new(value);
    let parsed = match (pointer.has("offset"), pointer.has("lineNumber")) {
        (true, false) => pointer.u64("offset").map(|n| (PointerKind::Byte, n)),
        (false, true) => pointer.u64("lineNumber").map(|n| (PointerKind::Line, n)),
        _ => {
            pointer
                .logger
                .append(format!("{key} must contain exactly one of offset or lineNumber"));
            None
        }
    };
    fields.logger.extend(pointer.logger.into_messages());
    parsed
}

pub(super) fn parse_extracted_licensing_info(
    value: &Value,
) -> Result<ExtractedLicensingInfo, Logger> {
    let mut fields = Fields::new(value);
    let info = ExtractedLicensingInfo {
        license_id: fields.str("licenseId"),
        extracted_text: fields.str("extractedText"),
        license_name: fields.three_valued("name"),
        comment: fields.str("comment"),
        cross_references: fields.str_list("seeAlsos"),
    };
    fields.finish(Some(info))
}
