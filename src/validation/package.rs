//! Packages, their verification codes and external references.

use super::ids::{validate_spdx_id_indexed, SpdxIdScope};
use super::{
    is_valid_download_location, is_valid_url, validate_actor, validate_checksum, with_context,
    SpdxVersion, ValidationContext, ValidationMessage,
};
use super::primitives::validate_licensing;
use crate::model::{
    Document, ElementKind, ExternalPackageRef, ExternalPackageRefCategory, Package,
    PackageVerificationCode, RelationshipType, SpdxElementIndex, SpdxEnum, ThreeValued,
};
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

static VERIFICATION_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-f]{40}$").expect("static regex"));

static CPE22_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^c[pP][eE]:/[AHOaho]?(:[A-Za-z0-9._\-~%]*){0,6}$").expect("static regex")
});

static CPE23_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    let component = r##"(((\?*|\*?)([a-zA-Z0-9\-._]|(\\[\\*?!"#$%&'()+,/:;<=>@\[\]^`{|}~]))+(\?*|\*?))|[*\-])"##;
    let language = r"(([a-zA-Z]{2,3}(-([a-zA-Z]{2}|[0-9]{3}))?)|[*\-])";
    Regex::new(&format!(
        r"^cpe:2\.3:[aho*\-](:{component}){{5}}(:{language})(:{component}){{4}}$"
    ))
    .expect("static regex")
});

static MAVEN_CENTRAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^:]+:[^:]+(:[^:]+)?$").expect("static regex"));
static NPM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@]+@[^@]+$").expect("static regex"));
static NUGET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^/]+/[^/]+$").expect("static regex"));
static BOWER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^#]+#[^#]+$").expect("static regex"));
static PURL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^pkg:.+(/.+)?/.+(@.+)?(\?.+)?(#.+)?$").expect("static regex")
});
static SWH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^swh:1:(snp|rel|rev|dir|cnt):[0-9a-fA-F]{40}$").expect("static regex")
});
static GITOID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^gitoid:(blob|tree|commit|tag):(sha1:[0-9a-fA-F]{40}|sha256:[0-9a-fA-F]{64})$")
        .expect("static regex")
});

/// Reference types allowed per category; `OTHER` accepts any type.
fn allowed_types(category: ExternalPackageRefCategory) -> &'static [&'static str] {
    match category {
        ExternalPackageRefCategory::Security => {
            &["cpe22Type", "cpe23Type", "advisory", "fix", "url", "swid"]
        }
        ExternalPackageRefCategory::PackageManager => {
            &["maven-central", "nuget", "bower", "purl", "npm"]
        }
        ExternalPackageRefCategory::PersistentId => &["swh", "gitoid"],
        ExternalPackageRefCategory::Other => &[],
    }
}

fn locator_pattern(reference_type: &str) -> Option<&'static Regex> {
    let pattern: &LazyLock<Regex> = match reference_type {
        "cpe22Type" => &CPE22_TYPE,
        "cpe23Type" => &CPE23_TYPE,
        "maven-central" => &MAVEN_CENTRAL,
        "npm" => &NPM,
        "nuget" => &NUGET,
        "bower" => &BOWER,
        "purl" => &PURL,
        "swh" => &SWH,
        "gitoid" => &GITOID,
        _ => return None,
    };
    Some(LazyLock::force(pattern))
}

#[must_use]
pub fn validate_package_within_document(
    package: &Package,
    spdx_version: SpdxVersion,
    document: &Document,
) -> Vec<ValidationMessage> {
    let index = SpdxElementIndex::build(document);
    validate_package_indexed(package, spdx_version, document, &index)
}

pub(crate) fn validate_package_indexed(
    package: &Package,
    spdx_version: SpdxVersion,
    document: &Document,
    index: &SpdxElementIndex,
) -> Vec<ValidationMessage> {
    let context = ValidationContext::new(ElementKind::Package)
        .with_spdx_id(&package.spdx_id)
        .with_parent_id(document.spdx_id())
        .with_element(package);
    let mut messages = with_context(
        validate_spdx_id_indexed(&package.spdx_id, document, index, SpdxIdScope::Syntax),
        &context,
    );

    if !package.files_analyzed {
        let contained_files: Vec<String> = document
            .relationships
            .iter()
            .filter(|rel| match rel.relationship_type {
                RelationshipType::Contains => {
                    rel.spdx_element_id == package.spdx_id
                        && rel
                            .related_spdx_element_id
                            .value()
                            .is_some_and(|id| index.kind_of(id) == Some(ElementKind::File))
                }
                RelationshipType::ContainedBy => {
                    rel.related_spdx_element_id.value() == Some(&package.spdx_id)
                        && index.kind_of(&rel.spdx_element_id) == Some(ElementKind::File)
                }
                _ => false,
            })
            .map(|rel| {
                format!(
                    "{} {} {}",
                    rel.spdx_element_id, rel.relationship_type, rel.related_spdx_element_id
                )
            })
            .collect();
        if !contained_files.is_empty() {
            messages.push(ValidationMessage::new(
                format!(
                    "package must contain no elements if files_analyzed is False, but found {contained_files:?}"
                ),
                context.clone(),
            ));
        }
    }

    messages.extend(validate_licensing(package, document, spdx_version, &context));
    messages.extend(validate_package_fields(package, spdx_version, &context));
    messages
}

/// Field-level rules that need no document.
fn validate_package_fields(
    package: &Package,
    spdx_version: SpdxVersion,
    context: &ValidationContext,
) -> Vec<ValidationMessage> {
    let mut messages = Vec::new();
    let mut push = |text: String| messages.push(ValidationMessage::new(text, context.clone()));

    if let ThreeValued::Value(location) = &package.download_location {
        if !is_valid_download_location(location) {
            push(format!(
                "package download_location must be a valid download location, but is: {location}"
            ));
        }
    }
    if let Some(ThreeValued::Value(homepage)) = &package.homepage {
        if !is_valid_url(homepage) {
            push(format!("homepage must be a valid URL, but is: {homepage}"));
        }
    }
    if !package.files_analyzed {
        if let Some(code) = &package.verification_code {
            push(format!(
                "verification_code must be None if files_analyzed is False, but is: {}",
                code.value
            ));
        }
        if !package.license_info_from_files.is_empty() {
            let infos: Vec<String> = package
                .license_info_from_files
                .iter()
                .map(ToString::to_string)
                .collect();
            push(format!(
                "license_info_from_files must be None if files_analyzed is False, but is: {infos:?}"
            ));
        }
    }

    if spdx_version == SpdxVersion::V2_2 {
        let unsupported = [
            ("primary_package_purpose", package.primary_package_purpose.is_some()),
            ("built_date", package.built_date.is_some()),
            ("release_date", package.release_date.is_some()),
            ("valid_until_date", package.valid_until_date.is_some()),
        ];
        for (field, present) in unsupported {
            if present {
                push(format!("{field} is not supported in SPDX-2.2"));
            }
        }
    }

    for actor in [&package.supplier, &package.originator]
        .into_iter()
        .flatten()
        .filter_map(ThreeValued::value)
    {
        messages.extend(validate_actor(actor, &package.spdx_id));
    }
    if let Some(code) = &package.verification_code {
        messages.extend(validate_verification_code(code, &package.spdx_id));
    }
    for checksum in &package.checksums {
        messages.extend(validate_checksum(checksum, &package.spdx_id, spdx_version));
    }
    for external_ref in &package.external_references {
        messages.extend(validate_external_package_ref(
            external_ref,
            &package.spdx_id,
            spdx_version,
        ));
    }
    messages
}

#[must_use]
pub fn validate_verification_code(
    code: &PackageVerificationCode,
    parent_id: &str,
) -> Vec<ValidationMessage> {
    let context = ValidationContext::new(ElementKind::PackageVerificationCode)
        .with_parent_id(parent_id)
        .with_element(code);
    let mut messages = Vec::new();
    if !VERIFICATION_CODE.is_match(&code.value) {
        messages.push(ValidationMessage::new(
            format!(
                "value of verification_code must consist of 40 lowercase hexadecimal digits, but is: {} (length: {} digits)",
                code.value,
                code.value.len()
            ),
            context.clone(),
        ));
    }
    for file in &code.excluded_files {
        if !file.starts_with("./") {
            messages.push(ValidationMessage::new(
                format!("file name must start with \"./\", but is: {file}"),
                context.clone(),
            ));
        }
    }
    messages
}

#[must_use]
pub fn validate_external_package_ref(
    external_ref: &ExternalPackageRef,
    parent_id: &str,
    spdx_version: SpdxVersion,
) -> Vec<ValidationMessage> {
    let context = ValidationContext::new(ElementKind::ExternalPackageRef)
        .with_parent_id(parent_id)
        .with_element(external_ref);
    let mut messages = Vec::new();
    let mut push = |text: String| messages.push(ValidationMessage::new(text, context.clone()));

    let category = external_ref.category;
    let reference_type = external_ref.reference_type.as_str();
    let locator = external_ref.locator.as_str();

    if category == ExternalPackageRefCategory::Other {
        if locator.contains(char::is_whitespace) {
            push(format!(
                "externalPackageRef locator in category OTHER must contain no spaces, but is: {locator}"
            ));
        }
        return messages;
    }

    let allowed = allowed_types(category);
    if !allowed.contains(&reference_type) {
        push(format!(
            "externalPackageRef type in category {} must be one of {allowed:?}, but is: {reference_type}",
            category.json_name()
        ));
        return messages;
    }

    if spdx_version == SpdxVersion::V2_2
        && matches!(reference_type, "advisory" | "fix" | "url" | "swid")
    {
        push(format!(
            "externalPackageRef type \"{reference_type}\" is not supported in SPDX-2.2"
        ));
        return messages;
    }

    match reference_type {
        "advisory" | "fix" | "url" => {
            if !is_valid_url(locator) {
                push(format!(
                    "externalPackageRef locator of type \"{reference_type}\" must be a valid URL, but is: {locator}"
                ));
            }
        }
        "swid" => {
            if !locator.starts_with("swid:") {
                push(format!(
                    "externalPackageRef locator of type \"swid\" must be a valid URI with scheme swid, but is: {locator}"
                ));
            }
        }
        _ => {
            if let Some(pattern) = locator_pattern(reference_type) {
                if !pattern.is_match(locator) {
                    push(format!(
                        "externalPackageRef locator of type \"{reference_type}\" must conform with the regex {}, but is: {locator}",
                        pattern.as_str()
                    ));
                } else if reference_type == "purl" {
                    if let Err(err) = packageurl::PackageUrl::from_str(locator) {
                        push(format!(
                            "externalPackageRef locator of type \"purl\" is not a valid package URL ({err}), but is: {locator}"
                        ));
                    }
                }
            }
        }
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Relationship, RelationshipType};
    use crate::validation::test_support::{document, file, package};

    fn external(category: ExternalPackageRefCategory, kind: &str, locator: &str) -> ExternalPackageRef {
        ExternalPackageRef::new(category, kind, locator)
    }

    #[test]
    fn test_files_analyzed_false_with_contained_file() {
        let mut doc = document("SPDX-2.3");
        doc.packages[0].files_analyzed = false;
        doc.files.push(file("SPDXRef-F", "./f"));
        doc.relationships.push(Relationship::new(
            "SPDXRef-P",
            RelationshipType::Contains,
            ThreeValued::Value("SPDXRef-F".to_string()),
        ));
        let messages = validate_package_within_document(&doc.packages[0], SpdxVersion::V2_3, &doc);
        assert_eq!(messages.len(), 1);
        assert!(messages[0]
            .validation_message
            .starts_with("package must contain no elements if files_analyzed is False"));
    }

    #[test]
    fn test_mandatory_fields_in_2_2() {
        let doc = document("SPDX-2.2");
        let mut bare = package("SPDXRef-P");
        bare.license_concluded = None;
        bare.license_declared = None;
        bare.copyright_text = None;
        let messages = validate_package_within_document(&bare, SpdxVersion::V2_2, &doc);
        assert_eq!(messages.len(), 3);
        assert!(validate_package_within_document(&bare, SpdxVersion::V2_3, &doc).is_empty());
    }

    #[test]
    fn test_invalid_download_location_and_homepage() {
        let doc = document("SPDX-2.3");
        let mut p = package("SPDXRef-P");
        p.download_location = ThreeValued::Value("nowhere".to_string());
        p.homepage = Some(ThreeValued::Value("homepage".to_string()));
        assert_eq!(
            validate_package_within_document(&p, SpdxVersion::V2_3, &doc).len(),
            2
        );
    }

    #[test]
    fn test_verification_code() {
        let mut code = PackageVerificationCode::new("d6a770ba38583ed4bb4525bd96e50461655d2758");
        code.excluded_files.push("./package.spdx".to_string());
        assert!(validate_verification_code(&code, "SPDXRef-P").is_empty());
        code.excluded_files.push("/abs".to_string());
        code.value = "xyz".to_string();
        assert_eq!(validate_verification_code(&code, "SPDXRef-P").len(), 2);
    }

    #[test]
    fn test_external_ref_locators() {
        let valid = [
            external(
                ExternalPackageRefCategory::Security,
                "cpe23Type",
                "cpe:2.3:a:pivotal_software:spring_framework:4.1.0:*:*:*:*:*:*:*",
            ),
            external(
                ExternalPackageRefCategory::Security,
                "cpe22Type",
                "cpe:/o:canonical:ubuntu_linux:10.04:-:lts",
            ),
            external(
                ExternalPackageRefCategory::PackageManager,
                "purl",
                "pkg:maven/org.apache.jena/apache-jena@3.12.0?type=pom",
            ),
            external(
                ExternalPackageRefCategory::PackageManager,
                "maven-central",
                "org.apache.tomcat:tomcat:9.0.0.M4",
            ),
            external(ExternalPackageRefCategory::PackageManager, "npm", "http-server@0.3.0"),
            external(ExternalPackageRefCategory::PackageManager, "nuget", "Microsoft.AspNet.MVC/5.0.0"),
            external(ExternalPackageRefCategory::PackageManager, "bower", "modernizr#2.6.2"),
            external(
                ExternalPackageRefCategory::PersistentId,
                "swh",
                "swh:1:cnt:94a9ed024d3859793618152ea559a168bbcbb5e2",
            ),
            external(
                ExternalPackageRefCategory::PersistentId,
                "gitoid",
                "gitoid:blob:sha1:261eeb9e9f8b2b4b0d119366dda99c6fd7d35c64",
            ),
            external(
                ExternalPackageRefCategory::Security,
                "advisory",
                "https://nvd.nist.gov/vuln/detail/CVE-2020-28498",
            ),
            external(ExternalPackageRefCategory::Other, "anything", "no-spaces"),
        ];
        for external_ref in &valid {
            let messages = validate_external_package_ref(external_ref, "SPDXRef-P", SpdxVersion::V2_3);
            assert!(messages.is_empty(), "{external_ref:?}: {messages:?}");
        }
    }

    #[test]
    fn test_external_ref_errors() {
        let wrong_category = external(ExternalPackageRefCategory::PersistentId, "purl", "pkg:npm/a@1");
        let messages = validate_external_package_ref(&wrong_category, "x", SpdxVersion::V2_3);
        assert_eq!(messages.len(), 1);
        assert!(messages[0]
            .validation_message
            .starts_with("externalPackageRef type in category PERSISTENT_ID must be one of"));

        let bad_locator = external(ExternalPackageRefCategory::PackageManager, "npm", "no-version");
        assert_eq!(validate_external_package_ref(&bad_locator, "x", SpdxVersion::V2_3).len(), 1);

        let spaces = external(ExternalPackageRefCategory::Other, "x", "has spaces");
        assert_eq!(validate_external_package_ref(&spaces, "x", SpdxVersion::V2_3).len(), 1);

        let advisory = external(
            ExternalPackageRefCategory::Security,
            "advisory",
            "https://example.com/advisory",
        );
        let messages = validate_external_package_ref(&advisory, "x", SpdxVersion::V2_2);
        assert_eq!(
            messages[0].validation_message,
            "externalPackageRef type \"advisory\" is not supported in SPDX-2.2"
        );
    }
}
