//! Capabilities shared by packages, files and snippets.

use super::{Checksum, File, LicenseExpression, Package, Snippet, ThreeValued};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity classes, as named in validation contexts and parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Document,
    CreationInfo,
    Package,
    File,
    Snippet,
    Relationship,
    Annotation,
    ExtractedLicensingInfo,
    ExternalDocumentRef,
    ExternalPackageRef,
    PackageVerificationCode,
    Checksum,
    Actor,
    LicenseExpression,
}

impl ElementKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "Document",
            Self::CreationInfo => "CreationInfo",
            Self::Package => "Package",
            Self::File => "File",
            Self::Snippet => "Snippet",
            Self::Relationship => "Relationship",
            Self::Annotation => "Annotation",
            Self::ExtractedLicensingInfo => "ExtractedLicensingInfo",
            Self::ExternalDocumentRef => "ExternalDocumentRef",
            Self::ExternalPackageRef => "ExternalPackageRef",
            Self::PackageVerificationCode => "PackageVerificationCode",
            Self::Checksum => "Checksum",
            Self::Actor => "Actor",
            Self::LicenseExpression => "LicenseExpression",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read access to the licensing and integrity fields of an element.
///
/// The validator and the SPDX 3 bump work against this trait so the three
/// element classes share one implementation of their common rules.
pub trait LicensedElement {
    const KIND: ElementKind;

    fn spdx_id(&self) -> &str;

    fn checksums(&self) -> &[Checksum] {
        &[]
    }

    fn license_concluded(&self) -> Option<&ThreeValued<LicenseExpression>>;

    fn license_declared(&self) -> Option<&ThreeValued<LicenseExpression>> {
        None
    }

    /// `license_info_from_files`, `license_info_in_file` or `license_info_in_snippet`
    fn license_infos(&self) -> &[ThreeValued<LicenseExpression>];

    fn copyright_text(&self) -> Option<&ThreeValued<String>>;

    fn attribution_texts(&self) -> &[String];

    /// All concrete license expressions carried by the element.
    fn license_expressions(&self) -> Vec<&LicenseExpression> {
        self.license_concluded()
            .into_iter()
            .chain(self.license_declared())
            .chain(self.license_infos())
            .filter_map(ThreeValued::value)
            .collect()
    }
}

impl LicensedElement for Package {
    const KIND: ElementKind = ElementKind::Package;

    fn spdx_id(&self) -> &str {
        &self.spdx_id
    }

    fn checksums(&self) -> &[Checksum] {
        &self.checksums
    }

    fn license_concluded(&self) -> Option<&ThreeValued<LicenseExpression>> {
        self.license_concluded.as_ref()
    }

    fn license_declared(&self) -> Option<&ThreeValued<LicenseExpression>> {
        self.license_declared.as_ref()
    }

    fn license_infos(&self) -> &[ThreeValued<LicenseExpression>] {
        &self.license_info_from_files
    }

    fn copyright_text(&self) -> Option<&ThreeValued<String>> {
        self.copyright_text.as_ref()
    }

    fn attribution_texts(&self) -> &[String] {
        &self.attribution_texts
    }
}

impl LicensedElement for File {
    const KIND: ElementKind = ElementKind::File;

    fn spdx_id(&self) -> &str {
        &self.spdx_id
    }

    fn checksums(&self) -> &[Checksum] {
        &self.checksums
    }

    fn license_concluded(&self) -> Option<&ThreeValued<LicenseExpression>> {
        self.license_concluded.as_ref()
    }

    fn license_infos(&self) -> &[ThreeValued<LicenseExpression>] {
        &self.license_info_in_file
    }

    fn copyright_text(&self) -> Option<&ThreeValued<String>> {
        self.copyright_text.as_ref()
    }

    fn attribution_texts(&self) -> &[String] {
        &self.attribution_texts
    }
}

impl LicensedElement for Snippet {
    const KIND: ElementKind = ElementKind::Snippet;

    fn spdx_id(&self) -> &str {
        &self.spdx_id
    }

    fn license_concluded(&self) -> Option<&ThreeValued<LicenseExpression>> {
        self.license_concluded.as_ref()
    }

    fn license_infos(&self) -> &[ThreeValued<LicenseExpression>] {
        &self.license_info_in_snippet
    }

    fn copyright_text(&self) -> Option<&ThreeValued<String>> {
        self.copyright_text.as_ref()
    }

    fn attribution_texts(&self) -> &[String] {
        &self.attribution_texts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_license_expressions_skip_singletons() {
        let mut package = Package::new("SPDXRef-P", "p", ThreeValued::NoAssertion);
        package.license_concluded = Some(ThreeValued::Value(LicenseExpression::symbol("MIT")));
        package.license_declared = Some(ThreeValued::NoAssertion);
        package.license_info_from_files = vec![
            ThreeValued::None,
            ThreeValued::Value(LicenseExpression::symbol("LicenseRef-1")),
        ];
        let ids: Vec<String> = package
            .license_expressions()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(ids, vec!["MIT", "LicenseRef-1"]);
    }
}
