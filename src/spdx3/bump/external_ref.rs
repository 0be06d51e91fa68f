use super::Bumper;
use crate::model::{self as spdx2, ExternalPackageRef, ExternalPackageRefCategory};
use crate::spdx3::model::{
    ExternalIdentifier, ExternalIdentifierType, ExternalReference, ExternalReferenceType, Package,
};

enum BumpedRef {
    Identifier(ExternalIdentifierType),
    Reference(ExternalReferenceType),
}

fn classify(reference_type: &str) -> Option<BumpedRef> {
    let bumped = match reference_type {
        "cpe22Type" => BumpedRef::Identifier(ExternalIdentifierType::Cpe22),
        "cpe23Type" => BumpedRef::Identifier(ExternalIdentifierType::Cpe23),
        "swid" => BumpedRef::Identifier(ExternalIdentifierType::Swid),
        "purl" => BumpedRef::Identifier(ExternalIdentifierType::PackageUrl),
        "swh" => BumpedRef::Identifier(ExternalIdentifierType::Swhid),
        "gitoid" => BumpedRef::Identifier(ExternalIdentifierType::Gitoid),
        "advisory" => BumpedRef::Reference(ExternalReferenceType::SecurityAdvisory),
        "fix" => BumpedRef::Reference(ExternalReferenceType::SecurityFix),
        _ => return None,
    };
    Some(bumped)
}

impl Bumper<'_> {
    /// Sorts external package refs into identifiers and references.
    ///
    /// A package with exactly one purl, carrying no comment, gets it as
    /// `package_url` instead.
    pub(super) fn bump_external_refs(&mut self, package: &spdx2::Package, bumped: &mut Package) {
        let purls: Vec<&ExternalPackageRef> = package
            .external_references
            .iter()
            .filter(|external| external.reference_type == "purl")
            .collect();
        let single_purl = match purls.as_slice() {
            [purl] if purl.comment.is_none() => Some(purl.locator.clone()),
            _ => None,
        };

        for external in &package.external_references {
            if external.reference_type == "purl" && single_purl.is_some() {
                continue;
            }
            if external.category == ExternalPackageRefCategory::Other {
                self.missing_conversion(
                    &format!("external ref {} of {}", external.reference_type, package.spdx_id),
                    "category OTHER has no SPDX 3 mapping",
                );
                continue;
            }
            match classify(&external.reference_type) {
                Some(BumpedRef::Identifier(external_identifier_type)) => {
                    bumped.element.external_identifier.push(ExternalIdentifier {
                        external_identifier_type,
                        identifier: external.locator.clone(),
                        comment: external.comment.clone(),
                    });
                }
                Some(BumpedRef::Reference(external_reference_type)) => {
                    bumped.element.external_reference.push(ExternalReference {
                        external_reference_type,
                        locator: vec![external.locator.clone()],
                        comment: external.comment.clone(),
                    });
                }
                None => self.missing_conversion(
                    &format!("external ref {} of {}", external.reference_type, package.spdx_id),
                    "reference type has no SPDX 3 mapping",
                ),
            }
        }
        bumped.package_url = single_purl;
    }
}
