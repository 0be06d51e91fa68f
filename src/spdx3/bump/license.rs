use super::Bumper;
use crate::model::{ExtractedLicensingInfo, LicenseExpression as Spdx2LicenseExpression, ThreeValued};
use crate::spdx3::model::{
    Element, ElementInfo, ExternalReference, ExternalReferenceType, LicenseExpression,
    Relationship, RelationshipType, SimpleLicensingText,
};

impl Bumper<'_> {
    /// Links `element_id` to its concluded and declared licenses.
    /// `NOASSERTION` and `NONE` add nothing.
    pub(super) fn bump_license_fields(
        &mut self,
        element_id: &str,
        concluded: Option<&ThreeValued<Spdx2LicenseExpression>>,
        declared: Option<&ThreeValued<Spdx2LicenseExpression>>,
    ) {
        let fields = [
            (concluded, RelationshipType::HasConcludedLicense),
            (declared, RelationshipType::HasDeclaredLicense),
        ];
        for (license, relationship_type) in fields {
            let Some(ThreeValued::Value(expression)) = license else {
                continue;
            };
            let license_id = self.intern_license_expression(expression);
            let element = ElementInfo::new(self.next_relationship_id(), self.creation_info.clone());
            self.relationships.push(Element::Relationship(Relationship::new(
                element,
                element_id,
                vec![license_id],
                relationship_type,
            )));
        }
    }

    /// One element per distinct expression text.
    fn intern_license_expression(&mut self, expression: &Spdx2LicenseExpression) -> String {
        let text = expression.to_string();
        if let Some(spdx_id) = self.license_ids.get(&text) {
            return spdx_id.clone();
        }
        let spdx_id = format!(
            "{}#SPDXRef-LicenseExpression-{}",
            self.namespace,
            self.license_ids.len() + 1
        );
        let license_list_version = self
            .document
            .creation_info
            .license_list_version
            .as_ref()
            .map(ToString::to_string);
        self.payload
            .add_element(Element::LicenseExpression(LicenseExpression {
                element: ElementInfo::new(&spdx_id, self.creation_info.clone()),
                license_expression: text.clone(),
                license_list_version,
            }));
        self.license_ids.insert(text, spdx_id.clone());
        spdx_id
    }

    pub(super) fn bump_extracted_licensing_info(&mut self, info: &ExtractedLicensingInfo) {
        let Some(license_id) = &info.license_id else {
            self.missing_conversion("extracted licensing info", "license_id is required");
            return;
        };
        let Some(license_text) = &info.extracted_text else {
            self.missing_conversion(
                &format!("extracted licensing info {license_id}"),
                "extracted_text is required",
            );
            return;
        };
        let mut element = ElementInfo::new(self.element_id(license_id), self.creation_info.clone());
        element.name = info
            .license_name
            .as_ref()
            .and_then(ThreeValued::value)
            .cloned();
        element.comment = info.comment.clone();
        if !info.cross_references.is_empty() {
            element.external_reference.push(ExternalReference {
                external_reference_type: ExternalReferenceType::Other,
                locator: info.cross_references.clone(),
                comment: None,
            });
        }
        self.payload
            .add_element(Element::SimpleLicensingText(SimpleLicensingText {
                element,
                license_text: license_text.clone(),
            }));
    }
}
