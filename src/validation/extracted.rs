use super::ids::LICENSE_REF_ID;
use super::{is_valid_url, ValidationContext, ValidationMessage};
use crate::model::{ElementKind, ExtractedLicensingInfo};

#[must_use]
pub fn validate_extracted_licensing_info(info: &ExtractedLicensingInfo) -> Vec<ValidationMessage> {
    let mut context = ValidationContext::new(ElementKind::ExtractedLicensingInfo).with_element(info);
    if let Some(license_id) = &info.license_id {
        context = context.with_spdx_id(license_id);
    }
    let mut messages = Vec::new();
    let mut push = |text: String| messages.push(ValidationMessage::new(text, context.clone()));

    if let Some(license_id) = &info.license_id {
        if !LICENSE_REF_ID.is_match(license_id) {
            push(format!(
                "license_id must only contain letters, numbers, \".\" and \"-\" and must begin with \"LicenseRef-\", but is: {license_id}"
            ));
        }
        if info.extracted_text.is_none() {
            push("extracted_text must be provided if there is a license_id assigned".to_string());
        }
    }
    for reference in &info.cross_references {
        if !is_valid_url(reference) {
            push(format!("cross_reference must be a valid URL, but is: {reference}"));
        }
    }
    messages
}
