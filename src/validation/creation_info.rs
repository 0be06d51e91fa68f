use super::ids::{uri_message, DOCUMENT_REF_ID};
use super::{is_valid_uri, validate_actor, validate_checksum, SpdxVersion, ValidationContext, ValidationMessage};
use crate::model::{
    ChecksumAlgorithm, CreationInfo, ElementKind, ExternalDocumentRef, DEFAULT_DATA_LICENSE,
    DOCUMENT_SPDX_ID,
};

#[must_use]
pub fn validate_creation_info(
    creation_info: &CreationInfo,
    spdx_version: SpdxVersion,
) -> Vec<ValidationMessage> {
    let context = ValidationContext::new(ElementKind::Document).with_spdx_id(&creation_info.spdx_id);
    let mut messages = Vec::new();
    let mut push = |text: String| messages.push(ValidationMessage::new(text, context.clone()));

    if creation_info.spdx_id != DOCUMENT_SPDX_ID {
        push(format!(
            "spdx_id must be {DOCUMENT_SPDX_ID}, but is: {}",
            creation_info.spdx_id
        ));
    }
    if creation_info.data_license != DEFAULT_DATA_LICENSE {
        push(format!(
            "data_license must be \"{DEFAULT_DATA_LICENSE}\", but is: {}",
            creation_info.data_license
        ));
    }
    if !is_valid_uri(&creation_info.document_namespace) {
        push(format!(
            "document_namespace {}",
            uri_message(&creation_info.document_namespace)
        ));
    }
    if creation_info.creators.is_empty() {
        push("creators must contain at least one actor".to_string());
    }

    for creator in &creation_info.creators {
        messages.extend(validate_actor(creator, &creation_info.spdx_id));
    }
    for external_ref in &creation_info.external_document_refs {
        messages.extend(validate_external_document_ref(
            external_ref,
            &creation_info.spdx_id,
            spdx_version,
        ));
    }
    messages
}

#[must_use]
pub fn validate_external_document_ref(
    external_ref: &ExternalDocumentRef,
    parent_id: &str,
    spdx_version: SpdxVersion,
) -> Vec<ValidationMessage> {
    let context = ValidationContext::new(ElementKind::ExternalDocumentRef)
        .with_parent_id(parent_id)
        .with_element(external_ref);
    let mut messages = Vec::new();
    let mut push = |text: String| messages.push(ValidationMessage::new(text, context.clone()));

    if !DOCUMENT_REF_ID.is_match(&external_ref.document_ref_id) {
        push(format!(
            "document_ref_id must only contain letters, numbers, \".\", \"-\" and \"+\" and must begin with \"DocumentRef-\", but is: {}",
            external_ref.document_ref_id
        ));
    }
    if !is_valid_uri(&external_ref.document_uri) {
        push(format!("document_uri {}", uri_message(&external_ref.document_uri)));
    }
    if external_ref.checksum.algorithm != ChecksumAlgorithm::Sha1 {
        push(format!(
            "checksum must be SHA1, but is: {}",
            external_ref.checksum.algorithm
        ));
    }
    messages.extend(validate_checksum(
        &external_ref.checksum,
        parent_id,
        spdx_version,
    ));
    messages
}
