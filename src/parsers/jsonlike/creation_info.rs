use super::fields::{parse_checksum, Fields};
use crate::logger::Logger;
use crate::model::datetime::parse_datetime;
use crate::model::{Actor, CreationInfo, ExternalDocumentRef, Version, DEFAULT_DATA_LICENSE};
use serde_json::Value;

/// Reads the document-level keys and the nested `creationInfo` mapping.
pub(super) fn parse_creation_info(document: &Value) -> Result<CreationInfo, Logger> {
    let mut fields = Fields::new(document);
    let spdx_version = fields.required_str("spdxVersion");
    let spdx_id = fields.required_str("SPDXID");
    let name = fields.required_str("name");
    let namespace = fields.required_str("documentNamespace");
    let data_license = fields
        .str("dataLicense")
        .unwrap_or_else(|| DEFAULT_DATA_LICENSE.to_string());
    let document_comment = fields.str("comment");

    let mut external_document_refs = Vec::new();
    for item in fields.list("externalDocumentRefs") {
        match parse_external_document_ref(item) {
            Ok(external) => external_document_refs.push(external),
            Err(local) => fields.nested("ExternalDocumentRef", local),
        }
    }

    let mut creators = Vec::new();
    let mut created = None;
    let mut creator_comment = None;
    let mut license_list_version = None;
    match fields.get("creationInfo") {
        Some(info) => {
            let mut nested = Fields::new(info);
            for raw in nested.str_list("creators") {
                if let Some(actor) = nested.check("creators", raw.parse::<Actor>()) {
                    creators.push(actor);
                }
            }
            if creators.is_empty() && !nested.logger.has_messages() {
                nested.missing("creators");
            }
            created = match nested.required_str("created") {
                Some(raw) => nested.check("created", parse_datetime(&raw)),
                None => None,
            };
            creator_comment = nested.str("comment");
            license_list_version = nested.parse("licenseListVersion", str::parse::<Version>);
            fields.logger.extend(nested.logger.into_messages());
        }
        None => fields.missing("creationInfo"),
    }

    let info = match (spdx_version, spdx_id, name, namespace, created) {
        (Some(spdx_version), Some(spdx_id), Some(name), Some(namespace), Some(created)) => {
            let mut info =
                CreationInfo::new(spdx_version, spdx_id, name, namespace, creators, created);
            info.data_license = data_license;
            info.document_comment = document_comment;
            info.creator_comment = creator_comment;
            info.license_list_version = license_list_version;
            info.external_document_refs = external_document_refs;
            Some(info)
        }
        _ => None,
    };
    fields.finish(info)
}

fn parse_external_document_ref(value: &Value) -> Result<ExternalDocumentRef, Logger> {
    let mut fields = Fields::new(value);
    let id = fields.required_str("externalDocumentId");
    let uri = fields.required_str("spdxDocument");
    let checksum = match fields.get("checksum") {
        Some(raw) => match parse_checksum(raw) {
            Ok(checksum) => Some(checksum),
            Err(local) => {
                fields.nested("Checksum", local);
                None
            }
        },
        None => {
            fields.missing("checksum");
            None
        }
    };
    let external = match (id, uri, checksum) {
        (Some(id), Some(uri), Some(checksum)) => Some(ExternalDocumentRef::new(id, uri, checksum)),
        _ => None,
    };
    fields.finish(external)
}
