use super::graph::{spdx, Graph, Term, RDFS_COMMENT};
use super::node::{parse_checksum, IdResolver, Properties};
use crate::logger::Logger;
use crate::model::datetime::parse_datetime;
use crate::model::{Actor, CreationInfo, ExternalDocumentRef, Version, DEFAULT_DATA_LICENSE};

/// Splits the document URI into namespace and id.
pub(super) fn split_document_uri(document: &Term) -> Result<(String, String), String> {
    match document {
        Term::Iri(uri) => match uri.rsplit_once('#') {
            Some((namespace, id)) if !namespace.is_empty() && !id.is_empty() => {
                Ok((namespace.to_string(), id.to_string()))
            }
            _ => Err(format!(
                "No '#' found in the URI of SpdxDocument, the URI for the SpdxDocument should be the namespace appended by '#SPDXRef-DOCUMENT'. Got: {uri}"
            )),
        },
        other => Err(format!("SpdxDocument {other} must be identified by a URI")),
    }
}

/// Reads the properties of the `spdx:SpdxDocument` node and its nested
/// `spdx:CreationInfo`.
pub(super) fn parse_creation_info(graph: &Graph, document: &Term) -> Result<CreationInfo, Logger> {
    let (namespace, spdx_id) = match split_document_uri(document) {
        Ok(parts) => parts,
        Err(message) => {
            let mut logger = Logger::new();
            logger.append(message);
            return Err(logger);
        }
    };
    let ids = IdResolver::new(namespace.clone(), &[]);
    let mut props = Properties::new(graph, document, &ids);

    let spdx_version = props.required_literal(&spdx("specVersion"));
    let name = props.required_literal(&spdx("name"));
    let data_license = match props.object(&spdx("dataLicense")) {
        Some(Term::Iri(uri)) => ids.license_id(uri),
        Some(_) => props
            .literal(&spdx("dataLicense"))
            .unwrap_or_else(|| DEFAULT_DATA_LICENSE.to_string()),
        None => DEFAULT_DATA_LICENSE.to_string(),
    };
    let document_comment = props.literal(RDFS_COMMENT);

    let mut external_document_refs = Vec::new();
    for node in props.objects(&spdx("externalDocumentRef")) {
        match parse_external_document_ref(graph, node, &ids) {
            Ok(external) => external_document_refs.push(external),
            Err(local) => props.nested("ExternalDocumentRef", local),
        }
    }

    let mut creators = Vec::new();
    let mut created = None;
    let mut creator_comment = None;
    let mut license_list_version = None;
    match props.object(&spdx("creationInfo")) {
        Some(info) => {
            let mut nested = Properties::new(graph, info, &ids);
            for raw in nested.literals(&spdx("creator")) {
                if let Some(actor) = nested.check(&spdx("creator"), raw.parse::<Actor>()) {
                    creators.push(actor);
                }
            }
            if creators.is_empty() && !nested.logger.has_messages() {
                nested.missing(&spdx("creator"));
            }
            created = match nested.required_literal(&spdx("created")) {
                Some(raw) => nested.check(&spdx("created"), parse_datetime(&raw)),
                None => None,
            };
            creator_comment = nested.literal(RDFS_COMMENT);
            license_list_version =
                nested.parse(&spdx("licenseListVersion"), str::parse::<Version>);
            props.logger.extend(nested.logger.into_messages());
        }
        None => props.missing(&spdx("creationInfo")),
    }

    let info = match (spdx_version, name, created) {
        (Some(spdx_version), Some(name), Some(created)) => {
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
    props.finish(info)
}

fn parse_external_document_ref(
    graph: &Graph,
    node: &Term,
    ids: &IdResolver,
) -> Result<ExternalDocumentRef, Logger> {
    let mut props = Properties::new(graph, node, ids);
    let document_ref_id = props.required_literal(&spdx("externalDocumentId"));
    let document_uri = props.required_literal(&spdx("spdxDocument"));
    let checksum = match props.object(&spdx("checksum")) {
        Some(checksum_node) => match parse_checksum(graph, checksum_node, ids) {
            Ok(checksum) => Some(checksum),
            Err(local) => {
                props.nested("Checksum", local);
                None
            }
        },
        None => {
            props.missing(&spdx("checksum"));
            None
        }
    };
    let external = match (document_ref_id, document_uri, checksum) {
        (Some(id), Some(uri), Some(checksum)) => Some(ExternalDocumentRef::new(id, uri, checksum)),
        _ => None,
    };
    props.finish(external)
}
