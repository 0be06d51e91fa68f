use super::checksum::bump_checksum;
use super::Bumper;
use crate::model::ActorType;
use crate::spdx3::model::{Element, ElementInfo, ExternalMap, NamespaceMap, SpdxDocument};

impl Bumper<'_> {
    /// Builds the shared creation info and the `SpdxDocument` element.
    /// Returns the document's id.
    pub(super) fn bump_creation_info(&mut self) -> String {
        let document = self.document;
        let info = &document.creation_info;

        self.creation_info.comment = info.creator_comment.clone();
        for actor in &info.creators {
            let actor_id = self.actor_id(actor);
            let list = match actor.actor_type {
                ActorType::Tool => &mut self.creation_info.created_using,
                ActorType::Person | ActorType::Organization => &mut self.creation_info.created_by,
            };
            if !list.contains(&actor_id) {
                list.push(actor_id);
            }
        }
        for actor in &info.creators {
            self.intern_actor(actor);
        }

        let spdx_id = self.element_id(&info.spdx_id);
        let mut element =
            ElementInfo::new(&spdx_id, self.creation_info.clone()).with_name(info.name.clone());
        element.comment = info.document_comment.clone();

        let mut imports = Vec::new();
        let mut namespace_map = Vec::new();
        for external in &info.external_document_refs {
            imports.push(ExternalMap {
                external_spdx_id: format!("{}#SPDXRef-DOCUMENT", external.document_uri),
                verified_using: vec![bump_checksum(&external.checksum)],
                location_hint: Some(external.document_uri.clone()),
            });
            namespace_map.push(NamespaceMap {
                prefix: external.document_ref_id.clone(),
                namespace: format!("{}#", external.document_uri),
            });
        }

        let root_element = document
            .described_ids()
            .into_iter()
            .map(|id| self.element_id(id))
            .collect();

        self.payload.add_element(Element::SpdxDocument(SpdxDocument {
            element,
            root_element,
            elements: Vec::new(),
            imports,
            namespace_map,
        }));
        spdx_id
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::document;
    use crate::spdx3::bump::bump_document;
    use crate::spdx3::model::{Element, HashAlgorithm};

    #[test]
    fn test_creators_split_into_agents_and_tools() {
        let result = bump_document(&document());
        let Some(Element::SpdxDocument(spdx_document)) =
            result.payload.get_element("https://x/y#SPDXRef-DOCUMENT")
        else {
            panic!("missing SpdxDocument");
        };
        let info = &spdx_document.element.creation_info;
        assert_eq!(info.created_using, ["https://x/y#SPDXRef-Actor-LF-1.0"]);
        assert_eq!(
            info.created_by,
            ["https://x/y#SPDXRef-Actor-JaneDoe-jane-example.com"]
        );
        assert!(matches!(
            result.payload.get_element("https://x/y#SPDXRef-Actor-LF-1.0"),
            Some(Element::Tool(_))
        ));
        assert!(matches!(
            result
                .payload
                .get_element("https://x/y#SPDXRef-Actor-JaneDoe-jane-example.com"),
            Some(Element::Person(_))
        ));
    }

    #[test]
    fn test_external_documents_become_imports() {
        let result = bump_document(&document());
        let Some(Element::SpdxDocument(spdx_document)) =
            result.payload.get_element("https://x/y#SPDXRef-DOCUMENT")
        else {
            panic!("missing SpdxDocument");
        };
        assert_eq!(spdx_document.imports.len(), 1);
        let import = &spdx_document.imports[0];
        assert_eq!(import.external_spdx_id, "https://other/doc#SPDXRef-DOCUMENT");
        assert_eq!(import.verified_using[0].algorithm, HashAlgorithm::Sha1);
        assert_eq!(import.location_hint.as_deref(), Some("https://other/doc"));
        assert_eq!(spdx_document.namespace_map[0].prefix, "DocumentRef-ext");
        assert_eq!(spdx_document.namespace_map[0].namespace, "https://other/doc#");
    }
}
