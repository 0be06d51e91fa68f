//! SPDX RDF/XML parser.
//!
//! The input is first read into a [`Graph`] of triples. The document node is
//! the subject typed `spdx:SpdxDocument`; its URI is the document namespace
//! followed by `#` and the document id. Packages, files and snippets are
//! found by type, relationships and annotations by the `spdx:relationship`
//! and `spdx:annotation` properties of the element that holds them.

mod creation_info;
mod elements;
pub mod graph;
mod license;
mod node;
mod rdfxml;
mod relationships;

pub use graph::{Graph, Term, Triple};
pub use node::IdResolver;
pub use rdfxml::read_rdf_xml;

use super::traits::SpdxParser;
use crate::error::{Result, SpdxParsingError};
use crate::logger::Logger;
use crate::model::{Document, ElementKind};
use graph::spdx;
use tracing::debug;

/// Parses an SPDX RDF/XML document.
pub fn parse_rdf(input: &str) -> Result<Document> {
    let graph = read_rdf_xml(input)?;
    Ok(graph_to_document(&graph)?)
}

/// [`SpdxParser`] for `.rdf` and `.rdf.xml` files.
#[derive(Debug, Default, Clone, Copy)]
pub struct RdfParser;

impl SpdxParser for RdfParser {
    fn parse_str(&self, content: &str) -> Result<Document> {
        parse_rdf(content)
    }

    fn format_name(&self) -> &'static str {
        "RDF/XML"
    }
}

/// Builds a [`Document`] from a graph of SPDX triples.
pub fn graph_to_document(graph: &Graph) -> std::result::Result<Document, SpdxParsingError> {
    let mut logger = Logger::new();
    let documents = graph.subjects_of_type(&spdx("SpdxDocument"));
    let document_node = match documents.as_slice() {
        [node] => *node,
        [] => {
            return Err(SpdxParsingError::single(
                "Error while parsing CreationInfo: ['No SpdxDocument node found in the graph']",
            ))
        }
        _ => {
            return Err(SpdxParsingError::single(format!(
                "Error while parsing CreationInfo: ['Expected one SpdxDocument node, found {}']",
                documents.len()
            )))
        }
    };

    let creation_info = match creation_info::parse_creation_info(graph, document_node) {
        Ok(info) => info,
        Err(local) => {
            logger.append_element(ElementKind::CreationInfo.as_str(), local);
            return Err(SpdxParsingError::new(logger.into_messages()));
        }
    };
    let ids = IdResolver::new(
        creation_info.document_namespace.clone(),
        &creation_info.external_document_refs,
    );

    let packages = parse_typed(graph, &ids, ElementKind::Package, elements::parse_package, &mut logger);
    let files = parse_typed(graph, &ids, ElementKind::File, elements::parse_file, &mut logger);
    let snippets = parse_typed(graph, &ids, ElementKind::Snippet, elements::parse_snippet, &mut logger);

    let mut extracted_licensing_info = Vec::new();
    for triple in graph.with_predicate(&spdx("hasExtractedLicensingInfo")) {
        match elements::parse_extracted_licensing_info(graph, &triple.object, &ids) {
            Ok(info) => extracted_licensing_info.push(info),
            Err(local) => logger.append_element(ElementKind::ExtractedLicensingInfo.as_str(), local),
        }
    }

    let mut relationships = Vec::new();
    for triple in graph.with_predicate(&spdx("relationship")) {
        match relationships::parse_relationship(graph, &triple.subject, &triple.object, &ids) {
            Ok(relationship) => relationships.push(relationship),
            Err(local) => logger.append_element(ElementKind::Relationship.as_str(), local),
        }
    }

    let mut annotations = Vec::new();
    for triple in graph.with_predicate(&spdx("annotation")) {
        match relationships::parse_annotation(graph, &triple.subject, &triple.object, &ids) {
            Ok(annotation) => annotations.push(annotation),
            Err(local) => logger.append_element(ElementKind::Annotation.as_str(), local),
        }
    }

    logger.raise_if_nonempty()?;

    let mut document = Document::new(creation_info);
    document.packages = packages;
    document.files = files;
    document.snippets = snippets;
    document.extracted_licensing_info = extracted_licensing_info;
    document.relationships = relationships;
    document.annotations = annotations;
    relationships::add_implied_relationships(graph, &ids, &mut document);

    debug!(
        triples = graph.len(),
        packages = document.packages.len(),
        files = document.files.len(),
        snippets = document.snippets.len(),
        relationships = document.relationships.len(),
        "parsed SPDX RDF graph"
    );
    Ok(document)
}

type ElementParser<T> = fn(&Graph, &Term, &IdResolver) -> std::result::Result<T, Logger>;

/// Parses every subject typed as `spdx:<kind>`.
fn parse_typed<T>(
    graph: &Graph,
    ids: &IdResolver,
    kind: ElementKind,
    parse: ElementParser<T>,
    logger: &mut Logger,
) -> Vec<T> {
    let mut out = Vec::new();
    for node in graph.subjects_of_type(&spdx(kind.as_str())) {
        match parse(graph, node, ids) {
            Ok(element) => out.push(element),
            Err(local) => logger.append_element(kind.as_str(), local),
        }
    }
    out
}
