//! RDF/XML to triples.
//!
//! Covers the subset SPDX documents use: typed node elements and
//! `rdf:Description`, `rdf:about` / `rdf:nodeID` subjects, anonymous blank
//! nodes, `rdf:resource` / `rdf:nodeID` objects, nested node elements,
//! literal property elements, property attributes and
//! `rdf:parseType="Resource"`.

use super::graph::{Graph, Term, POINTER_NS, RDF_NS, RDF_TYPE, SPDX_POINTER_NS};
use crate::error::{ParseErrorKind, Result, SpdxError};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;

const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

fn invalid(message: impl Into<String>) -> SpdxError {
    SpdxError::parse("RDF/XML deserialization", ParseErrorKind::InvalidRdf(message.into()))
}

#[derive(Debug)]
enum Frame {
    /// Inside `rdf:RDF`, expecting node elements.
    Root,
    /// Inside a node element, expecting property elements.
    Node(Term),
    /// Inside a property element, expecting text or one node element.
    Property {
        subject: Term,
        predicate: String,
        text: String,
        has_object: bool,
    },
}

#[derive(Default)]
struct RdfXmlReader {
    graph: Graph,
    frames: Vec<Frame>,
    scopes: Vec<HashMap<String, String>>,
    blank_count: usize,
}

/// Reads an RDF/XML document into a [`Graph`].
pub fn read_rdf_xml(input: &str) -> Result<Graph> {
    let mut reader = Reader::from_str(input);
    let mut state = RdfXmlReader::default();
    let mut saw_root = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                saw_root = true;
                state.start(e)?;
            }
            Ok(Event::Empty(ref e)) => {
                saw_root = true;
                state.start(e)?;
                state.end()?;
            }
            Ok(Event::End(_)) => state.end()?,
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().map_err(|err| invalid(err.to_string()))?;
                state.text(&text);
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                state.text(&text);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(invalid(format!(
                    "error at position {}: {e}",
                    reader.buffer_position()
                )))
            }
        }
        buf.clear();
    }

    if !saw_root {
        return Err(invalid("no root element"));
    }
    if !state.frames.is_empty() {
        return Err(invalid("unexpected end of input"));
    }
    Ok(state.graph)
}

impl RdfXmlReader {
    fn start(&mut self, element: &BytesStart<'_>) -> Result<()> {
        let mut scope = HashMap::new();
        let mut attributes = Vec::new();
        for attr in element.attributes() {
            let attr = attr.map_err(|e| invalid(e.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| invalid(e.to_string()))?
                .into_owned();
            if key == "xmlns" {
                scope.insert(String::new(), value);
            } else if let Some(prefix) = key.strip_prefix("xmlns:") {
                scope.insert(prefix.to_string(), value);
            } else {
                attributes.push((key, value));
            }
        }
        self.scopes.push(scope);

        let name = self.resolve(&String::from_utf8_lossy(element.name().as_ref()))?;
        let mut resolved = Vec::with_capacity(attributes.len());
        for (key, value) in attributes {
            let iri = if key.contains(':') {
                self.resolve(&key)?
            } else {
                // unqualified RDF attributes are accepted as their rdf: form
                match key.as_str() {
                    "about" | "resource" | "nodeID" | "datatype" | "parseType" => {
                        format!("{RDF_NS}{key}")
                    }
                    _ => continue,
                }
            };
            resolved.push((iri, value));
        }

        match self.frames.last() {
            None if name == format!("{RDF_NS}RDF") => self.frames.push(Frame::Root),
            None | Some(Frame::Root) => {
                let node = self.node_element(&name, &resolved);
                self.frames.push(Frame::Node(node));
            }
            Some(Frame::Node(subject)) => {
                let subject = subject.clone();
                self.property_element(subject, name, &resolved);
            }
            Some(Frame::Property { .. }) => {
                let node = self.node_element(&name, &resolved);
                if let Some(Frame::Property {
                    subject,
                    predicate,
                    has_object,
                    ..
                }) = self.frames.last_mut()
                {
                    if *has_object {
                        return Err(invalid(format!(
                            "property {predicate} has more than one object"
                        )));
                    }
                    *has_object = true;
                    let (subject, predicate) = (subject.clone(), predicate.clone());
                    self.graph.insert(subject, predicate, node.clone());
                }
                self.frames.push(Frame::Node(node));
            }
        }
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        self.scopes.pop();
        match self.frames.pop() {
            Some(Frame::Property {
                subject,
                predicate,
                text,
                has_object: false,
            }) => self.graph.insert(subject, predicate, Term::Literal(text)),
            Some(_) => {}
            None => return Err(invalid("closing tag without an opening tag")),
        }
        Ok(())
    }

    fn text(&mut self, content: &str) {
        if let Some(Frame::Property { text, .. }) = self.frames.last_mut() {
            text.push_str(content);
        }
    }

    fn node_element(&mut self, name: &str, attributes: &[(String, String)]) -> Term {
        let node = attribute(attributes, "about")
            .map(|about| Term::Iri(about.to_string()))
            .or_else(|| attribute(attributes, "nodeID").map(|id| Term::Blank(id.to_string())))
            .unwrap_or_else(|| self.blank());
        if name != format!("{RDF_NS}Description") {
            self.graph
                .insert(node.clone(), RDF_TYPE, Term::Iri(name.to_string()));
        }
        for (iri, value) in attributes {
            if !iri.starts_with(RDF_NS) && !iri.starts_with(XML_NS) {
                self.graph
                    .insert(node.clone(), iri.clone(), Term::Literal(value.clone()));
            }
        }
        node
    }

    fn property_element(&mut self, subject: Term, predicate: String, attributes: &[(String, String)]) {
        if attribute(attributes, "parseType") == Some("Resource") {
            let node = self.blank();
            self.graph.insert(subject, predicate, node.clone());
            self.frames.push(Frame::Node(node));
            return;
        }
        let object = attribute(attributes, "resource")
            .map(|resource| Term::Iri(resource.to_string()))
            .or_else(|| attribute(attributes, "nodeID").map(|id| Term::Blank(id.to_string())));
        let has_object = object.is_some();
        if let Some(object) = object {
            self.graph.insert(subject.clone(), predicate.clone(), object);
        }
        self.frames.push(Frame::Property {
            subject,
            predicate,
            text: String::new(),
            has_object,
        });
    }

    fn blank(&mut self) -> Term {
        self.blank_count += 1;
        Term::Blank(format!("n{}", self.blank_count))
    }

    /// Expands `prefix:local` against the in-scope namespace declarations.
    fn resolve(&self, qname: &str) -> Result<String> {
        let (prefix, local) = qname.split_once(':').unwrap_or(("", qname));
        if prefix == "xml" {
            return Ok(format!("{XML_NS}{local}"));
        }
        let namespace = self
            .scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(prefix))
            .ok_or_else(|| invalid(format!("undeclared namespace prefix in {qname}")))?;
        let namespace = if namespace == SPDX_POINTER_NS {
            POINTER_NS
        } else {
            namespace.as_str()
        };
        Ok(format!("{namespace}{local}"))
    }
}

fn attribute<'a>(attributes: &'a [(String, String)], rdf_local: &str) -> Option<&'a str> {
    attributes.iter().find_map(|(iri, value)| {
        (iri.strip_prefix(RDF_NS) == Some(rdf_local)).then_some(value.as_str())
    })
}
