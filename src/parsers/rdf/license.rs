//! License expressions as RDF nodes.
//!
//! A license is either a resource (`http://spdx.org/licenses/MIT`,
//! `<namespace>#LicenseRef-1`) or a node typed as a license set or operator
//! whose `spdx:member` properties hold the operands.

use super::graph::{local_name, spdx, Graph, Term, NOASSERTION_URI, NONE_URI};
use super::node::IdResolver;
use crate::model::license::parse_license_field;
use crate::model::{LicenseExpression, ThreeValued};

/// Reads the license held by `term`, including the `NOASSERTION` / `NONE`
/// individuals.
pub(super) fn parse_license_term(
    graph: &Graph,
    term: &Term,
    ids: &IdResolver,
) -> Result<ThreeValued<LicenseExpression>, String> {
    match term {
        Term::Iri(uri) if uri == NOASSERTION_URI => Ok(ThreeValued::NoAssertion),
        Term::Iri(uri) if uri == NONE_URI => Ok(ThreeValued::None),
        Term::Literal(text) => parse_license_field(text),
        node => parse_license_node(graph, node, ids).map(ThreeValued::Value),
    }
}

fn parse_license_node(
    graph: &Graph,
    node: &Term,
    ids: &IdResolver,
) -> Result<LicenseExpression, String> {
    let Some(class) = graph.type_of(node) else {
        return match node {
            Term::Iri(uri) => Ok(LicenseExpression::symbol(ids.license_id(uri))),
            other => Err(format!("License node {other} has no type")),
        };
    };

    match local_name(class) {
        "ConjunctiveLicenseSet" => Ok(LicenseExpression::And(members(graph, node, ids)?)),
        "DisjunctiveLicenseSet" => Ok(LicenseExpression::Or(members(graph, node, ids)?)),
        "OrLaterOperator" => {
            let member = single_member(graph, node, ids)?;
            Ok(LicenseExpression::OrLater(Box::new(member)))
        }
        "WithExceptionOperator" => {
            let license = single_member(graph, node, ids)?;
            let exception = graph
                .object(node, &spdx("licenseException"))
                .ok_or_else(|| "WithExceptionOperator without licenseException".to_string())?;
            Ok(LicenseExpression::WithException {
                license: Box::new(license),
                exception: exception_id(graph, exception, ids)?,
            })
        }
        "License" | "ListedLicense" | "ExtractedLicensingInfo" | "SimpleLicensingInfo" => {
            match graph.object(node, &spdx("licenseId")) {
                Some(Term::Literal(id)) => Ok(LicenseExpression::symbol(id.clone())),
                _ => match node {
                    Term::Iri(uri) => Ok(LicenseExpression::symbol(ids.license_id(uri))),
                    other => Err(format!("License node {other} has no licenseId")),
                },
            }
        }
        other => Err(format!("Unknown license node type {other}")),
    }
}

fn members(graph: &Graph, node: &Term, ids: &IdResolver) -> Result<Vec<LicenseExpression>, String> {
    let members = graph.objects(node, &spdx("member"));
    if members.len() < 2 {
        return Err(format!(
            "License set {node} needs at least two members, but has {}",
            members.len()
        ));
    }
    members
        .into_iter()
        .map(|member| parse_license_node(graph, member, ids))
        .collect()
}

fn single_member(graph: &Graph, node: &Term, ids: &IdResolver) -> Result<LicenseExpression, String> {
    let members = graph.objects(node, &spdx("member"));
    match members.as_slice() {
        [member] => parse_license_node(graph, member, ids),
        _ => Err(format!(
            "License operator {node} needs exactly one member, but has {}",
            members.len()
        )),
    }
}

fn exception_id(graph: &Graph, exception: &Term, ids: &IdResolver) -> Result<String, String> {
    if let Some(Term::Literal(id)) = graph.object(exception, &spdx("licenseExceptionId")) {
        return Ok(id.clone());
    }
    match exception {
        Term::Iri(uri) => Ok(ids.license_id(uri)),
        Term::Literal(id) => Ok(id.clone()),
        Term::Blank(_) => Err("License exception without licenseExceptionId".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::rdf::graph::RDF_TYPE;

    fn iri(value: &str) -> Term {
        Term::Iri(value.to_string())
    }

    fn ids() -> IdResolver {
        IdResolver::new("https://x/y", &[])
    }

    #[test]
    fn test_resources() {
        let graph = Graph::new();
        assert_eq!(
            parse_license_term(&graph, &iri("http://spdx.org/licenses/MIT"), &ids()),
            Ok(ThreeValued::Value(LicenseExpression::Listed("MIT".to_string())))
        );
        assert_eq!(
            parse_license_term(&graph, &iri("https://x/y#LicenseRef-1"), &ids()),
            Ok(ThreeValued::Value(LicenseExpression::Custom("LicenseRef-1".to_string())))
        );
        assert_eq!(
            parse_license_term(&graph, &iri(NOASSERTION_URI), &ids()),
            Ok(ThreeValued::NoAssertion)
        );
        assert_eq!(
            parse_license_term(&graph, &iri(NONE_URI), &ids()),
            Ok(ThreeValued::None)
        );
    }

    #[test]
    fn test_nested_sets() {
        let mut graph = Graph::new();
        let or = Term::Blank("or".to_string());
        let with = Term::Blank("with".to_string());
        graph.insert(or.clone(), RDF_TYPE, iri(&spdx("DisjunctiveLicenseSet")));
        graph.insert(or.clone(), spdx("member"), iri("http://spdx.org/licenses/MIT"));
        graph.insert(or.clone(), spdx("member"), with.clone());
        graph.insert(with.clone(), RDF_TYPE, iri(&spdx("WithExceptionOperator")));
        graph.insert(with.clone(), spdx("member"), iri("http://spdx.org/licenses/GPL-2.0-or-later"));
        graph.insert(
            with.clone(),
            spdx("licenseException"),
            iri("http://spdx.org/licenses/Classpath-exception-2.0"),
        );

        let license = parse_license_term(&graph, &or, &ids()).unwrap();
        assert_eq!(
            license.value().map(ToString::to_string).as_deref(),
            Some("MIT OR GPL-2.0-or-later WITH Classpath-exception-2.0")
        );
    }

    #[test]
    fn test_malformed_sets() {
        let mut graph = Graph::new();
        let and = Term::Blank("and".to_string());
        graph.insert(and.clone(), RDF_TYPE, iri(&spdx("ConjunctiveLicenseSet")));
        graph.insert(and.clone(), spdx("member"), iri("http://spdx.org/licenses/MIT"));
        assert!(parse_license_term(&graph, &and, &ids()).is_err());

        let untyped = Term::Blank("x".to_string());
        assert!(parse_license_term(&graph, &untyped, &ids()).is_err());
    }
}
