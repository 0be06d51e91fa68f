use super::Bumper;
use crate::model::{Actor, ActorType};
use crate::spdx3::model::{Agent, Element, ElementInfo, ExternalIdentifier, ExternalIdentifierType};

/// Drops whitespace and replaces characters an id may not contain with `-`.
fn sanitize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

impl Bumper<'_> {
    /// `<ns>#SPDXRef-Actor-<name>[-<email>]`
    pub(super) fn actor_id(&self, actor: &Actor) -> String {
        let mut id = format!("{}#SPDXRef-Actor-{}", self.namespace, sanitize(&actor.name));
        if let Some(email) = &actor.email {
            id.push('-');
            id.push_str(&sanitize(email));
        }
        id
    }

    /// Returns the agent id for `actor`, adding the agent on first use.
    pub(super) fn intern_actor(&mut self, actor: &Actor) -> String {
        let spdx_id = self.actor_id(actor);
        if self.payload.contains(&spdx_id) {
            return spdx_id;
        }
        let mut element =
            ElementInfo::new(&spdx_id, self.creation_info.clone()).with_name(actor.name.clone());
        if let Some(email) = &actor.email {
            element
                .external_identifier
                .push(ExternalIdentifier::new(ExternalIdentifierType::Email, email.clone()));
        }
        let agent = Agent { element };
        self.payload.add_element(match actor.actor_type {
            ActorType::Person => Element::Person(agent),
            ActorType::Organization => Element::Organization(agent),
            ActorType::Tool => Element::Tool(agent),
        });
        spdx_id
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::document;
    use super::super::{BumpOptions, Bumper};
    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("Jane Doe"), "JaneDoe");
        assert_eq!(sanitize("jane@example.com"), "jane-example.com");
        assert_eq!(sanitize("scanner-1.0"), "scanner-1.0");
    }

    #[test]
    fn test_repeated_actor_is_interned_once() {
        let document = document();
        let mut bumper = Bumper::new(&document, BumpOptions::default());
        let actor = Actor::organization("Acme Corp", None).unwrap();
        let first = bumper.intern_actor(&actor);
        let second = bumper.intern_actor(&actor);
        assert_eq!(first, second);
        assert_eq!(first, "https://x/y#SPDXRef-Actor-AcmeCorp");
        assert_eq!(bumper.payload.len(), 1);
        assert!(matches!(
            bumper.payload.get_element(&first),
            Some(Element::Organization(_))
        ));
    }

    #[test]
    fn test_email_becomes_identifier() {
        let document = document();
        let mut bumper = Bumper::new(&document, BumpOptions::default());
        let actor = Actor::person("Jane", Some("jane@example.com".to_string())).unwrap();
        let id = bumper.intern_actor(&actor);
        let identifiers = &bumper.payload.get_element(&id).unwrap().info().external_identifier;
        assert_eq!(identifiers.len(), 1);
        assert_eq!(identifiers[0].external_identifier_type, ExternalIdentifierType::Email);
        assert_eq!(identifiers[0].identifier, "jane@example.com");
    }
}
