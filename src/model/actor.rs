//! Creators, suppliers, originators and annotators.

use crate::error::ConstructionError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static ACTOR_WITH_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*)\((.*)\)\s*$").expect("static regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActorType {
    Person,
    Organization,
    Tool,
}

impl ActorType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "Person",
            Self::Organization => "Organization",
            Self::Tool => "Tool",
        }
    }
}

impl fmt::Display for ActorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Person" => Ok(Self::Person),
            "Organization" => Ok(Self::Organization),
            "Tool" => Ok(Self::Tool),
            other => Err(format!("Invalid actor type: {other}")),
        }
    }
}

/// A person, organization or tool, written as `Type: name (email)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
    pub actor_type: ActorType,
    pub name: String,
    pub email: Option<String>,
}

impl Actor {
    /// Builds an actor, rejecting an empty name and tools with an email.
    pub fn new(
        actor_type: ActorType,
        name: impl Into<String>,
        email: Option<String>,
    ) -> Result<Self, ConstructionError> {
        let name = name.into();
        let mut messages = Vec::new();
        if name.trim().is_empty() {
            messages.push(format!("{actor_type} name must not be empty"));
        }
        if actor_type == ActorType::Tool && email.is_some() {
            messages.push("email must be None if actor_type is TOOL".to_string());
        }
        if !messages.is_empty() {
            return Err(ConstructionError::new(messages));
        }
        Ok(Self {
            actor_type,
            name,
            email,
        })
    }

    pub fn person(name: impl Into<String>, email: Option<String>) -> Result<Self, ConstructionError> {
        Self::new(ActorType::Person, name, email)
    }

    pub fn organization(
        name: impl Into<String>,
        email: Option<String>,
    ) -> Result<Self, ConstructionError> {
        Self::new(ActorType::Organization, name, email)
    }

    pub fn tool(name: impl Into<String>) -> Result<Self, ConstructionError> {
        Self::new(ActorType::Tool, name, None)
    }

    /// Name and optional `(email)` without the type prefix.
    #[must_use]
    pub fn value_text(&self) -> String {
        match &self.email {
            Some(email) => format!("{} ({email})", self.name),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.actor_type, self.value_text())
    }
}

impl FromStr for Actor {
    type Err = String;

    /// Parses `Person: Jane Doe (jane@example.com)`, `Organization: Acme ()`
    /// or `Tool: scanner-1.0`. An empty email is treated as absent.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, rest) = s
            .split_once(':')
            .ok_or_else(|| format!("Actor {s} doesn't match any of person, organization or tool."))?;
        let actor_type = match kind.trim() {
            "Person" => ActorType::Person,
            "Organization" => ActorType::Organization,
            "Tool" => ActorType::Tool,
            _ => {
                return Err(format!(
                    "Actor {s} doesn't match any of person, organization or tool."
                ))
            }
        };
        let rest = rest.trim();
        let (name, email) = if actor_type == ActorType::Tool {
            (rest.to_string(), None)
        } else {
            match ACTOR_WITH_EMAIL.captures(rest) {
                Some(caps) => {
                    let name = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();
                    let email = caps.get(2).map_or("", |m| m.as_str()).trim().to_string();
                    (name, (!email.is_empty()).then_some(email))
                }
                None => (rest.to_string(), None),
            }
        };
        Self::new(actor_type, name, email).map_err(|e| e.messages.join("; "))
    }
}
