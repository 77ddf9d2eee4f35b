//! Ability tokens held by a role for a module

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single permitted operation on a module.
///
/// The wire format is a plain string; `"*"` maps to the distinguished
/// [`Ability::Any`] variant so wildcard handling is an explicit case rather
/// than a string comparison scattered through the filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Ability {
    /// Wildcard: any ability on the module suffices.
    Any,
    /// A named ability such as `read` or `update`.
    Named(String),
}

impl Ability {
    /// Create a named ability token
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        if name == "*" {
            Ability::Any
        } else {
            Ability::Named(name)
        }
    }

    /// Whether this token is the wildcard
    pub fn is_any(&self) -> bool {
        matches!(self, Ability::Any)
    }

    /// The string form used on the wire
    pub fn as_str(&self) -> &str {
        match self {
            Ability::Any => "*",
            Ability::Named(name) => name,
        }
    }
}

impl From<String> for Ability {
    fn from(value: String) -> Self {
        Ability::named(value)
    }
}

impl From<&str> for Ability {
    fn from(value: &str) -> Self {
        Ability::named(value)
    }
}

impl From<Ability> for String {
    fn from(value: Ability) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Abilities a role holds for one module, as delivered by the session layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityGrant {
    /// Module the abilities apply to
    pub module: String,

    /// Ability tokens held for the module
    #[serde(default)]
    pub values: Vec<Ability>,
}

impl AbilityGrant {
    /// Create a grant record for a module
    pub fn new(module: impl Into<String>, values: Vec<Ability>) -> Self {
        Self {
            module: module.into(),
            values,
        }
    }
}
