//! Navigation tree nodes
//!
//! The host application supplies trees in its JSON shape: a node carrying an
//! `items` array is a section, anything else is a leaf item. The tagged
//! representation makes the "leaf without access requirements is always
//! visible" rule an explicit case in the filter instead of a fallthrough.

use serde::{Deserialize, Serialize};
use shared::Ability;

/// A navigation tree node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MenuNode {
    /// A submenu with child nodes
    Section(MenuSection),
    /// A leaf entry, optionally gated by module abilities
    Item(MenuItem),
}

/// A leaf menu entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Display label
    pub label: String,

    /// Icon identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Navigation target path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,

    /// Module the entry is gated by
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    /// Abilities required to see the entry; any one suffices
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abilities: Option<Vec<Ability>>,
}

impl MenuItem {
    /// Create an unconditionally visible entry
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            icon: None,
            to: None,
            module: None,
            abilities: None,
        }
    }

    /// Builder: set the icon
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Builder: set the navigation target
    pub fn with_target(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    /// Builder: gate the entry on module abilities
    pub fn with_access(mut self, module: impl Into<String>, abilities: Vec<Ability>) -> Self {
        self.module = Some(module.into());
        self.abilities = Some(abilities);
        self
    }

    /// The access requirement, when the entry declares a complete one.
    ///
    /// A node with only one of `module`/`abilities` has no enforceable
    /// requirement and is treated as unconditionally visible.
    pub fn access(&self) -> Option<(&str, &[Ability])> {
        match (&self.module, &self.abilities) {
            (Some(module), Some(abilities)) => Some((module.as_str(), abilities.as_slice())),
            _ => None,
        }
    }
}

/// A submenu holding child nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuSection {
    /// Display label
    pub label: String,

    /// Icon identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Child nodes in display order
    pub items: Vec<MenuNode>,
}

impl MenuSection {
    /// Create a section with children
    pub fn new(label: impl Into<String>, items: Vec<MenuNode>) -> Self {
        Self {
            label: label.into(),
            icon: None,
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_without_items_field_parses_as_item() {
        let json = r#"{ "label": "Dashboard", "icon": "pi-home", "to": "/user/dash" }"#;
        let node: MenuNode = serde_json::from_str(json).unwrap();

        match node {
            MenuNode::Item(item) => {
                assert_eq!(item.label, "Dashboard");
                assert!(item.access().is_none());
            }
            MenuNode::Section(_) => panic!("expected an item"),
        }
    }

    #[test]
    fn test_node_with_items_parses_as_section() {
        let json = r#"{
            "label": "Product",
            "items": [
                { "label": "Users", "to": "/admin/users", "module": "users", "abilities": ["read", "*"] }
            ]
        }"#;

        let node: MenuNode = serde_json::from_str(json).unwrap();
        match node {
            MenuNode::Section(section) => {
                assert_eq!(section.items.len(), 1);
                match &section.items[0] {
                    MenuNode::Item(item) => {
                        let (module, abilities) = item.access().unwrap();
                        assert_eq!(module, "users");
                        assert_eq!(abilities, [Ability::named("read"), Ability::Any]);
                    }
                    _ => panic!("expected an item"),
                }
            }
            MenuNode::Item(_) => panic!("expected a section"),
        }
    }

    #[test]
    fn test_incomplete_access_is_none() {
        // abilities without a module is not an enforceable requirement
        let item = MenuItem {
            label: "Odd".to_string(),
            icon: None,
            to: None,
            module: None,
            abilities: Some(vec![Ability::named("read")]),
        };
        assert!(item.access().is_none());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let node = MenuNode::Section(MenuSection::new(
            "Product",
            vec![MenuNode::Item(
                MenuItem::new("Users")
                    .with_icon("pi-users")
                    .with_target("/admin/users")
                    .with_access("users", vec![Ability::named("read")]),
            )],
        ));

        let json = serde_json::to_string(&node).unwrap();
        let parsed: MenuNode = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, node);
    }
}
