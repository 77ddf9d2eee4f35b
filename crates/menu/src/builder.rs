//! MenuBuilder - assembles the final menu for a session
//!
//! The host application supplies two static trees: the always-present user
//! tree, and a route-definition group whose visible children become the admin
//! section for privileged roles.

use serde::{Deserialize, Serialize};

use shared::{Ability, SessionClaims};

use crate::filter::{filter_tree, normalize_abilities};
use crate::node::{MenuItem, MenuNode, MenuSection};

/// A route-definition group (the admin router tree)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteGroup {
    /// Section label shown in the menu
    pub label: String,

    /// Section icon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Parent path segment, prefixed onto each child path
    pub path: String,

    /// Whether the group appears in menus at all
    #[serde(default)]
    pub visible: bool,

    /// Child route definitions
    #[serde(default)]
    pub children: Vec<RouteChild>,
}

/// A child route within a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteChild {
    /// Path segment, joined to the group path with `/`
    pub path: String,

    /// Module gating the route
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    /// Menu presentation; children without one never appear in menus
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu: Option<RouteMenu>,
}

/// Menu presentation of a route child
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMenu {
    /// Entry label
    pub label: String,

    /// Entry icon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Whether the entry appears in the menu
    #[serde(default)]
    pub visible: bool,

    /// Abilities required to see the entry
    #[serde(default)]
    pub abilities: Vec<Ability>,
}

/// Convert a route group into a menu section.
///
/// Child paths are joined as `{group.path}/{child.path}`; module and
/// abilities are copied from the child declaration. Returns `None` when the
/// group is not visible or no child has a visible menu entry.
pub fn build_admin_section(group: &RouteGroup) -> Option<MenuNode> {
    if !group.visible {
        return None;
    }

    let items: Vec<MenuNode> = group
        .children
        .iter()
        .filter_map(|child| {
            let menu = child.menu.as_ref()?;
            if !menu.visible {
                return None;
            }

            Some(MenuNode::Item(MenuItem {
                label: menu.label.clone(),
                icon: menu.icon.clone(),
                to: Some(format!("{}/{}", group.path, child.path)),
                module: child.module.clone(),
                abilities: Some(menu.abilities.clone()),
            }))
        })
        .collect();

    if items.is_empty() {
        return None;
    }

    Some(MenuNode::Section(MenuSection {
        label: group.label.clone(),
        icon: group.icon.clone(),
        items,
    }))
}

/// Builds the complete menu for an authenticated session
#[derive(Debug, Clone, Default)]
pub struct MenuBuilder {
    user_tree: Vec<MenuNode>,
    admin_routes: Option<RouteGroup>,
}

impl MenuBuilder {
    /// Create a builder over the always-present user tree
    pub fn new(user_tree: Vec<MenuNode>) -> Self {
        Self {
            user_tree,
            admin_routes: None,
        }
    }

    /// Builder: attach the admin route group
    pub fn with_admin_routes(mut self, routes: RouteGroup) -> Self {
        self.admin_routes = Some(routes);
        self
    }

    /// Load a user tree from a JSON file
    pub fn from_file(path: &std::path::Path) -> shared::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let user_tree: Vec<MenuNode> = serde_json::from_str(&content)?;
        Ok(Self::new(user_tree))
    }

    /// Generate the filtered menu for a session.
    ///
    /// The user tree is always filtered in. The admin section is appended
    /// only for `super` and `admin` roles, after converting the route group
    /// and filtering its entries against the session abilities.
    pub fn generate(&self, claims: &SessionClaims) -> Vec<MenuNode> {
        let abilities = normalize_abilities(&claims.abilities);
        let mut menu = filter_tree(&self.user_tree, &claims.role, &abilities);

        if claims.is_admin() {
            if let Some(section) = self.admin_routes.as_ref().and_then(build_admin_section) {
                let filtered = filter_tree(&[section], &claims.role, &abilities);
                menu.extend(filtered);
            }
        }

        menu
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::AbilityGrant;

    fn admin_routes() -> RouteGroup {
        RouteGroup {
            label: "Access Control".to_string(),
            icon: Some("pi-shield".to_string()),
            path: "/admin".to_string(),
            visible: true,
            children: vec![
                RouteChild {
                    path: "users".to_string(),
                    module: Some("users".to_string()),
                    menu: Some(RouteMenu {
                        label: "Users".to_string(),
                        icon: Some("pi-users".to_string()),
                        visible: true,
                        abilities: vec![Ability::named("read"), Ability::Any],
                    }),
                },
                RouteChild {
                    path: "internal".to_string(),
                    module: Some("settings".to_string()),
                    menu: Some(RouteMenu {
                        label: "Internal".to_string(),
                        icon: None,
                        visible: false,
                        abilities: vec![],
                    }),
                },
                RouteChild {
                    path: "callback".to_string(),
                    module: None,
                    menu: None,
                },
            ],
        }
    }

    fn user_tree() -> Vec<MenuNode> {
        vec![MenuNode::Item(
            MenuItem::new("Dashboard")
                .with_icon("pi-home")
                .with_target("/user/dash"),
        )]
    }

    // ============== build_admin_section Tests ==============

    #[test]
    fn test_build_admin_section_joins_paths() {
        let section = build_admin_section(&admin_routes()).unwrap();

        match section {
            MenuNode::Section(section) => {
                assert_eq!(section.label, "Access Control");
                // Only the visible menu child survives
                assert_eq!(section.items.len(), 1);
                match &section.items[0] {
                    MenuNode::Item(item) => {
                        assert_eq!(item.to.as_deref(), Some("/admin/users"));
                        assert_eq!(item.module.as_deref(), Some("users"));
                    }
                    _ => panic!("expected an item"),
                }
            }
            _ => panic!("expected a section"),
        }
    }

    #[test]
    fn test_invisible_group_yields_none() {
        let mut routes = admin_routes();
        routes.visible = false;
        assert!(build_admin_section(&routes).is_none());
    }

    #[test]
    fn test_group_without_visible_children_yields_none() {
        let mut routes = admin_routes();
        for child in &mut routes.children {
            if let Some(menu) = &mut child.menu {
                menu.visible = false;
            }
        }
        assert!(build_admin_section(&routes).is_none());
    }

    // ============== generate Tests ==============

    #[test]
    fn test_plain_user_gets_only_user_tree() {
        let builder = MenuBuilder::new(user_tree()).with_admin_routes(admin_routes());
        let claims = SessionClaims::new("user", vec![]);

        let menu = builder.generate(&claims);
        assert_eq!(menu.len(), 1);
        match &menu[0] {
            MenuNode::Item(item) => assert_eq!(item.label, "Dashboard"),
            _ => panic!("expected an item"),
        }
    }

    #[test]
    fn test_super_gets_admin_section() {
        let builder = MenuBuilder::new(user_tree()).with_admin_routes(admin_routes());
        let claims = SessionClaims::new("super", vec![]);

        let menu = builder.generate(&claims);
        assert_eq!(menu.len(), 2);
        assert!(matches!(menu[1], MenuNode::Section(_)));
    }

    #[test]
    fn test_admin_without_abilities_loses_gated_entries() {
        let builder = MenuBuilder::new(user_tree()).with_admin_routes(admin_routes());
        let claims = SessionClaims::new("admin", vec![]);

        // admin is not super: the Users entry requires abilities the role
        // does not hold, so the whole section collapses
        let menu = builder.generate(&claims);
        assert_eq!(menu.len(), 1);
    }

    #[test]
    fn test_admin_with_abilities_gets_section() {
        let builder = MenuBuilder::new(user_tree()).with_admin_routes(admin_routes());
        let claims = SessionClaims::new(
            "admin",
            vec![AbilityGrant::new("users", vec![Ability::named("read")])],
        );

        let menu = builder.generate(&claims);
        assert_eq!(menu.len(), 2);
    }

    #[test]
    fn test_privileged_user_role_does_not_get_admin_section() {
        let builder = MenuBuilder::new(user_tree()).with_admin_routes(admin_routes());
        let claims = SessionClaims::new(
            "user",
            vec![AbilityGrant::new("users", vec![Ability::Any])],
        );

        // Abilities alone do not unlock the admin group
        let menu = builder.generate(&claims);
        assert_eq!(menu.len(), 1);
    }

    #[test]
    fn test_route_group_deserializes_from_host_shape() {
        let json = r#"{
            "label": "Access Control",
            "path": "/admin",
            "visible": true,
            "children": [
                {
                    "path": "users",
                    "module": "users",
                    "menu": { "label": "Users", "visible": true, "abilities": ["read", "*"] }
                }
            ]
        }"#;

        let group: RouteGroup = serde_json::from_str(json).unwrap();
        assert_eq!(group, RouteGroup {
            label: "Access Control".to_string(),
            icon: None,
            path: "/admin".to_string(),
            visible: true,
            children: vec![RouteChild {
                path: "users".to_string(),
                module: Some("users".to_string()),
                menu: Some(RouteMenu {
                    label: "Users".to_string(),
                    icon: None,
                    visible: true,
                    abilities: vec![Ability::named("read"), Ability::Any],
                }),
            }],
        });
    }
}
