//! Static permission catalog: categories, modules, and their actions
//!
//! The catalog is defined once at startup and never mutated. Grant tables are
//! always interpreted against a catalog; entries that do not resolve here are
//! dropped on import.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use crate::error::CatalogError;

/// Grouping for permission modules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionCategory {
    /// Unique category identifier (e.g. `management`)
    pub id: String,

    /// Human-readable category name
    pub name: String,

    /// Display order, ascending
    #[serde(default)]
    pub order: u32,
}

/// A grantable operation within a module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionAction {
    /// Action identifier, unique within its module only
    pub id: String,

    /// Human-readable action name
    pub name: String,

    /// Optional longer description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PermissionAction {
    /// Create an action without a description
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
        }
    }

    /// Builder: set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A functional area of the application grouping related actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionModule {
    /// Globally unique module identifier (e.g. `users`)
    pub id: String,

    /// Human-readable module name
    pub name: String,

    /// Module description, searched by [`filter`](crate::PermissionCatalog)
    #[serde(default)]
    pub description: String,

    /// Category this module belongs to
    pub category: String,

    /// Ordered action list
    pub actions: Vec<PermissionAction>,
}

impl PermissionModule {
    /// Look up an action by id
    pub fn action(&self, action_id: &str) -> Option<&PermissionAction> {
        self.actions.iter().find(|a| a.id == action_id)
    }

    /// Whether the module defines the given action
    pub fn has_action(&self, action_id: &str) -> bool {
        self.action(action_id).is_some()
    }
}

/// The full permission catalog supplied by configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionCatalog {
    /// Categories in display order
    pub categories: Vec<PermissionCategory>,

    /// Modules in insertion order
    pub modules: Vec<PermissionModule>,
}

impl PermissionCatalog {
    /// Look up a module by id
    pub fn module(&self, module_id: &str) -> Option<&PermissionModule> {
        self.modules.iter().find(|m| m.id == module_id)
    }

    /// Look up a category by id
    pub fn category(&self, category_id: &str) -> Option<&PermissionCategory> {
        self.categories.iter().find(|c| c.id == category_id)
    }

    /// Modules belonging to a category, in insertion order
    pub fn modules_by_category(&self, category_id: &str) -> Vec<&PermissionModule> {
        self.modules
            .iter()
            .filter(|m| m.category == category_id)
            .collect()
    }

    /// All module ids in insertion order
    pub fn module_ids(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.id.as_str()).collect()
    }

    /// Load a catalog from a YAML or JSON file, validated
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;

        let catalog: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            _ => {
                return Err(CatalogError::UnsupportedFormat {
                    path: path.display().to_string(),
                })
            }
        };

        catalog.validate()?;
        Ok(catalog)
    }

    /// Validate structural invariants.
    ///
    /// Duplicate module ids and duplicate action ids within a module are
    /// errors. A module referencing an undeclared category is tolerated but
    /// logged, matching the lenient policy applied to grant imports.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for (i, module) in self.modules.iter().enumerate() {
            if self.modules[..i].iter().any(|m| m.id == module.id) {
                return Err(CatalogError::DuplicateModule {
                    module_id: module.id.clone(),
                });
            }

            for (j, action) in module.actions.iter().enumerate() {
                if module.actions[..j].iter().any(|a| a.id == action.id) {
                    return Err(CatalogError::DuplicateAction {
                        module_id: module.id.clone(),
                        action_id: action.id.clone(),
                    });
                }
            }

            if self.category(&module.category).is_none() {
                warn!(
                    module = %module.id,
                    category = %module.category,
                    "module references undeclared category"
                );
            }
        }

        Ok(())
    }

    /// The standard Atrium catalog: five categories, eleven modules.
    pub fn standard() -> Self {
        let catalog = Self {
            categories: vec![
                category("core", "System", 1),
                category("management", "Management", 2),
                category("reports", "Reports", 3),
                category("finance", "Finance", 4),
                category("operations", "Operations", 5),
            ],
            modules: vec![
                PermissionModule {
                    id: "users".to_string(),
                    name: "Users".to_string(),
                    description: "System user management".to_string(),
                    category: "management".to_string(),
                    actions: crud_actions(),
                },
                PermissionModule {
                    id: "roles".to_string(),
                    name: "Access Roles".to_string(),
                    description: "Role and permission management".to_string(),
                    category: "management".to_string(),
                    actions: with_extra(
                        crud_actions(),
                        vec![PermissionAction::new("assign", "Assign")
                            .with_description("Assign roles to users")],
                    ),
                },
                PermissionModule {
                    id: "settings".to_string(),
                    name: "Settings".to_string(),
                    description: "System configuration".to_string(),
                    category: "core".to_string(),
                    actions: vec![
                        PermissionAction::new("read", "View"),
                        PermissionAction::new("update", "Edit"),
                    ],
                },
                PermissionModule {
                    id: "dashboard".to_string(),
                    name: "Dashboard".to_string(),
                    description: "Main panel access".to_string(),
                    category: "core".to_string(),
                    actions: vec![
                        PermissionAction::new("read", "View"),
                        PermissionAction::new("customize", "Customize")
                            .with_description("Customize widgets"),
                        PermissionAction::new("export", "Export")
                            .with_description("Export dashboard data"),
                    ],
                },
                PermissionModule {
                    id: "reports".to_string(),
                    name: "Reports".to_string(),
                    description: "Report generation and viewing".to_string(),
                    category: "reports".to_string(),
                    actions: vec![
                        PermissionAction::new("read", "View"),
                        PermissionAction::new("create", "Create"),
                        PermissionAction::new("export", "Export")
                            .with_description("Export reports"),
                        PermissionAction::new("share", "Share")
                            .with_description("Share with others"),
                        PermissionAction::new("schedule", "Schedule")
                            .with_description("Schedule generation"),
                    ],
                },
                PermissionModule {
                    id: "analytics".to_string(),
                    name: "Analytics".to_string(),
                    description: "Advanced analytics and metrics".to_string(),
                    category: "reports".to_string(),
                    actions: vec![
                        PermissionAction::new("read", "View"),
                        PermissionAction::new("export", "Export"),
                    ],
                },
                PermissionModule {
                    id: "invoices".to_string(),
                    name: "Invoices".to_string(),
                    description: "Invoice management".to_string(),
                    category: "finance".to_string(),
                    actions: with_extra(
                        crud_actions(),
                        vec![
                            PermissionAction::new("approve", "Approve")
                                .with_description("Approve invoices"),
                            PermissionAction::new("cancel", "Cancel")
                                .with_description("Cancel invoices"),
                        ],
                    ),
                },
                PermissionModule {
                    id: "payments".to_string(),
                    name: "Payments".to_string(),
                    description: "Payment processing".to_string(),
                    category: "finance".to_string(),
                    actions: vec![
                        PermissionAction::new("read", "View"),
                        PermissionAction::new("process", "Process")
                            .with_description("Process payments"),
                        PermissionAction::new("refund", "Refund")
                            .with_description("Process refunds"),
                    ],
                },
                PermissionModule {
                    id: "projects".to_string(),
                    name: "Projects".to_string(),
                    description: "Project management".to_string(),
                    category: "operations".to_string(),
                    actions: crud_actions(),
                },
                PermissionModule {
                    id: "tasks".to_string(),
                    name: "Tasks".to_string(),
                    description: "Task management".to_string(),
                    category: "operations".to_string(),
                    actions: with_extra(
                        crud_actions(),
                        vec![
                            PermissionAction::new("assign", "Assign")
                                .with_description("Assign to users"),
                            PermissionAction::new("complete", "Complete")
                                .with_description("Mark as completed"),
                        ],
                    ),
                },
                PermissionModule {
                    id: "clients".to_string(),
                    name: "Clients".to_string(),
                    description: "Client management".to_string(),
                    category: "operations".to_string(),
                    actions: with_extra(
                        crud_actions(),
                        vec![PermissionAction::new("export", "Export")],
                    ),
                },
            ],
        };

        debug_assert!(catalog.validate().is_ok());
        catalog
    }
}

fn category(id: &str, name: &str, order: u32) -> PermissionCategory {
    PermissionCategory {
        id: id.to_string(),
        name: name.to_string(),
        order,
    }
}

/// The standard CRUD action set shared by several modules
fn crud_actions() -> Vec<PermissionAction> {
    vec![
        PermissionAction::new("read", "View").with_description("View listings and details"),
        PermissionAction::new("create", "Create").with_description("Add new records"),
        PermissionAction::new("update", "Edit").with_description("Modify existing records"),
        PermissionAction::new("delete", "Delete").with_description("Remove records"),
    ]
}

fn with_extra(
    mut actions: Vec<PermissionAction>,
    extra: Vec<PermissionAction>,
) -> Vec<PermissionAction> {
    actions.extend(extra);
    actions
}
