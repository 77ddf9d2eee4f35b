//! GrantTable - the mutable (module, action) → roles mapping
//!
//! The wire format is the JSON shape the owning application persists:
//! `{ moduleId: { actionId: [role, ...] } }`. Every mutation is local to the
//! owned table; nothing here performs I/O.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use shared::PermissionCatalog;

/// Mapping from module id → action id → granted role names.
///
/// Role lists are plain sequences; duplicates are not rejected at write time.
/// Queries never fail: unknown ids resolve to "not granted".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrantTable {
    grants: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

/// Entries a merge dropped because they do not resolve in the catalog.
///
/// Imports are lenient by policy, but drops are reported rather than silent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeReport {
    /// Foreign module ids not present in the catalog
    pub dropped_modules: Vec<String>,

    /// (module, action) pairs where the module exists but the action does not
    pub dropped_actions: Vec<(String, String)>,
}

impl MergeReport {
    /// Whether the merge kept every foreign entry
    pub fn is_clean(&self) -> bool {
        self.dropped_modules.is_empty() && self.dropped_actions.is_empty()
    }
}

/// An exported table with operator metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantSnapshot {
    /// When the export was taken
    pub exported_at: DateTime<Utc>,

    /// The table contents
    pub grants: GrantTable,
}

impl GrantTable {
    /// Build a table with an empty role list for every catalog (module, action)
    pub fn initialize(catalog: &PermissionCatalog) -> Self {
        let mut grants = BTreeMap::new();

        for module in &catalog.modules {
            let actions: BTreeMap<String, Vec<String>> = module
                .actions
                .iter()
                .map(|a| (a.id.clone(), Vec::new()))
                .collect();
            grants.insert(module.id.clone(), actions);
        }

        Self { grants }
    }

    /// Overlay a foreign table onto a freshly initialized one.
    ///
    /// Only (module, action) pairs defined by the catalog are carried over;
    /// everything else is dropped, logged, and listed in the report.
    pub fn merge(catalog: &PermissionCatalog, foreign: &GrantTable) -> (Self, MergeReport) {
        let mut table = Self::initialize(catalog);
        let mut report = MergeReport::default();

        for (module_id, actions) in &foreign.grants {
            let Some(known_actions) = table.grants.get_mut(module_id) else {
                warn!(module = %module_id, "dropping grants for unknown module");
                report.dropped_modules.push(module_id.clone());
                continue;
            };

            for (action_id, roles) in actions {
                match known_actions.get_mut(action_id) {
                    Some(slot) => *slot = roles.clone(),
                    None => {
                        warn!(
                            module = %module_id,
                            action = %action_id,
                            "dropping grants for unknown action"
                        );
                        report
                            .dropped_actions
                            .push((module_id.clone(), action_id.clone()));
                    }
                }
            }
        }

        (table, report)
    }

    /// Whether a role is granted an action. Missing keys yield `false`.
    pub fn has_permission(&self, module_id: &str, action_id: &str, role: &str) -> bool {
        self.grants
            .get(module_id)
            .and_then(|actions| actions.get(action_id))
            .map(|roles| roles.iter().any(|r| r == role))
            .unwrap_or(false)
    }

    /// Roles granted an action, empty for unknown keys
    pub fn roles(&self, module_id: &str, action_id: &str) -> &[String] {
        self.grants
            .get(module_id)
            .and_then(|actions| actions.get(action_id))
            .map(|roles| roles.as_slice())
            .unwrap_or(&[])
    }

    /// Flip a single grant for a role: remove the first occurrence if present,
    /// append otherwise. Missing module/action keys are created on demand.
    ///
    /// Applying this twice with the same arguments restores the original list.
    pub fn toggle_permission(&mut self, module_id: &str, action_id: &str, role: &str) {
        let roles = self
            .grants
            .entry(module_id.to_string())
            .or_default()
            .entry(action_id.to_string())
            .or_default();

        match roles.iter().position(|r| r == role) {
            Some(index) => {
                roles.remove(index);
            }
            None => roles.push(role.to_string()),
        }
    }

    /// Set every catalog action of a module to exactly `[role]` or `[]`.
    ///
    /// This overwrites any other roles previously granted for those actions;
    /// it is a destructive bulk operation, not an additive one. Unknown
    /// modules are ignored.
    pub fn toggle_module(
        &mut self,
        catalog: &PermissionCatalog,
        module_id: &str,
        role: &str,
        enabled: bool,
    ) {
        let Some(module) = catalog.module(module_id) else {
            return;
        };

        let actions = self.grants.entry(module_id.to_string()).or_default();
        for action in &module.actions {
            let roles = if enabled {
                vec![role.to_string()]
            } else {
                Vec::new()
            };
            actions.insert(action.id.clone(), roles);
        }
    }

    /// Apply [`toggle_module`](Self::toggle_module) to every module in a category
    pub fn toggle_category(
        &mut self,
        catalog: &PermissionCatalog,
        category_id: &str,
        role: &str,
        enabled: bool,
    ) {
        for module in catalog.modules_by_category(category_id) {
            self.toggle_module(catalog, &module.id, role, enabled);
        }
    }

    /// Deep-copy export in the persisted wire shape
    pub fn export(&self) -> GrantTable {
        self.clone()
    }

    /// Export wrapped with an `exportedAt` timestamp for operator tooling
    pub fn export_snapshot(&self) -> GrantSnapshot {
        GrantSnapshot {
            exported_at: Utc::now(),
            grants: self.clone(),
        }
    }

    /// Number of (module, action) pairs present
    pub fn len(&self) -> usize {
        self.grants.values().map(|actions| actions.len()).sum()
    }

    /// Whether the table holds no pairs at all
    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}
