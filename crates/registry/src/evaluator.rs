//! PermissionEvaluator - catalog-aware grant queries bound to an acting role

use shared::{PermissionCatalog, PermissionModule};

use crate::grant_table::{GrantSnapshot, GrantTable, MergeReport};

/// Grant coverage for a module, category, or the whole catalog
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrantStats {
    /// Number of actions considered
    pub total: usize,

    /// Actions granted to the bound role
    pub granted: usize,

    /// `granted / total * 100`, `0.0` when total is zero
    pub percentage: f64,
}

impl GrantStats {
    fn new(total: usize, granted: usize) -> Self {
        let percentage = if total > 0 {
            granted as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        Self {
            total,
            granted,
            percentage,
        }
    }
}

/// Evaluates and mutates a grant table for one acting role.
///
/// Owns the catalog and the table; callers that share an evaluator across
/// threads must serialize their own mutations.
#[derive(Debug)]
pub struct PermissionEvaluator {
    catalog: PermissionCatalog,
    grants: GrantTable,
    role: String,
}

impl PermissionEvaluator {
    /// Create an evaluator with a freshly initialized table
    pub fn new(catalog: PermissionCatalog, role: impl Into<String>) -> Self {
        let grants = GrantTable::initialize(&catalog);
        Self {
            catalog,
            grants,
            role: role.into(),
        }
    }

    /// Create an evaluator seeded from a stored table.
    ///
    /// The seed routes through [`GrantTable::merge`], so entries that do not
    /// resolve in the catalog are dropped; the report says which.
    pub fn with_seed(
        catalog: PermissionCatalog,
        role: impl Into<String>,
        seed: &GrantTable,
    ) -> (Self, MergeReport) {
        let (grants, report) = GrantTable::merge(&catalog, seed);
        (
            Self {
                catalog,
                grants,
                role: role.into(),
            },
            report,
        )
    }

    /// The bound role
    pub fn role(&self) -> &str {
        &self.role
    }

    /// The static catalog
    pub fn catalog(&self) -> &PermissionCatalog {
        &self.catalog
    }

    /// Read access to the underlying table
    pub fn grants(&self) -> &GrantTable {
        &self.grants
    }

    /// Whether the bound role is granted an action
    pub fn has_permission(&self, module_id: &str, action_id: &str) -> bool {
        self.grants.has_permission(module_id, action_id, &self.role)
    }

    /// Flip a single grant for the bound role
    pub fn toggle_permission(&mut self, module_id: &str, action_id: &str) {
        let role = self.role.clone();
        self.grants.toggle_permission(module_id, action_id, &role);
    }

    /// Grant or revoke every action of a module for the bound role
    pub fn toggle_module(&mut self, module_id: &str, enabled: bool) {
        let role = self.role.clone();
        self.grants
            .toggle_module(&self.catalog, module_id, &role, enabled);
    }

    /// Grant or revoke every module of a category for the bound role
    pub fn toggle_category(&mut self, category_id: &str, enabled: bool) {
        let role = self.role.clone();
        self.grants
            .toggle_category(&self.catalog, category_id, &role, enabled);
    }

    /// Grant coverage for one module. Unknown modules report zero.
    pub fn module_stats(&self, module_id: &str) -> GrantStats {
        let Some(module) = self.catalog.module(module_id) else {
            return GrantStats::new(0, 0);
        };

        let total = module.actions.len();
        let granted = module
            .actions
            .iter()
            .filter(|a| self.has_permission(module_id, &a.id))
            .count();
        GrantStats::new(total, granted)
    }

    /// Grant coverage summed over a category's modules
    pub fn category_stats(&self, category_id: &str) -> GrantStats {
        let mut total = 0;
        let mut granted = 0;

        for module in self.catalog.modules_by_category(category_id) {
            let stats = self.module_stats(&module.id);
            total += stats.total;
            granted += stats.granted;
        }

        GrantStats::new(total, granted)
    }

    /// Grant coverage over the whole catalog
    pub fn total_stats(&self) -> GrantStats {
        let mut total = 0;
        let mut granted = 0;

        for module in &self.catalog.modules {
            let stats = self.module_stats(&module.id);
            total += stats.total;
            granted += stats.granted;
        }

        GrantStats::new(total, granted)
    }

    /// Whether every action of the module is granted to the bound role
    pub fn is_module_fully_granted(&self, module_id: &str) -> bool {
        let Some(module) = self.catalog.module(module_id) else {
            return false;
        };

        module
            .actions
            .iter()
            .all(|a| self.has_permission(module_id, &a.id))
    }

    /// Whether every module of the category is fully granted
    pub fn is_category_fully_granted(&self, category_id: &str) -> bool {
        self.catalog
            .modules_by_category(category_id)
            .iter()
            .all(|m| self.is_module_fully_granted(&m.id))
    }

    /// Case-insensitive substring search over module and action names and
    /// descriptions. A blank query returns the full catalog in order;
    /// surrounding whitespace in a non-blank query is part of the match.
    pub fn filter_modules(&self, query: &str) -> Vec<&PermissionModule> {
        if query.trim().is_empty() {
            return self.catalog.modules.iter().collect();
        }
        let query = query.to_lowercase();

        self.catalog
            .modules
            .iter()
            .filter(|module| {
                module.name.to_lowercase().contains(&query)
                    || module.description.to_lowercase().contains(&query)
                    || module.actions.iter().any(|action| {
                        action.name.to_lowercase().contains(&query)
                            || action
                                .description
                                .as_deref()
                                .is_some_and(|d| d.to_lowercase().contains(&query))
                    })
            })
            .collect()
    }

    /// Deep-copy export in the persisted wire shape
    pub fn export(&self) -> GrantTable {
        self.grants.export()
    }

    /// Export with operator metadata
    pub fn export_snapshot(&self) -> GrantSnapshot {
        self.grants.export_snapshot()
    }

    /// Replace the table with a merge of the imported data.
    ///
    /// Not a faithful round-trip when the data contains entries outside the
    /// current catalog; those are dropped and reported.
    pub fn import(&mut self, data: &GrantTable) -> MergeReport {
        let (grants, report) = GrantTable::merge(&self.catalog, data);
        self.grants = grants;
        report
    }

    /// Reset to a freshly initialized table
    pub fn reset(&mut self) {
        self.grants = GrantTable::initialize(&self.catalog);
    }
}
