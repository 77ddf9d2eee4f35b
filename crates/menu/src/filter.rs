//! Ability-map construction and tree pruning
//!
//! Pure functions over immutable inputs; the filter never mutates the source
//! tree, it produces a filtered copy with order preserved.

use std::collections::HashMap;

use shared::{Ability, AbilityGrant, ROLE_SUPER};

use crate::node::MenuNode;

/// Module id → abilities held by the acting role
pub type AbilityMap = HashMap<String, Vec<Ability>>;

/// Flatten session ability records into a lookup map.
///
/// If a module id repeats, the last record wins; duplicates are not expected
/// from the session layer.
pub fn normalize_abilities(abilities: &[AbilityGrant]) -> AbilityMap {
    let mut map = AbilityMap::new();
    for grant in abilities {
        map.insert(grant.module.clone(), grant.values.clone());
    }
    map
}

/// Whether a role may see an entry gated by `required` abilities on `module`.
///
/// `super` always passes. Otherwise the role must hold abilities for the
/// module, and either side carrying the wildcard short-circuits to a pass:
/// holding `Any` grants everything on the module, and requiring `Any` means
/// any held ability suffices.
pub fn has_permission(
    role: &str,
    abilities: &AbilityMap,
    module: &str,
    required: &[Ability],
) -> bool {
    if role == ROLE_SUPER {
        return true;
    }

    let Some(held) = abilities.get(module) else {
        return false;
    };

    if held.iter().any(Ability::is_any) {
        return true;
    }
    if required.iter().any(Ability::is_any) {
        return true;
    }

    required.iter().any(|r| held.contains(r))
}

/// Prune a navigation tree to the entries a role may see.
///
/// - A section survives only if at least one child survives.
/// - An item without a complete access requirement is always kept.
/// - An item with module and abilities is kept iff [`has_permission`] passes.
///
/// Order is preserved; no node is duplicated or reordered.
pub fn filter_tree(nodes: &[MenuNode], role: &str, abilities: &AbilityMap) -> Vec<MenuNode> {
    nodes
        .iter()
        .filter_map(|node| match node {
            MenuNode::Section(section) => {
                let items = filter_tree(&section.items, role, abilities);
                if items.is_empty() {
                    None
                } else {
                    let mut filtered = section.clone();
                    filtered.items = items;
                    Some(MenuNode::Section(filtered))
                }
            }
            MenuNode::Item(item) => match item.access() {
                // Plain entries (e.g. a dashboard link) are always visible
                None => Some(node.clone()),
                Some((module, required)) => {
                    if has_permission(role, abilities, module, required) {
                        Some(node.clone())
                    } else {
                        None
                    }
                }
            },
        })
        .collect()
}
