//! # Atrium Menu
//!
//! Authorization filter for navigation trees.
//!
//! ## Components
//!
//! - `MenuNode` - tagged navigation tree (`Item` | `Section`)
//! - `filter` - ability-map construction and tree pruning
//! - `MenuBuilder` - assembles the final menu from the user tree and the
//!   admin route group

pub mod builder;
pub mod filter;
pub mod node;

pub use builder::{MenuBuilder, RouteChild, RouteGroup, RouteMenu};
pub use filter::{filter_tree, has_permission, normalize_abilities, AbilityMap};
pub use node::{MenuItem, MenuNode, MenuSection};
