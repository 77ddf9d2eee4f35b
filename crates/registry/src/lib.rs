//! # Atrium Registry
//!
//! Role-based permission registry over a static catalog.
//!
//! ## Components
//!
//! - `GrantTable` - mutable (module, action) → roles mapping
//! - `PermissionEvaluator` - catalog-aware queries bound to an acting role

pub mod evaluator;
pub mod grant_table;

pub use evaluator::{GrantStats, PermissionEvaluator};
pub use grant_table::{GrantSnapshot, GrantTable, MergeReport};
