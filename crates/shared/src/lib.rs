//! # Atrium Shared
//!
//! Common types and interfaces used across all Atrium access-control crates.

pub mod ability;
pub mod catalog;
pub mod config;
pub mod error;
pub mod session;

// Re-exports
pub use ability::*;
pub use catalog::*;
pub use config::*;
pub use error::*;
pub use session::*;
