//! CLI Commands

pub mod grants;
pub mod preview;
pub mod seal;

pub use grants::GrantsCommand;
pub use preview::PreviewCommand;
pub use seal::{OpenCommand, SealCommand};
