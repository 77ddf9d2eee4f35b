//! # Atrium CLI
//!
//! Command implementations for the `atrium` binary.

pub mod commands;
