//! Command implementations for the CLI

pub mod export;
pub mod list;
pub mod show;
