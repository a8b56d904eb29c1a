//! Subcommand implementations.

pub mod audit;
pub mod init;
pub mod list_rules;
pub mod output;
