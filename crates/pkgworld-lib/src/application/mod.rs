//! Application layer modules
//!
//! Organizes CLI interface, configuration management, and command execution.

pub mod cli;
pub mod commands;
pub mod config;
pub mod env;
pub mod loader;

// Re-export main types for convenience
pub use cli::{Cli, CliConfig, Commands};
pub use commands::{ReportEntry, WorldReport, execute_command, execute_command_with_config};
pub use config::AppConfig;
pub use env::EnvironmentConfig;
pub use loader::*;
