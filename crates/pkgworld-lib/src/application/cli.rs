use crate::primitives::ConfigError;
use clap::{Parser, Subcommand};

use super::config::AppConfig;

/// pkgworld CLI - resolve package requests into one dependency world
#[derive(Debug, Clone, Parser)]
#[command(name = "pkgworld")]
#[command(about = "Resolve package requests into a flattened dependency world")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    /// pkgworld commands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration loaded from CLI
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub app_config: AppConfig,
    pub command: Option<Commands>,
}

impl CliConfig {
    /// Load configuration from command line arguments
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Cli::parse().into())
    }
}

impl From<Cli> for CliConfig {
    fn from(cli: Cli) -> Self {
        Self {
            app_config: cli.config,
            command: cli.command,
        }
    }
}

/// Available pkgworld commands
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Resolve atoms and print the world's requirement lists
    Resolve {
        /// Package atoms, e.g. "libfoo >= 1.2"
        #[arg(required = true, help = "Package atoms to resolve")]
        atoms: Vec<String>,

        /// Print the world as JSON
        #[arg(long, help = "Emit the resolved world as JSON")]
        json: bool,
    },

    /// Check that atoms resolve; reports through the exit status
    Validate {
        /// Package atoms, e.g. "libfoo >= 1.2"
        #[arg(required = true, help = "Package atoms to validate")]
        atoms: Vec<String>,
    },

    /// List packages in the registry
    List,
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            command: None,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}
