//! # pkgworld Library
//!
//! Resolves package requests into one flattened dependency world.
//!
//! ## Core Modules
//!
//! - [`resolver`] - Queue, compiler, traversal, collector, flattener and orchestrator
//! - [`primitives`] - Foundation types and errors
//! - [`logger`] - Structured logging setup
//! - [`application`] - CLI interface and configuration management
//!
//! ## Quick Start
//!
//! ```no_run
//! pkgworld_lib::main().unwrap();
//! ```

pub mod application;
pub mod logger;
pub mod primitives;
pub mod resolver;

// Re-export commonly used types for convenience
pub use application::{AppConfig, Cli, Commands, execute_command};
pub use logger::Logger;
pub use primitives::{ColorChoice, ConfigError, LogFormat, LogLevel, LogOutput, LoggerError};
pub use resolver::{MaxDepth, Package, Queue, Registry, ResolveError, Session};

// Private imports for the main function
use anyhow::Result;
use application::{CliConfig, load_env_files};

pub fn main() -> Result<()> {
    // .env values must be visible before clap reads PKGWORLD_* variables
    load_env_files()?;
    let cli = CliConfig::load()?;

    let app_config = AppConfig::load_with(cli.app_config)?;
    Logger::init(app_config.to_logger_config())?;
    AppConfig::init_global(app_config.clone())?;

    let stdout = std::io::stdout();
    execute_command(
        CliConfig {
            app_config,
            command: cli.command,
        },
        &mut stdout.lock(),
    )
}
