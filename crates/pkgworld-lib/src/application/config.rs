//! Application configuration management
//!
//! Handles config loading, validation, and environment variable processing
//! following the precedence: defaults -> .env -> env vars -> CLI args.

use crate::primitives::*;
use crate::resolver::{MaxDepth, SessionFlags};
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

/// Default configuration values
pub mod defaults {
    pub const REGISTRY_FILE: &str = "pkgworld.toml";
    pub const MAX_DEPTH: &str = "0"; // Unlimited
    pub const LOG_LEVEL: &str = "0"; // Error-only logging by default
    pub const LOG_FORMAT: &str = "text";
    pub const LOG_OUTPUT: &str = "stderr";
    pub const COLOR: &str = "auto";
}

/// Default value functions for configuration fields
mod default_fns {
    use super::defaults;
    use crate::primitives::{ColorChoice, LogFormat, LogOutput};

    pub fn max_depth() -> i32 {
        defaults::MAX_DEPTH.parse().unwrap_or(0)
    }

    pub fn log_level() -> u8 {
        defaults::LOG_LEVEL.parse().unwrap_or(0)
    }

    pub fn log_format() -> LogFormat {
        defaults::LOG_FORMAT.parse().unwrap_or(LogFormat::Text)
    }

    pub fn log_output() -> LogOutput {
        defaults::LOG_OUTPUT.parse().unwrap_or(LogOutput::Stderr)
    }

    pub fn color() -> ColorChoice {
        defaults::COLOR.parse().unwrap_or(ColorChoice::Auto)
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Parser, Deserialize)]
pub struct AppConfig {
    /// Package registry manifest (TOML)
    #[arg(short, long, env = "PKGWORLD_REGISTRY")]
    #[serde(default)]
    pub registry: Option<PathBuf>,

    /// Maximum traversal depth (0 or negative = unlimited)
    #[arg(
        short = 'd',
        long,
        env = "PKGWORLD_MAX_DEPTH",
        default_value = defaults::MAX_DEPTH,
        allow_negative_numbers = true
    )]
    #[serde(default = "default_fns::max_depth")]
    pub max_depth: i32,

    /// Also walk private requirements (static linking)
    #[arg(short = 's', long = "static", env = "PKGWORLD_STATIC")]
    #[serde(default)]
    pub static_link: bool,

    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(long, env = "PKGWORLD_LOG_LEVEL", default_value = defaults::LOG_LEVEL)]
    #[serde(default = "default_fns::log_level")]
    pub log_level: u8,

    /// Output format (text, json, yaml)
    #[arg(long, env = "PKGWORLD_LOG_FORMAT", default_value = defaults::LOG_FORMAT)]
    #[serde(default = "default_fns::log_format")]
    pub log_format: LogFormat,

    /// Log output stream (stderr, stdout)
    #[arg(long, env = "PKGWORLD_LOG_OUTPUT", default_value = defaults::LOG_OUTPUT)]
    #[serde(default = "default_fns::log_output")]
    pub log_output: LogOutput,

    /// Color output control (auto, always, never)
    #[arg(short, long, env = "PKGWORLD_COLOR", default_value = defaults::COLOR)]
    #[serde(default = "default_fns::color")]
    pub color: ColorChoice,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            registry: None,
            max_depth: default_fns::max_depth(),
            static_link: false,
            log_level: default_fns::log_level(),
            log_format: default_fns::log_format(),
            log_output: default_fns::log_output(),
            color: default_fns::color(),
        }
    }
}

impl AppConfig {
    pub fn to_logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            level: LogLevel::from_verbosity(self.log_level),
            format: self.log_format,
            output: self.log_output,
            color: self.color,
        }
    }

    pub fn to_session_flags(&self) -> SessionFlags {
        SessionFlags {
            search_private: self.static_link,
            ..SessionFlags::default()
        }
    }

    pub fn max_depth(&self) -> MaxDepth {
        MaxDepth::from_raw(self.max_depth)
    }

    /// Merge this config with another, taking non-default values from other
    pub fn merge_with(mut self, other: Self) -> Self {
        if other.registry.is_some() {
            self.registry = other.registry;
        }

        if other.max_depth != default_fns::max_depth() {
            self.max_depth = other.max_depth;
        }
        if other.static_link {
            self.static_link = true;
        }
        if other.log_level != default_fns::log_level() {
            self.log_level = other.log_level;
        }

        if !matches!(other.log_format, LogFormat::Text) {
            self.log_format = other.log_format;
        }
        if !matches!(other.log_output, LogOutput::Stderr) {
            self.log_output = other.log_output;
        }
        if !matches!(other.color, ColorChoice::Auto) {
            self.color = other.color;
        }

        self
    }

    /// Validate the final configuration
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.log_level > 4 {
            return Err(ConfigError::ValidationFailed {
                reason: format!("log level {} is out of range 0-4", self.log_level),
            });
        }

        // Registry defaults to the manifest in the working directory
        let registry = match self.registry.take() {
            Some(path) => path,
            None => std::env::current_dir()?.join(defaults::REGISTRY_FILE),
        };
        if registry.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed {
                reason: "registry path is empty".to_string(),
            });
        }
        self.registry = Some(registry);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    include!("config.test.rs");
}
