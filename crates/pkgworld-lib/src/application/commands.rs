//! Command execution handlers
//!
//! Each handler builds a resolver [`Session`] over the configured registry
//! and writes its report to the supplied writer.

use crate::application::{AppConfig, CliConfig, Commands};
use crate::resolver::{Dependency, MaxDepth, Package, PackageMatcher, Queue, Registry, Session};
use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::io::Write;
use tracing::{debug, info};

/// One resolved entry in a world report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub id: String,
    pub name: String,
    pub version: Option<String>,
    /// The atom that pulled the package in
    pub atom: String,
    pub hits: u64,
}

/// Serializable view of a flattened world
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorldReport {
    /// Effective depth limit, `-1` for unlimited
    pub max_depth: i32,
    pub required: Vec<ReportEntry>,
    pub requires_private: Vec<ReportEntry>,
}

impl WorldReport {
    pub fn new<M: PackageMatcher>(session: &Session<M>, world: &Package, maxdepth: MaxDepth) -> Self {
        let entries = |list: &[Dependency]| {
            list.iter()
                .filter_map(|dep| {
                    let package = session.matcher().package(dep.matched()?);
                    Some(ReportEntry {
                        id: package.id.clone(),
                        name: package.realname.clone(),
                        version: package.version.clone(),
                        atom: dep.to_atom(),
                        hits: package.hits(),
                    })
                })
                .collect()
        };

        Self {
            max_depth: maxdepth.as_raw(),
            required: entries(&world.required),
            requires_private: entries(&world.requires_private),
        }
    }

    /// Plain text rendering: one id per line under a header per list
    pub fn write_text(&self, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "[required]")?;
        for entry in &self.required {
            writeln!(out, "{}", entry.id)?;
        }
        writeln!(out, "[requires_private]")?;
        for entry in &self.requires_private {
            writeln!(out, "{}", entry.id)?;
        }
        Ok(())
    }
}

/// Execute CLI commands against the configured registry
pub fn execute_command(config: CliConfig, out: &mut dyn Write) -> Result<()> {
    let command = match config.command {
        Some(cmd) => cmd,
        None => {
            writeln!(out, "pkgworld - resolve package requests into one dependency world")?;
            writeln!(out, "Run 'pkgworld --help' for usage information")?;
            return Ok(());
        }
    };

    execute_command_with_config(command, &config.app_config, out)
}

/// Execute a specific command with a provided configuration (for testing)
pub fn execute_command_with_config(
    command: Commands,
    config: &AppConfig,
    out: &mut dyn Write,
) -> Result<()> {
    let registry = load_registry(config)?;

    match command {
        Commands::Resolve { atoms, json } => handle_resolve(registry, config, &atoms, json, out),
        Commands::Validate { atoms } => handle_validate(registry, config, &atoms, out),
        Commands::List => handle_list(&registry, out),
    }
}

fn load_registry(config: &AppConfig) -> Result<Registry> {
    let path = config
        .registry
        .as_deref()
        .context("No registry manifest configured")?;

    Registry::load(path)
        .with_context(|| format!("Failed to load registry from {}", path.display()))
}

fn session_for(registry: Registry, config: &AppConfig) -> Session {
    Session::new(registry).with_flags(config.to_session_flags())
}

fn handle_resolve(
    registry: Registry,
    config: &AppConfig,
    atoms: &[String],
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let mut session = session_for(registry, config);
    let queue: Queue = atoms.iter().collect();
    let mut report = None;

    let resolved = session.apply(
        &queue,
        |session, world, maxdepth| {
            report = Some(WorldReport::new(session, world, maxdepth));
            true
        },
        config.max_depth(),
    );

    let Some(report) = report.filter(|_| resolved) else {
        bail!("Failed to resolve: {}", atoms.join(", "));
    };

    info!(
        required = report.required.len(),
        requires_private = report.requires_private.len(),
        "resolved world"
    );

    if json {
        serde_json::to_writer_pretty(&mut *out, &report).context("Failed to write JSON report")?;
        writeln!(out)?;
    } else {
        report.write_text(out)?;
    }
    Ok(())
}

fn handle_validate(
    registry: Registry,
    config: &AppConfig,
    atoms: &[String],
    out: &mut dyn Write,
) -> Result<()> {
    let mut session = session_for(registry, config);
    let queue: Queue = atoms.iter().collect();

    if !session.validate(&queue, config.max_depth()) {
        bail!("Validation failed: {}", atoms.join(", "));
    }

    debug!(atoms = atoms.len(), "validated");
    writeln!(out, "ok")?;
    Ok(())
}

fn handle_list(registry: &Registry, out: &mut dyn Write) -> Result<()> {
    for (_, package) in registry.iter() {
        match &package.version {
            Some(version) => writeln!(out, "{} {}", package.id, version)?,
            None => writeln!(out, "{}", package.id)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}
