//! Package nodes, the package registry and dependency matching
//!
//! Packages live in a [`Registry`] arena and are referred to by
//! [`PackageId`]. Dependency records only ever hold ids, so dropping a record
//! never drops the package it matched.

use std::collections::HashMap;
use std::ops::BitOr;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, trace};

use super::dependency::{self, Dependency};
use super::version::Constraint;

/// Identifier of the synthetic root package
pub const WORLD_ID: &str = "virtual:world";

/// Display name of the synthetic root package
pub const WORLD_NAME: &str = "virtual world package";

/// Errors from loading or populating a registry
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to read registry manifest: {path}: {source}")]
    FileReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse registry manifest: {source}")]
    TomlParseError {
        #[from]
        source: toml::de::Error,
    },

    #[error("Duplicate package id in registry: {id}")]
    DuplicatePackage { id: String },

    #[error("Invalid package id: '{id}'")]
    InvalidPackageId { id: String },
}

/// Reasons a single dependency record fails to resolve
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("package '{package}' not found")]
    NotFound { package: String },

    #[error("package '{package}' version {found} does not satisfy '{wanted}'")]
    VersionMismatch {
        package: String,
        wanted: String,
        found: String,
    },
}

/// Handle into the registry arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageId(usize);

impl PackageId {
    /// Ids are minted by the registry that owns the package
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Package property flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PackageFlags(u8);

impl PackageFlags {
    pub const NONE: Self = Self(0);
    pub const STATIC: Self = Self(1 << 0);
    pub const VIRTUAL: Self = Self(1 << 1);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }
}

impl BitOr for PackageFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// A package node: a resolved package or the synthetic world root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Stable identifier, also the key for logical identity
    pub id: String,
    /// Display name
    pub realname: String,
    pub version: Option<String>,
    pub flags: PackageFlags,
    /// Public requirements
    pub required: Vec<Dependency>,
    /// Private (link-only) requirements
    pub requires_private: Vec<Dependency>,
    /// Virtual names this package answers to
    pub provides: Vec<Dependency>,
    hits: u64,
}

impl Package {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            realname: id.clone(),
            id,
            version: None,
            flags: PackageFlags::NONE,
            required: Vec::new(),
            requires_private: Vec::new(),
            provides: Vec::new(),
            hits: 0,
        }
    }

    /// The synthetic root all requested packages hang off
    pub fn world() -> Self {
        Self {
            realname: WORLD_NAME.to_string(),
            flags: PackageFlags::STATIC | PackageFlags::VIRTUAL,
            ..Self::new(WORLD_ID)
        }
    }

    pub fn with_name(mut self, realname: impl Into<String>) -> Self {
        self.realname = realname.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Append public requirements parsed from atom text
    pub fn with_requires(mut self, atoms: &str) -> Self {
        self.required.extend(dependency::parse(atoms));
        self
    }

    /// Append private requirements parsed from atom text
    pub fn with_requires_private(mut self, atoms: &str) -> Self {
        self.requires_private.extend(dependency::parse(atoms));
        self
    }

    /// Append provided aliases parsed from atom text (`name` or `name = version`)
    pub fn with_provides(mut self, atoms: &str) -> Self {
        self.provides.extend(dependency::parse(atoms));
        self
    }

    pub fn is_virtual(&self) -> bool {
        self.flags.contains(PackageFlags::VIRTUAL)
    }

    pub fn is_static(&self) -> bool {
        self.flags.contains(PackageFlags::STATIC)
    }

    /// Number of fresh resolutions that landed on this package
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Version this package offers under `name`, if it answers to it at all
    fn provided_version(&self, name: &str) -> Option<Option<&str>> {
        if self.id == name {
            return Some(self.version.as_deref());
        }
        self.provides
            .iter()
            .find(|provide| provide.package == name)
            .map(|provide| match &provide.constraint {
                Some(constraint) => Some(constraint.version.as_str()),
                None => self.version.as_deref(),
            })
    }
}

/// Resolves dependency records to packages
///
/// Implementations own the packages they hand out ids for. Every fresh
/// resolution increments the matched package's hits; a record that already
/// carries a match is answered from that match without counting again.
pub trait PackageMatcher {
    /// Look up a package by an id this matcher handed out
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this matcher.
    fn package(&self, id: PackageId) -> &Package;

    /// Mutable counterpart of [`PackageMatcher::package`]; panics the same way
    fn package_mut(&mut self, id: PackageId) -> &mut Package;

    /// Resolve `dep`, checking `constraint` instead of the record's own when given
    fn verify_dependency(
        &mut self,
        dep: &mut Dependency,
        constraint: Option<&Constraint>,
    ) -> Result<PackageId, MatchError>;

    /// Forget the hits and cached matches left behind by earlier passes
    fn reset_pass(&mut self);
}

/// Arena of known packages
#[derive(Debug, Clone, Default)]
pub struct Registry {
    packages: Vec<Package>,
    index: HashMap<String, PackageId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package, rejecting ids that are already taken
    pub fn insert(&mut self, package: Package) -> Result<PackageId, RegistryError> {
        if package.id.is_empty() || package.id == WORLD_ID {
            return Err(RegistryError::InvalidPackageId { id: package.id });
        }
        if self.index.contains_key(&package.id) {
            return Err(RegistryError::DuplicatePackage { id: package.id });
        }

        let id = PackageId(self.packages.len());
        trace!(package = %package.id, index = id.0, "registering package");
        self.index.insert(package.id.clone(), id);
        self.packages.push(package);
        Ok(id)
    }

    /// Look a package up by its own identifier
    pub fn find(&self, name: &str) -> Option<PackageId> {
        self.index.get(name).copied()
    }

    /// Find the first package (in registration order) answering to `name`
    /// whose offered version satisfies `constraint`
    pub fn find_provider(&self, name: &str, constraint: Option<&Constraint>) -> Option<PackageId> {
        self.packages.iter().enumerate().find_map(|(index, package)| {
            let version = package.provided_version(name)?;
            let satisfied = constraint.is_none_or(|c| c.satisfied_by(version));
            satisfied.then_some(PackageId(index))
        })
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PackageId, &Package)> {
        self.packages
            .iter()
            .enumerate()
            .map(|(index, package)| (PackageId(index), package))
    }

    /// Build a registry from a TOML manifest of `[[package]]` tables
    pub fn from_toml_str(content: &str) -> Result<Self, RegistryError> {
        let manifest: Manifest = toml::from_str(content)?;
        let mut registry = Self::new();

        for entry in manifest.packages {
            let mut package = Package::new(entry.id)
                .with_requires(&entry.requires)
                .with_requires_private(&entry.requires_private)
                .with_provides(&entry.provides);
            if let Some(name) = entry.name {
                package.realname = name;
            }
            package.version = entry.version;
            if entry.r#static {
                package.flags.insert(PackageFlags::STATIC);
            }
            registry.insert(package)?;
        }

        debug!(packages = registry.len(), "loaded registry manifest");
        Ok(registry)
    }

    /// Read and parse a registry manifest file
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        trace!("Reading registry manifest: {}", path.display());

        let content =
            std::fs::read_to_string(path).map_err(|e| RegistryError::FileReadError {
                path: path.to_path_buf(),
                source: e,
            })?;

        Self::from_toml_str(&content)
    }
}

impl PackageMatcher for Registry {
    fn package(&self, id: PackageId) -> &Package {
        &self.packages[id.0]
    }

    fn package_mut(&mut self, id: PackageId) -> &mut Package {
        &mut self.packages[id.0]
    }

    fn verify_dependency(
        &mut self,
        dep: &mut Dependency,
        constraint: Option<&Constraint>,
    ) -> Result<PackageId, MatchError> {
        if let Some(id) = dep.matched() {
            trace!(dependency = %dep.package, package = %self.packages[id.0].id, "cached dependency");
            return Ok(id);
        }

        let constraint = constraint.or(dep.constraint.as_ref());

        let Some(id) = self.find(&dep.package) else {
            let id = self
                .find_provider(&dep.package, constraint)
                .ok_or_else(|| MatchError::NotFound {
                    package: dep.package.clone(),
                })?;
            return Ok(self.record_match(dep, id));
        };

        if let Some(constraint) = constraint {
            let found = self.packages[id.0].version.clone();
            if !constraint.satisfied_by(found.as_deref()) {
                // A provider may still offer a satisfying version
                return match self.find_provider(&dep.package, Some(constraint)) {
                    Some(provider) if provider != id => Ok(self.record_match(dep, provider)),
                    _ => Err(MatchError::VersionMismatch {
                        package: dep.package.clone(),
                        wanted: constraint.to_string(),
                        found: found.unwrap_or_default(),
                    }),
                };
            }
        }

        Ok(self.record_match(dep, id))
    }

    fn reset_pass(&mut self) {
        for package in &mut self.packages {
            package.hits = 0;
            for dep in package
                .required
                .iter_mut()
                .chain(package.requires_private.iter_mut())
            {
                dep.set_match(None);
            }
        }
        trace!(packages = self.packages.len(), "reset resolution state");
    }
}

impl Registry {
    fn record_match(&mut self, dep: &mut Dependency, id: PackageId) -> PackageId {
        let package = &mut self.packages[id.0];
        package.hits += 1;
        dep.set_match(Some(id));
        trace!(dependency = %dep.package, package = %package.id, hits = package.hits, "matched dependency");
        id
    }
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default, rename = "package")]
    packages: Vec<ManifestEntry>,
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    id: String,
    name: Option<String>,
    version: Option<String>,
    #[serde(default)]
    requires: String,
    #[serde(default, alias = "requires-private")]
    requires_private: String,
    #[serde(default)]
    provides: String,
    #[serde(default, rename = "static")]
    r#static: bool,
}

#[cfg(test)]
mod tests {
    include!("package.test.rs");
}
