//! Depth-limited graph traversal
//!
//! Walks the package graph depth-first from a root, handing every package
//! reached to a [`Visitor`] before descending into its requirements. The walk
//! order is the order of the requirement lists, so it is deterministic for a
//! given graph.

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, error, trace};

use super::dependency::Dependency;
use super::package::{MatchError, Package, PackageId, PackageMatcher};
use super::session::Session;

/// Failures reported while walking the graph
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraversalError {
    #[error("Package '{package}', required by '{required_by}', not found")]
    PackageNotFound {
        package: String,
        required_by: String,
    },

    #[error(
        "Package dependency requirement '{package} {wanted}' could not be satisfied; \
         '{required_by}' requires it but version {found} is available"
    )]
    VersionMismatch {
        package: String,
        wanted: String,
        found: String,
        required_by: String,
    },
}

impl TraversalError {
    fn from_match(err: MatchError, required_by: &str) -> Self {
        match err {
            MatchError::NotFound { package } => Self::PackageNotFound {
                package,
                required_by: required_by.to_string(),
            },
            MatchError::VersionMismatch {
                package,
                wanted,
                found,
            } => Self::VersionMismatch {
                package,
                wanted,
                found,
                required_by: required_by.to_string(),
            },
        }
    }
}

/// How deep a traversal may go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaxDepth {
    Unlimited,
    /// Number of graph levels, counting the root as one
    Limited(u32),
}

impl MaxDepth {
    /// Negative values mean unlimited
    pub fn from_raw(depth: i32) -> Self {
        u32::try_from(depth).map_or(Self::Unlimited, Self::Limited)
    }

    /// Inverse of [`MaxDepth::from_raw`], `-1` for unlimited
    pub fn as_raw(self) -> i32 {
        match self {
            Self::Unlimited => -1,
            Self::Limited(depth) => i32::try_from(depth).unwrap_or(i32::MAX),
        }
    }

    /// A depth of zero is treated as "no limit"
    pub fn normalized(self) -> Self {
        match self {
            Self::Limited(0) => Self::Unlimited,
            other => other,
        }
    }

    pub fn is_exhausted(self) -> bool {
        self == Self::Limited(0)
    }

    fn descend(self) -> Self {
        match self {
            Self::Unlimited => Self::Unlimited,
            Self::Limited(depth) => Self::Limited(depth.saturating_sub(1)),
        }
    }
}

impl Default for MaxDepth {
    fn default() -> Self {
        Self::Unlimited
    }
}

/// Callback invoked once per package reached by a traversal
pub trait Visitor {
    fn visit(&mut self, node: &Package);
}

impl<F: FnMut(&Package)> Visitor for F {
    fn visit(&mut self, node: &Package) {
        self(node)
    }
}

/// Which requirement list of a package is being walked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Public,
    Private,
}

struct Walk<'v> {
    visitor: &'v mut dyn Visitor,
    visited: HashSet<PackageId>,
    first_error: Option<TraversalError>,
}

impl Walk<'_> {
    fn fail(&mut self, err: TraversalError) {
        error!("{}", err);
        self.first_error.get_or_insert(err);
    }
}

impl<M: PackageMatcher> Session<M> {
    /// Walk the graph below `root`, calling `visitor` for every package reached
    ///
    /// Each package is visited at most once per traversal, which also cuts
    /// cycles. Requirements are resolved even where the depth budget stops
    /// the descent, so missing packages at the boundary are still reported.
    /// Resolution failures do not stop the walk; the first one is returned.
    pub fn traverse(
        &mut self,
        root: &mut Package,
        visitor: &mut dyn Visitor,
        maxdepth: MaxDepth,
    ) -> Result<(), TraversalError> {
        let serial = self.next_serial();
        debug!(root = %root.id, serial, depth = maxdepth.as_raw(), "traversing dependency graph");

        if maxdepth.is_exhausted() {
            return Ok(());
        }

        if !(root.is_virtual() && self.flags().skip_root_virtual) {
            visitor.visit(root);
        }

        let mut walk = Walk {
            visitor,
            visited: HashSet::new(),
            first_error: None,
        };

        self.walk_list(&mut walk, &mut root.required, &root.id, maxdepth, Edge::Public);
        if self.flags().search_private {
            self.walk_list(
                &mut walk,
                &mut root.requires_private,
                &root.id,
                maxdepth,
                Edge::Private,
            );
        }

        match walk.first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn walk_list(
        &mut self,
        walk: &mut Walk<'_>,
        list: &mut [Dependency],
        owner: &str,
        depth: MaxDepth,
        edge: Edge,
    ) {
        trace!(owner, ?edge, "walking requirement list");

        for dep in list.iter_mut() {
            if dep.package.is_empty() {
                continue;
            }

            match self.matcher_mut().verify_dependency(dep, None) {
                Ok(id) => self.walk_package(walk, id, depth.descend()),
                Err(err) => walk.fail(TraversalError::from_match(err, owner)),
            }
        }
    }

    fn walk_package(&mut self, walk: &mut Walk<'_>, id: PackageId, depth: MaxDepth) {
        if depth.is_exhausted() {
            return;
        }

        // Already reached in this traversal, or a cycle back onto the path
        if !walk.visited.insert(id) {
            trace!(package = %self.matcher().package(id).id, "already visited");
            return;
        }

        let package = self.matcher().package(id);
        trace!(package = %package.id, depth = depth.as_raw(), "visiting package");
        walk.visitor.visit(package);
        let owner = package.id.clone();

        // Detach the lists while walking them so the matcher stays borrowable
        let mut required = std::mem::take(&mut self.matcher_mut().package_mut(id).required);
        self.walk_list(walk, &mut required, &owner, depth, Edge::Public);
        self.matcher_mut().package_mut(id).required = required;

        if self.flags().search_private {
            let mut private =
                std::mem::take(&mut self.matcher_mut().package_mut(id).requires_private);
            self.walk_list(walk, &mut private, &owner, depth, Edge::Private);
            self.matcher_mut().package_mut(id).requires_private = private;
        }
    }
}

#[cfg(test)]
mod tests {
    include!("traverse.test.rs");
}
