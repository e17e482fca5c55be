//! Deduplication and ordering of a collected requirement list

use std::cmp::Reverse;
use std::collections::HashSet;

use tracing::{debug, error, trace};

use super::ResolveError;
use super::dependency::Dependency;
use super::package::{PackageId, PackageMatcher};
use super::session::Session;

impl<M: PackageMatcher> Session<M> {
    /// Rewrite `list` so each package appears once, most hit first
    ///
    /// Every record is resolved; records that resolve to nothing are dropped.
    /// A record is also dropped when its package, or a package under the same
    /// requested name, was already accepted earlier in this call. The
    /// survivors are stable-sorted by descending hits of their matched
    /// package, so ties keep their first-accepted order.
    ///
    /// The list's records are consumed: rejected duplicates are dropped here.
    /// A record that resolves without carrying a match aborts with
    /// [`ResolveError::InternalDefect`].
    pub fn flatten(&mut self, list: &mut Vec<Dependency>) -> Result<(), ResolveError> {
        let serial = self.serial();
        let total = list.len();
        let mut seen: HashSet<PackageId> = HashSet::with_capacity(total);
        let mut accepted: Vec<Dependency> = Vec::with_capacity(total);

        for mut dep in list.drain(..) {
            let id = match self.matcher_mut().verify_dependency(&mut dep, None) {
                Ok(id) => id,
                Err(err) => {
                    trace!(dependency = %dep.package, "dropping unresolved record: {}", err);
                    continue;
                }
            };

            if seen.contains(&id) {
                trace!(dependency = %dep.package, serial, "already in dependency table");
                continue;
            }

            if dep.matched().is_none() {
                error!(dependency = %dep.package, "resolved dependency carries no match");
                return Err(ResolveError::InternalDefect {
                    package: dep.package,
                });
            }

            // Aliases reached through different records before either was marked
            if let Some(other) = accepted.iter().find(|other| other.package == dep.package) {
                trace!(dependency = %dep.package, other = %other.package, "skipping duplicate name");
                continue;
            }

            seen.insert(id);
            trace!(dependency = %dep.package, "added to dependency table");
            accepted.push(dep);
        }

        let matcher = self.matcher();
        accepted.sort_by_key(|dep| Reverse(dep.matched().map_or(0, |id| matcher.package(id).hits())));

        for (slot, dep) in accepted.iter().enumerate() {
            if let Some(id) = dep.matched() {
                let package = matcher.package(id);
                trace!(slot, dependency = %dep.package, package = %package.id, hits = package.hits(), "flattened");
            }
        }

        debug!(serial, before = total, after = accepted.len(), "flattened dependency list");
        *list = accepted;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    include!("flatten.test.rs");
}
