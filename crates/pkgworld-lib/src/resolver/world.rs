//! Resolve pipeline around the synthetic world package
//!
//! queue → compile → traverse with [`DependentCollector`] → flatten
//! `required` → flatten `requires_private`.

use tracing::{debug, error, warn};

use super::ResolveError;
use super::collect::DependentCollector;
use super::package::{Package, PackageMatcher};
use super::queue::Queue;
use super::session::Session;
use super::traverse::MaxDepth;

impl<M: PackageMatcher> Session<M> {
    /// Compile `queue` into `world` and resolve it into flattened lists
    ///
    /// Stops at the first failing step: an empty compile is a
    /// [`ResolveError::GraphBreak`], traversal failures come back unchanged
    /// and the flatten steps are skipped.
    pub fn verify(
        &mut self,
        world: &mut Package,
        queue: &Queue,
        maxdepth: MaxDepth,
    ) -> Result<(), ResolveError> {
        // Hits and cached matches are per pass
        self.matcher_mut().reset_pass();

        if !queue.compile(world) {
            warn!(atoms = queue.len(), "no requested package produced a requirement");
            return Err(ResolveError::GraphBreak);
        }

        let mut collector = DependentCollector::new(world);
        self.traverse(world, &mut collector, maxdepth)?;
        collector.into_world(world);

        let serial = self.next_serial();
        debug!(serial, "flattening requires deps");
        self.flatten(&mut world.required)?;

        let serial = self.next_serial();
        debug!(serial, "flattening requires.private deps");
        self.flatten(&mut world.requires_private)?;

        Ok(())
    }

    /// Resolve `queue` into a fresh world package owned by the caller
    pub fn resolve(&mut self, queue: &Queue, maxdepth: MaxDepth) -> Result<Package, ResolveError> {
        let mut world = Package::world();
        self.verify(&mut world, queue, maxdepth.normalized())?;
        Ok(world)
    }

    /// Resolve `queue` and hand the flattened world to `continuation`
    ///
    /// A depth of zero means unlimited. The continuation is only called when
    /// resolution succeeds and its result becomes the result of `apply`. The
    /// world is dropped before returning, whatever the outcome.
    pub fn apply<F>(&mut self, queue: &Queue, continuation: F, maxdepth: MaxDepth) -> bool
    where
        F: FnOnce(&Self, &Package, MaxDepth) -> bool,
    {
        let maxdepth = maxdepth.normalized();
        let world = match self.resolve(queue, maxdepth) {
            Ok(world) => world,
            Err(err) => {
                report(&err);
                return false;
            }
        };

        continuation(self, &world, maxdepth)
    }

    /// Check that `queue` resolves, without acting on the result
    pub fn validate(&mut self, queue: &Queue, maxdepth: MaxDepth) -> bool {
        match self.resolve(queue, maxdepth) {
            Ok(_) => true,
            Err(err) => {
                report(&err);
                false
            }
        }
    }
}

fn report(err: &ResolveError) {
    if err.is_internal_defect() {
        error!("internal resolver defect, please report this: {}", err);
    } else {
        debug!("resolution failed: {}", err);
    }
}

#[cfg(test)]
mod tests {
    include!("world.test.rs");
}
