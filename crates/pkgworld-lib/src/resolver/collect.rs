//! Traversal visitor that gathers every reached package's requirements

use tracing::trace;

use super::dependency::Dependency;
use super::package::Package;
use super::traverse::Visitor;

/// Copies the requirement lists of every visited package for the world
///
/// The collector is keyed to one world node and ignores it when the
/// traversal hands it back, otherwise the world would copy its own growing
/// list into itself. Records are kept in visit order and only ever appended.
#[derive(Debug, Clone)]
pub struct DependentCollector {
    world: String,
    required: Vec<Dependency>,
    requires_private: Vec<Dependency>,
}

impl DependentCollector {
    pub fn new(world: &Package) -> Self {
        Self {
            world: world.id.clone(),
            required: Vec::new(),
            requires_private: Vec::new(),
        }
    }

    pub fn required(&self) -> &[Dependency] {
        &self.required
    }

    pub fn requires_private(&self) -> &[Dependency] {
        &self.requires_private
    }

    /// Append everything collected to the world's lists
    pub fn into_world(self, world: &mut Package) {
        trace!(
            required = self.required.len(),
            requires_private = self.requires_private.len(),
            "collected dependents"
        );
        world.required.extend(self.required);
        world.requires_private.extend(self.requires_private);
    }

    fn is_world(&self, node: &Package) -> bool {
        node.is_virtual() && node.id == self.world
    }
}

impl Visitor for DependentCollector {
    fn visit(&mut self, node: &Package) {
        if self.is_world(node) {
            return;
        }

        self.required.extend(node.required.iter().cloned());
        self.requires_private
            .extend(node.requires_private.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    include!("collect.test.rs");
}
