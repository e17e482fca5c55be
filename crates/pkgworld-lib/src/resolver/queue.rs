//! Queue of requested atoms and its compilation into world requirements

use tracing::debug;

use super::dependency;
use super::package::Package;

/// Ordered list of requested atoms
///
/// Atoms are stored as given: no validation and no deduplication happen
/// until the queue is compiled and resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Queue {
    entries: Vec<String>,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an owned copy of `atom`
    pub fn push(&mut self, atom: &str) {
        self.entries.push(atom.to_owned());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Release every entry
    pub fn free(self) {
        debug!(entries = self.entries.len(), "releasing queue");
    }

    /// Parse every queued atom, in order, into `world.required`
    ///
    /// Returns whether the world ended up with any requirement at all.
    /// Atoms that parse to nothing are skipped silently. Running it twice
    /// appends twice.
    pub fn compile(&self, world: &mut Package) -> bool {
        for atom in &self.entries {
            world.required.extend(dependency::parse(atom));
        }

        debug!(
            atoms = self.entries.len(),
            required = world.required.len(),
            "compiled queue"
        );
        !world.required.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Queue {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

impl<S: AsRef<str>> Extend<S> for Queue {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for atom in iter {
            self.push(atom.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    include!("queue.test.rs");
}
