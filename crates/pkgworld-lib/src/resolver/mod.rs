//! World resolution: compiles requested atoms into one flattened dependency set
//!
//! Callers queue atoms (`libfoo >= 1.2`), and a [`Session`] turns them into a
//! synthetic "world" package whose `required` and `requires_private` lists
//! hold every package the requests transitively need, each exactly once and
//! ordered by how often it was matched.
//!
//! ```
//! use pkgworld_lib::resolver::{MaxDepth, Package, Queue, Registry, Session};
//!
//! let mut registry = Registry::new();
//! registry.insert(Package::new("libfoo").with_requires("zlib")).unwrap();
//! registry.insert(Package::new("zlib")).unwrap();
//!
//! let mut session = Session::new(registry);
//! let queue: Queue = ["libfoo"].into_iter().collect();
//!
//! let world = session.resolve(&queue, MaxDepth::Unlimited).unwrap();
//! assert_eq!(world.required.len(), 2);
//! ```

use thiserror::Error;

pub mod collect;
pub mod dependency;
pub mod flatten;
pub mod package;
pub mod queue;
pub mod session;
pub mod traverse;
pub mod version;
pub mod world;

pub use collect::DependentCollector;
pub use dependency::Dependency;
pub use package::{
    MatchError, Package, PackageFlags, PackageId, PackageMatcher, Registry, RegistryError,
    WORLD_ID,
};
pub use queue::Queue;
pub use session::{Session, SessionFlags};
pub use traverse::{MaxDepth, TraversalError, Visitor};
pub use version::{Comparator, Constraint};

/// Errors from a resolve pass
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Compilation produced no top-level requirement
    #[error("Dependency graph break: no requested package produced a requirement")]
    GraphBreak,

    #[error(transparent)]
    Traversal(#[from] TraversalError),

    /// A record resolved without recording its match; a resolver bug
    #[error("Internal defect: dependency '{package}' resolved without a match")]
    InternalDefect { package: String },
}

impl ResolveError {
    pub fn is_internal_defect(&self) -> bool {
        matches!(self, Self::InternalDefect { .. })
    }
}
