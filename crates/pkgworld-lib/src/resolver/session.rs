//! Resolution session state

use super::package::{PackageMatcher, Registry};

/// Behavior switches for traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionFlags {
    /// Walk private requirement lists too (static linking)
    pub search_private: bool,
    /// Do not hand a virtual traversal root to the visitor
    pub skip_root_virtual: bool,
}

/// State shared by every step of a resolve pass
///
/// Owns the package matcher (normally the [`Registry`]) and the generation
/// counter. A session is single-threaded: two resolve passes must not run
/// against the same session at once.
#[derive(Debug)]
pub struct Session<M = Registry> {
    matcher: M,
    serial: u64,
    flags: SessionFlags,
}

impl<M: PackageMatcher> Session<M> {
    pub fn new(matcher: M) -> Self {
        Self {
            matcher,
            serial: 0,
            flags: SessionFlags::default(),
        }
    }

    pub fn with_flags(mut self, flags: SessionFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn flags(&self) -> SessionFlags {
        self.flags
    }

    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    pub fn matcher_mut(&mut self) -> &mut M {
        &mut self.matcher
    }

    /// Current generation
    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// Start a new generation and return it
    pub fn next_serial(&mut self) -> u64 {
        self.serial += 1;
        self.serial
    }
}
