//! Dependency records and the atom parser
//!
//! A [`Dependency`] is one edge of the package graph: the requested package
//! name, an optional version constraint and, once the matcher has resolved
//! it, a non-owning handle to the package it matched.

use std::fmt;

use tracing::trace;

use super::package::PackageId;
use super::version::{Comparator, Constraint};

/// One requested edge in the dependency graph
///
/// Cloning a record produces an independent copy that shares the same match
/// handle. The matched package itself is owned by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Requested package name (an id or a provided alias)
    pub package: String,
    /// Version requirement, `None` accepts any version
    pub constraint: Option<Constraint>,
    matched: Option<PackageId>,
}

impl Dependency {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            constraint: None,
            matched: None,
        }
    }

    pub fn with_constraint(mut self, compare: Comparator, version: impl Into<String>) -> Self {
        self.constraint = Some(Constraint::new(compare, version));
        self
    }

    /// Package this record resolved to, if resolution has happened
    pub fn matched(&self) -> Option<PackageId> {
        self.matched
    }

    /// Record the outcome of a resolution; only matchers should call this
    pub fn set_match(&mut self, id: Option<PackageId>) {
        self.matched = id;
    }

    /// Render the record back into atom text
    pub fn to_atom(&self) -> String {
        match &self.constraint {
            Some(constraint) => format!("{} {}", self.package, constraint),
            None => self.package.clone(),
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_atom())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Word(&'a str),
    Operator(&'a str),
    Separator,
}

fn is_operator_char(c: char) -> bool {
    matches!(c, '<' | '>' | '=' | '!')
}

fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c == ',' {
            tokens.push(Token::Separator);
            continue;
        }
        if c.is_whitespace() {
            continue;
        }

        let operator = is_operator_char(c);
        let mut end = start + c.len_utf8();
        while let Some(&(idx, next)) = chars.peek() {
            if next == ',' || next.is_whitespace() || is_operator_char(next) != operator {
                break;
            }
            end = idx + next.len_utf8();
            chars.next();
        }

        let text = &input[start..end];
        tokens.push(if operator {
            Token::Operator(text)
        } else {
            Token::Word(text)
        });
    }

    tokens
}

fn make_dependency(name: &str, constraint: Option<(Comparator, &str)>) -> Dependency {
    let mut dep = Dependency::new(name);
    if let Some((compare, version)) = constraint {
        dep = dep.with_constraint(compare, version);
    }
    dep
}

/// Parse a comma and/or whitespace separated list of atoms
///
/// Each atom is a package name optionally followed by an operator and a
/// version: `foo`, `foo >= 1.0`, `foo>=1.0, bar`. Malformed atoms (an
/// operator without a name, an operator without a version, an unknown
/// operator) contribute nothing; parsing never fails.
pub fn parse(atoms: &str) -> Vec<Dependency> {
    let mut deps = Vec::new();
    let mut pending: Option<(&str, Option<Comparator>)> = None;
    // Set while skipping the version of a malformed atom
    let mut orphaned = false;

    for token in tokenize(atoms) {
        match token {
            Token::Word(word) => match pending.take() {
                Some((name, Some(compare))) => deps.push(make_dependency(name, Some((compare, word)))),
                Some((name, None)) => {
                    deps.push(make_dependency(name, None));
                    pending = Some((word, None));
                }
                None if orphaned => orphaned = false,
                None => pending = Some((word, None)),
            },
            Token::Operator(op) => match (pending.take(), Comparator::from_operator(op)) {
                (Some((name, None)), Some(compare)) => pending = Some((name, Some(compare))),
                (dropped, _) => {
                    trace!(atom = ?dropped.map(|(name, _)| name), operator = op, "skipping malformed atom");
                    orphaned = true;
                }
            },
            Token::Separator => {
                match pending.take() {
                    Some((name, None)) => deps.push(make_dependency(name, None)),
                    Some((name, Some(_))) => {
                        trace!(atom = name, "skipping atom with operator but no version")
                    }
                    None => {}
                }
                orphaned = false;
            }
        }
    }

    match pending {
        Some((name, None)) => deps.push(make_dependency(name, None)),
        Some((name, Some(_))) => trace!(atom = name, "skipping atom with operator but no version"),
        None => {}
    }

    deps
}

#[cfg(test)]
mod tests {
    include!("dependency.test.rs");
}
