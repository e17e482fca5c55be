//! Version comparison for dependency constraints
//!
//! Versions are compared segment by segment the way RPM and pkg-config
//! tooling do it: runs of digits compare numerically, runs of letters compare
//! lexically, a numeric segment is always newer than an alphabetic one and a
//! `~` marks a pre-release that sorts before anything else.

use std::cmp::Ordering;
use std::fmt;

/// Compare two version strings.
pub fn compare(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    let mut one = a.as_bytes();
    let mut two = b.as_bytes();

    loop {
        one = skip_separators(one);
        two = skip_separators(two);

        // Tilde sorts before everything, including the end of the string
        match (one.first(), two.first()) {
            (Some(b'~'), Some(b'~')) => {
                one = &one[1..];
                two = &two[1..];
                continue;
            }
            (Some(b'~'), _) => return Ordering::Less,
            (_, Some(b'~')) => return Ordering::Greater,
            _ => {}
        }

        if one.is_empty() || two.is_empty() {
            break;
        }

        let numeric = one[0].is_ascii_digit();
        let seg_one = segment(one, numeric);
        let seg_two = segment(two, numeric);

        // Segment types differ: numeric wins over alphabetic
        if seg_two.is_empty() {
            return if numeric {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }

        let ordering = if numeric {
            compare_numeric(seg_one, seg_two)
        } else {
            seg_one.cmp(seg_two)
        };

        if ordering != Ordering::Equal {
            return ordering;
        }

        one = &one[seg_one.len()..];
        two = &two[seg_two.len()..];
    }

    match (one.is_empty(), two.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, _) => Ordering::Greater,
    }
}

fn skip_separators(s: &[u8]) -> &[u8] {
    let skip = s
        .iter()
        .take_while(|c| !c.is_ascii_alphanumeric() && **c != b'~')
        .count();
    &s[skip..]
}

fn segment(s: &[u8], numeric: bool) -> &[u8] {
    let len = s
        .iter()
        .take_while(|c| {
            if numeric {
                c.is_ascii_digit()
            } else {
                c.is_ascii_alphabetic()
            }
        })
        .count();
    &s[..len]
}

fn compare_numeric(a: &[u8], b: &[u8]) -> Ordering {
    let a = strip_leading_zeros(a);
    let b = strip_leading_zeros(b);

    // Longer digit run is the bigger number; equal length compares lexically
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn strip_leading_zeros(s: &[u8]) -> &[u8] {
    let zeros = s.iter().take_while(|c| **c == b'0').count();
    &s[zeros..]
}

/// Relational operator of a version constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    LessThan,
    LessThanEqual,
    Equal,
    NotEqual,
    GreaterThanEqual,
    GreaterThan,
}

impl Comparator {
    /// Parse the operator text of an atom (`<`, `<=`, `=`, `==`, `!=`, `>=`, `>`)
    pub fn from_operator(op: &str) -> Option<Self> {
        match op {
            "<" => Some(Self::LessThan),
            "<=" => Some(Self::LessThanEqual),
            "=" | "==" => Some(Self::Equal),
            "!=" => Some(Self::NotEqual),
            ">=" => Some(Self::GreaterThanEqual),
            ">" => Some(Self::GreaterThan),
            _ => None,
        }
    }

    pub fn as_operator(&self) -> &'static str {
        match self {
            Self::LessThan => "<",
            Self::LessThanEqual => "<=",
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::GreaterThanEqual => ">=",
            Self::GreaterThan => ">",
        }
    }

    /// Check whether `actual` relates to `wanted` as this operator demands
    pub fn eval(&self, actual: &str, wanted: &str) -> bool {
        let ordering = compare(actual, wanted);
        match self {
            Self::LessThan => ordering == Ordering::Less,
            Self::LessThanEqual => ordering != Ordering::Greater,
            Self::Equal => ordering == Ordering::Equal,
            Self::NotEqual => ordering != Ordering::Equal,
            Self::GreaterThanEqual => ordering != Ordering::Less,
            Self::GreaterThan => ordering == Ordering::Greater,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_operator())
    }
}

/// A version requirement attached to a dependency
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constraint {
    pub compare: Comparator,
    pub version: String,
}

impl Constraint {
    pub fn new(compare: Comparator, version: impl Into<String>) -> Self {
        Self {
            compare,
            version: version.into(),
        }
    }

    /// Packages without a version never satisfy a constraint
    pub fn satisfied_by(&self, version: Option<&str>) -> bool {
        version.is_some_and(|actual| self.compare.eval(actual, &self.version))
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.compare, self.version)
    }
}

#[cfg(test)]
mod tests {
    include!("version.test.rs");
}
