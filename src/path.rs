//! Dotted paths locating values in a configuration tree.
//!
//! This module provides [`ConfigPath`] and [`PathSegment`] types for
//! representing the route from the decode root to a node, rendered as a
//! dot-joined breadcrumb like `servers.0.host`.

use std::fmt::{self, Display};

/// A segment of a configuration path.
///
/// Paths are built from segments that represent either key access in an
/// object or positional access in an array.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object key access (e.g., `server`, `host`)
    Field(String),
    /// An array index access (e.g., `0`, `42`)
    Index(usize),
}

impl PathSegment {
    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, "{}", name),
            PathSegment::Index(idx) => write!(f, "{}", idx),
        }
    }
}

/// The route from the decode root to a node in the configuration tree.
///
/// A path grows by exactly one segment per nesting level. Failures are born
/// with an empty path; each traversal level prepends its own segment as the
/// failure propagates outward, so the finished path reads root-to-leaf.
/// The empty path denotes the decode root.
///
/// # Example
///
/// ```rust
/// use decant::ConfigPath;
///
/// let path = ConfigPath::root()
///     .push_field("servers")
///     .push_index(0)
///     .push_field("host");
///
/// assert_eq!(path.to_string(), "servers.0.host");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ConfigPath {
    segments: Vec<PathSegment>,
}

impl ConfigPath {
    /// Creates an empty path representing the decode root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from a single field segment.
    pub fn from_field(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Field(name.into())],
        }
    }

    /// Creates a path from a single index segment.
    pub fn from_index(idx: usize) -> Self {
        Self {
            segments: vec![PathSegment::Index(idx)],
        }
    }

    /// Returns a new path with a field segment appended.
    ///
    /// This method does not modify the original path; it returns a new one.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    ///
    /// This method does not modify the original path; it returns a new one.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Returns this path with a segment prepended.
    ///
    /// Used while a failure propagates outward: each level contributes the
    /// segment it descended through, exactly once.
    pub fn prepended(mut self, segment: PathSegment) -> Self {
        self.segments.insert(0, segment);
        self
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }
}

impl Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
