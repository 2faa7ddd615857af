// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Paths addressing calls by edge names from the root.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered sequence of subcall names leading from the root to a call.
///
/// The root's path is empty. A path addresses a unique call for as long as
/// the shape of the tree above it is unchanged.
///
/// ```
/// use recursion_stepper::engine::CallPath;
///
/// let path = CallPath::root().child("Left").child("Right");
/// assert_eq!(path.to_string(), "/Left/Right");
/// assert!(path.starts_with(&CallPath::from_names(["Left"])));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallPath(Vec<String>);

impl CallPath {
    /// The empty path, addressing the root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// This path extended by one edge.
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut names = self.0.clone();
        names.push(name.into());
        Self(names)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The path of the parent call, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, init) = self.0.split_last()?;
        Some(Self(init.to_vec()))
    }

    /// The name of the last edge, or `None` for the root.
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// True when `prefix` addresses this call or one of its ancestors.
    pub fn starts_with(&self, prefix: &CallPath) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for CallPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "/");
        }
        for name in &self.0 {
            write!(f, "/{}", name)?;
        }
        Ok(())
    }
}

impl From<Vec<String>> for CallPath {
    fn from(names: Vec<String>) -> Self {
        Self(names)
    }
}

impl From<&[&str]> for CallPath {
    fn from(names: &[&str]) -> Self {
        Self::from_names(names.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path() {
        let root = CallPath::root();
        assert!(root.is_root());
        assert_eq!(root.parent(), None);
        assert_eq!(root.last(), None);
        assert_eq!(root.to_string(), "/");
    }

    #[test]
    fn test_parent_and_last() {
        let path = CallPath::from(&["First Summand", "Second Summand"][..]);
        assert_eq!(path.last(), Some("Second Summand"));
        assert_eq!(path.parent(), Some(CallPath::from_names(["First Summand"])));
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_serialises_as_name_list() {
        let path = CallPath::from_names(["Left", "Right"]);
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, r#"["Left","Right"]"#);
        let back: CallPath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
    }
}
