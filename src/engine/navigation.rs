// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Addressing and enumerating calls.
//!
//! Queries about calls that are not in the tree return `None` or an empty
//! collection rather than failing.

use super::{Algorithm, CallId, CallPath, CallTree};

/// Horizontal slot of a subcall in a fixed-width tree layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubcallPosition {
    Left,
    Middle,
    Right,
}

impl<A: Algorithm> CallTree<A> {
    pub fn root(&self) -> CallId {
        self.root
    }

    /// Whether `id` refers to a live call of this tree.
    pub fn contains(&self, id: CallId) -> bool {
        self.calls.contains(id)
    }

    pub fn parent(&self, id: CallId) -> Option<CallId> {
        self.calls
            .get(id)
            .and_then(|node| node.parent.as_ref())
            .map(|(parent, _)| *parent)
    }

    /// Named subcalls in insertion order; empty unless the call has a divide case.
    pub fn subcalls(&self, id: CallId) -> &[(String, CallId)] {
        match self.calls.get(id) {
            Some(node) => node.state.subcalls(),
            None => &[],
        }
    }

    /// Ancestors of `id`, root first, excluding `id` itself.
    pub fn ancestors(&self, id: CallId) -> Vec<CallId> {
        let mut ancestors = Vec::new();
        let mut current = self.parent(id);
        while let Some(call) = current {
            ancestors.push(call);
            current = self.parent(call);
        }
        ancestors.reverse();
        ancestors
    }

    /// Edge names from the root down to `id`.
    pub fn path_from_root(&self, id: CallId) -> Option<CallPath> {
        let mut names = Vec::new();
        let mut current = self.calls.get(id)?;
        while let Some((parent, name)) = &current.parent {
            names.push(name.clone());
            current = self.calls.get(*parent)?;
        }
        names.reverse();
        Some(CallPath::from(names))
    }

    /// Follow `path` down from `from`.
    pub fn call_at(&self, from: CallId, path: &CallPath) -> Option<CallId> {
        if !self.contains(from) {
            return None;
        }
        path.names().iter().try_fold(from, |call, name| {
            self.subcalls(call)
                .iter()
                .find(|(child_name, _)| child_name == name)
                .map(|(_, child)| *child)
        })
    }

    pub fn call_from_root(&self, path: &CallPath) -> Option<CallId> {
        self.call_at(self.root, path)
    }

    /// `id` and all its descendants in depth-first pre-order.
    pub fn all_subcalls(&self, id: CallId) -> Vec<CallId> {
        let mut calls = Vec::new();
        if !self.contains(id) {
            return calls;
        }
        let mut stack = vec![id];
        while let Some(call) = stack.pop() {
            calls.push(call);
            stack.extend(self.subcalls(call).iter().rev().map(|(_, child)| *child));
        }
        calls
    }

    /// Every call in the tree in depth-first pre-order.
    pub fn all_tree_calls(&self) -> Vec<CallId> {
        self.all_subcalls(self.root)
    }

    /// Paths of `id` and its descendants, relative to `id`, in pre-order.
    pub fn all_subcall_paths(&self, id: CallId) -> Vec<CallPath> {
        let Some(base) = self.path_from_root(id) else {
            return Vec::new();
        };
        self.all_subcalls(id)
            .into_iter()
            .filter_map(|call| self.path_from_root(call))
            .map(|path| CallPath::from(path.names()[base.len()..].to_vec()))
            .collect()
    }

    /// Whether `call` is `ancestor` or lies beneath it.
    pub fn contains_subcall(&self, ancestor: CallId, call: CallId) -> bool {
        if !self.contains(ancestor) || !self.contains(call) {
            return false;
        }
        call == ancestor || self.ancestors(call).contains(&ancestor)
    }

    /// Layout slot for each subcall: first left, last right, the rest middle.
    /// A single subcall is placed left.
    pub fn subcall_positions(&self, id: CallId) -> Vec<(CallId, SubcallPosition)> {
        let subcalls = self.subcalls(id);
        let last = subcalls.len().saturating_sub(1);
        subcalls
            .iter()
            .enumerate()
            .map(|(index, (_, child))| {
                let position = if index == 0 {
                    SubcallPosition::Left
                } else if index == last {
                    SubcallPosition::Right
                } else {
                    SubcallPosition::Middle
                };
                (*child, position)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::karatsuba::{Karatsuba, KaratsubaInput};

    fn divided_karatsuba() -> CallTree<Karatsuba> {
        let mut tree = CallTree::new(Karatsuba, KaratsubaInput::new(1234, 5678).unwrap());
        let root = tree.root();
        tree.divide(root).unwrap();
        tree
    }

    #[test]
    fn test_paths_round_trip() {
        let mut tree = divided_karatsuba();
        let root = tree.root();
        let first = tree.subcalls(root)[0].1;
        tree.divide(first).unwrap();

        for call in tree.all_tree_calls() {
            let path = tree.path_from_root(call).unwrap();
            assert_eq!(tree.call_from_root(&path), Some(call));
        }
        assert_eq!(tree.path_from_root(root), Some(CallPath::root()));
    }

    #[test]
    fn test_missing_path_is_none() {
        let tree = divided_karatsuba();
        assert_eq!(tree.call_from_root(&CallPath::from_names(["nope"])), None);
        assert_eq!(
            tree.call_from_root(&CallPath::from_names(["ac", "ac"])),
            None
        );
    }

    #[test]
    fn test_positions_for_three_children() {
        let tree = divided_karatsuba();
        let positions: Vec<SubcallPosition> = tree
            .subcall_positions(tree.root())
            .into_iter()
            .map(|(_, position)| position)
            .collect();
        assert_eq!(
            positions,
            vec![
                SubcallPosition::Left,
                SubcallPosition::Middle,
                SubcallPosition::Right
            ]
        );
    }

    #[test]
    fn test_relative_paths() {
        let mut tree = divided_karatsuba();
        let root = tree.root();
        let middle = tree.subcalls(root)[1].1;
        tree.divide(middle).unwrap();

        let paths = tree.all_subcall_paths(middle);
        assert_eq!(paths[0], CallPath::root());
        assert_eq!(paths.len(), 1 + tree.subcalls(middle).len());
        assert!(paths[1..].iter().all(|path| path.len() == 1));
    }

    #[test]
    fn test_contains_subcall() {
        let tree = divided_karatsuba();
        let root = tree.root();
        let first = tree.subcalls(root)[0].1;
        let last = tree.subcalls(root)[2].1;
        assert!(tree.contains_subcall(root, first));
        assert!(tree.contains_subcall(first, first));
        assert!(!tree.contains_subcall(first, root));
        assert!(!tree.contains_subcall(first, last));
        assert_eq!(tree.ancestors(first), vec![root]);
        assert_eq!(tree.parent(root), None);
    }
}
