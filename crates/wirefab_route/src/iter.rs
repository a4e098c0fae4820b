//! Traversals over a route tree.
//!
//! Iterators hold a shared borrow of the [`RouteForest`], so a tree cannot be
//! edited while it is being walked.

use crate::forest::RouteForest;
use crate::ids::NodeId;
use std::collections::{HashSet, VecDeque};
use wirefab_device::{Pip, Wire};

/// Depth-first pre-order walk of a subtree: a node, then each child's subtree
/// in child order.
#[derive(Debug, Clone)]
pub struct Preorder<'a> {
    forest: &'a RouteForest,
    stack: Vec<NodeId>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.stack.pop()?;
        self.stack
            .extend(self.forest.children(node).iter().rev().copied());
        Some(node)
    }
}

/// Breadth-first walk of a subtree. Never visits ancestors of the start node.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    forest: &'a RouteForest,
    queue: VecDeque<NodeId>,
}

impl Iterator for Iter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.queue.pop_front()?;
        let children = self.forest.children(node);
        self.queue.extend(children.iter().copied());
        Some(node)
    }
}

impl RouteForest {
    /// Walks the subtree at `id` in pre-order, starting with `id`.
    pub fn preorder(&self, id: NodeId) -> Preorder<'_> {
        Preorder {
            forest: self,
            stack: vec![id],
        }
    }

    /// Walks the subtree at `id` breadth-first, starting with `id`.
    pub fn iter(&self, id: NodeId) -> Iter<'_> {
        Iter {
            forest: self,
            queue: VecDeque::from([id]),
        }
    }

    /// The PIPs used by the inbound connections of every strict descendant of
    /// `id`. The inbound connection of `id` itself is not included.
    pub fn all_pips(&self, id: NodeId) -> HashSet<Pip> {
        self.preorder(id)
            .skip(1)
            .filter_map(|node| self.inbound_connection(node)?.pip())
            .collect()
    }

    /// Number of nodes in the subtree at `id`, including `id`.
    pub fn subtree_size(&self, id: NodeId) -> usize {
        self.preorder(id).count()
    }

    /// Number of edges between `id` and its root.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Leaves of the subtree at `id`, in pre-order.
    pub fn leaves(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.preorder(id).filter(|&node| self.is_leaf(node))
    }

    /// Wires occupied by the subtree at `id`, in pre-order.
    pub fn wires(&self, id: NodeId) -> impl Iterator<Item = Wire> + '_ {
        self.preorder(id).map(|node| self.wire(node))
    }
}
