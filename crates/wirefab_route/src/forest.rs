//! The route-tree arena and its mutations.
//!
//! A [`RouteForest`] owns the nodes of any number of route trees. Each node
//! occupies one wire and is reached from its parent through one
//! [`Connection`]. A parent owns its child list; the child's parent link is a
//! plain [`NodeId`] that is set and cleared in the same operation that edits
//! the child list, so the two never disagree.

use crate::error::{RouteResult, RouteTreeError};
use crate::ids::NodeId;
use std::collections::HashSet;
use wirefab_device::{Connection, Device, SitePin, Wire};

#[derive(Debug, Clone)]
struct Node {
    wire: Wire,
    parent: Option<NodeId>,
    inbound: Option<Connection>,
    children: Vec<NodeId>,
    cost: i32,
}

impl Node {
    fn root(wire: Wire) -> Self {
        Self {
            wire,
            parent: None,
            inbound: None,
            children: Vec::new(),
            cost: 0,
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// An arena of route-tree nodes.
///
/// Read accessors such as [`wire`](Self::wire) and [`children`](Self::children)
/// panic on a handle that is not live in this forest, like slice indexing.
/// Mutations validate every handle first and report
/// [`RouteTreeError::InvalidArgument`] instead.
#[derive(Debug, Clone, Default)]
pub struct RouteForest {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl RouteForest {
    /// Creates an empty forest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes across all trees.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` if the forest holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Returns `true` if `id` refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.try_node(id).is_ok()
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        self.live += 1;
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.node = Some(node);
                NodeId::new(index, slot.generation)
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId::new(index, 0)
            }
        }
    }

    fn try_node(&self, id: NodeId) -> RouteResult<&Node> {
        self.slots
            .get(id.index() as usize)
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_ref())
            .ok_or(RouteTreeError::InvalidArgument(id))
    }

    fn node(&self, id: NodeId) -> &Node {
        match self.try_node(id) {
            Ok(node) => node,
            Err(_) => panic!("{id} is not a live node of this route forest"),
        }
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.slots
            .get_mut(id.index() as usize)
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_mut())
            .unwrap_or_else(|| panic!("{id} is not a live node of this route forest"))
    }

    /// Starts a new tree whose root occupies `wire`.
    pub fn new_tree(&mut self, wire: impl Into<Wire>) -> NodeId {
        self.alloc(Node::root(wire.into()))
    }

    /// The wire a node occupies.
    pub fn wire(&self, id: NodeId) -> Wire {
        self.node(id).wire
    }

    /// The node's parent; `None` for roots.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Returns `true` if the node has a parent.
    pub fn is_sourced(&self, id: NodeId) -> bool {
        self.node(id).parent.is_some()
    }

    /// Returns `true` if the node has no children.
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.node(id).children.is_empty()
    }

    /// The node's children. The order is stable while the node is unchanged.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// The connection from the parent's wire to this node's wire; `None` for
    /// roots.
    pub fn inbound_connection(&self, id: NodeId) -> Option<Connection> {
        self.node(id).inbound
    }

    /// The opaque cost tag of a node. Route trees never interpret it.
    pub fn cost(&self, id: NodeId) -> i32 {
        self.node(id).cost
    }

    /// Sets the opaque cost tag of a node.
    pub fn set_cost(&mut self, id: NodeId, cost: i32) -> RouteResult<()> {
        self.try_node(id)?;
        self.node_mut(id).cost = cost;
        Ok(())
    }

    /// The root of the tree containing `id`.
    pub fn root(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.node(current).parent {
            current = parent;
        }
        current
    }

    /// The site input pin this node's wire drives, if any.
    pub fn connected_site_pin(&self, id: NodeId, device: &Device) -> Option<SitePin> {
        device.connected_site_pin(&self.node(id).wire)
    }

    /// Extends `id` with a new child reached through `connection` and returns
    /// the child.
    ///
    /// Fails with [`RouteTreeError::WireMismatch`] if the connection does not
    /// start at the node's wire.
    pub fn connect(&mut self, id: NodeId, connection: Connection) -> RouteResult<NodeId> {
        let wire = self.try_node(id)?.wire;
        if connection.source() != wire {
            return Err(RouteTreeError::WireMismatch {
                expected: wire,
                found: connection.source(),
            });
        }
        let child = self.alloc(Node {
            wire: connection.sink(),
            parent: Some(id),
            inbound: Some(connection),
            children: Vec::new(),
            cost: 0,
        });
        self.node_mut(id).children.push(child);
        Ok(child)
    }

    /// Grafts the standalone tree rooted at `existing_root` below `id`,
    /// reached through `connection`, and returns `existing_root`.
    ///
    /// The connection endpoints are checked first
    /// ([`RouteTreeError::DesignAssembly`]), then that `existing_root` has no
    /// parent ([`RouteTreeError::AlreadySourced`]). Grafting a tree below one
    /// of its own nodes is a [`RouteTreeError::DesignAssembly`] error.
    pub fn adopt(
        &mut self,
        id: NodeId,
        connection: Connection,
        existing_root: NodeId,
    ) -> RouteResult<NodeId> {
        let parent_wire = self.try_node(id)?.wire;
        let adopted = self.try_node(existing_root)?;
        if connection.source() != parent_wire || connection.sink() != adopted.wire {
            return Err(RouteTreeError::DesignAssembly(format!(
                "connection {connection} does not join {parent_wire} to {}",
                adopted.wire
            )));
        }
        if adopted.parent.is_some() {
            return Err(RouteTreeError::AlreadySourced(existing_root));
        }
        if self.root(id) == existing_root {
            return Err(RouteTreeError::DesignAssembly(format!(
                "{existing_root} is an ancestor of {id}"
            )));
        }
        let adopted = self.node_mut(existing_root);
        adopted.parent = Some(id);
        adopted.inbound = Some(connection);
        self.node_mut(id).children.push(existing_root);
        Ok(existing_root)
    }

    /// Detaches the child of `id` reached through `connection` and returns
    /// it. The child keeps its subtree and becomes the root of its own tree.
    pub fn disconnect(&mut self, id: NodeId, connection: &Connection) -> RouteResult<NodeId> {
        let node = self.try_node(id)?;
        let position = node
            .children
            .iter()
            .position(|&c| self.node(c).inbound.as_ref() == Some(connection))
            .ok_or(RouteTreeError::NotFound {
                node: id,
                connection: *connection,
            })?;
        let child = self.node_mut(id).children.remove(position);
        self.detach(child);
        Ok(child)
    }

    fn detach(&mut self, child: NodeId) {
        let node = self.node_mut(child);
        node.parent = None;
        node.inbound = None;
    }

    /// Copies the subtree rooted at `id` into a new, disjoint tree and returns
    /// the copy's root.
    ///
    /// The copy keeps wires, connections, costs and child order. Its root has
    /// no parent and no inbound connection even when `id` does.
    pub fn deep_copy(&mut self, id: NodeId) -> RouteResult<NodeId> {
        let source = self.try_node(id)?;
        let copy_root = Node {
            cost: source.cost,
            ..Node::root(source.wire)
        };
        let copy_root = self.alloc(copy_root);

        let mut pending = vec![(id, copy_root)];
        while let Some((original, copy)) = pending.pop() {
            let children = self.node(original).children.clone();
            for child in children {
                let template = self.node(child);
                let node = Node {
                    wire: template.wire,
                    parent: Some(copy),
                    inbound: template.inbound,
                    children: Vec::with_capacity(template.children.len()),
                    cost: template.cost,
                };
                let child_copy = self.alloc(node);
                self.node_mut(copy).children.push(child_copy);
                pending.push((child, child_copy));
            }
        }
        Ok(copy_root)
    }

    /// Keeps only the nodes of the subtree at `id` that lie on a path from
    /// `id` to at least one node of `terminals`.
    ///
    /// Returns `true` if at least one terminal was found in the subtree.
    /// Pruned children become standalone trees; their own subtrees are left
    /// as they were. Pruning again with the same terminals changes nothing.
    pub fn prune(&mut self, id: NodeId, terminals: &HashSet<NodeId>) -> RouteResult<bool> {
        self.try_node(id)?;
        let order: Vec<NodeId> = self.preorder(id).collect();

        let mut kept = HashSet::new();
        for &node in order.iter().rev() {
            if terminals.contains(&node) || self.children(node).iter().any(|c| kept.contains(c)) {
                kept.insert(node);
            }
        }
        let found = kept.contains(&id);

        for node in order {
            if node != id && !kept.contains(&node) {
                continue;
            }
            let children = self.children(node);
            let (retained, dropped): (Vec<NodeId>, Vec<NodeId>) =
                children.iter().partition(|c| kept.contains(*c));
            if dropped.is_empty() {
                continue;
            }
            self.node_mut(node).children = retained;
            for child in dropped {
                self.detach(child);
            }
        }
        Ok(found)
    }

    /// Frees every node of the standalone tree rooted at `root` and returns
    /// how many were freed. Handles into the tree become invalid.
    pub fn release(&mut self, root: NodeId) -> RouteResult<usize> {
        if self.try_node(root)?.parent.is_some() {
            return Err(RouteTreeError::AlreadySourced(root));
        }
        let nodes: Vec<NodeId> = self.preorder(root).collect();
        for &node in &nodes {
            let slot = &mut self.slots[node.index() as usize];
            slot.node = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(node.index());
        }
        self.live -= nodes.len();
        Ok(nodes.len())
    }

    #[cfg(test)]
    pub(crate) fn corrupt_inbound(&mut self, id: NodeId, connection: Connection) {
        self.node_mut(id).inbound = Some(connection);
    }
}
