// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The flat node arena produced by [`TreeBuilder`](crate::TreeBuilder).

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use hashbrown::HashMap;
use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use crate::layer::DepthLayer;
use crate::record::ItemRecord;
use crate::types::{ItemId, ItemKind, NodeFlags, NodeId, normalize_container_id};

/// A materialized node.
///
/// Nodes do not own their children. The only structural link is the
/// non-owning [`Node::parent`] back-reference.
#[derive(Clone, Debug)]
pub struct Node {
    /// Stable id. Center nodes use `"{container}{CENTER_SUFFIX}"`.
    pub id: ItemId,
    /// Display title.
    pub title: String,
    /// Item kind.
    pub kind: ItemKind,
    /// Normalized id of the container this node belongs to.
    pub constellation: ItemId,
    /// World-space planar position.
    pub position: Point,
    /// Angle from the parent in degrees.
    pub angle: f64,
    /// Distance from the parent.
    pub distance: f64,
    /// Parent node, if any. Always a smaller [`NodeId`] than this node.
    pub parent: Option<NodeId>,
    /// Static depth hint from input or inheritance.
    pub depth_hint: Option<DepthLayer>,
    /// Nesting level: 0 for centers, 1 for direct children, and so on.
    pub level: u16,
    /// Structural flags.
    pub flags: NodeFlags,
    /// Truncated tail of children carried by an overflow placeholder.
    pub overflow: Vec<ItemRecord>,
}

impl Node {
    /// Returns `true` if this is the center node of its container.
    #[must_use]
    pub fn is_center(&self) -> bool {
        self.flags.contains(NodeFlags::CENTER)
    }

    /// Returns `true` if this is a synthetic overflow placeholder.
    #[must_use]
    pub fn is_overflow(&self) -> bool {
        self.flags.contains(NodeFlags::OVERFLOW)
    }

    /// Returns `true` if this is the center of the home container.
    #[must_use]
    pub fn is_home(&self) -> bool {
        self.flags.contains(NodeFlags::HOME)
    }

    /// Container key this node answers to.
    ///
    /// For centers the key is derived from the node's own id, so a center
    /// whose `constellation` field was left un-normalized still resolves to
    /// the right container.
    #[must_use]
    pub fn container_key(&self) -> &str {
        if self.is_center() {
            normalize_container_id(self.id.as_str())
        } else {
            normalize_container_id(self.constellation.as_str())
        }
    }
}

/// Flat, indexable storage of every node of every container.
///
/// Parents always precede their descendants, which keeps ancestor walks and
/// subtree scans single-pass.
#[derive(Clone, Debug, Default)]
pub struct ConstellationTree {
    pub(crate) nodes: Vec<Node>,
    pub(crate) by_id: HashMap<ItemId, NodeId>,
    pub(crate) centers: HashMap<ItemId, NodeId>,
    pub(crate) containers: Vec<ItemId>,
    pub(crate) home: Option<ItemId>,
}

impl ConstellationTree {
    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node for a handle issued by this tree.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Looks up a node handle by item id. The first node with a given id wins.
    #[must_use]
    pub fn node_id(&self, id: &str) -> Option<NodeId> {
        self.by_id.get(id).copied()
    }

    /// Looks up a node by item id.
    #[must_use]
    pub fn node_by_id(&self, id: &str) -> Option<&Node> {
        self.node_id(id).and_then(|n| self.get(n))
    }

    /// Returns the center node of a container. `container` is normalized first.
    #[must_use]
    pub fn center_of(&self, container: &str) -> Option<NodeId> {
        self.centers.get(normalize_container_id(container)).copied()
    }

    /// Resolves an id naming either a node or a container.
    ///
    /// Node ids win; otherwise the container's center is returned.
    #[must_use]
    pub fn resolve(&self, id: &str) -> Option<NodeId> {
        self.node_id(id).or_else(|| self.center_of(id))
    }

    /// Container ids in input order.
    #[must_use]
    pub fn containers(&self) -> &[ItemId] {
        &self.containers
    }

    /// The designated home container, if any.
    #[must_use]
    pub fn home(&self) -> Option<&ItemId> {
        self.home.as_ref()
    }

    /// Iterates all nodes with their handles, parents first.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::from_index(i), n))
    }

    /// Returns the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Walks from the parent of `id` up to its root, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Returns the ancestor chain of `id`, nearest first.
    #[must_use]
    pub fn ancestor_chain(&self, id: NodeId) -> SmallVec<[NodeId; 8]> {
        self.ancestors(id).collect()
    }

    /// Returns `true` if `ancestor` lies strictly above `node`.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        // Parents always have smaller handles, so stop once we pass `ancestor`.
        self.ancestors(node)
            .take_while(|a| *a >= ancestor)
            .any(|a| a == ancestor)
    }

    /// Returns the direct children of a node, in creation order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.iter()
            .skip(id.index() + 1)
            .filter(|(_, n)| n.parent == Some(id))
            .map(|(c, _)| c)
            .collect()
    }

    /// Returns every descendant of a node, in creation order.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let start = id.index();
        if start >= self.nodes.len() {
            return Vec::new();
        }
        let mut inside = vec![false; self.nodes.len()];
        inside[start] = true;
        let mut out = Vec::new();
        for (i, node) in self.nodes.iter().enumerate().skip(start + 1) {
            if node.parent.is_some_and(|p| inside[p.index()]) {
                inside[i] = true;
                out.push(NodeId::from_index(i));
            }
        }
        out
    }

    /// Moves a node and carries its subtree along.
    ///
    /// Every descendant is re-placed from its stored angle and distance
    /// relative to its (possibly moved) parent. Returns `false` for a handle
    /// this tree did not issue.
    pub fn move_node(&mut self, id: NodeId, position: Point) -> bool {
        let start = id.index();
        let Some(node) = self.nodes.get_mut(start) else {
            return false;
        };
        node.position = position;
        let mut moved = vec![false; self.nodes.len()];
        moved[start] = true;
        for i in start + 1..self.nodes.len() {
            let Some(parent) = self.nodes[i].parent else {
                continue;
            };
            if !moved[parent.index()] {
                continue;
            }
            let origin = self.nodes[parent.index()].position;
            let child = &mut self.nodes[i];
            child.position = polar(origin, child.angle, child.distance);
            moved[i] = true;
        }
        true
    }

    pub(crate) fn push(&mut self, node: Node) -> NodeId {
        let handle = NodeId::from_index(self.nodes.len());
        self.by_id.entry(node.id.clone()).or_insert(handle);
        self.nodes.push(node);
        handle
    }
}

/// Iterator over the ancestors of a node; see [`ConstellationTree::ancestors`].
#[derive(Clone, Debug)]
pub struct Ancestors<'a> {
    tree: &'a ConstellationTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

/// Position at `angle_degrees` and `distance` from `origin`.
pub(crate) fn polar(origin: Point, angle_degrees: f64, distance: f64) -> Point {
    origin + Vec2::from_angle(angle_degrees.to_radians()) * distance
}
