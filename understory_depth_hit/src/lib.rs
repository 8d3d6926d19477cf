// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_depth_hit --heading-base-level=0

//! Understory Depth Hit: which constellation node is under the pointer.
//!
//! Every node that is not on the hidden layer is projected through a
//! [`Camera3D`] at its layer's world depth. Candidates are ordered front to
//! back and the first one whose circular footprint contains the query point
//! wins, so on overlap the front-most node is returned.
//!
//! A footprint's radius is `base_size(kind) * scale / 2 + buffer(kind)`,
//! where `scale` is the projected apparent scale. Folders carry a wider
//! buffer than leaves. Nodes whose scale is not positive are never hit.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_constellation::{ContainerRecord, DepthLayer, TreeBuilder};
//! use understory_depth_hit::{HitParams, hit_test};
//! use understory_view3d::Camera3D;
//!
//! let tree = TreeBuilder::new().build(&[ContainerRecord::new("c", Point::new(400.0, 300.0))]);
//! let layers = [DepthLayer::FRONT];
//! let camera = Camera3D::new(Rect::new(0.0, 0.0, 800.0, 600.0));
//!
//! let hit = hit_test(&tree, &layers, &camera, Point::new(420.0, 300.0), &HitParams::default());
//! assert_eq!(hit.map(|h| h.node), tree.center_of("c"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Circle, Point, Shape};
use understory_constellation::{ConstellationTree, DepthLayer, ItemKind, NodeId};
use understory_view3d::{Camera3D, Projected};

/// Footprint parameters for hit testing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitParams {
    /// Diameter of a container center at unit scale.
    pub center_size: f64,
    /// Diameter of a folder at unit scale.
    pub folder_size: f64,
    /// Diameter of a document at unit scale.
    pub document_size: f64,
    /// Extra radius for folders, in screen units (not scaled).
    pub folder_buffer: f64,
    /// Extra radius for everything that is not a folder.
    pub leaf_buffer: f64,
}

impl Default for HitParams {
    fn default() -> Self {
        Self {
            center_size: 60.0,
            folder_size: 40.0,
            document_size: 30.0,
            folder_buffer: 12.0,
            leaf_buffer: 4.0,
        }
    }
}

impl HitParams {
    /// Diameter of a node of `kind` at unit scale.
    #[must_use]
    pub fn base_size(&self, kind: ItemKind) -> f64 {
        match kind {
            ItemKind::Center => self.center_size,
            ItemKind::Folder => self.folder_size,
            ItemKind::Document => self.document_size,
        }
    }

    /// Extra hit slack around a node of `kind`.
    #[must_use]
    pub fn buffer(&self, kind: ItemKind) -> f64 {
        match kind {
            ItemKind::Folder => self.folder_buffer,
            ItemKind::Center | ItemKind::Document => self.leaf_buffer,
        }
    }

    /// Radius of the hit circle of a node of `kind` drawn at `scale`.
    #[must_use]
    pub fn radius(&self, kind: ItemKind, scale: f64) -> f64 {
        self.base_size(kind) * scale * 0.5 + self.buffer(kind)
    }
}

/// A node under the query point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    /// The node that was hit.
    pub node: NodeId,
    /// Its projection at the time of the query.
    pub projected: Projected,
    /// Distance from the query point to the projected node center.
    pub distance: f64,
}

/// Returns the front-most node whose footprint contains `point`.
///
/// `layers` is indexed by [`NodeId::index`], as produced by
/// `understory_depth::resolve_all`; nodes past its end count as hidden.
#[must_use]
pub fn hit_test(
    tree: &ConstellationTree,
    layers: &[DepthLayer],
    camera: &Camera3D,
    point: Point,
    params: &HitParams,
) -> Option<Hit> {
    front_to_back(tree, layers, camera)
        .into_iter()
        .find_map(|(node, projected)| test_one(tree, node, projected, point, params))
}

/// Returns every node whose footprint contains `point`, front to back.
///
/// Intended for debugging overlaps; pointer routing should use
/// [`hit_test`].
#[must_use]
pub fn hits_at(
    tree: &ConstellationTree,
    layers: &[DepthLayer],
    camera: &Camera3D,
    point: Point,
    params: &HitParams,
) -> Vec<Hit> {
    front_to_back(tree, layers, camera)
        .into_iter()
        .filter_map(|(node, projected)| test_one(tree, node, projected, point, params))
        .collect()
}

/// Visible nodes with their projections, front-most first.
///
/// Ties keep arena order.
fn front_to_back(
    tree: &ConstellationTree,
    layers: &[DepthLayer],
    camera: &Camera3D,
) -> Vec<(NodeId, Projected)> {
    let mut candidates: Vec<(NodeId, Projected)> = tree
        .iter()
        .filter_map(|(id, node)| {
            let layer = layers.get(id.index()).copied()?;
            if layer.is_hidden() {
                return None;
            }
            Some((id, camera.project_at(node.position, layer.world_z())))
        })
        .collect();
    candidates.sort_by(|a, b| b.1.depth.total_cmp(&a.1.depth));
    candidates
}

fn test_one(
    tree: &ConstellationTree,
    node: NodeId,
    projected: Projected,
    point: Point,
    params: &HitParams,
) -> Option<Hit> {
    if projected.scale.is_nan() || projected.scale <= 0.0 {
        return None;
    }
    let kind = tree.get(node)?.kind;
    let footprint = Circle::new(projected.screen, params.radius(kind, projected.scale));
    if !footprint.contains(point) {
        return None;
    }
    Some(Hit {
        node,
        projected,
        distance: (point - projected.screen).hypot(),
    })
}
