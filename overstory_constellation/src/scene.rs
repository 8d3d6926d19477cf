// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};
use tracing::{debug, trace};
use understory_constellation::{
    ConstellationTree, ContainerRecord, DepthLayer, ItemId, NodeId, TreeBuilder,
};
use understory_depth::{PromoteOutcome, VisualState, resolve_all};
use understory_depth_hit::hit_test;
use understory_view3d::Camera3D;

use crate::config::SceneConfig;
use crate::drag::DragState;
use crate::error::SceneError;

/// Per-node output for the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibleNode {
    /// Tree handle.
    pub node: NodeId,
    /// Item id.
    pub id: ItemId,
    /// Projected position in view coordinates.
    pub screen: Point,
    /// Projected depth; larger is closer.
    pub depth: f64,
    /// Resolved depth layer.
    pub layer: DepthLayer,
    /// Apparent size multiplier.
    pub scale: f64,
    /// Paint opacity in `[0, 1]`.
    pub opacity: f64,
}

/// Notifications produced by pointer routing.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneEvent {
    /// A press and release on the same node without dragging.
    Clicked {
        /// The clicked node.
        id: ItemId,
    },
    /// The node under a free-moving pointer changed.
    HoverChanged {
        /// Previously hovered node.
        from: Option<ItemId>,
        /// Newly hovered node.
        to: Option<ItemId>,
    },
    /// A dragged node (and its subtree) moved.
    NodeMoved {
        /// The dragged node.
        id: ItemId,
        /// Its new world position.
        position: Point,
    },
    /// A drag on empty space panned the camera.
    Panned {
        /// Pan applied, in world units.
        delta: Vec2,
    },
}

#[derive(Clone, Copy, Debug)]
struct Press {
    target: Option<NodeId>,
    /// Node position minus the world point under the cursor at press time.
    grab: Vec2,
}

/// One interactive constellation session.
///
/// The scene owns the node tree, the [`VisualState`] and the camera. Every
/// state mutation re-resolves all layers from scratch before returning, so
/// [`Scene::layers`] is never stale. Camera operations do not touch layers.
#[derive(Clone, Debug)]
pub struct Scene {
    tree: ConstellationTree,
    state: VisualState,
    camera: Camera3D,
    config: SceneConfig,
    layers: Vec<DepthLayer>,
    drag: DragState,
    press: Option<Press>,
    hover: Option<NodeId>,
}

impl Scene {
    /// Creates a session over `tree` with the default [`SceneConfig`].
    #[must_use]
    pub fn new(tree: ConstellationTree, viewport: Rect) -> Self {
        Self::with_config(tree, viewport, SceneConfig::default())
    }

    /// Creates a session with explicit settings.
    #[must_use]
    pub fn with_config(tree: ConstellationTree, viewport: Rect, config: SceneConfig) -> Self {
        let state = VisualState::new();
        let layers = resolve_all(&tree, &state);
        debug!(nodes = tree.len(), "scene created");
        Self {
            camera: Camera3D::with_config(viewport, config.projection),
            tree,
            state,
            config,
            layers,
            drag: DragState::default(),
            press: None,
            hover: None,
        }
    }

    /// Builds the tree from ingestion records using `config.layout`.
    #[must_use]
    pub fn from_records(records: &[ContainerRecord], viewport: Rect, config: SceneConfig) -> Self {
        let tree = TreeBuilder::new().config(config.layout).build(records);
        Self::with_config(tree, viewport, config)
    }

    /// The node tree.
    #[must_use]
    pub fn tree(&self) -> &ConstellationTree {
        &self.tree
    }

    /// The visualization state.
    #[must_use]
    pub fn state(&self) -> &VisualState {
        &self.state
    }

    /// The camera.
    #[must_use]
    pub fn camera(&self) -> &Camera3D {
        &self.camera
    }

    /// The session settings.
    #[must_use]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Resolved layers, indexed by [`NodeId::index`].
    #[must_use]
    pub fn layers(&self) -> &[DepthLayer] {
        &self.layers
    }

    /// Layer of a node handle; unknown handles are hidden.
    #[must_use]
    pub fn node_layer(&self, node: NodeId) -> DepthLayer {
        self.layers
            .get(node.index())
            .copied()
            .unwrap_or(DepthLayer::Hidden)
    }

    /// Layer of a node or container (its center) by id.
    #[must_use]
    pub fn layer_of(&self, id: &str) -> Option<DepthLayer> {
        self.tree.resolve(id).map(|node| self.node_layer(node))
    }

    /// The node under a free-moving pointer, if any.
    #[must_use]
    pub fn hovered(&self) -> Option<&ItemId> {
        self.hover.and_then(|node| self.tree.get(node)).map(|n| &n.id)
    }

    /// Expands a container.
    pub fn expand(&mut self, container: &str) -> bool {
        let changed = self.state.expand(container);
        self.committed(changed, "expand", container)
    }

    /// Collapses a container.
    pub fn collapse(&mut self, container: &str) -> bool {
        let changed = self.state.collapse(container);
        self.committed(changed, "collapse", container)
    }

    /// Expands a collapsed container or collapses an expanded one.
    pub fn toggle_expanded(&mut self, container: &str) -> bool {
        let changed = self.state.toggle_expanded(container);
        self.committed(changed, "toggle_expanded", container)
    }

    /// Renders the subtree under `id` in place.
    pub fn inline_expand(&mut self, id: &str) -> bool {
        let changed = self.state.inline_expand(id);
        self.committed(changed, "inline_expand", id)
    }

    /// Stops rendering the subtree under `id` in place.
    pub fn inline_collapse(&mut self, id: &str) -> bool {
        let changed = self.state.inline_collapse(id);
        self.committed(changed, "inline_collapse", id)
    }

    /// Moves a branch into the spotlight.
    ///
    /// # Errors
    ///
    /// [`SceneError::UnknownItem`] if `branch_root` names neither a node nor a
    /// container of the tree.
    pub fn promote(&mut self, branch_root: &str) -> Result<PromoteOutcome, SceneError> {
        if self.tree.resolve(branch_root).is_none() {
            return Err(SceneError::unknown(branch_root));
        }
        let outcome = self.state.promote(&self.tree, branch_root);
        if outcome.changed() {
            self.refresh();
        }
        debug!(
            id = branch_root,
            outcome = ?outcome,
            revision = self.state.revision(),
            "promote"
        );
        Ok(outcome)
    }

    /// Returns the spotlit branch to inline context.
    pub fn demote(&mut self) -> bool {
        let changed = self.state.demote();
        self.committed(changed, "demote", "")
    }

    /// Pins an item to the front layer.
    ///
    /// # Errors
    ///
    /// [`SceneError::UnknownItem`] if `item` is not a node of the tree.
    pub fn focus_item(&mut self, item: &str) -> Result<bool, SceneError> {
        if self.tree.node_id(item).is_none() {
            return Err(SceneError::unknown(item));
        }
        let changed = self.state.focus_item(item);
        Ok(self.committed(changed, "focus_item", item))
    }

    /// Unpins an item.
    pub fn unfocus_item(&mut self, item: &str) -> bool {
        let changed = self.state.unfocus_item(item);
        self.committed(changed, "unfocus_item", item)
    }

    /// Puts a container into foreground focus. Refused while a branch is
    /// promoted.
    pub fn focus_constellation(&mut self, container: &str) -> bool {
        let changed = self.state.focus_constellation(container);
        self.committed(changed, "focus_constellation", container)
    }

    /// Leaves foreground focus.
    pub fn clear_focused_constellation(&mut self) -> bool {
        let changed = self.state.clear_focused_constellation();
        self.committed(changed, "clear_focused_constellation", "")
    }

    /// Pans the camera by a world-space delta.
    pub fn pan(&mut self, delta: Vec2) {
        self.camera.pan_by(delta);
        debug!(dx = delta.x, dy = delta.y, "pan");
    }

    /// Rotates the camera, in radians.
    pub fn rotate(&mut self, d_yaw: f64, d_pitch: f64) {
        self.camera.rotate_by(d_yaw, d_pitch);
        debug!(
            yaw = self.camera.yaw(),
            pitch = self.camera.pitch(),
            "rotate"
        );
    }

    /// Multiplies the camera zoom.
    pub fn zoom(&mut self, factor: f64) {
        self.camera.zoom_by(factor);
        debug!(factor, zoom = self.camera.zoom(), "zoom");
    }

    /// Changes the viewport rectangle.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.camera.set_viewport(viewport);
    }

    /// Clears the visual state, resets the camera and drops any pointer
    /// interaction in progress. Node positions are kept.
    pub fn reset(&mut self) {
        self.cancel_pointer();
        self.hover = None;
        self.camera.reset();
        let changed = self.state.reset();
        self.committed(changed, "reset", "");
    }

    /// Every non-hidden node, ordered back to front for painting.
    #[must_use]
    pub fn visible_nodes(&self) -> Vec<VisibleNode> {
        let mut out: Vec<VisibleNode> = self
            .tree
            .iter()
            .filter_map(|(node, n)| {
                let layer = self.node_layer(node);
                if layer.is_hidden() {
                    return None;
                }
                let projected = self.camera.project_at(n.position, layer.world_z());
                Some(VisibleNode {
                    node,
                    id: n.id.clone(),
                    screen: projected.screen,
                    depth: projected.depth,
                    layer,
                    scale: projected.scale,
                    opacity: self.config.opacity(layer),
                })
            })
            .collect();
        out.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        out
    }

    /// Id of the front-most node under `point`.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<&ItemId> {
        self.hit_node(point)
            .and_then(|node| self.tree.get(node))
            .map(|n| &n.id)
    }

    /// Handle of the front-most node under `point`.
    #[must_use]
    pub fn hit_node(&self, point: Point) -> Option<NodeId> {
        hit_test(
            &self.tree,
            &self.layers,
            &self.camera,
            point,
            &self.config.hit,
        )
        .map(|hit| hit.node)
    }

    /// Starts a press at `pos`, on whatever node is under it.
    pub fn pointer_down(&mut self, pos: Point) {
        let target = self.hit_node(pos);
        let grab = target
            .and_then(|node| {
                let position = self.tree.get(node)?.position;
                let under = self
                    .camera
                    .unproject(pos, self.node_layer(node).world_z())?;
                Some(position - under)
            })
            .unwrap_or(Vec2::ZERO);
        self.drag.start(pos);
        self.press = Some(Press { target, grab });
        trace!(x = pos.x, y = pos.y, target = ?target, "pointer down");
    }

    /// Routes a pointer move.
    ///
    /// While pressed, moves past the drag slop drag the pressed node or pan
    /// the camera. Otherwise the hovered node is tracked.
    pub fn pointer_move(&mut self, pos: Point) -> Option<SceneEvent> {
        let Some(press) = self.press else {
            return self.update_hover(pos);
        };
        let delta = self.drag.update(pos, self.config.drag_slop)?;
        match press.target {
            Some(node) => {
                let z = self.node_layer(node).world_z();
                let position = self.camera.unproject(pos, z)? + press.grab;
                self.tree.move_node(node, position);
                let id = self.tree.get(node)?.id.clone();
                trace!(id = %id, x = position.x, y = position.y, "node dragged");
                Some(SceneEvent::NodeMoved { id, position })
            }
            None => {
                let world = delta / self.camera.zoom();
                self.camera.pan_by(world);
                trace!(dx = world.x, dy = world.y, "background dragged");
                Some(SceneEvent::Panned { delta: world })
            }
        }
    }

    /// Ends a press. A release on the pressed node without dragging is a
    /// click.
    pub fn pointer_up(&mut self, pos: Point) -> Option<SceneEvent> {
        let press = self.press.take()?;
        let dragged = self.drag.end();
        trace!(x = pos.x, y = pos.y, dragged, "pointer up");
        if dragged {
            return None;
        }
        let target = press.target?;
        if self.hit_node(pos) != Some(target) {
            return None;
        }
        let id = self.tree.get(target)?.id.clone();
        Some(SceneEvent::Clicked { id })
    }

    /// Abandons any press or drag in progress. Moves already applied stay.
    pub fn cancel_pointer(&mut self) {
        if self.press.take().is_some() {
            self.drag.end();
            trace!("pointer cancelled");
        }
    }

    fn update_hover(&mut self, pos: Point) -> Option<SceneEvent> {
        let now = self.hit_node(pos);
        if now == self.hover {
            return None;
        }
        let from = self.item_id(self.hover);
        let to = self.item_id(now);
        self.hover = now;
        trace!(from = ?from, to = ?to, "hover changed");
        Some(SceneEvent::HoverChanged { from, to })
    }

    fn item_id(&self, node: Option<NodeId>) -> Option<ItemId> {
        node.and_then(|n| self.tree.get(n)).map(|n| n.id.clone())
    }

    fn committed(&mut self, changed: bool, op: &'static str, id: &str) -> bool {
        if changed {
            self.refresh();
            debug!(op, id, revision = self.state.revision(), "visual state changed");
        }
        changed
    }

    fn refresh(&mut self) {
        self.layers = resolve_all(&self.tree, &self.state);
        if self.hover.is_some_and(|node| self.node_layer(node).is_hidden()) {
            self.hover = None;
        }
    }
}
