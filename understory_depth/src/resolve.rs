// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Depth layer resolution.
//!
//! A node's layer is a pure function of the node, its ancestor chain and the
//! [`VisualState`]. Rules are checked in a single fixed order and the first
//! match wins, so a node is never visited by two competing modes:
//!
//! | # | Condition | Layer |
//! |---|-----------|-------|
//! | 1 | node is a focused item | front |
//! | 2 | node is the spotlight root, or below it | front, or hidden when a node in between is closed |
//! | 3 | node's container is expanded | center steps back (home stays front); children come forward |
//! | 4 | container collapsed, node is not a center | hidden |
//! | 5 | fallback | focus shift, static hint, or a parent-based default |
//!
//! For explainability, [`resolve_layer_traced`] reports the [`Rule`] that
//! fired to a [`DepthTrace`] sink such as [`RuleRecorder`].

use alloc::vec::Vec;

use understory_constellation::{ConstellationTree, DepthLayer, Node, NodeId};

use crate::cascade::Promotion;
use crate::state::{VisualState, state_key};

/// The rule that decided a node's layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    /// The handle does not belong to the tree.
    UnknownNode,
    /// The node is pinned with [`VisualState::focus_item`].
    FocusedItem,
    /// The node is the promoted branch root.
    SpotlightRoot,
    /// Below the spotlight root with every node in between open.
    SpotlightOpen,
    /// Below the spotlight root behind a closed node.
    SpotlightClosed,
    /// Center of an expanded container.
    ExpandedCenter,
    /// Center of the expanded home container.
    HomeCenter,
    /// Direct child (or detached root) of an expanded container.
    ExpandedChild,
    /// Nested node whose item ancestors are all inline-expanded.
    InlineOpen,
    /// Nested node behind a collapsed inline ancestor.
    InlineClosed,
    /// Non-center node of a collapsed container.
    Collapsed,
    /// Center of the focused constellation.
    FocusedCenter,
    /// Center pushed back by another constellation's focus.
    UnfocusedCenter,
    /// The node's static depth hint.
    Hint,
    /// No hint; the node has a parent.
    ParentDefault,
    /// No hint; the node is a root.
    RootDefault,
}

/// A callback sink for resolution tracing.
pub trait DepthTrace {
    /// Called once per resolved node with the rule that fired.
    fn resolved(&mut self, node: NodeId, rule: Rule, layer: DepthLayer);
}

impl DepthTrace for () {
    #[inline]
    fn resolved(&mut self, _node: NodeId, _rule: Rule, _layer: DepthLayer) {}
}

/// Records the deciding rule of every node resolved through it.
#[derive(Clone, Debug, Default)]
pub struct RuleRecorder {
    rules: Vec<Option<(Rule, DepthLayer)>>,
}

impl RuleRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets every recorded rule.
    pub fn clear(&mut self) {
        self.rules.clear();
    }

    /// Rule that decided `node`, if it was resolved.
    #[must_use]
    pub fn rule(&self, node: NodeId) -> Option<Rule> {
        self.entry(node).map(|(rule, _)| rule)
    }

    /// Rule and layer recorded for `node`.
    #[must_use]
    pub fn entry(&self, node: NodeId) -> Option<(Rule, DepthLayer)> {
        self.rules.get(node.index()).copied().flatten()
    }
}

impl DepthTrace for RuleRecorder {
    fn resolved(&mut self, node: NodeId, rule: Rule, layer: DepthLayer) {
        let idx = node.index();
        if self.rules.len() <= idx {
            self.rules.resize(idx + 1, None);
        }
        self.rules[idx] = Some((rule, layer));
    }
}

/// Resolves the depth layer of one node.
///
/// Handles the tree did not issue resolve to [`DepthLayer::Hidden`].
#[must_use]
pub fn resolve_layer(tree: &ConstellationTree, id: NodeId, state: &VisualState) -> DepthLayer {
    resolve_layer_traced(tree, id, state, &mut ())
}

/// Like [`resolve_layer`], reporting the deciding rule to `trace`.
pub fn resolve_layer_traced(
    tree: &ConstellationTree,
    id: NodeId,
    state: &VisualState,
    trace: &mut impl DepthTrace,
) -> DepthLayer {
    let spotlight = spotlight_root(tree, state);
    let (rule, layer) = decide(tree, id, state, spotlight);
    trace.resolved(id, rule, layer);
    layer
}

/// Resolves every node of `tree`, indexed by [`NodeId::index`].
///
/// The result is always computed from scratch; nothing is cached between
/// calls.
#[must_use]
pub fn resolve_all(tree: &ConstellationTree, state: &VisualState) -> Vec<DepthLayer> {
    resolve_all_traced(tree, state, &mut ())
}

/// Like [`resolve_all`], reporting each node's deciding rule to `trace`.
pub fn resolve_all_traced(
    tree: &ConstellationTree,
    state: &VisualState,
    trace: &mut impl DepthTrace,
) -> Vec<DepthLayer> {
    let spotlight = spotlight_root(tree, state);
    tree.iter()
        .map(|(id, _)| {
            let (rule, layer) = decide(tree, id, state, spotlight);
            trace.resolved(id, rule, layer);
            layer
        })
        .collect()
}

fn spotlight_root<'s>(
    tree: &ConstellationTree,
    state: &'s VisualState,
) -> Option<(NodeId, &'s Promotion)> {
    let promotion = state.promotion.as_ref()?;
    let root = tree.resolve(promotion.root().as_str())?;
    Some((root, promotion))
}

fn decide(
    tree: &ConstellationTree,
    id: NodeId,
    state: &VisualState,
    spotlight: Option<(NodeId, &Promotion)>,
) -> (Rule, DepthLayer) {
    let Some(node) = tree.get(id) else {
        return (Rule::UnknownNode, DepthLayer::Hidden);
    };

    if state.focused_items.contains(node.id.as_str()) {
        return (Rule::FocusedItem, DepthLayer::FRONT);
    }

    if let Some((root, promotion)) = spotlight
        && let Some(decided) = spotlight_rule(tree, id, root, state, promotion)
    {
        return decided;
    }

    let container = node.container_key();
    if state.expanded.contains(container) {
        return expanded_rule(tree, id, node, state);
    }
    if !node.is_center() {
        return (Rule::Collapsed, DepthLayer::Hidden);
    }

    fallback(node, state)
}

/// Returns `None` when `id` lies outside the spotlit branch.
fn spotlight_rule(
    tree: &ConstellationTree,
    id: NodeId,
    root: NodeId,
    state: &VisualState,
    promotion: &Promotion,
) -> Option<(Rule, DepthLayer)> {
    if id == root {
        return Some((Rule::SpotlightRoot, DepthLayer::FRONT));
    }
    let mut open = true;
    for ancestor in tree.ancestors(id) {
        if ancestor == root {
            return Some(if open {
                (Rule::SpotlightOpen, DepthLayer::FRONT)
            } else {
                (Rule::SpotlightClosed, DepthLayer::Hidden)
            });
        }
        if open {
            let key = tree.get(ancestor).map(state_key).unwrap_or_default();
            open = promotion.carries(key) || state.inline_expanded.contains(key);
        }
    }
    None
}

fn expanded_rule(
    tree: &ConstellationTree,
    id: NodeId,
    node: &Node,
    state: &VisualState,
) -> (Rule, DepthLayer) {
    if node.is_center() {
        return if node.is_home() {
            (Rule::HomeCenter, DepthLayer::FRONT)
        } else {
            (Rule::ExpandedCenter, DepthLayer::StepBack)
        };
    }
    let Some(parent) = node.parent else {
        return (Rule::ExpandedChild, DepthLayer::FRONT);
    };
    if tree.get(parent).is_none_or(Node::is_center) {
        return (Rule::ExpandedChild, DepthLayer::FRONT);
    }
    for ancestor in tree.ancestors(id) {
        let Some(up) = tree.get(ancestor) else {
            break;
        };
        if up.is_center() {
            break;
        }
        if !state.inline_expanded.contains(state_key(up)) {
            return (Rule::InlineClosed, DepthLayer::Hidden);
        }
    }
    (Rule::InlineOpen, DepthLayer::FRONT)
}

/// Only centers get here. `TreeBuilder` always gives centers a hint, so the
/// hintless arms only fire for nodes assembled by hand.
fn fallback(node: &Node, state: &VisualState) -> (Rule, DepthLayer) {
    if node.is_center()
        && let Some(focused) = state.focused_constellation.as_ref()
    {
        let hint = node.depth_hint.unwrap_or(DepthLayer::FRONT);
        return if focused == node.container_key() {
            (Rule::FocusedCenter, DepthLayer::FRONT)
        } else {
            (Rule::UnfocusedCenter, hint.next_back())
        };
    }
    match node.depth_hint {
        Some(hint) => (Rule::Hint, hint),
        None if node.parent.is_some() => (Rule::ParentDefault, DepthLayer::StepBack),
        None => (Rule::RootDefault, DepthLayer::FRONT),
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;
    use understory_constellation::{ContainerRecord, DepthLayer, ItemRecord, TreeBuilder};

    use super::{Rule, RuleRecorder, fallback, resolve_layer_traced};
    use crate::VisualState;

    #[test]
    fn collapsed_centers_use_their_hint() {
        let tree = TreeBuilder::new().build(&[
            ContainerRecord::new("near", Point::ORIGIN),
            ContainerRecord::new("far", Point::ORIGIN).with_depth(2.0),
        ]);
        let state = VisualState::new();
        let mut recorder = RuleRecorder::new();
        let far = tree.center_of("far").unwrap();
        let layer = resolve_layer_traced(&tree, far, &state, &mut recorder);
        assert_eq!(layer, DepthLayer::Level(2));
        assert_eq!(recorder.rule(far), Some(Rule::Hint));
        let near = tree.center_of("near").unwrap();
        assert_eq!(recorder.rule(near), None);
    }

    #[test]
    fn unfocused_centers_step_back_from_their_hint() {
        let tree = TreeBuilder::new().build(&[
            ContainerRecord::new("a", Point::ORIGIN),
            ContainerRecord::new("b", Point::ORIGIN).with_depth(1.0),
        ]);
        let mut state = VisualState::new();
        state.focus_constellation("a");
        let mut recorder = RuleRecorder::new();
        let b = tree.center_of("b").unwrap();
        let layer = resolve_layer_traced(&tree, b, &state, &mut recorder);
        assert_eq!(layer, DepthLayer::Level(2));
        assert_eq!(recorder.rule(b), Some(Rule::UnfocusedCenter));
    }

    #[test]
    fn detached_items_of_expanded_containers_come_forward() {
        let tree = TreeBuilder::new().build(&[ContainerRecord::new("c", Point::ORIGIN)
            .with_item(ItemRecord::document("lost").with_parent("nowhere"))]);
        let mut state = VisualState::new();
        state.expand("c");
        let lost = tree.node_id("lost").unwrap();
        let mut recorder = RuleRecorder::new();
        let layer = resolve_layer_traced(&tree, lost, &state, &mut recorder);
        assert_eq!(layer, DepthLayer::FRONT);
        assert_eq!(recorder.rule(lost), Some(Rule::ExpandedChild));
    }

    #[test]
    fn hintless_nodes_default_by_parentage() {
        let tree = TreeBuilder::new().build(&[ContainerRecord::new("c", Point::ORIGIN)]);
        let state = VisualState::new();
        let mut node = tree.node_by_id("c_center").unwrap().clone();
        node.depth_hint = None;
        assert_eq!(
            fallback(&node, &state),
            (Rule::RootDefault, DepthLayer::FRONT)
        );
        node.parent = tree.center_of("c");
        assert_eq!(
            fallback(&node, &state),
            (Rule::ParentDefault, DepthLayer::StepBack)
        );
    }
}
