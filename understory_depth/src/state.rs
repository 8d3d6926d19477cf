// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The visualization state sets consulted by the resolver.

use hashbrown::HashSet;
use understory_constellation::{ItemId, Node, normalize_container_id};

use crate::cascade::Promotion;

/// Process-wide visualization state, passed explicitly into every resolution.
///
/// The state is a plain value: it holds no reference to a tree and is never
/// expired implicitly. Each mutation that changes the semantic contents bumps
/// [`VisualState::revision`]; no-op calls leave it unchanged, so observers can
/// cheaply tell whether a recomputation is due.
///
/// Container ids are normalized (see
/// [`normalize_container_id`]) on every entry point, so a center id and its
/// container id always name the same entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisualState {
    pub(crate) expanded: HashSet<ItemId>,
    pub(crate) inline_expanded: HashSet<ItemId>,
    pub(crate) focused_constellation: Option<ItemId>,
    pub(crate) promotion: Option<Promotion>,
    pub(crate) focused_items: HashSet<ItemId>,
    pub(crate) revision: u64,
}

impl VisualState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Monotonic revision, bumped once per effective mutation.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Containers whose direct children are visible.
    pub fn expanded(&self) -> impl Iterator<Item = &ItemId> + '_ {
        self.expanded.iter()
    }

    /// Returns `true` if `container` is expanded.
    #[must_use]
    pub fn is_expanded(&self, container: &str) -> bool {
        self.expanded.contains(normalize_container_id(container))
    }

    /// Ids whose subtree is rendered in place.
    pub fn inline_expanded(&self) -> impl Iterator<Item = &ItemId> + '_ {
        self.inline_expanded.iter()
    }

    /// Returns `true` if `id` is currently inline-expanded.
    ///
    /// Members suspended or carried by an active promotion are not in the set.
    #[must_use]
    pub fn is_inline_expanded(&self, id: &str) -> bool {
        self.inline_expanded.contains(normalize_container_id(id))
    }

    /// The container in foreground-focus mode, if any.
    #[must_use]
    pub fn focused_constellation(&self) -> Option<&ItemId> {
        self.focused_constellation.as_ref()
    }

    /// The active promotion, if any.
    #[must_use]
    pub fn promotion(&self) -> Option<&Promotion> {
        self.promotion.as_ref()
    }

    /// Id of the promoted branch root, if any.
    #[must_use]
    pub fn spotlight(&self) -> Option<&ItemId> {
        self.promotion.as_ref().map(Promotion::root)
    }

    /// Items pinned to the front layer.
    pub fn focused_items(&self) -> impl Iterator<Item = &ItemId> + '_ {
        self.focused_items.iter()
    }

    /// Returns `true` if `item` is pinned to the front layer.
    #[must_use]
    pub fn is_item_focused(&self, item: &str) -> bool {
        self.focused_items.contains(item)
    }

    /// Makes a container's direct children visible.
    pub fn expand(&mut self, container: &str) -> bool {
        let key = normalize_container_id(container);
        if self.expanded.contains(key) {
            return false;
        }
        self.expanded.insert(key.into());
        self.bump_revision();
        true
    }

    /// Hides a container's non-center nodes.
    ///
    /// Inline and spotlight membership are independent of expansion and are
    /// left untouched.
    pub fn collapse(&mut self, container: &str) -> bool {
        if !self.expanded.remove(normalize_container_id(container)) {
            return false;
        }
        self.bump_revision();
        true
    }

    /// Expands a collapsed container or collapses an expanded one.
    pub fn toggle_expanded(&mut self, container: &str) -> bool {
        if self.is_expanded(container) {
            self.collapse(container)
        } else {
            self.expand(container)
        }
    }

    /// Renders the subtree under `id` in place.
    pub fn inline_expand(&mut self, id: &str) -> bool {
        let key = normalize_container_id(id);
        if self.inline_expanded.contains(key) {
            return false;
        }
        self.inline_expanded.insert(key.into());
        self.bump_revision();
        true
    }

    /// Stops rendering the subtree under `id` in place.
    ///
    /// If `id` travels with the promoted branch or is one of its suspended
    /// ancestors, it is also dropped from the promotion cache so demotion
    /// will not bring it back.
    pub fn inline_collapse(&mut self, id: &str) -> bool {
        let key = normalize_container_id(id);
        let removed = self.inline_expanded.remove(key);
        let uncached = self
            .promotion
            .as_mut()
            .is_some_and(|p| p.forget(key));
        if !(removed || uncached) {
            return false;
        }
        self.bump_revision();
        true
    }

    /// Puts `container` into foreground-focus mode.
    ///
    /// Focus and spotlight are mutually exclusive and spotlight wins: while a
    /// branch is promoted this is refused and returns `false`.
    pub fn focus_constellation(&mut self, container: &str) -> bool {
        if self.promotion.is_some() {
            return false;
        }
        let key = normalize_container_id(container);
        if self.focused_constellation.as_ref().is_some_and(|f| f == key) {
            return false;
        }
        self.focused_constellation = Some(key.into());
        self.bump_revision();
        true
    }

    /// Leaves foreground-focus mode.
    pub fn clear_focused_constellation(&mut self) -> bool {
        if self.focused_constellation.take().is_none() {
            return false;
        }
        self.bump_revision();
        true
    }

    /// Pins an item to the front layer.
    pub fn focus_item(&mut self, item: &str) -> bool {
        if self.focused_items.contains(item) {
            return false;
        }
        self.focused_items.insert(item.into());
        self.bump_revision();
        true
    }

    /// Unpins an item.
    pub fn unfocus_item(&mut self, item: &str) -> bool {
        if !self.focused_items.remove(item) {
            return false;
        }
        self.bump_revision();
        true
    }

    /// Pins an unpinned item or unpins a pinned one.
    pub fn toggle_focus_item(&mut self, item: &str) -> bool {
        if self.is_item_focused(item) {
            self.unfocus_item(item)
        } else {
            self.focus_item(item)
        }
    }

    /// Clears every set. Only explicit user action resets the state.
    ///
    /// The revision keeps counting so observers still see the change.
    pub fn reset(&mut self) -> bool {
        let revision = self.revision;
        let empty = Self {
            revision,
            ..Self::default()
        };
        if *self == empty {
            return false;
        }
        *self = empty;
        self.bump_revision();
        true
    }

    pub(crate) fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

/// The key under which a node appears in the expanded and inline sets.
///
/// Centers answer to their normalized container id; everything else to its
/// own id.
pub(crate) fn state_key(node: &Node) -> &str {
    if node.is_center() {
        node.container_key()
    } else {
        node.id.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::VisualState;

    #[test]
    fn expand_normalizes_center_ids() {
        let mut state = VisualState::new();
        assert!(state.expand("docs_center"));
        assert!(state.is_expanded("docs"));
        assert!(state.is_expanded("docs_center"));
        assert!(!state.expand("docs"));
        assert_eq!(state.revision(), 1);
        assert!(state.collapse("docs"));
        assert!(!state.is_expanded("docs_center"));
        assert_eq!(state.revision(), 2);
    }

    #[test]
    fn no_op_mutations_keep_revision() {
        let mut state = VisualState::new();
        assert!(!state.collapse("x"));
        assert!(!state.unfocus_item("x"));
        assert!(!state.inline_collapse("x"));
        assert!(!state.clear_focused_constellation());
        assert!(!state.reset());
        assert_eq!(state.revision(), 0);
    }

    #[test]
    fn toggles_flip_membership() {
        let mut state = VisualState::new();
        assert!(state.toggle_expanded("c"));
        assert!(state.is_expanded("c"));
        assert!(state.toggle_expanded("c"));
        assert!(!state.is_expanded("c"));

        assert!(state.toggle_focus_item("a"));
        assert!(state.is_item_focused("a"));
        assert!(state.toggle_focus_item("a"));
        assert!(!state.is_item_focused("a"));
    }

    #[test]
    fn focus_constellation_is_single_valued() {
        let mut state = VisualState::new();
        assert!(state.focus_constellation("a"));
        assert!(!state.focus_constellation("a_center"));
        assert!(state.focus_constellation("b"));
        assert_eq!(state.focused_constellation().map(|f| f.as_str()), Some("b"));
    }

    #[test]
    fn reset_clears_everything_but_keeps_counting() {
        let mut state = VisualState::new();
        state.expand("c");
        state.inline_expand("f");
        state.focus_item("x");
        state.focus_constellation("c");
        let before = state.revision();
        assert!(state.reset());
        assert_eq!(state.revision(), before + 1);
        assert!(!state.is_expanded("c"));
        assert!(!state.is_inline_expanded("f"));
        assert!(!state.is_item_focused("x"));
        assert!(state.focused_constellation().is_none());
    }
}
