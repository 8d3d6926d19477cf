// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Promotion cascade: moving a branch into the spotlight and back.
//!
//! Promoting a branch does three things in one step:
//!
//! 1. Every inline-expanded node of the branch (its root included) *travels*
//!    with the promotion: it leaves the inline set and is remembered as
//!    carried, so its children keep their forward depth inside the spotlight.
//! 2. Every inline-expanded *ancestor* of the root is *suspended*: it leaves
//!    the inline set for the duration, so inline traversal from above can never
//!    reassign depth inside the spotlit branch.
//! 3. The foreground focus is cleared, since spotlight and focus are mutually
//!    exclusive.
//!
//! [`VisualState::demote`] re-adds exactly the cached membership. For any
//! state reached without further inline edits, promote followed by demote is
//! the identity on the inline set.

use smallvec::SmallVec;
use understory_constellation::{ConstellationTree, ItemId, NodeId};

use crate::state::{VisualState, state_key};

/// Cached membership of an active promotion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Promotion {
    root: ItemId,
    root_node: NodeId,
    carried: SmallVec<[ItemId; 4]>,
    suspended: SmallVec<[ItemId; 4]>,
}

impl Promotion {
    /// State key of the promoted branch root.
    #[must_use]
    pub fn root(&self) -> &ItemId {
        &self.root
    }

    /// Tree handle of the promoted branch root.
    #[must_use]
    pub fn root_node(&self) -> NodeId {
        self.root_node
    }

    /// Members of the branch that were inline-expanded when promoted.
    #[must_use]
    pub fn carried(&self) -> &[ItemId] {
        &self.carried
    }

    /// Ancestors of the root that were inline-expanded when promoted.
    #[must_use]
    pub fn suspended(&self) -> &[ItemId] {
        &self.suspended
    }

    /// Returns `true` if `key` travels with this promotion.
    #[must_use]
    pub fn carries(&self, key: &str) -> bool {
        self.carried.iter().any(|c| c == key)
    }

    /// Drops `key` from both caches so demotion will not restore it.
    pub(crate) fn forget(&mut self, key: &str) -> bool {
        let before = self.carried.len() + self.suspended.len();
        self.carried.retain(|c| c != key);
        self.suspended.retain(|s| s != key);
        self.carried.len() + self.suspended.len() != before
    }
}

/// Result of [`VisualState::promote`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PromoteOutcome {
    /// The branch is now in the spotlight.
    Promoted {
        /// Root of the previously promoted branch, demoted first.
        replaced: Option<ItemId>,
    },
    /// The branch was already promoted; nothing changed.
    AlreadyPromoted,
    /// The id names neither a node nor a container of the tree.
    UnknownBranch,
}

impl PromoteOutcome {
    /// Returns `true` if the state changed.
    #[must_use]
    pub fn changed(&self) -> bool {
        matches!(self, Self::Promoted { .. })
    }
}

impl VisualState {
    /// Moves the branch rooted at `branch_root` into the spotlight.
    ///
    /// `branch_root` may name a node or a container (in which case its center
    /// is the root). Any other active promotion is demoted first. The whole
    /// transition bumps the revision once.
    pub fn promote(&mut self, tree: &ConstellationTree, branch_root: &str) -> PromoteOutcome {
        let Some(root_node) = tree.resolve(branch_root) else {
            return PromoteOutcome::UnknownBranch;
        };
        let Some(root) = tree.get(root_node) else {
            return PromoteOutcome::UnknownBranch;
        };
        let root_key = ItemId::from(state_key(root));

        if self.promotion.as_ref().is_some_and(|p| p.root == root_key) {
            return PromoteOutcome::AlreadyPromoted;
        }
        let replaced = self.promotion.take().map(|old| {
            let root = old.root.clone();
            self.restore(old);
            root
        });

        let mut carried: SmallVec<[ItemId; 4]> = SmallVec::new();
        if self.inline_expanded.contains(root_key.as_str()) {
            carried.push(root_key.clone());
        }
        for descendant in tree.descendants(root_node) {
            let Some(node) = tree.get(descendant) else {
                continue;
            };
            let key = state_key(node);
            if self.inline_expanded.contains(key) && !carried.iter().any(|c| c == key) {
                carried.push(key.into());
            }
        }

        let mut suspended: SmallVec<[ItemId; 4]> = SmallVec::new();
        let container_key = root.container_key();
        let ancestor_keys = tree
            .ancestors(root_node)
            .filter_map(|a| tree.get(a))
            .map(state_key)
            .chain((container_key != root_key.as_str()).then_some(container_key));
        for key in ancestor_keys {
            if self.inline_expanded.contains(key)
                && !suspended.iter().any(|s| s == key)
                && !carried.iter().any(|c| c == key)
            {
                suspended.push(key.into());
            }
        }

        for key in carried.iter().chain(suspended.iter()) {
            self.inline_expanded.remove(key.as_str());
        }
        self.focused_constellation = None;
        self.promotion = Some(Promotion {
            root: root_key,
            root_node,
            carried,
            suspended,
        });
        self.bump_revision();
        PromoteOutcome::Promoted { replaced }
    }

    /// Returns the spotlight to inline context, restoring the cached
    /// inline membership. Expansion state is untouched.
    pub fn demote(&mut self) -> bool {
        let Some(old) = self.promotion.take() else {
            return false;
        };
        self.restore(old);
        self.bump_revision();
        true
    }

    /// Value-returning form of [`VisualState::promote`].
    ///
    /// The [`PromoteOutcome`] is dropped: an unknown or already promoted
    /// branch yields a state equal to `self`. Call [`VisualState::promote`]
    /// on a clone to tell those apart.
    #[must_use]
    pub fn promoted(&self, tree: &ConstellationTree, branch_root: &str) -> Self {
        let mut next = self.clone();
        let _ = next.promote(tree, branch_root);
        next
    }

    /// Value-returning form of [`VisualState::demote`].
    #[must_use]
    pub fn demoted(&self) -> Self {
        let mut next = self.clone();
        next.demote();
        next
    }

    fn restore(&mut self, promotion: Promotion) {
        self.inline_expanded
            .extend(promotion.carried.into_iter().chain(promotion.suspended));
    }
}
