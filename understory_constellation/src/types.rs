// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for constellation trees: identifiers, kinds, and flags.

use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;

/// Suffix appended to a container id to form the id of its center node.
///
/// Children always record the container id *without* this suffix. Use
/// [`normalize_container_id`] before comparing a center id with a child's
/// container id.
pub const CENTER_SUFFIX: &str = "_center";

/// Suffix appended to a parent id to form the id of its overflow placeholder.
pub const OVERFLOW_SUFFIX: &str = "_overflow";

/// Strips [`CENTER_SUFFIX`] from `id`, if present.
///
/// ```rust
/// use understory_constellation::normalize_container_id;
///
/// assert_eq!(normalize_container_id("docs_center"), "docs");
/// assert_eq!(normalize_container_id("docs"), "docs");
/// ```
#[must_use]
pub fn normalize_container_id(id: &str) -> &str {
    id.strip_suffix(CENTER_SUFFIX).unwrap_or(id)
}

/// Stable string identity of an item, container, or center node.
///
/// `ItemId` borrows as `str`, so hashed sets of ids can be probed with plain
/// string slices.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(String);

impl ItemId {
    /// Creates an id from anything string-like.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the id with [`CENTER_SUFFIX`] stripped.
    #[must_use]
    pub fn normalized(&self) -> &str {
        normalize_container_id(&self.0)
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.into())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for ItemId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ItemId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Dense handle of a node inside a [`ConstellationTree`](crate::ConstellationTree).
///
/// Nodes are created once per data load and never removed, so a `NodeId` stays
/// valid for the lifetime of the tree that issued it. Handles are ordered by
/// creation; a parent always has a smaller handle than its descendants.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "the arena is never grown past u32::MAX nodes"
    )]
    pub(crate) const fn from_index(idx: usize) -> Self {
        Self(idx as u32)
    }

    /// Position of this node in the tree's arena.
    ///
    /// Per-node outputs such as resolved layers are stored in vectors indexed
    /// by this value.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// What an item represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ItemKind {
    /// A leaf document.
    #[default]
    Document,
    /// A folder that may own nested items.
    Folder,
    /// The center node of a container.
    #[cfg_attr(feature = "serde", serde(rename = "container-center", alias = "center"))]
    Center,
}

bitflags::bitflags! {
    /// Structural flags of a node.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u8 {
        /// The node is the center of its container.
        const CENTER   = 0b0000_0001;
        /// The node is a synthetic "+N more" placeholder.
        const OVERFLOW = 0b0000_0010;
        /// The node is the center of the designated home container.
        const HOME     = 0b0000_0100;
    }
}
