// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_constellation --heading-base-level=0

//! Understory Constellation: flat node trees for depth-layered constellation views.
//!
//! A constellation view renders a hierarchy of items (documents, folders,
//! container centers) as a node graph where every node sits on a discrete depth
//! layer. This crate owns the structural half of that picture:
//!
//! - [`ContainerRecord`] / [`ItemRecord`]: the raw ingestion records.
//! - [`TreeBuilder`]: orbital layout. Each container gets a center node; items
//!   fan out around their parent at evenly spaced angles, nested items at a
//!   growing radius, and fan-out beyond a cap collapses into a synthetic
//!   "+N more" overflow node.
//! - [`ConstellationTree`]: an arena of [`Node`]s addressed by [`NodeId`], with
//!   parent back-references, ancestor walks and subtree scans.
//! - [`DepthLayer`]: the ordered set of named depth tiers and their world-space
//!   distances.
//!
//! It does **not** decide which layer a node is on at any moment; that is a
//! function of user state and lives in `understory_depth`.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_constellation::{ContainerRecord, ItemRecord, TreeBuilder};
//!
//! let docs = ContainerRecord::new("docs", Point::new(400.0, 300.0))
//!     .as_home()
//!     .with_item(ItemRecord::document("a"))
//!     .with_item(ItemRecord::document("b"))
//!     .with_item(ItemRecord::folder("c").with_child(ItemRecord::document("c1")));
//!
//! let tree = TreeBuilder::new().build(&[docs]);
//!
//! // One center plus four items.
//! assert_eq!(tree.len(), 5);
//! let center = tree.center_of("docs").unwrap();
//! let c1 = tree.node_id("c1").unwrap();
//! assert!(tree.is_ancestor(center, c1));
//! assert_eq!(tree.home().map(|h| h.as_str()), Some("docs"));
//! ```
//!
//! ## Identity rules
//!
//! Center nodes are named `"{container}{CENTER_SUFFIX}"`, while every other
//! node records the bare container id in [`Node::constellation`]. Any code that
//! compares the two must go through [`normalize_container_id`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod builder;
mod layer;
mod record;
mod tree;
mod types;

pub use builder::{LayoutConfig, TreeBuilder};
pub use layer::{DepthLayer, HIDDEN_SCALAR, HIDDEN_Z, LEVEL_SPACING, STEP_BACK_SCALAR, STEP_BACK_Z};
pub use record::{ContainerRecord, ItemRecord};
pub use tree::{Ancestors, ConstellationTree, Node};
pub use types::{
    CENTER_SUFFIX, ItemId, ItemKind, NodeFlags, NodeId, OVERFLOW_SUFFIX, normalize_container_id,
};
