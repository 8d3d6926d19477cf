// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_depth --heading-base-level=0

//! Understory Depth: depth layer resolution and spotlight promotion.
//!
//! This crate decides, for every node of a
//! [`ConstellationTree`](understory_constellation::ConstellationTree), which
//! [`DepthLayer`](understory_constellation::DepthLayer) it sits on. It has
//! three parts:
//!
//! - [`VisualState`]: the explicit, versioned state value (expanded
//!   containers, inline-expanded items, focus, pinned items, the active
//!   promotion). It is passed into every call; there is no global state.
//! - [`resolve_layer`] / [`resolve_all`]: the single ordered precedence chain
//!   that maps a node and the state to a layer.
//! - [`VisualState::promote`] / [`VisualState::demote`]: the cascade that
//!   moves a branch into the spotlight, suspending inline traversal above it,
//!   and restores the exact prior inline membership afterwards.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_constellation::{ContainerRecord, DepthLayer, ItemRecord, TreeBuilder};
//! use understory_depth::{VisualState, resolve_layer};
//!
//! let tree = TreeBuilder::new().build(&[ContainerRecord::new("d", Point::ORIGIN)
//!     .with_item(ItemRecord::folder("x").with_child(ItemRecord::document("y")))]);
//! let center = tree.center_of("d").unwrap();
//! let x = tree.node_id("x").unwrap();
//! let y = tree.node_id("y").unwrap();
//!
//! let mut state = VisualState::new();
//! assert_eq!(resolve_layer(&tree, x, &state), DepthLayer::Hidden);
//!
//! state.expand("d");
//! assert_eq!(resolve_layer(&tree, center, &state), DepthLayer::StepBack);
//! assert_eq!(resolve_layer(&tree, x, &state), DepthLayer::FRONT);
//! assert_eq!(resolve_layer(&tree, y, &state), DepthLayer::Hidden);
//!
//! state.inline_expand("x");
//! state.promote(&tree, "x");
//! assert_eq!(resolve_layer(&tree, y, &state), DepthLayer::FRONT);
//!
//! state.demote();
//! assert!(state.is_inline_expanded("x"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cascade;
mod resolve;
mod state;

pub use cascade::{PromoteOutcome, Promotion};
pub use resolve::{
    DepthTrace, Rule, RuleRecorder, resolve_all, resolve_all_traced, resolve_layer,
    resolve_layer_traced,
};
pub use state::VisualState;
