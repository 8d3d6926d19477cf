// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=overstory_constellation --heading-base-level=0

//! Overstory Constellation: an interactive depth-layered constellation session.
//!
//! [`Scene`] wires the Understory constellation kernels together:
//!
//! - `understory_constellation` builds the node tree from ingestion records.
//! - `understory_depth` holds the visual state and resolves every node's layer.
//! - `understory_view3d` projects nodes through an orbiting perspective camera.
//! - `understory_depth_hit` answers which node is under the pointer.
//!
//! On top of that the scene exposes the mutation entry points input handlers
//! call (`expand`, `promote`, `focus_item`, `pan`, `rotate`, `zoom`, ...), the
//! per-node output a renderer paints ([`Scene::visible_nodes`]), and pointer
//! routing: dragging a node repositions it on its own depth plane, dragging
//! empty space pans, and a press-release without movement is a click.
//!
//! State changes are logged through `tracing` at `debug` level, pointer
//! routing at `trace` level. Install any subscriber to see them.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use overstory_constellation::{Scene, SceneConfig, SceneEvent};
//! use understory_constellation::{ContainerRecord, DepthLayer, ItemRecord};
//!
//! let records = [ContainerRecord::new("docs", Point::new(400.0, 300.0))
//!     .with_item(ItemRecord::document("readme").at(0.0, 200.0))];
//! let mut scene = Scene::from_records(
//!     &records,
//!     Rect::new(0.0, 0.0, 800.0, 600.0),
//!     SceneConfig::default(),
//! );
//!
//! assert_eq!(scene.layer_of("readme"), Some(DepthLayer::Hidden));
//! scene.expand("docs");
//! assert_eq!(scene.layer_of("readme"), Some(DepthLayer::FRONT));
//!
//! let at = Point::new(600.0, 300.0);
//! assert_eq!(scene.hit_test(at).map(|id| id.as_str()), Some("readme"));
//! scene.pointer_down(at);
//! assert_eq!(
//!     scene.pointer_up(at),
//!     Some(SceneEvent::Clicked { id: "readme".into() })
//! );
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod drag;
mod error;
mod scene;

pub use config::SceneConfig;
pub use drag::DragState;
pub use error::SceneError;
pub use scene::{Scene, SceneEvent, VisibleNode};
