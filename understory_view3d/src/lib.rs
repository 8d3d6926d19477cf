// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_view3d --heading-base-level=0

//! Understory View 3D: a small perspective camera for layered 2D scenes.
//!
//! Content lives on planes of constant world depth (for example the depth
//! layers of a constellation view). [`Camera3D`] orbits that content with a
//! yaw/pitch rotation about the viewport center, pans and zooms it, and maps
//! points in both directions:
//!
//! - [`Camera3D::project`]: world point to screen position, depth and
//!   apparent scale.
//! - [`Camera3D::unproject`]: screen position on a known depth plane back to
//!   world coordinates, for dragging content that sits on that plane.
//!
//! Perspective division is guarded: points that come too close to the eye
//! get a fixed close-up scale instead of a sign flip (see
//! [`ProjectionConfig`]). That region cannot be inverted.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use kurbo::{Point, Rect};
//! use understory_view3d::Camera3D;
//!
//! let mut camera = Camera3D::new(Rect::new(0.0, 0.0, 800.0, 600.0));
//! camera.rotate_by(0.3, -0.2);
//! camera.zoom_by(1.5);
//!
//! let projected = camera.project(DVec3::new(120.0, 80.0, -150.0));
//! let back = camera.unproject(projected.screen, -150.0).unwrap();
//! assert!((back - Point::new(120.0, 80.0)).hypot() < 1e-6);
//! ```
//!
//! The camera owns no scene and does no rendering.
//!
//! This crate is `no_std`.

#![no_std]

mod camera;
mod config;

pub use camera::{Camera3D, Camera3DDebugInfo, DEFAULT_PITCH_LIMIT, Projected};
pub use config::ProjectionConfig;
