// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::f64::consts::PI;

use glam::{DMat3, DVec3};
use kurbo::{Point, Rect, Vec2};

use crate::config::ProjectionConfig;

/// Denominators smaller than this make [`Camera3D::unproject`] give up.
const PARALLEL_EPSILON: f64 = 1e-9;

/// Default pitch limit, 80 degrees.
pub const DEFAULT_PITCH_LIMIT: f64 = 80.0 * (PI / 180.0);

/// Result of projecting one world-space point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    /// Position in view/device coordinates.
    pub screen: Point,
    /// Depth along the view axis after rotation; larger is closer.
    pub depth: f64,
    /// Apparent size multiplier (perspective factor times zoom).
    pub scale: f64,
    /// The point fell inside the close-up clamp region.
    pub clamped: bool,
}

/// Orbiting perspective camera over a world-space scene.
///
/// The forward pipeline is:
///
/// 1. translate by the pan offset;
/// 2. move the viewport center to the origin;
/// 3. rotate about Y by `yaw`, then about X by `pitch`;
/// 4. divide by perspective (see [`ProjectionConfig`]);
/// 5. scale by `zoom`;
/// 6. move the origin back to the viewport center.
///
/// [`Camera3D::unproject`] runs the same steps backwards with the transposed
/// rotation and is exact outside the clamp region.
#[derive(Clone, Debug)]
pub struct Camera3D {
    viewport: Rect,
    pan: Vec2,
    yaw: f64,
    pitch: f64,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
    pitch_limit: f64,
    config: ProjectionConfig,
    rotation: DMat3,
    inverse: DMat3,
}

impl Camera3D {
    /// Creates a camera looking straight at `viewport`.
    ///
    /// - Initial zoom is `1.0`, pan zero, yaw and pitch zero.
    /// - Zoom is clamped to `[0.1, 10]` by default.
    /// - Pitch is clamped to `±80°` by default.
    #[must_use]
    pub fn new(viewport: Rect) -> Self {
        Self::with_config(viewport, ProjectionConfig::default())
    }

    /// Creates a camera with explicit perspective parameters.
    #[must_use]
    pub fn with_config(viewport: Rect, config: ProjectionConfig) -> Self {
        Self {
            viewport,
            pan: Vec2::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 10.0,
            pitch_limit: DEFAULT_PITCH_LIMIT,
            config,
            rotation: DMat3::IDENTITY,
            inverse: DMat3::IDENTITY,
        }
    }

    /// Returns the viewport rectangle in device coordinates.
    #[must_use]
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Sets the viewport rectangle. The rotation origin follows its center.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    /// Returns the perspective parameters.
    #[must_use]
    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Returns the pan offset in world units.
    #[must_use]
    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    /// Returns the rotation about the Y axis, in radians.
    #[must_use]
    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    /// Returns the rotation about the X axis, in radians.
    #[must_use]
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Returns the uniform zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Pans by a delta in world units.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Rotates by the given yaw and pitch deltas, in radians.
    ///
    /// Pitch is kept within the configured limit; yaw is free.
    pub fn rotate_by(&mut self, d_yaw: f64, d_pitch: f64) {
        self.set_rotation(self.yaw + d_yaw, self.pitch + d_pitch);
    }

    /// Sets yaw and pitch, clamping pitch.
    pub fn set_rotation(&mut self, yaw: f64, pitch: f64) {
        if !yaw.is_finite() || !pitch.is_finite() {
            return;
        }
        self.yaw = yaw;
        self.pitch = pitch.clamp(-self.pitch_limit, self.pitch_limit);
        self.rebuild_rotation();
    }

    /// Sets the largest absolute pitch, in radians, and re-clamps.
    pub fn set_pitch_limit(&mut self, limit: f64) {
        self.pitch_limit = limit.abs().min(PI / 2.0);
        self.set_rotation(self.yaw, self.pitch);
    }

    /// Multiplies the zoom by `factor`, clamped into the zoom range.
    ///
    /// Non-positive factors are ignored.
    pub fn zoom_by(&mut self, factor: f64) {
        if factor <= 0.0 || !factor.is_finite() {
            return;
        }
        self.set_zoom(self.zoom * factor);
    }

    /// Sets the zoom factor, clamping it into the zoom range.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_nan() {
            return;
        }
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Sets the minimum and maximum zoom factors.
    ///
    /// The range is normalized so that `min_zoom <= max_zoom` and must stay
    /// positive; the current zoom is clamped into it.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = min_zoom.max(f64::MIN_POSITIVE);
        self.max_zoom = max_zoom.max(self.min_zoom);
        self.set_zoom(self.zoom);
    }

    /// Returns pan, rotation and zoom to their initial values.
    pub fn reset(&mut self) {
        self.pan = Vec2::ZERO;
        self.zoom = 1.0_f64.clamp(self.min_zoom, self.max_zoom);
        self.set_rotation(0.0, 0.0);
    }

    /// Projects a world-space point into view coordinates.
    #[must_use]
    pub fn project(&self, world: DVec3) -> Projected {
        let center = self.viewport.center();
        let local = DVec3::new(
            world.x + self.pan.x - center.x,
            world.y + self.pan.y - center.y,
            world.z,
        );
        let rotated = self.rotation * local;
        let (perspective, clamped) = self.config.perspective(rotated.z);
        let scale = perspective * self.zoom;
        Projected {
            screen: Point::new(rotated.x * scale + center.x, rotated.y * scale + center.y),
            depth: rotated.z,
            scale,
            clamped,
        }
    }

    /// Projects a planar point placed at world depth `z`.
    #[must_use]
    pub fn project_at(&self, point: Point, z: f64) -> Projected {
        self.project(DVec3::new(point.x, point.y, z))
    }

    /// Recovers the world-space point at depth `world_z` that projects to
    /// `screen`.
    ///
    /// After rotation the depth of the point depends on its unknown `x`/`y`,
    /// so the inverse solves for the perspective factor that puts the point
    /// back on the plane `z = world_z`.
    ///
    /// Returns `None` when the view ray is parallel to that plane, or when
    /// the solution lies in the close-up clamp region, which has no inverse.
    #[must_use]
    pub fn unproject(&self, screen: Point, world_z: f64) -> Option<Point> {
        let center = self.viewport.center();
        let focal = self.config.focal_distance;
        let u = (screen.x - center.x) / self.zoom;
        let v = (screen.y - center.y) / self.zoom;

        // Undone perspective: rotated = (u k, v k, focal (1 - k)) with
        // k = (focal - z') / focal; the third row of the inverse rotation
        // must land on `world_z`.
        let plane = self.inverse.row(2);
        let denom = plane.x * u + plane.y * v - plane.z * focal;
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let k = (world_z - plane.z * focal) / denom;
        if focal * k <= self.config.near_threshold {
            return None;
        }
        let rotated = DVec3::new(u * k, v * k, focal * (1.0 - k));
        let local = self.inverse * rotated;
        Some(Point::new(
            local.x + center.x - self.pan.x,
            local.y + center.y - self.pan.y,
        ))
    }

    /// Snapshot of the current camera state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> Camera3DDebugInfo {
        Camera3DDebugInfo {
            viewport: self.viewport,
            pan: self.pan,
            yaw: self.yaw,
            pitch: self.pitch,
            zoom: self.zoom,
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
            pitch_limit: self.pitch_limit,
            config: self.config,
        }
    }

    fn rebuild_rotation(&mut self) {
        self.rotation = DMat3::from_rotation_x(self.pitch) * DMat3::from_rotation_y(self.yaw);
        self.inverse = self.rotation.transpose();
    }
}

/// Debug snapshot of a [`Camera3D`] state.
#[derive(Clone, Copy, Debug)]
pub struct Camera3DDebugInfo {
    /// Viewport rectangle in device coordinates.
    pub viewport: Rect,
    /// Pan offset in world units.
    pub pan: Vec2,
    /// Rotation about Y, in radians.
    pub yaw: f64,
    /// Rotation about X, in radians.
    pub pitch: f64,
    /// Uniform zoom factor.
    pub zoom: f64,
    /// Minimum zoom factor.
    pub min_zoom: f64,
    /// Maximum zoom factor.
    pub max_zoom: f64,
    /// Largest absolute pitch.
    pub pitch_limit: f64,
    /// Perspective parameters.
    pub config: ProjectionConfig,
}
