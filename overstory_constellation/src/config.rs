// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use understory_constellation::{DepthLayer, LayoutConfig};
use understory_depth_hit::HitParams;
use understory_view3d::ProjectionConfig;

/// Settings for a [`Scene`](crate::Scene).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneConfig {
    /// Tree layout, used by [`Scene::from_records`](crate::Scene::from_records).
    pub layout: LayoutConfig,
    /// Camera perspective.
    pub projection: ProjectionConfig,
    /// Hit footprints.
    pub hit: HitParams,
    /// Distance a press must travel before it becomes a drag, in screen units.
    pub drag_slop: f64,
    /// Opacity of the step-back tier.
    pub step_back_opacity: f64,
    /// Opacity lost per level behind the front.
    pub opacity_step: f64,
    /// Lowest opacity of a visible node.
    pub opacity_floor: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            projection: ProjectionConfig::default(),
            hit: HitParams::default(),
            drag_slop: 4.0,
            step_back_opacity: 0.85,
            opacity_step: 0.2,
            opacity_floor: 0.25,
        }
    }
}

impl SceneConfig {
    /// Sets the drag slop.
    #[must_use]
    pub fn with_drag_slop(mut self, slop: f64) -> Self {
        self.drag_slop = slop.max(0.0);
        self
    }

    /// Sets the tree layout.
    #[must_use]
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the camera perspective.
    #[must_use]
    pub fn with_projection(mut self, projection: ProjectionConfig) -> Self {
        self.projection = projection;
        self
    }

    /// Sets the hit footprints.
    #[must_use]
    pub fn with_hit_params(mut self, hit: HitParams) -> Self {
        self.hit = hit;
        self
    }

    /// Paint opacity of a node on `layer`.
    #[must_use]
    pub fn opacity(&self, layer: DepthLayer) -> f64 {
        match layer {
            DepthLayer::Level(0) => 1.0,
            DepthLayer::StepBack => self.step_back_opacity,
            DepthLayer::Level(n) => (1.0 - self.opacity_step * f64::from(n)).max(self.opacity_floor),
            DepthLayer::Hidden => 0.0,
        }
    }
}
