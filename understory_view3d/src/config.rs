// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Perspective parameters shared by projection and inverse projection.
///
/// Along the view axis the perspective factor is
/// `focal_distance / (focal_distance - z)`. When the denominator falls to
/// `near_threshold` or below, the factor is pinned to `close_up_scale`
/// instead of dividing by a tiny or negative value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionConfig {
    /// Distance from the eye to the `z = 0` plane, in world units.
    pub focal_distance: f64,
    /// Smallest perspective denominator that is still divided by.
    pub near_threshold: f64,
    /// Scale used at and below the threshold.
    pub close_up_scale: f64,
}

impl ProjectionConfig {
    /// Builds a config whose close-up scale matches the perspective factor
    /// right at the threshold, so the clamp does not jump.
    #[must_use]
    pub fn new(focal_distance: f64, near_threshold: f64) -> Self {
        let near_threshold = near_threshold.max(f64::MIN_POSITIVE);
        Self {
            focal_distance,
            near_threshold,
            close_up_scale: focal_distance / near_threshold,
        }
    }

    /// Perspective factor for a rotated depth `z`, and whether it was clamped.
    #[must_use]
    pub fn perspective(&self, z: f64) -> (f64, bool) {
        let denom = self.focal_distance - z;
        if denom <= self.near_threshold {
            (self.close_up_scale, true)
        } else {
            (self.focal_distance / denom, false)
        }
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self::new(1000.0, 10.0)
    }
}
