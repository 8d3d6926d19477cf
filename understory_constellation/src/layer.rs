// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named depth tiers and their world-space distances.

use core::cmp::Ordering;

/// World-Z distance between two consecutive integer levels.
pub const LEVEL_SPACING: f64 = 150.0;

/// World-Z of [`DepthLayer::StepBack`].
pub const STEP_BACK_Z: f64 = -100.0;

/// World-Z of [`DepthLayer::Hidden`]; far enough to land behind everything.
pub const HIDDEN_Z: f64 = -2000.0;

/// Legacy scalar reported for [`DepthLayer::Hidden`].
pub const HIDDEN_SCALAR: f64 = 999.0;

/// Legacy scalar reported for [`DepthLayer::StepBack`].
pub const STEP_BACK_SCALAR: f64 = 1.5;

/// Apparent distance of a node from the viewer.
///
/// Layers form an ordered scale rather than a plain index: besides the integer
/// levels there is a "step halfway back" tier used by expanded container
/// centers, and a hidden tier for nodes that are neither rendered nor
/// hit-testable.
///
/// Ordering follows apparent distance, nearest first:
///
/// ```rust
/// use understory_constellation::DepthLayer;
///
/// assert!(DepthLayer::FRONT < DepthLayer::StepBack);
/// assert!(DepthLayer::StepBack < DepthLayer::Level(1));
/// assert!(DepthLayer::Level(7) < DepthLayer::Hidden);
/// assert_eq!(DepthLayer::StepBack.world_z(), -100.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DepthLayer {
    /// Integer level `n`, `n * 150` world units behind the front plane.
    Level(u16),
    /// In front of level 1 but behind level 0.
    StepBack,
    /// Not rendered and not hit-testable.
    Hidden,
}

impl DepthLayer {
    /// The frontmost tier.
    pub const FRONT: Self = Self::Level(0);

    /// Returns `true` for [`DepthLayer::Hidden`].
    #[must_use]
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    /// World-space Z offset used by projection.
    #[must_use]
    pub fn world_z(self) -> f64 {
        match self {
            Self::Level(n) => -LEVEL_SPACING * f64::from(n),
            Self::StepBack => STEP_BACK_Z,
            Self::Hidden => HIDDEN_Z,
        }
    }

    /// The scalar form used by presentation layers (`0`, `1`, `1.5`, `999`).
    #[must_use]
    pub fn as_scalar(self) -> f64 {
        match self {
            Self::Level(n) => f64::from(n),
            Self::StepBack => STEP_BACK_SCALAR,
            Self::Hidden => HIDDEN_SCALAR,
        }
    }

    /// Parses a scalar depth hint from input records.
    ///
    /// `1.5` becomes [`DepthLayer::StepBack`], anything at or above
    /// [`HIDDEN_SCALAR`] becomes [`DepthLayer::Hidden`], and other values are
    /// rounded to the nearest non-negative level. Non-finite values other than
    /// `+inf` map to the front.
    #[must_use]
    pub fn from_scalar(value: f64) -> Self {
        if value.is_nan() {
            return Self::FRONT;
        }
        if value >= HIDDEN_SCALAR {
            return Self::Hidden;
        }
        if (value - STEP_BACK_SCALAR).abs() < 1e-9 {
            return Self::StepBack;
        }
        let rounded = (value.max(0.0) + 0.5).min(f64::from(u16::MAX));
        #[expect(
            clippy::cast_possible_truncation,
            reason = "value is clamped into u16 range and truncation is the rounding step"
        )]
        let level = rounded as u16;
        Self::Level(level)
    }

    /// The next tier further from the viewer.
    ///
    /// `Level(0)` steps to [`DepthLayer::StepBack`], which steps to `Level(1)`;
    /// hidden stays hidden.
    #[must_use]
    pub const fn next_back(self) -> Self {
        match self {
            Self::Level(0) => Self::StepBack,
            Self::StepBack => Self::Level(1),
            Self::Level(n) => Self::Level(n.saturating_add(1)),
            Self::Hidden => Self::Hidden,
        }
    }

    const fn rank(self) -> u32 {
        match self {
            Self::Level(0) => 0,
            Self::StepBack => 1,
            Self::Level(n) => 2 * n as u32,
            Self::Hidden => u32::MAX,
        }
    }
}

impl Default for DepthLayer {
    fn default() -> Self {
        Self::FRONT
    }
}

impl Ord for DepthLayer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for DepthLayer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::DepthLayer;

    #[test]
    fn world_z_matches_tier_table() {
        assert_eq!(DepthLayer::FRONT.world_z(), 0.0);
        assert_eq!(DepthLayer::Level(1).world_z(), -150.0);
        assert_eq!(DepthLayer::Level(3).world_z(), -450.0);
        assert_eq!(DepthLayer::StepBack.world_z(), -100.0);
        assert_eq!(DepthLayer::Hidden.world_z(), -2000.0);
    }

    #[test]
    fn ordering_follows_world_z() {
        let mut tiers = [
            DepthLayer::Hidden,
            DepthLayer::Level(2),
            DepthLayer::StepBack,
            DepthLayer::Level(1),
            DepthLayer::FRONT,
        ];
        tiers.sort();
        assert_eq!(
            tiers,
            [
                DepthLayer::FRONT,
                DepthLayer::StepBack,
                DepthLayer::Level(1),
                DepthLayer::Level(2),
                DepthLayer::Hidden,
            ]
        );
        for pair in tiers.windows(2) {
            assert!(
                pair[0].world_z() > pair[1].world_z(),
                "{:?} should be in front of {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn from_scalar_parses_legacy_values() {
        assert_eq!(DepthLayer::from_scalar(0.0), DepthLayer::FRONT);
        assert_eq!(DepthLayer::from_scalar(1.5), DepthLayer::StepBack);
        assert_eq!(DepthLayer::from_scalar(2.4), DepthLayer::Level(2));
        assert_eq!(DepthLayer::from_scalar(2.6), DepthLayer::Level(3));
        assert_eq!(DepthLayer::from_scalar(-4.0), DepthLayer::FRONT);
        assert_eq!(DepthLayer::from_scalar(999.0), DepthLayer::Hidden);
        assert_eq!(DepthLayer::from_scalar(f64::NAN), DepthLayer::FRONT);
    }

    #[test]
    fn next_back_walks_the_scale() {
        assert_eq!(DepthLayer::FRONT.next_back(), DepthLayer::StepBack);
        assert_eq!(DepthLayer::StepBack.next_back(), DepthLayer::Level(1));
        assert_eq!(DepthLayer::Level(4).next_back(), DepthLayer::Level(5));
        assert_eq!(DepthLayer::Hidden.next_back(), DepthLayer::Hidden);
    }
}
