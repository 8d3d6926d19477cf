// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press-and-drag tracking with a movement threshold.
//!
//! A press only turns into a drag once the pointer has travelled more than
//! the slop distance from where it went down. Until then, moves report no
//! delta and a release counts as a click.

use kurbo::{Point, Vec2};

/// Tracks one pointer press and the drag that may follow it.
#[derive(Debug, Clone, Default, Copy)]
pub struct DragState {
    /// Where the pointer went down.
    pub start_pos: Option<Point>,
    /// Last position a delta was reported for.
    pub last_pos: Option<Point>,
    /// The pointer has moved past the slop since the press.
    pub crossed_slop: bool,
}

impl DragState {
    /// Starts tracking a press at `pos`.
    pub fn start(&mut self, pos: Point) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
        self.crossed_slop = false;
    }

    /// Feeds a move and returns the delta to apply, if the press is dragging.
    ///
    /// The first delta after crossing the slop covers the whole distance from
    /// the press point, so nothing is lost to the threshold.
    pub fn update(&mut self, pos: Point, slop: f64) -> Option<Vec2> {
        let start = self.start_pos?;
        if !self.crossed_slop {
            if (pos - start).hypot() <= slop {
                return None;
            }
            self.crossed_slop = true;
        }
        let last = self.last_pos.unwrap_or(start);
        self.last_pos = Some(pos);
        Some(pos - last)
    }

    /// Offset from the press point to `current_pos`.
    #[must_use]
    pub fn total_offset(&self, current_pos: Point) -> Option<Vec2> {
        self.start_pos.map(|start| current_pos - start)
    }

    /// Ends the press. Returns `true` if it had turned into a drag.
    pub fn end(&mut self) -> bool {
        let dragged = self.start_pos.is_some() && self.crossed_slop;
        *self = Self::default();
        dragged
    }

    /// Returns `true` while a press is held.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.start_pos.is_some()
    }

    /// Returns `true` once the held press has moved past the slop.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.start_pos.is_some() && self.crossed_slop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_inside_slop_report_nothing() {
        let mut drag = DragState::default();
        drag.start(Point::new(10.0, 10.0));
        assert_eq!(drag.update(Point::new(12.0, 11.0), 4.0), None);
        assert!(drag.is_pressed());
        assert!(!drag.is_dragging());
        assert!(!drag.end());
    }

    #[test]
    fn crossing_slop_reports_full_distance_then_increments() {
        let mut drag = DragState::default();
        drag.start(Point::new(0.0, 0.0));
        assert_eq!(drag.update(Point::new(2.0, 0.0), 4.0), None);
        assert_eq!(
            drag.update(Point::new(6.0, 0.0), 4.0),
            Some(Vec2::new(6.0, 0.0))
        );
        assert_eq!(
            drag.update(Point::new(6.0, 3.0), 4.0),
            Some(Vec2::new(0.0, 3.0))
        );
        assert_eq!(
            drag.total_offset(Point::new(6.0, 3.0)),
            Some(Vec2::new(6.0, 3.0))
        );
        assert!(drag.end());
        assert!(!drag.is_pressed());
    }

    #[test]
    fn update_without_press_is_ignored() {
        let mut drag = DragState::default();
        assert_eq!(drag.update(Point::new(50.0, 50.0), 0.0), None);
        assert!(drag.last_pos.is_none());
        assert_eq!(drag.total_offset(Point::ORIGIN), None);
    }
}
