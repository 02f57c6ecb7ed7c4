//! Disturbance detection
//!
//! A glyph counts as disturbed once it has drifted more than
//! [`MOVE_THRESHOLD`] on either axis or turned more than [`ANGLE_THRESHOLD`].
//! Exactly-at-threshold is still at rest.

use glam::Vec2;

use super::world::Pose;
use crate::consts::{ANGLE_THRESHOLD, MOVE_THRESHOLD};

/// Whether `pose` has left the rest state around `initial`
#[inline]
pub fn is_disturbed(initial: Vec2, pose: Pose) -> bool {
    let d = (pose.pos - initial).abs();
    d.x > MOVE_THRESHOLD || d.y > MOVE_THRESHOLD || pose.angle.abs() > ANGLE_THRESHOLD
}

/// Outcome of one tracking pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackReport {
    /// Scene is touched after this pass
    pub touched: bool,
    /// Flag flipped from false to true during this pass
    pub newly_touched: bool,
}

/// Sticky touched flag; only [`Tracker::clear`] resets it
#[derive(Debug, Clone, Copy, Default)]
pub struct Tracker {
    touched: bool,
}

impl Tracker {
    pub fn touched(&self) -> bool {
        self.touched
    }

    /// Fold a pass over the glyph poses into the flag.
    ///
    /// Once touched, the scan is skipped: the flag cannot go back by itself.
    pub fn observe<I>(&mut self, poses: I) -> TrackReport
    where
        I: IntoIterator<Item = (Vec2, Pose)>,
    {
        if self.touched {
            return TrackReport {
                touched: true,
                newly_touched: false,
            };
        }

        let disturbed = poses
            .into_iter()
            .any(|(initial, pose)| is_disturbed(initial, pose));
        self.touched = disturbed;

        TrackReport {
            touched: disturbed,
            newly_touched: disturbed,
        }
    }

    pub fn clear(&mut self) {
        self.touched = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REST: Vec2 = Vec2::new(100.0, 50.0);

    fn at(dx: f32, dy: f32, angle: f32) -> Pose {
        Pose::new(REST + Vec2::new(dx, dy), angle)
    }

    #[test]
    fn test_threshold_is_exclusive() {
        assert!(!is_disturbed(REST, at(5.0, 0.0, 0.0)));
        assert!(!is_disturbed(REST, at(0.0, -5.0, 0.0)));
        assert!(!is_disturbed(REST, at(5.0, 5.0, 0.1)));
        assert!(is_disturbed(REST, at(5.001, 0.0, 0.0)));
        assert!(is_disturbed(REST, at(0.0, -5.001, 0.0)));
        assert!(is_disturbed(REST, at(0.0, 0.0, -0.1001)));
    }

    #[test]
    fn test_touched_once_then_sticky() {
        let mut tracker = Tracker::default();
        let report = tracker.observe([(REST, at(0.0, 0.0, 0.0))]);
        assert_eq!(report, TrackReport::default());

        let report = tracker.observe([(REST, at(0.0, 0.0, 0.0)), (REST, at(9.0, 0.0, 0.0))]);
        assert!(report.touched && report.newly_touched);

        // Back at rest: stays touched, but not "newly"
        let report = tracker.observe([(REST, at(0.0, 0.0, 0.0))]);
        assert!(report.touched);
        assert!(!report.newly_touched);

        tracker.clear();
        assert!(!tracker.touched());
    }
}
