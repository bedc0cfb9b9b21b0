//! Touch swipe recognition

/// Minimum horizontal travel (px) for a touch to count as a swipe
pub const SWIPE_THRESHOLD_PX: f64 = 50.0;

/// Direction the finger travelled
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger moved left, content advances
    Left,
    /// Finger moved right, content goes back
    Right,
}

/// Tracks one touch gesture from start to end
#[derive(Clone, Debug, Default)]
pub struct SwipeTracker {
    /// Touch start position
    start: Option<(f64, f64)>,
    /// Last reported position
    last: Option<(f64, f64)>,
}

impl SwipeTracker {
    /// Create an idle tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a gesture is in progress
    #[inline]
    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    /// Start a gesture at the first touch point
    pub fn begin(&mut self, x: f64, y: f64) {
        self.start = Some((x, y));
        self.last = None;
    }

    /// Record the current touch point
    pub fn moved(&mut self, x: f64, y: f64) {
        if self.start.is_some() {
            self.last = Some((x, y));
        }
    }

    /// Finish the gesture
    ///
    /// A swipe needs more horizontal than vertical travel and more than
    /// [`SWIPE_THRESHOLD_PX`] of it. A touch without movement is never a
    /// swipe.
    pub fn end(&mut self) -> Option<SwipeDirection> {
        let start = self.start.take()?;
        let end = self.last.take()?;

        let dx = start.0 - end.0;
        let dy = start.1 - end.1;
        if dx.abs() <= dy.abs() || dx.abs() <= SWIPE_THRESHOLD_PX {
            return None;
        }
        if dx > 0.0 {
            Some(SwipeDirection::Left)
        } else {
            Some(SwipeDirection::Right)
        }
    }

    /// Drop the gesture without a result
    pub fn cancel(&mut self) {
        self.start = None;
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swipe(from: (f64, f64), to: (f64, f64)) -> Option<SwipeDirection> {
        let mut tracker = SwipeTracker::new();
        tracker.begin(from.0, from.1);
        tracker.moved(to.0, to.1);
        tracker.end()
    }

    #[test]
    fn test_swipe_left_and_right() {
        assert_eq!(swipe((200.0, 100.0), (100.0, 110.0)), Some(SwipeDirection::Left));
        assert_eq!(swipe((100.0, 100.0), (200.0, 90.0)), Some(SwipeDirection::Right));
    }

    #[test]
    fn test_short_swipe_ignored() {
        assert_eq!(swipe((100.0, 100.0), (50.0, 100.0)), None);
        assert_eq!(swipe((100.0, 100.0), (49.0, 100.0)), Some(SwipeDirection::Left));
    }

    #[test]
    fn test_vertical_swipe_ignored() {
        assert_eq!(swipe((100.0, 100.0), (20.0, 300.0)), None);
    }

    #[test]
    fn test_tap_is_not_a_swipe() {
        let mut tracker = SwipeTracker::new();
        tracker.begin(100.0, 100.0);
        assert!(tracker.is_tracking());
        assert_eq!(tracker.end(), None);
        assert!(!tracker.is_tracking());
    }

    #[test]
    fn test_previous_gesture_not_reused() {
        let mut tracker = SwipeTracker::new();
        tracker.begin(300.0, 0.0);
        tracker.moved(100.0, 0.0);
        assert_eq!(tracker.end(), Some(SwipeDirection::Left));

        tracker.begin(300.0, 0.0);
        assert_eq!(tracker.end(), None);
    }

    #[test]
    fn test_move_without_start_ignored() {
        let mut tracker = SwipeTracker::new();
        tracker.moved(10.0, 10.0);
        assert_eq!(tracker.end(), None);
    }
}
