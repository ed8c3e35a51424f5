//! Horizontal swipe detection for the hero playlist.

use std::cell::Cell;

/// Minimum horizontal travel before a touch counts as a swipe.
const SWIPE_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeAction {
    /// Leftward swipe: show the next video.
    Advance,
    /// Rightward swipe: show the previous video.
    Retreat,
}

/// Tracks a single touch along the horizontal axis. Vertical movement is
/// deliberately ignored; there is no diagonal-swipe rejection.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    start_x: Cell<Option<f64>>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn touch_start(&self, x: f64) {
        self.start_x.set(Some(x));
    }

    /// Resolve the gesture. Returns `None` for taps and sub-threshold drags,
    /// or when no touch-start was recorded.
    pub fn touch_end(&self, x: f64) -> Option<SwipeAction> {
        let start = self.start_x.take()?;
        let delta = x - start;
        if delta < -SWIPE_THRESHOLD {
            Some(SwipeAction::Advance)
        } else if delta > SWIPE_THRESHOLD {
            Some(SwipeAction::Retreat)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leftward_swipe_advances() {
        let tracker = SwipeTracker::new();
        tracker.touch_start(200.0);
        assert_eq!(tracker.touch_end(140.0), Some(SwipeAction::Advance));
    }

    #[test]
    fn rightward_swipe_retreats() {
        let tracker = SwipeTracker::new();
        tracker.touch_start(200.0);
        assert_eq!(tracker.touch_end(260.0), Some(SwipeAction::Retreat));
    }

    #[test]
    fn sub_threshold_drag_is_a_tap() {
        let tracker = SwipeTracker::new();
        tracker.touch_start(200.0);
        assert_eq!(tracker.touch_end(160.0), None);
        tracker.touch_start(200.0);
        assert_eq!(tracker.touch_end(250.0), None);
    }

    #[test]
    fn touch_end_without_start_does_nothing() {
        let tracker = SwipeTracker::new();
        assert_eq!(tracker.touch_end(500.0), None);
    }

    #[test]
    fn each_gesture_consumes_its_start() {
        let tracker = SwipeTracker::new();
        tracker.touch_start(300.0);
        assert_eq!(tracker.touch_end(200.0), Some(SwipeAction::Advance));
        // A second end without a new start must not reuse the old origin.
        assert_eq!(tracker.touch_end(100.0), None);
    }
}
