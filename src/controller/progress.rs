//! Playback progress polling.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::env::{MediaHandle, TimerDriver, TimerHandle};
use super::state::ViewModel;

/// 100ms keeps the bar smooth without noticeable main-thread cost.
const SAMPLE_PERIOD: Duration = Duration::from_millis(100);

/// Samples the media element's position against its duration on a fixed
/// interval and writes the normalized percentage into the view model.
///
/// At most one sampling timer exists at a time: `start` always cancels the
/// previous timer before scheduling a new one.
pub struct ProgressTracker {
    media: Rc<dyn MediaHandle>,
    timers: Rc<dyn TimerDriver>,
    view: Rc<ViewModel>,
    timer: RefCell<Option<TimerHandle>>,
}

impl ProgressTracker {
    pub fn new(media: Rc<dyn MediaHandle>, timers: Rc<dyn TimerDriver>, view: Rc<ViewModel>) -> Self {
        Self {
            media,
            timers,
            view,
            timer: RefCell::new(None),
        }
    }

    pub fn start(&self) {
        self.stop();
        let media = self.media.clone();
        let view = self.view.clone();
        let handle = self.timers.interval(
            SAMPLE_PERIOD,
            Box::new(move || {
                let duration = media.duration();
                // Media that has not loaded yet reports an unknown or zero
                // duration; leave the last good value untouched.
                if duration.is_finite() && duration > 0.0 {
                    view.set_progress(media.current_time() / duration * 100.0);
                }
            }),
        );
        *self.timer.borrow_mut() = Some(handle);
    }

    pub fn stop(&self) {
        self.timer.borrow_mut().take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::mock::{MockMedia, MockTimers};

    fn tracker(media: &Rc<MockMedia>, timers: &Rc<MockTimers>) -> ProgressTracker {
        ProgressTracker::new(
            media.clone(),
            timers.clone(),
            Rc::new(ViewModel::new("home".into())),
        )
    }

    #[test]
    fn start_replaces_any_existing_timer() {
        let media = Rc::new(MockMedia::new());
        let timers = Rc::new(MockTimers::new());
        let tracker = tracker(&media, &timers);

        tracker.start();
        tracker.start();
        assert_eq!(timers.active_intervals(), 1);

        tracker.stop();
        assert_eq!(timers.active_intervals(), 0);
    }

    #[test]
    fn stop_without_start_is_safe() {
        let media = Rc::new(MockMedia::new());
        let timers = Rc::new(MockTimers::new());
        tracker(&media, &timers).stop();
        assert_eq!(timers.active_intervals(), 0);
    }

    #[test]
    fn unknown_duration_leaves_progress_untouched() {
        let media = Rc::new(MockMedia::new());
        let timers = Rc::new(MockTimers::new());
        let view = Rc::new(ViewModel::new("home".into()));
        let tracker = ProgressTracker::new(media.clone(), timers.clone(), view.clone());

        media.set_position(3.0, f64::NAN);
        tracker.start();
        timers.tick_intervals();
        assert_eq!(view.progress_percent(), 0.0);

        media.set_position(3.0, 12.0);
        timers.tick_intervals();
        assert!((view.progress_percent() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn no_mutation_after_stop() {
        let media = Rc::new(MockMedia::new());
        let timers = Rc::new(MockTimers::new());
        let view = Rc::new(ViewModel::new("home".into()));
        let tracker = ProgressTracker::new(media.clone(), timers.clone(), view.clone());

        media.set_position(1.0, 10.0);
        tracker.start();
        tracker.stop();
        timers.tick_intervals();
        assert_eq!(view.progress_percent(), 0.0);
    }
}
