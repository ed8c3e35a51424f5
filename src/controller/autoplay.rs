//! Autoplay negotiation and the gesture-retry fallback.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::logger::tracing::{debug, warn};

use super::env::{EnvEvent, EventSource, MediaHandle, NetworkCondition, NetworkMonitor, PlayOutcome, Subscription};
use super::progress::ProgressTracker;
use super::state::ViewModel;

/// The one-shot gesture listener pair armed after a blocked play attempt.
/// Dropping it unsubscribes both listeners.
struct ArmedRetry {
    _touch: Subscription,
    _click: Subscription,
}

/// Attempts programmatic playback and, when the browser's autoplay policy
/// rejects it, waits for the first user gesture to retry.
pub struct AutoplayNegotiator {
    media: Rc<dyn MediaHandle>,
    events: Rc<dyn EventSource>,
    network: Rc<dyn NetworkMonitor>,
    view: Rc<ViewModel>,
    progress: Rc<ProgressTracker>,
    armed: Rc<RefCell<Option<ArmedRetry>>>,
}

impl AutoplayNegotiator {
    pub fn new(
        media: Rc<dyn MediaHandle>,
        events: Rc<dyn EventSource>,
        network: Rc<dyn NetworkMonitor>,
        view: Rc<ViewModel>,
        progress: Rc<ProgressTracker>,
    ) -> Self {
        Self {
            media,
            events,
            network,
            view,
            progress,
            armed: Rc::new(RefCell::new(None)),
        }
    }

    /// Attempt playback. On success the session is marked playing and
    /// progress tracking starts; on a policy rejection the gesture retry is
    /// armed from scratch, superseding any earlier arming.
    pub fn negotiate(&self) {
        let media = self.media.clone();
        let events = self.events.clone();
        let view = self.view.clone();
        let progress = self.progress.clone();
        let armed = self.armed.clone();
        self.media.request_play(Box::new(move |outcome| match outcome {
            PlayOutcome::Started => {
                view.set_playing(true);
                progress.start();
            }
            PlayOutcome::Blocked => {
                debug!("autoplay blocked, waiting for a user gesture");
                view.set_playing(false);
                arm_gesture_retry(&media, &events, &view, &progress, &armed);
            }
            PlayOutcome::Failed => {
                warn!("playback attempt failed");
                view.set_playing(false);
            }
        }));
    }

    /// Drop any armed gesture listeners without firing them.
    pub fn disarm(&self) {
        self.armed.borrow_mut().take();
    }

    /// A very slow connection pauses playback outright to conserve the
    /// visitor's data. One-way: nothing here resumes when the network
    /// recovers.
    pub fn handle_network_change(&self) {
        if self.network.condition() == NetworkCondition::VerySlow {
            debug!("network degraded, pausing hero video");
            self.media.pause();
            self.view.set_playing(false);
            self.progress.stop();
        }
    }

    /// Tab refocus: browsers may have paused the element while the tab was
    /// hidden, so re-issue a play attempt if the session believes it is
    /// playing. Failure is swallowed.
    pub fn handle_visibility_returned(&self) {
        if self.view.is_playing() {
            self.media.request_play(Box::new(|_| {}));
        }
    }
}

fn arm_gesture_retry(
    media: &Rc<dyn MediaHandle>,
    events: &Rc<dyn EventSource>,
    view: &Rc<ViewModel>,
    progress: &Rc<ProgressTracker>,
    armed: &Rc<RefCell<Option<ArmedRetry>>>,
) {
    let retry = {
        let media = media.clone();
        let view = view.clone();
        let progress = progress.clone();
        let armed = armed.clone();
        move || {
            // Whichever listener fires first consumes the pair; dropping it
            // unsubscribes both regardless of which one triggered.
            if armed.borrow_mut().take().is_none() {
                return;
            }
            let view = view.clone();
            let progress = progress.clone();
            media.request_play(Box::new(move |outcome| {
                if outcome == PlayOutcome::Started {
                    view.set_playing(true);
                    progress.start();
                } else {
                    debug!("gesture-initiated retry did not start playback");
                }
            }));
        }
    };

    let touch = {
        let retry = retry.clone();
        events.subscribe(EnvEvent::TouchInteraction, true, Box::new(move || retry()))
    };
    let click = events.subscribe(EnvEvent::Click, true, Box::new(move || retry()));

    // Replacing an earlier pair drops it, which unsubscribes the stale
    // listeners.
    *armed.borrow_mut() = Some(ArmedRetry {
        _touch: touch,
        _click: click,
    });
}
