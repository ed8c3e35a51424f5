//! Hero playlist control: transitions, advance/retreat, play/pause toggle.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use dioxus::logger::tracing::info;

use super::autoplay::AutoplayNegotiator;
use super::env::{EnvEvent, EventSource, MediaHandle, PlayOutcome, Subscription};
use super::progress::ProgressTracker;
use super::state::{Playlist, ViewModel};

/// Opacity the video drops to while the next source loads.
const FADE_OPACITY: f64 = 0.5;

/// Owns the current playlist position and drives every source change
/// through the same configure → reload → wait-for-data sequence.
pub struct PlaybackController {
    playlist: Playlist,
    media: Rc<dyn MediaHandle>,
    events: Rc<dyn EventSource>,
    view: Rc<ViewModel>,
    progress: Rc<ProgressTracker>,
    negotiator: Rc<AutoplayNegotiator>,
    weak_self: Weak<PlaybackController>,
    /// Bumped by every transition; a pending load continuation only runs if
    /// its epoch is still current, so a superseded transition cannot fire a
    /// second continuation.
    epoch: Cell<u64>,
    load_sub: RefCell<Option<Subscription>>,
    ended_sub: RefCell<Option<Subscription>>,
}

impl PlaybackController {
    pub fn new(
        playlist: Playlist,
        media: Rc<dyn MediaHandle>,
        events: Rc<dyn EventSource>,
        view: Rc<ViewModel>,
        progress: Rc<ProgressTracker>,
        negotiator: Rc<AutoplayNegotiator>,
    ) -> Rc<Self> {
        Rc::new_cyclic(|weak_self| Self {
            playlist,
            media,
            events,
            view,
            progress,
            negotiator,
            weak_self: weak_self.clone(),
            epoch: Cell::new(0),
            load_sub: RefCell::new(None),
            ended_sub: RefCell::new(None),
        })
    }

    /// Configure the element for the first entry and hand the initial play
    /// attempt to the negotiator once the element has data.
    pub fn initialize(&self) {
        let looping = self.playlist.loops_forever();
        self.media.apply_playback_attrs(looping);
        self.media.set_source(self.playlist.source(0));

        if !looping {
            let weak = self.weak_self.clone();
            *self.ended_sub.borrow_mut() = Some(self.events.subscribe(
                EnvEvent::MediaEnded,
                false,
                Box::new(move || {
                    if let Some(ctl) = weak.upgrade() {
                        ctl.advance();
                    }
                }),
            ));
        }

        if self.media.has_current_data() {
            self.negotiator.negotiate();
        } else {
            let weak = self.weak_self.clone();
            *self.load_sub.borrow_mut() = Some(self.events.subscribe(
                EnvEvent::MediaLoadedData,
                true,
                Box::new(move || {
                    if let Some(ctl) = weak.upgrade() {
                        ctl.negotiator.negotiate();
                    }
                }),
            ));
        }
        info!(
            entries = self.playlist.len(),
            looping, "hero playlist initialized"
        );
    }

    pub fn advance(&self) {
        self.transition_to(self.playlist.next_index(self.view.current_index()));
    }

    pub fn retreat(&self) {
        self.transition_to(self.playlist.previous_index(self.view.current_index()));
    }

    /// Selecting the already-active entry is a success with no effect.
    pub fn select_index(&self, index: usize) {
        self.transition_to(index);
    }

    fn transition_to(&self, index: usize) {
        if index == self.view.current_index() || index >= self.playlist.len() {
            return;
        }
        let epoch = self.epoch.get() + 1;
        self.epoch.set(epoch);

        self.view.set_current_index(index);
        self.progress.stop();
        self.view.set_progress(0.0);
        self.media.set_opacity(FADE_OPACITY);

        self.media.apply_playback_attrs(self.playlist.loops_forever());
        self.media.set_source(self.playlist.source(index));
        self.media.reload();

        // Replacing the stored subscription unsubscribes the previous
        // transition's one-shot listener; the epoch check covers a stale
        // callback the backend had already queued for delivery.
        let weak = self.weak_self.clone();
        *self.load_sub.borrow_mut() = Some(self.events.subscribe(
            EnvEvent::MediaLoadedData,
            true,
            Box::new(move || {
                let Some(ctl) = weak.upgrade() else {
                    return;
                };
                if ctl.epoch.get() != epoch {
                    return;
                }
                ctl.media.enable_fade_transition();
                ctl.media.set_opacity(1.0);
                ctl.negotiator.negotiate();
            }),
        ));
    }

    /// Pause when playing; otherwise a single play attempt whose failure is
    /// logged and dropped. This path never arms the gesture retry.
    pub fn toggle_playback(&self) {
        if self.view.is_playing() {
            self.media.pause();
            self.view.set_playing(false);
            self.progress.stop();
        } else {
            let view = self.view.clone();
            let progress = self.progress.clone();
            self.media.request_play(Box::new(move |outcome| {
                if outcome == PlayOutcome::Started {
                    view.set_playing(true);
                    progress.start();
                } else {
                    info!("playback prevented by browser");
                }
            }));
        }
    }

    /// Drop every listener and timer this controller owns. Safe to call at
    /// any point, including before `initialize`.
    pub fn teardown(&self) {
        self.load_sub.borrow_mut().take();
        self.ended_sub.borrow_mut().take();
        self.negotiator.disarm();
        self.progress.stop();
    }
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("entries", &self.playlist.len())
            .field("epoch", &self.epoch.get())
            .finish()
    }
}
