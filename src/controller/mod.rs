//! The site controller: hero video playlist, section-aware scroll
//! navigation, and touch-swipe playlist control behind one intent surface.
//!
//! The view renders from [`ViewState`] snapshots and pushes user intents
//! back through [`SiteController`]; everything browser-specific reaches the
//! core through the traits in [`env`].

mod autoplay;
pub mod env;
mod gestures;
mod playback;
mod progress;
mod sections;
mod state;

#[cfg(not(target_arch = "wasm32"))]
pub mod mock;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use dioxus::logger::tracing::info;

pub use env::{
    EnvEvent, EventSource, MediaHandle, NetworkCondition, NetworkMonitor, PlayOutcome,
    SectionGeometry, SectionRegion, Subscription, TimerDriver, TimerHandle,
};
pub use gestures::SwipeAction;
pub use state::{Playlist, PlaylistError, ViewState};

use autoplay::AutoplayNegotiator;
use gestures::SwipeTracker;
use playback::PlaybackController;
use progress::ProgressTracker;
use sections::SectionTracker;
use state::ViewModel;

/// The injected environment the controller runs against.
pub struct ControllerEnv {
    pub media: Rc<dyn MediaHandle>,
    pub events: Rc<dyn EventSource>,
    pub timers: Rc<dyn TimerDriver>,
    pub network: Rc<dyn NetworkMonitor>,
    pub geometry: Rc<dyn SectionGeometry>,
}

/// Hub composing the playback controller, the section tracker, and the
/// swipe tracker, plus the menu flag the navbar renders from.
pub struct SiteController {
    view: Rc<ViewModel>,
    playback: Rc<PlaybackController>,
    negotiator: Rc<AutoplayNegotiator>,
    progress: Rc<ProgressTracker>,
    tracker: Rc<SectionTracker>,
    swipe: SwipeTracker,
    events: Rc<dyn EventSource>,
    ambient_subs: RefCell<Vec<Subscription>>,
    attached: Cell<bool>,
}

impl SiteController {
    /// Build the controller over an environment, a playlist, and the ordered
    /// section table. Nothing is wired until [`attach`](Self::attach).
    pub fn new(env: ControllerEnv, playlist: Playlist, sections: Vec<String>) -> Self {
        let initial_section = sections.first().cloned().unwrap_or_default();
        let view = Rc::new(ViewModel::new(initial_section));
        let progress = Rc::new(ProgressTracker::new(
            env.media.clone(),
            env.timers.clone(),
            view.clone(),
        ));
        let negotiator = Rc::new(AutoplayNegotiator::new(
            env.media.clone(),
            env.events.clone(),
            env.network.clone(),
            view.clone(),
            progress.clone(),
        ));
        let playback = PlaybackController::new(
            playlist,
            env.media.clone(),
            env.events.clone(),
            view.clone(),
            progress.clone(),
            negotiator.clone(),
        );
        let tracker = Rc::new(SectionTracker::new(
            sections,
            env.geometry,
            env.timers,
            view.clone(),
        ));

        Self {
            view,
            playback,
            negotiator,
            progress,
            tracker,
            swipe: SwipeTracker::new(),
            events: env.events,
            ambient_subs: RefCell::new(Vec::new()),
            attached: Cell::new(false),
        }
    }

    /// Register the rendering surface's state sink. The sink immediately
    /// receives the current snapshot and then every change.
    pub fn set_view_sink(&self, sink: Box<dyn Fn(ViewState)>) {
        self.view.set_sink(sink);
    }

    pub fn view_state(&self) -> ViewState {
        self.view.snapshot()
    }

    /// Wire the ambient environment subscriptions and start playback of the
    /// first playlist entry. Calling it a second time is a no-op.
    pub fn attach(&self) {
        if self.attached.replace(true) {
            return;
        }
        let mut subs = self.ambient_subs.borrow_mut();

        // Keep the session in step with playback controlled outside our own
        // buttons (browser media controls, the element itself).
        {
            let view = self.view.clone();
            let progress = self.progress.clone();
            subs.push(self.events.subscribe(
                EnvEvent::MediaPlay,
                false,
                Box::new(move || {
                    view.set_playing(true);
                    progress.start();
                }),
            ));
        }
        {
            let view = self.view.clone();
            let progress = self.progress.clone();
            subs.push(self.events.subscribe(
                EnvEvent::MediaPause,
                false,
                Box::new(move || {
                    view.set_playing(false);
                    progress.stop();
                }),
            ));
        }
        {
            let negotiator = self.negotiator.clone();
            subs.push(self.events.subscribe(
                EnvEvent::VisibilityReturned,
                false,
                Box::new(move || negotiator.handle_visibility_returned()),
            ));
        }
        {
            let negotiator = self.negotiator.clone();
            subs.push(self.events.subscribe(
                EnvEvent::NetworkChanged,
                false,
                Box::new(move || negotiator.handle_network_change()),
            ));
        }
        {
            let tracker = self.tracker.clone();
            subs.push(self.events.subscribe(
                EnvEvent::ContainerScroll,
                false,
                Box::new(move || tracker.handle_scroll()),
            ));
        }

        drop(subs);
        self.playback.initialize();
        info!("site controller attached");
    }

    /// Release every listener and timer. Idempotent, and safe even when
    /// `attach` never ran.
    pub fn detach(&self) {
        self.ambient_subs.borrow_mut().clear();
        self.playback.teardown();
        self.tracker.release();
        if self.attached.replace(false) {
            info!("site controller detached");
        }
    }

    // Playlist intents.

    pub fn advance(&self) {
        self.playback.advance();
    }

    pub fn retreat(&self) {
        self.playback.retreat();
    }

    pub fn select_index(&self, index: usize) {
        self.playback.select_index(index);
    }

    pub fn toggle_playback(&self) {
        self.playback.toggle_playback();
    }

    // Swipe intents.

    pub fn touch_start(&self, x: f64) {
        self.swipe.touch_start(x);
    }

    pub fn touch_end(&self, x: f64) {
        match self.swipe.touch_end(x) {
            Some(SwipeAction::Advance) => self.playback.advance(),
            Some(SwipeAction::Retreat) => self.playback.retreat(),
            None => {}
        }
    }

    // Navigation intents.

    pub fn handle_scroll(&self) {
        self.tracker.handle_scroll();
    }

    pub fn scroll_to_section(&self, section: &str) {
        self.tracker.scroll_to(section);
    }

    pub fn toggle_menu(&self) {
        self.view.set_menu_open(!self.view.is_menu_open());
    }

    pub fn close_menu(&self) {
        self.view.set_menu_open(false);
    }

    pub fn scroll_to_and_close(&self, section: &str) {
        self.tracker.scroll_to(section);
        self.close_menu();
    }
}

impl std::fmt::Debug for SiteController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteController")
            .field("attached", &self.attached.get())
            .field("view", &self.view)
            .finish()
    }
}
