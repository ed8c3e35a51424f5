//! Shared playback/view state for the site controller.

use std::cell::RefCell;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaylistError {
    #[error("playlist must contain at least one source")]
    Empty,
}

/// Ordered, immutable list of media source URLs.
#[derive(Debug, Clone)]
pub struct Playlist {
    sources: Vec<String>,
}

impl Playlist {
    pub fn new(sources: Vec<String>) -> Result<Self, PlaylistError> {
        if sources.is_empty() {
            return Err(PlaylistError::Empty);
        }
        Ok(Self { sources })
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// A single-entry playlist loops forever instead of advancing.
    pub fn loops_forever(&self) -> bool {
        self.sources.len() == 1
    }

    pub fn source(&self, index: usize) -> &str {
        &self.sources[index]
    }

    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.sources.len()
    }

    pub fn previous_index(&self, index: usize) -> usize {
        (index + self.sources.len() - 1) % self.sources.len()
    }
}

/// Snapshot handed to the rendering surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub current_index: usize,
    pub is_playing: bool,
    pub progress_percent: f64,
    pub active_section: String,
    pub is_menu_open: bool,
}

/// Interior-mutable view state plus the registered view sink.
///
/// Every mutation goes through a method here, and every method publishes a
/// fresh snapshot to the sink after releasing the borrow, so a sink that
/// calls back into the controller never observes a held borrow.
pub struct ViewModel {
    state: RefCell<ViewState>,
    sink: RefCell<Option<Box<dyn Fn(ViewState)>>>,
}

impl ViewModel {
    pub fn new(initial_section: String) -> Self {
        Self {
            state: RefCell::new(ViewState {
                current_index: 0,
                is_playing: false,
                progress_percent: 0.0,
                active_section: initial_section,
                is_menu_open: false,
            }),
            sink: RefCell::new(None),
        }
    }

    /// Register the rendering surface. The sink immediately receives the
    /// current snapshot.
    pub fn set_sink(&self, sink: Box<dyn Fn(ViewState)>) {
        *self.sink.borrow_mut() = Some(sink);
        self.publish();
    }

    pub fn snapshot(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn current_index(&self) -> usize {
        self.state.borrow().current_index
    }

    pub fn is_playing(&self) -> bool {
        self.state.borrow().is_playing
    }

    pub fn progress_percent(&self) -> f64 {
        self.state.borrow().progress_percent
    }

    pub fn active_section(&self) -> String {
        self.state.borrow().active_section.clone()
    }

    pub fn is_menu_open(&self) -> bool {
        self.state.borrow().is_menu_open
    }

    pub fn set_current_index(&self, index: usize) {
        self.state.borrow_mut().current_index = index;
        self.publish();
    }

    pub fn set_playing(&self, playing: bool) {
        self.state.borrow_mut().is_playing = playing;
        self.publish();
    }

    pub fn set_progress(&self, percent: f64) {
        self.state.borrow_mut().progress_percent = percent.clamp(0.0, 100.0);
        self.publish();
    }

    pub fn set_active_section(&self, section: &str) {
        self.state.borrow_mut().active_section = section.to_owned();
        self.publish();
    }

    pub fn set_menu_open(&self, open: bool) {
        self.state.borrow_mut().is_menu_open = open;
        self.publish();
    }

    fn publish(&self) {
        let snapshot = self.snapshot();
        if let Some(sink) = self.sink.borrow().as_ref() {
            sink(snapshot);
        }
    }
}

impl std::fmt::Debug for ViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewModel")
            .field("state", &self.state.borrow())
            .finish()
    }
}
