//! Injected environment seams for the site controller.
//!
//! The core never reaches for browser globals. Everything it needs from the
//! runtime — the media element, timers, event registration, the network
//! condition, section geometry — comes in through these traits, so the same
//! controller runs against `web-sys` adapters in the browser and against
//! deterministic mocks in native tests.

use std::time::Duration;

/// Result of a programmatic play attempt, consumed by a continuation.
///
/// Browser play promises reject both for policy reasons (autoplay blocked
/// until a user gesture) and for real failures; the two demand different
/// handling, so the distinction is made explicit here instead of being
/// flattened into a swallowed rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Playback started.
    Started,
    /// Rejected by autoplay policy; a user gesture will unblock it.
    Blocked,
    /// Rejected for any other reason.
    Failed,
}

/// Continuation invoked with the outcome of a play attempt.
pub type PlayContinuation = Box<dyn FnOnce(PlayOutcome)>;

/// Handle to the hero media element.
pub trait MediaHandle {
    /// Apply the inline/muted/autoplay/preload attribute set, with the given
    /// loop flag. Called identically at initialization and on every
    /// transition.
    fn apply_playback_attrs(&self, looping: bool);
    /// Point the element at a new source URL.
    fn set_source(&self, url: &str);
    /// Force the element to reload its current source.
    fn reload(&self);
    /// Whether the element already holds decodable data for the current
    /// source (`readyState >= HAVE_CURRENT_DATA`).
    fn has_current_data(&self) -> bool;
    /// Attempt playback; the continuation receives the outcome.
    fn request_play(&self, done: PlayContinuation);
    fn pause(&self);
    fn current_time(&self) -> f64;
    /// Total duration; may be NaN or zero before metadata arrives.
    fn duration(&self) -> f64;
    /// Step the element's opacity (used for the transition fade).
    fn set_opacity(&self, value: f64);
    /// Enable the timed CSS opacity transition before restoring opacity.
    fn enable_fade_transition(&self);
}

/// Environment signals the controller can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvEvent {
    /// The media element finished loading the first frame of data.
    MediaLoadedData,
    /// The media element reached the end of its source.
    MediaEnded,
    /// The media element started playing (any cause).
    MediaPlay,
    /// The media element paused (any cause).
    MediaPause,
    /// A touch interaction anywhere on the page.
    TouchInteraction,
    /// A click anywhere on the page.
    Click,
    /// The document became visible again after being hidden.
    VisibilityReturned,
    /// The network condition classification changed.
    NetworkChanged,
    /// The main scroll container scrolled.
    ContainerScroll,
}

/// A live event registration. Dropping it unsubscribes.
///
/// The cancel action owns whatever the backend needs to remove the listener
/// (for the web backend, the same `Closure` that was registered), which is
/// what makes removal reliable: there is no re-derived callback identity.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription that was never established (e.g. the browser lacks the
    /// capability). Dropping it does nothing.
    pub fn inert() -> Self {
        Self { cancel: None }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("live", &self.cancel.is_some())
            .finish()
    }
}

/// Event registration seam.
pub trait EventSource {
    /// Register `callback` for `event`. With `once`, the backend removes the
    /// listener after its first delivery; the returned handle still cancels
    /// it early if dropped before that.
    fn subscribe(&self, event: EnvEvent, once: bool, callback: Box<dyn FnMut()>) -> Subscription;
}

/// A scheduled timer. Dropping it cancels the timer.
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TimerHandle {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle")
            .field("live", &self.cancel.is_some())
            .finish()
    }
}

/// Timer scheduling seam.
pub trait TimerDriver {
    /// Repeating timer firing every `period` until the handle is dropped.
    fn interval(&self, period: Duration, tick: Box<dyn FnMut()>) -> TimerHandle;
    /// One-shot timer firing once after `delay` unless the handle is dropped
    /// first.
    fn timeout(&self, delay: Duration, fire: Box<dyn FnOnce()>) -> TimerHandle;
}

/// Coarse network classification, read through a narrow accessor instead of
/// probing the untyped `navigator.connection` object inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkCondition {
    Unknown,
    Fast,
    Slow,
    /// Slow enough that streaming video is a disservice to the visitor.
    VerySlow,
}

pub trait NetworkMonitor {
    fn condition(&self) -> NetworkCondition;
}

/// Vertical extent of a rendered section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionRegion {
    pub top: f64,
    pub height: f64,
}

impl SectionRegion {
    pub fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }
}

/// Access to section layout and the main scroll container.
pub trait SectionGeometry {
    /// Geometry for a section, or `None` while its DOM node has not been
    /// laid out yet.
    fn region(&self, section: &str) -> Option<SectionRegion>;
    /// Current scroll offset of the main container, or `None` while no
    /// scrollable container is bound.
    fn scroll_top(&self) -> Option<f64>;
    /// Request a smooth scroll that brings the section into view.
    fn scroll_into_view(&self, section: &str);
}
