//! Deterministic mock environment for native tests.
//!
//! Events and timers fire only when the test pumps them, and every mock
//! counts its live registrations so tests can assert that teardown leaves
//! nothing behind.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use super::env::{
    EnvEvent, EventSource, MediaHandle, NetworkCondition, NetworkMonitor, PlayContinuation,
    PlayOutcome, SectionGeometry, SectionRegion, Subscription, TimerDriver, TimerHandle,
};
use super::ControllerEnv;

/// Scriptable media element stand-in.
#[derive(Default)]
pub struct MockMedia {
    src: RefCell<Option<String>>,
    looping: Cell<Option<bool>>,
    attr_applications: Cell<usize>,
    reloads: Cell<usize>,
    ready: Cell<bool>,
    playing: Cell<bool>,
    pauses: Cell<usize>,
    opacity: Cell<f64>,
    fade_enabled: Cell<bool>,
    time: Cell<f64>,
    media_duration: Cell<f64>,
    play_script: RefCell<VecDeque<PlayOutcome>>,
}

impl MockMedia {
    pub fn new() -> Self {
        let media = Self::default();
        media.opacity.set(1.0);
        media.media_duration.set(f64::NAN);
        media
    }

    /// Queue the outcome of the next play attempt. Unscripted attempts
    /// succeed.
    pub fn script_play(&self, outcome: PlayOutcome) {
        self.play_script.borrow_mut().push_back(outcome);
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.set(ready);
    }

    pub fn set_position(&self, time: f64, duration: f64) {
        self.time.set(time);
        self.media_duration.set(duration);
    }

    pub fn source(&self) -> Option<String> {
        self.src.borrow().clone()
    }

    pub fn looping(&self) -> Option<bool> {
        self.looping.get()
    }

    pub fn reload_count(&self) -> usize {
        self.reloads.get()
    }

    pub fn pause_count(&self) -> usize {
        self.pauses.get()
    }

    pub fn attr_application_count(&self) -> usize {
        self.attr_applications.get()
    }

    pub fn opacity(&self) -> f64 {
        self.opacity.get()
    }

    pub fn fade_enabled(&self) -> bool {
        self.fade_enabled.get()
    }

    pub fn is_playing(&self) -> bool {
        self.playing.get()
    }
}

impl MediaHandle for MockMedia {
    fn apply_playback_attrs(&self, looping: bool) {
        self.looping.set(Some(looping));
        self.attr_applications.set(self.attr_applications.get() + 1);
    }

    fn set_source(&self, url: &str) {
        *self.src.borrow_mut() = Some(url.to_owned());
    }

    fn reload(&self) {
        self.reloads.set(self.reloads.get() + 1);
        self.ready.set(false);
    }

    fn has_current_data(&self) -> bool {
        self.ready.get()
    }

    fn request_play(&self, done: PlayContinuation) {
        let outcome = self
            .play_script
            .borrow_mut()
            .pop_front()
            .unwrap_or(PlayOutcome::Started);
        if outcome == PlayOutcome::Started {
            self.playing.set(true);
        }
        done(outcome);
    }

    fn pause(&self) {
        self.playing.set(false);
        self.pauses.set(self.pauses.get() + 1);
    }

    fn current_time(&self) -> f64 {
        self.time.get()
    }

    fn duration(&self) -> f64 {
        self.media_duration.get()
    }

    fn set_opacity(&self, value: f64) {
        self.opacity.set(value);
    }

    fn enable_fade_transition(&self) {
        self.fade_enabled.set(true);
    }
}

type SharedCallback = Rc<RefCell<Box<dyn FnMut()>>>;

struct MockListener {
    id: u64,
    once: bool,
    alive: Rc<Cell<bool>>,
    callback: SharedCallback,
}

/// Event hub fired manually from tests.
#[derive(Default)]
pub struct MockEvents {
    next_id: Cell<u64>,
    registry: Rc<RefCell<HashMap<EnvEvent, Vec<MockListener>>>>,
}

impl MockEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to every live listener. One-shot listeners are
    /// removed before their callback runs, as the browser does.
    pub fn fire(&self, event: EnvEvent) {
        let batch: Vec<(Rc<Cell<bool>>, SharedCallback)> = {
            let mut registry = self.registry.borrow_mut();
            let Some(listeners) = registry.get_mut(&event) else {
                return;
            };
            let batch = listeners
                .iter()
                .filter(|l| l.alive.get())
                .map(|l| (l.alive.clone(), l.callback.clone()))
                .collect();
            listeners.retain(|l| !l.once || !l.alive.get());
            batch
        };
        for (alive, callback) in batch {
            // A callback earlier in the batch may have cancelled this one.
            if alive.get() {
                (callback.borrow_mut())();
            }
        }
    }

    /// Live registrations for `event`, fired-once listeners excluded.
    pub fn live_count(&self, event: EnvEvent) -> usize {
        self.registry
            .borrow()
            .get(&event)
            .map(|listeners| listeners.iter().filter(|l| l.alive.get()).count())
            .unwrap_or(0)
    }

    pub fn total_live(&self) -> usize {
        self.registry
            .borrow()
            .values()
            .flatten()
            .filter(|l| l.alive.get())
            .count()
    }
}

impl EventSource for MockEvents {
    fn subscribe(&self, event: EnvEvent, once: bool, callback: Box<dyn FnMut()>) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let alive = Rc::new(Cell::new(true));
        self.registry
            .borrow_mut()
            .entry(event)
            .or_default()
            .push(MockListener {
                id,
                once,
                alive: alive.clone(),
                callback: Rc::new(RefCell::new(callback)),
            });

        let registry = self.registry.clone();
        Subscription::new(move || {
            alive.set(false);
            if let Some(listeners) = registry.borrow_mut().get_mut(&event) {
                listeners.retain(|l| l.id != id);
            }
        })
    }
}

enum MockTimerKind {
    Interval(SharedCallback),
    Timeout(Rc<RefCell<Option<Box<dyn FnOnce()>>>>),
}

struct MockTimer {
    id: u64,
    alive: Rc<Cell<bool>>,
    kind: MockTimerKind,
}

/// Timer driver pumped manually from tests.
#[derive(Default)]
pub struct MockTimers {
    next_id: Cell<u64>,
    registry: Rc<RefCell<Vec<MockTimer>>>,
}

impl MockTimers {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(&self, kind: MockTimerKind) -> TimerHandle {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let alive = Rc::new(Cell::new(true));
        self.registry.borrow_mut().push(MockTimer {
            id,
            alive: alive.clone(),
            kind,
        });

        let registry = self.registry.clone();
        TimerHandle::new(move || {
            alive.set(false);
            registry.borrow_mut().retain(|t| t.id != id);
        })
    }

    /// Run every live interval callback once.
    pub fn tick_intervals(&self) {
        let batch: Vec<(Rc<Cell<bool>>, SharedCallback)> = self
            .registry
            .borrow()
            .iter()
            .filter_map(|t| match &t.kind {
                MockTimerKind::Interval(cb) if t.alive.get() => {
                    Some((t.alive.clone(), cb.clone()))
                }
                _ => None,
            })
            .collect();
        for (alive, callback) in batch {
            if alive.get() {
                (callback.borrow_mut())();
            }
        }
    }

    /// Fire and retire every live timeout.
    pub fn fire_timeouts(&self) {
        let batch: Vec<(Rc<Cell<bool>>, Rc<RefCell<Option<Box<dyn FnOnce()>>>>)> = {
            let mut registry = self.registry.borrow_mut();
            let batch = registry
                .iter()
                .filter_map(|t| match &t.kind {
                    MockTimerKind::Timeout(cb) if t.alive.get() => {
                        Some((t.alive.clone(), cb.clone()))
                    }
                    _ => None,
                })
                .collect();
            registry.retain(|t| matches!(t.kind, MockTimerKind::Interval(_)) || !t.alive.get());
            batch
        };
        for (alive, callback) in batch {
            if !alive.get() {
                continue;
            }
            if let Some(fire) = callback.borrow_mut().take() {
                fire();
            }
        }
    }

    pub fn active_intervals(&self) -> usize {
        self.registry
            .borrow()
            .iter()
            .filter(|t| t.alive.get() && matches!(t.kind, MockTimerKind::Interval(_)))
            .count()
    }

    pub fn active_timeouts(&self) -> usize {
        self.registry
            .borrow()
            .iter()
            .filter(|t| t.alive.get() && matches!(t.kind, MockTimerKind::Timeout(_)))
            .count()
    }

    pub fn total_active(&self) -> usize {
        self.registry.borrow().iter().filter(|t| t.alive.get()).count()
    }
}

impl TimerDriver for MockTimers {
    fn interval(&self, _period: Duration, tick: Box<dyn FnMut()>) -> TimerHandle {
        self.register(MockTimerKind::Interval(Rc::new(RefCell::new(tick))))
    }

    fn timeout(&self, _delay: Duration, fire: Box<dyn FnOnce()>) -> TimerHandle {
        self.register(MockTimerKind::Timeout(Rc::new(RefCell::new(Some(fire)))))
    }
}

pub struct MockNetwork {
    condition: Cell<NetworkCondition>,
}

impl MockNetwork {
    pub fn new() -> Self {
        Self {
            condition: Cell::new(NetworkCondition::Unknown),
        }
    }

    pub fn set_condition(&self, condition: NetworkCondition) {
        self.condition.set(condition);
    }
}

impl Default for MockNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkMonitor for MockNetwork {
    fn condition(&self) -> NetworkCondition {
        self.condition.get()
    }
}

#[derive(Default)]
pub struct MockGeometry {
    regions: RefCell<HashMap<String, SectionRegion>>,
    scroll: Cell<Option<f64>>,
    scrolled: RefCell<Vec<String>>,
}

impl MockGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_region(&self, section: &str, region: SectionRegion) {
        self.regions.borrow_mut().insert(section.to_owned(), region);
    }

    pub fn set_scroll_top(&self, scroll_top: Option<f64>) {
        self.scroll.set(scroll_top);
    }

    /// Sections a smooth scroll was requested for, in order.
    pub fn scrolled_to(&self) -> Vec<String> {
        self.scrolled.borrow().clone()
    }
}

impl SectionGeometry for MockGeometry {
    fn region(&self, section: &str) -> Option<SectionRegion> {
        self.regions.borrow().get(section).copied()
    }

    fn scroll_top(&self) -> Option<f64> {
        self.scroll.get()
    }

    fn scroll_into_view(&self, section: &str) {
        self.scrolled.borrow_mut().push(section.to_owned());
    }
}

/// Bundle of every mock plus the [`ControllerEnv`] view over them.
pub struct MockEnv {
    pub media: Rc<MockMedia>,
    pub events: Rc<MockEvents>,
    pub timers: Rc<MockTimers>,
    pub network: Rc<MockNetwork>,
    pub geometry: Rc<MockGeometry>,
}

impl MockEnv {
    pub fn new() -> Self {
        Self {
            media: Rc::new(MockMedia::new()),
            events: Rc::new(MockEvents::new()),
            timers: Rc::new(MockTimers::new()),
            network: Rc::new(MockNetwork::new()),
            geometry: Rc::new(MockGeometry::new()),
        }
    }

    pub fn controller_env(&self) -> ControllerEnv {
        ControllerEnv {
            media: self.media.clone(),
            events: self.events.clone(),
            timers: self.timers.clone(),
            network: self.network.clone(),
            geometry: self.geometry.clone(),
        }
    }
}

impl Default for MockEnv {
    fn default() -> Self {
        Self::new()
    }
}
