//! Scroll-position → active-section mapping.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use super::env::{SectionGeometry, TimerDriver, TimerHandle};
use super::state::ViewModel;

/// Scroll offset compensation for the fixed navbar.
const NAVBAR_ALLOWANCE: f64 = 100.0;

/// How long scroll-driven detection stays suppressed after a programmatic
/// smooth scroll; the animation typically settles within this window.
const SMOOTH_SCROLL_SETTLE: Duration = Duration::from_millis(1000);

/// Resolves the active section from the main container's scroll offset.
///
/// Sections are scanned in declared order and the first whose vertical
/// interval contains the adjusted position wins; sections without layout
/// geometry yet are skipped. While a programmatic scroll is in flight the
/// tracker stays quiet so it does not fight the animation.
pub struct SectionTracker {
    sections: Vec<String>,
    geometry: Rc<dyn SectionGeometry>,
    timers: Rc<dyn TimerDriver>,
    view: Rc<ViewModel>,
    suppressed: Rc<Cell<bool>>,
    settle_timer: RefCell<Option<TimerHandle>>,
}

impl SectionTracker {
    pub fn new(
        sections: Vec<String>,
        geometry: Rc<dyn SectionGeometry>,
        timers: Rc<dyn TimerDriver>,
        view: Rc<ViewModel>,
    ) -> Self {
        Self {
            sections,
            geometry,
            timers,
            view,
            suppressed: Rc::new(Cell::new(false)),
            settle_timer: RefCell::new(None),
        }
    }

    /// React to a scroll of the main container. Leaves the active section
    /// unchanged when no interval matches.
    pub fn handle_scroll(&self) {
        if self.suppressed.get() {
            return;
        }
        let Some(scroll_top) = self.geometry.scroll_top() else {
            return;
        };
        let position = scroll_top + NAVBAR_ALLOWANCE;
        for section in &self.sections {
            if let Some(region) = self.geometry.region(section) {
                if region.contains(position) {
                    if self.view.active_section() != *section {
                        self.view.set_active_section(section);
                    }
                    break;
                }
            }
        }
    }

    /// Programmatic navigation: mark the section active immediately, request
    /// the smooth scroll, and ignore scroll events until it settles.
    pub fn scroll_to(&self, section: &str) {
        if !self.sections.iter().any(|s| s == section) {
            return;
        }
        self.view.set_active_section(section);
        self.suppressed.set(true);
        self.geometry.scroll_into_view(section);

        let suppressed = self.suppressed.clone();
        *self.settle_timer.borrow_mut() = Some(self.timers.timeout(
            SMOOTH_SCROLL_SETTLE,
            Box::new(move || suppressed.set(false)),
        ));
    }

    /// Cancel the settle timer and lift any suppression.
    pub fn release(&self) {
        self.settle_timer.borrow_mut().take();
        self.suppressed.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::mock::{MockGeometry, MockTimers};
    use crate::controller::env::SectionRegion;

    fn fixture() -> (Rc<MockGeometry>, Rc<MockTimers>, Rc<ViewModel>, SectionTracker) {
        let geometry = Rc::new(MockGeometry::new());
        let timers = Rc::new(MockTimers::new());
        let view = Rc::new(ViewModel::new("home".into()));
        let tracker = SectionTracker::new(
            vec![
                "home".into(),
                "about".into(),
                "services".into(),
                "contact".into(),
            ],
            geometry.clone(),
            timers.clone(),
            view.clone(),
        );
        (geometry, timers, view, tracker)
    }

    #[test]
    fn first_matching_interval_wins() {
        let (geometry, _timers, view, tracker) = fixture();
        geometry.set_region("home", SectionRegion { top: 0.0, height: 600.0 });
        // Overlapping on purpose: "about" also contains the probe position,
        // but "home" is declared first.
        geometry.set_region("about", SectionRegion { top: 400.0, height: 600.0 });
        geometry.set_scroll_top(Some(450.0));

        tracker.handle_scroll();
        assert_eq!(view.active_section(), "home");
    }

    #[test]
    fn navbar_allowance_is_applied() {
        let (geometry, _timers, view, tracker) = fixture();
        geometry.set_region("about", SectionRegion { top: 700.0, height: 500.0 });
        geometry.set_scroll_top(Some(620.0));

        tracker.handle_scroll();
        assert_eq!(view.active_section(), "about");
    }

    #[test]
    fn no_match_leaves_active_section_unchanged() {
        let (geometry, _timers, view, tracker) = fixture();
        geometry.set_region("home", SectionRegion { top: 0.0, height: 100.0 });
        geometry.set_scroll_top(Some(5000.0));

        tracker.handle_scroll();
        assert_eq!(view.active_section(), "home");
    }

    #[test]
    fn missing_geometry_is_skipped() {
        let (geometry, _timers, view, tracker) = fixture();
        // "home" and "about" not laid out yet.
        geometry.set_region("services", SectionRegion { top: 1000.0, height: 400.0 });
        geometry.set_scroll_top(Some(1000.0));

        tracker.handle_scroll();
        assert_eq!(view.active_section(), "services");
    }

    #[test]
    fn unbound_container_disables_detection() {
        let (geometry, _timers, view, tracker) = fixture();
        geometry.set_region("about", SectionRegion { top: 0.0, height: 5000.0 });
        geometry.set_scroll_top(None);

        tracker.handle_scroll();
        assert_eq!(view.active_section(), "home");
    }

    #[test]
    fn programmatic_scroll_suppresses_detection_until_settled() {
        let (geometry, timers, view, tracker) = fixture();
        geometry.set_region("home", SectionRegion { top: 0.0, height: 600.0 });
        geometry.set_scroll_top(Some(0.0));

        tracker.scroll_to("contact");
        assert_eq!(view.active_section(), "contact");
        assert_eq!(geometry.scrolled_to(), vec!["contact".to_string()]);

        // Mid-animation scroll events must not flip the section back.
        tracker.handle_scroll();
        assert_eq!(view.active_section(), "contact");

        timers.fire_timeouts();
        tracker.handle_scroll();
        assert_eq!(view.active_section(), "home");
    }

    #[test]
    fn unknown_section_is_ignored() {
        let (geometry, _timers, view, tracker) = fixture();
        tracker.scroll_to("careers");
        assert_eq!(view.active_section(), "home");
        assert!(geometry.scrolled_to().is_empty());
    }
}
