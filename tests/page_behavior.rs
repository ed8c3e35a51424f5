//! Navigation, swipe, ambient policies, and lifecycle against the mock
//! environment.

#![cfg(not(target_arch = "wasm32"))]

use heroreel::controller::mock::MockEnv;
use heroreel::controller::{
    EnvEvent, MediaHandle, NetworkCondition, Playlist, SectionRegion, SiteController,
};

fn sections() -> Vec<String> {
    ["home", "about", "services", "contact"]
        .into_iter()
        .map(str::to_owned)
        .collect()
}

fn site(sources: &[&str]) -> (MockEnv, SiteController) {
    let env = MockEnv::new();
    let playlist = Playlist::new(sources.iter().map(|s| s.to_string()).collect())
        .expect("test playlist");
    let controller = SiteController::new(env.controller_env(), playlist, sections());
    (env, controller)
}

fn quad() -> (MockEnv, SiteController) {
    site(&["a.mp4", "b.mp4", "c.mp4", "d.mp4"])
}

fn layout(env: &MockEnv) {
    env.geometry.set_region("home", SectionRegion { top: 0.0, height: 800.0 });
    env.geometry.set_region("about", SectionRegion { top: 800.0, height: 600.0 });
    env.geometry.set_region("services", SectionRegion { top: 1400.0, height: 600.0 });
    env.geometry.set_region("contact", SectionRegion { top: 2000.0, height: 600.0 });
}

#[test]
fn swipe_left_advances_and_swipe_right_retreats() {
    let (env, controller) = quad();
    env.media.set_ready(true);
    controller.attach();

    controller.select_index(1);
    env.events.fire(EnvEvent::MediaLoadedData);
    assert_eq!(controller.view_state().current_index, 1);

    controller.touch_start(200.0);
    controller.touch_end(140.0);
    assert_eq!(controller.view_state().current_index, 2);

    controller.select_index(1);
    env.events.fire(EnvEvent::MediaLoadedData);
    controller.touch_start(200.0);
    controller.touch_end(260.0);
    assert_eq!(controller.view_state().current_index, 0);
}

#[test]
fn sub_threshold_swipe_changes_nothing() {
    let (env, controller) = quad();
    env.media.set_ready(true);
    controller.attach();

    controller.touch_start(200.0);
    controller.touch_end(170.0);
    assert_eq!(controller.view_state().current_index, 0);
}

#[test]
fn container_scroll_updates_the_active_section() {
    let (env, controller) = quad();
    env.media.set_ready(true);
    controller.attach();
    layout(&env);

    env.geometry.set_scroll_top(Some(1350.0));
    env.events.fire(EnvEvent::ContainerScroll);
    assert_eq!(controller.view_state().active_section, "services");
}

#[test]
fn scroll_outside_every_section_leaves_the_selection() {
    let (env, controller) = quad();
    env.media.set_ready(true);
    controller.attach();
    layout(&env);

    env.geometry.set_scroll_top(Some(9000.0));
    env.events.fire(EnvEvent::ContainerScroll);
    assert_eq!(controller.view_state().active_section, "home");
}

#[test]
fn programmatic_navigation_suppresses_scroll_detection() {
    let (env, controller) = quad();
    env.media.set_ready(true);
    controller.attach();
    layout(&env);
    env.geometry.set_scroll_top(Some(0.0));

    controller.scroll_to_section("contact");
    assert_eq!(controller.view_state().active_section, "contact");
    assert_eq!(env.geometry.scrolled_to(), vec!["contact".to_string()]);

    // The smooth scroll is still animating: intermediate scroll events must
    // not fight it.
    env.events.fire(EnvEvent::ContainerScroll);
    assert_eq!(controller.view_state().active_section, "contact");

    env.timers.fire_timeouts();
    env.events.fire(EnvEvent::ContainerScroll);
    assert_eq!(controller.view_state().active_section, "home");
}

#[test]
fn menu_toggles_and_closes_with_navigation() {
    let (env, controller) = quad();
    env.media.set_ready(true);
    controller.attach();
    layout(&env);

    controller.toggle_menu();
    assert!(controller.view_state().is_menu_open);

    controller.scroll_to_and_close("about");
    let state = controller.view_state();
    assert!(!state.is_menu_open);
    assert_eq!(state.active_section, "about");

    controller.close_menu();
    assert!(!controller.view_state().is_menu_open);
}

#[test]
fn very_slow_network_pauses_playback() {
    let (env, controller) = quad();
    env.media.set_ready(true);
    controller.attach();
    assert!(controller.view_state().is_playing);

    env.network.set_condition(NetworkCondition::VerySlow);
    env.events.fire(EnvEvent::NetworkChanged);

    assert!(!controller.view_state().is_playing);
    assert_eq!(env.media.pause_count(), 1);
    assert_eq!(env.timers.active_intervals(), 0);
}

#[test]
fn healthy_network_changes_are_ignored() {
    let (env, controller) = quad();
    env.media.set_ready(true);
    controller.attach();

    env.network.set_condition(NetworkCondition::Fast);
    env.events.fire(EnvEvent::NetworkChanged);

    assert!(controller.view_state().is_playing);
    assert_eq!(env.media.pause_count(), 0);
}

#[test]
fn tab_refocus_resumes_a_playing_session() {
    let (env, controller) = quad();
    env.media.set_ready(true);
    controller.attach();

    // The browser paused the element while the tab was hidden; the session
    // still believes it is playing.
    env.media.pause();
    assert!(controller.view_state().is_playing);

    env.events.fire(EnvEvent::VisibilityReturned);
    assert!(env.media.is_playing());
}

#[test]
fn tab_refocus_leaves_a_paused_session_alone() {
    let (env, controller) = quad();
    env.media.set_ready(true);
    controller.attach();
    controller.toggle_playback();

    env.events.fire(EnvEvent::VisibilityReturned);
    assert!(!env.media.is_playing());
    assert!(!controller.view_state().is_playing);
}

#[test]
fn detach_before_attach_is_safe_and_leaves_nothing() {
    let (env, controller) = quad();
    controller.detach();

    assert_eq!(env.events.total_live(), 0);
    assert_eq!(env.timers.total_active(), 0);
}

#[test]
fn detach_releases_every_listener_and_timer() {
    let (env, controller) = quad();
    env.media.set_ready(true);
    controller.attach();
    layout(&env);
    controller.scroll_to_section("about");
    assert!(env.events.total_live() > 0);
    assert!(env.timers.total_active() > 0);

    controller.detach();
    assert_eq!(env.events.total_live(), 0);
    assert_eq!(env.timers.total_active(), 0);

    // Second detach must be a quiet no-op.
    controller.detach();
}

#[test]
fn attach_twice_does_not_double_wire() {
    let (env, controller) = quad();
    env.media.set_ready(true);
    controller.attach();
    let wired = env.events.total_live();

    controller.attach();
    assert_eq!(env.events.total_live(), wired);
}
