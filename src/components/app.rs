//! Root component: shared state, controller bootstrap, page layout.

use std::rc::Rc;

use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
use dioxus::core::{Runtime, RuntimeGuard};
#[cfg(target_arch = "wasm32")]
use dioxus::logger::tracing::warn;

use crate::components::{AboutSection, ContactSection, Hero, Navbar, ServicesSection, SiteFooter};
#[cfg(target_arch = "wasm32")]
use crate::config;
#[cfg(target_arch = "wasm32")]
use crate::controller::Playlist;
use crate::controller::SiteController;

const SITE_CSS: Asset = asset!("/assets/styling/site.css");

/// The live controller, once the DOM exists. `None` until bootstrap and on
/// non-browser targets.
#[derive(Clone, Copy)]
pub struct ControllerHandle(pub Signal<Option<Rc<SiteController>>>);

impl ControllerHandle {
    /// Run an intent against the controller, if it is live.
    pub fn with(&self, intent: impl FnOnce(&SiteController)) {
        if let Some(site) = self.0.peek().clone() {
            intent(&site);
        }
    }
}

/// Playback state mirrored from the controller for rendering.
#[derive(Clone, Copy)]
pub struct HeroState {
    pub current_index: Signal<usize>,
    pub is_playing: Signal<bool>,
    pub progress: Signal<f64>,
}

/// Navigation state mirrored from the controller.
#[derive(Clone, Copy)]
pub struct NavState {
    pub active_section: Signal<String>,
    pub menu_open: Signal<bool>,
}

#[component]
pub fn App() -> Element {
    rsx! {
        document::Meta { name: "theme-color", content: "#101014" }
        document::Meta {
            name: "description",
            content: "Heroreel — film-first marketing for small studios",
        }
        document::Stylesheet { href: SITE_CSS }

        SiteShell {}
    }
}

#[component]
pub fn SiteShell() -> Element {
    let current_index = use_signal(|| 0usize);
    let is_playing = use_signal(|| false);
    let progress = use_signal(|| 0.0f64);
    let active_section = use_signal(|| String::from("home"));
    let menu_open = use_signal(|| false);
    let controller = use_signal(|| None::<Rc<SiteController>>);

    use_context_provider(|| ControllerHandle(controller));
    use_context_provider(|| HeroState {
        current_index,
        is_playing,
        progress,
    });
    use_context_provider(|| NavState {
        active_section,
        menu_open,
    });

    // Bootstrap once the hero markup is in the DOM; the controller's view
    // sink mirrors its state into the signals above.
    #[cfg(target_arch = "wasm32")]
    {
        let mut controller = controller.clone();
        let mut current_index = current_index.clone();
        let mut is_playing = is_playing.clone();
        let mut progress = progress.clone();
        let mut active_section = active_section.clone();
        let mut menu_open = menu_open.clone();
        use_effect(move || {
            if controller.peek().is_some() {
                return;
            }
            let env = match crate::web::site_env() {
                Ok(env) => env,
                Err(err) => {
                    warn!("site environment unavailable: {err}");
                    return;
                }
            };
            let playlist = match Playlist::new(config::site().videos.clone()) {
                Ok(playlist) => playlist,
                Err(err) => {
                    warn!("hero playlist rejected: {err}");
                    return;
                }
            };
            let site = Rc::new(SiteController::new(
                env,
                playlist,
                config::site().section_ids(),
            ));

            // View-sink callbacks arrive from native browser events, outside
            // the Dioxus runtime, so signal writes need the guard.
            let runtime = Runtime::current();
            site.set_view_sink(Box::new(move |state| {
                let _guard = RuntimeGuard::new(runtime.clone());
                current_index.set(state.current_index);
                is_playing.set(state.is_playing);
                progress.set(state.progress_percent);
                active_section.set(state.active_section);
                menu_open.set(state.is_menu_open);
            }));
            site.attach();
            controller.set(Some(site));
        });
    }

    {
        let controller = controller.clone();
        use_drop(move || {
            if let Some(site) = controller.peek().clone() {
                site.detach();
            }
        });
    }

    rsx! {
        Navbar {}
        main { id: "main-content", class: "main-content",
            Hero {}
            AboutSection {}
            ServicesSection {}
            ContactSection {}
            SiteFooter {}
        }
    }
}
