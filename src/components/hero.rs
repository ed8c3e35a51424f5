//! Hero section: the video stage, playlist controls, and swipe surface.

use dioxus::prelude::*;

use crate::components::{ControllerHandle, HeroState};
use crate::config;

fn first_changed_touch_x(evt: &TouchEvent) -> Option<f64> {
    evt.touches_changed()
        .first()
        .map(|touch| touch.screen_coordinates().x)
}

#[component]
pub fn Hero() -> Element {
    let controller = use_context::<ControllerHandle>();
    let hero = use_context::<HeroState>();

    let current = (hero.current_index)();
    let playing = (hero.is_playing)();
    let progress = (hero.progress)();

    let on_touch_start = move |evt: TouchEvent| {
        if let Some(x) = first_changed_touch_x(&evt) {
            controller.with(|site| site.touch_start(x));
        }
    };
    let on_touch_end = move |evt: TouchEvent| {
        if let Some(x) = first_changed_touch_x(&evt) {
            controller.with(|site| site.touch_end(x));
        }
    };

    rsx! {
        section {
            id: "home",
            class: "hero",
            ontouchstart: on_touch_start,
            ontouchend: on_touch_end,

            video {
                id: "hero-video",
                class: "hero-video",
                muted: true,
                autoplay: true,
                playsinline: true,
                preload: "auto",
            }

            div { class: "hero-overlay",
                h1 { class: "hero-title", "Stories that move" }
                p { class: "hero-tagline",
                    "Film-first marketing for studios that would rather show than tell."
                }
            }

            div { class: "hero-controls",
                button {
                    id: "prev-btn",
                    class: "hero-arrow",
                    aria_label: "Previous video",
                    onclick: move |_| controller.with(|site| site.retreat()),
                    "‹"
                }
                button {
                    id: "play-pause-btn",
                    class: "hero-toggle",
                    aria_label: if playing { "Pause" } else { "Play" },
                    onclick: move |_| controller.with(|site| site.toggle_playback()),
                    if playing { "❚❚" } else { "▶" }
                }
                button {
                    id: "next-btn",
                    class: "hero-arrow",
                    aria_label: "Next video",
                    onclick: move |_| controller.with(|site| site.advance()),
                    "›"
                }
            }

            div { class: "hero-dots",
                for (index , _source) in config::site().videos.iter().enumerate() {
                    button {
                        key: "{index}",
                        class: if index == current { "hero-dot active" } else { "hero-dot" },
                        aria_label: format!("Show video {}", index + 1),
                        onclick: move |_| controller.with(|site| site.select_index(index)),
                    }
                }
            }

            div { class: "hero-progress",
                div { class: "hero-progress-fill", style: "width: {progress}%" }
            }
        }
    }
}
