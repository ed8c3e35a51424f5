//! Fixed navbar with section links and the mobile menu.

use dioxus::prelude::*;

use crate::components::{ControllerHandle, NavState};
use crate::config;

#[component]
pub fn Navbar() -> Element {
    let controller = use_context::<ControllerHandle>();
    let nav = use_context::<NavState>();

    let active = (nav.active_section)();
    let open = (nav.menu_open)();

    rsx! {
        nav { class: "navbar",
            a {
                class: "navbar-brand",
                onclick: move |_| controller.with(|site| site.scroll_to_and_close("home")),
                "Heroreel"
            }
            button {
                class: "navbar-burger",
                aria_label: "Toggle menu",
                onclick: move |_| controller.with(|site| site.toggle_menu()),
                span { class: if open { "burger-bar open" } else { "burger-bar" } }
            }
            ul { class: if open { "navbar-links open" } else { "navbar-links" },
                for link in config::site().sections.iter() {
                    li { key: "{link.id}",
                        a {
                            class: if active == link.id { "navbar-link active" } else { "navbar-link" },
                            onclick: move |_| {
                                controller.with(|site| site.scroll_to_and_close(&link.id))
                            },
                            "{link.label}"
                        }
                    }
                }
            }
        }
    }
}
