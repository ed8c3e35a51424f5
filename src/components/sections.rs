//! Static content sections below the hero.

use dioxus::prelude::*;

#[component]
pub fn AboutSection() -> Element {
    rsx! {
        section { id: "about", class: "section",
            h2 { "About" }
            p {
                "We are a four-person studio that has spent a decade making short "
                "films for brands that hate advertising. Every frame on this page "
                "is ours."
            }
        }
    }
}

#[component]
pub fn ServicesSection() -> Element {
    rsx! {
        section { id: "services", class: "section",
            h2 { "Services" }
            ul { class: "services-list",
                li { "Brand films and product launches" }
                li { "Event and behind-the-scenes coverage" }
                li { "Cutdowns for every aspect ratio you ship to" }
            }
        }
    }
}

#[component]
pub fn ContactSection() -> Element {
    rsx! {
        section { id: "contact", class: "section",
            h2 { "Contact" }
            p {
                "Tell us what you are making: "
                a { href: "mailto:hello@heroreel.studio", "hello@heroreel.studio" }
            }
        }
    }
}

#[component]
pub fn SiteFooter() -> Element {
    rsx! {
        footer { class: "footer",
            p { "© Heroreel Studio. Shot on location, cut in the edit bay." }
        }
    }
}
