//! Browser implementations of the controller environment, over
//! `web-sys`/`js-sys`/`gloo-timers`.

mod events;
mod geometry;
mod media;
mod network;
mod timers;

use std::rc::Rc;

use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{window, HtmlVideoElement};

use crate::controller::ControllerEnv;
pub use events::WebEvents;
pub use geometry::WebGeometry;
pub use media::WebMedia;
pub use network::WebNetwork;
pub use timers::WebTimers;

/// DOM id of the hero video element rendered by the view.
pub const HERO_VIDEO_ID: &str = "hero-video";
/// DOM id of the main scroll container.
pub const MAIN_CONTENT_ID: &str = "main-content";

#[derive(Debug, Error)]
pub enum WebEnvError {
    #[error("document is not available")]
    NoDocument,
    #[error("element #{0} not found")]
    MissingElement(&'static str),
    #[error("element #{0} is not a video element")]
    NotAVideo(&'static str),
}

/// Assemble the controller environment from the rendered DOM. Call after the
/// hero markup exists.
pub fn site_env() -> Result<ControllerEnv, WebEnvError> {
    let document = window()
        .and_then(|w| w.document())
        .ok_or(WebEnvError::NoDocument)?;
    let video: HtmlVideoElement = document
        .get_element_by_id(HERO_VIDEO_ID)
        .ok_or(WebEnvError::MissingElement(HERO_VIDEO_ID))?
        .dyn_into()
        .map_err(|_| WebEnvError::NotAVideo(HERO_VIDEO_ID))?;

    Ok(ControllerEnv {
        media: Rc::new(WebMedia::new(video.clone())),
        events: Rc::new(WebEvents::new(video, MAIN_CONTENT_ID)),
        timers: Rc::new(WebTimers),
        network: Rc::new(WebNetwork),
        geometry: Rc::new(WebGeometry::new(MAIN_CONTENT_ID)),
    })
}
