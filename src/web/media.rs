//! `MediaHandle` over the hero `<video>` element.

use js_sys::Reflect;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlVideoElement;

use crate::controller::env::{MediaHandle, PlayContinuation, PlayOutcome};

/// `readyState` at which the element holds data for the current frame.
const HAVE_CURRENT_DATA: u16 = 2;

pub struct WebMedia {
    video: HtmlVideoElement,
}

impl WebMedia {
    pub fn new(video: HtmlVideoElement) -> Self {
        Self { video }
    }
}

impl MediaHandle for WebMedia {
    fn apply_playback_attrs(&self, looping: bool) {
        // iOS-safe setup: inline and muted must both be set before any play
        // attempt, and muted needs the attribute as well as the property.
        let _ = self.video.set_attribute("playsinline", "");
        let _ = self.video.set_attribute("webkit-playsinline", "");
        self.video.set_muted(true);
        let _ = self.video.set_attribute("muted", "");
        self.video.set_autoplay(true);
        self.video.set_preload("auto");
        self.video.set_loop(looping);
    }

    fn set_source(&self, url: &str) {
        self.video.set_src(url);
    }

    fn reload(&self) {
        self.video.load();
    }

    fn has_current_data(&self) -> bool {
        self.video.ready_state() >= HAVE_CURRENT_DATA
    }

    fn request_play(&self, done: PlayContinuation) {
        match self.video.play() {
            Ok(promise) => {
                wasm_bindgen_futures::spawn_local(async move {
                    match JsFuture::from(promise).await {
                        Ok(_) => done(PlayOutcome::Started),
                        Err(err) => done(classify_rejection(&err)),
                    }
                });
            }
            Err(err) => done(classify_rejection(&err)),
        }
    }

    fn pause(&self) {
        let _ = self.video.pause();
    }

    fn current_time(&self) -> f64 {
        self.video.current_time()
    }

    fn duration(&self) -> f64 {
        self.video.duration()
    }

    fn set_opacity(&self, value: f64) {
        let _ = self.video.style().set_property("opacity", &value.to_string());
    }

    fn enable_fade_transition(&self) {
        let _ = self
            .video
            .style()
            .set_property("transition", "opacity 0.5s ease-in-out");
    }
}

/// Autoplay policy rejections carry the DOM exception name
/// `NotAllowedError`; anything else is a genuine failure.
fn classify_rejection(err: &JsValue) -> PlayOutcome {
    let name = Reflect::get(err, &"name".into())
        .ok()
        .and_then(|value| value.as_string());
    match name.as_deref() {
        Some("NotAllowedError") => PlayOutcome::Blocked,
        _ => PlayOutcome::Failed,
    }
}
