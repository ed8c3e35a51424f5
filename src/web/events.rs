//! `EventSource` over DOM event targets.
//!
//! Each subscription keeps the `Closure` it registered with; removal uses
//! that same reference, never a re-derived one.

use js_sys::Reflect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, AddEventListenerOptions, EventTarget, HtmlVideoElement, VisibilityState};

use crate::controller::env::{EnvEvent, EventSource, Subscription};

pub struct WebEvents {
    video: HtmlVideoElement,
    container_id: &'static str,
}

impl WebEvents {
    pub fn new(video: HtmlVideoElement, container_id: &'static str) -> Self {
        Self {
            video,
            container_id,
        }
    }

    fn target_for(&self, event: EnvEvent) -> Option<(EventTarget, &'static str)> {
        let win = window()?;
        let document = win.document()?;
        match event {
            EnvEvent::MediaLoadedData => Some((self.video.clone().into(), "loadeddata")),
            EnvEvent::MediaEnded => Some((self.video.clone().into(), "ended")),
            EnvEvent::MediaPlay => Some((self.video.clone().into(), "play")),
            EnvEvent::MediaPause => Some((self.video.clone().into(), "pause")),
            EnvEvent::TouchInteraction => Some((win.into(), "touchstart")),
            EnvEvent::Click => Some((win.into(), "click")),
            EnvEvent::VisibilityReturned => Some((document.into(), "visibilitychange")),
            EnvEvent::NetworkChanged => {
                let connection = connection_target(&win)?;
                Some((connection, "change"))
            }
            EnvEvent::ContainerScroll => {
                let container = document.get_element_by_id(self.container_id)?;
                Some((container.into(), "scroll"))
            }
        }
    }
}

impl EventSource for WebEvents {
    fn subscribe(
        &self,
        event: EnvEvent,
        once: bool,
        mut callback: Box<dyn FnMut()>,
    ) -> Subscription {
        let Some((target, name)) = self.target_for(event) else {
            // Capability missing (no connection object, container not in the
            // DOM): nothing to register, nothing to leak.
            return Subscription::inert();
        };

        // visibilitychange fires for both directions; the controller only
        // cares about the return to visible.
        let wrapped: Box<dyn FnMut()> = if event == EnvEvent::VisibilityReturned {
            Box::new(move || {
                let visible = window()
                    .and_then(|w| w.document())
                    .map(|d| d.visibility_state() == VisibilityState::Visible)
                    .unwrap_or(false);
                if visible {
                    callback();
                }
            })
        } else {
            callback
        };

        let closure = Closure::wrap(wrapped);
        let options = AddEventListenerOptions::new();
        options.set_once(once);
        options.set_passive(true);
        let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
            name,
            closure.as_ref().unchecked_ref(),
            &options,
        );

        Subscription::new(move || {
            let _ = target.remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        })
    }
}

/// The untyped `navigator.connection` object, when the browser exposes one.
fn connection_target(win: &web_sys::Window) -> Option<EventTarget> {
    let navigator = JsValue::from(win.navigator());
    let connection = Reflect::get(&navigator, &"connection".into()).ok()?;
    if connection.is_null() || connection.is_undefined() {
        return None;
    }
    connection.dyn_into::<EventTarget>().ok()
}
