//! `SectionGeometry` over the rendered section elements.

use wasm_bindgen::JsCast;
use web_sys::{window, HtmlElement, ScrollBehavior, ScrollIntoViewOptions};

use crate::controller::env::{SectionGeometry, SectionRegion};

pub struct WebGeometry {
    container_id: &'static str,
}

impl WebGeometry {
    pub fn new(container_id: &'static str) -> Self {
        Self { container_id }
    }
}

fn element_by_id(id: &str) -> Option<HtmlElement> {
    window()?
        .document()?
        .get_element_by_id(id)?
        .dyn_into::<HtmlElement>()
        .ok()
}

impl SectionGeometry for WebGeometry {
    fn region(&self, section: &str) -> Option<SectionRegion> {
        let element = element_by_id(section)?;
        Some(SectionRegion {
            top: element.offset_top() as f64,
            height: element.offset_height() as f64,
        })
    }

    fn scroll_top(&self) -> Option<f64> {
        Some(element_by_id(self.container_id)?.scroll_top() as f64)
    }

    fn scroll_into_view(&self, section: &str) {
        if let Some(element) = element_by_id(section) {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            element.scroll_into_view_with_scroll_into_view_options(&options);
        }
    }
}
