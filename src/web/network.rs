//! `NetworkMonitor` over the untyped `navigator.connection` object.

use js_sys::Reflect;
use wasm_bindgen::JsValue;
use web_sys::window;

use crate::controller::env::{NetworkCondition, NetworkMonitor};

pub struct WebNetwork;

impl NetworkMonitor for WebNetwork {
    fn condition(&self) -> NetworkCondition {
        let Some(effective) = effective_type() else {
            return NetworkCondition::Unknown;
        };
        match effective.as_str() {
            "slow-2g" | "2g" => NetworkCondition::VerySlow,
            "3g" => NetworkCondition::Slow,
            "4g" => NetworkCondition::Fast,
            _ => NetworkCondition::Unknown,
        }
    }
}

fn effective_type() -> Option<String> {
    let navigator = JsValue::from(window()?.navigator());
    let connection = Reflect::get(&navigator, &"connection".into()).ok()?;
    if connection.is_null() || connection.is_undefined() {
        return None;
    }
    Reflect::get(&connection, &"effectiveType".into())
        .ok()
        .and_then(|value| value.as_string())
}
