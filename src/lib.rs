//! heroreel — client-side controller for a single-page marketing site:
//! a looping hero video playlist with autoplay negotiation, section-aware
//! scroll navigation, and touch-swipe playlist control.

pub mod components;
pub mod config;
pub mod controller;

#[cfg(target_arch = "wasm32")]
pub mod web;
