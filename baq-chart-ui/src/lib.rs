//! Shared Dioxus components and JS bridge for the Beijing air quality dashboard.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for D3.js chart and Leaflet map functions via `js_sys::eval()`
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: Reusable RSX components (pickers, cards, containers, etc.)

pub mod js_bridge;
pub mod state;
pub mod components;
