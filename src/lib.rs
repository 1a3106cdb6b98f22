//! constellation-bg: animated constellation background for web pages.
//!
//! This crate provides a WASM background effect that fills the viewport with
//! slowly drifting particles and joins nearby ones with faint lines. It can be
//! mounted as a leptos component or started from plain JavaScript through
//! [`activate_constellation`].

use log::{Level, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlScriptElement, Window};

// Selects the `js` entropy backend that `rand` needs on wasm32.
use getrandom as _;

pub mod components;

pub use components::constellation::{
	CANVAS_ID, Constellation, ConstellationBackground, ConstellationError, Theme,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("constellation: logging initialized");
}

/// Load theme overrides from a script element with id="particle-config".
/// Expected format: JSON matching [`Theme`], any field may be omitted.
pub fn load_theme() -> Theme {
	try_load_theme().unwrap_or_default()
}

fn try_load_theme() -> Option<Theme> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("particle-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match Theme::from_json(&json_text) {
		Ok(theme) => {
			info!("constellation: loaded theme overrides");
			Some(theme)
		}
		Err(e) => {
			warn!("constellation: failed to parse theme overrides: {}", e);
			None
		}
	}
}

/// Start the background from JavaScript.
///
/// Safe to call any number of times: only the first call on a page does
/// anything. Failures are logged, never thrown, so the host page is unaffected.
#[wasm_bindgen(js_name = activateConstellation)]
pub fn activate_constellation() {
	match Constellation::activate(load_theme()) {
		Ok(Some(constellation)) => constellation.forget(),
		Ok(None) => {}
		Err(e) => warn!("constellation: background disabled: {}", e),
	}
}
