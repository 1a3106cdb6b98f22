//! Leptos component wrapping the constellation background.
//!
//! The canvas is inserted straight into `<body>` rather than rendered by the
//! view, so the component itself renders nothing. It activates the background
//! once mounted and tears it down on cleanup.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use send_wrapper::SendWrapper;

use super::canvas::Constellation;
use super::theme::Theme;

/// Mounts the constellation background behind the page.
///
/// Only the first mounted instance animates; later ones find the canvas
/// already present and do nothing.
#[component]
pub fn ConstellationBackground(
	/// Visual overrides. Defaults to the page's `#particle-config` JSON, if any.
	#[prop(optional)]
	theme: Option<Theme>,
) -> impl IntoView {
	let handle: Rc<RefCell<Option<Constellation>>> = Rc::new(RefCell::new(None));
	let handle_init = handle.clone();

	Effect::new(move |_| {
		if handle_init.borrow().is_some() {
			return;
		}
		let theme = theme.clone().unwrap_or_else(crate::load_theme);
		match Constellation::activate(theme) {
			Ok(active) => *handle_init.borrow_mut() = active,
			Err(e) => warn!("constellation: background disabled: {}", e),
		}
	});

	let handle = SendWrapper::new(handle);
	on_cleanup(move || {
		handle.borrow_mut().take();
	});
}
