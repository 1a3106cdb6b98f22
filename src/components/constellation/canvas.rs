//! Full-viewport canvas lifecycle and the `requestAnimationFrame` loop.
//!
//! [`Constellation::activate`] creates a single fixed canvas behind the page,
//! wires the window `resize` event to a full re-setup, and keeps exactly one
//! frame callback in flight. Dropping the handle tears everything down again.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, Window};

use super::settings::LocalStorageSettings;
use super::state::ConstellationState;
use super::theme::Theme;

/// Reserved element id; its presence in the document makes activation a no-op.
pub const CANVAS_ID: &str = "particle-canvas";

/// Why the background could not be set up.
#[derive(Debug, thiserror::Error)]
pub enum ConstellationError {
	#[error("no global window")]
	NoWindow,
	#[error("window has no document")]
	NoDocument,
	#[error("document has no body")]
	NoBody,
	#[error("2d drawing context unavailable")]
	ContextUnavailable,
	#[error("DOM call failed: {0}")]
	Js(String),
}

impl From<JsValue> for ConstellationError {
	fn from(value: JsValue) -> Self {
		Self::Js(describe(&value))
	}
}

fn describe(value: &JsValue) -> String {
	value
		.dyn_ref::<js_sys::Error>()
		.map(|e| String::from(e.message()))
		.or_else(|| value.as_string())
		.unwrap_or_else(|| format!("{value:?}"))
}

type BrowserState = ConstellationState<LocalStorageSettings, StdRng>;

struct Inner {
	window: Window,
	body: HtmlElement,
	canvas: HtmlCanvasElement,
	ctx: RefCell<CanvasRenderingContext2d>,
	state: RefCell<BrowserState>,
	/// Handle of the pending animation frame, if any.
	frame: Cell<Option<i32>>,
	animate: RefCell<Option<Closure<dyn FnMut()>>>,
	resize_cb: RefCell<Option<Closure<dyn FnMut()>>>,
	/// Body `background-color` before activation, restored on teardown.
	previous_background: String,
}

/// Handle to the running background.
///
/// Dropping it cancels the loop, detaches the resize listener, removes the
/// canvas and restores the page background.
pub struct Constellation {
	inner: Rc<Inner>,
}

fn viewport_size(window: &Window) -> (f64, f64) {
	let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
	(dim(window.inner_width()), dim(window.inner_height()))
}

impl Constellation {
	/// Insert the canvas as the first child of `<body>` and start animating.
	///
	/// Returns `Ok(None)` without touching the page when a `#particle-canvas`
	/// element already exists. The 2D context is acquired before anything is
	/// inserted, so a failure leaves the page untouched.
	pub fn activate(theme: Theme) -> Result<Option<Self>, ConstellationError> {
		let window = web_sys::window().ok_or(ConstellationError::NoWindow)?;
		let document = window.document().ok_or(ConstellationError::NoDocument)?;
		if document.get_element_by_id(CANVAS_ID).is_some() {
			debug!("constellation: #{CANVAS_ID} already present, skipping activation");
			return Ok(None);
		}
		let body = document.body().ok_or(ConstellationError::NoBody)?;

		let canvas: HtmlCanvasElement = document
			.create_element("canvas")?
			.dyn_into()
			.map_err(|_| ConstellationError::Js("created element is not a canvas".into()))?;
		canvas.set_id(CANVAS_ID);

		let background = theme.background.color.to_css();
		let style = canvas.style();
		for (property, value) in [
			("position", "fixed"),
			("top", "0"),
			("left", "0"),
			("width", "100%"),
			("height", "100%"),
			("z-index", "-1"),
			("pointer-events", "none"),
			("background", background.as_str()),
		] {
			style.set_property(property, value)?;
		}

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into().ok())
			.ok_or(ConstellationError::ContextUnavailable)?;

		let (w, h) = viewport_size(&window);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let body_style = body.style();
		let previous_background = body_style
			.get_property_value("background-color")
			.unwrap_or_default();
		body_style.set_property("background-color", "transparent")?;
		body.prepend_with_node_1(&canvas)?;

		let state = ConstellationState::new(
			theme,
			LocalStorageSettings::new(),
			StdRng::from_entropy(),
			w,
			h,
		);
		info!(
			"constellation: activated at {}x{} with {} particles",
			w,
			h,
			state.particles().len()
		);

		let inner = Rc::new(Inner {
			window,
			body,
			canvas,
			ctx: RefCell::new(ctx),
			state: RefCell::new(state),
			frame: Cell::new(None),
			animate: RefCell::new(None),
			resize_cb: RefCell::new(None),
			previous_background,
		});

		let weak = Rc::downgrade(&inner);
		*inner.animate.borrow_mut() = Some(Closure::new(move || {
			if let Some(inner) = weak.upgrade() {
				inner.frame.set(None);
				inner.state.borrow_mut().tick(&mut *inner.ctx.borrow_mut());
				request_frame(&inner);
			}
		}));

		let weak: Weak<Inner> = Rc::downgrade(&inner);
		*inner.resize_cb.borrow_mut() = Some(Closure::new(move || {
			if let Some(inner) = weak.upgrade() {
				resize(&inner);
			}
		}));
		// From here on a failure drops the handle, which undoes the insertion.
		let constellation = Self { inner };
		let listening = match *constellation.inner.resize_cb.borrow() {
			Some(ref cb) => constellation
				.inner
				.window
				.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref()),
			None => Ok(()),
		};
		listening?;
		constellation.start();
		Ok(Some(constellation))
	}

	/// Schedule the next frame unless one is already pending.
	pub fn start(&self) {
		if self.inner.frame.get().is_none() {
			request_frame(&self.inner);
		}
	}

	/// Cancel the pending frame, if any. The canvas keeps its last image.
	pub fn stop(&self) {
		cancel_frame(&self.inner);
	}

	/// Match the canvas to the current viewport and regenerate the particles.
	pub fn resize(&self) {
		resize(&self.inner);
	}

	pub fn is_running(&self) -> bool {
		self.inner.frame.get().is_some()
	}

	pub fn particle_count(&self) -> usize {
		self.inner.state.borrow().particles().len()
	}

	pub fn canvas(&self) -> &HtmlCanvasElement {
		&self.inner.canvas
	}

	/// Keep the background running for the rest of the page's life.
	pub fn forget(self) {
		std::mem::forget(self);
	}
}

impl Drop for Constellation {
	fn drop(&mut self) {
		let inner = &self.inner;
		cancel_frame(inner);
		if let Some(cb) = inner.resize_cb.borrow_mut().take() {
			let _ = inner
				.window
				.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
		inner.animate.borrow_mut().take();
		inner.canvas.remove();

		let body_style = inner.body.style();
		let _ = if inner.previous_background.is_empty() {
			body_style.remove_property("background-color").map(|_| ())
		} else {
			body_style.set_property("background-color", &inner.previous_background)
		};
		debug!("constellation: torn down");
	}
}

fn request_frame(inner: &Inner) {
	if let Some(ref cb) = *inner.animate.borrow() {
		match inner.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
			Ok(handle) => inner.frame.set(Some(handle)),
			Err(e) => warn!("constellation: requestAnimationFrame failed: {}", describe(&e)),
		}
	}
}

fn cancel_frame(inner: &Inner) {
	if let Some(handle) = inner.frame.take() {
		let _ = inner.window.cancel_animation_frame(handle);
	}
}

/// Cancel, resize the pixel buffer (which clears it), regenerate, restart.
fn resize(inner: &Inner) {
	cancel_frame(inner);
	let (w, h) = viewport_size(&inner.window);
	inner.canvas.set_width(w as u32);
	inner.canvas.set_height(h as u32);

	let count = {
		let mut state = inner.state.borrow_mut();
		state.setup(w, h);
		state.particles().len()
	};
	debug!("constellation: resized to {}x{}, {} particles", w, h, count);

	request_frame(inner);
}
