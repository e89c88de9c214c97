//! Browser plumbing shared by the canvas and carousel components.
//!
//! Every listener and animation frame is owned by a guard whose `Drop`
//! releases it, so a component that stores its guards and drops them on
//! unmount cannot leak callbacks across remounts.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, warn};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, HtmlScriptElement};

/// An event listener that removes itself when dropped.
pub struct EventListener {
	target: EventTarget,
	event: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
	/// Register `handler` for `event` on `target`.
	///
	/// Returns `None` (with nothing registered) if the browser refuses the
	/// listener.
	pub fn new(
		target: &EventTarget,
		event: &'static str,
		handler: impl FnMut(Event) + 'static,
	) -> Option<Self> {
		let callback = Closure::<dyn FnMut(Event)>::new(handler);
		target
			.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
			.ok()?;
		Some(Self {
			target: target.clone(),
			event,
			callback,
		})
	}
}

impl Drop for EventListener {
	fn drop(&mut self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
		debug!("released '{}' listener", self.event);
	}
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A `requestAnimationFrame` loop that stops when dropped.
pub struct AnimationLoop {
	pending: Rc<Cell<Option<i32>>>,
	callback: FrameCallback,
}

impl AnimationLoop {
	/// Call `on_frame` with the frame timestamp (ms) once per display refresh.
	pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> Option<Self> {
		let window = web_sys::window()?;
		let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
		let callback: FrameCallback = Rc::new(RefCell::new(None));
		let (pending_inner, callback_inner) = (pending.clone(), callback.clone());

		*callback.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
			pending_inner.set(None);
			on_frame(timestamp);
			let Some(window) = web_sys::window() else {
				return;
			};
			if let Some(ref cb) = *callback_inner.borrow() {
				pending_inner.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}));

		let id = {
			let cb = callback.borrow();
			let cb = cb.as_ref()?;
			window.request_animation_frame(cb.as_ref().unchecked_ref()).ok()
		};
		let Some(id) = id else {
			// The closure holds a handle to its own cell; break the cycle.
			callback.borrow_mut().take();
			return None;
		};
		pending.set(Some(id));

		Some(Self { pending, callback })
	}
}

impl Drop for AnimationLoop {
	fn drop(&mut self) {
		if let (Some(id), Some(window)) = (self.pending.take(), web_sys::window()) {
			let _ = window.cancel_animation_frame(id);
		}
		self.callback.borrow_mut().take();
		debug!("animation loop stopped");
	}
}

/// Parse the JSON body of `<script id="{id}">`, if the element exists.
pub fn load_json_script<T: DeserializeOwned>(id: &str) -> Option<T> {
	let document = web_sys::window()?.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<T>(&json_text) {
		Ok(data) => Some(data),
		Err(e) => {
			warn!("failed to parse #{id}: {e}");
			None
		}
	}
}

/// Seed for host-side randomness.
pub fn browser_seed() -> u64 {
	(js_sys::Math::random() * u64::MAX as f64) as u64 ^ (js_sys::Date::now() as u64)
}
