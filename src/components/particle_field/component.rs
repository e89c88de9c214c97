//! Leptos component wrapping the particle field canvas.
//!
//! The component acquires a 2d context, sizes the canvas to the viewport at
//! the device pixel ratio, registers pointer and resize listeners, and runs
//! the simulation and renderer from `requestAnimationFrame`. All of that is
//! held by a [`FieldMount`] which is dropped when the component unmounts.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, HtmlElement, MouseEvent, Window};

use super::config::FieldConfig;
use super::particles::{FrameInput, ParticleField, PointerState};
use super::render;
use super::theme::ParticleStyle;
use crate::components::dom::{AnimationLoop, EventListener, browser_seed};

/// Fallback frame length before two timestamps are available.
const FIRST_FRAME_DT: f32 = 1.0 / 60.0;

/// Aspect-ratio change (relative) above which a resize re-spawns the field
/// instead of stretching it.
const RESPAWN_ASPECT_CHANGE: f64 = 0.01;

/// The drawing surface and its CSS-pixel size.
struct Surface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	width: f64,
	height: f64,
}

impl Surface {
	/// Match the backing store to the device pixel ratio so strokes stay crisp.
	fn fit(&mut self, width: f64, height: f64, dpr: f64) {
		self.width = width;
		self.height = height;
		self.canvas.set_width((width * dpr).round() as u32);
		self.canvas.set_height((height * dpr).round() as u32);
		let style = HtmlElement::style(&self.canvas);
		let _ = style.set_property("width", &format!("{width}px"));
		let _ = style.set_property("height", &format!("{height}px"));
		// Setting the size resets the context transform.
		let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
	}
}

/// Simulation state shared between the frame loop and input listeners.
struct FieldContext {
	field: ParticleField,
	pointer: PointerState,
	surface: Surface,
	last_frame: Option<f64>,
}

/// Everything registered with the browser for one mounted canvas.
struct FieldMount {
	_listeners: Vec<EventListener>,
	_animation: AnimationLoop,
}

/// Renders an animated particle field filling the viewport.
///
/// Colors follow the reactive `style` signal; the simulation itself is set
/// up once from `config`. If no 2d context is available the canvas stays
/// blank and nothing is registered.
#[component]
pub fn ParticleFieldCanvas(
	#[prop(default = FieldConfig::default())] config: FieldConfig,
	#[prop(into)] style: Signal<ParticleStyle>,
	#[prop(default = "particle-field")] class: &'static str,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let mount = StoredValue::new_local(None::<FieldMount>);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if mount.with_value(Option::is_some) {
			return;
		}
		match FieldMount::attach(canvas.into(), config.clone(), style) {
			Some(m) => mount.set_value(Some(m)),
			None => warn!("particle field: no drawing surface, animation disabled"),
		}
	});

	on_cleanup(move || {
		if mount.try_update_value(|m| m.take()).flatten().is_some() {
			info!("particle field: unmounted");
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class=class
			aria-hidden="true"
			style="position: fixed; inset: 0; pointer-events: none; z-index: 0;"
		/>
	}
}

impl FieldMount {
	fn attach(
		canvas: HtmlCanvasElement,
		mut config: FieldConfig,
		style: Signal<ParticleStyle>,
	) -> Option<Self> {
		let window: Window = web_sys::window()?;
		let document = window.document()?;
		let ctx: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;
		let (width, height) = viewport_size(&window)?;

		let mut surface = Surface {
			canvas,
			ctx,
			width,
			height,
		};
		surface.fit(width, height, device_pixel_ratio(&window));

		if config.seed.is_none() {
			config.seed = Some(browser_seed());
		}
		let field = ParticleField::new(config, width as f32, height as f32);
		info!(
			"particle field: {} particles, {:?}",
			field.particles().len(),
			field.config().mode
		);

		let context = Rc::new(RefCell::new(FieldContext {
			field,
			pointer: PointerState::default(),
			surface,
			last_frame: None,
		}));

		let mut listeners = Vec::with_capacity(6);

		let context_resize = context.clone();
		listeners.push(EventListener::new(&window, "resize", move |_| {
			let Some(win) = web_sys::window() else {
				return;
			};
			let Some((nw, nh)) = viewport_size(&win) else {
				return;
			};
			let mut c = context_resize.borrow_mut();
			let (ow, oh) = (c.surface.width, c.surface.height);
			c.surface.fit(nw, nh, device_pixel_ratio(&win));
			let (old_aspect, new_aspect) = (ow / oh.max(1.0), nw / nh.max(1.0));
			if ((new_aspect - old_aspect) / old_aspect).abs() <= RESPAWN_ASPECT_CHANGE {
				c.field.resize(nw as f32, nh as f32);
			} else {
				c.field.reset(nw as f32, nh as f32);
			}
		})?);

		let context_move = context.clone();
		listeners.push(EventListener::new(&window, "pointermove", move |ev: Event| {
			let mut c = context_move.borrow_mut();
			if let Some(position) = canvas_position(&c.surface.canvas, &ev) {
				c.pointer.position = position;
				c.pointer.active = true;
			}
		})?);

		let context_down = context.clone();
		listeners.push(EventListener::new(&window, "pointerdown", move |_| {
			context_down.borrow_mut().pointer.down = true;
		})?);

		let context_up = context.clone();
		listeners.push(EventListener::new(&window, "pointerup", move |_| {
			context_up.borrow_mut().pointer.down = false;
		})?);

		let root = document.document_element()?;
		let context_enter = context.clone();
		listeners.push(EventListener::new(&root, "mouseenter", move |_| {
			context_enter.borrow_mut().pointer.active = true;
		})?);

		let context_leave = context.clone();
		listeners.push(EventListener::new(&root, "mouseleave", move |_| {
			let mut c = context_leave.borrow_mut();
			c.pointer.active = false;
			c.pointer.down = false;
		})?);

		let context_frame = context.clone();
		let animation = AnimationLoop::start(move |timestamp| {
			let mut c = context_frame.borrow_mut();
			let dt = c
				.last_frame
				.map(|last| ((timestamp - last) / 1000.0) as f32)
				.unwrap_or(FIRST_FRAME_DT);
			c.last_frame = Some(timestamp);

			let input = FrameInput {
				dt,
				pointer: c.pointer,
			};
			c.field.step(&input);
			style.with_untracked(|s| render::render(&c.field, &c.pointer, &c.surface.ctx, s));
		})?;

		Some(Self {
			_listeners: listeners,
			_animation: animation,
		})
	}
}

fn viewport_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn device_pixel_ratio(window: &Window) -> f64 {
	let dpr = window.device_pixel_ratio();
	if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 }
}

/// Pointer position relative to the canvas, in CSS pixels.
fn canvas_position(canvas: &HtmlCanvasElement, ev: &Event) -> Option<Vec2> {
	let ev = ev.dyn_ref::<MouseEvent>()?;
	let rect = canvas.get_bounding_client_rect();
	Some(Vec2::new(
		(ev.client_x() as f64 - rect.left()) as f32,
		(ev.client_y() as f64 - rect.top()) as f32,
	))
}
