//! Leptos component presenting project slides with video playback.
//!
//! Navigation and playback decisions live in [`CarouselState`]; this module
//! only translates DOM events into state calls and executes the returned
//! [`MediaCommand`]s against the slide `<video>` elements.

use std::time::Duration;

use leptos::prelude::*;
use log::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{HtmlMediaElement, KeyboardEvent, TransitionEvent, WheelEvent};

use super::config::{BoundaryPolicy, CarouselConfig};
use super::state::{CarouselState, MediaCommand, MediaDisplay, PlaybackRejected};
use super::types::ProjectEntry;
use crate::components::dom::EventListener;

/// Wheel deltas below this are treated as trackpad jitter.
const WHEEL_THRESHOLD: f64 = 4.0;

/// Slack added to the transition fallback timer.
const POLL_SLACK_MS: u64 = 50;

type Carousel = RwSignal<CarouselState, LocalStorage>;

fn now() -> f64 {
	js_sys::Date::now()
}

fn media_id(index: usize) -> String {
	format!("project-media-{index}")
}

fn media_element(index: usize) -> Option<HtmlMediaElement> {
	web_sys::window()?
		.document()?
		.get_element_by_id(&media_id(index))?
		.dyn_into()
		.ok()
}

/// Carry out controller commands once the DOM has caught up with the state
/// change that produced them.
fn dispatch(carousel: Carousel, commands: Vec<MediaCommand>) {
	if commands.is_empty() {
		return;
	}
	set_timeout(move || commands.into_iter().for_each(|c| execute(carousel, c)), Duration::ZERO);
}

fn execute(carousel: Carousel, command: MediaCommand) {
	debug!("carousel: {command:?}");
	match command {
		MediaCommand::Load(i) => {
			if let Some(media) = media_element(i) {
				media.load();
			}
		}
		MediaCommand::Pause(i) => {
			if let Some(media) = media_element(i) {
				let _ = media.pause();
			}
		}
		MediaCommand::Play(i) => {
			let promise = media_element(i)
				.ok_or_else(|| PlaybackRejected {
					reason: "media element missing".into(),
				})
				.and_then(|media| media.play().map_err(PlaybackRejected::from));
			spawn_local(async move {
				let outcome = match promise {
					Ok(promise) => JsFuture::from(promise).await.map(|_| ()).map_err(PlaybackRejected::from),
					Err(e) => Err(e),
				};
				if let Err(e) = &outcome {
					info!("carousel: slide {i}: {e}, showing fallback");
				}
				if let Some(commands) = carousel.try_update(|s| s.play_resolved(i, outcome)) {
					dispatch(carousel, commands);
				}
			});
		}
	}
}

/// Apply a state transition and execute whatever it asks of the media.
fn apply(carousel: Carousel, f: impl FnOnce(&mut CarouselState) -> Vec<MediaCommand>) {
	if let Some(commands) = carousel.try_update(f) {
		dispatch(carousel, commands);
	}
}

/// Step by `delta` slides, arming the transition fallback timer if accepted.
fn step(carousel: Carousel, delta: i32) {
	let before = carousel.with_untracked(CarouselState::current);
	apply(carousel, |s| s.navigate(delta, now()));
	if carousel.with_untracked(CarouselState::current) != before {
		arm_poll(carousel);
	}
}

fn jump(carousel: Carousel, index: usize) {
	let before = carousel.with_untracked(CarouselState::current);
	apply(carousel, |s| s.jump_to(index, now()));
	if carousel.with_untracked(CarouselState::current) != before {
		arm_poll(carousel);
	}
}

fn arm_poll(carousel: Carousel) {
	let Some(ms) = carousel.try_with_untracked(|s| s.config().transition_ms) else {
		return;
	};
	set_timeout(
		move || {
			let _ = carousel.try_update(|s| s.poll(now()));
		},
		Duration::from_millis(ms.max(0.0) as u64 + POLL_SLACK_MS),
	);
}

/// Horizontal project carousel.
///
/// Scroll, arrow keys, the arrow buttons and the dots navigate; clicking a
/// loaded video toggles playback. Videos that cannot play fall back to the
/// entry's still image.
#[component]
pub fn ProjectCarousel(
	entries: Vec<ProjectEntry>,
	#[prop(default = CarouselConfig::default())] config: CarouselConfig,
	/// Content of the closing slide, when `config.closing_slide` is set.
	#[prop(optional, into)]
	closing: ViewFn,
) -> impl IntoView {
	let wraps = config.boundary == BoundaryPolicy::Wrap;
	let (state, initial) = CarouselState::new(entries, config);
	info!("carousel: {} slides", state.slide_count());
	let slide_count = state.slide_count();
	let carousel: Carousel = RwSignal::new_local(state);
	dispatch(carousel, initial);

	let keys = StoredValue::new_local(None::<EventListener>);
	if let Some(window) = web_sys::window() {
		let listener = EventListener::new(&window, "keydown", move |ev| {
			let Some(ev) = ev.dyn_ref::<KeyboardEvent>() else {
				return;
			};
			let delta = match ev.key().as_str() {
				"ArrowRight" | "ArrowDown" => 1,
				"ArrowLeft" | "ArrowUp" => -1,
				_ => return,
			};
			ev.prevent_default();
			step(carousel, delta);
		});
		if listener.is_none() {
			warn!("carousel: keyboard navigation unavailable");
		}
		keys.set_value(listener);
	}
	on_cleanup(move || {
		let _ = keys.try_update_value(|k| k.take());
	});

	let on_wheel = move |ev: WheelEvent| {
		let dy = ev.delta_y();
		if dy.abs() < WHEEL_THRESHOLD {
			return;
		}
		ev.prevent_default();
		step(carousel, dy.signum() as i32);
	};

	let on_transition_end = move |ev: TransitionEvent| {
		if ev.target() == ev.current_target() {
			carousel.update(CarouselState::finish_transition);
		}
	};

	let current = Memo::new(move |_| carousel.with(CarouselState::current));
	let direction = move || if carousel.with(CarouselState::direction) < 0 { "backward" } else { "forward" };
	let at_start = move || !wraps && current.get() == 0;
	let at_end = move || !wraps && current.get() + 1 >= slide_count;

	let slides = (0..slide_count)
		.map(|i| {
			view! {
				<Slide carousel=carousel index=i current=current closing=closing.clone() />
			}
		})
		.collect_view();

	let dots = (0..slide_count)
		.map(|i| {
			view! {
				<button
					class="carousel-dot"
					class:active=move || current.get() == i
					aria-label=format!("Go to slide {}", i + 1)
					on:click=move |_| jump(carousel, i)
				/>
			}
		})
		.collect_view();

	view! {
		<div class="carousel" data-direction=direction on:wheel=on_wheel>
			<div
				class="carousel-track"
				style:transform=move || format!("translateX(-{}%)", current.get() * 100)
				on:transitionend=on_transition_end
			>
				{slides}
			</div>
			<button
				class="carousel-arrow prev"
				aria-label="Previous project"
				disabled=at_start
				on:click=move |_| step(carousel, -1)
			>
				"‹"
			</button>
			<button
				class="carousel-arrow next"
				aria-label="Next project"
				disabled=at_end
				on:click=move |_| step(carousel, 1)
			>
				"›"
			</button>
			<div class="carousel-dots">{dots}</div>
		</div>
	}
}

#[component]
fn Slide(carousel: Carousel, index: usize, current: Memo<usize>, closing: ViewFn) -> impl IntoView {
	let display = Memo::new(move |_| carousel.with(|s| s.display(index)));
	let entry = carousel.with_untracked(|s| s.entries().get(index).cloned());

	let media = move || match display.get() {
		MediaDisplay::Video(src) => view! {
			<video
				id=media_id(index)
				src=src
				prop:muted=true
				playsinline=true
				loop=true
				preload="auto"
				on:canplay=move |_| apply(carousel, |s| s.media_ready(index))
				on:error=move |_| carousel.update(|s| s.media_error(index))
				on:play=move |_| carousel.update(|s| s.playback_changed(index, true))
				on:pause=move |_| carousel.update(|s| s.playback_changed(index, false))
			/>
		}
		.into_any(),
		MediaDisplay::Image(src) | MediaDisplay::Fallback(src) => view! { <img src=src alt="" /> }.into_any(),
		MediaDisplay::ErrorNotice => view! {
			<p class="media-error">"This clip could not be played."</p>
		}
		.into_any(),
		MediaDisplay::Closing => closing.run(),
	};

	let text = entry.map(|e| {
		view! {
			<div class="slide-text">
				<h2>{e.title}</h2>
				<p>{e.description}</p>
			</div>
		}
	});

	view! {
		<section
			class="carousel-slide"
			class:current=move || current.get() == index
			aria-hidden=move || (current.get() != index).to_string()
		>
			<div class="slide-media" on:click=move |_| apply(carousel, CarouselState::toggle_playback)>
				{media}
			</div>
			{text}
		</section>
	}
}
