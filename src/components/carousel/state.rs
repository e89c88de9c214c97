//! Carousel navigation and media playback state machine.
//!
//! The controller never touches the DOM. Every mutating call returns the
//! [`MediaCommand`]s the playback collaborator must carry out, and playback
//! outcomes are fed back through `media_ready`, `play_resolved`,
//! `media_error` and `playback_changed`.

use std::fmt;

use wasm_bindgen::JsValue;

use super::config::{AutoplayPolicy, BoundaryPolicy, CarouselConfig};
use super::types::ProjectEntry;

/// Instruction for the media playback collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaCommand {
	/// Start fetching the entry's video.
	Load(usize),
	/// Request playback; answer with `play_resolved`.
	Play(usize),
	Pause(usize),
}

/// Runtime playback flags for one entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MediaFlags {
	pub loaded: bool,
	pub playing: bool,
	pub errored: bool,
	pub use_fallback: bool,
	/// A play request is outstanding.
	pub play_pending: bool,
}

/// What the media area of a slide should show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MediaDisplay {
	Video(String),
	Image(String),
	Fallback(String),
	/// Playback failed and there is no still image to fall back to.
	ErrorNotice,
	/// The terminal call-to-action slide.
	Closing,
}

/// The runtime refused a play request (autoplay policy, unsupported media).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaybackRejected {
	pub reason: String,
}

impl fmt::Display for PlaybackRejected {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "playback rejected: {}", self.reason)
	}
}

impl std::error::Error for PlaybackRejected {}

impl From<JsValue> for PlaybackRejected {
	fn from(value: JsValue) -> Self {
		let reason = value
			.as_string()
			.or_else(|| {
				js_sys::Reflect::get(&value, &JsValue::from_str("name"))
					.ok()
					.and_then(|name| name.as_string())
			})
			.unwrap_or_else(|| format!("{value:?}"));
		Self { reason }
	}
}

/// Slide index, navigation lock and per-entry playback flags.
#[derive(Clone, Debug)]
pub struct CarouselState {
	entries: Vec<ProjectEntry>,
	flags: Vec<MediaFlags>,
	config: CarouselConfig,
	current: usize,
	direction: i8,
	transitioning: bool,
	transition_started: f64,
	autoplayed: bool,
}

impl CarouselState {
	/// Start on the first slide. A video there is asked to load immediately.
	pub fn new(entries: Vec<ProjectEntry>, config: CarouselConfig) -> (Self, Vec<MediaCommand>) {
		let flags = vec![MediaFlags::default(); entries.len()];
		let mut state = Self {
			entries,
			flags,
			config,
			current: 0,
			direction: 0,
			transitioning: false,
			transition_started: 0.0,
			autoplayed: false,
		};
		let mut commands = Vec::new();
		state.enter(0, &mut commands);
		(state, commands)
	}

	pub fn entries(&self) -> &[ProjectEntry] {
		&self.entries
	}

	pub fn config(&self) -> &CarouselConfig {
		&self.config
	}

	/// Entries plus the closing slide, if configured.
	pub fn slide_count(&self) -> usize {
		self.entries.len() + usize::from(self.config.closing_slide)
	}

	pub fn current(&self) -> usize {
		self.current
	}

	/// Direction of the most recent accepted navigation: -1, 0 or 1.
	pub fn direction(&self) -> i8 {
		self.direction
	}

	pub fn is_transitioning(&self) -> bool {
		self.transitioning
	}

	/// The current slide is the closing call-to-action.
	pub fn on_closing_slide(&self) -> bool {
		self.config.closing_slide && self.current == self.entries.len()
	}

	/// Flags for an entry; the closing slide and out-of-range indices have none.
	pub fn flags(&self, index: usize) -> Option<&MediaFlags> {
		self.flags.get(index)
	}

	/// Number of entries currently marked as playing.
	pub fn playing_count(&self) -> usize {
		self.flags.iter().filter(|f| f.playing).count()
	}

	/// Step forward (`delta > 0`) or back (`delta < 0`).
	///
	/// Ignored while a transition is running and when the boundary policy
	/// leaves the index unchanged.
	pub fn navigate(&mut self, delta: i32, now: f64) -> Vec<MediaCommand> {
		let count = self.slide_count();
		if self.transitioning || count == 0 || delta == 0 {
			return Vec::new();
		}

		let target = self.current as i64 + delta as i64;
		let next = match self.config.boundary {
			BoundaryPolicy::Clamp => target.clamp(0, count as i64 - 1),
			BoundaryPolicy::Wrap => target.rem_euclid(count as i64),
		} as usize;
		if next == self.current {
			return Vec::new();
		}

		self.begin_transition(next, delta.signum() as i8, now)
	}

	/// Go straight to `index` (dot controls).
	pub fn jump_to(&mut self, index: usize, now: f64) -> Vec<MediaCommand> {
		if self.transitioning || index >= self.slide_count() || index == self.current {
			return Vec::new();
		}
		let direction = if index > self.current { 1 } else { -1 };
		self.begin_transition(index, direction, now)
	}

	/// The slide's presentation finished; accept navigation again.
	pub fn finish_transition(&mut self) {
		self.transitioning = false;
	}

	/// Release the navigation lock once `transition_ms` has passed.
	pub fn poll(&mut self, now: f64) {
		if self.transitioning && now - self.transition_started >= self.config.transition_ms {
			self.transitioning = false;
		}
	}

	/// The playback collaborator can play `index` through.
	pub fn media_ready(&mut self, index: usize) -> Vec<MediaCommand> {
		if index != self.current || !self.is_video(index) {
			return Vec::new();
		}
		let autoplay = match self.config.autoplay {
			AutoplayPolicy::EveryEntry => true,
			AutoplayPolicy::FirstLoadOnly => !self.autoplayed,
		};

		let flags = &mut self.flags[index];
		flags.loaded = true;
		if !autoplay || flags.use_fallback || flags.play_pending || flags.playing {
			return Vec::new();
		}
		flags.play_pending = true;
		self.autoplayed = true;
		vec![MediaCommand::Play(index)]
	}

	/// Outcome of an earlier `Play(index)`.
	pub fn play_resolved(
		&mut self,
		index: usize,
		outcome: Result<(), PlaybackRejected>,
	) -> Vec<MediaCommand> {
		let current = self.current;
		let Some(flags) = self.flags.get_mut(index) else {
			return Vec::new();
		};
		flags.play_pending = false;

		match outcome {
			Ok(()) if index == current => {
				flags.playing = true;
				Vec::new()
			}
			// The user moved on while the request was in flight.
			Ok(()) => {
				flags.playing = false;
				vec![MediaCommand::Pause(index)]
			}
			Err(_) if index == current => {
				flags.playing = false;
				flags.use_fallback = true;
				Vec::new()
			}
			Err(_) => Vec::new(),
		}
	}

	/// The current entry's media failed to load or decode.
	pub fn media_error(&mut self, index: usize) {
		if index != self.current {
			return;
		}
		if let Some(flags) = self.flags.get_mut(index) {
			flags.errored = true;
			flags.use_fallback = true;
			flags.playing = false;
		}
	}

	/// Mirror `play`/`pause` events the element fires on its own (end of
	/// media, stalls, the browser suspending playback).
	pub fn playback_changed(&mut self, index: usize, playing: bool) {
		if index != self.current {
			return;
		}
		if let Some(flags) = self.flags.get_mut(index) {
			if flags.loaded && !flags.use_fallback {
				flags.playing = playing;
			}
		}
	}

	/// Click on the media area. Ignored until the video has loaded.
	pub fn toggle_playback(&mut self) -> Vec<MediaCommand> {
		let index = self.current;
		if !self.is_video(index) {
			return Vec::new();
		}
		let flags = &mut self.flags[index];
		if !flags.loaded || flags.use_fallback || flags.play_pending {
			return Vec::new();
		}
		if flags.playing {
			flags.playing = false;
			vec![MediaCommand::Pause(index)]
		} else {
			flags.play_pending = true;
			vec![MediaCommand::Play(index)]
		}
	}

	/// What the media area of slide `index` should show.
	pub fn display(&self, index: usize) -> MediaDisplay {
		let Some(entry) = self.entries.get(index) else {
			return MediaDisplay::Closing;
		};
		let flags = self.flags[index];
		if !entry.is_video() {
			return MediaDisplay::Image(entry.media.clone());
		}
		if flags.use_fallback {
			return match &entry.fallback {
				Some(src) => MediaDisplay::Fallback(src.clone()),
				None => MediaDisplay::ErrorNotice,
			};
		}
		MediaDisplay::Video(entry.media.clone())
	}

	fn is_video(&self, index: usize) -> bool {
		self.entries.get(index).is_some_and(ProjectEntry::is_video)
	}

	fn begin_transition(&mut self, next: usize, direction: i8, now: f64) -> Vec<MediaCommand> {
		self.direction = direction;
		self.transitioning = true;
		self.transition_started = now;
		let mut commands = Vec::new();
		self.enter(next, &mut commands);
		commands
	}

	/// Make `index` current, pausing everything else in the same update.
	fn enter(&mut self, index: usize, commands: &mut Vec<MediaCommand>) {
		for (i, flags) in self.flags.iter_mut().enumerate() {
			if flags.playing || flags.play_pending {
				commands.push(MediaCommand::Pause(i));
			}
			flags.playing = false;
		}
		self.current = index;

		if let Some(flags) = self.flags.get_mut(index) {
			flags.loaded = false;
			flags.errored = false;
			flags.use_fallback = false;
		}
		if self.is_video(index) {
			commands.push(MediaCommand::Load(index));
		}
	}
}
