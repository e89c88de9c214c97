//! Carousel behavior configuration.

/// What happens when navigating past the first or last slide.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoundaryPolicy {
	/// Stay on the edge slide.
	#[default]
	Clamp,
	/// Continue from the opposite end.
	Wrap,
}

/// Which ready-to-play signals start playback automatically.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AutoplayPolicy {
	/// Only the first video that becomes ready autoplays.
	FirstLoadOnly,
	/// Every video autoplays when it becomes current and ready.
	#[default]
	EveryEntry,
}

/// Complete carousel configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct CarouselConfig {
	pub boundary: BoundaryPolicy,
	pub autoplay: AutoplayPolicy,
	/// Navigation is locked for this long (ms) unless the slide reports the
	/// end of its transition sooner.
	pub transition_ms: f64,
	/// Append a terminal call-to-action slide with no media.
	pub closing_slide: bool,
}

impl Default for CarouselConfig {
	fn default() -> Self {
		Self {
			boundary: BoundaryPolicy::Clamp,
			autoplay: AutoplayPolicy::EveryEntry,
			transition_ms: 600.0,
			closing_slide: false,
		}
	}
}
