//! Visual styling for the particle field.
//!
//! Provides an RGBA color type and per-theme particle palettes.

use crate::components::site_theme::ThemeMode;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Linear interpolation between two colors
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * (1.0 - t) + other.r as f64 * t).round() as u8,
			g: (self.g as f64 * (1.0 - t) + other.g as f64 * t).round() as u8,
			b: (self.b as f64 * (1.0 - t) + other.b as f64 * t).round() as u8,
			a: self.a * (1.0 - t) + other.a * t,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Particle colors and link appearance.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleStyle {
	/// Color at `color_bias == 0`.
	pub color: Color,
	/// Color at `color_bias == 1`.
	pub accent: Color,
	pub link_color: Color,
	/// Multiplier applied to every link's distance-based alpha.
	pub link_opacity: f64,
	/// Pointer "grab" lines are drawn this much stronger than links.
	pub grab_opacity: f64,
	/// Upper bound on proximity links drawn per frame.
	pub max_links: usize,
}

impl ParticleStyle {
	/// Charcoal points on a light page.
	pub fn ink() -> Self {
		Self {
			color: Color::rgb(42, 42, 42),
			accent: Color::rgb(13, 13, 13),
			link_color: Color::rgb(42, 42, 42),
			link_opacity: 0.2,
			grab_opacity: 0.5,
			max_links: 4000,
		}
	}

	/// Pale points on a dark page.
	pub fn chalk() -> Self {
		Self {
			color: Color::rgb(214, 214, 214),
			accent: Color::rgb(245, 245, 245),
			link_color: Color::rgb(200, 200, 200),
			link_opacity: 0.15,
			grab_opacity: 0.4,
			max_links: 4000,
		}
	}

	/// Deep tones that sit on the pastel backgrounds of the color theme.
	pub fn dusk() -> Self {
		Self {
			color: Color::rgb(40, 36, 56),
			accent: Color::rgb(212, 163, 115),
			link_color: Color::rgb(40, 36, 56),
			link_opacity: 0.18,
			grab_opacity: 0.45,
			max_links: 4000,
		}
	}

	pub fn for_mode(mode: ThemeMode) -> Self {
		match mode {
			ThemeMode::Light => Self::ink(),
			ThemeMode::Dark => Self::chalk(),
			ThemeMode::Color => Self::dusk(),
		}
	}

	/// Fill color for a particle with the given bias and opacity.
	pub fn particle_color(&self, color_bias: f32, opacity: f32) -> Color {
		self.color
			.lerp(self.accent, color_bias as f64)
			.with_alpha(opacity.clamp(0.0, 1.0) as f64)
	}
}

impl Default for ParticleStyle {
	fn default() -> Self {
		Self::ink()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn opaque_colors_format_as_hex() {
		assert_eq!(Color::rgb(42, 42, 42).to_css(), "#2a2a2a");
		assert_eq!(
			Color::rgba(10, 20, 30, 0.5).to_css(),
			"rgba(10, 20, 30, 0.500)"
		);
	}

	#[test]
	fn lerp_hits_endpoints() {
		let a = Color::rgb(0, 0, 0);
		let b = Color::rgb(200, 100, 50);
		assert_eq!(a.lerp(b, 0.0), a);
		assert_eq!(a.lerp(b, 1.0), b);
		assert_eq!(a.lerp(b, 0.5), Color::rgb(100, 50, 25));
	}

	#[test]
	fn particle_color_uses_bias_and_opacity() {
		let style = ParticleStyle::dusk();
		let c = style.particle_color(1.0, 0.25);
		assert_eq!((c.r, c.g, c.b), (212, 163, 115));
		assert!((c.a - 0.25).abs() < 1e-9);
	}

	#[test]
	fn every_mode_has_a_style() {
		assert_eq!(ParticleStyle::for_mode(ThemeMode::Light), ParticleStyle::ink());
		assert_eq!(ParticleStyle::for_mode(ThemeMode::Dark), ParticleStyle::chalk());
		assert_eq!(ParticleStyle::for_mode(ThemeMode::Color), ParticleStyle::dusk());
	}
}
