//! Deterministic flow field shared by the autonomous modes.

use std::f32::consts::PI;

use glam::Vec2;

/// Direction angle (radians) of the flow at a scaled position and time.
///
/// A sum of low-frequency sines keeps neighboring particles roughly aligned
/// while the field slowly evolves, so motion never repeats exactly.
pub fn flow_angle(p: Vec2, t: f32) -> f32 {
	let a = (p.x + t * 0.3).sin() + (p.y - t * 0.2).cos();
	let b = ((p.x + p.y) * 0.5 + t * 0.1).sin() * 0.5;
	(a + b) * PI * 0.5
}

/// Unit vector along the flow at `p`.
pub fn flow_direction(p: Vec2, t: f32, phase: f32) -> Vec2 {
	Vec2::from_angle(flow_angle(p, t) + phase)
}

/// Point on a circle of `radius` around `center` at angle `phase + t * speed`.
pub fn orbit_target(center: Vec2, radius: f32, phase: f32, speed: f32, t: f32) -> Vec2 {
	center + Vec2::from_angle(phase + t * speed) * radius
}
