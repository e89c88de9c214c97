//! Simulation configuration for the particle field.
//!
//! Each interaction mode carries only the parameters it reads, so a flocking
//! field cannot be handed an orbit pull and a swirl cannot be handed a link
//! distance. Presets mirror the backgrounds used across the site.

/// How particles respond to time and the pointer.
#[derive(Clone, Debug, PartialEq)]
pub enum InteractionMode {
	/// Particles chase the pointer while it is engaged and fall back to the
	/// flow field otherwise.
	PointerFollow {
		/// Acceleration toward the pointer at `reference_distance`.
		attraction: f32,
		/// Distance (px) at which the speed multiplier equals 1.0.
		reference_distance: f32,
		/// Upper bound of the distance-proportional speed multiplier.
		max_scale: f32,
		/// Amplitude of the per-particle wobble that keeps converged
		/// particles from settling into a grid.
		oscillation: f32,
		/// Angular speed of the wobble (radians per second).
		oscillation_speed: f32,
	},
	/// Organic drift along the flow field plus a slow orbit around the
	/// canvas center.
	AutonomousSwirl {
		flow_strength: f32,
		field_scale: f32,
		orbit_pull: f32,
		/// Extra attraction toward an engaged pointer.
		pointer_influence: f32,
		/// Pointer attraction falls off linearly to zero at this distance.
		influence_radius: f32,
	},
	/// Slow wandering points joined by proximity links; pressing the
	/// pointer scatters nearby particles.
	FlockingWithLinks {
		drift: f32,
		link_distance: f32,
		grab_distance: f32,
		dispersion: f32,
	},
	/// Pure flow-field motion.
	FlowField {
		field_scale: f32,
		strength: f32,
		time_scale: f32,
	},
	/// Flow-field motion held together around a fixed number of seed regions.
	ClusteredFlow {
		clusters: usize,
		/// Radius (px) of each seed region at spawn time.
		spread: f32,
		cohesion: f32,
		flow_strength: f32,
		field_scale: f32,
	},
}

/// Edge behavior applied after each integration step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Boundary {
	/// Leaving the canvas by more than `margin` re-enters on the opposite edge.
	Wrap { margin: f32 },
	/// Clamp to the edge and reflect the outgoing velocity component.
	SoftBounce { restitution: f32 },
}

impl Boundary {
	/// Distance a particle may sit outside the canvas after correction.
	pub fn margin(&self) -> f32 {
		match self {
			Boundary::Wrap { margin } => margin.max(0.0),
			Boundary::SoftBounce { .. } => 0.0,
		}
	}
}

/// Complete particle field configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
	/// Number of particles, fixed for the lifetime of the field.
	pub count: usize,
	pub mode: InteractionMode,
	pub boundary: Boundary,
	/// Fraction of velocity kept per 60 Hz frame.
	pub damping: f32,
	/// Hard cap on velocity magnitude (px per 60 Hz frame).
	pub max_speed: f32,
	/// Upper bound on the magnitude of the spawn velocity.
	pub initial_speed: f32,
	pub size_range: (f32, f32),
	pub opacity_range: (f32, f32),
	pub color_bias_range: (f32, f32),
	/// Fixed RNG seed. `None` lets the host pick one.
	pub seed: Option<u64>,
}

impl FieldConfig {
	/// Cursor-chasing swarm.
	pub fn pointer_follow() -> Self {
		Self {
			count: 2000,
			mode: InteractionMode::PointerFollow {
				attraction: 0.08,
				reference_distance: 200.0,
				max_scale: 2.0,
				oscillation: 0.05,
				oscillation_speed: 1.5,
			},
			boundary: Boundary::Wrap { margin: 10.0 },
			damping: 0.95,
			max_speed: 6.0,
			initial_speed: 0.6,
			size_range: (0.6, 1.8),
			opacity_range: (0.4, 0.95),
			color_bias_range: (0.0, 0.3),
			seed: None,
		}
	}

	/// Flowing streams that lean toward the cursor.
	pub fn autonomous_swirl() -> Self {
		Self {
			count: 2000,
			mode: InteractionMode::AutonomousSwirl {
				flow_strength: 0.05,
				field_scale: 0.004,
				orbit_pull: 0.0008,
				pointer_influence: 0.02,
				influence_radius: 160.0,
			},
			boundary: Boundary::SoftBounce { restitution: 0.6 },
			damping: 0.98,
			max_speed: 1.8,
			initial_speed: 0.3,
			size_range: (0.5, 1.5),
			opacity_range: (0.6, 0.95),
			color_bias_range: (0.0, 0.03),
			seed: None,
		}
	}

	/// Linked flock, the default site background.
	pub fn flocking() -> Self {
		Self {
			count: 100,
			mode: InteractionMode::FlockingWithLinks {
				drift: 0.02,
				link_distance: 80.0,
				grab_distance: 150.0,
				dispersion: 0.6,
			},
			boundary: Boundary::Wrap { margin: 10.0 },
			damping: 0.97,
			max_speed: 1.0,
			initial_speed: 1.0,
			size_range: (0.5, 2.0),
			opacity_range: (0.3, 0.5),
			color_bias_range: (0.0, 0.5),
			seed: None,
		}
	}

	/// Field lines only.
	pub fn flow_field() -> Self {
		Self {
			count: 5000,
			mode: InteractionMode::FlowField {
				field_scale: 0.003,
				strength: 0.06,
				time_scale: 0.15,
			},
			boundary: Boundary::Wrap { margin: 2.0 },
			damping: 0.96,
			max_speed: 1.5,
			initial_speed: 0.2,
			size_range: (0.4, 1.2),
			opacity_range: (0.2, 0.7),
			color_bias_range: (0.0, 1.0),
			seed: None,
		}
	}

	/// Flow field held in a handful of drifting clumps.
	pub fn clustered_flow() -> Self {
		Self {
			count: 3000,
			mode: InteractionMode::ClusteredFlow {
				clusters: 5,
				spread: 90.0,
				cohesion: 0.002,
				flow_strength: 0.04,
				field_scale: 0.005,
			},
			boundary: Boundary::SoftBounce { restitution: 0.5 },
			damping: 0.97,
			max_speed: 1.4,
			initial_speed: 0.2,
			size_range: (0.5, 1.6),
			opacity_range: (0.3, 0.9),
			color_bias_range: (0.0, 1.0),
			seed: None,
		}
	}

	/// Builder-style seed override.
	pub fn with_seed(mut self, seed: u64) -> Self {
		self.seed = Some(seed);
		self
	}

	/// Pull out-of-range values back into something the simulator can run.
	pub fn sanitize(&mut self) {
		self.damping = finite_or(self.damping, 0.95).clamp(0.0, 0.999);
		self.max_speed = finite_or(self.max_speed, 1.0).max(0.0);
		self.initial_speed = finite_or(self.initial_speed, 0.0).clamp(0.0, self.max_speed);
		self.size_range = finite_range(self.size_range, (0.5, 2.0));
		self.opacity_range = unit_range(finite_range(self.opacity_range, (0.3, 1.0)));
		self.color_bias_range = unit_range(finite_range(self.color_bias_range, (0.0, 1.0)));
		match &mut self.mode {
			InteractionMode::PointerFollow {
				reference_distance,
				max_scale,
				..
			} => {
				*reference_distance = finite_or(*reference_distance, 200.0).max(1.0);
				*max_scale = finite_or(*max_scale, 2.0).max(0.0);
			}
			InteractionMode::AutonomousSwirl {
				influence_radius, ..
			} => *influence_radius = finite_or(*influence_radius, 160.0).max(1.0),
			InteractionMode::FlockingWithLinks {
				link_distance,
				grab_distance,
				..
			} => {
				*link_distance = finite_or(*link_distance, 80.0).max(1.0);
				*grab_distance = finite_or(*grab_distance, 0.0).max(0.0);
			}
			InteractionMode::FlowField { .. } => {}
			InteractionMode::ClusteredFlow {
				clusters, spread, ..
			} => {
				*clusters = (*clusters).max(1);
				*spread = finite_or(*spread, 0.0).max(0.0);
			}
		}
		match &mut self.boundary {
			Boundary::Wrap { margin } => *margin = finite_or(*margin, 0.0).max(0.0),
			Boundary::SoftBounce { restitution } => {
				*restitution = finite_or(*restitution, 0.0).clamp(0.0, 1.0);
			}
		}
	}
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self::flocking()
	}
}

fn finite_or(value: f32, fallback: f32) -> f32 {
	if value.is_finite() { value } else { fallback }
}

fn ordered((a, b): (f32, f32)) -> (f32, f32) {
	if a <= b { (a, b) } else { (b, a) }
}

/// Ordered range with both ends finite; any non-finite end discards the pair.
fn finite_range(range: (f32, f32), fallback: (f32, f32)) -> (f32, f32) {
	if range.0.is_finite() && range.1.is_finite() {
		ordered(range)
	} else {
		fallback
	}
}

fn unit_range((a, b): (f32, f32)) -> (f32, f32) {
	(a.clamp(0.0, 1.0), b.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_is_the_flocking_preset() {
		assert_eq!(FieldConfig::default(), FieldConfig::flocking());
	}

	#[test]
	fn sanitize_repairs_bad_values() {
		let mut config = FieldConfig {
			damping: 1.5,
			max_speed: f32::NAN,
			initial_speed: 10.0,
			size_range: (3.0, 1.0),
			mode: InteractionMode::ClusteredFlow {
				clusters: 0,
				spread: -4.0,
				cohesion: 0.01,
				flow_strength: 0.1,
				field_scale: 0.01,
			},
			boundary: Boundary::SoftBounce { restitution: 2.0 },
			..FieldConfig::clustered_flow()
		};
		config.sanitize();

		assert!(config.damping < 1.0);
		assert_eq!(config.max_speed, 1.0);
		assert_eq!(config.initial_speed, 1.0);
		assert_eq!(config.size_range, (1.0, 3.0));
		assert_eq!(
			config.boundary,
			Boundary::SoftBounce { restitution: 1.0 }
		);
		match config.mode {
			InteractionMode::ClusteredFlow {
				clusters, spread, ..
			} => {
				assert_eq!(clusters, 1);
				assert_eq!(spread, 0.0);
			}
			other => panic!("mode changed: {other:?}"),
		}
	}

	#[test]
	fn sanitize_replaces_non_finite_ranges() {
		let mut config = FieldConfig {
			size_range: (f32::NAN, 1.0),
			opacity_range: (0.2, f32::INFINITY),
			color_bias_range: (0.0, f32::NAN),
			boundary: Boundary::Wrap {
				margin: f32::INFINITY,
			},
			..FieldConfig::flocking()
		};
		config.sanitize();

		for (lo, hi) in [config.size_range, config.opacity_range, config.color_bias_range] {
			assert!(lo.is_finite() && hi.is_finite());
			assert!(lo <= hi);
		}
		assert!((0.0..=1.0).contains(&config.opacity_range.1));
		assert_eq!(config.boundary, Boundary::Wrap { margin: 0.0 });
	}

	#[test]
	fn bounce_has_no_margin() {
		assert_eq!(Boundary::SoftBounce { restitution: 0.5 }.margin(), 0.0);
		assert_eq!(Boundary::Wrap { margin: 12.0 }.margin(), 12.0);
	}
}
