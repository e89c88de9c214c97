//! Particle field simulation.
//!
//! The field owns a fixed set of particles and advances them once per
//! display frame. `step` is a pure function of the field and the
//! [`FrameInput`] handed to it, so pointer state is never captured by the
//! browser callbacks that feed it.

use std::collections::HashMap;
use std::f32::consts::TAU;

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::config::{Boundary, FieldConfig, InteractionMode};
use super::flow::{flow_direction, orbit_target};

/// Seed used when the configuration does not carry one.
const DEFAULT_SEED: u64 = 0x5EED_F1E1D;

/// Longest frame the simulation will integrate in one step (seconds).
/// Background tabs resume with huge gaps between frames.
const MAX_DT: f32 = 0.1;

/// Field scale used by pointer-follow when the pointer is disengaged.
const IDLE_FIELD_SCALE: f32 = 0.004;

/// A single simulated point.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub position: Vec2,
	pub velocity: Vec2,
	pub size: f32,
	pub opacity: f32,
	/// 0.0 draws in the base color, 1.0 in the accent color.
	pub color_bias: f32,
	pub phase_angle: f32,
	pub phase_speed: f32,
	pub orbit_radius: f32,
	/// Seed region this particle was spawned in (clustered flow only).
	pub home: usize,
}

/// Pointer state as last reported by the input listeners.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
	/// Canvas-local position in CSS pixels.
	pub position: Vec2,
	/// Pointer is over the page.
	pub active: bool,
	/// Primary button is held.
	pub down: bool,
}

impl PointerState {
	/// Pointer is over the page and not pressed.
	pub fn engaged(&self) -> bool {
		self.active && !self.down
	}
}

/// Everything one simulation step reads besides the field itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
	/// Seconds since the previous frame.
	pub dt: f32,
	pub pointer: PointerState,
}

/// Canvas extent in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub width: f32,
	pub height: f32,
}

impl Bounds {
	/// Degenerate and non-finite sizes are floored at one pixel.
	pub fn new(width: f32, height: f32) -> Self {
		Self {
			width: width.max(1.0).min(f32::MAX),
			height: height.max(1.0).min(f32::MAX),
		}
	}

	pub fn center(&self) -> Vec2 {
		Vec2::new(self.width, self.height) * 0.5
	}

	/// Whether `p` lies inside the bounds grown by `margin` on every side.
	pub fn contains(&self, p: Vec2, margin: f32) -> bool {
		p.x >= -margin && p.x <= self.width + margin && p.y >= -margin && p.y <= self.height + margin
	}
}

/// A line between two points, drawn with the given opacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
	pub from: Vec2,
	pub to: Vec2,
	pub alpha: f32,
}

/// Fixed-size particle set advanced once per frame.
pub struct ParticleField {
	particles: Vec<Particle>,
	config: FieldConfig,
	bounds: Bounds,
	/// Spawn centers of the clustered-flow regions.
	seeds: Vec<Vec2>,
	/// Current (drifting) cluster centers, refreshed each step.
	centers: Vec<Vec2>,
	elapsed: f32,
	frame: u64,
	rng: SmallRng,
}

impl ParticleField {
	pub fn new(mut config: FieldConfig, width: f32, height: f32) -> Self {
		config.sanitize();
		let mut rng = SmallRng::seed_from_u64(config.seed.unwrap_or(DEFAULT_SEED));
		let bounds = Bounds::new(width, height);
		let seeds = spawn_seeds(&config.mode, bounds, &mut rng);

		let particles = (0..config.count)
			.map(|i| spawn_particle(&config, bounds, &seeds, i, &mut rng))
			.collect();

		log::debug!(
			"particle field: spawned {} particles in {}x{}",
			config.count,
			bounds.width,
			bounds.height
		);

		Self {
			particles,
			centers: seeds.clone(),
			seeds,
			config,
			bounds,
			elapsed: 0.0,
			frame: 0,
			rng,
		}
	}

	/// Advance every particle by one frame.
	pub fn step(&mut self, input: &FrameInput) {
		let dt = if input.dt.is_finite() {
			input.dt.clamp(0.0, MAX_DT)
		} else {
			0.0
		};
		// Rates in the config are per 60 Hz frame.
		let frames = dt * 60.0;
		self.elapsed += dt;
		self.frame += 1;

		let t = self.elapsed;
		let keep = self.config.damping.powf(frames);
		let center = self.bounds.center();
		self.refresh_centers(t);

		for p in &mut self.particles {
			let accel = acceleration(&self.config.mode, p, &input.pointer, t, center, &self.centers);
			p.velocity = (p.velocity * keep + accel * frames).clamp_length_max(self.config.max_speed);
			p.position += p.velocity * frames;
			apply_boundary(p, self.config.boundary, self.bounds);
		}
	}

	/// Rescale the field to a new canvas size without re-spawning.
	pub fn resize(&mut self, width: f32, height: f32) {
		let bounds = Bounds::new(width, height);
		let scale = Vec2::new(
			bounds.width / self.bounds.width,
			bounds.height / self.bounds.height,
		);
		let radius_scale = (scale.x + scale.y) * 0.5;

		for p in &mut self.particles {
			p.position *= scale;
			p.orbit_radius *= radius_scale;
			apply_boundary(p, self.config.boundary, bounds);
		}
		for seed in &mut self.seeds {
			*seed *= scale;
		}
		self.bounds = bounds;
		self.refresh_centers(self.elapsed);
	}

	/// Full re-initialization at a new size with a fresh seed.
	pub fn reset(&mut self, width: f32, height: f32) {
		let seed = self.rng.r#gen::<u64>();
		*self = Self::new(self.config.clone().with_seed(seed), width, height);
	}

	/// Read-only snapshot for the renderer.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn bounds(&self) -> Bounds {
		self.bounds
	}

	pub fn config(&self) -> &FieldConfig {
		&self.config
	}

	/// Seconds of simulated time.
	pub fn elapsed(&self) -> f32 {
		self.elapsed
	}

	/// Number of completed steps.
	pub fn frame(&self) -> u64 {
		self.frame
	}

	/// Proximity links between particles, at most `max` of them.
	///
	/// Only the flocking mode draws links. Particles are bucketed into a grid
	/// of `link_distance` cells so each particle only tests its neighborhood.
	pub fn links(&self, max: usize) -> Vec<Link> {
		let InteractionMode::FlockingWithLinks { link_distance, .. } = self.config.mode else {
			return Vec::new();
		};

		let cell_of = |p: Vec2| {
			(
				(p.x / link_distance).floor() as i32,
				(p.y / link_distance).floor() as i32,
			)
		};
		let mut grid: HashMap<(i32, i32), Vec<usize>> = HashMap::new();
		for (i, p) in self.particles.iter().enumerate() {
			grid.entry(cell_of(p.position)).or_default().push(i);
		}

		let mut links = Vec::new();
		for (i, a) in self.particles.iter().enumerate() {
			let (cx, cy) = cell_of(a.position);
			for dx in -1..=1 {
				for dy in -1..=1 {
					let Some(bucket) = grid.get(&(cx + dx, cy + dy)) else {
						continue;
					};
					for &j in bucket.iter().filter(|&&j| j > i) {
						let b = &self.particles[j];
						let dist = a.position.distance(b.position);
						if dist < link_distance {
							if links.len() >= max {
								return links;
							}
							links.push(Link {
								from: a.position,
								to: b.position,
								alpha: 1.0 - dist / link_distance,
							});
						}
					}
				}
			}
		}
		links
	}

	/// "Grab" lines from an engaged pointer to nearby particles.
	pub fn pointer_links(&self, pointer: &PointerState) -> Vec<Link> {
		let InteractionMode::FlockingWithLinks { grab_distance, .. } = self.config.mode else {
			return Vec::new();
		};
		if !pointer.engaged() || grab_distance <= 0.0 {
			return Vec::new();
		}

		self.particles
			.iter()
			.filter_map(|p| {
				let dist = pointer.position.distance(p.position);
				(dist < grab_distance).then(|| Link {
					from: pointer.position,
					to: p.position,
					alpha: 1.0 - dist / grab_distance,
				})
			})
			.collect()
	}

	fn refresh_centers(&mut self, t: f32) {
		let InteractionMode::ClusteredFlow { spread, .. } = self.config.mode else {
			return;
		};
		for (i, (center, seed)) in self.centers.iter_mut().zip(&self.seeds).enumerate() {
			*center = orbit_target(*seed, spread * 0.5, i as f32 * 1.7, 0.05, t);
		}
	}
}

fn spawn_seeds(mode: &InteractionMode, bounds: Bounds, rng: &mut SmallRng) -> Vec<Vec2> {
	let InteractionMode::ClusteredFlow {
		clusters, spread, ..
	} = *mode
	else {
		return Vec::new();
	};

	let axis = |extent: f32, rng: &mut SmallRng| {
		let lo = spread.min(extent * 0.5);
		let hi = (extent - spread).max(extent * 0.5);
		rng.gen_range(lo..=hi)
	};
	(0..clusters)
		.map(|_| Vec2::new(axis(bounds.width, rng), axis(bounds.height, rng)))
		.collect()
}

fn spawn_particle(
	config: &FieldConfig,
	bounds: Bounds,
	seeds: &[Vec2],
	index: usize,
	rng: &mut SmallRng,
) -> Particle {
	let (position, home) = match config.mode {
		InteractionMode::ClusteredFlow { spread, .. } if !seeds.is_empty() => {
			let home = index % seeds.len();
			// sqrt keeps the disc uniformly filled
			let r = spread * rng.gen_range(0.0f32..=1.0).sqrt();
			let offset = Vec2::from_angle(rng.gen_range(0.0..=TAU)) * r;
			let p = (seeds[home] + offset).clamp(Vec2::ZERO, Vec2::new(bounds.width, bounds.height));
			(p, home)
		}
		_ => (
			Vec2::new(
				rng.gen_range(0.0..=bounds.width),
				rng.gen_range(0.0..=bounds.height),
			),
			0,
		),
	};

	let speed = rng.gen_range(0.0..=config.initial_speed);
	let min_side = bounds.width.min(bounds.height);

	Particle {
		position,
		velocity: Vec2::from_angle(rng.gen_range(0.0..=TAU)) * speed,
		size: sample(rng, config.size_range),
		opacity: sample(rng, config.opacity_range),
		color_bias: sample(rng, config.color_bias_range),
		phase_angle: rng.gen_range(0.0..=TAU),
		phase_speed: rng.gen_range(0.2..=1.0),
		orbit_radius: min_side * rng.gen_range(0.1..=0.45),
		home,
	}
}

fn sample(rng: &mut SmallRng, (lo, hi): (f32, f32)) -> f32 {
	rng.gen_range(lo..=hi)
}

fn acceleration(
	mode: &InteractionMode,
	p: &Particle,
	pointer: &PointerState,
	t: f32,
	center: Vec2,
	centers: &[Vec2],
) -> Vec2 {
	match *mode {
		InteractionMode::PointerFollow {
			attraction,
			reference_distance,
			max_scale,
			oscillation,
			oscillation_speed,
		} => {
			if pointer.engaged() {
				let to = pointer.position - p.position;
				let scale = (to.length() / reference_distance).min(max_scale);
				let wobble_angle = t * oscillation_speed + p.phase_angle;
				let wobble = Vec2::new(wobble_angle.sin(), wobble_angle.cos()) * oscillation;
				to.normalize_or_zero() * attraction * scale + wobble
			} else {
				flow_direction(p.position * IDLE_FIELD_SCALE, t * 0.2, p.phase_angle * 0.25)
					* attraction
					* 0.5
			}
		}
		InteractionMode::AutonomousSwirl {
			flow_strength,
			field_scale,
			orbit_pull,
			pointer_influence,
			influence_radius,
		} => {
			let flow = flow_direction(p.position * field_scale, t, p.phase_angle * 0.1) * flow_strength;
			let target = orbit_target(center, p.orbit_radius, p.phase_angle, p.phase_speed * 0.2, t);
			let mut accel = flow + (target - p.position) * orbit_pull;
			if pointer.engaged() {
				let to = pointer.position - p.position;
				let dist = to.length();
				if dist < influence_radius {
					accel += to.normalize_or_zero() * pointer_influence * (1.0 - dist / influence_radius);
				}
			}
			accel
		}
		InteractionMode::FlockingWithLinks {
			drift,
			grab_distance,
			dispersion,
			..
		} => {
			let mut accel = flow_direction(p.position * 0.01, t * 0.1, p.phase_angle) * drift;
			if pointer.active && pointer.down && grab_distance > 0.0 {
				let away = p.position - pointer.position;
				let dist = away.length();
				if dist < grab_distance {
					accel += away.normalize_or_zero() * dispersion * (1.0 - dist / grab_distance);
				}
			}
			accel
		}
		InteractionMode::FlowField {
			field_scale,
			strength,
			time_scale,
		} => flow_direction(p.position * field_scale, t * time_scale, p.phase_angle * 0.2) * strength,
		InteractionMode::ClusteredFlow {
			cohesion,
			flow_strength,
			field_scale,
			..
		} => {
			let flow = flow_direction(p.position * field_scale, t * 0.2, p.phase_angle * 0.2) * flow_strength;
			let home = centers.get(p.home).copied().unwrap_or(center);
			flow + (home - p.position) * cohesion
		}
	}
}

fn apply_boundary(p: &mut Particle, boundary: Boundary, bounds: Bounds) {
	match boundary {
		Boundary::Wrap { margin } => {
			let margin = margin.max(0.0);
			p.position.x = wrap(p.position.x, bounds.width, margin);
			p.position.y = wrap(p.position.y, bounds.height, margin);
		}
		Boundary::SoftBounce { restitution } => {
			bounce(&mut p.position.x, &mut p.velocity.x, bounds.width, restitution);
			bounce(&mut p.position.y, &mut p.velocity.y, bounds.height, restitution);
		}
	}
}

/// Re-enter from the opposite edge once `v` is more than `margin` outside
/// `[0, extent]`.
fn wrap(v: f32, extent: f32, margin: f32) -> f32 {
	if v >= -margin && v <= extent + margin {
		return v;
	}
	(v + margin).rem_euclid(extent + 2.0 * margin) - margin
}

fn bounce(pos: &mut f32, vel: &mut f32, extent: f32, restitution: f32) {
	if *pos < 0.0 {
		*pos = 0.0;
		if *vel < 0.0 {
			*vel = -*vel * restitution;
		}
	} else if *pos > extent {
		*pos = extent;
		if *vel > 0.0 {
			*vel = -*vel * restitution;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const W: f32 = 800.0;
	const H: f32 = 600.0;

	fn presets() -> Vec<FieldConfig> {
		vec![
			FieldConfig::pointer_follow(),
			FieldConfig::autonomous_swirl(),
			FieldConfig::flocking(),
			FieldConfig::flow_field(),
			FieldConfig::clustered_flow(),
		]
		.into_iter()
		.map(|c| FieldConfig { count: 300, ..c }.with_seed(7))
		.collect()
	}

	/// Pointer that circles the canvas, pressing and leaving now and then.
	fn pointer_at(frame: usize) -> PointerState {
		let t = frame as f32 * 0.05;
		PointerState {
			position: Vec2::new(W * 0.5 + t.cos() * 300.0, H * 0.5 + t.sin() * 250.0),
			active: frame % 200 < 150,
			down: frame % 90 > 70,
		}
	}

	fn input(frame: usize) -> FrameInput {
		FrameInput {
			dt: 1.0 / 60.0,
			pointer: pointer_at(frame),
		}
	}

	#[test]
	fn count_is_fixed() {
		for config in presets() {
			let mut field = ParticleField::new(config, W, H);
			for frame in 0..50 {
				field.step(&input(frame));
			}
			field.resize(400.0, 300.0);
			assert_eq!(field.particles().len(), 300);
		}
	}

	#[test]
	fn empty_field_runs() {
		let mut field = ParticleField::new(FieldConfig { count: 0, ..FieldConfig::flocking() }, W, H);
		field.step(&input(0));
		assert!(field.particles().is_empty());
		assert!(field.links(100).is_empty());
	}

	#[test]
	fn non_finite_ranges_still_spawn() {
		let config = FieldConfig {
			size_range: (f32::NAN, 1.0),
			color_bias_range: (0.0, f32::NAN),
			opacity_range: (f32::NEG_INFINITY, 0.5),
			..FieldConfig::flocking().with_seed(3)
		};
		let mut field = ParticleField::new(config, W, H);
		field.step(&input(0));
		assert_eq!(field.particles().len(), 100);
		assert!(field.particles().iter().all(|p| {
			p.size.is_finite() && p.opacity.is_finite() && p.color_bias.is_finite()
		}));
	}

	#[test]
	fn positions_stay_in_bounds() {
		for config in presets() {
			let margin = config.boundary.margin();
			let mut field = ParticleField::new(config, W, H);
			for frame in 0..600 {
				field.step(&input(frame));
				for p in field.particles() {
					assert!(
						field.bounds().contains(p.position, margin + 1e-3),
						"{:?} escaped to {:?}",
						field.config().mode,
						p.position
					);
				}
			}
		}
	}

	#[test]
	fn speed_never_exceeds_cap() {
		for config in presets() {
			let max_speed = config.max_speed;
			let mut field = ParticleField::new(config, W, H);
			for frame in 0..400 {
				field.step(&input(frame));
				for p in field.particles() {
					assert!(p.velocity.length() <= max_speed + 1e-4);
				}
			}
		}
	}

	#[test]
	fn large_frame_gaps_are_clamped() {
		let mut field = ParticleField::new(FieldConfig::flow_field().with_seed(3), W, H);
		field.step(&FrameInput {
			dt: 30.0,
			pointer: PointerState::default(),
		});
		assert!((field.elapsed() - MAX_DT).abs() < 1e-6);
		field.step(&FrameInput {
			dt: f32::NAN,
			pointer: PointerState::default(),
		});
		assert!((field.elapsed() - MAX_DT).abs() < 1e-6);
		assert_eq!(field.frame(), 2);
	}

	#[test]
	fn pointer_follow_converges() {
		let mut field = ParticleField::new(
			FieldConfig {
				count: 500,
				..FieldConfig::pointer_follow()
			}
			.with_seed(11),
			W,
			H,
		);
		let pointer = PointerState {
			position: Vec2::new(W * 0.5, H * 0.5),
			active: true,
			down: false,
		};
		let mean_distance = |field: &ParticleField| {
			field
				.particles()
				.iter()
				.map(|p| p.position.distance(pointer.position))
				.sum::<f32>()
				/ field.particles().len() as f32
		};

		let mut window_means = Vec::new();
		for _ in 0..6 {
			let mut sum = 0.0;
			for _ in 0..60 {
				field.step(&FrameInput {
					dt: 1.0 / 60.0,
					pointer,
				});
				sum += mean_distance(&field);
			}
			window_means.push(sum / 60.0);
		}

		for pair in window_means.windows(2) {
			assert!(pair[1] <= pair[0] + 10.0, "diverged: {window_means:?}");
		}
		assert!(window_means[5] < window_means[0] * 0.6, "{window_means:?}");
	}

	#[test]
	fn wrap_reenters_opposite_edge() {
		let mut field = ParticleField::new(
			FieldConfig {
				count: 1,
				..FieldConfig::flow_field()
			}
			.with_seed(1),
			W,
			H,
		);
		let margin = field.config().boundary.margin();
		let p = &mut field.particles[0];
		p.position = Vec2::new(-margin - 5.0, H + margin + 5.0);
		p.velocity = Vec2::ZERO;
		apply_boundary(p, field.config.boundary, field.bounds);

		assert!(p.position.x > W * 0.9);
		assert!(p.position.y < H * 0.1);
	}

	#[test]
	fn wrap_handles_far_excursions() {
		assert!((wrap(-2005.0, 100.0, 0.0) - 95.0).abs() < 1e-3);
		assert!((wrap(350.0, 100.0, 0.0) - 50.0).abs() < 1e-3);
		assert_eq!(wrap(42.0, 100.0, 5.0), 42.0);
	}

	#[test]
	fn bounce_reflects_velocity() {
		let (mut pos, mut vel) = (-3.0, -2.0);
		bounce(&mut pos, &mut vel, 100.0, 0.5);
		assert_eq!(pos, 0.0);
		assert_eq!(vel, 1.0);

		let (mut pos, mut vel) = (104.0, 2.0);
		bounce(&mut pos, &mut vel, 100.0, 0.5);
		assert_eq!(pos, 100.0);
		assert_eq!(vel, -1.0);
	}

	#[test]
	fn resize_scales_positions() {
		let mut field = ParticleField::new(FieldConfig::flocking().with_seed(5), W, H);
		let before: Vec<Vec2> = field.particles().iter().map(|p| p.position).collect();
		field.resize(W * 0.5, H * 2.0);

		for (old, p) in before.iter().zip(field.particles()) {
			assert!(field.bounds().contains(p.position, field.config().boundary.margin()));
			if field.bounds().contains(*old * Vec2::new(0.5, 2.0), 0.0) {
				assert!((p.position - *old * Vec2::new(0.5, 2.0)).length() < 1e-3);
			}
		}
	}

	#[test]
	fn reset_respawns_inside_new_bounds() {
		let mut field = ParticleField::new(FieldConfig::autonomous_swirl().with_seed(2), W, H);
		for frame in 0..30 {
			field.step(&input(frame));
		}
		field.reset(320.0, 240.0);
		assert_eq!(field.frame(), 0);
		assert_eq!(field.bounds(), Bounds::new(320.0, 240.0));
		for p in field.particles() {
			assert!(field.bounds().contains(p.position, 0.0));
		}
	}

	#[test]
	fn clustered_spawn_stays_near_seeds() {
		let field = ParticleField::new(FieldConfig::clustered_flow().with_seed(9), W, H);
		let InteractionMode::ClusteredFlow { clusters, spread, .. } = field.config().mode else {
			unreachable!();
		};
		assert_eq!(field.seeds.len(), clusters);
		for p in field.particles() {
			assert!(p.position.distance(field.seeds[p.home]) <= spread + 1e-3);
		}
	}

	#[test]
	fn same_seed_same_field() {
		let a = ParticleField::new(FieldConfig::flow_field().with_seed(42), W, H);
		let b = ParticleField::new(FieldConfig::flow_field().with_seed(42), W, H);
		assert_eq!(a.particles(), b.particles());
	}

	#[test]
	fn attributes_are_fixed_at_spawn() {
		let mut field = ParticleField::new(FieldConfig::flocking().with_seed(8), W, H);
		let before: Vec<(f32, f32, f32)> = field
			.particles()
			.iter()
			.map(|p| (p.size, p.opacity, p.color_bias))
			.collect();
		for frame in 0..100 {
			field.step(&input(frame));
		}
		let after: Vec<(f32, f32, f32)> = field
			.particles()
			.iter()
			.map(|p| (p.size, p.opacity, p.color_bias))
			.collect();
		assert_eq!(before, after);
	}

	#[test]
	fn links_join_close_particles() {
		let mut field = ParticleField::new(
			FieldConfig {
				count: 3,
				..FieldConfig::flocking()
			},
			W,
			H,
		);
		field.particles[0].position = Vec2::new(100.0, 100.0);
		field.particles[1].position = Vec2::new(140.0, 100.0);
		field.particles[2].position = Vec2::new(600.0, 500.0);

		let links = field.links(10);
		assert_eq!(links.len(), 1);
		assert!((links[0].alpha - 0.5).abs() < 1e-5);
		assert!(field.links(0).is_empty());
	}

	#[test]
	fn links_only_in_flocking_mode() {
		let field = ParticleField::new(FieldConfig::flow_field().with_seed(4), W, H);
		assert!(field.links(1000).is_empty());
		let pointer = PointerState {
			position: Vec2::new(W * 0.5, H * 0.5),
			active: true,
			down: false,
		};
		assert!(field.pointer_links(&pointer).is_empty());
	}

	#[test]
	fn pointer_links_need_engaged_pointer() {
		let mut field = ParticleField::new(
			FieldConfig {
				count: 1,
				..FieldConfig::flocking()
			},
			W,
			H,
		);
		field.particles[0].position = Vec2::new(200.0, 200.0);
		let mut pointer = PointerState {
			position: Vec2::new(230.0, 240.0),
			active: true,
			down: false,
		};
		assert_eq!(field.pointer_links(&pointer).len(), 1);
		pointer.down = true;
		assert!(field.pointer_links(&pointer).is_empty());
	}

	#[test]
	fn pressed_pointer_disperses_flock() {
		let mut field = ParticleField::new(
			FieldConfig {
				count: 1,
				initial_speed: 0.0,
				..FieldConfig::flocking()
			},
			W,
			H,
		);
		field.particles[0].position = Vec2::new(420.0, 300.0);
		let pointer = PointerState {
			position: Vec2::new(400.0, 300.0),
			active: true,
			down: true,
		};
		let start = field.particles[0].position.distance(pointer.position);
		for _ in 0..10 {
			field.step(&FrameInput {
				dt: 1.0 / 60.0,
				pointer,
			});
		}
		assert!(field.particles[0].position.distance(pointer.position) > start);
	}

	#[test]
	fn zero_sized_canvas_is_floored() {
		let mut field = ParticleField::new(FieldConfig::flow_field().with_seed(6), 0.0, f32::NAN);
		assert_eq!(field.bounds(), Bounds::new(1.0, 1.0));
		for frame in 0..20 {
			field.step(&input(frame));
		}
		for p in field.particles() {
			assert!(p.position.is_finite());
		}
	}
}
