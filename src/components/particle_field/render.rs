//! Canvas rendering for the particle field.
//!
//! Drawing is a pure read of the field snapshot. Passes, back to front:
//! 1. Proximity links
//! 2. Pointer grab links
//! 3. Particles

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::particles::{Link, ParticleField, PointerState};
use super::theme::{Color, ParticleStyle};

/// Renders one frame of the field. The context is expected to already be
/// scaled to CSS pixels.
pub fn render(
	field: &ParticleField,
	pointer: &PointerState,
	ctx: &CanvasRenderingContext2d,
	style: &ParticleStyle,
) {
	let bounds = field.bounds();
	ctx.clear_rect(0.0, 0.0, bounds.width as f64, bounds.height as f64);

	draw_links(ctx, &field.links(style.max_links), style.link_color, style.link_opacity);
	draw_links(
		ctx,
		&field.pointer_links(pointer),
		style.link_color,
		style.grab_opacity,
	);
	draw_particles(field, ctx, style);
}

fn draw_links(ctx: &CanvasRenderingContext2d, links: &[Link], color: Color, opacity: f64) {
	if links.is_empty() || opacity <= 0.0 {
		return;
	}
	ctx.set_line_width(1.0);

	for link in links {
		let alpha = link.alpha as f64 * opacity;
		if alpha < 0.01 {
			continue;
		}
		ctx.set_stroke_style_str(&color.with_alpha(alpha).to_css());
		ctx.begin_path();
		ctx.move_to(link.from.x as f64, link.from.y as f64);
		ctx.line_to(link.to.x as f64, link.to.y as f64);
		ctx.stroke();
	}
}

fn draw_particles(field: &ParticleField, ctx: &CanvasRenderingContext2d, style: &ParticleStyle) {
	for p in field.particles() {
		if p.opacity <= 0.0 || p.size <= 0.0 {
			continue;
		}
		ctx.set_fill_style_str(&style.particle_color(p.color_bias, p.opacity).to_css());
		ctx.begin_path();
		let _ = ctx.arc(
			p.position.x as f64,
			p.position.y as f64,
			p.size as f64,
			0.0,
			PI * 2.0,
		);
		ctx.fill();
	}
}
