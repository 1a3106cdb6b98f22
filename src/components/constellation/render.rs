//! Frame rendering for the constellation.
//!
//! Each frame is drawn in order:
//! 1. Clear, then repaint the opaque background
//! 2. Particles as filled circles
//! 3. Connection lines between nearby particles
//!
//! Steps 2 and 3 only run while the effect is enabled.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::particles::ParticleSystem;
use super::theme::{Color, Theme};

/// The drawing primitives a frame needs.
///
/// Implemented by the browser's 2D context; tests substitute a recorder.
pub trait Surface {
	fn clear(&mut self, width: f64, height: f64);
	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color);
	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
		self.set_fill_style_str(&color.to_css());
		CanvasRenderingContext2d::fill_rect(self, x, y, width, height);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.set_fill_style_str(&color.to_css());
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.fill();
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color) {
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(width);
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}
}

/// Draws one complete frame.
///
/// The background is painted even when disabled so that switching the effect
/// off leaves a black screen rather than a transparent one.
pub fn render_frame<S: Surface + ?Sized>(
	surface: &mut S,
	particles: &ParticleSystem,
	theme: &Theme,
	enabled: bool,
) {
	let (width, height) = particles.size();
	surface.clear(width, height);
	surface.fill_rect(0.0, 0.0, width, height, theme.background.color);

	if !enabled {
		return;
	}

	draw_particles(surface, particles, theme);
	draw_connections(surface, particles, theme);
}

fn draw_particles<S: Surface + ?Sized>(surface: &mut S, particles: &ParticleSystem, theme: &Theme) {
	let color = theme.particles.color;
	for p in &particles.particles {
		surface.fill_circle(p.x, p.y, p.size, color.with_alpha(p.opacity));
	}
}

fn draw_connections<S: Surface + ?Sized>(surface: &mut S, particles: &ParticleSystem, theme: &Theme) {
	let style = &theme.connections;
	for c in particles.connections(style) {
		let (a, b) = (&particles.particles[c.from], &particles.particles[c.to]);
		surface.stroke_line(
			(a.x, a.y),
			(b.x, b.y),
			style.line_width,
			style.color.with_alpha(c.alpha),
		);
	}
}
