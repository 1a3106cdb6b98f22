//! Drifting particles and the pairwise connections drawn between them.

use rand::Rng;

use super::theme::{ConnectionStyle, ParticleStyle};

/// A single floating particle.
///
/// Velocity, size and opacity are fixed at creation; only the position moves.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub size: f64,
	pub opacity: f64,
}

impl Particle {
	/// Create a particle placed uniformly over a `width` x `height` canvas.
	pub fn random<R: Rng + ?Sized>(rng: &mut R, style: &ParticleStyle, width: f64, height: f64) -> Self {
		// `gen::<f64>() * extent` rather than `gen_range`, which panics on an
		// empty range when the canvas has no area.
		Self {
			x: rng.r#gen::<f64>() * width,
			y: rng.r#gen::<f64>() * height,
			vx: (rng.r#gen::<f64>() - 0.5) * 2.0 * style.speed,
			vy: (rng.r#gen::<f64>() - 0.5) * 2.0 * style.speed,
			size: style.size_min + rng.r#gen::<f64>() * (style.size_max - style.size_min),
			opacity: style.opacity_min + rng.r#gen::<f64>() * (style.opacity_max - style.opacity_min),
		}
	}

	/// Advance one frame and snap back inside the canvas.
	///
	/// Leaving through one edge lands exactly on the opposite edge, each axis
	/// independently.
	pub fn update(&mut self, width: f64, height: f64) {
		self.x += self.vx;
		self.y += self.vy;

		if self.x < 0.0 {
			self.x = width;
		} else if self.x > width {
			self.x = 0.0;
		}
		if self.y < 0.0 {
			self.y = height;
		} else if self.y > height {
			self.y = 0.0;
		}
	}

	pub fn distance_to(&self, other: &Particle) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}
}

/// Number of particles for a canvas: one per `area_per_particle` square pixels, rounded down.
pub fn particle_count(width: f64, height: f64, area_per_particle: f64) -> usize {
	let count = (width * height / area_per_particle).floor();
	// NaN and negatives saturate to 0.
	if count.is_finite() { count as usize } else { 0 }
}

/// Line opacity for two particles `distance` apart, or `None` when too far to connect.
pub fn connection_alpha(distance: f64, style: &ConnectionStyle) -> Option<f64> {
	if distance < style.max_distance {
		Some((1.0 - distance / style.max_distance) * style.max_alpha)
	} else {
		None
	}
}

/// A line to draw between two particles, by index into the particle list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
	pub from: usize,
	pub to: usize,
	pub alpha: f64,
}

/// The particle set for one canvas size.
///
/// Never resized in place: a new canvas size means a new system.
#[derive(Clone, Debug)]
pub struct ParticleSystem {
	pub particles: Vec<Particle>,
	width: f64,
	height: f64,
}

impl ParticleSystem {
	/// Populate a `width` x `height` canvas at the style's density.
	pub fn new<R: Rng + ?Sized>(rng: &mut R, style: &ParticleStyle, width: f64, height: f64) -> Self {
		let count = particle_count(width, height, style.area_per_particle);
		let particles = (0..count)
			.map(|_| Particle::random(rng, style, width, height))
			.collect();

		Self {
			particles,
			width,
			height,
		}
	}

	/// A system with no particles, used while the effect is disabled.
	pub fn empty(width: f64, height: f64) -> Self {
		Self {
			particles: Vec::new(),
			width,
			height,
		}
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	pub fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	/// Update particle positions
	pub fn update(&mut self) {
		for p in &mut self.particles {
			p.update(self.width, self.height);
		}
	}

	/// All unordered pairs close enough to connect.
	///
	/// Naive all-pairs scan, quadratic in the particle count. Density keeps the
	/// count small enough for that to be fine.
	pub fn connections<'a>(&'a self, style: &'a ConnectionStyle) -> impl Iterator<Item = Connection> + 'a {
		let particles = &self.particles;
		(0..particles.len()).flat_map(move |i| {
			(i + 1..particles.len()).filter_map(move |j| {
				connection_alpha(particles[i].distance_to(&particles[j]), style).map(|alpha| Connection {
					from: i,
					to: j,
					alpha,
				})
			})
		})
	}
}
