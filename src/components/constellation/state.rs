//! Animation controller state, independent of the DOM.
//!
//! Owns the particle set and knows how to rebuild it for a canvas size and how
//! to advance and draw one frame. The browser glue in `canvas.rs` drives it
//! from resize events and `requestAnimationFrame`.

use rand::Rng;

use super::particles::{Particle, ParticleSystem};
use super::render::{self, Surface};
use super::settings::Settings;
use super::theme::Theme;

/// Particle set plus everything needed to regenerate and draw it.
pub struct ConstellationState<S, R> {
	pub theme: Theme,
	settings: S,
	rng: R,
	system: ParticleSystem,
}

impl<S: Settings, R: Rng> ConstellationState<S, R> {
	/// Create state for a `width` x `height` canvas and populate it.
	pub fn new(theme: Theme, settings: S, rng: R, width: f64, height: f64) -> Self {
		let mut state = Self {
			theme,
			settings,
			rng,
			system: ParticleSystem::empty(width, height),
		};
		state.setup(width, height);
		state
	}

	/// Discard the current particles and populate a `width` x `height` canvas.
	///
	/// While the effect is disabled the new set is empty, and stays empty until
	/// the next setup even if the flag is switched back on.
	pub fn setup(&mut self, width: f64, height: f64) {
		self.system = if self.settings.particles_enabled() {
			ParticleSystem::new(&mut self.rng, &self.theme.particles, width, height)
		} else {
			ParticleSystem::empty(width, height)
		};
	}

	/// Advance and draw one frame.
	///
	/// Disabling only stops movement and drawing; the particles are kept and
	/// resume from where they stopped once enabled again.
	pub fn tick<T: Surface + ?Sized>(&mut self, surface: &mut T) {
		let enabled = self.settings.particles_enabled();
		if enabled {
			self.system.update();
		}
		render::render_frame(surface, &self.system, &self.theme, enabled);
	}

	pub fn particles(&self) -> &[Particle] {
		&self.system.particles
	}

	pub fn size(&self) -> (f64, f64) {
		self.system.size()
	}

	pub fn settings(&self) -> &S {
		&self.settings
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;
	use std::rc::Rc;

	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::components::constellation::render::tests::{Op, RecordingSurface};
	use crate::components::constellation::theme::Color;

	/// Flag shared with the test body so it can be flipped mid-run.
	#[derive(Clone, Default)]
	struct Toggle(Rc<Cell<bool>>);

	impl Toggle {
		fn on() -> Self {
			Self(Rc::new(Cell::new(true)))
		}

		fn set(&self, enabled: bool) {
			self.0.set(enabled);
		}
	}

	impl Settings for Toggle {
		fn particles_enabled(&self) -> bool {
			self.0.get()
		}
	}

	fn state(toggle: &Toggle, width: f64, height: f64) -> ConstellationState<Toggle, StdRng> {
		ConstellationState::new(
			Theme::default(),
			toggle.clone(),
			StdRng::seed_from_u64(9000),
			width,
			height,
		)
	}

	#[test]
	fn resize_regenerates_at_new_density() {
		let toggle = Toggle::on();
		let mut s = state(&toggle, 800.0, 600.0);
		assert_eq!(s.particles().len(), 53);
		let before = s.particles().to_vec();

		s.setup(1600.0, 600.0);

		assert_eq!(s.particles().len(), 106);
		assert_eq!(s.size(), (1600.0, 600.0));
		for p in s.particles() {
			assert!(!before.contains(p), "particle carried over a resize: {p:?}");
		}
	}

	#[test]
	fn shrinking_resize_reduces_count() {
		let toggle = Toggle::on();
		let mut s = state(&toggle, 1600.0, 600.0);
		s.setup(300.0, 300.0);
		assert_eq!(s.particles().len(), 10);
		for p in s.particles() {
			assert!(p.x <= 300.0 && p.y <= 300.0);
		}
	}

	#[test]
	fn setup_while_disabled_leaves_set_empty() {
		let toggle = Toggle::default();
		let mut s = state(&toggle, 800.0, 600.0);
		assert!(s.particles().is_empty());

		// Re-enabling alone does not populate.
		toggle.set(true);
		let mut surface = RecordingSurface::default();
		s.tick(&mut surface);
		assert!(s.particles().is_empty());
		assert_eq!(surface.circles(), 0);

		// The next resize does.
		s.setup(800.0, 600.0);
		assert_eq!(s.particles().len(), 53);
	}

	#[test]
	fn disabled_tick_paints_black_and_freezes_particles() {
		let toggle = Toggle::on();
		let mut s = state(&toggle, 800.0, 600.0);
		let frozen = s.particles().to_vec();

		toggle.set(false);
		let mut surface = RecordingSurface::default();
		s.tick(&mut surface);

		assert_eq!(
			surface.ops,
			vec![
				Op::Clear(800.0, 600.0),
				Op::Rect(0.0, 0.0, 800.0, 600.0, Color::BLACK),
			]
		);
		assert_eq!(s.particles(), frozen.as_slice());
	}

	#[test]
	fn reenabling_resumes_stale_positions() {
		let toggle = Toggle::on();
		let mut s = state(&toggle, 800.0, 600.0);
		let mut surface = RecordingSurface::default();
		s.tick(&mut surface);
		let last_seen = s.particles().to_vec();

		toggle.set(false);
		for _ in 0..10 {
			s.tick(&mut surface);
		}
		toggle.set(true);
		s.tick(&mut surface);

		assert_eq!(s.particles().len(), last_seen.len());
		for (now, then) in s.particles().iter().zip(&last_seen) {
			let mut expected = then.clone();
			expected.update(800.0, 600.0);
			assert_eq!(now, &expected);
		}
	}

	#[test]
	fn enabled_tick_moves_and_draws_every_particle() {
		let toggle = Toggle::on();
		let mut s = state(&toggle, 800.0, 600.0);
		let before = s.particles().to_vec();

		let mut surface = RecordingSurface::default();
		s.tick(&mut surface);

		assert_eq!(surface.circles(), 53);
		assert_ne!(s.particles(), before.as_slice());
		for p in s.particles() {
			assert!((0.0..=800.0).contains(&p.x));
			assert!((0.0..=600.0).contains(&p.y));
		}
	}
}
