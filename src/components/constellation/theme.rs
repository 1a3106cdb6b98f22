//! Visual theming for the constellation background.
//!
//! Every tunable of the effect lives here: colours, particle ranges, density
//! and connection limits. All structs deserialize with per-field defaults so a
//! host page can override only what it cares about.

use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const BLACK: Self = Self::rgb(0, 0, 0);
	pub const WHITE: Self = Self::rgb(255, 255, 255);

	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

impl Default for Color {
	fn default() -> Self {
		Self::WHITE
	}
}

/// Base layer painted under everything, every frame.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BackgroundStyle {
	/// Opaque fill for the canvas and its CSS background.
	pub color: Color,
}

impl Default for BackgroundStyle {
	fn default() -> Self {
		Self {
			color: Color::BLACK,
		}
	}
}

/// Particle generation ranges.
///
/// Values are drawn uniformly: size from `size_min..size_max`, each velocity
/// axis from `-speed..speed`, opacity from `opacity_min..opacity_max`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParticleStyle {
	/// Particle color; its alpha is replaced by the per-particle opacity.
	pub color: Color,
	/// Minimum particle radius
	pub size_min: f64,
	/// Maximum particle radius
	pub size_max: f64,
	/// Maximum absolute speed per axis, in pixels per frame
	pub speed: f64,
	pub opacity_min: f64,
	pub opacity_max: f64,
	/// Canvas area (px²) that earns one particle.
	pub area_per_particle: f64,
}

impl Default for ParticleStyle {
	fn default() -> Self {
		Self {
			color: Color::WHITE,
			size_min: 1.0,
			size_max: 3.0,
			speed: 0.4,
			opacity_min: 0.5,
			opacity_max: 1.0,
			area_per_particle: 9000.0,
		}
	}
}

/// Connection line style.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConnectionStyle {
	pub color: Color,
	/// Pairs at or beyond this distance are never joined.
	pub max_distance: f64,
	/// Line alpha for two coincident particles; fades linearly to 0 at `max_distance`.
	pub max_alpha: f64,
	pub line_width: f64,
}

impl Default for ConnectionStyle {
	fn default() -> Self {
		Self {
			color: Color::WHITE,
			max_distance: 150.0,
			max_alpha: 0.2,
			line_width: 0.8,
		}
	}
}

/// Complete visual theme.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Theme {
	pub background: BackgroundStyle,
	pub particles: ParticleStyle,
	pub connections: ConnectionStyle,
}

impl Theme {
	/// Parse a (possibly partial) JSON theme, filling gaps with defaults.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn opaque_colors_render_as_hex() {
		assert_eq!(Color::BLACK.to_css(), "#000000");
		assert_eq!(Color::rgb(255, 16, 1).to_css(), "#ff1001");
	}

	#[test]
	fn translucent_colors_render_as_rgba() {
		assert_eq!(Color::WHITE.with_alpha(0.5).to_css(), "rgba(255, 255, 255, 0.5)");
	}

	#[test]
	fn default_theme_matches_constellation_constants() {
		let theme = Theme::default();
		assert_eq!(theme.background.color, Color::BLACK);
		assert_eq!(theme.particles.area_per_particle, 9000.0);
		assert_eq!(theme.particles.speed, 0.4);
		assert_eq!(theme.connections.max_distance, 150.0);
		assert_eq!(theme.connections.max_alpha, 0.2);
	}

	#[test]
	fn partial_json_keeps_remaining_defaults() {
		let theme =
			Theme::from_json(r#"{ "connections": { "max_distance": 90 }, "particles": { "color": { "r": 10 } } }"#)
				.unwrap();
		assert_eq!(theme.connections.max_distance, 90.0);
		assert_eq!(theme.connections.max_alpha, 0.2);
		assert_eq!(theme.particles.color, Color::rgb(10, 255, 255));
		assert_eq!(theme.particles.size_max, 3.0);
	}

	#[test]
	fn malformed_json_is_an_error() {
		assert!(Theme::from_json("{ not json").is_err());
	}
}
