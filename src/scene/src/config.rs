use serde::{Deserialize, Serialize};

/// Effect settings, read once at effect construction and cached.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WobblyConfig {
	pub friction: f32,
	pub spring_k: f32,
	/// Divider applied to the elapsed-ms frame delta before stepping.
	pub speedup_factor: f32,
	/// UI mass: higher values mean a lighter, more responsive grid.
	pub mass: f32,
	pub x_tiles: u32,
	pub y_tiles: u32,
	pub maximize_effect: bool,
	pub resize_effect: bool,
}

impl Default for WobblyConfig {
	fn default() -> Self {
		Self {
			friction: 2.5,
			spring_k: 8.0,
			speedup_factor: 2.0,
			mass: 50.0,
			x_tiles: 20,
			y_tiles: 20,
			maximize_effect: true,
			resize_effect: true,
		}
	}
}

fn clamp_finite(v: f32, lo: f32, hi: f32, fallback: f32) -> f32 {
	if !v.is_finite() {
		return fallback;
	}
	v.clamp(lo, hi)
}

impl WobblyConfig {
	/// Clamp every field into its safe range; non-finite values fall back
	/// to the defaults.
	pub fn sanitized(mut self) -> Self {
		let d = Self::default();
		self.friction = clamp_finite(self.friction, 0., 10., d.friction);
		self.spring_k = clamp_finite(self.spring_k, 0.1, 100., d.spring_k);
		self.speedup_factor =
			clamp_finite(self.speedup_factor, 0.1, 100., d.speedup_factor);
		self.mass = clamp_finite(self.mass, 0., 99., d.mass);
		self.x_tiles = self.x_tiles.clamp(1, 64);
		self.y_tiles = self.y_tiles.clamp(1, 64);
		self
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_sanitize_clamps() {
		let config = WobblyConfig {
			friction: -3.,
			spring_k: 1e9,
			speedup_factor: 0.,
			mass: 250.,
			x_tiles: 0,
			y_tiles: 1000,
			..Default::default()
		}
		.sanitized();
		assert!((config.friction - 0.).abs() < 1e-6);
		assert!((config.spring_k - 100.).abs() < 1e-6);
		assert!((config.speedup_factor - 0.1).abs() < 1e-6);
		assert!((config.mass - 99.).abs() < 1e-6);
		assert_eq!(config.x_tiles, 1);
		assert_eq!(config.y_tiles, 64);
	}

	#[test]
	fn test_sanitize_non_finite() {
		let config = WobblyConfig {
			friction: f32::NAN,
			mass: f32::INFINITY,
			..Default::default()
		}
		.sanitized();
		let d = WobblyConfig::default();
		assert!((config.friction - d.friction).abs() < 1e-6);
		assert!((config.mass - d.mass).abs() < 1e-6);
	}
}
