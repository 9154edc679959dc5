use std::time::SystemTime;

/// Narrow timer interface so a deformer can be driven by the compositor
/// frame clock in production and synchronously in tests.
pub trait FrameClock {
	fn restart(&mut self);

	/// Milliseconds since the previous take (or restart).
	fn take_ms(&mut self) -> f32;
}

pub struct WallClock {
	last: SystemTime,
}

impl Default for WallClock {
	fn default() -> Self {
		Self {
			last: SystemTime::now(),
		}
	}
}

impl FrameClock for WallClock {
	fn restart(&mut self) {
		self.last = SystemTime::now();
	}

	fn take_ms(&mut self) -> f32 {
		let now = SystemTime::now();
		let dt = now
			.duration_since(self.last)
			.unwrap_or_default()
			.as_micros() as f32 / 1e3;
		self.last = now;
		dt
	}
}

/// Fixed-delta clock for tests and headless runs.
pub struct ManualClock {
	pub step_ms: f32,
}

impl FrameClock for ManualClock {
	fn restart(&mut self) {}

	fn take_ms(&mut self) -> f32 {
		self.step_ms
	}
}
