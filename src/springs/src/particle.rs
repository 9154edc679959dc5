use crate::V2;

#[derive(Clone, Debug)]
pub struct Particle {
	pub pos: V2,
	pub vel: V2,
	pub force: V2,
	pub immobile: bool,
}

impl Particle {
	pub fn new(pos: V2) -> Self {
		Self {
			pos,
			vel: V2::zeros(),
			force: V2::zeros(),
			immobile: false,
		}
	}

	pub fn kinetic_energy(&self, mass: f32) -> f32 {
		0.5 * mass * self.vel.magnitude_squared()
	}
}
