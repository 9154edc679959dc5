use crate::V2;

/// Endpoints are arena indices into the owning model's particle vec,
/// fixed at construction.
#[derive(Clone, Copy, Debug)]
pub struct Spring {
	pub a: usize,
	pub b: usize,
	/// Natural separation from a to b; zero along the perpendicular
	/// axis, so a spring only resists stretch along its own edge.
	pub offset: V2,
}

impl Spring {
	pub fn new(a: usize, b: usize, offset: V2) -> Self {
		Self { a, b, offset }
	}
}
