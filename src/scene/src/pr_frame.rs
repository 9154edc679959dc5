// pr_frame: deformed surface snapshot for rendering

use serde::{Deserialize, Serialize};

use crate::actor::ActorId;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PrFrame {
	pub actor: ActorId,
	pub x_tiles: u32,
	pub y_tiles: u32,
	/// Row-major (x_tiles + 1) * (y_tiles + 1) deformed positions.
	pub cells: Vec<[f32; 2]>,
}
