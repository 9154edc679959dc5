pub mod actor;
pub mod config;
pub mod event;
pub mod pr_frame;

use pr_frame::PrFrame;

use serde::{Deserialize, Serialize};

pub type V2 = nalgebra::Vector2<f32>;

#[derive(Serialize, Deserialize)]
pub enum Message {
	FrameUpdate(PrFrame),
	Nop,
}

impl Message {
	pub fn to_bytes(&self) -> Vec<u8> {
		bincode::serialize(&self).unwrap()
	}

	pub fn from_bytes(bytes: &[u8]) -> Self {
		bincode::deserialize(bytes).unwrap()
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_message_bytes() {
		let frame = PrFrame {
			actor: 7,
			x_tiles: 2,
			y_tiles: 1,
			cells: vec![[0., 0.], [1., 0.], [2., 0.], [0., 1.], [1., 1.], [2., 1.]],
		};
		let bytes = Message::FrameUpdate(frame).to_bytes();
		match Message::from_bytes(&bytes) {
			Message::FrameUpdate(f) => {
				assert_eq!(f.actor, 7);
				assert_eq!(f.cells.len(), 6);
				assert!((f.cells[5][0] - 2.).abs() < 1e-6);
			}
			Message::Nop => panic!("wrong variant"),
		}
	}
}
